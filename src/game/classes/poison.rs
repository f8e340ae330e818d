//! Poison: melee hits apply stacking venom that ticks once per second,
//! then the poisoner disengages and lets the stacks do the work.

use glam::Vec2;

use super::{ClassModule, nearest_enemy, pair_mut};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::StrategySpec;
use crate::random::RandomSource;

const KITE_RANGE: f32 = 70.0;
const FLEE_FRAMES: f32 = 18.0;
const TICK_INTERVAL_S: f32 = 1.0;

pub struct Poison;

impl ClassModule for Poison {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Poison {
            flee_timer: 0.0,
            last_tick: 0.0,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Poison {
            mut flee_timer,
            mut last_tick,
        } = entities[idx].class_state
        else {
            return;
        };
        flee_timer -= dt;

        if ctx.elapsed - last_tick >= TICK_INTERVAL_S {
            last_tick = ctx.elapsed;
            let my_id = entities[idx].id;
            for j in 0..entities.len() {
                if j == idx || entities[j].dead {
                    continue;
                }
                if entities[j].poison_stacks == 0 || entities[j].poison_source != Some(my_id) {
                    continue;
                }
                let stacks = entities[j].poison_stacks as f32;
                let (me, target) = pair_mut(entities, idx, j);
                let dealt = target.take_damage(stacks, Some(me), ctx);
                if dealt > 0.0 {
                    me.damage_dealt += dealt;
                    me.gain_xp(6.0 + me.level as f32);
                }
            }
        }

        let close = nearest_enemy(entities, idx).is_some_and(|(_, d)| d < KITE_RANGE);
        if close && flee_timer > 0.0 {
            entities[idx].switch_strategy(StrategySpec::Defensive, ctx.rng);
        } else if flee_timer <= 0.0 && entities[idx].strategy.is_defensive() {
            entities[idx].switch_strategy(StrategySpec::Aggressive, ctx.rng);
        }

        entities[idx].class_state = ClassState::Poison {
            flee_timer,
            last_tick,
        };
    }

    fn on_combat(
        &self,
        attacker: &mut Gladiator,
        defender: &mut Gladiator,
        ctx: &mut WorldCtx<'_>,
    ) {
        defender.poison_stacks += 1 + attacker.level;
        defender.poison_source = Some(attacker.id);
        if let ClassState::Poison { flee_timer, .. } = &mut attacker.class_state {
            *flee_timer = FLEE_FRAMES;
        }
        attacker.gain_xp(5.0);
        ctx.text(defender.pos + Vec2::new(0.0, -8.0), "POISON", "#66ff66");
    }
}
