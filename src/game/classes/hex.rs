//! Hex: a skirmisher that regenerates over time, shrugs off a fifth of
//! all damage, and retreats below 40% health until it heals back to 60%.

use super::{ClassModule, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::StrategySpec;
use crate::random::RandomSource;

const REGEN_INTERVAL_FRAMES: f32 = 60.0;
const RETREAT_HP_PCT: f32 = 0.4;
const RECOVER_HP_PCT: f32 = 0.6;
const SPACING_RANGE: f32 = 100.0;

pub struct Hex;

impl ClassModule for Hex {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Hex { regen_timer: 0.0 };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Hex { mut regen_timer } = entities[idx].class_state else {
            return;
        };

        regen_timer += dt;
        {
            let e = &mut entities[idx];
            if regen_timer >= REGEN_INTERVAL_FRAMES {
                regen_timer = 0.0;
                if e.hp < e.max_hp {
                    let heal = 0.8 + 0.6 * e.level as f32;
                    e.hp = (e.hp + heal).min(e.max_hp);
                    e.gain_xp(10.0);
                }
            }
        }

        // Retreat/recover hysteresis keeps it from flickering at one edge.
        let pct = entities[idx].hp_percent();
        if pct < RETREAT_HP_PCT {
            entities[idx].switch_strategy(StrategySpec::Defensive, ctx.rng);
        } else if pct >= RECOVER_HP_PCT && entities[idx].strategy.is_defensive() {
            entities[idx].switch_strategy(StrategySpec::Aggressive, ctx.rng);
        }

        if !entities[idx].strategy.is_defensive() {
            if let Some((target_idx, dist)) = nearest_enemy(entities, idx) {
                if dist < SPACING_RANGE {
                    let target_pos = entities[target_idx].pos;
                    let e = &mut entities[idx];
                    e.skip_seek = true;
                    let away = (e.pos - target_pos).normalize_or_zero();
                    e.vel += away * 0.2 * dt;
                }
            }
        }

        entities[idx].class_state = ClassState::Hex { regen_timer };
    }

    fn on_damage_taken(
        &self,
        _glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        amount * 0.8
    }
}
