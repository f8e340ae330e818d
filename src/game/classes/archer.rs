//! Archer: a kiting ranged attacker. It holds a standoff band, backpedals
//! out of melee reach, and looses arrows at anything inside its range.

use super::{ClassModule, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::StrategySpec;
use crate::game::projectile::ProjectileKind;
use crate::random::RandomSource;

const ATTACK_MIN: f32 = 60.0;
const ATTACK_MAX: f32 = 160.0;
const FLEE_RANGE: f32 = 45.0;
const RANGED_COOLDOWN_FRAMES: f32 = 60.0;
const FLEE_FRAMES: f32 = 18.0;

pub struct Archer;

impl ClassModule for Archer {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Archer {
            ranged_cd: 0.0,
            flee_timer: 0.0,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Archer {
            mut ranged_cd,
            mut flee_timer,
        } = entities[idx].class_state
        else {
            return;
        };
        ranged_cd -= dt;
        flee_timer -= dt;

        let nearest = nearest_enemy(entities, idx);
        if let Some((target_idx, dist)) = nearest {
            let target_pos = entities[target_idx].pos;
            if dist < FLEE_RANGE {
                if flee_timer <= 0.0 {
                    flee_timer = FLEE_FRAMES;
                }
                entities[idx].switch_strategy(StrategySpec::Defensive, ctx.rng);
            } else if dist >= ATTACK_MIN && dist <= ATTACK_MAX {
                // In the sweet spot: hold position and shoot.
                let e = &mut entities[idx];
                e.skip_seek = true;
                e.vel *= 0.95;
            } else if dist < ATTACK_MIN && flee_timer <= 0.0 {
                // Slightly too close: back off without panicking.
                let e = &mut entities[idx];
                e.skip_seek = true;
                let away = (e.pos - target_pos).normalize_or_zero();
                e.vel += away * 0.18 * dt;
            } else if dist > ATTACK_MAX {
                entities[idx].switch_strategy(StrategySpec::Aggressive, ctx.rng);
            }

            if dist > ATTACK_MIN && dist < ATTACK_MAX && ranged_cd <= 0.0 {
                let e = &entities[idx];
                ctx.spawn_projectile(ProjectileKind::Arrow, e.pos, e.id, Some(target_pos));
                ranged_cd = RANGED_COOLDOWN_FRAMES;
                entities[idx].gain_xp(10.0);
            }
        }

        entities[idx].class_state = ClassState::Archer {
            ranged_cd,
            flee_timer,
        };
    }

    fn on_combat(
        &self,
        attacker: &mut Gladiator,
        _defender: &mut Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) {
        // Forced into melee: disengage for a while.
        if let ClassState::Archer { flee_timer, .. } = &mut attacker.class_state {
            *flee_timer = FLEE_FRAMES;
        }
    }

    fn default_strategy(&self) -> Option<StrategySpec> {
        Some(StrategySpec::Defensive)
    }
}
