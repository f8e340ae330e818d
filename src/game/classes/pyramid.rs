//! Pyramid: anchors into a turret when an enemy closes in, trading all
//! movement for heavy damage reduction and a stream of arrows.

use super::{ClassModule, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::{PassivePattern, StrategySpec};
use crate::game::projectile::ProjectileKind;
use crate::random::RandomSource;

const ANCHOR_RANGE: f32 = 60.0;

pub struct Pyramid;

impl ClassModule for Pyramid {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Pyramid {
            turret: false,
            ranged_cd: 0.0,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Pyramid {
            mut turret,
            mut ranged_cd,
        } = entities[idx].class_state
        else {
            return;
        };

        let nearest = nearest_enemy(entities, idx);
        let should_anchor = nearest.is_some_and(|(_, d)| d < ANCHOR_RANGE);
        if should_anchor && !turret {
            turret = true;
            entities[idx].switch_strategy(StrategySpec::Passive(PassivePattern::Idle), ctx.rng);
        } else if !should_anchor && turret {
            turret = false;
            entities[idx].switch_strategy(StrategySpec::Aggressive, ctx.rng);
        }

        if turret {
            entities[idx].gain_xp(0.05 * dt);
            ranged_cd -= dt;
            if ranged_cd <= 0.0 {
                if let Some((target_idx, _)) = nearest {
                    let target_pos = entities[target_idx].pos;
                    let e = &entities[idx];
                    ctx.spawn_projectile(ProjectileKind::Arrow, e.pos, e.id, Some(target_pos));
                    ranged_cd = (45.0 - 4.0 * e.level as f32).max(15.0);
                    entities[idx].gain_xp(8.0);
                }
            }
        }

        entities[idx].class_state = ClassState::Pyramid { turret, ranged_cd };
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        if glad.in_turret_mode() {
            let factor = (0.6 - 0.05 * glad.level as f32).max(0.1);
            return amount * factor;
        }
        amount
    }
}
