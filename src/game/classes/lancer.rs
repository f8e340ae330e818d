//! Lancer: winds up a charge, spears straight through the target for
//! double damage and heavy knockback, then carries on past the impact.

use glam::Vec2;

use super::{ClassModule, DamageOutcome, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

const CHARGE_SPEED_MULT: f32 = 3.2;
const PIERCE_KNOCKBACK: f32 = 3.0;
const FOLLOW_THROUGH_MULT: f32 = 2.4;

pub struct Lancer;

impl ClassModule for Lancer {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Lancer {
            lance_cd: 0.0,
            charging: false,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Lancer {
            mut lance_cd,
            mut charging,
        } = entities[idx].class_state
        else {
            return;
        };
        lance_cd -= dt;
        if lance_cd <= 0.0 {
            charging = true;
        }
        if charging {
            if let Some((target_idx, _)) = nearest_enemy(entities, idx) {
                let target_pos = entities[target_idx].pos;
                let e = &mut entities[idx];
                let dir = (target_pos - e.pos).normalize_or_zero();
                e.vel = dir * e.base_speed * CHARGE_SPEED_MULT;
            }
        }
        entities[idx].class_state = ClassState::Lancer { lance_cd, charging };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        if matches!(glad.class_state, ClassState::Lancer { charging: true, .. }) {
            return DamageOutcome::plain(damage * 2.0);
        }
        DamageOutcome::plain(damage)
    }

    fn on_combat(
        &self,
        attacker: &mut Gladiator,
        defender: &mut Gladiator,
        ctx: &mut WorldCtx<'_>,
    ) {
        let ClassState::Lancer { charging, .. } = attacker.class_state else {
            return;
        };
        if !charging {
            return;
        }
        let dir = (defender.pos - attacker.pos).normalize_or_zero();
        defender.vel += dir * PIERCE_KNOCKBACK;
        attacker.vel = dir * attacker.base_speed * FOLLOW_THROUGH_MULT;
        attacker.class_state = ClassState::Lancer {
            lance_cd: 180.0 - 10.0 * attacker.level as f32,
            charging: false,
        };
        attacker.gain_xp(25.0);
        ctx.text(defender.pos + Vec2::new(0.0, -8.0), "PIERCE!", "#66ccff");
    }

    fn on_collision_repel(
        &self,
        glad: &mut Gladiator,
        _other: &Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) -> Option<f32> {
        // No self-knockback mid-charge; the spear goes through.
        if matches!(glad.class_state, ClassState::Lancer { charging: true, .. }) {
            Some(0.0)
        } else {
            None
        }
    }
}
