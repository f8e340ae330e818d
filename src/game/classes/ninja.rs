//! Ninja: a flat dodge chance that voids incoming hits entirely.

use glam::Vec2;

use super::ClassModule;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

pub struct Ninja;

impl ClassModule for Ninja {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Ninja { dodge_chance: 0.15 };
    }

    fn on_damage_taken_pre(
        &self,
        glad: &mut Gladiator,
        amount: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        let ClassState::Ninja { dodge_chance } = glad.class_state else {
            return amount;
        };
        let chance = dodge_chance + 0.02 * glad.level as f32;
        if ctx.rng.next_f32() < chance {
            ctx.text(glad.pos + Vec2::new(0.0, -5.0), "MISS", "#aaaaaa");
            glad.gain_xp(25.0);
            return 0.0;
        }
        amount
    }
}
