//! Spike: reflects a flat chunk of damage back at melee attackers.

use super::ClassModule;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

pub struct Spike;

impl ClassModule for Spike {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Spike { reflect_dmg: 5.0 };
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        attacker: Option<&mut Gladiator>,
        amount: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        let ClassState::Spike { reflect_dmg } = glad.class_state else {
            return amount;
        };
        if let Some(attacker) = attacker {
            let reflected = reflect_dmg + 2.0 * glad.level as f32;
            // Reflection never chains back; no attacker is passed down.
            attacker.take_damage(reflected, None, ctx);
            glad.gain_xp(10.0);
        }
        amount
    }
}
