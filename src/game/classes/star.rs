//! Star: banks energy from distance traveled, then burns 100 of it on a
//! sudden burst of speed. Hits land harder while the tank is above half.

use super::{ClassModule, DamageOutcome};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

const ENERGY_CAP: f32 = 150.0;
const BURST_COST: f32 = 100.0;

pub struct Star;

impl ClassModule for Star {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Star {
            energy: 0.0,
            prev_pos: glad.pos,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, _dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Star { mut energy, prev_pos } = e.class_state else {
            return;
        };
        let traveled = e.pos.distance(prev_pos);
        let gain = traveled * (1.2 + 0.05 * e.level as f32);
        energy = (energy + gain).min(ENERGY_CAP);
        if energy >= BURST_COST {
            e.vel *= 1.5 + 0.05 * e.level as f32;
            energy -= BURST_COST;
            e.gain_xp(50.0);
        }
        e.class_state = ClassState::Star {
            energy,
            prev_pos: e.pos,
        };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        if let ClassState::Star { energy, .. } = glad.class_state {
            if energy > 50.0 {
                return DamageOutcome::plain(damage * 1.5);
            }
        }
        DamageOutcome::plain(damage)
    }
}
