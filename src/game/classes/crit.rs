//! Crit: every melee swing has a chance to land for triple damage.

use super::{ClassModule, DamageOutcome};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

pub struct Crit;

impl ClassModule for Crit {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Crit { crit_chance: 0.5 };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        let ClassState::Crit { crit_chance } = glad.class_state else {
            return DamageOutcome::plain(damage);
        };
        let chance = crit_chance + 0.02 * glad.level as f32;
        if ctx.rng.next_f32() < chance {
            glad.gain_xp(20.0);
            DamageOutcome {
                damage: damage * 3.0,
                is_crit: true,
            }
        } else {
            DamageOutcome::plain(damage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::Team;
    use crate::game::config::ClassKey;
    use crate::game::events::EffectQueue;
    use crate::random::{ScriptedRng, SimpleRng};
    use crate::world::{CellKind, Grid};
    use glam::Vec2;

    #[test]
    fn test_crit_triples_damage_and_awards_xp() {
        let mut grid = Grid::new(300, 200);
        let mut rng = ScriptedRng::new(&[0.1], 1); // under the 52% chance at level 1
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut init_rng = SimpleRng::new(9);
        let mut g = Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Crit,
            CellKind::Fire,
            Team::Red,
            &mut init_rng,
        );
        let out = Crit.modify_damage(&mut g, 7.0, &mut ctx);
        assert!(out.is_crit);
        assert_eq!(out.damage, 21.0);
        assert_eq!(g.xp, 20.0);
    }

    #[test]
    fn test_normal_swing_passes_through() {
        let mut grid = Grid::new(300, 200);
        let mut rng = ScriptedRng::new(&[0.99], 1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut init_rng = SimpleRng::new(9);
        let mut g = Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Crit,
            CellKind::Fire,
            Team::Red,
            &mut init_rng,
        );
        let out = Crit.modify_damage(&mut g, 7.0, &mut ctx);
        assert!(!out.is_crit);
        assert_eq!(out.damage, 7.0);
        assert_eq!(g.xp, 0.0);
    }
}
