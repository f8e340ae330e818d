//! Spinner: orbits the arena center and rewards rapid consecutive hits
//! with a growing combo multiplier.

use glam::Vec2;

use super::{ClassModule, DamageOutcome};
use crate::game::config::{PassiveConfig, STAGE_H, STAGE_W};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::{PassivePattern, Strategy};
use crate::random::RandomSource;

/// Seconds between hits before the combo resets.
const COMBO_WINDOW_S: f32 = 0.5;

pub struct Spinner;

impl ClassModule for Spinner {
    fn on_init(&self, glad: &mut Gladiator, rng: &mut dyn RandomSource) {
        let config = PassiveConfig {
            orbit_speed: 0.2,
            orbit_radius: 80.0,
            orbit_speed_multiplier: 1.2,
            friction: 1.0,
            ..PassiveConfig::default()
        };
        glad.strategy = Strategy::passive(config, PassivePattern::Orbit, glad.pos, rng);
        glad.class_state = ClassState::Spinner {
            combo: 0,
            last_attack: 0.0,
            initialized: false,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, _dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Spinner {
            combo,
            last_attack,
            initialized,
        } = e.class_state
        else {
            return;
        };
        if initialized {
            return;
        }
        // Recenter on the arena middle; on_init ran before spawn placement
        // settled, so the orbit anchor starts at the spawn point.
        if let Strategy::Passive {
            orbit_center,
            config,
            ..
        } = &mut e.strategy
        {
            *orbit_center = Vec2::new(STAGE_W as f32 / 2.0, STAGE_H as f32 / 2.0);
            config.orbit_speed = 0.2 + 0.05 * e.level as f32;
        }
        e.class_state = ClassState::Spinner {
            combo,
            last_attack,
            initialized: true,
        };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        let ClassState::Spinner {
            mut combo,
            last_attack,
            initialized,
        } = glad.class_state
        else {
            return DamageOutcome::plain(damage);
        };
        if ctx.elapsed - last_attack > COMBO_WINDOW_S {
            combo = 0;
        }
        combo += 1;
        let per_hit = 0.2 + 0.1 * glad.level as f32;
        let scaled = damage * (1.0 + combo as f32 * per_hit);
        glad.gain_xp(10.0);
        glad.class_state = ClassState::Spinner {
            combo,
            last_attack: ctx.elapsed,
            initialized,
        };
        DamageOutcome::plain(scaled)
    }

    fn on_wall_bounce(&self, glad: &mut Gladiator) {
        if let ClassState::Spinner { combo, .. } = &mut glad.class_state {
            *combo = 0;
        }
    }

    fn friction(&self, _glad: &Gladiator) -> Option<f32> {
        Some(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::arena::Team;
    use crate::game::config::ClassKey;
    use crate::game::events::EffectQueue;
    use crate::random::SimpleRng;
    use crate::world::{CellKind, Grid};

    fn spinner() -> Gladiator {
        let mut rng = SimpleRng::new(6);
        Gladiator::new(
            0,
            Vec2::new(60.0, 100.0),
            ClassKey::Spinner,
            CellKind::Fire,
            Team::Red,
            &mut rng,
        )
    }

    #[test]
    fn test_combo_grows_within_window_and_resets_after() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut g = spinner();

        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 1.0,
            effects: &mut effects,
        };
        // Two quick hits at level 1: x1.3 then x1.6
        let first = Spinner.modify_damage(&mut g, 10.0, &mut ctx);
        ctx.elapsed = 1.2;
        let second = Spinner.modify_damage(&mut g, 10.0, &mut ctx);
        assert!((first.damage - 13.0).abs() < 1e-4);
        assert!((second.damage - 16.0).abs() < 1e-4);

        // A slow third hit falls back to combo 1
        ctx.elapsed = 3.0;
        let third = Spinner.modify_damage(&mut g, 10.0, &mut ctx);
        assert!((third.damage - 13.0).abs() < 1e-4);
        assert_eq!(g.xp, 30.0);
    }

    #[test]
    fn test_first_ability_tick_anchors_orbit_on_center() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };
        let mut entities = vec![spinner()];
        Spinner.update(0, &mut entities, &mut ctx, 6.0);

        let Strategy::Passive { orbit_center, .. } = &entities[0].strategy else {
            panic!("spinner should stay passive");
        };
        assert_eq!(*orbit_center, Vec2::new(150.0, 100.0));
        assert!(matches!(
            entities[0].class_state,
            ClassState::Spinner {
                initialized: true,
                ..
            }
        ));
    }

    #[test]
    fn test_wall_bounce_drops_combo() {
        let mut g = spinner();
        g.class_state = ClassState::Spinner {
            combo: 4,
            last_attack: 2.0,
            initialized: true,
        };
        Spinner.on_wall_bounce(&mut g);
        assert!(matches!(
            g.class_state,
            ClassState::Spinner { combo: 0, .. }
        ));
    }
}
