//! Tank: periodically raises a shield that makes it invulnerable for a
//! window that grows with level. The interval shrinks as it levels.

use super::ClassModule;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

pub struct Tank;

impl ClassModule for Tank {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Tank { last_shield: 0.0 };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, _dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Tank { last_shield } = e.class_state else {
            return;
        };
        let interval = (5.0 - 0.3 * e.level as f32).max(1.5);
        if ctx.elapsed - last_shield >= interval {
            e.invulnerable = true;
            e.invuln_timer = 30.0 + 10.0 * e.level as f32;
            e.class_state = ClassState::Tank {
                last_shield: ctx.elapsed,
            };
        }
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
    use glam::Vec2;

    #[test]
    fn test_shield_raises_on_interval() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut init_rng = SimpleRng::new(2);
        let mut entities = vec![Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Tank,
            CellKind::Stone,
            Team::Red,
            &mut init_rng,
        )];

        // At level 1 the interval is 4.7 s; 3 s elapsed does nothing.
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 3.0,
            effects: &mut effects,
        };
        Tank.update(0, &mut entities, &mut ctx, 6.0);
        assert!(!entities[0].invulnerable);

        ctx.elapsed = 4.8;
        Tank.update(0, &mut entities, &mut ctx, 6.0);
        assert!(entities[0].invulnerable);
        assert_eq!(entities[0].invuln_timer, 40.0); // 30 + 10 * level
        assert!(matches!(
            entities[0].class_state,
            ClassState::Tank { last_shield } if (last_shield - 4.8).abs() < 1e-6
        ));
    }

    #[test]
    fn test_interval_floors_at_one_and_a_half_seconds() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut init_rng = SimpleRng::new(2);
        let mut entities = vec![Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Tank,
            CellKind::Stone,
            Team::Red,
            &mut init_rng,
        )];
        entities[0].level = 20;
        entities[0].class_state = ClassState::Tank { last_shield: 10.0 };

        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 11.6,
            effects: &mut effects,
        };
        Tank.update(0, &mut entities, &mut ctx, 6.0);
        assert!(entities[0].invulnerable, "1.6 s elapsed beats the 1.5 s floor");
    }
}
