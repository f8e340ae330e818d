//! Orb: a slow gravity well. It drifts toward the nearest enemy, drags
//! that enemy toward itself, and shoves attackers away when struck.

use super::{ClassModule, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::Gladiator;
use crate::random::RandomSource;

const PROXIMITY_RANGE: f32 = 100.0;
const SHOVE_FORCE: f32 = 2.0;

pub struct Orb;

impl ClassModule for Orb {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.seek_attractor = 0.05;
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, dt: f32) {
        let Some((target_idx, dist)) = nearest_enemy(entities, idx) else {
            return;
        };
        let target_pos = entities[target_idx].pos;
        let e = &mut entities[idx];
        let dir = (target_pos - e.pos).normalize_or_zero();
        let accel = 0.25 + 0.02 * e.level as f32;
        e.vel += dir * accel * dt;
        if dist < PROXIMITY_RANGE {
            e.gain_xp(5.0 * dt);
        }
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        attacker: Option<&mut Gladiator>,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        if let Some(attacker) = attacker {
            let away = (attacker.pos - glad.pos).normalize_or_zero();
            attacker.vel += away * SHOVE_FORCE;
        }
        amount
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

    fn glad(id: u32, pos: Vec2, class: ClassKey, team: Team) -> Gladiator {
        let mut rng = SimpleRng::new(16);
        Gladiator::new(id, pos, class, CellKind::Water, team, &mut rng)
    }

    #[test]
    fn test_orb_accelerates_toward_enemy_and_earns_proximity_xp() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![
            glad(0, Vec2::new(100.0, 100.0), ClassKey::Orb, Team::Red),
            glad(1, Vec2::new(150.0, 100.0), ClassKey::Tank, Team::Blue),
        ];
        entities[0].vel = Vec2::ZERO;
        Orb.update(0, &mut entities, &mut ctx, 6.0);

        assert!(entities[0].vel.x > 0.0);
        assert!((entities[0].vel.x - 0.27 * 6.0).abs() < 1e-4);
        assert_eq!(entities[0].xp, 30.0); // within 100 cells
    }

    #[test]
    fn test_distant_enemy_gives_no_proximity_xp() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![
            glad(0, Vec2::new(50.0, 100.0), ClassKey::Orb, Team::Red),
            glad(1, Vec2::new(250.0, 100.0), ClassKey::Tank, Team::Blue),
        ];
        Orb.update(0, &mut entities, &mut ctx, 6.0);
        assert_eq!(entities[0].xp, 0.0);
    }

    #[test]
    fn test_attacker_is_shoved_away() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut orb = glad(0, Vec2::new(100.0, 100.0), ClassKey::Orb, Team::Red);
        let mut attacker = glad(1, Vec2::new(110.0, 100.0), ClassKey::Tank, Team::Blue);
        attacker.vel = Vec2::ZERO;
        let through = Orb.on_damage_taken(&mut orb, Some(&mut attacker), 10.0, &mut ctx);
        assert_eq!(through, 10.0);
        assert!((attacker.vel.x - 2.0).abs() < 1e-5);
    }
}
