//! Prism: blinks to a nearby random position and hits slightly harder
//! than its base damage suggests.

use super::{ClassModule, DamageOutcome};
use crate::game::context::WorldCtx;
use crate::game::gladiator::Gladiator;

/// Per ability tick, so ~2 blinks per second of wall-clock combat.
const BLINK_CHANCE: f32 = 0.02;

pub struct Prism;

impl ClassModule for Prism {
    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, _dt: f32) {
        if ctx.rng.next_f32() >= BLINK_CHANCE {
            return;
        }
        let e = &mut entities[idx];
        let range = 10.0 + e.level as f32;
        let dx = (ctx.rng.next_f32() - 0.5) * range;
        let dy = (ctx.rng.next_f32() - 0.5) * range;
        e.pos.x = (e.pos.x + dx).clamp(10.0, 290.0);
        e.pos.y = (e.pos.y + dy).clamp(10.0, 190.0);
        e.gain_xp(15.0);
    }

    fn modify_damage(
        &self,
        _glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        DamageOutcome::plain(damage * 1.2)
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

    fn prism() -> Gladiator {
        let mut rng = SimpleRng::new(14);
        Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Prism,
            CellKind::Light,
            Team::Red,
            &mut rng,
        )
    }

    #[test]
    fn test_blink_displaces_within_range_and_awards_xp() {
        let mut grid = Grid::new(300, 200);
        // Roll under the blink chance, then maximal offsets
        let mut rng = ScriptedRng::new(&[0.01, 1.0, 0.0], 1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![prism()];
        Prism.update(0, &mut entities, &mut ctx, 6.0);
        // Level 1 range is 11: +5.5 in x, -5.5 in y
        assert!((entities[0].pos.x - 155.5).abs() < 1e-4);
        assert!((entities[0].pos.y - 94.5).abs() < 1e-4);
        assert_eq!(entities[0].xp, 15.0);
    }

    #[test]
    fn test_no_blink_without_the_roll() {
        let mut grid = Grid::new(300, 200);
        let mut rng = ScriptedRng::new(&[0.9], 1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![prism()];
        let before = entities[0].pos;
        Prism.update(0, &mut entities, &mut ctx, 6.0);
        assert_eq!(entities[0].pos, before);
    }

    #[test]
    fn test_damage_multiplier() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };
        let mut g = prism();
        let out = Prism.modify_damage(&mut g, 10.0, &mut ctx);
        assert_eq!(out.damage, 12.0);
    }
}
