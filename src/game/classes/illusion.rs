//! Illusion: below 30% health it throws out a decoy that soaks enemy
//! attention and halves incoming damage while it lasts.

use glam::Vec2;

use super::ClassModule;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::projectile::ProjectileKind;
use crate::random::RandomSource;

const DECOY_HP_PCT: f32 = 0.3;

pub struct Illusion;

impl ClassModule for Illusion {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Illusion {
            decoy_timer: 0.0,
            decoy_active: false,
            decoy_spawned: false,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Illusion {
            mut decoy_timer,
            mut decoy_active,
            mut decoy_spawned,
        } = e.class_state
        else {
            return;
        };
        decoy_timer -= dt;

        if e.hp_percent() < DECOY_HP_PCT && !decoy_active && decoy_timer <= 0.0 && !decoy_spawned {
            decoy_active = true;
            decoy_spawned = true;
            decoy_timer = 150.0 + 20.0 * e.level as f32;
            e.gain_xp(30.0);
            ctx.text(e.pos + Vec2::new(0.0, -8.0), "DECOY!", "#cc66ff");
            ctx.spawn_projectile(ProjectileKind::Decoy, e.pos, e.id, None);
            e.hp = (e.hp + 5.0).min(e.max_hp);
        }

        if decoy_active && decoy_timer <= 0.0 {
            decoy_active = false;
            decoy_spawned = false;
        }

        e.class_state = ClassState::Illusion {
            decoy_timer,
            decoy_active,
            decoy_spawned,
        };
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        if matches!(
            glad.class_state,
            ClassState::Illusion {
                decoy_active: true,
                ..
            }
        ) {
            ctx.text(glad.pos + Vec2::new(0.0, -5.0), "DECOY HIT", "#cc66ff");
            return amount * 0.5;
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

    fn illusion() -> Gladiator {
        let mut rng = SimpleRng::new(40);
        Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Illusion,
            CellKind::Light,
            Team::Red,
            &mut rng,
        )
    }

    #[test]
    fn test_decoy_deploys_below_threshold_once() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![illusion()];
        entities[0].hp = entities[0].max_hp * 0.2;
        let hp_before = entities[0].hp;
        Illusion.update(0, &mut entities, &mut ctx, 6.0);

        assert_eq!(ctx.effects.projectile_spawns.len(), 1);
        assert_eq!(ctx.effects.projectile_spawns[0].kind, ProjectileKind::Decoy);
        assert_eq!(entities[0].xp, 30.0);
        assert_eq!(entities[0].hp, hp_before + 5.0);
        assert!(matches!(
            entities[0].class_state,
            ClassState::Illusion {
                decoy_active: true,
                decoy_timer,
                ..
            } if (decoy_timer - 170.0).abs() < 1e-3
        ));

        // Still low: no second decoy while one is out
        Illusion.update(0, &mut entities, &mut ctx, 6.0);
        assert_eq!(effects.projectile_spawns.len(), 1);
    }

    #[test]
    fn test_decoy_halves_incoming_damage_while_active() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut g = illusion();
        g.class_state = ClassState::Illusion {
            decoy_timer: 100.0,
            decoy_active: true,
            decoy_spawned: true,
        };
        assert_eq!(Illusion.on_damage_taken(&mut g, None, 20.0, &mut ctx), 10.0);

        g.class_state = ClassState::Illusion {
            decoy_timer: 0.0,
            decoy_active: false,
            decoy_spawned: false,
        };
        assert_eq!(Illusion.on_damage_taken(&mut g, None, 20.0, &mut ctx), 20.0);
    }

    #[test]
    fn test_decoy_expiry_rearms_the_ability() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![illusion()];
        entities[0].hp = entities[0].max_hp; // healthy, no redeploy
        entities[0].class_state = ClassState::Illusion {
            decoy_timer: 3.0,
            decoy_active: true,
            decoy_spawned: true,
        };
        Illusion.update(0, &mut entities, &mut ctx, 6.0);
        assert!(matches!(
            entities[0].class_state,
            ClassState::Illusion {
                decoy_active: false,
                decoy_spawned: false,
                ..
            }
        ));
    }
}
