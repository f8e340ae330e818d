//! Summoner: opens with a pet minion and calls another on every melee
//! exchange once its summon cooldown clears. The arena enforces the pet
//! cap and recycles the oldest living pet past it.

use glam::Vec2;

use super::ClassModule;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

const SUMMON_COOLDOWN_FRAMES: f32 = 90.0;

pub struct Summoner;

impl ClassModule for Summoner {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Summoner {
            summon_cd: 0.0,
            initial_spawned: false,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Summoner {
            mut summon_cd,
            mut initial_spawned,
        } = e.class_state
        else {
            return;
        };
        summon_cd -= dt;
        if !initial_spawned {
            ctx.spawn_minion(e.id, true);
            initial_spawned = true;
        }
        e.class_state = ClassState::Summoner {
            summon_cd,
            initial_spawned,
        };
    }

    fn on_combat(
        &self,
        attacker: &mut Gladiator,
        _defender: &mut Gladiator,
        ctx: &mut WorldCtx<'_>,
    ) {
        // Minions share the class but never summon.
        if attacker.is_minion {
            return;
        }
        let ClassState::Summoner {
            summon_cd,
            initial_spawned,
        } = attacker.class_state
        else {
            return;
        };
        if summon_cd > 0.0 {
            return;
        }
        ctx.spawn_minion(attacker.id, false);
        ctx.text(attacker.pos + Vec2::new(0.0, -8.0), "SUMMON!", "#cc66ff");
        attacker.gain_xp(15.0 + attacker.level as f32);
        attacker.class_state = ClassState::Summoner {
            summon_cd: SUMMON_COOLDOWN_FRAMES,
            initial_spawned,
        };
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

    fn glad(id: u32, class: ClassKey, team: Team) -> Gladiator {
        let mut rng = SimpleRng::new(30);
        Gladiator::new(
            id,
            Vec2::new(150.0, 100.0),
            class,
            CellKind::Force,
            team,
            &mut rng,
        )
    }

    #[test]
    fn test_initial_pet_spawns_once() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![glad(0, ClassKey::Summoner, Team::Red)];
        Summoner.update(0, &mut entities, &mut ctx, 6.0);
        Summoner.update(0, &mut entities, &mut ctx, 6.0);

        assert_eq!(effects.minion_spawns.len(), 1);
        assert!(effects.minion_spawns[0].initial);
        assert_eq!(effects.minion_spawns[0].owner, 0);
    }

    #[test]
    fn test_combat_summons_respect_the_cooldown() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut summoner = glad(0, ClassKey::Summoner, Team::Red);
        let mut enemy = glad(1, ClassKey::Tank, Team::Blue);

        Summoner.on_combat(&mut summoner, &mut enemy, &mut ctx);
        assert_eq!(ctx.effects.minion_spawns.len(), 1);
        assert!(!ctx.effects.minion_spawns[0].initial);
        assert_eq!(summoner.xp, 16.0); // 15 + level

        // Cooldown still running
        Summoner.on_combat(&mut summoner, &mut enemy, &mut ctx);
        assert_eq!(effects.minion_spawns.len(), 1);
    }

    #[test]
    fn test_minions_never_summon() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut minion = glad(2, ClassKey::Summoner, Team::Red);
        minion.is_minion = true;
        let mut enemy = glad(1, ClassKey::Tank, Team::Blue);
        Summoner.on_combat(&mut minion, &mut enemy, &mut ctx);
        assert!(effects.minion_spawns.is_empty());
    }
}
