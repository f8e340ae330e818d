//! Berserker: damage output rises with missing health, and every 5% of
//! max health lost grants a permanent rage stack plus a brief shrug-off
//! window.

use glam::Vec2;

use super::{ClassModule, DamageOutcome};
use crate::game::config::AggressiveConfig;
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::Strategy;
use crate::random::RandomSource;

pub struct Berserker;

impl ClassModule for Berserker {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.strategy = Strategy::aggressive(AggressiveConfig {
            seek_acceleration: 0.15,
            friction: 0.97,
            ..AggressiveConfig::default()
        });
        glad.class_state = ClassState::Berserker {
            rage: 0.0,
            stacks: 0,
            next_threshold: 0.95,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, _dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Berserker {
            stacks,
            next_threshold,
            ..
        } = e.class_state
        else {
            return;
        };
        let rage = (1.0 - e.hp_percent()) * (1.0 + 0.1 * e.level as f32);
        e.class_state = ClassState::Berserker {
            rage,
            stacks,
            next_threshold,
        };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        let ClassState::Berserker { rage, stacks, .. } = glad.class_state else {
            return DamageOutcome::plain(damage);
        };
        let mut scaled = damage * (1.0 + rage);
        if stacks > 0 {
            scaled *= 1.0 + 0.05 * stacks as f32;
        }
        if glad.hp < glad.max_hp * 0.5 {
            glad.gain_xp(15.0);
        }
        DamageOutcome::plain(scaled)
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        let ClassState::Berserker {
            rage,
            mut stacks,
            mut next_threshold,
        } = glad.class_state
        else {
            return amount;
        };
        let pct = (glad.hp - amount) / glad.max_hp;
        while pct < next_threshold {
            stacks += 1;
            glad.invuln_timer = glad.invuln_timer.max(12.0);
            next_threshold -= 0.05;
            ctx.text(glad.pos + Vec2::new(0.0, -8.0), "RAGE!", "#ff3333");
        }
        glad.class_state = ClassState::Berserker {
            rage,
            stacks,
            next_threshold,
        };
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

    fn berserker() -> Gladiator {
        let mut rng = SimpleRng::new(34);
        Gladiator::new(
            0,
            Vec2::new(150.0, 100.0),
            ClassKey::Berserker,
            CellKind::Fire,
            Team::Red,
            &mut rng,
        )
    }

    #[test]
    fn test_rage_tracks_missing_health() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut entities = vec![berserker()];
        entities[0].hp = entities[0].max_hp * 0.5;
        Berserker.update(0, &mut entities, &mut ctx, 6.0);
        // Half health at level 1: 0.5 * 1.1
        assert!(matches!(
            entities[0].class_state,
            ClassState::Berserker { rage, .. } if (rage - 0.55).abs() < 1e-4
        ));

        let out = Berserker.modify_damage(&mut entities[0], 10.0, &mut ctx);
        assert!((out.damage - 15.5).abs() < 1e-3);
        assert_eq!(entities[0].xp, 0.0, "exactly half is not below half");
    }

    #[test]
    fn test_big_hit_grants_multiple_stacks() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };

        let mut g = berserker();
        // 750 max hp; losing 150 lands at 80%, crossing 95/90/85%
        let through = Berserker.on_damage_taken(&mut g, None, 150.0, &mut ctx);
        assert_eq!(through, 150.0);
        assert!(matches!(
            g.class_state,
            ClassState::Berserker {
                stacks: 3,
                next_threshold,
                ..
            } if (next_threshold - 0.80).abs() < 1e-4
        ));
        assert_eq!(g.invuln_timer, 12.0);
        assert_eq!(effects.texts.iter().filter(|t| t.text == "RAGE!").count(), 3);
    }

    #[test]
    fn test_stacks_multiply_outgoing_damage() {
        let mut grid = Grid::new(300, 200);
        let mut rng = SimpleRng::new(1);
        let mut effects = EffectQueue::default();
        let mut ctx = WorldCtx {
            grid: &mut grid,
            rng: &mut rng,
            elapsed: 0.0,
            effects: &mut effects,
        };
        let mut g = berserker();
        g.class_state = ClassState::Berserker {
            rage: 0.0,
            stacks: 4,
            next_threshold: 0.75,
        };
        let out = Berserker.modify_damage(&mut g, 10.0, &mut ctx);
        assert!((out.damage - 12.0).abs() < 1e-4);
    }
}
