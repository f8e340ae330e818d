//! Bomber: lays timed bombs while on the move, drops a panic bomb when
//! struck, and kites away from anyone who gets close.

use glam::Vec2;

use super::{ClassModule, nearest_enemy};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::game::movement::StrategySpec;
use crate::game::projectile::ProjectileKind;
use crate::random::RandomSource;

const KITE_RANGE: f32 = 70.0;
const FLEE_FRAMES: f32 = 18.0;

pub struct Bomber;

impl ClassModule for Bomber {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Bomber {
            trail_cd: 0.0,
            flee_timer: 0.0,
            defensive_bomb_cd: 0.0,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Bomber {
            mut trail_cd,
            mut flee_timer,
            mut defensive_bomb_cd,
        } = entities[idx].class_state
        else {
            return;
        };

        trail_cd -= dt;
        flee_timer -= dt;
        defensive_bomb_cd -= dt;

        {
            let e = &entities[idx];
            if e.vel.length() > e.base_speed * 0.35 && trail_cd <= 0.0 {
                ctx.spawn_projectile(ProjectileKind::Bomb, e.pos, e.id, None);
                ctx.text(e.pos + Vec2::new(0.0, -5.0), "BOMB", "#ff8800");
                // Jittered so trails from equal-speed bombers desync
                trail_cd = 120.0 * (0.9 + ctx.rng.next_f32() * 0.2);
            }
        }

        let close = nearest_enemy(entities, idx).is_some_and(|(_, d)| d < KITE_RANGE);
        if close && flee_timer <= 0.0 {
            flee_timer = FLEE_FRAMES;
        }
        if close && flee_timer > 0.0 {
            entities[idx].switch_strategy(StrategySpec::Defensive, ctx.rng);
        } else if flee_timer <= 0.0 && entities[idx].strategy.is_defensive() {
            entities[idx].switch_strategy(StrategySpec::Aggressive, ctx.rng);
        }

        entities[idx].class_state = ClassState::Bomber {
            trail_cd,
            flee_timer,
            defensive_bomb_cd,
        };
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        let ClassState::Bomber {
            trail_cd,
            flee_timer: _,
            mut defensive_bomb_cd,
        } = glad.class_state
        else {
            return amount;
        };
        if defensive_bomb_cd <= 0.0 {
            ctx.spawn_projectile(ProjectileKind::Bomb, glad.pos, glad.id, None);
            ctx.text(glad.pos + Vec2::new(0.0, -5.0), "BOMB!", "#ff8800");
            defensive_bomb_cd = 60.0;
        }
        glad.class_state = ClassState::Bomber {
            trail_cd,
            flee_timer: 24.0,
            defensive_bomb_cd,
        };
        glad.gain_xp(15.0);
        amount
    }
}
