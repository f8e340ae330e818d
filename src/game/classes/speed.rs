//! Speed: a pinball. Collisions launch it into a bounce chain that gains
//! velocity off walls; damage scales with how fast it is moving on impact.

use super::{ClassModule, DamageOutcome};
use crate::game::config::{SAFE_MAX_X, SAFE_MAX_Y, SAFE_MIN_X, SAFE_MIN_Y};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

const MAX_CHAIN_BOUNCES: u32 = 5;

pub struct Speed;

impl ClassModule for Speed {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Speed {
            bounce_active: false,
            bounces: 0,
            prev_pos: glad.pos,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], _ctx: &mut WorldCtx<'_>, _dt: f32) {
        let e = &mut entities[idx];
        let ClassState::Speed {
            bounce_active,
            bounces,
            prev_pos,
        } = e.class_state
        else {
            return;
        };
        let traveled = e.pos.distance(prev_pos);
        e.gain_xp(traveled * 0.12);
        if bounce_active {
            // Bounce chains fly straight; seeking would bend the line.
            e.skip_seek = true;
        }
        e.class_state = ClassState::Speed {
            bounce_active,
            bounces,
            prev_pos: e.pos,
        };
    }

    fn modify_damage(
        &self,
        glad: &mut Gladiator,
        damage: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> DamageOutcome {
        let spd = glad.vel.length();
        if spd > glad.base_speed * 1.5 {
            glad.gain_xp(5.0);
        }
        DamageOutcome::plain(damage * (1.0 + spd * 0.5))
    }

    fn on_damage_taken(
        &self,
        glad: &mut Gladiator,
        _attacker: Option<&mut Gladiator>,
        amount: f32,
        _ctx: &mut WorldCtx<'_>,
    ) -> f32 {
        // Getting hit kills the chain.
        if let ClassState::Speed { bounce_active, .. } = &mut glad.class_state {
            *bounce_active = false;
        }
        amount
    }

    fn on_collision_repel(
        &self,
        glad: &mut Gladiator,
        other: &Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) -> Option<f32> {
        let away = (glad.pos - other.pos).normalize_or_zero();
        let speed = (glad.base_speed * 1.8).max(glad.vel.length() * 1.35);
        glad.vel = away * speed;
        if let ClassState::Speed {
            bounce_active,
            bounces,
            ..
        } = &mut glad.class_state
        {
            *bounce_active = true;
            *bounces = 0;
        }
        glad.gain_xp(10.0);
        Some(0.8)
    }

    fn on_wall_bounce(&self, glad: &mut Gladiator) {
        let ClassState::Speed {
            bounce_active,
            bounces,
            ..
        } = &mut glad.class_state
        else {
            return;
        };
        if !*bounce_active {
            return;
        }
        *bounces += 1;
        // Keep the post-bounce heading but gain a little speed.
        let heading = glad.vel.normalize_or_zero();
        glad.vel = heading * glad.vel.length() * 1.08;
        if *bounces >= MAX_CHAIN_BOUNCES {
            *bounce_active = false;
        }
    }

    fn on_out_of_bounds(&self, glad: &mut Gladiator) -> bool {
        // A chaining speedster skips the ring-out death and caroms back in.
        glad.pos.x = glad.pos.x.clamp(SAFE_MIN_X, SAFE_MAX_X);
        glad.pos.y = glad.pos.y.clamp(SAFE_MIN_Y, SAFE_MAX_Y);
        glad.vel *= -0.65;
        if let ClassState::Speed {
            bounce_active,
            bounces,
            ..
        } = &mut glad.class_state
        {
            if *bounce_active {
                *bounces += 1;
                if *bounces >= MAX_CHAIN_BOUNCES {
                    *bounce_active = false;
                }
            }
        }
        true
    }

    fn on_level_up(&self, glad: &mut Gladiator) {
        glad.base_speed *= 1.22;
    }

    fn friction(&self, glad: &Gladiator) -> Option<f32> {
        match glad.class_state {
            ClassState::Speed {
                bounce_active: true,
                ..
            } => Some(0.995),
            _ => None,
        }
    }
}
