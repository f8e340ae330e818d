//! Cube: a heavyweight with a telegraphed ground slam. It creeps toward
//! the enemy, roots itself for a short windup, then damages and knocks
//! back everything in the blast radius.

use glam::Vec2;

use super::{ClassModule, nearest_enemy, pair_mut};
use crate::game::context::WorldCtx;
use crate::game::gladiator::{ClassState, Gladiator};
use crate::random::RandomSource;

const SLAM_TRIGGER_RANGE: f32 = 32.0;
const SLAM_RADIUS: f32 = 28.0;
const SLAM_WINDUP_FRAMES: f32 = 12.0;
const SLAM_COOLDOWN_FRAMES: f32 = 120.0;
const SLAM_KNOCKBACK: f32 = 2.4;

pub struct Cube;

impl ClassModule for Cube {
    fn on_init(&self, glad: &mut Gladiator, _rng: &mut dyn RandomSource) {
        glad.class_state = ClassState::Cube {
            slam_cooldown: 60.0,
            slam_windup: 0.0,
            slam_in_progress: false,
        };
    }

    fn update(&self, idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>, dt: f32) {
        let ClassState::Cube {
            mut slam_cooldown,
            mut slam_windup,
            mut slam_in_progress,
        } = entities[idx].class_state
        else {
            return;
        };

        entities[idx].vel *= 0.95;
        slam_cooldown -= dt;

        if slam_windup > 0.0 {
            // Rooted during windup
            entities[idx].vel *= 0.6;
            slam_windup -= dt;
            if slam_windup <= 0.0 {
                slam(idx, entities, ctx);
                slam_cooldown = SLAM_COOLDOWN_FRAMES;
                slam_in_progress = false;
            }
            entities[idx].class_state = ClassState::Cube {
                slam_cooldown,
                slam_windup,
                slam_in_progress,
            };
            return;
        }

        if slam_cooldown <= 0.0 && !slam_in_progress {
            if let Some((_, dist)) = nearest_enemy(entities, idx) {
                if dist < SLAM_TRIGGER_RANGE {
                    entities[idx].vel = Vec2::ZERO;
                    slam_windup = SLAM_WINDUP_FRAMES;
                    slam_in_progress = true;
                }
            }
        }

        entities[idx].class_state = ClassState::Cube {
            slam_cooldown,
            slam_windup,
            slam_in_progress,
        };
    }

    fn on_collision_repel(
        &self,
        glad: &mut Gladiator,
        _other: &Gladiator,
        _ctx: &mut WorldCtx<'_>,
    ) -> Option<f32> {
        glad.gain_xp(20.0);
        Some(1.5 + 0.2 * glad.level as f32)
    }
}

fn slam(idx: usize, entities: &mut [Gladiator], ctx: &mut WorldCtx<'_>) {
    let center = entities[idx].pos;
    let team = entities[idx].team;
    let damage = 12.0 + 3.0 * entities[idx].level as f32;

    for j in 0..entities.len() {
        if j == idx || entities[j].dead || entities[j].team == team {
            continue;
        }
        if entities[j].pos.distance(center) > SLAM_RADIUS {
            continue;
        }
        let (me, target) = pair_mut(entities, idx, j);
        let dealt = target.take_damage(damage, Some(me), ctx);
        me.damage_dealt += dealt;
        let away = (target.pos - center).normalize_or_zero();
        target.vel += away * SLAM_KNOCKBACK;
    }
    ctx.text(center + Vec2::new(0.0, -8.0), "SLAM!", "#ff8800");
}
