//! Movement strategy engine.
//!
//! Every gladiator owns one [`Strategy`] and runs the same six-step pipeline
//! each fixed tick, in this order:
//!
//! 1. update velocity (strategy-specific steering)
//! 2. apply friction (`base^sim_speed`, class modules may override the base)
//! 3. corner escape (force toward center when boxed into two bounds)
//! 4. integrate position
//! 5. clamp to safe bounds (velocity damped and reversed on clamped axes)
//! 6. wall collision bounce (plus the class `on_wall_bounce` hook)
//!
//! Strategies are swapped atomically mid-match; each variant carries its own
//! tuning block and local state so a switch starts fresh.

use glam::Vec2;

use crate::game::classes::{module_for, nearest_enemy};
use crate::game::config::{
    AggressiveConfig, DefensiveConfig, PassiveConfig, SAFE_MAX_X, SAFE_MAX_Y, SAFE_MIN_X,
    SAFE_MIN_Y, STAGE_H, STAGE_W, WARNING_DISTANCE,
};
use crate::game::gladiator::Gladiator;
use crate::random::RandomSource;
use crate::world::{CellKind, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassivePattern {
    Idle,
    Orbit,
    Patrol,
    Wander,
}

/// Lightweight request used by class modules to switch strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySpec {
    Aggressive,
    Defensive,
    Passive(PassivePattern),
}

#[derive(Debug, Clone, Copy)]
pub struct PatrolState {
    pub points: [Vec2; 4],
    pub index: usize,
}

#[derive(Debug, Clone)]
pub enum Strategy {
    Aggressive {
        config: AggressiveConfig,
    },
    Defensive {
        config: DefensiveConfig,
    },
    Passive {
        config: PassiveConfig,
        pattern: PassivePattern,
        orbit_center: Vec2,
        orbit_angle: f32,
        patrol: Option<PatrolState>,
    },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Aggressive {
            config: AggressiveConfig::default(),
        }
    }
}

impl Strategy {
    pub fn aggressive(config: AggressiveConfig) -> Self {
        Strategy::Aggressive { config }
    }

    pub fn defensive(config: DefensiveConfig) -> Self {
        Strategy::Defensive { config }
    }

    pub fn passive(
        config: PassiveConfig,
        pattern: PassivePattern,
        pos: Vec2,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Strategy::Passive {
            config,
            pattern,
            orbit_center: pos,
            orbit_angle: rng.range(0.0, std::f32::consts::TAU),
            patrol: None,
        }
    }

    /// Build the default-tuned strategy for a spec.
    pub fn from_spec(spec: StrategySpec, pos: Vec2, rng: &mut dyn RandomSource) -> Self {
        match spec {
            StrategySpec::Aggressive => Strategy::aggressive(AggressiveConfig::default()),
            StrategySpec::Defensive => Strategy::defensive(DefensiveConfig::default()),
            StrategySpec::Passive(pattern) => {
                Strategy::passive(PassiveConfig::default(), pattern, pos, rng)
            }
        }
    }

    pub fn spec(&self) -> StrategySpec {
        match self {
            Strategy::Aggressive { .. } => StrategySpec::Aggressive,
            Strategy::Defensive { .. } => StrategySpec::Defensive,
            Strategy::Passive { pattern, .. } => StrategySpec::Passive(*pattern),
        }
    }

    pub fn is_defensive(&self) -> bool {
        matches!(self, Strategy::Defensive { .. })
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, Strategy::Aggressive { .. })
    }

    fn friction(&self) -> f32 {
        match self {
            Strategy::Aggressive { config } => config.friction,
            Strategy::Defensive { config } => config.friction,
            Strategy::Passive { config, .. } => config.friction,
        }
    }

    fn wall_bounce(&self) -> f32 {
        match self {
            Strategy::Aggressive { config } => config.wall_bounce,
            Strategy::Defensive { config } => config.wall_bounce,
            Strategy::Passive { config, .. } => config.wall_bounce,
        }
    }
}

/// Run the full movement pipeline for the entity at `idx`.
pub fn update(idx: usize, entities: &mut [Gladiator], grid: &mut Grid, sim_speed: f32) {
    // Take the strategy out so steering can borrow the entity list freely.
    let mut strategy = std::mem::take(&mut entities[idx].strategy);

    update_velocity(&mut strategy, idx, entities, grid, sim_speed);
    apply_friction(&strategy, &mut entities[idx], sim_speed);
    handle_corner_escape(&mut entities[idx], sim_speed);
    {
        let e = &mut entities[idx];
        e.pos += e.vel * sim_speed;
    }
    clamp_to_safe_bounds(&mut entities[idx]);
    handle_wall_collision(&strategy, &mut entities[idx], grid);

    entities[idx].strategy = strategy;
}

fn update_velocity(
    strategy: &mut Strategy,
    idx: usize,
    entities: &mut [Gladiator],
    grid: &Grid,
    sim_speed: f32,
) {
    match strategy {
        Strategy::Aggressive { config } => {
            if entities[idx].skip_seek {
                return;
            }
            let should_seek = config.seek_interval <= 1
                || entities[idx].age.floor() as i64 % config.seek_interval as i64 == 0;
            if !should_seek {
                return;
            }
            let Some((target_idx, dist)) = nearest_enemy(entities, idx) else {
                return;
            };
            let dir = (entities[target_idx].pos - entities[idx].pos).normalize_or_zero();
            let accel = config.seek_acceleration;
            entities[idx].vel += dir * accel * sim_speed;

            // Attractor pull: enemies the orb seeks get dragged toward it.
            let attractor = entities[idx].seek_attractor;
            if attractor > 0.0 && dist > 0.0 {
                let orb_pos = entities[idx].pos;
                let target = &mut entities[target_idx];
                let pull = (orb_pos - target.pos).normalize_or_zero();
                target.vel += pull * attractor * sim_speed;
            }
        }
        Strategy::Defensive { config } => {
            let Some((target_idx, dist)) = nearest_enemy(entities, idx) else {
                return;
            };
            let e_pos = entities[idx].pos;
            let target_pos = entities[target_idx].pos;
            let mut flee_angle =
                (e_pos.y - target_pos.y).atan2(e_pos.x - target_pos.x);

            // Look ahead 10 ticks; if the straight flee line is unsafe,
            // probe 45 degrees to either side and take the clear one.
            let future = e_pos + entities[idx].vel * 10.0;
            if !position_is_safe(future, grid) {
                let left = flee_angle + std::f32::consts::FRAC_PI_4;
                let right = flee_angle - std::f32::consts::FRAC_PI_4;
                let probe = |a: f32| {
                    position_is_safe(e_pos + Vec2::new(a.cos(), a.sin()) * 20.0, grid)
                };
                let (left_safe, right_safe) = (probe(left), probe(right));
                flee_angle = match (left_safe, right_safe) {
                    (true, false) => left,
                    (false, true) => right,
                    // Both or neither clear: alternate on age parity
                    _ => {
                        if entities[idx].age.floor() as i64 % 2 == 0 {
                            left
                        } else {
                            right
                        }
                    }
                };
            }

            let mult = if dist < config.flee_threshold_close {
                config.flee_speed_close
            } else {
                config.flee_speed_far
            };
            let speed = entities[idx].base_speed * mult;
            entities[idx].vel = Vec2::new(flee_angle.cos(), flee_angle.sin()) * speed;
        }
        Strategy::Passive {
            config,
            pattern,
            orbit_center,
            orbit_angle,
            patrol,
        } => {
            let e = &mut entities[idx];
            match pattern {
                PassivePattern::Idle => {
                    // Friction winds the gladiator down.
                }
                PassivePattern::Orbit => {
                    let level_scale = 1.0 + e.level as f32 * 0.25;
                    *orbit_angle += config.orbit_speed * sim_speed * level_scale;
                    let target = *orbit_center
                        + Vec2::new(orbit_angle.cos(), orbit_angle.sin()) * config.orbit_radius;
                    let to_target = target - e.pos;
                    if to_target.length() > 5.0 {
                        let speed = e.base_speed * config.orbit_speed_multiplier;
                        e.vel = to_target.normalize_or_zero() * speed;
                    }
                }
                PassivePattern::Patrol => {
                    let patrol = patrol.get_or_insert_with(|| PatrolState {
                        points: [
                            e.pos,
                            e.pos + Vec2::new(100.0, 0.0),
                            e.pos + Vec2::new(100.0, 100.0),
                            e.pos + Vec2::new(0.0, 100.0),
                        ],
                        index: 0,
                    });
                    let target = patrol.points[patrol.index];
                    let to_target = target - e.pos;
                    if to_target.length() < 10.0 {
                        patrol.index = (patrol.index + 1) % patrol.points.len();
                    } else {
                        let speed = e.base_speed * config.patrol_speed;
                        e.vel = to_target.normalize_or_zero() * speed;
                    }
                }
                PassivePattern::Wander => {
                    let angle = (e.age * config.wander_frequency).sin() * std::f32::consts::PI;
                    let speed = e.base_speed * config.wander_speed_multiplier;
                    e.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
                }
            }
        }
    }
}

fn apply_friction(strategy: &Strategy, e: &mut Gladiator, sim_speed: f32) {
    let base = module_for(e.class)
        .friction(e)
        .unwrap_or_else(|| strategy.friction());
    e.vel *= base.powf(sim_speed);
}

/// Boxed into a corner (near two perpendicular bounds), push toward arena
/// center with force growing as the gladiator gets deeper in.
fn handle_corner_escape(e: &mut Gladiator, sim_speed: f32) {
    let dist_left = e.pos.x - SAFE_MIN_X;
    let dist_right = SAFE_MAX_X - e.pos.x;
    let dist_top = e.pos.y - SAFE_MIN_Y;
    let dist_bottom = SAFE_MAX_Y - e.pos.y;

    let near_x = dist_left < WARNING_DISTANCE || dist_right < WARNING_DISTANCE;
    let near_y = dist_top < WARNING_DISTANCE || dist_bottom < WARNING_DISTANCE;
    if !(near_x && near_y) {
        return;
    }

    let center = Vec2::new(STAGE_W as f32 / 2.0, STAGE_H as f32 / 2.0);
    let to_center = center - e.pos;
    let dist = to_center.length();
    if dist <= 0.0 {
        return;
    }

    let urgency = (dist_left.min(dist_right) / WARNING_DISTANCE)
        .min(dist_top.min(dist_bottom) / WARNING_DISTANCE);
    let escape_force = (1.0 - urgency) * e.base_speed * 0.5;
    e.vel += (to_center / dist) * escape_force * sim_speed;
}

fn clamp_to_safe_bounds(e: &mut Gladiator) {
    let was_clamped = e.pos.x < SAFE_MIN_X
        || e.pos.x > SAFE_MAX_X
        || e.pos.y < SAFE_MIN_Y
        || e.pos.y > SAFE_MAX_Y;

    e.pos.x = e.pos.x.clamp(SAFE_MIN_X, SAFE_MAX_X);
    e.pos.y = e.pos.y.clamp(SAFE_MIN_Y, SAFE_MAX_Y);

    if was_clamped {
        if e.pos.x <= SAFE_MIN_X || e.pos.x >= SAFE_MAX_X {
            e.vel.x *= -0.3;
        }
        if e.pos.y <= SAFE_MIN_Y || e.pos.y >= SAFE_MAX_Y {
            e.vel.y *= -0.3;
        }
    }
}

fn handle_wall_collision(strategy: &Strategy, e: &mut Gladiator, grid: &mut Grid) {
    if grid.get_at(e.pos) != CellKind::Wall {
        return;
    }
    // Every bounce chips the wall cell it hit.
    grid.damage_wall(e.pos.x.floor() as i32, e.pos.y.floor() as i32, 3);
    e.pos.x = e.pos.x.clamp(SAFE_MIN_X, SAFE_MAX_X);
    e.pos.y = e.pos.y.clamp(SAFE_MIN_Y, SAFE_MAX_Y);
    e.vel *= -strategy.wall_bounce();
    module_for(e.class).on_wall_bounce(e);
}

fn position_is_safe(pos: Vec2, grid: &Grid) -> bool {
    let in_bounds = pos.x >= SAFE_MIN_X
        && pos.x <= SAFE_MAX_X
        && pos.y >= SAFE_MIN_Y
        && pos.y <= SAFE_MAX_Y;
    in_bounds && grid.get_at(pos) != CellKind::Wall
}
