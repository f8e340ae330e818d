//! Side-effect channel for the simulation.
//!
//! Hooks never mutate the world lists directly. Floating texts, simulation
//! events, and spawn requests are pushed into an [`EffectQueue`] and the
//! arena flushes them at defined points in the tick. There is no listener
//! registry: events are plain data the host drains after each frame.

use glam::Vec2;

use crate::game::arena::Team;
use crate::game::projectile::ProjectileKind;

/// A short-lived combat text that drifts upward and fades.
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub color: &'static str,
    /// Remaining lifetime (frames).
    pub life: f32,
    pub max_life: f32,
    vy: f32,
}

impl FloatingText {
    pub fn new(pos: Vec2, text: impl Into<String>, color: &'static str) -> Self {
        Self {
            pos,
            text: text.into(),
            color,
            life: 60.0,
            max_life: 60.0,
            vy: -0.5,
        }
    }

    pub fn update(&mut self, sim_speed: f32) {
        self.pos.y += self.vy * sim_speed;
        self.life -= sim_speed;
    }
}

/// Notable simulation moments, drained by the host after each frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    MatchStarted,
    DamageDealt {
        attacker: u32,
        target: u32,
        amount: f32,
        crit: bool,
    },
    LevelUp {
        id: u32,
        level: u32,
    },
    EntityDied {
        id: u32,
        team: Team,
        level: u32,
        damage_dealt: f32,
    },
    SuddenDeathStarted,
    MatchEnded {
        winner: Option<Team>,
        duration_frames: f32,
    },
}

/// Deferred projectile spawn; resolved against the owner at flush time.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub owner: u32,
    pub target: Option<Vec2>,
}

/// Deferred minion spawn for the summoner. The cap check and oldest-pet
/// recycling need the full entity list, so they happen at flush time.
#[derive(Debug, Clone, Copy)]
pub struct MinionSpawn {
    pub owner: u32,
    /// The one-time opening minion spawns at a fixed side offset.
    pub initial: bool,
}

#[derive(Debug, Default)]
pub struct EffectQueue {
    pub texts: Vec<FloatingText>,
    pub events: Vec<SimEvent>,
    pub projectile_spawns: Vec<ProjectileSpawn>,
    pub minion_spawns: Vec<MinionSpawn>,
}

impl EffectQueue {
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
            && self.events.is_empty()
            && self.projectile_spawns.is_empty()
            && self.minion_spawns.is_empty()
    }
}
