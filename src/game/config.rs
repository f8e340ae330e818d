//! Arena dimensions, class stat table, and movement tuning.
//!
//! All gameplay constants live here so balance changes touch one file.
//! Distances are in grid cells, timers in simulation frames (60 per second)
//! unless a name says otherwise.

use serde::Serialize;
use static_assertions::const_assert;

// ===== ARENA =====

pub const STAGE_W: i32 = 300;
pub const STAGE_H: i32 = 200;

/// Safe boundaries for gladiator movement, inset 2 cells past the wall ring.
pub const SAFE_MIN_X: f32 = 12.0;
pub const SAFE_MAX_X: f32 = 288.0;
pub const SAFE_MIN_Y: f32 = 12.0;
pub const SAFE_MAX_Y: f32 = 188.0;

/// Distance from a safe bound at which corner escape starts to engage.
pub const WARNING_DISTANCE: f32 = 25.0;

/// Critical ring-out limit; beyond this an unhandled gladiator dies.
pub const RING_OUT_LIMIT: f32 = 2.0;

const_assert!(SAFE_MIN_X as i32 > RING_OUT_LIMIT as i32);
const_assert!((SAFE_MAX_X as i32) < STAGE_W);
const_assert!((SAFE_MAX_Y as i32) < STAGE_H);

// ===== COMBAT TIMING =====

/// Frames between module ability updates (~100 ms at 60 fps).
pub const ABILITY_UPDATE_INTERVAL: f32 = 6.0;

/// Frames of attack cooldown after landing a melee hit (~0.5 s).
pub const ATTACK_COOLDOWN_FRAMES: f32 = 30.0;

/// XP required for the first level.
pub const BASE_XP_TO_NEXT: f32 = 100.0;

/// Simulated frames before sudden death damage starts (1 minute).
pub const SUDDEN_DEATH_FRAMES: f32 = 3600.0;

/// Ticks between a match ending and the restart signal.
pub const RESTART_DELAY_FRAMES: f32 = 120.0;

// ===== CLASSES =====

#[derive(Debug, Clone, Copy)]
pub struct ClassStats {
    pub display_name: &'static str,
    pub max_hp: f32,
    pub speed: f32,
}

/// The nineteen gladiator archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKey {
    Crit,
    Speed,
    Spinner,
    Tank,
    Spike,
    Ninja,
    Prism,
    Orb,
    Cube,
    Star,
    Hex,
    Pyramid,
    Bomber,
    Summoner,
    Lancer,
    Berserker,
    Archer,
    Poison,
    Illusion,
}

impl ClassKey {
    pub const ALL: [ClassKey; 19] = [
        ClassKey::Crit,
        ClassKey::Speed,
        ClassKey::Spinner,
        ClassKey::Tank,
        ClassKey::Spike,
        ClassKey::Ninja,
        ClassKey::Prism,
        ClassKey::Orb,
        ClassKey::Cube,
        ClassKey::Star,
        ClassKey::Hex,
        ClassKey::Pyramid,
        ClassKey::Bomber,
        ClassKey::Summoner,
        ClassKey::Lancer,
        ClassKey::Berserker,
        ClassKey::Archer,
        ClassKey::Poison,
        ClassKey::Illusion,
    ];

    /// Parse a class name as it appears in configs and CLI arguments.
    /// Unknown names return `None`; callers fall back to default behavior.
    pub fn parse(name: &str) -> Option<Self> {
        ClassKey::ALL
            .iter()
            .copied()
            .find(|k| k.key_name() == name)
    }

    pub fn key_name(self) -> &'static str {
        match self {
            ClassKey::Crit => "crit",
            ClassKey::Speed => "speed",
            ClassKey::Spinner => "spinner",
            ClassKey::Tank => "tank",
            ClassKey::Spike => "spike",
            ClassKey::Ninja => "ninja",
            ClassKey::Prism => "prism",
            ClassKey::Orb => "orb",
            ClassKey::Cube => "cube",
            ClassKey::Star => "star",
            ClassKey::Hex => "hex",
            ClassKey::Pyramid => "pyramid",
            ClassKey::Bomber => "bomber",
            ClassKey::Summoner => "summoner",
            ClassKey::Lancer => "lancer",
            ClassKey::Berserker => "berserker",
            ClassKey::Archer => "archer",
            ClassKey::Poison => "poison",
            ClassKey::Illusion => "illusion",
        }
    }

    pub fn stats(self) -> ClassStats {
        match self {
            ClassKey::Crit => ClassStats { display_name: "Critical", max_hp: 400.0, speed: 1.2 },
            ClassKey::Speed => ClassStats { display_name: "Speed", max_hp: 300.0, speed: 2.5 },
            ClassKey::Spinner => ClassStats { display_name: "Spinner", max_hp: 500.0, speed: 1.5 },
            ClassKey::Tank => ClassStats { display_name: "Tank", max_hp: 1100.0, speed: 0.25 },
            ClassKey::Spike => ClassStats { display_name: "Spike", max_hp: 750.0, speed: 0.8 },
            ClassKey::Ninja => ClassStats { display_name: "Ninja", max_hp: 350.0, speed: 1.8 },
            ClassKey::Prism => ClassStats { display_name: "Prism", max_hp: 450.0, speed: 1.0 },
            ClassKey::Orb => ClassStats { display_name: "Orb", max_hp: 700.0, speed: 0.7 },
            ClassKey::Cube => ClassStats { display_name: "Cube", max_hp: 1000.0, speed: 0.4 },
            ClassKey::Star => ClassStats { display_name: "Star", max_hp: 450.0, speed: 1.3 },
            ClassKey::Hex => ClassStats { display_name: "Hex", max_hp: 600.0, speed: 0.9 },
            ClassKey::Pyramid => ClassStats { display_name: "Pyramid", max_hp: 800.0, speed: 0.3 },
            ClassKey::Bomber => ClassStats { display_name: "Bomber", max_hp: 500.0, speed: 1.0 },
            ClassKey::Summoner => ClassStats { display_name: "Summoner", max_hp: 450.0, speed: 0.9 },
            ClassKey::Lancer => ClassStats { display_name: "Lancer", max_hp: 400.0, speed: 1.4 },
            ClassKey::Berserker => ClassStats { display_name: "Berserker", max_hp: 750.0, speed: 1.1 },
            ClassKey::Archer => ClassStats { display_name: "Archer", max_hp: 350.0, speed: 1.0 },
            ClassKey::Poison => ClassStats { display_name: "Poison", max_hp: 500.0, speed: 0.8 },
            ClassKey::Illusion => ClassStats { display_name: "Illusion", max_hp: 700.0, speed: 1.2 },
        }
    }

    /// Auto-attackers gain XP on every landed hit; spell classes earn XP
    /// through their abilities instead.
    pub fn is_auto_attacker(self) -> bool {
        matches!(
            self,
            ClassKey::Crit
                | ClassKey::Speed
                | ClassKey::Spinner
                | ClassKey::Ninja
                | ClassKey::Berserker
                | ClassKey::Lancer
                | ClassKey::Hex
                | ClassKey::Illusion
                | ClassKey::Archer
        )
    }
}

// ===== MOVEMENT TUNING =====

/// Knockback applied between colliding gladiators unless a class overrides it.
pub const DEFAULT_REPEL_FORCE: f32 = 0.5;

/// Velocity is inverted and scaled by this on wall contact.
pub const DEFAULT_WALL_BOUNCE: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct AggressiveConfig {
    /// Frames between seek updates (1 = every frame).
    pub seek_interval: u32,
    pub seek_acceleration: f32,
    pub friction: f32,
    pub wall_bounce: f32,
}

impl Default for AggressiveConfig {
    fn default() -> Self {
        Self {
            seek_interval: 1,
            seek_acceleration: 0.1,
            friction: 0.98,
            wall_bounce: DEFAULT_WALL_BOUNCE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DefensiveConfig {
    pub friction: f32,
    pub wall_bounce: f32,
    /// Enemy distance considered "close" while fleeing.
    pub flee_threshold_close: f32,
    pub flee_speed_close: f32,
    pub flee_speed_far: f32,
}

impl Default for DefensiveConfig {
    fn default() -> Self {
        Self {
            friction: 0.98,
            wall_bounce: DEFAULT_WALL_BOUNCE,
            flee_threshold_close: 120.0,
            flee_speed_close: 0.9,
            flee_speed_far: 0.55,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PassiveConfig {
    /// No friction decay by default so orbits stay constant.
    pub friction: f32,
    pub wall_bounce: f32,
    /// Angular orbit speed (radians/frame).
    pub orbit_speed: f32,
    pub orbit_radius: f32,
    pub orbit_speed_multiplier: f32,
    pub patrol_speed: f32,
    pub wander_frequency: f32,
    pub wander_speed_multiplier: f32,
}

impl Default for PassiveConfig {
    fn default() -> Self {
        Self {
            friction: 1.0,
            wall_bounce: DEFAULT_WALL_BOUNCE,
            orbit_speed: 0.2,
            orbit_radius: 50.0,
            orbit_speed_multiplier: 1.0,
            patrol_speed: 0.6,
            wander_frequency: 0.02,
            wander_speed_multiplier: 0.4,
        }
    }
}
