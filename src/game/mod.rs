//! Game Module
//!
//! The gladiator combat rules, built on top of the engine clock, RNG, and
//! terrain grid. [`arena`] owns the match loop; everything else is a
//! subsystem it drives.

pub mod arena;
pub mod classes;
pub mod config;
pub mod context;
pub mod events;
pub mod gladiator;
pub mod movement;
pub mod projectile;
pub mod state;

pub use arena::{Arena, BattleOutcome, Team, run_battle};
pub use classes::{ClassModule, DamageOutcome, module_for, nearest_enemy, pair_mut};
pub use config::{ClassKey, ClassStats};
pub use context::WorldCtx;
pub use events::{EffectQueue, FloatingText, SimEvent};
pub use gladiator::{ClassState, Gladiator};
pub use movement::{PassivePattern, Strategy, StrategySpec};
pub use projectile::{Projectile, ProjectileKind};
pub use state::CombatState;
