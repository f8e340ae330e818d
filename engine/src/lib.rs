//! Coliseo Engine Library
//!
//! Infrastructure for the gladiator combat simulation: a fixed-timestep
//! clock, a deterministic random source, and the cell-based arena terrain.
//! The game rules themselves (gladiators, class modules, projectiles, the
//! match loop) live under [`game`].
//!
//! # Modules
//!
//! - [`time`] - Frame clock with time scaling and fixed-step accounting
//! - [`random`] - Seedable xorshift RNG behind an injectable trait
//! - [`world`] - Arena terrain grid with destructible walls and residue
//! - [`game`] - Simulation rules built on top of the engine

pub mod random;
pub mod time;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export the engine types at crate level for convenience
pub use random::{RandomSource, ScriptedRng, SimpleRng};
pub use time::{Clock, FIXED_TIMESTEP_S, MAX_FIXED_STEPS_PER_FRAME};
pub use world::{CellKind, Grid};
