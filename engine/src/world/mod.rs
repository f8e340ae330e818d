//! World-space terrain for the arena.

mod grid;

pub use grid::{CellKind, Grid, WALL_DURABILITY, WALL_MARGIN};
