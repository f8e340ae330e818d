//! Arena terrain grid.
//!
//! A flat cell buffer holding one [`CellKind`] per cell plus a parallel wall
//! durability buffer. Cells outside the buffer read back as [`CellKind::Wall`]
//! so the arena has an implicit indestructible boundary. Gameplay residue
//! (element splats from combat) is stamped into the same buffer and slowly
//! diffuses via random sampling.

use glam::Vec2;
use static_assertions::const_assert_eq;

use crate::random::RandomSource;

/// Wall ring thickness (cells).
pub const WALL_MARGIN: i32 = 10;

/// Hit points of a freshly built wall cell.
pub const WALL_DURABILITY: u8 = 6;

/// Terrain cell kinds. The discriminants are a wire/order contract: residue
/// kinds all compare greater than `Wall`, which the particle diffusion relies
/// on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum CellKind {
    Empty = 0,
    Wall = 1,
    Sand = 2,
    Water = 3,
    Fire = 4,
    Acid = 5,
    Plant = 6,
    Stone = 7,
    Light = 8,
    Force = 9,
    Energy = 10,
    Tech = 11,
    Ancient = 12,
}

const_assert_eq!(std::mem::size_of::<CellKind>(), 1);

pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<CellKind>,
    wall_hp: Vec<u8>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![CellKind::Empty; len],
            wall_hp: vec![0; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Cell kind at (x, y). Out-of-bounds reads return `Wall`.
    pub fn get(&self, x: i32, y: i32) -> CellKind {
        match self.idx(x, y) {
            Some(i) => self.cells[i],
            None => CellKind::Wall,
        }
    }

    /// Cell kind at a world position (floor-indexed).
    pub fn get_at(&self, pos: Vec2) -> CellKind {
        self.get(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Write a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, kind: CellKind) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = kind;
        }
    }

    /// Chip a wall cell. Once its durability reaches zero the cell becomes
    /// empty. Non-wall cells and already-broken walls are unaffected.
    pub fn damage_wall(&mut self, x: i32, y: i32, amount: u8) {
        if let Some(i) = self.idx(x, y) {
            if self.cells[i] == CellKind::Wall && self.wall_hp[i] > 0 {
                self.wall_hp[i] = self.wall_hp[i].saturating_sub(amount);
                if self.wall_hp[i] == 0 {
                    self.cells[i] = CellKind::Empty;
                }
            }
        }
    }

    /// Stamp a filled circle of `kind` centered at (cx, cy).
    pub fn stamp_circle(&mut self, cx: i32, cy: i32, r: i32, kind: CellKind) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set(cx + dx, cy + dy, kind);
                }
            }
        }
    }

    /// Clear the grid and rebuild the destructible wall ring.
    pub fn init_arena(&mut self) {
        self.cells.fill(CellKind::Empty);
        self.wall_hp.fill(0);
        for y in 0..self.height {
            for x in 0..self.width {
                if x < WALL_MARGIN
                    || x > self.width - WALL_MARGIN
                    || y < WALL_MARGIN
                    || y > self.height - WALL_MARGIN
                {
                    let i = (y * self.width + x) as usize;
                    self.cells[i] = CellKind::Wall;
                    self.wall_hp[i] = WALL_DURABILITY;
                }
            }
        }
    }

    /// Diffuse residue particles. Each call samples `2000 * rate` random
    /// cells; a residue cell moves into a random empty neighbor and has a
    /// small chance of fading out entirely. Purely cosmetic, best-effort.
    pub fn diffuse_particles(&mut self, rate: f32, rng: &mut dyn RandomSource) {
        let samples = (2000.0 * rate) as usize;
        for _ in 0..samples {
            let rx = rng.index(self.width as usize) as i32;
            let ry = rng.index(self.height as usize) as i32;
            let i = (ry * self.width + rx) as usize;
            let cell = self.cells[i];
            if cell > CellKind::Wall {
                let dx = rng.index(3) as i32 - 1;
                let dy = rng.index(3) as i32 - 1;
                if let Some(n) = self.idx(rx + dx, ry + dy) {
                    if self.cells[n] == CellKind::Empty {
                        self.cells[i] = CellKind::Empty;
                        self.cells[n] = cell;
                    }
                }
                // Slow fade so residue does not pile up forever
                if rng.chance(0.002 * rate) {
                    self.cells[i] = CellKind::Empty;
                }
            }
        }
    }
}
