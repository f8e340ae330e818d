//! Deterministic random number generation.
//!
//! The simulation never touches ambient randomness: every consumer receives
//! a `&mut dyn RandomSource`, so a match replayed with the same seed takes
//! identical decisions and tests can script exact rolls.

/// Source of pseudo-random values used by the simulation.
pub trait RandomSource {
    /// Advance the state and return the next pseudo-random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Return a pseudo-random `f32` in `[0.0, 1.0]`.
    fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Return a pseudo-random `f32` in `[min, max]`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Return `true` with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Return a pseudo-random index in `[0, n)`. `n` must be non-zero.
    fn index(&mut self, n: usize) -> usize {
        (self.next_u32() as usize) % n
    }
}

/// Small xorshift32 generator. Fast, deterministic, good enough for
/// gameplay variety.
#[derive(Debug, Clone, Copy)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed. A seed of 0 is bumped to 1
    /// because xorshift32 requires a non-zero state.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Random source that plays back a scripted list of `f32` rolls before
/// falling through to a real generator. Lets tests force a specific dodge
/// or crit outcome without stubbing the whole pipeline.
pub struct ScriptedRng {
    queued: std::collections::VecDeque<f32>,
    fallback: SimpleRng,
}

impl ScriptedRng {
    pub fn new(rolls: &[f32], fallback_seed: u32) -> Self {
        Self {
            queued: rolls.iter().copied().collect(),
            fallback: SimpleRng::new(fallback_seed),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        // Scripted rolls are consumed through next_f32; raw draws always
        // come from the fallback generator.
        self.fallback.next_u32()
    }

    fn next_f32(&mut self) -> f32 {
        match self.queued.pop_front() {
            Some(v) => v,
            None => self.fallback.next_f32(),
        }
    }
}
