//! Frame clock for the simulation.
//!
//! Tracks scaled and unscaled time, counts render frames and physics steps
//! separately, and keeps a rolling FPS average. The fixed timestep is 1/60 s
//! and a single frame delta is capped at 250 ms so a stalled host (tab in
//! background, debugger pause) cannot produce a catastrophic catch-up burst.

/// Fixed simulation timestep (seconds).
pub const FIXED_TIMESTEP_S: f32 = 1.0 / 60.0;

/// Upper bound on fixed steps drained per rendered frame.
pub const MAX_FIXED_STEPS_PER_FRAME: u32 = 8;

/// Longest frame delta the clock will report (seconds).
const MAX_FRAME_DELTA_S: f32 = 0.25;

/// Number of frame samples in the FPS averaging window.
const FPS_SAMPLE_COUNT: usize = 30;

#[derive(Debug, Clone)]
pub struct Clock {
    delta: f32,
    unscaled_delta: f32,
    time_scale: f32,
    frame_count: u64,
    physics_frame_count: u64,
    elapsed: f32,
    unscaled_elapsed: f32,
    last_frame_ms: Option<f64>,
    frame_times: Vec<f32>,
    fps: f32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            delta: 0.0,
            unscaled_delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            physics_frame_count: 0,
            elapsed: 0.0,
            unscaled_elapsed: 0.0,
            last_frame_ms: None,
            frame_times: Vec::with_capacity(FPS_SAMPLE_COUNT),
            fps: 60.0,
        }
    }

    /// Feed the clock a new host timestamp (milliseconds) and compute the
    /// frame delta. The first call reports one fixed step.
    pub fn advance_frame(&mut self, now_ms: f64) {
        self.unscaled_delta = match self.last_frame_ms {
            None => FIXED_TIMESTEP_S,
            Some(last) => (((now_ms - last) / 1000.0) as f32).min(MAX_FRAME_DELTA_S),
        };
        self.last_frame_ms = Some(now_ms);

        self.delta = self.unscaled_delta * self.time_scale;
        self.elapsed += self.delta;
        self.unscaled_elapsed += self.unscaled_delta;
        self.frame_count += 1;

        self.frame_times.push(self.unscaled_delta);
        if self.frame_times.len() > FPS_SAMPLE_COUNT {
            self.frame_times.remove(0);
        }
        let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        self.fps = if avg > 0.0 { 1.0 / avg } else { 60.0 };
    }

    /// Record that one fixed physics step ran.
    pub fn advance_fixed_step(&mut self) {
        self.physics_frame_count += 1;
    }

    /// Reset all counters, e.g. when the host restarts the match loop.
    pub fn reset(&mut self) {
        let scale = self.time_scale;
        *self = Self::new();
        self.time_scale = scale;
    }

    /// Scaled frame delta (seconds).
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Unscaled frame delta (seconds).
    pub fn unscaled_delta(&self) -> f32 {
        self.unscaled_delta
    }

    /// Total scaled time (seconds).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total unscaled time (seconds).
    pub fn unscaled_elapsed(&self) -> f32 {
        self.unscaled_elapsed
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the simulation speed multiplier. Negative values are clamped to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn physics_frame_count(&self) -> u64 {
        self.physics_frame_count
    }

    /// Rolling average FPS over the last 30 frames.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_uses_fixed_delta() {
        let mut clock = Clock::new();
        clock.advance_frame(1000.0);
        assert_eq!(clock.unscaled_delta(), FIXED_TIMESTEP_S);
    }

    #[test]
    fn test_delta_is_capped_at_250ms() {
        let mut clock = Clock::new();
        clock.advance_frame(0.0);
        clock.advance_frame(5000.0); // 5 second stall
        assert_eq!(clock.unscaled_delta(), 0.25);
    }

    #[test]
    fn test_time_scale_scales_delta_only() {
        let mut clock = Clock::new();
        clock.set_time_scale(2.0);
        clock.advance_frame(0.0);
        clock.advance_frame(100.0);
        assert!((clock.delta() - 0.2).abs() < 1e-6);
        assert!((clock.unscaled_delta() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_negative_time_scale_clamps_to_zero() {
        let mut clock = Clock::new();
        clock.set_time_scale(-1.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_reset_preserves_time_scale() {
        let mut clock = Clock::new();
        clock.set_time_scale(0.5);
        clock.advance_frame(0.0);
        clock.advance_frame(16.0);
        clock.advance_fixed_step();
        clock.reset();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.physics_frame_count(), 0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.time_scale(), 0.5);
    }
}
