/// Turns host frame timestamps into physics steps.
///
/// The host (usually an animation-frame callback) passes a monotonic
/// timestamp in milliseconds every frame. The clock derives the elapsed
/// step, clamps it to `max_dt` so a paused or backgrounded host never
/// produces one huge step, and counts frames since the last restart.
/// Timestamps that go backwards are treated as zero elapsed time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame: u64,
    now_ms: f64,
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    /// Create a clock that never reports a step longer than `max_dt` seconds.
    pub fn new(max_dt: f32) -> Self {
        Self {
            frame: 0,
            now_ms: 0.0,
            last_ms: None,
            max_dt,
        }
    }

    /// Start counting from `now_ms`: frame 0, no elapsed time.
    pub fn restart(&mut self, now_ms: f64) {
        self.frame = 0;
        self.now_ms = now_ms;
        self.last_ms = Some(now_ms);
    }

    /// Record a new frame at `now_ms`. Returns the physics step in seconds.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let now_ms = if now_ms.is_finite() {
            now_ms.max(self.now_ms)
        } else {
            self.now_ms
        };
        let elapsed_ms = match self.last_ms {
            Some(last) => now_ms - last,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.now_ms = now_ms;
        self.frame += 1;
        ((elapsed_ms / 1000.0) as f32).clamp(0.0, self.max_dt)
    }

    /// Timestamp of the most recent frame.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Frames advanced since the last restart.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The step clamp in seconds.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = FrameClock::new(0.05);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.now_ms(), 0.0);
    }

    #[test]
    fn first_frame_without_restart_has_no_step() {
        let mut clock = FrameClock::new(0.05);
        assert_eq!(clock.advance(1000.0), 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn advance_measures_elapsed_time() {
        let mut clock = FrameClock::new(0.05);
        clock.restart(1000.0);
        let dt = clock.advance(1016.0);
        assert!((dt - 0.016).abs() < 1e-6);
        assert_eq!(clock.frame(), 1);
        assert_eq!(clock.now_ms(), 1016.0);
    }

    #[test]
    fn long_pause_is_clamped() {
        let mut clock = FrameClock::new(0.05);
        clock.restart(0.0);
        assert_eq!(clock.advance(10_000.0), 0.05);
        assert_eq!(clock.now_ms(), 10_000.0);
    }

    #[test]
    fn backwards_timestamps_do_not_rewind() {
        let mut clock = FrameClock::new(0.05);
        clock.restart(500.0);
        assert_eq!(clock.advance(400.0), 0.0);
        assert_eq!(clock.now_ms(), 500.0);
    }

    #[test]
    fn restart_resets_frames() {
        let mut clock = FrameClock::new(0.05);
        clock.restart(0.0);
        clock.advance(16.0);
        clock.advance(32.0);
        clock.restart(100.0);
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.now_ms(), 100.0);
    }
}
