use std::time::Instant;

/// Measures the time between consecutive frames.
pub struct FrameClock {
    /// Last frame timestamp
    last_frame: Instant,
    /// Time since the clock was created, sampled at the last tick
    elapsed_total: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            elapsed_total: 0.0,
        }
    }

    /// Call once per frame. Returns seconds since the previous tick.
    ///
    /// The value is not clamped, so a stalled frame yields a large delta.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_total += delta;
        delta
    }

    /// Seconds accumulated over all ticks.
    pub fn total(&self) -> f32 {
        self.elapsed_total
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
