//! Fixed-timestep clock.
//!
//! `draw_web()` fires roughly every animation frame with an uneven delta.
//! `GameTime` accumulates those deltas and hands out whole ticks, so the
//! simulation only ever advances in fixed steps.

/// Most ticks a single frame may produce. A tab that was in the background
/// resumes without replaying the time it was hidden.
pub const MAX_CATCHUP_TICKS: u32 = 5;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    pub total_ticks: u64,
    /// `None` until the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ms_per_tick: u64) -> Self {
        Self {
            ms_per_tick: ms_per_tick as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed the frame timestamp (`performance.now()`) and get the number of
    /// ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let max_delta = self.ms_per_tick * MAX_CATCHUP_TICKS as f64;
        let delta = self
            .last_timestamp
            .map_or(0.0, |prev| (now_ms - prev).clamp(0.0, max_delta));
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
