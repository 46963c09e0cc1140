use std::time::{Duration, Instant};

/// Largest step handed to update/render. Longer gaps (debugger pauses, window
/// drags) are reported as this value so games never see a huge jump.
pub const DEFAULT_MAX_STEP: Duration = Duration::from_nanos(1_000_000_000 / 30);

/// Frame timing snapshot passed to update and render callbacks.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Sum of all clamped deltas since the clock was created, in seconds.
    pub total: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to `[dt_min, dt_max]`; `total` accumulates the clamped
/// values, so it tracks simulated rather than wall-clock time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    total: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a clock with no lower clamp and a 1/30 s upper clamp.
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, DEFAULT_MAX_STEP)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            total: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without touching `total` or the frame counter.
    ///
    /// Called when the run loop starts so time spent on setup is not reported
    /// as the first frame's delta.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock to the current instant.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    ///
    /// An instant earlier than the previous tick yields a zero (then clamped) delta.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.total += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            total: self.total as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
