use std::time::{Duration, Instant};

/// Milliseconds of game time.
pub type Millis = u64;

/// Clock reading for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Monotonic timestamp, used for the grace and hard-drop timers.
    pub now: Millis,
    /// Time since the previous frame, accumulated for gravity.
    pub delta: Millis,
}

impl FrameTime {
    #[must_use]
    pub const fn new(now: Millis, delta: Millis) -> Self {
        Self { now, delta }
    }
}

/// Discrete player actions delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDropPress,
    SoftDropRelease,
    Quit,
}

/// Everything the input source reports for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Events in arrival order.
    pub events: Vec<InputEvent>,
    /// Whether the soft-drop key is physically held right now.
    pub soft_drop_held: bool,
}

impl FrameInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            soft_drop_held: false,
        }
    }

    #[must_use]
    pub fn held(self, soft_drop_held: bool) -> Self {
        Self {
            soft_drop_held,
            ..self
        }
    }
}

/// Converts wall-clock instants into [`FrameTime`] readings.
///
/// While frozen, wall-clock time passes without advancing the game clock, so
/// timers resume exactly where they stopped.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use blockfall_engine::{FrameClock, FrameTime};
///
/// let start = Instant::now();
/// let mut clock = FrameClock::starting_at(start);
///
/// assert_eq!(clock.tick_at(start + Duration::from_millis(16)), FrameTime::new(16, 16));
///
/// clock.set_frozen(true);
/// assert_eq!(clock.tick_at(start + Duration::from_millis(500)), FrameTime::new(16, 0));
///
/// clock.set_frozen(false);
/// assert_eq!(clock.tick_at(start + Duration::from_millis(520)), FrameTime::new(36, 20));
/// ```
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_instant: Instant,
    elapsed: Duration,
    last_now: Millis,
    frozen: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    #[must_use]
    pub fn starting_at(instant: Instant) -> Self {
        Self {
            last_instant: instant,
            elapsed: Duration::ZERO,
            last_now: 0,
            frozen: false,
        }
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Reads the clock for a frame starting at `instant`.
    ///
    /// Deltas are derived from the millisecond timestamps, so they always sum
    /// to `now`.
    pub fn tick_at(&mut self, instant: Instant) -> FrameTime {
        let step = instant.saturating_duration_since(self.last_instant);
        self.last_instant = instant;
        if !self.frozen {
            self.elapsed += step;
        }
        let now = Millis::try_from(self.elapsed.as_millis()).unwrap_or(Millis::MAX);
        let delta = now - self.last_now;
        self.last_now = now;
        FrameTime { now, delta }
    }
}
