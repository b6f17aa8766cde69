use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::TuiEvent;

/// Schedules frames at a fixed rate.
///
/// Deadlines advance by exactly one interval per frame so the average rate
/// stays on target. If the loop falls more than one interval behind, the
/// schedule restarts from the current instant instead of emitting a burst of
/// catch-up frames.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

impl FramePacer {
    /// Creates a pacer whose first frame is due at `start`.
    #[must_use]
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_frame: start,
        }
    }

    /// Creates a pacer from a frame rate (frames per second).
    #[must_use]
    pub fn from_rate(rate: f64, start: Instant) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / rate), start)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Time left until the next frame is due.
    #[must_use]
    pub fn timeout(&self, now: Instant) -> Duration {
        self.next_frame.saturating_duration_since(now)
    }

    /// Marks the current frame as started at `now` and schedules the next one.
    pub fn advance(&mut self, now: Instant) {
        self.next_frame += self.interval;
        if self.next_frame <= now {
            self.next_frame = now + self.interval;
        }
    }
}

/// Event loop state management.
///
/// Returns frame events on the pacer's schedule and crossterm events as they
/// arrive in between. Without a frame rate only crossterm events are produced.
#[derive(Debug, Default)]
pub(super) struct EventLoop {
    pacer: Option<FramePacer>,
}

impl EventLoop {
    /// Sets the frame rate. Pass `None` to stop frame events.
    pub(super) fn set_frame_rate(&mut self, rate: Option<f64>) {
        self.pacer = rate.map(|rate| FramePacer::from_rate(rate, Instant::now()));
    }

    /// Returns the next event.
    ///
    /// Blocks until the next frame is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(pacer) = &mut self.pacer {
                if pacer.is_due(now) {
                    pacer.advance(now);
                    return Ok(TuiEvent::Frame);
                }
                if !event::poll(pacer.timeout(now))? {
                    continue;
                }
            }
            return Ok(event::read()?.into());
        }
    }
}
