//! Render loop pacing
//!
//! Polls the animation station at a fixed render rate without async/await
//! or platform-specific timers. The caller sleeps between ticks.

use embassy_time::{Duration, Instant};

use crate::bounds::{Frame, blank_frame};
use crate::clock::Clock;
use crate::options::OptionsStore;
use crate::station::AnimationStation;
use crate::OutputDriver;

/// Default render poll rate (200 Hz).
pub const DEFAULT_POLL_HZ: u32 = 200;

/// Default poll period based on the poll rate.
pub const DEFAULT_POLL_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_POLL_HZ as u64);

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// Whether a new frame was pushed to the output
    pub rendered: bool,
    /// The deadline for the next poll.
    pub next_deadline: Instant,
    /// How long to wait until the next poll (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable render loop step
///
/// The animations gate their own frame rate, so the scheduler polls faster
/// than the fastest animation and forwards a frame to the driver only when
/// the station produced one.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(station, driver);
///
/// loop {
///     let result = scheduler.tick();
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver, S: OptionsStore, C: Clock> {
    output: O,
    station: AnimationStation<S, C>,
    frame: Frame,
    next_poll: Instant,
    poll_duration: Duration,
}

impl<O: OutputDriver, S: OptionsStore, C: Clock> FrameScheduler<O, S, C> {
    /// Create a new frame scheduler polling at `DEFAULT_POLL_HZ`.
    pub fn new(station: AnimationStation<S, C>, driver: O) -> Self {
        Self::with_poll_duration(station, driver, DEFAULT_POLL_DURATION)
    }

    /// Create a new frame scheduler with a custom poll period.
    pub fn with_poll_duration(
        station: AnimationStation<S, C>,
        driver: O,
        poll_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            station,
            frame: blank_frame(),
            next_poll: Instant::from_millis(0),
            poll_duration,
        }
    }

    /// Poll the station once and return timing information.
    pub fn tick(&mut self) -> FrameResult {
        let now = self.station.clock().now();

        // Skip the backlog after a long stall instead of polling in a burst
        let max_drift = self.poll_duration * 2;
        if now > self.next_poll + max_drift {
            self.next_poll = now;
        }

        let rendered = self.station.animate(&mut self.frame);
        if rendered {
            self.output.write(&self.frame);
        }

        self.next_poll += self.poll_duration;

        let sleep_duration = self
            .next_poll
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            rendered,
            next_deadline: self.next_poll,
            sleep_duration,
        }
    }

    /// Last frame pushed to the output
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn station(&self) -> &AnimationStation<S, C> {
        &self.station
    }

    pub fn station_mut(&mut self) -> &mut AnimationStation<S, C> {
        &mut self.station
    }
}
