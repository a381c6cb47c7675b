//! Animation clock and phase models
//!
//! Each gradient animation owns one [`AnimationClock`]. The clock gates how
//! often a frame is produced and advances the phase scalar that the color
//! resolvers read. Three phase models exist:
//!
//! - stepped sweep: a counter walks over the elements, forward then back
//! - continuous: a float phase advances by a fixed step and wraps at a period
//! - elapsed: the phase advances by real elapsed time over a column duration
//!
//! A configured pause freezes the phase at the start of the cycle until its
//! deadline passes. Every model resumes from zero after a pause.

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};
use libm::fmodf;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::clock::Clock;
use crate::options::{PauseDuration, Speed};

/// Period of the sine phase, in radians
pub const WAVE_PERIOD: f32 = TAU;
/// Period of the normalized phase
pub const UNIT_PERIOD: f32 = 1.0;

/// How the phase advances each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseModel {
    /// Bounded counter over the element count, forward then return
    Stepped,
    /// Fixed step per tick, wrapping at `period`
    Continuous { period: f32 },
    /// Elapsed time over the column duration, wrapping at 1.0
    Elapsed,
}

impl PhaseModel {
    /// Elements advanced per tick by the stepped sweep
    pub const fn sweep_step(speed: Speed) -> f32 {
        match speed {
            Speed::VerySlow => 0.18,
            Speed::Slow => 0.30,
            Speed::Normal => 0.45,
            Speed::Fast => 0.60,
            Speed::VeryFast => 0.80,
        }
    }

    /// Fraction of the period advanced per tick by the continuous model
    pub const fn cycle_fraction(speed: Speed) -> f32 {
        match speed {
            Speed::VerySlow => 0.016,
            Speed::Slow => 0.025,
            Speed::Normal => 0.04,
            Speed::Fast => 0.055,
            Speed::VeryFast => 0.075,
        }
    }

    /// Time the elapsed model spends per column
    pub const fn column_duration(speed: Speed) -> Duration {
        Duration::from_millis(match speed {
            Speed::VerySlow => 1600,
            Speed::Slow => 1200,
            Speed::Normal => 800,
            Speed::Fast => 600,
            Speed::VeryFast => 350,
        })
    }
}

/// Direction of the stepped sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Elements turn from the first color to the second
    Forward,
    /// Elements turn back to the first color
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Active(SweepDirection),
    /// Frozen until the deadline
    Paused(Instant),
    /// Nothing to animate
    Idle,
}

/// Inputs of one phase advance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    pub speed: Speed,
    pub pause: PauseDuration,
    /// Number of elements being animated
    pub elements: usize,
    /// Time since the previous tick
    pub elapsed: Duration,
}

/// Advance `phase` by `step`, wrapping at `period`
///
/// Returns the new phase (always in `0.0..period`) and whether it wrapped.
pub fn wrap_phase(phase: f32, step: f32, period: f32) -> (f32, bool) {
    if period.is_nan() || period <= 0.0 {
        return (0.0, false);
    }
    let mut next = phase + step;
    let mut wrapped = false;
    if next >= period {
        next -= period;
        wrapped = true;
        if next >= period {
            next = fmodf(next, period);
        }
    }
    if !next.is_finite() || next < 0.0 {
        next = 0.0;
    }
    (next, wrapped)
}

/// Frame gate and phase state of one animation
#[derive(Debug, Clone)]
pub struct AnimationClock {
    model: PhaseModel,
    state: ClockState,
    phase: f32,
    next_run: Option<Instant>,
    last_tick: Option<Instant>,
}

impl AnimationClock {
    pub const fn new(model: PhaseModel) -> Self {
        Self {
            model,
            state: ClockState::Active(SweepDirection::Forward),
            phase: 0.0,
            next_run: None,
            last_tick: None,
        }
    }

    pub const fn model(&self) -> PhaseModel {
        self.model
    }

    pub const fn state(&self) -> ClockState {
        self.state
    }

    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Check if the next frame is due
    pub fn is_due<C: Clock>(&self, clock: &C) -> bool {
        self.next_run.is_none_or(|deadline| clock.reached(deadline))
    }

    /// Schedule the next frame `interval` from now
    pub fn schedule<C: Clock>(&mut self, clock: &C, interval: Duration) {
        self.next_run = Some(clock.timeout_after(interval));
    }

    /// Record a rendered tick and return the time since the previous one
    ///
    /// The first tick after construction or reset reports zero, unless
    /// [`continue_from`](Self::continue_from) handed over an earlier tick.
    pub fn mark_tick<C: Clock>(&mut self, clock: &C) -> Duration {
        let now = clock.now();
        let elapsed = self
            .last_tick
            .map_or(Duration::from_millis(0), |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);
        elapsed
    }

    pub const fn last_tick(&self) -> Option<Instant> {
        self.last_tick
    }

    /// Measure the next tick's elapsed time from `last_tick`
    pub fn continue_from(&mut self, last_tick: Option<Instant>) {
        self.last_tick = last_tick;
    }

    /// Restart from the beginning of the cycle, due immediately
    pub fn reset(&mut self) {
        self.state = ClockState::Active(SweepDirection::Forward);
        self.phase = 0.0;
        self.next_run = None;
        self.last_tick = None;
    }

    /// Advance the phase by one tick
    #[allow(clippy::cast_precision_loss)]
    pub fn advance<C: Clock>(&mut self, clock: &C, tick: &ClockTick) {
        if let ClockState::Paused(until) = self.state {
            if clock.reached(until) {
                self.state = ClockState::Active(SweepDirection::Forward);
                self.phase = 0.0;
            }
        }

        if tick.elements == 0 {
            self.state = ClockState::Idle;
            self.phase = 0.0;
            return;
        }
        if self.state == ClockState::Idle {
            self.state = ClockState::Active(SweepDirection::Forward);
        }

        let ClockState::Active(direction) = self.state else {
            return;
        };

        match self.model {
            PhaseModel::Stepped => {
                self.phase += PhaseModel::sweep_step(tick.speed);
                if self.phase >= tick.elements as f32 {
                    self.phase = 0.0;
                    match direction {
                        SweepDirection::Forward => {
                            self.state = ClockState::Active(SweepDirection::Return);
                        }
                        SweepDirection::Return => self.end_cycle(clock, tick.pause),
                    }
                }
            }
            PhaseModel::Continuous { period } => {
                let step = period * PhaseModel::cycle_fraction(tick.speed);
                self.wrap(clock, step, period, tick.pause);
            }
            PhaseModel::Elapsed => {
                let column_ms = PhaseModel::column_duration(tick.speed).as_millis().max(1);
                let step = tick.elapsed.as_millis() as f32 / column_ms as f32;
                self.wrap(clock, step, UNIT_PERIOD, tick.pause);
            }
        }
    }

    fn wrap<C: Clock>(&mut self, clock: &C, step: f32, period: f32, pause: PauseDuration) {
        let (phase, wrapped) = wrap_phase(self.phase, step, period);
        self.phase = phase;
        if wrapped {
            self.end_cycle(clock, pause);
        }
    }

    /// Either pause or start the next cycle
    fn end_cycle<C: Clock>(&mut self, clock: &C, pause: PauseDuration) {
        if pause.is_none() {
            self.state = ClockState::Active(SweepDirection::Forward);
            return;
        }
        self.phase = 0.0;
        self.state = ClockState::Paused(clock.timeout_after(pause.duration()));
        #[cfg(feature = "esp32-log")]
        println!("[AnimationClock.end_cycle] pausing for {:?}", pause);
    }
}
