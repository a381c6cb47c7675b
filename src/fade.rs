//! Per-LED release fade memory
//!
//! Every physical frame position remembers the color it was last pressed
//! with and how much cooldown is left. The table lives as long as the device
//! is powered and is handed to whichever animation is active, so fades carry
//! over animation switches.

use embassy_time::Duration;

use crate::bounds::FRAME_SIZE;
use crate::color::{BLACK, Rgb, lerp};

/// Fade state of one frame position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeEntry {
    /// Cooldown left, in milliseconds
    pub remaining_ms: u64,
    /// Color applied by the last press
    pub hit: Rgb,
}

impl FadeEntry {
    pub const IDLE: Self = Self {
        remaining_ms: 0,
        hit: BLACK,
    };
}

/// Timing of the fade step for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStep {
    /// Full cooldown after release
    pub cooldown: Duration,
    /// Time elapsed since the previous tick
    pub elapsed: Duration,
}

/// Fade memory indexed by frame position
#[derive(Debug, Clone)]
pub struct FadeTable<const N: usize = FRAME_SIZE> {
    entries: [FadeEntry; N],
}

impl<const N: usize> Default for FadeTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FadeTable<N> {
    pub const fn new() -> Self {
        Self {
            entries: [FadeEntry::IDLE; N],
        }
    }

    pub fn entry(&self, position: usize) -> Option<&FadeEntry> {
        self.entries.get(position)
    }

    /// Restart the cooldown of `position` with a fresh hit color
    pub fn hit(&mut self, position: usize, color: Rgb, cooldown: Duration) {
        if let Some(entry) = self.entries.get_mut(position) {
            entry.remaining_ms = cooldown.as_millis();
            entry.hit = color;
        }
    }

    /// Count the cooldown of `position` down, saturating at zero
    pub fn decay(&mut self, position: usize, elapsed: Duration) {
        if let Some(entry) = self.entries.get_mut(position) {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed.as_millis());
        }
    }

    /// Blend the remembered hit color of `position` into `base`
    ///
    /// Returns `base` once the cooldown is over and `None` for positions
    /// outside the table.
    #[allow(clippy::cast_precision_loss)]
    pub fn blend(&self, position: usize, base: Rgb, cooldown: Duration) -> Option<Rgb> {
        let entry = self.entries.get(position)?;
        let cooldown_ms = cooldown.as_millis();
        if entry.remaining_ms == 0 || cooldown_ms == 0 {
            return Some(base);
        }
        let progress = 1.0 - entry.remaining_ms as f32 / cooldown_ms as f32;
        Some(lerp(entry.hit, base, progress))
    }

    /// Resolve the output color of `position` for this tick
    ///
    /// A pressed position restarts its cooldown and shows the press color;
    /// a released one decays and blends back towards `base`.
    pub fn resolve(
        &mut self,
        position: usize,
        press: Option<Rgb>,
        base: Rgb,
        step: FadeStep,
    ) -> Option<Rgb> {
        if position >= N {
            return None;
        }
        match press {
            Some(color) => {
                self.hit(position, color, step.cooldown);
                Some(color)
            }
            None => {
                self.decay(position, step.elapsed);
                self.blend(position, base, step.cooldown)
            }
        }
    }
}
