//! Animation system with compile-time known variants
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each animation implements the `Animation` trait.

mod case;
mod grid;
mod off;

pub use case::render_case_leds;
pub use grid::{GradientStyle, GridGradient};
pub use off::NoAnimation;

use embassy_time::Instant;

use crate::bounds::{Frame, PositionSet};
use crate::clock::Clock;
use crate::color::Rgb;
use crate::fade::{FadeStep, FadeTable};
use crate::layout::LayoutPreset;
use crate::options::{AnimationOptions, OptionsStore, SpeedRange};
use crate::pixel::{Pixel, PressedMasks};

const ANIMATION_NAME_OFF: &str = "off";
const ANIMATION_NAME_GRID_SWEEP: &str = "grid_sweep";
const ANIMATION_NAME_GRID_WAVE: &str = "grid_wave";
const ANIMATION_NAME_GRID_WHEEL: &str = "grid_wheel";
const ANIMATION_NAME_GRID_DRIFT: &str = "grid_drift";

const ANIMATION_ID_OFF: u8 = 0;
const ANIMATION_ID_GRID_SWEEP: u8 = 1;
const ANIMATION_ID_GRID_WAVE: u8 = 2;
const ANIMATION_ID_GRID_WHEEL: u8 = 3;
const ANIMATION_ID_GRID_DRIFT: u8 = 4;

const ANIMATION_IDS: [AnimationId; 5] = [
    AnimationId::Off,
    AnimationId::GridSweep,
    AnimationId::GridWave,
    AnimationId::GridWheel,
    AnimationId::GridDrift,
];

/// Everything an animation touches during one tick
pub struct RenderContext<'a, S: OptionsStore, C: Clock> {
    /// Configuration collaborator, read once per due tick
    pub options: &'a S,
    pub clock: &'a C,
    /// Masks held down right now
    pub pressed: &'a PressedMasks,
    /// Release fade memory, exclusively lent to the active animation
    pub fade: &'a mut FadeTable,
}

pub trait Animation {
    /// Render a frame if one is due
    ///
    /// Returns `false` when the animation clock is not due yet; the frame is
    /// left untouched and the caller keeps showing the previous one.
    fn animate<S: OptionsStore, C: Clock>(
        &mut self,
        frame: &mut Frame,
        cx: &mut RenderContext<'_, S, C>,
    ) -> bool;

    /// Speed list walked by parameter cycling, `None` if speed has no effect
    fn speed_range(&self) -> Option<SpeedRange> {
        None
    }

    /// Reset animation state
    fn reset(&mut self) {}
}

/// Step the stored speed one position up or down the list
pub fn cycle_speed<S: OptionsStore>(options: &S, range: SpeedRange, up: bool) {
    options.update(|stored| {
        stored.speed = range.cycle(stored.speed, up).as_raw();
    });
}

/// Known animation ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationId {
    Off = ANIMATION_ID_OFF,
    GridSweep = ANIMATION_ID_GRID_SWEEP,
    GridWave = ANIMATION_ID_GRID_WAVE,
    GridWheel = ANIMATION_ID_GRID_WHEEL,
    GridDrift = ANIMATION_ID_GRID_DRIFT,
}

impl AnimationId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_OFF => Self::Off,
            ANIMATION_ID_GRID_SWEEP => Self::GridSweep,
            ANIMATION_ID_GRID_WAVE => Self::GridWave,
            ANIMATION_ID_GRID_WHEEL => Self::GridWheel,
            ANIMATION_ID_GRID_DRIFT => Self::GridDrift,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => ANIMATION_NAME_OFF,
            Self::GridSweep => ANIMATION_NAME_GRID_SWEEP,
            Self::GridWave => ANIMATION_NAME_GRID_WAVE,
            Self::GridWheel => ANIMATION_NAME_GRID_WHEEL,
            Self::GridDrift => ANIMATION_NAME_GRID_DRIFT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ANIMATION_NAME_OFF => Some(Self::Off),
            ANIMATION_NAME_GRID_SWEEP => Some(Self::GridSweep),
            ANIMATION_NAME_GRID_WAVE => Some(Self::GridWave),
            ANIMATION_NAME_GRID_WHEEL => Some(Self::GridWheel),
            ANIMATION_NAME_GRID_DRIFT => Some(Self::GridDrift),
            _ => None,
        }
    }

    /// Next id in hotkey order, wrapping around
    pub fn next(self) -> Self {
        let index = self as usize;
        ANIMATION_IDS[(index + 1) % ANIMATION_IDS.len()]
    }

    /// Previous id in hotkey order, wrapping around
    pub fn previous(self) -> Self {
        let index = self as usize;
        let len = ANIMATION_IDS.len();
        ANIMATION_IDS[(index + len - 1) % len]
    }

    /// Build the animation for this id on the given board
    pub fn to_slot(self, pixels: &[Pixel], options: &AnimationOptions) -> AnimationSlot {
        let preset = LayoutPreset::resolve(options.layout_preset);
        let grid = |style| GridGradient::new(style, pixels, preset);
        match self {
            Self::Off => AnimationSlot::Off(NoAnimation),
            Self::GridSweep => AnimationSlot::GridSweep(grid(GradientStyle::Sweep)),
            Self::GridWave => AnimationSlot::GridWave(grid(GradientStyle::Wave)),
            Self::GridWheel => AnimationSlot::GridWheel(grid(GradientStyle::Wheel)),
            Self::GridDrift => AnimationSlot::GridDrift(grid(GradientStyle::Drift)),
        }
    }
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    /// All LEDs dark
    Off(NoAnimation),
    /// Stepped sweep between two colors
    GridSweep(GridGradient),
    /// Sine wave between two colors
    GridWave(GridGradient),
    /// 4-stop wheel stepping per frame
    GridWheel(GridGradient),
    /// 4-stop wheel driven by elapsed time
    GridDrift(GridGradient),
}

impl Default for AnimationSlot {
    fn default() -> Self {
        Self::Off(NoAnimation)
    }
}

impl AnimationSlot {
    /// Render the current animation
    pub fn animate<S: OptionsStore, C: Clock>(
        &mut self,
        frame: &mut Frame,
        cx: &mut RenderContext<'_, S, C>,
    ) -> bool {
        match self {
            Self::Off(animation) => animation.animate(frame, cx),
            Self::GridSweep(animation)
            | Self::GridWave(animation)
            | Self::GridWheel(animation)
            | Self::GridDrift(animation) => animation.animate(frame, cx),
        }
    }

    pub fn speed_range(&self) -> Option<SpeedRange> {
        match self {
            Self::Off(animation) => animation.speed_range(),
            Self::GridSweep(animation)
            | Self::GridWave(animation)
            | Self::GridWheel(animation)
            | Self::GridDrift(animation) => animation.speed_range(),
        }
    }

    /// Reset the animation state
    pub fn reset(&mut self) {
        match self {
            Self::Off(animation) => Animation::reset(animation),
            Self::GridSweep(animation)
            | Self::GridWave(animation)
            | Self::GridWheel(animation)
            | Self::GridDrift(animation) => Animation::reset(animation),
        }
    }

    /// Get the animation ID for external observation
    pub fn id(&self) -> AnimationId {
        match self {
            Self::Off(_) => AnimationId::Off,
            Self::GridSweep(_) => AnimationId::GridSweep,
            Self::GridWave(_) => AnimationId::GridWave,
            Self::GridWheel(_) => AnimationId::GridWheel,
            Self::GridDrift(_) => AnimationId::GridDrift,
        }
    }

    /// Instant of the last rendered tick, for animations that keep one
    pub fn last_tick(&self) -> Option<Instant> {
        self.grid().and_then(|grid| grid.clock().last_tick())
    }

    /// Carry the tick timing of a previous animation over
    pub fn continue_from(&mut self, last_tick: Option<Instant>) {
        match self {
            Self::Off(_) => {}
            Self::GridSweep(animation)
            | Self::GridWave(animation)
            | Self::GridWheel(animation)
            | Self::GridDrift(animation) => animation.continue_from(last_tick),
        }
    }

    /// Get the grid animation, if one is active
    pub fn grid(&self) -> Option<&GridGradient> {
        match self {
            Self::Off(_) => None,
            Self::GridSweep(animation)
            | Self::GridWave(animation)
            | Self::GridWheel(animation)
            | Self::GridDrift(animation) => Some(animation),
        }
    }
}

/// Write one position through the fade memory
///
/// Skips positions already painted this tick and positions outside the frame.
pub(crate) fn paint(
    frame: &mut Frame,
    fade: &mut FadeTable,
    painted: &mut PositionSet,
    position: usize,
    press: Option<Rgb>,
    base: Rgb,
    step: FadeStep,
) {
    if !painted.insert(position) {
        return;
    }
    let Some(color) = fade.resolve(position, press, base, step) else {
        return;
    };
    if let Some(slot) = frame.get_mut(position) {
        *slot = color;
    }
}
