//! Animation configuration
//!
//! The configuration store is owned by the firmware (web configurator,
//! flash storage, hotkeys). Animations read it through [`OptionsStore`] once
//! per tick and resolve the raw values into [`TickParams`], so a value
//! changed mid-tick never splits one frame's decisions.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Duration;

use crate::bounds::CaseBounds;
use crate::color::{Rgb, rgb_from_u32};
use crate::pixel::mask;

/// Number of offsets configurable per lever direction
pub const MAX_CASE_OFFSETS: usize = 4;

/// Offsets into the case range, `-1` marks an unused slot
pub type CaseOffsets = [i32; MAX_CASE_OFFSETS];

const UNUSED_OFFSETS: CaseOffsets = [-1; MAX_CASE_OFFSETS];

const SPEED_ID_SLOW: i32 = 0;
const SPEED_ID_NORMAL: i32 = 1;
const SPEED_ID_FAST: i32 = 2;
const SPEED_ID_VERY_SLOW: i32 = 3;
const SPEED_ID_VERY_FAST: i32 = 4;

/// Animation speed setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Speed {
    Slow = SPEED_ID_SLOW,
    #[default]
    Normal = SPEED_ID_NORMAL,
    Fast = SPEED_ID_FAST,
    VerySlow = SPEED_ID_VERY_SLOW,
    VeryFast = SPEED_ID_VERY_FAST,
}

impl Speed {
    pub const fn from_raw(value: i32) -> Option<Self> {
        Some(match value {
            SPEED_ID_SLOW => Self::Slow,
            SPEED_ID_NORMAL => Self::Normal,
            SPEED_ID_FAST => Self::Fast,
            SPEED_ID_VERY_SLOW => Self::VerySlow,
            SPEED_ID_VERY_FAST => Self::VeryFast,
            _ => return None,
        })
    }

    /// Resolve a stored value, falling back to `Normal`
    pub const fn resolve(value: i32) -> Self {
        match Self::from_raw(value) {
            Some(speed) => speed,
            None => Self::Normal,
        }
    }

    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Time between two rendered frames
    pub const fn interval(self) -> Duration {
        Duration::from_millis(match self {
            Self::VerySlow => 160,
            Self::Slow => 120,
            Self::Normal => 80,
            Self::Fast => 60,
            Self::VeryFast => 35,
        })
    }
}

/// Ordered speed lists used by parameter cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRange {
    /// Slow, normal, fast
    Basic,
    /// Very slow through very fast
    Extended,
}

const BASIC_SPEEDS: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];
const EXTENDED_SPEEDS: [Speed; 5] = [
    Speed::VerySlow,
    Speed::Slow,
    Speed::Normal,
    Speed::Fast,
    Speed::VeryFast,
];

impl SpeedRange {
    pub const fn steps(self) -> &'static [Speed] {
        match self {
            Self::Basic => &BASIC_SPEEDS,
            Self::Extended => &EXTENDED_SPEEDS,
        }
    }

    /// Move one step up or down the list, wrapping at both ends
    ///
    /// A stored value that is invalid or not part of this list is treated as
    /// `Normal` before stepping.
    pub fn cycle(self, raw: i32, up: bool) -> Speed {
        let steps = self.steps();
        let current = Speed::resolve(raw);
        let index = steps
            .iter()
            .position(|&speed| speed == current)
            .or_else(|| steps.iter().position(|&speed| speed == Speed::Normal))
            .unwrap_or(0);
        let len = steps.len();
        let next = if up {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        steps[next]
    }
}

/// Pause inserted after each full animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseDuration {
    #[default]
    None,
    OneSecond,
    TwoSeconds,
    ThreeSeconds,
}

impl PauseDuration {
    /// Resolve a stored value, anything unknown means no pause
    pub const fn resolve(value: i32) -> Self {
        match value {
            1 => Self::OneSecond,
            2 => Self::TwoSeconds,
            3 => Self::ThreeSeconds,
            _ => Self::None,
        }
    }

    pub const fn duration(self) -> Duration {
        Duration::from_secs(match self {
            Self::None => 0,
            Self::OneSecond => 1,
            Self::TwoSeconds => 2,
            Self::ThreeSeconds => 3,
        })
    }

    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

/// Raw animation options as kept by the configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Gradient stops A..D (0xRRGGBB); two-color styles use A and B
    pub gradient_colors: [u32; 4],
    pub button_press_color: u32,
    pub lever_normal_color: u32,
    pub lever_press_color: u32,
    pub case_normal_color: u32,
    pub case_press_color: u32,
    pub speed: i32,
    pub pause: i32,
    pub layout_preset: i32,
    pub fade_cooldown_ms: u32,
    /// First case LED in the frame, `-1` when the case has no LEDs
    pub case_index: i32,
    pub case_count: u32,
    pub case_up: CaseOffsets,
    pub case_down: CaseOffsets,
    pub case_right: CaseOffsets,
    pub case_left: CaseOffsets,
}

impl AnimationOptions {
    pub const DEFAULT: Self = Self {
        gradient_colors: [0x0000FF, 0xFF00FF, 0x00FF80, 0xFF8000],
        button_press_color: 0xFFFFFF,
        lever_normal_color: 0x202020,
        lever_press_color: 0x00FFFF,
        case_normal_color: 0x000000,
        case_press_color: 0xFF8000,
        speed: SPEED_ID_NORMAL,
        pause: 0,
        layout_preset: 0,
        fade_cooldown_ms: 500,
        case_index: -1,
        case_count: 0,
        case_up: UNUSED_OFFSETS,
        case_down: UNUSED_OFFSETS,
        case_right: UNUSED_OFFSETS,
        case_left: UNUSED_OFFSETS,
    };

    /// Resolve the raw values for one tick
    pub fn resolve(&self) -> TickParams {
        TickParams {
            gradient: [
                rgb_from_u32(self.gradient_colors[0]),
                rgb_from_u32(self.gradient_colors[1]),
                rgb_from_u32(self.gradient_colors[2]),
                rgb_from_u32(self.gradient_colors[3]),
            ],
            press: rgb_from_u32(self.button_press_color),
            lever_normal: rgb_from_u32(self.lever_normal_color),
            lever_press: rgb_from_u32(self.lever_press_color),
            case_normal: rgb_from_u32(self.case_normal_color),
            case_press: rgb_from_u32(self.case_press_color),
            speed: Speed::resolve(self.speed),
            pause: PauseDuration::resolve(self.pause),
            cooldown: Duration::from_millis(u64::from(self.fade_cooldown_ms)),
            case: CaseBounds::from_config(self.case_index, self.case_count),
            case_offsets: [
                (mask::DU, self.case_up),
                (mask::DD, self.case_down),
                (mask::DR, self.case_right),
                (mask::DL, self.case_left),
            ],
        }
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options resolved once at the top of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub gradient: [Rgb; 4],
    pub press: Rgb,
    pub lever_normal: Rgb,
    pub lever_press: Rgb,
    pub case_normal: Rgb,
    pub case_press: Rgb,
    pub speed: Speed,
    pub pause: PauseDuration,
    pub cooldown: Duration,
    pub case: Option<CaseBounds>,
    /// Lever mask paired with the case offsets it highlights
    pub case_offsets: [(u32, CaseOffsets); 4],
}

/// Accessor for the external configuration store
pub trait OptionsStore {
    /// Read a snapshot of the current options
    fn load(&self) -> AnimationOptions;

    /// Modify the stored options in place
    fn update<F: FnOnce(&mut AnimationOptions)>(&self, f: F);
}

impl<S: OptionsStore> OptionsStore for &S {
    fn load(&self) -> AnimationOptions {
        (**self).load()
    }

    fn update<F: FnOnce(&mut AnimationOptions)>(&self, f: F) {
        (**self).update(f);
    }
}

/// Options store shareable between contexts
///
/// Access goes through critical sections, so the configurator may write
/// from an interrupt or another core while the render loop reads.
pub struct SharedOptions {
    inner: Mutex<RefCell<AnimationOptions>>,
}

impl SharedOptions {
    pub const fn new(options: AnimationOptions) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(options)),
        }
    }

    /// Replace all options at once
    pub fn store(&self, options: AnimationOptions) {
        critical_section::with(|cs| {
            *self.inner.borrow(cs).borrow_mut() = options;
        });
    }
}

impl Default for SharedOptions {
    fn default() -> Self {
        Self::new(AnimationOptions::DEFAULT)
    }
}

impl OptionsStore for SharedOptions {
    fn load(&self) -> AnimationOptions {
        critical_section::with(|cs| *self.inner.borrow(cs).borrow())
    }

    fn update<F: FnOnce(&mut AnimationOptions)>(&self, f: F) {
        critical_section::with(|cs| {
            f(&mut *self.inner.borrow(cs).borrow_mut());
        });
    }
}
