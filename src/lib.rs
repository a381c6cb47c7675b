#![no_std]

pub mod bounds;
pub mod clock;
pub mod color;
pub mod effect;
pub mod fade;
pub mod frame_scheduler;
pub mod layout;
pub mod options;
pub mod phase;
pub mod pixel;
pub mod station;

pub use bounds::{FRAME_SIZE, Frame, blank_frame};
pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::{Animation, AnimationId, AnimationSlot, GradientStyle};
pub use fade::FadeTable;
pub use frame_scheduler::FrameScheduler;
pub use layout::{GridLayout, LayoutPreset};
pub use options::{AnimationOptions, OptionsStore, SharedOptions, Speed};
pub use pixel::{Pixel, PressedMasks};
pub use station::AnimationStation;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to push frames to the physical LED chain.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED chain
    fn write(&mut self, colors: &[Rgb]);
}
