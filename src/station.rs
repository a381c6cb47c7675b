#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::Frame;
use crate::clock::Clock;
use crate::effect::{AnimationId, AnimationSlot, RenderContext, cycle_speed};
use crate::fade::FadeTable;
use crate::options::OptionsStore;
use crate::pixel::{Pixel, PressedMasks};

/// Animation station - owns the active animation and its shared state
///
/// The station is the only writer of the fade memory. It lends the table to
/// whichever animation is active, so two animations never touch it at once.
pub struct AnimationStation<S: OptionsStore, C: Clock> {
    // External dependencies
    options: S,
    clock: C,

    // Internal state
    current: AnimationSlot,
    pressed: PressedMasks,
    fade: FadeTable,
}

impl<S: OptionsStore, C: Clock> AnimationStation<S, C> {
    /// Create a station running `id` on the board described by `pixels`
    pub fn new(options: S, clock: C, pixels: &[Pixel], id: AnimationId) -> Self {
        let current = id.to_slot(pixels, &options.load());
        Self {
            options,
            clock,
            current,
            pressed: PressedMasks::new(),
            fade: FadeTable::new(),
        }
    }

    /// Render one frame
    ///
    /// Returns `false` if the active animation is not due yet, in which case
    /// `frame` is untouched. Call this from the render loop as often as
    /// convenient.
    pub fn animate(&mut self, frame: &mut Frame) -> bool {
        let mut cx = RenderContext {
            options: &self.options,
            clock: &self.clock,
            pressed: &self.pressed,
            fade: &mut self.fade,
        };
        self.current.animate(frame, &mut cx)
    }

    /// Replace the pressed set with the masks of the given pixels
    pub fn set_pressed<'a>(&mut self, pixels: impl IntoIterator<Item = &'a Pixel>) {
        self.pressed = PressedMasks::from_pixels(pixels);
    }

    pub fn set_pressed_masks(&mut self, masks: PressedMasks) {
        self.pressed = masks;
    }

    /// Step the speed setting up, wrapping at the fastest speed
    ///
    /// Does nothing while the active animation ignores speed.
    pub fn parameter_up(&self) {
        let Some(range) = self.current.speed_range() else {
            return;
        };
        cycle_speed(&self.options, range, true);
        #[cfg(feature = "esp32-log")]
        println!("[AnimationStation.parameter_up] speed = {}", self.options.load().speed);
    }

    /// Step the speed setting down, wrapping at the slowest speed
    pub fn parameter_down(&self) {
        let Some(range) = self.current.speed_range() else {
            return;
        };
        cycle_speed(&self.options, range, false);
        #[cfg(feature = "esp32-log")]
        println!("[AnimationStation.parameter_down] speed = {}", self.options.load().speed);
    }

    /// Switch to another animation
    ///
    /// The layout is rebuilt from `pixels` with the currently stored preset.
    /// Pending release fades carry over and keep decaying from the last
    /// frame the previous animation rendered.
    pub fn set_animation(&mut self, id: AnimationId, pixels: &[Pixel]) {
        #[cfg(feature = "esp32-log")]
        println!(
            "[AnimationStation.set_animation] {} -> {}",
            self.current.id().as_str(),
            id.as_str()
        );
        let last_tick = self.current.last_tick();
        self.current = id.to_slot(pixels, &self.options.load());
        self.current.reset();
        self.current.continue_from(last_tick);
    }

    pub fn next_animation(&mut self, pixels: &[Pixel]) {
        self.set_animation(self.current.id().next(), pixels);
    }

    pub fn previous_animation(&mut self, pixels: &[Pixel]) {
        self.set_animation(self.current.id().previous(), pixels);
    }

    pub fn animation_id(&self) -> AnimationId {
        self.current.id()
    }

    pub fn animation(&self) -> &AnimationSlot {
        &self.current
    }

    pub fn fade(&self) -> &FadeTable {
        &self.fade
    }

    pub fn options(&self) -> &S {
        &self.options
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
