//! Grid gradient animation
//!
//! Sweeps a gradient across the button grid while pressed buttons light up
//! in the press color and fade back after release. Levers and case LEDs
//! follow the same press-and-fade rule with their own colors.
//!
//! One engine covers every style; styles differ only in the phase model and
//! in how a grid cell turns the phase into a base color.

use core::f32::consts::TAU;

use embassy_time::Instant;
use libm::floorf;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Animation, RenderContext, paint, render_case_leds};
use crate::bounds::{Frame, PositionSet};
use crate::clock::Clock;
use crate::color::{BLACK, Rgb, lerp, sine_weight, wheel4};
use crate::fade::FadeStep;
use crate::layout::{GridElement, GridLayout, LayoutPreset};
use crate::options::{OptionsStore, SpeedRange, TickParams};
use crate::phase::{
    AnimationClock, ClockState, ClockTick, PhaseModel, SweepDirection, UNIT_PERIOD, WAVE_PERIOD,
};
use crate::pixel::Pixel;

/// How the gradient moves across the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStyle {
    /// Elements flip A to B one by one, then back
    Sweep,
    /// Sine wave between A and B, offset per column
    Wave,
    /// 4-stop wheel advanced a fixed step per frame
    Wheel,
    /// 4-stop wheel advanced by elapsed time
    Drift,
}

impl GradientStyle {
    pub const fn phase_model(self) -> PhaseModel {
        match self {
            Self::Sweep => PhaseModel::Stepped,
            Self::Wave => PhaseModel::Continuous {
                period: WAVE_PERIOD,
            },
            Self::Wheel => PhaseModel::Continuous {
                period: UNIT_PERIOD,
            },
            Self::Drift => PhaseModel::Elapsed,
        }
    }

    pub const fn speed_range(self) -> SpeedRange {
        match self {
            Self::Sweep => SpeedRange::Extended,
            Self::Wave | Self::Wheel | Self::Drift => SpeedRange::Basic,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridGradient {
    style: GradientStyle,
    layout: GridLayout,
    clock: AnimationClock,
}

impl GridGradient {
    /// Build the animation for the pixels present on this board
    pub fn new(style: GradientStyle, pixels: &[Pixel], preset: LayoutPreset) -> Self {
        Self {
            style,
            layout: GridLayout::discover(pixels, preset),
            clock: AnimationClock::new(style.phase_model()),
        }
    }

    pub const fn style(&self) -> GradientStyle {
        self.style
    }

    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub const fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Take over the tick timing of a previous animation
    pub fn continue_from(&mut self, last_tick: Option<Instant>) {
        self.clock.continue_from(last_tick);
    }

    /// Gradient color of one grid cell, before press and fade
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn base_color(&self, element: &GridElement, gradient: &[Rgb; 4]) -> Rgb {
        let [color_a, color_b, ..] = *gradient;
        let phase = self.clock.phase();
        let columns = f32::from(self.layout.columns().max(1));
        let column = f32::from(element.column);

        match self.style {
            GradientStyle::Sweep => {
                let step = floorf(phase).max(0.0) as usize;
                let reached = usize::from(element.order) < step;
                match self.clock.state() {
                    ClockState::Active(SweepDirection::Forward) if reached => color_b,
                    ClockState::Active(SweepDirection::Return) if !reached => color_b,
                    _ => color_a,
                }
            }
            GradientStyle::Wave => {
                let weight = sine_weight(phase + column * (TAU / columns));
                lerp(color_a, color_b, weight)
            }
            GradientStyle::Wheel => wheel4(phase + column / columns, gradient),
            GradientStyle::Drift => {
                let offset = if columns > 1.0 {
                    column / (columns - 1.0)
                } else {
                    0.0
                };
                wheel4(phase + offset, gradient)
            }
        }
    }

    fn render_grid(
        &self,
        frame: &mut Frame,
        cx: &mut RenderContext<'_, impl OptionsStore, impl Clock>,
        painted: &mut PositionSet,
        params: &TickParams,
        step: FadeStep,
    ) {
        for element in self.layout.elements() {
            let base = self.base_color(element, &params.gradient);
            let press = cx.pressed.contains(element.mask).then_some(params.press);
            for &position in &element.positions {
                paint(frame, cx.fade, painted, usize::from(position), press, base, step);
            }
        }
    }

    fn render_levers(
        &self,
        frame: &mut Frame,
        cx: &mut RenderContext<'_, impl OptionsStore, impl Clock>,
        painted: &mut PositionSet,
        params: &TickParams,
        step: FadeStep,
    ) {
        for lever in self.layout.levers() {
            let press = cx.pressed.contains(lever.mask).then_some(params.lever_press);
            for &position in &lever.positions {
                paint(
                    frame,
                    cx.fade,
                    painted,
                    usize::from(position),
                    press,
                    params.lever_normal,
                    step,
                );
            }
        }
    }
}

impl Animation for GridGradient {
    fn animate<S: OptionsStore, C: Clock>(
        &mut self,
        frame: &mut Frame,
        cx: &mut RenderContext<'_, S, C>,
    ) -> bool {
        if !self.clock.is_due(cx.clock) {
            return false;
        }

        let params = cx.options.load().resolve();
        let elapsed = self.clock.mark_tick(cx.clock);

        frame.fill(BLACK);

        #[cfg(feature = "esp32-log")]
        let previous_state = self.clock.state();

        self.clock.advance(
            cx.clock,
            &ClockTick {
                speed: params.speed,
                pause: params.pause,
                elements: self.layout.elements().len(),
                elapsed,
            },
        );
        self.clock.schedule(cx.clock, params.speed.interval());

        #[cfg(feature = "esp32-log")]
        {
            if previous_state != self.clock.state() {
                println!(
                    "[GridGradient.animate] {:?}: {:?} -> {:?}",
                    self.style,
                    previous_state,
                    self.clock.state()
                );
            }
        }

        let step = FadeStep {
            cooldown: params.cooldown,
            elapsed,
        };
        let mut painted = PositionSet::new();

        self.render_grid(frame, cx, &mut painted, &params, step);
        self.render_levers(frame, cx, &mut painted, &params, step);
        render_case_leds(frame, cx.fade, &mut painted, cx.pressed, &params, step);

        true
    }

    fn speed_range(&self) -> Option<SpeedRange> {
        Some(self.style.speed_range())
    }

    fn reset(&mut self) {
        self.clock.reset();
    }
}
