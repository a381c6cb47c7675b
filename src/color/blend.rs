//! Pure color resolvers
//!
//! Linear component-wise interpolation and the 4-stop color wheel used by the
//! ramp-based gradient styles. Nothing here touches press or fade state.

use libm::{floorf, roundf, sinf};
use smart_leds::White;

use crate::color::{Rgb, Rgbw};

/// Component-wise linear interpolation
pub trait Lerp: Copy {
    /// Move from `self` towards `to` by `t` (clamped to 0.0..=1.0)
    fn lerp(self, to: Self, t: f32) -> Self;
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp8(from: u8, to: u8, t: f32) -> u8 {
    let from_f = f32::from(from);
    let value = from_f + (f32::from(to) - from_f) * t;
    roundf(value).clamp(0.0, 255.0) as u8
}

#[inline]
fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

impl Lerp for Rgb {
    fn lerp(self, to: Self, t: f32) -> Self {
        let t = clamp_unit(t);
        Rgb {
            r: lerp8(self.r, to.r, t),
            g: lerp8(self.g, to.g, t),
            b: lerp8(self.b, to.b, t),
        }
    }
}

impl Lerp for Rgbw {
    fn lerp(self, to: Self, t: f32) -> Self {
        let t = clamp_unit(t);
        Rgbw {
            r: lerp8(self.r, to.r, t),
            g: lerp8(self.g, to.g, t),
            b: lerp8(self.b, to.b, t),
            a: White(lerp8(self.a.0, to.a.0, t)),
        }
    }
}

/// Blend `from` towards `to`
///
/// `t = 0.0` returns `from` exactly, `t = 1.0` returns `to` exactly.
#[inline]
pub fn lerp<C: Lerp>(from: C, to: C, t: f32) -> C {
    from.lerp(to, t)
}

/// Sample a closed 4-stop color wheel
///
/// `t` is wrapped into 0.0..1.0. Each quarter blends one stop into the next,
/// and the last quarter blends back into the first stop, so every stop is
/// hit exactly at `0.0`, `0.25`, `0.5` and `0.75`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wheel4<C: Lerp>(t: f32, stops: &[C; 4]) -> C {
    let t = if t.is_finite() { t - floorf(t) } else { 0.0 };
    let scaled = t * 4.0;
    let segment = (floorf(scaled) as usize).min(3);
    let local = scaled - segment as f32;

    lerp(stops[segment], stops[(segment + 1) % 4], local)
}

/// Map a sine phase onto a 0.0..=1.0 blend weight
#[inline]
pub fn sine_weight(phase: f32) -> f32 {
    (sinf(phase) + 1.0) * 0.5
}
