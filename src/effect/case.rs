//! Case LEDs lit by lever directions

use super::paint;
use crate::bounds::{Frame, PositionSet};
use crate::fade::{FadeStep, FadeTable};
use crate::options::TickParams;
use crate::pixel::PressedMasks;

/// Render the configured case range
///
/// Every case LED rests at the case normal color. Offsets listed for a held
/// lever direction show the case press color and fade out after release.
/// Negative offsets and offsets outside the range are ignored.
pub fn render_case_leds(
    frame: &mut Frame,
    fade: &mut FadeTable,
    painted: &mut PositionSet,
    pressed: &PressedMasks,
    params: &TickParams,
    step: FadeStep,
) {
    let Some(bounds) = params.case else {
        return;
    };

    let mut active = PositionSet::new();
    for (direction, offsets) in &params.case_offsets {
        if !pressed.contains(*direction) {
            continue;
        }
        for &offset in offsets {
            if let Some(target) = bounds.offset(offset) {
                active.insert(target);
            }
        }
    }

    for position in bounds.positions() {
        let press = active.contains(position).then_some(params.case_press);
        paint(frame, fade, painted, position, press, params.case_normal, step);
    }
}
