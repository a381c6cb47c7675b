//! Dark animation

use super::{Animation, RenderContext};
use crate::bounds::Frame;
use crate::clock::Clock;
use crate::color::BLACK;
use crate::options::OptionsStore;

/// Keeps every LED off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnimation;

impl Animation for NoAnimation {
    fn animate<S: OptionsStore, C: Clock>(
        &mut self,
        frame: &mut Frame,
        _cx: &mut RenderContext<'_, S, C>,
    ) -> bool {
        frame.fill(BLACK);
        true
    }
}
