use crate::color::{BLACK, Rgb};

/// Number of addressable slots in the output frame
pub const FRAME_SIZE: usize = 100;

/// Output frame handed to the LED driver
pub type Frame = [Rgb; FRAME_SIZE];

/// Create a black frame
pub const fn blank_frame() -> Frame {
    [BLACK; FRAME_SIZE]
}

/// Fixed-size set of frame positions
///
/// Used per tick to make sure every physical LED takes at most one
/// base-color write: the first pass that inserts a position owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionSet {
    bits: u128,
}

const _: () = assert!(FRAME_SIZE <= 128, "position set must cover the frame");

impl PositionSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Add `position` to the set
    ///
    /// Returns `false` when the position is outside the frame or already present.
    pub fn insert(&mut self, position: usize) -> bool {
        if position >= FRAME_SIZE {
            return false;
        }
        let bit = 1u128 << position;
        if self.bits & bit != 0 {
            return false;
        }
        self.bits |= bit;
        true
    }

    pub const fn contains(&self, position: usize) -> bool {
        position < FRAME_SIZE && self.bits & (1u128 << position) != 0
    }
}

/// Contiguous range of case LEDs inside the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseBounds {
    pub start: u8,
    pub end: u8,
}

impl CaseBounds {
    /// Resolve the configured start index and count against the frame size
    ///
    /// A negative start, a zero count or a start past the frame disables the
    /// case LEDs. A count reaching past the frame is cut at the frame end.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_config(start: i32, count: u32) -> Option<Self> {
        if start < 0 || count == 0 {
            return None;
        }
        let start = start as usize;
        if start >= FRAME_SIZE {
            return None;
        }
        let limit = (count as usize).min(FRAME_SIZE - start);

        Some(Self {
            start: start as u8,
            end: (start + limit) as u8,
        })
    }

    /// Get the number of LEDs in the range
    pub const fn count(self) -> u8 {
        self.end - self.start
    }

    /// Translate a configured offset into a frame position
    ///
    /// Negative offsets and offsets past the range are ignored.
    #[allow(clippy::cast_sign_loss)]
    pub fn offset(self, offset: i32) -> Option<usize> {
        if offset < 0 {
            return None;
        }
        let offset = offset as u32;
        if offset >= u32::from(self.count()) {
            return None;
        }
        Some(usize::from(self.start) + offset as usize)
    }

    pub fn positions(self) -> core::ops::Range<usize> {
        usize::from(self.start)..usize::from(self.end)
    }
}
