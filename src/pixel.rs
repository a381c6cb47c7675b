//! Physical pixels reported by the input layer
//!
//! A pixel ties one logical input mask to zero or more positions in the
//! output frame. The board reports its pixels once at construction; the
//! pressed subset is reported again every tick.

use heapless::{FnvIndexSet, Vec};

/// Gamepad input masks
pub mod mask {
    pub const B1: u32 = 1 << 0;
    pub const B2: u32 = 1 << 1;
    pub const B3: u32 = 1 << 2;
    pub const B4: u32 = 1 << 3;
    pub const L1: u32 = 1 << 4;
    pub const R1: u32 = 1 << 5;
    pub const L2: u32 = 1 << 6;
    pub const R2: u32 = 1 << 7;
    pub const S1: u32 = 1 << 8;
    pub const S2: u32 = 1 << 9;
    pub const L3: u32 = 1 << 10;
    pub const R3: u32 = 1 << 11;
    pub const A1: u32 = 1 << 12;
    pub const A2: u32 = 1 << 13;

    pub const DU: u32 = 1 << 16;
    pub const DD: u32 = 1 << 17;
    pub const DL: u32 = 1 << 18;
    pub const DR: u32 = 1 << 19;

    /// Lever directions in rendering order
    pub const DIRECTIONS: [u32; 4] = [DU, DD, DL, DR];
}

/// Maximum frame positions a single pixel can drive
pub const MAX_PIXEL_POSITIONS: usize = 4;

/// Maximum number of distinct masks held pressed at once
pub const MAX_PRESSED: usize = 32;

/// Sentinel index for "no pixel on this board"
pub const NO_PIXEL_INDEX: i32 = -1;

/// Frame positions driven by one pixel
pub type Positions = Vec<u8, MAX_PIXEL_POSITIONS>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixel {
    /// Board-level pixel index, `NO_PIXEL_INDEX` when absent
    pub index: i32,
    /// Input mask that lights this pixel
    pub mask: u32,
    /// Output frame positions
    pub positions: Positions,
}

/// Placeholder for matrix cells without a pixel
pub const NO_PIXEL: Pixel = Pixel {
    index: NO_PIXEL_INDEX,
    mask: 0,
    positions: Vec::new(),
};

impl Pixel {
    /// Create a pixel driving the given frame positions
    ///
    /// Positions past `MAX_PIXEL_POSITIONS` are dropped.
    pub fn new(index: i32, mask: u32, positions: &[u8]) -> Self {
        let mut stored = Positions::new();
        for &position in positions {
            if stored.push(position).is_err() {
                break;
            }
        }
        Self {
            index,
            mask,
            positions: stored,
        }
    }

    /// Check if the pixel exists on the board and drives at least one LED
    pub fn is_present(&self) -> bool {
        self.index != NO_PIXEL_INDEX && !self.positions.is_empty()
    }
}

/// Set of masks currently held down
#[derive(Debug, Clone, Default)]
pub struct PressedMasks {
    inner: FnvIndexSet<u32, MAX_PRESSED>,
}

impl PressedMasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the masks of the pressed pixels
    pub fn from_pixels<'a>(pixels: impl IntoIterator<Item = &'a Pixel>) -> Self {
        let mut masks = Self::new();
        for pixel in pixels {
            masks.insert(pixel.mask);
        }
        masks
    }

    /// Mark a mask as pressed
    ///
    /// Returns `false` if the set is full.
    pub fn insert(&mut self, mask: u32) -> bool {
        self.inner.insert(mask).is_ok()
    }

    pub fn contains(&self, mask: u32) -> bool {
        self.inner.contains(&mask)
    }
}
