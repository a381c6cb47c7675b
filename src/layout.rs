//! Logical grid layouts and their mapping onto the board's pixels
//!
//! A layout preset lists which input mask sits at which grid cell. At
//! construction the preset is cross-referenced with the pixels the board
//! actually reports, producing the ordered element list the gradient sweeps
//! over. Cells without a pixel on this board are dropped.

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::FRAME_SIZE;
use crate::pixel::{Pixel, mask};

/// Maximum number of grid cells a preset may declare
pub const MAX_ELEMENTS: usize = 16;
/// Maximum frame positions collected for one grid element
pub const MAX_ELEMENT_POSITIONS: usize = 8;
/// Maximum frame positions collected for one lever direction
pub const MAX_LEVER_POSITIONS: usize = 8;

const PRESET_ID_TOUCHPAD_GRID: i32 = 0;
const PRESET_ID_FIGHTSTICK: i32 = 1;

/// One cell of a layout preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub mask: u32,
    pub row: u8,
    pub column: u8,
}

const fn cell(mask: u32, row: u8, column: u8) -> LayoutEntry {
    LayoutEntry { mask, row, column }
}

// 4x4 grid, touchpad in the top-left corner
const TOUCHPAD_GRID: [LayoutEntry; 11] = [
    cell(mask::A2, 0, 0),
    cell(mask::B1, 1, 0),
    cell(mask::B2, 1, 1),
    cell(mask::R1, 1, 2),
    cell(mask::L1, 1, 3),
    cell(mask::B3, 2, 0),
    cell(mask::B4, 2, 1),
    cell(mask::R2, 2, 2),
    cell(mask::L2, 2, 3),
    cell(mask::L3, 3, 0),
    cell(mask::R3, 3, 1),
];

// Two rows of four, punches on top
const FIGHTSTICK: [LayoutEntry; 8] = [
    cell(mask::B3, 0, 0),
    cell(mask::B4, 0, 1),
    cell(mask::R1, 0, 2),
    cell(mask::L1, 0, 3),
    cell(mask::B1, 1, 0),
    cell(mask::B2, 1, 1),
    cell(mask::R2, 1, 2),
    cell(mask::L2, 1, 3),
];

/// Built-in logical layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum LayoutPreset {
    #[default]
    TouchpadGrid = PRESET_ID_TOUCHPAD_GRID,
    Fightstick = PRESET_ID_FIGHTSTICK,
}

impl LayoutPreset {
    /// Resolve a stored preset selector, falling back to the touchpad grid
    pub const fn resolve(raw: i32) -> Self {
        match raw {
            PRESET_ID_FIGHTSTICK => Self::Fightstick,
            _ => Self::TouchpadGrid,
        }
    }

    pub const fn entries(self) -> &'static [LayoutEntry] {
        match self {
            Self::TouchpadGrid => &TOUCHPAD_GRID,
            Self::Fightstick => &FIGHTSTICK,
        }
    }

    /// Number of columns along the sweep axis
    pub const fn columns(self) -> u8 {
        4
    }

    pub const fn rows(self) -> u8 {
        match self {
            Self::TouchpadGrid => 4,
            Self::Fightstick => 2,
        }
    }
}

/// A grid cell present on this board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridElement {
    pub mask: u32,
    pub row: u8,
    pub column: u8,
    /// Position in sweep order (column-major, top to bottom)
    pub order: u8,
    /// Frame positions of every pixel sharing this mask, sorted
    pub positions: Vec<u8, MAX_ELEMENT_POSITIONS>,
}

/// Frame positions lit by one lever direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeverGroup {
    pub mask: u32,
    pub positions: Vec<u8, MAX_LEVER_POSITIONS>,
}

/// Logical-to-physical map built once per animation instance
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    elements: Vec<GridElement, MAX_ELEMENTS>,
    levers: Vec<LeverGroup, { mask::DIRECTIONS.len() }>,
    columns: u8,
}

impl GridLayout {
    /// Cross-reference a preset with the board's pixels
    pub fn discover(pixels: &[Pixel], preset: LayoutPreset) -> Self {
        let mut elements = Vec::new();
        let mut order: u8 = 0;

        for column in 0..preset.columns() {
            for row in 0..preset.rows() {
                for entry in preset.entries() {
                    if entry.column != column || entry.row != row {
                        continue;
                    }
                    let mut positions = Vec::new();
                    collect_positions(pixels, entry.mask, &mut positions);
                    if positions.is_empty() {
                        continue;
                    }
                    let element = GridElement {
                        mask: entry.mask,
                        row,
                        column,
                        order,
                        positions,
                    };
                    if elements.push(element).is_err() {
                        break;
                    }
                    order = order.saturating_add(1);
                }
            }
        }

        let mut levers = Vec::new();
        for direction in mask::DIRECTIONS {
            let mut positions = Vec::new();
            collect_positions(pixels, direction, &mut positions);
            if positions.is_empty() {
                continue;
            }
            if levers.push(LeverGroup {
                mask: direction,
                positions,
            })
            .is_err()
            {
                break;
            }
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[GridLayout.discover] {:?}: {} elements, {} lever groups",
            preset,
            elements.len(),
            levers.len()
        );

        Self {
            elements,
            levers,
            columns: preset.columns(),
        }
    }

    pub fn elements(&self) -> &[GridElement] {
        &self.elements
    }

    pub fn levers(&self) -> &[LeverGroup] {
        &self.levers
    }

    /// Number of columns along the sweep axis
    pub const fn columns(&self) -> u8 {
        self.columns
    }
}

/// Gather the in-frame positions of every present pixel carrying `target`
///
/// The result is sorted and free of duplicates, so the pixel report order
/// never leaks into the layout.
fn collect_positions<const N: usize>(pixels: &[Pixel], target: u32, out: &mut Vec<u8, N>) {
    for pixel in pixels {
        if pixel.mask != target || !pixel.is_present() {
            continue;
        }
        for &position in &pixel.positions {
            if usize::from(position) >= FRAME_SIZE || out.contains(&position) {
                continue;
            }
            if out.push(position).is_err() {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[GridLayout.discover] mask {:#x}: position {} dropped",
                    target, position
                );
                break;
            }
        }
    }
    out.sort_unstable();
}
