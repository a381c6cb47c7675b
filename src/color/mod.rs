mod blend;
mod utils;

use smart_leds::{RGB8, RGBW};

pub use blend::{Lerp, lerp, sine_weight, wheel4};
pub use utils::{BLACK, rgb_from_u32};

pub type Rgb = RGB8;
pub type Rgbw = RGBW<u8>;
