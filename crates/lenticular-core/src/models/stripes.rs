use serde::{Deserialize, Serialize};

use super::{LenticularSheet, ScreenGeometry};
use crate::{mm_to_inches, Real};

/// One bright stripe of the lens-pitch test pattern, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LensStripe {
    pub x: Real,
    pub width: Real,
}

/// Width of one lenslet in screen pixels.
pub fn lens_width_px(screen: &ScreenGeometry, sheet: &LenticularSheet) -> Real {
    mm_to_inches(sheet.lens_width) * Real::from(screen.h_res) / screen.width
}

/// Alternating lens-wide stripes across the screen, shifted by the sheet offset.
///
/// Held against the physical sheet, the pattern shows moiré when the
/// configured pitch or offset is off.
pub fn lens_stripes(screen: &ScreenGeometry, sheet: &LenticularSheet) -> Vec<LensStripe> {
    let width = lens_width_px(screen, sheet);
    let h_res = Real::from(screen.h_res);

    let mut stripes = Vec::new();
    let mut x = sheet.offset * width;
    while x < h_res {
        stripes.push(LensStripe { x, width });
        x += 2.0 * width;
    }
    stripes
}
