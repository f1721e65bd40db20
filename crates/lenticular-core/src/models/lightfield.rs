use serde::{Deserialize, Serialize};

use super::{LenticularSheet, ScreenGeometry};

/// Resolution of the light field a screen + lens sheet pair can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightfieldResolution {
    /// Number of whole lenslets spanning the screen width.
    pub spatial_res: u32,
    /// Number of pixel columns (views) under a single lenslet.
    pub angular_res: u32,
}

impl LightfieldResolution {
    /// Count the lenses across the screen and the pixels under each.
    ///
    /// `spatial_res = floor(width_mm / lens_width)` drops a trailing partial
    /// lens; `angular_res = round(dots_per_mm * lens_width)`.
    pub fn compute(screen: &ScreenGeometry, sheet: &LenticularSheet) -> Self {
        let spatial = (screen.width_mm() / sheet.lens_width).floor();
        let angular = (screen.dots_per_mm * sheet.lens_width).round();

        // Both inputs are validated positive; the casts saturate on overflow.
        Self {
            spatial_res: spatial.max(0.0) as u32,
            angular_res: angular.max(0.0) as u32,
        }
    }
}
