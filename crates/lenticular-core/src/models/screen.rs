use serde::{Deserialize, Serialize};

use crate::{inches_to_mm, mm_to_world, ConfigurationError, Pt3, Real};

/// Three corners of the physical screen in screen-local world units.
///
/// The screen midpoint is the origin, `x` points right, `y` points up and the
/// screen lies in the `z = 0` plane. Bottom-left is the corner of the L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenCorners {
    pub bottom_left: Pt3,
    pub bottom_right: Pt3,
    pub top_left: Pt3,
}

impl ScreenCorners {
    /// Corners of a `width × height` rectangle (world units) centred on the origin.
    pub fn centered(width: Real, height: Real) -> Self {
        let hw = 0.5 * width;
        let hh = 0.5 * height;
        Self {
            bottom_left: Pt3::new(-hw, -hh, 0.0),
            bottom_right: Pt3::new(hw, -hh, 0.0),
            top_left: Pt3::new(-hw, hh, 0.0),
        }
    }
}

/// Physical geometry of a display derived from its resolution and diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    /// Horizontal resolution in pixels.
    pub h_res: u32,
    /// Vertical resolution in pixels.
    pub v_res: u32,
    /// Diagonal size in inches.
    pub diagonal: Real,
    /// Physical width in inches.
    pub width: Real,
    /// Physical height in inches.
    pub height: Real,
    pub dots_per_inch: Real,
    pub dots_per_mm: Real,
    pub corners: ScreenCorners,
}

impl ScreenGeometry {
    /// Derive the screen geometry, assuming square pixels.
    ///
    /// The diagonal is split along the resolution's aspect angle
    /// `atan2(v_res, h_res)`; the pixel density follows from the width.
    pub fn compute(h_res: u32, v_res: u32, diagonal: Real) -> Result<Self, ConfigurationError> {
        if h_res == 0 || v_res == 0 {
            return Err(ConfigurationError::NonPositiveResolution { h_res, v_res });
        }
        if !(diagonal.is_finite() && diagonal > 0.0) {
            return Err(ConfigurationError::NonPositiveDiagonal(diagonal));
        }

        let angle = Real::from(v_res).atan2(Real::from(h_res));
        let width = diagonal * angle.cos();
        let height = diagonal * angle.sin();
        let dots_per_inch = Real::from(h_res) / width;
        let dots_per_mm = dots_per_inch / crate::MM_PER_INCH;

        let corners = ScreenCorners::centered(
            mm_to_world(inches_to_mm(width)),
            mm_to_world(inches_to_mm(height)),
        );

        Ok(Self {
            h_res,
            v_res,
            diagonal,
            width,
            height,
            dots_per_inch,
            dots_per_mm,
            corners,
        })
    }

    /// Physical width in millimeters.
    pub fn width_mm(&self) -> Real {
        inches_to_mm(self.width)
    }

    /// Physical height in millimeters.
    pub fn height_mm(&self) -> Real {
        inches_to_mm(self.height)
    }
}
