use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, Real, MM_PER_INCH};

/// Optical parameters of a lenticular lens sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LenticularSheet {
    pub lines_per_inch: Real,
    pub lines_per_mm: Real,
    /// Width of a single lenslet in millimeters.
    pub lens_width: Real,
    /// Fraction of a lens the sheet is shifted from the screen's left edge.
    pub offset: Real,
    /// Sheet thickness in millimeters; `0` when unknown.
    ///
    /// Not consumed by the interlacing math yet; carried for refraction models.
    pub thickness: Real,
}

impl LenticularSheet {
    /// Derive the lens pitch from the sheet's lines per inch.
    ///
    /// `lines_per_mm = lpi / 25.4` and `lens_width = 1 / lines_per_mm`. Offset
    /// and thickness are stored unchanged.
    ///
    /// # Errors
    ///
    /// Non-positive or non-finite `lines_per_inch`, an offset outside
    /// `[0, 1)`, or a negative or non-finite thickness.
    pub fn compute(
        lines_per_inch: Real,
        offset: Real,
        thickness: Real,
    ) -> Result<Self, ConfigurationError> {
        if !(lines_per_inch.is_finite() && lines_per_inch > 0.0) {
            return Err(ConfigurationError::NonPositiveLensPitch(lines_per_inch));
        }
        if !(0.0..1.0).contains(&offset) {
            return Err(ConfigurationError::OffsetOutOfRange(offset));
        }
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(ConfigurationError::NegativeThickness(thickness));
        }

        let lines_per_mm = lines_per_inch / MM_PER_INCH;
        Ok(Self {
            lines_per_inch,
            lines_per_mm,
            lens_width: 1.0 / lines_per_mm,
            offset,
            thickness,
        })
    }
}
