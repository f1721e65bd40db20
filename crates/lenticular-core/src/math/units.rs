//! Length unit conversions.
//!
//! Display sizes come in inches, lens sheets are characterised in millimeters,
//! and the rendering side works in world units of one meter.

use super::Real;

/// Millimeters per inch.
pub const MM_PER_INCH: Real = 25.4;

/// Millimeters per world unit (world space is expressed in meters).
pub const MM_PER_WORLD_UNIT: Real = 1000.0;

/// Convert inches to millimeters.
pub fn inches_to_mm(inches: Real) -> Real {
    inches * MM_PER_INCH
}

/// Convert millimeters to inches.
pub fn mm_to_inches(mm: Real) -> Real {
    mm / MM_PER_INCH
}

/// Convert millimeters to world units.
pub fn mm_to_world(mm: Real) -> Real {
    mm / MM_PER_WORLD_UNIT
}
