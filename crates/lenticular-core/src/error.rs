use thiserror::Error;

use crate::Real;

/// Invalid calibration input.
///
/// Every model validates its own inputs and reports violations with this type.
/// The pipeline decides whether an error is fatal (first computation) or only
/// logged (subsequent frames).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("screen resolution must be positive, got {h_res}x{v_res}")]
    NonPositiveResolution { h_res: u32, v_res: u32 },
    #[error("screen diagonal must be a positive number of inches, got {0}")]
    NonPositiveDiagonal(Real),
    #[error("lenticular density must be a positive number of lines per inch, got {0}")]
    NonPositiveLensPitch(Real),
    #[error("lenticular offset must lie in [0, 1), got {0}")]
    OffsetOutOfRange(Real),
    #[error("lenticular thickness must be a non-negative number of millimeters, got {0}")]
    NegativeThickness(Real),
    #[error("upscale factor must be at least 1, got {0}")]
    ZeroUpscale(u32),
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: Real, far: Real },
    #[error("screen corners do not span a plane")]
    DegenerateCorners,
    #[error("viewpoint must be in front of the screen plane, distance is {distance}")]
    ViewpointBehindScreen { distance: Real },
}
