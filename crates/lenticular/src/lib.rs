//! High-level entry crate for the `lenticular` calibration toolbox.
//!
//! Calibrating a lenticular display means answering two questions:
//! which physical lens and which view every pixel column belongs to, and
//! which projection renders the scene correctly for a viewer who is not
//! centred in front of the panel.
//!
//! ## 1. Frame-loop API
//!
//! Use [`CalibrationState`](prelude::CalibrationState) when parameters are
//! edited live (sliders, config reloads) and the derived state has to follow:
//!
//! ```no_run
//! use lenticular::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = CalibrationConfig::default();
//! let mut state = CalibrationState::new(config)?;
//!
//! // Every frame: apply edits, then refresh.
//! config.lines_per_inch = 40.0;
//! let outcome = state.tick(&config);
//! println!("calibration: {:?}", outcome.calibration);
//!
//! let uniforms = state.uniforms(&config, &Mat4::identity());
//! println!("{}", serde_json::to_string_pretty(&uniforms)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## 2. Building Blocks
//!
//! Each model is a pure function of its inputs and can be used on its own:
//!
//! ```
//! use lenticular::core::{LenticularSheet, LightfieldResolution, ScreenGeometry, ViewMapper};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let screen = ScreenGeometry::compute(1024, 768, 15.4)?;
//! let sheet = LenticularSheet::compute(30.0, 0.5, 5.0)?;
//! let lightfield = LightfieldResolution::compute(&screen, &sheet);
//! assert_eq!(lightfield.spatial_res, 369);
//!
//! let mapper = ViewMapper::new(&screen, &sheet, &lightfield, 1)?;
//! let entry = mapper.entry(0);
//! assert_eq!((entry.lens, entry.view), (0, 1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - **[`core`]**: Units, error types, screen, lens sheet, light field,
//!   view map and off-axis projection models
//! - **[`pipeline`]**: Frame-loop state, diagnostic report, shader uniforms
//! - **[`prelude`]**: Convenient re-exports for common use cases

/// Geometry models and math primitives.
pub mod core {
    pub use lenticular_core::*;
}

/// Frame-loop calibration state, reports and shader uniforms.
pub mod pipeline {
    pub use lenticular_pipeline::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use lenticular::prelude::*;` to get started quickly.
pub mod prelude {
    pub use crate::core::{
        lens_stripes, CalibrationConfig, ConfigurationError, LenticularSheet,
        LightfieldResolution, Mat4, OffAxisProjection, ProjectionMode, Pt3, Real,
        ScreenGeometry, ViewIndexPolicy, ViewMap, ViewMapper,
    };

    pub use crate::pipeline::{
        CalibrationSnapshot, CalibrationState, DiagnosticReport, RefreshOutcome, ShaderUniforms,
        TickOutcome,
    };
}
