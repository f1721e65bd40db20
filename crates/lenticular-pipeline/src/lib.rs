//! Per-frame calibration state for lenticular displays.
//!
//! [`CalibrationState`] owns the snapshots derived by `lenticular-core` and
//! hands read-only views of them to a rendering backend:
//!
//! ```no_run
//! use lenticular_core::{CalibrationConfig, Mat4};
//! use lenticular_pipeline::CalibrationState;
//! # fn main() -> anyhow::Result<()> {
//! let mut config = CalibrationConfig {
//!     test_projection: true,
//!     ..Default::default()
//! };
//! let mut state = CalibrationState::new(config)?;
//!
//! loop {
//!     // The control surface edits `config` between frames.
//!     config.viewpoint.x = 0.1;
//!     state.tick(&config);
//!
//!     let uniforms = state.uniforms(&config, &Mat4::identity());
//!     // bind `uniforms` and `state.snapshot().view_map` in the backend
//!     # let _ = uniforms;
//!     # break;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Invalid edits never tear down a running session: the last valid snapshot
//! stays active and the error is logged once.

mod report;
mod state;
mod types;
mod uniforms;

pub use report::{DiagnosticReport, ReportSection};
pub use state::{compute_projection, CalibrationSnapshot, CalibrationState};
pub use types::{current_timestamp, LogEntry, LogEvent, RefreshOutcome, Stage, TickOutcome};
pub use uniforms::ShaderUniforms;
