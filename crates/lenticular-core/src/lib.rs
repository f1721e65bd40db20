//! Core geometry for calibrating lenticular (autostereoscopic) displays.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`, `Pt3`, `Mat4`) and unit conversions,
//! - the physical display models (screen, lens sheet, light field),
//! - the per-column pixel → (lens, view) mapper used for interlacing,
//! - the generalized off-axis projector for head-coupled rendering.
//!
//! Calibration chain:
//! `config → screen → lens sheet → light field → view map`
//!
//! The projector depends only on the screen corners and the viewer position:
//! `clip = frustum · basis · translate(-eye) · world`
//!
//! Every model is a pure function of its inputs. Nothing here holds per-frame
//! state; see `lenticular-pipeline` for the frame-to-frame owner.

/// Configuration errors shared by every model.
pub mod error;
/// Linear algebra type aliases and unit conversions.
pub mod math;
/// Display, lens-sheet and projection models.
pub mod models;

pub use error::*;
pub use math::*;
pub use models::*;
