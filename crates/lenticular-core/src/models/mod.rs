//! Display and projection models.
//!
//! The models form a chain, each a pure function of its predecessors:
//!
//! 1. [`ScreenGeometry`]: physical size, pixel density and corners.
//! 2. [`LenticularSheet`]: lens pitch and offset of the sheet.
//! 3. [`LightfieldResolution`]: lenses across the screen and views per lens.
//! 4. [`ViewMapper`]: per-column lens/view assignment.
//!
//! [`OffAxisProjection`] sits beside the chain and only needs the screen
//! corners. [`CalibrationConfig`] carries the inputs of all of them.

mod config;
mod lenticular;
mod lightfield;
mod projection;
mod screen;
mod stripes;
mod view_map;

pub use config::*;
pub use lenticular::*;
pub use lightfield::*;
pub use projection::*;
pub use screen::*;
pub use stripes::*;
pub use view_map::*;
