use serde::{Deserialize, Serialize};

use super::{ClipPlanes, LenticularSheet, ProjectionMode, ScreenGeometry, ViewIndexPolicy};
use crate::{ConfigurationError, Pt3, Real};

/// Viewer placement assumed when no tracked position is supplied.
pub const DEFAULT_VIEWPOINT: [Real; 3] = [0.0, 0.0, 1.5];

/// Every input of a calibration run, decoupled from whatever control surface
/// produces it.
///
/// Missing JSON fields fall back to [`CalibrationConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub h_res: u32,
    pub v_res: u32,
    /// Screen diagonal in inches.
    pub screen_diagonal: Real,
    pub lines_per_inch: Real,
    pub lens_offset: Real,
    /// Sheet thickness in millimeters.
    pub lens_thickness: Real,
    pub upscale: u32,
    pub near_clip: Real,
    pub far_clip: Real,
    /// Viewer position relative to the screen centre, world units.
    pub viewpoint: Pt3,
    pub projection_mode: ProjectionMode,
    pub view_index_policy: ViewIndexPolicy,
    /// Reuse the previous snapshot instead of recomputing.
    pub lock_params: bool,
    /// Recompute the off-axis projection every tick.
    pub test_projection: bool,
    /// Hand `viewpoint` to the shaders instead of the default placement.
    pub fake_placement: bool,
    /// Spread views by viewer position (positional interlacing).
    pub spread_x: bool,
    /// Log the diagnostic report after every recomputation.
    pub debug_print: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            h_res: 1024,
            v_res: 768,
            screen_diagonal: 15.4,
            lines_per_inch: 30.0,
            lens_offset: 0.5,
            lens_thickness: 5.0,
            upscale: 1,
            near_clip: 2.0,
            far_clip: 10.0,
            viewpoint: Pt3::from(DEFAULT_VIEWPOINT),
            projection_mode: ProjectionMode::default(),
            view_index_policy: ViewIndexPolicy::default(),
            lock_params: false,
            test_projection: false,
            fake_placement: false,
            spread_x: false,
            debug_print: false,
        }
    }
}

impl CalibrationConfig {
    pub fn screen(&self) -> Result<ScreenGeometry, ConfigurationError> {
        ScreenGeometry::compute(self.h_res, self.v_res, self.screen_diagonal)
    }

    pub fn sheet(&self) -> Result<LenticularSheet, ConfigurationError> {
        LenticularSheet::compute(self.lines_per_inch, self.lens_offset, self.lens_thickness)
    }

    pub fn clip_planes(&self) -> Result<ClipPlanes, ConfigurationError> {
        ClipPlanes::new(self.near_clip, self.far_clip)
    }

    /// Viewpoint after applying the projection mode.
    pub fn effective_viewpoint(&self) -> Pt3 {
        self.projection_mode.effective_viewpoint(&self.viewpoint)
    }

    /// Validate every scalar parameter without building the view map.
    ///
    /// Viewpoint placement is checked by the projector, since it depends on
    /// the screen corners.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.screen()?;
        self.sheet()?;
        self.clip_planes()?;
        if self.upscale == 0 {
            return Err(ConfigurationError::ZeroUpscale(self.upscale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = CalibrationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.viewpoint, Pt3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let json = r#"{
            "h_res": 1920,
            "v_res": 1080,
            "projection_mode": "simple",
            "view_index_policy": "wrap",
            "viewpoint": [0.2, 0.0, 2.0]
        }"#;
        let cfg: CalibrationConfig = serde_json::from_str(json).expect("serde should succeed");
        assert_eq!(cfg.h_res, 1920);
        assert_eq!(cfg.lines_per_inch, 30.0);
        assert_eq!(cfg.projection_mode, ProjectionMode::Simple);
        assert_eq!(cfg.view_index_policy, ViewIndexPolicy::Wrap);
        assert_eq!(cfg.effective_viewpoint(), Pt3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn validate_reports_first_violation() {
        let cfg = CalibrationConfig {
            upscale: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigurationError::ZeroUpscale(0)));

        let cfg = CalibrationConfig {
            near_clip: 5.0,
            far_clip: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigurationError::InvalidClipPlanes { .. })
        ));
    }
}
