//! Flat uniform bundle for the interlacing shaders.
//!
//! Field names serialize to the GLSL uniform names the shaders declare, so a
//! backend can bind them by iterating the JSON object or by hand.

use lenticular_core::{to_f32_columns, CalibrationConfig, Mat4, Pt3, DEFAULT_VIEWPOINT};
use serde::{Deserialize, Serialize};

use crate::CalibrationSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaderUniforms {
    /// `(angular_res, spatial_res)`.
    #[serde(rename = "_resAngSpat")]
    pub res_ang_spat: [f32; 2],
    #[serde(rename = "_screenDPMM")]
    pub screen_dpmm: f32,
    /// Screen resolution in pixels.
    #[serde(rename = "_res")]
    pub res: [f32; 2],
    #[serde(rename = "_upscale")]
    pub upscale: i32,
    /// `(lens_width_mm, offset, thickness_mm)`.
    #[serde(rename = "_lentWidthOff")]
    pub lens_width_offset_thickness: [f32; 3],
    #[serde(rename = "_viewPos")]
    pub view_pos: [f32; 3],
    /// `1` enables position-based interlacing.
    #[serde(rename = "_positional")]
    pub positional: i32,
    /// Column-major model-view-projection matrix.
    #[serde(rename = "_modelViewProjection")]
    pub model_view_projection: [[f32; 4]; 4],
}

impl ShaderUniforms {
    /// Assemble the uniforms; `mvp` is the full clip-from-model matrix.
    pub fn new(snapshot: &CalibrationSnapshot, config: &CalibrationConfig, mvp: &Mat4) -> Self {
        let screen = &snapshot.screen;
        let sheet = &snapshot.sheet;
        let lf = &snapshot.lightfield;

        let placement = if config.fake_placement {
            config.viewpoint
        } else {
            Pt3::from(DEFAULT_VIEWPOINT)
        };

        Self {
            res_ang_spat: [lf.angular_res as f32, lf.spatial_res as f32],
            screen_dpmm: screen.dots_per_mm as f32,
            res: [screen.h_res as f32, screen.v_res as f32],
            upscale: snapshot.view_map.upscale as i32,
            lens_width_offset_thickness: [
                sheet.lens_width as f32,
                sheet.offset as f32,
                sheet.thickness as f32,
            ],
            view_pos: [placement.x as f32, placement.y as f32, placement.z as f32],
            positional: i32::from(config.spread_x),
            model_view_projection: to_f32_columns(mvp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CalibrationSnapshot {
        CalibrationSnapshot::compute(&CalibrationConfig::default()).unwrap()
    }

    #[test]
    fn uniforms_mirror_snapshot() {
        let config = CalibrationConfig::default();
        let u = ShaderUniforms::new(&snapshot(), &config, &Mat4::identity());
        assert_eq!(u.res_ang_spat, [3.0, 369.0]);
        assert_eq!(u.res, [1024.0, 768.0]);
        assert_eq!(u.upscale, 1);
        assert_eq!(u.positional, 0);
        assert_eq!(u.view_pos, [0.0, 0.0, 1.5]);
        assert_eq!(u.lens_width_offset_thickness[1], 0.5);
        assert_eq!(u.model_view_projection[2], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn fake_placement_uses_viewpoint() {
        let config = CalibrationConfig {
            fake_placement: true,
            spread_x: true,
            viewpoint: Pt3::new(0.25, -0.5, 3.0),
            ..Default::default()
        };
        let u = ShaderUniforms::new(&snapshot(), &config, &Mat4::identity());
        assert_eq!(u.view_pos, [0.25, -0.5, 3.0]);
        assert_eq!(u.positional, 1);
    }

    #[test]
    fn serializes_to_glsl_names() {
        let u = ShaderUniforms::new(&snapshot(), &CalibrationConfig::default(), &Mat4::identity());
        let json = serde_json::to_value(u).unwrap();
        for name in [
            "_resAngSpat",
            "_screenDPMM",
            "_res",
            "_upscale",
            "_lentWidthOff",
            "_viewPos",
            "_positional",
            "_modelViewProjection",
        ] {
            assert!(json.get(name).is_some(), "missing {name}");
        }
    }
}
