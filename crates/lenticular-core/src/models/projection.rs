//! Generalized off-axis perspective projection.
//!
//! Given three corners of a physical screen and an eye position, builds the
//! matrix that maps world space into the clip space of an observer looking
//! through the screen as a window. Off-centre eyes get an asymmetric
//! frustum, which is what head-coupled and multi-view rendering need.
//!
//! `M = P(l, r, b, t, n, f) · R(vr, vu, vn) · T(-eye)`

use serde::{Deserialize, Serialize};

use super::ScreenCorners;
use crate::{try_normalize, ConfigurationError, Mat4, Pt3, Real, Vec3};

/// Near and far clip distances, validated `0 < near < far`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipPlanes {
    pub near: Real,
    pub far: Real,
}

impl ClipPlanes {
    pub fn new(near: Real, far: Real) -> Result<Self, ConfigurationError> {
        let valid = near.is_finite() && far.is_finite() && near > 0.0 && far > near;
        if !valid {
            return Err(ConfigurationError::InvalidClipPlanes { near, far });
        }
        Ok(Self { near, far })
    }
}

/// Near-plane extents of a perspective frustum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub left: Real,
    pub right: Real,
    pub bottom: Real,
    pub top: Real,
    pub near: Real,
    pub far: Real,
}

impl Frustum {
    /// OpenGL-style perspective matrix (`glFrustum` layout, right-handed, NDC z in [-1, 1]).
    pub fn matrix(&self) -> Mat4 {
        let Frustum {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;

        Mat4::new(
            2.0 * n / (r - l),
            0.0,
            (r + l) / (r - l),
            0.0,
            0.0,
            2.0 * n / (t - b),
            (t + b) / (t - b),
            0.0,
            0.0,
            0.0,
            -(f + n) / (f - n),
            -2.0 * f * n / (f - n),
            0.0,
            0.0,
            -1.0,
            0.0,
        )
    }

    /// `true` when the frustum is centred on its view axis within `tol`.
    pub fn is_symmetric(&self, tol: Real) -> bool {
        (self.left + self.right).abs() <= tol && (self.bottom + self.top).abs() <= tol
    }
}

/// Orthonormal basis of the screen plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBasis {
    pub right: Vec3,
    pub up: Vec3,
    /// Points out of the screen, towards the viewer.
    pub normal: Vec3,
}

impl ScreenBasis {
    pub fn from_corners(corners: &ScreenCorners) -> Result<Self, ConfigurationError> {
        let right = try_normalize(&(corners.bottom_right - corners.bottom_left))
            .ok_or(ConfigurationError::DegenerateCorners)?;
        let up = try_normalize(&(corners.top_left - corners.bottom_left))
            .ok_or(ConfigurationError::DegenerateCorners)?;
        let normal =
            try_normalize(&right.cross(&up)).ok_or(ConfigurationError::DegenerateCorners)?;
        Ok(Self { right, up, normal })
    }

    /// Rotation whose rows are `right`, `up`, `normal`.
    pub fn rotation(&self) -> Mat4 {
        let (r, u, n) = (&self.right, &self.up, &self.normal);
        Mat4::new(
            r.x, r.y, r.z, 0.0, //
            u.x, u.y, u.z, 0.0, //
            n.x, n.y, n.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

/// Which viewpoint the projector honours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// On-axis viewer: only the distance `z` of the viewpoint is used.
    Simple,
    /// Full head-coupled projection from the viewpoint as given.
    #[default]
    OffAxis,
}

impl ProjectionMode {
    /// Viewpoint actually fed to the projector.
    pub fn effective_viewpoint(self, viewpoint: &Pt3) -> Pt3 {
        match self {
            ProjectionMode::Simple => Pt3::new(0.0, 0.0, viewpoint.z),
            ProjectionMode::OffAxis => *viewpoint,
        }
    }
}

/// Result of the off-axis projector with its intermediate terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffAxisProjection {
    pub eye: Pt3,
    pub basis: ScreenBasis,
    /// Perpendicular distance from the eye to the screen plane.
    pub distance: Real,
    pub frustum: Frustum,
    pub projection: Mat4,
    pub rotation: Mat4,
    pub translation: Mat4,
    /// `projection · rotation · translation`.
    pub matrix: Mat4,
}

impl OffAxisProjection {
    pub fn compute(
        corners: &ScreenCorners,
        eye: &Pt3,
        clip: ClipPlanes,
    ) -> Result<Self, ConfigurationError> {
        let basis = ScreenBasis::from_corners(corners)?;

        let va = corners.bottom_left - *eye;
        let vb = corners.bottom_right - *eye;
        let vc = corners.top_left - *eye;

        let distance = -va.dot(&basis.normal);
        if distance.is_nan() || distance <= 0.0 {
            return Err(ConfigurationError::ViewpointBehindScreen { distance });
        }

        let scale = clip.near / distance;
        let frustum = Frustum {
            left: basis.right.dot(&va) * scale,
            right: basis.right.dot(&vb) * scale,
            bottom: basis.up.dot(&va) * scale,
            top: basis.up.dot(&vc) * scale,
            near: clip.near,
            far: clip.far,
        };

        let projection = frustum.matrix();
        let rotation = basis.rotation();
        let translation = Mat4::new_translation(&(-eye.coords));

        Ok(Self {
            eye: *eye,
            basis,
            distance,
            frustum,
            projection,
            rotation,
            translation,
            matrix: projection * rotation * translation,
        })
    }

    /// Project a world point to normalized device coordinates.
    ///
    /// Returns `None` for points on the eye plane (`w == 0`).
    pub fn project_point(&self, p: &Pt3) -> Option<Pt3> {
        let clip = self.matrix * p.to_homogeneous();
        if clip.w.abs() <= Real::EPSILON {
            return None;
        }
        Some(Pt3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
    }
}
