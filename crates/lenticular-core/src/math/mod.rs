//! Mathematical utilities and type definitions.
//!
//! This module provides fundamental types used throughout the library
//! and the unit conversions between inches, millimeters and world units.

use nalgebra::{Matrix4, Point3, Vector3};

pub mod units;

pub use units::{inches_to_mm, mm_to_inches, mm_to_world, MM_PER_INCH, MM_PER_WORLD_UNIT};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;

/// Normalize `v`, returning `None` for (near) zero-length vectors.
pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
    v.try_normalize(Real::EPSILON)
}

/// Convert a matrix to column-major `f32` columns, the layout GL uniforms expect.
pub fn to_f32_columns(m: &Mat4) -> [[f32; 4]; 4] {
    let mut cols = [[0.0f32; 4]; 4];
    for (c, col) in cols.iter_mut().enumerate() {
        for (r, value) in col.iter_mut().enumerate() {
            *value = m[(r, c)] as f32;
        }
    }
    cols
}
