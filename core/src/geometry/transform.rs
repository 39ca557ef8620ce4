//! Transformations

use super::{Dot, Matrix4x4, Normal3f, Point3f, Ray, Vector3f};
use crate::pbrt::*;
use std::ops::Mul;
use std::sync::Arc;

/// A transformation for mapping from points to points and vectors to vectors.
/// The inverse is carried along so that normals and inverse mappings never
/// require a general matrix inversion.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse transformation matrix.
    pub m_inv: Matrix4x4,
}

/// Atomic reference counted `Transform`.
pub type ArcTransform = Arc<Transform>;

impl Transform {
    /// The identity transformation.
    pub const IDENTITY: Self = Self {
        m: Matrix4x4::IDENTITY,
        m_inv: Matrix4x4::IDENTITY,
    };

    /// Create a transformation representing a translation.
    ///
    /// * `delta` -  Translation.
    #[rustfmt::skip]
    pub fn translate(delta: &Vector3f) -> Self {
        Self {
            m: Matrix4x4::new([
                [1.0, 0.0, 0.0, delta.x],
                [0.0, 1.0, 0.0, delta.y],
                [0.0, 0.0, 1.0, delta.z],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            m_inv: Matrix4x4::new([
                [1.0, 0.0, 0.0, -delta.x],
                [0.0, 1.0, 0.0, -delta.y],
                [0.0, 0.0, 1.0, -delta.z],
                [0.0, 0.0, 0.0,  1.0],
            ]),
        }
    }

    /// Create a transformation representing a non-uniform scale. Scale
    /// factors must be non-zero.
    ///
    /// * `x` - Scale factor along x-axis.
    /// * `y` - Scale factor along y-axis.
    /// * `z` - Scale factor along z-axis.
    #[rustfmt::skip]
    pub fn scale(x: Float, y: Float, z: Float) -> Self {
        Self {
            m: Matrix4x4::new([
                [x,   0.0, 0.0, 0.0],
                [0.0, y,   0.0, 0.0],
                [0.0, 0.0, z,   0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            m_inv: Matrix4x4::new([
                [1.0 / x, 0.0,     0.0,     0.0],
                [0.0,     1.0 / y, 0.0,     0.0],
                [0.0,     0.0,     1.0 / z, 0.0],
                [0.0,     0.0,     0.0,     1.0],
            ]),
        }
    }

    /// Create a transformation representing a rotation about the x-axis.
    ///
    /// * `theta` - Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_x(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = Matrix4x4::new([
            [1.0, 0.0,        0.0,       0.0],
            [0.0, cos_theta, -sin_theta, 0.0],
            [0.0, sin_theta,  cos_theta, 0.0],
            [0.0, 0.0,        0.0,       1.0],
        ]);
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing a rotation about the y-axis.
    ///
    /// * `theta` - Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_y(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = Matrix4x4::new([
            [ cos_theta, 0.0, sin_theta, 0.0],
            [ 0.0,       1.0, 0.0,       0.0],
            [-sin_theta, 0.0, cos_theta, 0.0],
            [ 0.0,       0.0, 0.0,       1.0],
        ]);
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing a rotation about the z-axis.
    ///
    /// * `theta` - Angle in degrees.
    #[rustfmt::skip]
    pub fn rotate_z(theta: Float) -> Self {
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();
        let m = Matrix4x4::new([
            [cos_theta, -sin_theta, 0.0, 0.0],
            [sin_theta,  cos_theta, 0.0, 0.0],
            [0.0,        0.0,       1.0, 0.0],
            [0.0,        0.0,       0.0, 1.0],
        ]);
        Self { m, m_inv: m.transpose() }
    }

    /// Create a transformation representing a rotation about an arbitrary
    /// axis.
    ///
    /// * `theta` - Angle in degrees.
    /// * `axis`  - The axis of rotation.
    pub fn rotate_axis(theta: Float, axis: &Vector3f) -> Self {
        let a = axis.normalize();
        let (sin_theta, cos_theta) = theta.to_radians().sin_cos();

        let mut m = Matrix4x4::IDENTITY;

        // Compute rotation of first basis vector
        m.m[0][0] = a.x * a.x + (1.0 - a.x * a.x) * cos_theta;
        m.m[0][1] = a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta;
        m.m[0][2] = a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta;

        // Compute rotations of second and third basis vectors
        m.m[1][0] = a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta;
        m.m[1][1] = a.y * a.y + (1.0 - a.y * a.y) * cos_theta;
        m.m[1][2] = a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta;

        m.m[2][0] = a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta;
        m.m[2][1] = a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta;
        m.m[2][2] = a.z * a.z + (1.0 - a.z * a.z) * cos_theta;

        Self {
            m,
            m_inv: m.transpose(),
        }
    }

    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Self {
        Self {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Returns `true` if this is the identity transformation.
    pub fn is_identity(&self) -> bool {
        self.m == Matrix4x4::IDENTITY
    }

    /// Applies transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let m = &self.m;
        let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
        let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
        let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
        let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];

        debug_assert!(wp != 0.0, "Transform::transform_point: wp is zero");

        if wp == 1.0 {
            Point3f::new(xp, yp, zp)
        } else {
            Point3f::new(xp, yp, zp) / wp
        }
    }

    /// Returns the transformed point and absolute error due to applying the
    /// transformation to a point.
    ///
    /// * `p` - The point.
    pub fn transform_point_with_error(&self, p: &Point3f) -> (Point3f, Vector3f) {
        let m = &self.m;

        let x_abs_sum = (m[0][0] * p.x).abs() + (m[0][1] * p.y).abs() + (m[0][2] * p.z).abs() + m[0][3].abs();
        let y_abs_sum = (m[1][0] * p.x).abs() + (m[1][1] * p.y).abs() + (m[1][2] * p.z).abs() + m[1][3].abs();
        let z_abs_sum = (m[2][0] * p.x).abs() + (m[2][1] * p.y).abs() + (m[2][2] * p.z).abs() + m[2][3].abs();

        (
            self.transform_point(p),
            gamma(3) * Vector3f::new(x_abs_sum, y_abs_sum, z_abs_sum),
        )
    }

    /// Using the original point passed to `transform_point` and its own
    /// absolute error returns the absolute error in the result.
    ///
    /// * `p`       - The point.
    /// * `p_error` - The absolute error already carried by `p`.
    pub fn transform_point_abs_error(&self, p: &Point3f, p_error: &Vector3f) -> Vector3f {
        let m = &self.m;
        let gamma_3 = gamma(3);

        let row_error = |i: usize| {
            (gamma_3 + 1.0)
                * (m[i][0].abs() * p_error.x + m[i][1].abs() * p_error.y + m[i][2].abs() * p_error.z)
                + gamma_3
                    * ((m[i][0] * p.x).abs() + (m[i][1] * p.y).abs() + (m[i][2] * p.z).abs() + m[i][3].abs())
        };

        Vector3f::new(row_error(0), row_error(1), row_error(2))
    }

    /// Applies transformation to a given vector.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let m = &self.m;
        Vector3f::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Applies transformation to a given normal using the inverse transpose.
    ///
    /// * `n` - The normal.
    pub fn transform_normal(&self, n: &Normal3f) -> Normal3f {
        let m_inv = &self.m_inv;
        Normal3f::new(
            m_inv[0][0] * n.x + m_inv[1][0] * n.y + m_inv[2][0] * n.z,
            m_inv[0][1] * n.x + m_inv[1][1] * n.y + m_inv[2][1] * n.z,
            m_inv[0][2] * n.x + m_inv[1][2] * n.y + m_inv[2][2] * n.z,
        )
    }

    /// Applies transformation to a given ray. The origin is offset to the
    /// edge of its error bounds.
    ///
    /// * `r` - The ray.
    pub fn transform_ray(&self, r: &Ray) -> Ray {
        let (mut o, o_error) = self.transform_point_with_error(&r.o);
        let d = self.transform_vector(&r.d);

        // Offset ray origin to edge of error bounds and compute t_max.
        let length_squared = d.length_squared();
        let mut t_max = r.t_max;
        if length_squared > 0.0 {
            let dt = d.abs().dot(&o_error) / length_squared;
            o += d * dt;
            t_max -= dt;
        }

        Ray::new(o, d, t_max, r.time, r.medium.clone())
    }

    /// Returns `true` if the transformation changes the handedness of the
    /// coordinate system.
    pub fn swaps_handedness(&self) -> bool {
        let m = &self.m;
        let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
        det < 0.0
    }
}

impl Mul<Transform> for Transform {
    type Output = Self;

    /// Composes this transformation with another one. The result applies
    /// `rhs` first and then `self`.
    ///
    /// * `rhs` - The transformation to compose.
    fn mul(self, rhs: Self) -> Self {
        Self {
            m: self.m * rhs.m,
            m_inv: rhs.m_inv * self.m_inv,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
