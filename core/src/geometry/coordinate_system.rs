//! 3-D Coordinate System

use super::Vector3f;
use crate::pbrt::*;

/// Create a new coordinate system from a single unit vector and return the
/// two remaining orthonormal vectors.
///
/// A second vector is constructing from the first by zeroing one of the
/// coordinates and swapping the remaining 2 and negating one of them. This
/// vector is also normalized.
///
/// The third vector is the cross product of the give vector and the second
/// vector. Since both these are normalized, the third vector will be a unit
/// vector.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if v1.x.abs() > v1.y.abs() {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };

    let v3 = v1.cross(&v2);

    (v2, v3)
}

/// Converts a (θ, φ) pair to a unit (x, y, z) vector.
///
/// * `sin_theta` - Sine of θ.
/// * `cos_theta` - Cosine of θ.
/// * `phi`       - φ.
pub fn spherical_direction(sin_theta: Float, cos_theta: Float, phi: Float) -> Vector3f {
    Vector3f::new(
        clamp(sin_theta, -1.0, 1.0) * phi.cos(),
        clamp(sin_theta, -1.0, 1.0) * phi.sin(),
        clamp(cos_theta, -1.0, 1.0),
    )
}

/// Converts a (θ, φ) pair to a direction expressed in the frame given by
/// three basis vectors.
///
/// * `sin_theta` - Sine of θ.
/// * `cos_theta` - Cosine of θ.
/// * `phi`       - φ.
/// * `x`         - Basis vector for x-axis.
/// * `y`         - Basis vector for y-axis.
/// * `z`         - Basis vector for z-axis.
pub fn spherical_direction_in_coord_frame(
    sin_theta: Float,
    cos_theta: Float,
    phi: Float,
    x: &Vector3f,
    y: &Vector3f,
    z: &Vector3f,
) -> Vector3f {
    sin_theta * phi.cos() * *x + sin_theta * phi.sin() * *y + cos_theta * *z
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::common::Dot;
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn from_unit_x_axis() {
        let (v2, v3) = coordinate_system(&Vector3f::new(1.0, 0.0, 0.0));
        assert!(v2 == Vector3f::new(0.0, 0.0, 1.0));
        assert!(v3 == Vector3f::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn spherical_direction_poles() {
        assert_eq!(spherical_direction(0.0, 1.0, 0.0), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(spherical_direction(0.0, -1.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
    }

    prop_vector3!(
        vector3_f32,
        -1.0..1.0f32,
        -1.0..1.0f32,
        -1.0..1.0f32
    );

    proptest! {
        #[test]
        fn orthonormal_basis(v in vector3_f32().prop_filter("non-zero", |v| v.length() > 0.01)) {
            let v1 = v.normalize();
            let (v2, v3) = coordinate_system(&v1);
            prop_assert!(approx_eq!(f32, v2.length(), 1.0, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, v3.length(), 1.0, epsilon = 0.0001));
            prop_assert!(v1.dot(&v2).abs() < 0.0001);
            prop_assert!(v1.dot(&v3).abs() < 0.0001);
            prop_assert!(v2.dot(&v3).abs() < 0.0001);
        }

        #[test]
        fn coord_frame_matches_local(cos_theta in -1.0..1.0f32, phi in 0.0..TWO_PI) {
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let x = Vector3f::new(1.0, 0.0, 0.0);
            let y = Vector3f::new(0.0, 1.0, 0.0);
            let z = Vector3f::new(0.0, 0.0, 1.0);
            let a = spherical_direction(sin_theta, cos_theta, phi);
            let b = spherical_direction_in_coord_frame(sin_theta, cos_theta, phi, &x, &y, &z);
            prop_assert!(approx_eq!(f32, a.x, b.x, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, a.y, b.y, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, a.z, b.z, epsilon = 0.0001));
        }
    }
}
