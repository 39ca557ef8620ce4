//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;

/// Uniformly sample a direction on a hemisphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_hemisphere(u: &Point2f) -> Vector3f {
    let z = u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a hemisphere.
#[inline]
pub fn uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Uniformly sample a point on the unit disk using polar coordinates.
///
/// * `u` - The random sample point.
pub fn uniform_sample_disk(u: &Point2f) -> Point2f {
    let r = u[0].sqrt();
    let theta = TWO_PI * u[1];
    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let (ox, oy) = (2.0 * u[0] - 1.0, 2.0 * u[1] - 1.0);

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::default();
    }

    // Apply concentric mapping to point
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Uniformly sample a direction from a cone of directions about the `(0, 0, 1)`
/// axis.
///
/// * `u`             - The random sample point.
/// * `cos_theta_max` - Cosine of the maximum angle of the beam.
pub fn uniform_sample_cone(u: &Point2f, cos_theta_max: Float) -> Vector3f {
    let cos_theta = (1.0 - u[0]) + u[0] * cos_theta_max;
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let phi = u[1] * TWO_PI;
    Vector3f::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
}

/// Returns the PDF for sampling a direction from a cone of directions.
///
/// * `cos_theta_max` - Cosine of the maximum angle of the beam.
#[inline]
pub fn uniform_cone_pdf(cos_theta_max: Float) -> Float {
    1.0 / (TWO_PI * (1.0 - cos_theta_max))
}

/// Sample a direction on a hemisphere using cosine-weighted sampling.
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine term of incident radiance.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

/// Weight samples using the power heuristic.
///
/// * `nf`    - Number of samples taken from `f_pdf`.
/// * `f_pdf` - First sampling distribution.
/// * `ng`    - Number of samples taken from `g_pdf`.
/// * `g_pdf` - Second sampling distribution.
#[inline]
pub fn power_heuristic(nf: Int, f_pdf: Float, ng: Int, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    (f * f) / (f * f + g * g)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use crate::prop_point2;
    use proptest::prelude::*;

    #[test]
    fn concentric_center() {
        assert_eq!(concentric_sample_disk(&Point2f::new(0.5, 0.5)), Point2f::default());
    }

    #[test]
    fn power_heuristic_symmetric() {
        assert!(approx_eq!(f32, power_heuristic(1, 0.5, 1, 0.5), 0.5, epsilon = 0.00001));
    }

    prop_point2!(point2_u, 0.0..1.0f32, 0.0..1.0f32);

    proptest! {
        #[test]
        fn concentric_disk_inside_unit_circle(u in point2_u()) {
            let p = concentric_sample_disk(&u);
            prop_assert!(p.x * p.x + p.y * p.y <= 1.0 + 1e-5);
        }

        #[test]
        fn uniform_disk_inside_unit_circle(u in point2_u()) {
            let p = uniform_sample_disk(&u);
            prop_assert!(p.x * p.x + p.y * p.y <= 1.0 + 1e-5);
        }

        #[test]
        fn cosine_hemisphere_is_unit_upper(u in point2_u()) {
            let w = cosine_sample_hemisphere(&u);
            prop_assert!(w.z >= 0.0);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 0.001));
        }

        #[test]
        fn uniform_sphere_is_unit(u in point2_u()) {
            let w = uniform_sample_sphere(&u);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 0.001));
        }

        #[test]
        fn uniform_hemisphere_is_unit_upper(u in point2_u()) {
            let w = uniform_sample_hemisphere(&u);
            prop_assert!(w.z >= 0.0);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 0.001));
        }

        #[test]
        fn cone_stays_inside(u in point2_u(), cos_theta_max in 0.0..0.999f32) {
            let w = uniform_sample_cone(&u, cos_theta_max);
            prop_assert!(w.z >= cos_theta_max - 1e-5);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 0.001));
            prop_assert!(uniform_cone_pdf(cos_theta_max) >= INV_TWO_PI);
        }
    }
}
