//! Disks

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;
use std::sync::Arc;

/// A disk or annulus perpendicular to the z-axis at a given height, facing
/// +z.
#[derive(Clone)]
pub struct Disk {
    /// Common shape data.
    pub data: Arc<ShapeData>,

    /// Height of disk along z-axis.
    pub height: Float,

    /// Radius of disk.
    pub radius: Float,

    /// Inner radius of the annulus.
    pub inner_radius: Float,

    /// Maximum spherical coordinate for Φ.
    pub phi_max: Float,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `object_to_world`     - The object to world transfomation.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    /// * `height`              - Height of disk along z-axis.
    /// * `radius`              - Radius of disk.
    /// * `inner_radius`        - Inner radius of the annulus.
    /// * `phi_max`             - Maximum spherical coordinate for Φ in degrees.
    pub fn new(
        object_to_world: ArcTransform,
        reverse_orientation: bool,
        height: Float,
        radius: Float,
        inner_radius: Float,
        phi_max: Float,
    ) -> Self {
        let radius = max(radius, 0.0);
        let inner_radius = if inner_radius > radius {
            warn!(
                "Disk inner radius {} exceeds radius {}. Clamping.",
                inner_radius, radius
            );
            radius
        } else {
            max(inner_radius, 0.0)
        };

        Self {
            data: Arc::new(ShapeData::new(object_to_world, reverse_orientation)),
            height,
            radius,
            inner_radius,
            phi_max: clamp(phi_max, 0.0, 360.0).to_radians(),
        }
    }

    /// Returns `true` if the disk is a complete circle without a hole.
    fn is_full(&self) -> bool {
        self.inner_radius == 0.0 && self.phi_max >= TWO_PI
    }

    /// Returns the hit point in object space for a local polar coordinate.
    fn object_point(&self, r: Float, phi: Float) -> Point3f {
        Point3f::new(r * phi.cos(), r * phi.sin(), self.height)
    }

    /// Returns a world space surface hit for a point on the disk in object
    /// space.
    ///
    /// * `p_obj` - Point on the disk in object space.
    /// * `time`  - Time of the hit.
    /// * `wo`    - Outgoing direction in world space.
    fn world_hit(&self, p_obj: &Point3f, time: Float, wo: Vector3f) -> Hit {
        let (p, p_error) = self.data.object_to_world.transform_point_with_error(p_obj);
        let n = self.data.orient_normal(&Normal3f::new(0.0, 0.0, 1.0));
        Hit::new(p, time, p_error, wo, n, None)
    }
}

impl Shape for Disk {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "disk"
    }

    /// Returns the underlying shape data.
    fn get_data(&self) -> Arc<ShapeData> {
        Arc::clone(&self.data)
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<Intersection> {
        // Transform ray to object space.
        let ray = self.data.world_to_object.transform_ray(r);

        // Reject disk intersections for rays parallel to the disk's plane.
        if ray.d.z == 0.0 {
            return None;
        }

        let t_shape_hit = (self.height - ray.o.z) / ray.d.z;
        if t_shape_hit <= 0.0 || t_shape_hit >= ray.t_max {
            return None;
        }

        // See if hit point is inside disk radii and φmax.
        let mut p_hit = ray.at(t_shape_hit);
        let dist2 = p_hit.x * p_hit.x + p_hit.y * p_hit.y;
        if dist2 > self.radius * self.radius || dist2 < self.inner_radius * self.inner_radius {
            return None;
        }

        let mut phi = p_hit.y.atan2(p_hit.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        if phi > self.phi_max {
            return None;
        }

        // Refine disk intersection point.
        p_hit.z = self.height;

        let hit = self.world_hit(&p_hit, r.time, -r.d);
        Some(Intersection::new(t_shape_hit, hit))
    }

    /// Returns the surface area of the shape in object space.
    fn area(&self) -> Float {
        self.phi_max
            * 0.5
            * (self.radius * self.radius - self.inner_radius * self.inner_radius)
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// NOTE: The returned `Hit` value will have `wo` = Vector3f::ZERO.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let p_obj = if self.is_full() {
            let pd = concentric_sample_disk(u);
            Point3f::new(pd.x * self.radius, pd.y * self.radius, self.height)
        } else {
            // Uniform in area over the annulus sector.
            let r2 = lerp(
                u[0],
                self.inner_radius * self.inner_radius,
                self.radius * self.radius,
            );
            self.object_point(r2.sqrt(), u[1] * self.phi_max)
        };

        let hit = self.world_hit(&p_obj, 0.0, Vector3f::ZERO);
        (hit, 1.0 / self.area())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn unit_disk(o2w: Transform, reverse_orientation: bool) -> Disk {
        Disk::new(Arc::new(o2w), reverse_orientation, 0.0, 1.0, 0.0, 360.0)
    }

    #[test]
    fn area_of_full_disk() {
        let disk = Disk::new(Arc::new(Transform::IDENTITY), false, 0.0, 2.0, 0.0, 360.0);
        assert!(approx_eq!(f32, disk.area(), 4.0 * PI, epsilon = 0.0001));
    }

    #[test]
    fn area_of_half_annulus() {
        let disk = Disk::new(Arc::new(Transform::IDENTITY), false, 0.0, 2.0, 1.0, 180.0);
        assert!(approx_eq!(f32, disk.area(), 1.5 * PI, epsilon = 0.0001));
    }

    #[test]
    fn inner_radius_is_clamped() {
        let disk = Disk::new(Arc::new(Transform::IDENTITY), false, 0.0, 1.0, 3.0, 360.0);
        assert_eq!(disk.inner_radius, 1.0);
        assert_eq!(disk.area(), 0.0);
    }

    #[test]
    fn ray_hits_translated_disk() {
        let disk = unit_disk(Transform::translate(&Vector3f::new(0.0, 0.0, 5.0)), false);
        let ray = Ray::new(
            Point3f::new(0.2, 0.1, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        let isect = disk.intersect(&ray).unwrap();
        assert!(approx_eq!(f32, isect.t, 5.0, epsilon = 0.001));
        assert!(approx_eq!(f32, isect.hit.p.z, 5.0, epsilon = 0.001));
        assert!(approx_eq!(f32, isect.hit.n.z, 1.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, isect.hit.wo.z, -1.0, epsilon = 0.0001));
    }

    #[test]
    fn ray_misses_outside_radius_or_behind() {
        let disk = unit_disk(Transform::IDENTITY, false);
        let outside = Ray::new(
            Point3f::new(1.5, 0.0, -1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(disk.intersect(&outside).is_none());

        let behind = Ray::new(
            Point3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(!disk.intersect_p(&behind));

        let parallel = Ray::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(!disk.intersect_p(&parallel));
    }

    #[test]
    fn ray_respects_t_max() {
        let disk = unit_disk(Transform::IDENTITY, false);
        let ray = Ray::new(
            Point3f::new(0.0, 0.0, -2.0),
            Vector3f::new(0.0, 0.0, 1.0),
            1.0,
            0.0,
            None,
        );
        assert!(!disk.intersect_p(&ray));
    }

    #[test]
    fn ray_misses_hole_and_missing_wedge() {
        let disk = Disk::new(Arc::new(Transform::IDENTITY), false, 0.0, 2.0, 1.0, 90.0);
        let through_hole = Ray::new(
            Point3f::new(0.5, 0.5, -1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(!disk.intersect_p(&through_hole));

        let through_wedge = Ray::new(
            Point3f::new(-1.5, 0.0, -1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(!disk.intersect_p(&through_wedge));

        let hit = Ray::new(
            Point3f::new(1.0, 1.0, -1.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
            0.0,
            None,
        );
        assert!(disk.intersect_p(&hit));
    }

    #[test]
    fn reverse_orientation_flips_normal() {
        let disk = unit_disk(Transform::IDENTITY, true);
        let (hit, _pdf) = disk.sample_area(&Point2f::new(0.5, 0.5));
        assert!(approx_eq!(f32, hit.n.z, -1.0, epsilon = 0.0001));
    }

    #[test]
    fn rotated_disk_normal_follows_transform() {
        let disk = unit_disk(Transform::rotate_x(180.0), false);
        let (hit, _pdf) = disk.sample_area(&Point2f::new(0.3, 0.7));
        assert!(approx_eq!(f32, hit.n.z, -1.0, epsilon = 0.0001));
    }

    proptest! {
        #[test]
        fn samples_lie_on_annulus(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let disk = Disk::new(Arc::new(Transform::IDENTITY), false, 0.5, 2.0, 1.0, 270.0);
            let (hit, pdf) = disk.sample_area(&Point2f::new(u0, u1));
            let r = (hit.p.x * hit.p.x + hit.p.y * hit.p.y).sqrt();
            prop_assert!(r >= 1.0 - 0.0001 && r <= 2.0 + 0.0001);
            prop_assert!(approx_eq!(f32, hit.p.z, 0.5, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, pdf, 1.0 / disk.area(), epsilon = 0.0001));
            let mut phi = hit.p.y.atan2(hit.p.x);
            if phi < 0.0 {
                phi += TWO_PI;
            }
            prop_assert!(phi <= disk.phi_max + 0.0001);
        }

        #[test]
        fn samples_lie_on_full_disk(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let disk = unit_disk(Transform::IDENTITY, false);
            let (hit, _pdf) = disk.sample_area(&Point2f::new(u0, u1));
            let r2 = hit.p.x * hit.p.x + hit.p.y * hit.p.y;
            prop_assert!(r2 <= 1.0 + 0.0001);
            prop_assert_eq!(hit.wo, Vector3f::ZERO);
        }
    }
}
