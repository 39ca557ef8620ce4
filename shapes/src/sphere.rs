//! Spheres

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;
use std::sync::Arc;

/// sin²(1.5°). Below this the cone sampling switches to a Taylor expansion.
const SMALL_CONE_SIN2: Float = 0.00068523;

/// A sphere centered at the object space origin, optionally clipped in z and
/// φ.
#[derive(Clone)]
pub struct Sphere {
    /// Common shape data.
    pub data: Arc<ShapeData>,

    /// Radius of sphere.
    pub radius: Float,

    /// Minimum z-value to truncate sphere.
    pub z_min: Float,

    /// Maximum z-value to truncate sphere.
    pub z_max: Float,

    /// Maximum spherical coordinate for Φ.
    pub phi_max: Float,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `object_to_world`     - The object to world transfomation.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    /// * `radius`              - Radius of sphere.
    /// * `z_min`               - Minimum z-value to truncate sphere.
    /// * `z_max`               - Maximum z-value to truncate sphere.
    /// * `phi_max`             - Maximum spherical coordinate for Φ in degrees.
    pub fn new(
        object_to_world: ArcTransform,
        reverse_orientation: bool,
        radius: Float,
        z_min: Float,
        z_max: Float,
        phi_max: Float,
    ) -> Self {
        let radius = max(radius, 0.0);
        Self {
            data: Arc::new(ShapeData::new(object_to_world, reverse_orientation)),
            radius,
            z_min: clamp(min(z_min, z_max), -radius, radius),
            z_max: clamp(max(z_min, z_max), -radius, radius),
            phi_max: clamp(phi_max, 0.0, 360.0).to_radians(),
        }
    }

    /// Create a complete sphere.
    ///
    /// * `object_to_world`     - The object to world transfomation.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    /// * `radius`              - Radius of sphere.
    pub fn full(object_to_world: ArcTransform, reverse_orientation: bool, radius: Float) -> Self {
        Self::new(object_to_world, reverse_orientation, radius, -radius, radius, 360.0)
    }

    /// Returns `true` if the sphere is not clipped.
    fn is_full(&self) -> bool {
        self.z_min <= -self.radius && self.z_max >= self.radius && self.phi_max >= TWO_PI
    }

    /// Returns the sphere center in world space.
    fn world_center(&self) -> Point3f {
        self.data.object_to_world.transform_point(&Point3f::ZERO)
    }

    /// Returns `true` if the point in object space lies within the z and φ
    /// clipping ranges.
    fn in_clip_range(&self, p: &Point3f) -> bool {
        let mut phi = p.y.atan2(p.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        !((self.z_min > -self.radius && p.z < self.z_min)
            || (self.z_max < self.radius && p.z > self.z_max)
            || phi > self.phi_max)
    }

    /// Projects a point back onto the sphere surface.
    fn refine(&self, p: Point3f) -> Point3f {
        let mut p = p * (self.radius / p.distance(Point3f::ZERO));
        if p.x == 0.0 && p.y == 0.0 {
            p.x = 1e-5 * self.radius;
        }
        p
    }

    /// Returns a world space surface hit for a point on the sphere in object
    /// space.
    fn world_hit(&self, p_obj: &Point3f, time: Float, wo: Vector3f) -> Hit {
        let p_obj_error = gamma(5) * Vector3f::from(*p_obj).abs();
        let o2w = &self.data.object_to_world;
        let p = o2w.transform_point(p_obj);
        let p_error = o2w.transform_point_abs_error(p_obj, &p_obj_error);
        let n = self
            .data
            .orient_normal(&Normal3f::new(p_obj.x, p_obj.y, p_obj.z));
        Hit::new(p, time, p_error, wo, n, None)
    }

    /// Returns `true` if the reference point lies on the emitting part of the
    /// sphere, within its floating point error bounds.
    fn on_surface(&self, hit: &Hit) -> bool {
        let dist = hit.p.distance(self.world_center());
        let tolerance =
            hit.p_error.length() + gamma(5) * (Vector3f::from(hit.p).length() + self.radius);
        (dist - self.radius).abs() <= tolerance
            && self.in_clip_range(&self.data.world_to_object.transform_point(&hit.p))
    }

    /// Returns cos(θmax) of the cone of directions from `hit` subtended by
    /// the sphere, or `None` if the reference point is inside the sphere.
    fn cos_theta_max(&self, hit: &Hit) -> Option<Float> {
        let p_center = self.world_center();
        let p_origin = Ray::offset_origin(&hit.p, &hit.p_error, &hit.n, &(p_center - hit.p));
        let dc2 = p_origin.distance_squared(p_center);
        let r2 = self.radius * self.radius;
        if dc2 <= r2 {
            None
        } else {
            let sin_theta_max2 = r2 / hit.p.distance_squared(p_center);
            Some(max(0.0, 1.0 - sin_theta_max2).sqrt())
        }
    }
}

impl Shape for Sphere {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "sphere"
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

        // Compute quadratic sphere coefficients.
        let a = ray.d.length_squared();
        let b = 2.0 * Vector3f::from(ray.o).dot(&ray.d);
        let c = Vector3f::from(ray.o).length_squared() - self.radius * self.radius;

        let (t0, t1) = quadratic(a, b, c)?;

        // Check quadric shape t0 and t1 for nearest intersection.
        if t0 > ray.t_max || t1 <= 0.0 {
            return None;
        }

        let mut t_shape_hit = t0;
        if t_shape_hit <= 0.0 {
            t_shape_hit = t1;
            if t_shape_hit > ray.t_max {
                return None;
            }
        }

        let mut p_hit = self.refine(ray.at(t_shape_hit));

        // Test sphere intersection against clipping parameters.
        if !self.in_clip_range(&p_hit) {
            if t_shape_hit == t1 || t1 > ray.t_max {
                return None;
            }
            t_shape_hit = t1;
            p_hit = self.refine(ray.at(t_shape_hit));
            if !self.in_clip_range(&p_hit) {
                return None;
            }
        }

        let hit = self.world_hit(&p_hit, r.time, -r.d);
        Some(Intersection::new(t_shape_hit, hit))
    }

    /// Returns the surface area of the shape in object space.
    fn area(&self) -> Float {
        self.phi_max * self.radius * (self.z_max - self.z_min)
    }

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// NOTE: The returned `Hit` value will have `wo` = Vector3f::ZERO.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let p_obj = if self.is_full() {
            Point3f::from(self.radius * uniform_sample_sphere(u))
        } else {
            // Uniform z is uniform in area on a spherical zone.
            let z = lerp(u[0], self.z_min, self.z_max);
            let phi = u[1] * self.phi_max;
            let r_xy = max(0.0, self.radius * self.radius - z * z).sqrt();
            Point3f::new(r_xy * phi.cos(), r_xy * phi.sin(), z)
        };

        let hit = self.world_hit(&self.refine(p_obj), 0.0, Vector3f::ZERO);
        (hit, 1.0 / self.area())
    }

    /// Sample a point on the shape given a reference point and return the PDF
    /// with respect to the solid angle from ref. Points outside a complete
    /// sphere sample the cone of directions the sphere subtends.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        // A point on the surface sees the sphere only at grazing angles.
        if self.on_surface(hit) {
            let (p, _pdf) = self.sample_area(u);
            return (p, 0.0);
        }

        let cos_theta_max = match self.cos_theta_max(hit) {
            Some(c) if self.is_full() => c,
            _ => return sample_solid_angle_by_area(self, hit, u),
        };

        // Compute coordinate system for sphere sampling.
        let p_center = self.world_center();
        let dc = hit.p.distance(p_center);
        let inv_dc = 1.0 / dc;
        let wc = (p_center - hit.p) * inv_dc;
        let (wc_x, wc_y) = coordinate_system(&wc);

        // Compute θ and φ values for sample in cone.
        let sin_theta_max = self.radius * inv_dc;
        let sin_theta_max2 = sin_theta_max * sin_theta_max;
        let inv_sin_theta_max = 1.0 / sin_theta_max;

        let (cos_theta, sin_theta2) = if sin_theta_max2 < SMALL_CONE_SIN2 {
            let sin_theta2 = sin_theta_max2 * u[0];
            ((1.0 - sin_theta2).sqrt(), sin_theta2)
        } else {
            let cos_theta = (cos_theta_max - 1.0) * u[0] + 1.0;
            (cos_theta, 1.0 - cos_theta * cos_theta)
        };

        // Compute angle α from center of sphere to sampled point on surface.
        let cos_alpha = sin_theta2 * inv_sin_theta_max
            + cos_theta
                * max(0.0, 1.0 - sin_theta2 * inv_sin_theta_max * inv_sin_theta_max).sqrt();
        let sin_alpha = max(0.0, 1.0 - cos_alpha * cos_alpha).sqrt();
        let phi = u[1] * TWO_PI;

        // Compute surface normal and sampled point on sphere.
        let n_world =
            spherical_direction_in_coord_frame(sin_alpha, cos_alpha, phi, &-wc_x, &-wc_y, &-wc);
        let p_world = p_center + self.radius * n_world;
        let p_error = gamma(5) * Vector3f::from(p_world).abs();
        let n = if self.data.reverse_orientation {
            -Normal3f::from(n_world)
        } else {
            Normal3f::from(n_world)
        };

        let pdf = uniform_cone_pdf(cos_theta_max);
        let pdf = if pdf.is_finite() { pdf } else { 0.0 };
        (Hit::new(p_world, hit.time, p_error, Vector3f::ZERO, n, None), pdf)
    }

    /// Returns the PDF with respect to solid angle.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        if self.on_surface(hit) {
            return 0.0;
        }

        match self.cos_theta_max(hit) {
            Some(cos_theta_max) if self.is_full() => {
                // Directions outside the cone have zero density.
                if self.intersect_p(&hit.spawn_ray(wi)) {
                    let pdf = uniform_cone_pdf(cos_theta_max);
                    if pdf.is_finite() {
                        pdf
                    } else {
                        0.0
                    }
                } else {
                    0.0
                }
            }
            _ => pdf_solid_angle_by_area(self, hit, wi),
        }
    }

    /// Returns the solid angle subtended by the shape w.r.t. the reference
    /// point p, given in world space.
    ///
    /// * `p`         - The reference point.
    /// * `n_samples` - The number of samples to use for Monte-Carlo integration.
    fn solid_angle(&self, p: &Point3f, n_samples: usize) -> Float {
        if !self.is_full() {
            return estimate_solid_angle(self, p, n_samples);
        }

        let p_center = self.world_center();
        let r2 = self.radius * self.radius;
        let dc2 = p.distance_squared(p_center);
        if dc2 <= r2 {
            FOUR_PI
        } else {
            let cos_theta_max = max(0.0, 1.0 - r2 / dc2).sqrt();
            TWO_PI * (1.0 - cos_theta_max)
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
