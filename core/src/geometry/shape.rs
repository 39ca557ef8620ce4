//! Shapes

use super::*;
use crate::interaction::Hit;
use crate::low_discrepancy::radical_inverse;
use crate::pbrt::*;
use std::sync::Arc;

/// Shape common functions
pub trait Shape {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns the underlying shape data.
    fn get_data(&self) -> Arc<ShapeData>;

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<Intersection>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Returns the surface area of the shape in object space. Matches the
    /// world space area only for rigid object-to-world transforms.
    fn area(&self) -> Float;

    /// Sample a point on the surface and return the PDF with respect to area on
    /// the surface.
    ///
    /// NOTE: The returned `Hit` value will have `wo` = Vector3f::ZERO.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float);

    /// Sample a point on the shape given a reference point and return the PDF
    /// with respect to the solid angle from ref.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        sample_solid_angle_by_area(self, hit, u)
    }

    /// Return the PDF for the shape. By default it is 1/area.
    ///
    /// * `hit` - The interaction hit point.
    fn pdf(&self, _hit: &Hit) -> Float {
        1.0 / self.area()
    }

    /// Returns the PDF with respect to solid angle.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        pdf_solid_angle_by_area(self, hit, wi)
    }

    /// Returns the solid angle subtended by the shape w.r.t. the reference
    /// point p, given in world space. Some shapes compute this value in
    /// closed-form, while the default implementation uses Monte Carlo
    /// integration.
    ///
    /// * `p`         - The reference point.
    /// * `n_samples` - The number of samples to use for Monte-Carlo integration.
    fn solid_angle(&self, p: &Point3f, n_samples: usize) -> Float {
        estimate_solid_angle(self, p, n_samples)
    }
}

/// Samples a point uniformly by area and converts the density to solid angle
/// measure at the reference point. Degenerate conversions yield a zero PDF.
///
/// * `shape` - The shape.
/// * `hit`   - Reference point.
/// * `u`     - Sample value to use.
pub fn sample_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, u: &Point2f) -> (Hit, Float) {
    let (intr, mut pdf) = shape.sample_area(u);
    let wi = intr.p - hit.p;

    if wi.length_squared() == 0.0 {
        pdf = 0.0;
    } else {
        let wi = wi.normalize();
        // Convert from area measure, as returned by the sample_area() call
        // above, to solid angle measure.
        pdf *= hit.p.distance_squared(intr.p) / intr.n.abs_dot(&(-wi));
        if !pdf.is_finite() {
            pdf = 0.0;
        }
    }

    (intr, pdf)
}

/// Returns the solid angle density of `sample_solid_angle_by_area()` for the
/// direction `wi`. Zero if the ray misses the shape.
///
/// * `shape` - The shape.
/// * `hit`   - The interaction hit point.
/// * `wi`    - The incident direction.
pub fn pdf_solid_angle_by_area<S: Shape + ?Sized>(shape: &S, hit: &Hit, wi: &Vector3f) -> Float {
    // Intersect sample ray with area light geometry.
    let ray = hit.spawn_ray(wi);

    if let Some(isect) = shape.intersect(&ray) {
        // Convert light sample weight to solid angle measure.
        let pdf = hit.p.distance_squared(isect.hit.p)
            / (isect.hit.n.abs_dot(&(-*wi)) * shape.area());
        if pdf.is_finite() {
            pdf
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Estimates the solid angle subtended by the shape with Monte Carlo
/// integration over `n_samples` low discrepancy samples.
///
/// * `shape`     - The shape.
/// * `p`         - The reference point.
/// * `n_samples` - The number of samples to use.
pub fn estimate_solid_angle<S: Shape + ?Sized>(shape: &S, p: &Point3f, n_samples: usize) -> Float {
    if n_samples == 0 {
        return 0.0;
    }

    let hit = Hit::new_minimal(*p, 0.0, None);

    let mut solid_angle: f64 = 0.0;

    for i in 0..n_samples {
        let u = Point2f::new(radical_inverse(0, i as u64), radical_inverse(1, i as u64));
        let (p_shape, pdf) = shape.sample_solid_angle(&hit, &u);
        if pdf > 0.0 {
            let ray = Ray::new(*p, p_shape.p - *p, 0.999, 0.0, None);
            if !shape.intersect_p(&ray) {
                solid_angle += 1.0_f64 / pdf as f64;
            }
        }
    }
    (solid_angle / n_samples as f64) as Float
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;

/// Stores geometric information about a single ray-shape intersection.
pub struct Intersection {
    /// The parameter along the ray where intersection occurred.
    pub t: Float,

    /// The hit point details.
    pub hit: Hit,
}

impl Intersection {
    /// Create a new intersection.
    ///
    /// * `t`   - The parameter along the ray where intersection occurred.
    /// * `hit` - The hit point details.
    pub fn new(t: Float, hit: Hit) -> Self {
        Self { t, hit }
    }
}

/// Store common shape data.
#[derive(Clone)]
pub struct ShapeData {
    /// The object to world transfomation.
    pub object_to_world: ArcTransform,

    /// The world to object transfomation.
    pub world_to_object: ArcTransform,

    /// Indicates whether their surface normal directions should be reversed
    /// from the default
    pub reverse_orientation: bool,

    /// Indicates if `object_to_world` transformation changes the handedness
    /// of the coordinate system.
    pub transform_swaps_handedness: bool,
}

impl ShapeData {
    /// Create a new instance of shape data. The world to object transform is
    /// the inverse of `object_to_world`.
    ///
    /// * `object_to_world`     - The object to world transfomation.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(object_to_world: ArcTransform, reverse_orientation: bool) -> Self {
        Self {
            world_to_object: Arc::new(object_to_world.inverse()),
            transform_swaps_handedness: object_to_world.swaps_handedness(),
            object_to_world,
            reverse_orientation,
        }
    }

    /// Transforms an object space normal to world space and flips it if the
    /// orientation is reversed. A transformed normal already accounts for
    /// handedness changes.
    ///
    /// * `n` - Object space normal.
    pub fn orient_normal(&self, n: &Normal3f) -> Normal3f {
        let n = self.object_to_world.transform_normal(n).normalize();
        if self.reverse_orientation {
            -n
        } else {
            n
        }
    }
}
