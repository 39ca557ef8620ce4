//! Diffuse Area Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::medium::*;
use lumen_core::pbrt::*;
use lumen_core::rng::ONE_MINUS_EPSILON;
use lumen_core::sampling::*;
use lumen_core::spectrum::*;

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Light source type.
    pub light_type: LightType,

    /// Used to trace multiple shadow rays to the light to compute soft shadows.
    pub n_samples: usize,

    /// Participating medium.
    pub medium_interface: MediumInterface,

    /// Transformation from light coordinate system to world coordinate system.
    pub light_to_world: ArcTransform,

    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight` or an error if the shape has no usable
    /// area or the emitted radiance is negative or NaN.
    ///
    /// * `light_to_world`   - Transformation from light coordinate system to
    ///                        world coordinate system.
    /// * `medium_interface` - Participating medium.
    /// * `l_emit`           - Emitted radiance.
    /// * `n_samples`        - Used to trace multiple shadow rays to the light
    ///                        to compute soft shadows. Default to 1.
    /// * `shape`            - Shape describing surface of the light source.
    /// * `two_sided`        - Indicates whether light source 2-sided.
    pub fn new(
        light_to_world: ArcTransform,
        medium_interface: MediumInterface,
        l_emit: Spectrum,
        n_samples: usize,
        shape: ArcShape,
        two_sided: bool,
    ) -> Result<Self, String> {
        let area = shape.area();
        if !area.is_finite() || area <= 0.0 {
            return Err(format!(
                "Area light on {} has invalid surface area {}",
                shape.get_type(),
                area
            ));
        }
        if l_emit.has_nans() || l_emit.has_negatives() {
            return Err(format!("Area light has invalid emitted radiance {}", l_emit));
        }

        debug!(
            "Area light on {}: area = {}, two_sided = {}",
            shape.get_type(),
            area,
            two_sided
        );

        Ok(Self {
            light_type: LightType::AREA_LIGHT,
            medium_interface,
            light_to_world,
            l_emit,
            n_samples: max(n_samples, 1),
            shape,
            area,
            two_sided,
        })
    }

    /// Returns the direction density of `sample_le()` for a unit direction
    /// making cosine `cos_theta` with the light normal.
    fn pdf_dir(&self, cos_theta: Float) -> Float {
        if self.two_sided {
            0.5 * cosine_hemisphere_pdf(abs(cos_theta))
        } else {
            cosine_hemisphere_pdf(max(cos_theta, 0.0))
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let (mut p_shape_hit, pdf) = self.shape.sample_solid_angle(hit, u);

        let wi = p_shape_hit.p - hit.p;
        if pdf.is_nan() || pdf <= 0.0 || pdf.is_infinite() || wi.length_squared() == 0.0 {
            return Li::zero();
        }

        let wi = wi.normalize();
        p_shape_hit.medium_interface = Some(self.medium_interface.clone());
        let value = self.l(&p_shape_hit, &(-wi));
        let visibility = VisibilityTester::new(hit.clone(), p_shape_hit);
        Li::new(wi, pdf, Some(visibility), value)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        let power = self.l_emit * self.area * PI;
        if self.two_sided {
            2.0 * power
        } else {
            power
        }
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float {
        let pdf = self.shape.pdf_solid_angle(hit, wi);
        if pdf.is_finite() && pdf > 0.0 {
            pdf
        } else {
            0.0
        }
    }

    /// Returns a sampled light-carrying ray leaving the light source.
    ///
    /// * `u1`   - Sample values for Monte Carlo.
    /// * `u2`   - Sample values for Monte Carlo.
    /// * `time` - Time to use for the ray.
    fn sample_le(&self, u1: &Point2f, u2: &Point2f, time: Float) -> Le {
        let (mut p_shape_hit, pdf_pos) = self.shape.sample_area(u1);
        p_shape_hit.medium_interface = Some(self.medium_interface.clone());
        p_shape_hit.time = time;
        let n_light = p_shape_hit.n;

        // Sample a cosine-weighted outgoing direction `w` for area light.
        let mut w = if self.two_sided {
            // Choose a side to sample and then remap u[0] to [0,1) before
            // applying cosine-weighted hemisphere sampling for the chosen side.
            if u2[0] < 0.5 {
                let u = Point2f::new(min(u2[0] * 2.0, ONE_MINUS_EPSILON), u2[1]);
                cosine_sample_hemisphere(&u)
            } else {
                let u = Point2f::new(min((u2[0] - 0.5) * 2.0, ONE_MINUS_EPSILON), u2[1]);
                let mut w = cosine_sample_hemisphere(&u);
                w.z *= -1.0;
                w
            }
        } else {
            cosine_sample_hemisphere(u2)
        };
        let pdf_dir = self.pdf_dir(w.z);

        let n = Vector3f::from(n_light);
        let (v1, v2) = coordinate_system(&n);
        w = w.x * v1 + w.y * v2 + w.z * n;

        let mut ray = p_shape_hit.spawn_ray(&w);
        ray.time = time;

        let value = self.l(&p_shape_hit, &w);
        Le::new(ray, n_light, pdf_pos, pdf_dir, value)
    }

    /// Returns the probability density for the light’s `sample_le()`.
    ///
    /// * `ray`     - The ray.
    /// * `n_light` - The normal.
    fn pdf_le(&self, ray: &Ray, n_light: &Normal3f) -> Pdf {
        let hit = Hit::new(
            ray.o,
            ray.time,
            Vector3f::ZERO,
            Vector3f::ZERO,
            *n_light,
            Some(self.medium_interface.clone()),
        );
        let pdf_pos = self.shape.pdf(&hit);

        let d2 = ray.d.length_squared();
        let pdf_dir = if d2 > 0.0 {
            self.pdf_dir(n_light.dot(&(ray.d / d2.sqrt())))
        } else {
            0.0
        };

        Pdf::new(pdf_pos, pdf_dir)
    }

    /// Returns the number of samples to use for the light source.
    fn get_num_samples(&self) -> usize {
        self.n_samples
    }
}

impl AreaLight for DiffuseAreaLight {
    /// Returns emitted radiance based on `two_sided` flag.
    ///
    /// * `hit` - The interaction point.
    /// * `w`   - Direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum {
        if self.two_sided || hit.n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use std::sync::Arc;

    /// A unit square in the z=0 plane facing +z. Keeps these tests free of
    /// the shapes crate.
    struct Square {
        data: Arc<ShapeData>,
    }

    impl Square {
        fn new() -> Self {
            Self {
                data: Arc::new(ShapeData::new(Arc::new(Transform::IDENTITY), false)),
            }
        }
    }

    impl Shape for Square {
        fn get_type(&self) -> &'static str {
            "square"
        }

        fn get_data(&self) -> Arc<ShapeData> {
            Arc::clone(&self.data)
        }

        fn intersect(&self, r: &Ray) -> Option<Intersection> {
            if r.d.z == 0.0 {
                return None;
            }
            let t = -r.o.z / r.d.z;
            if t <= 0.0 || t >= r.t_max {
                return None;
            }
            let p = r.at(t);
            if p.x.abs() > 0.5 || p.y.abs() > 0.5 {
                return None;
            }
            let n = Normal3f::new(0.0, 0.0, 1.0);
            Some(Intersection::new(
                t,
                Hit::new(p, r.time, Vector3f::ZERO, -r.d, n, None),
            ))
        }

        fn area(&self) -> Float {
            1.0
        }

        fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
            let p = Point3f::new(u[0] - 0.5, u[1] - 0.5, 0.0);
            let n = Normal3f::new(0.0, 0.0, 1.0);
            (Hit::new(p, 0.0, Vector3f::ZERO, Vector3f::ZERO, n, None), 1.0)
        }
    }

    struct Degenerate;

    impl Shape for Degenerate {
        fn get_type(&self) -> &'static str {
            "degenerate"
        }

        fn get_data(&self) -> Arc<ShapeData> {
            Arc::new(ShapeData::new(Arc::new(Transform::IDENTITY), false))
        }

        fn intersect(&self, _r: &Ray) -> Option<Intersection> {
            None
        }

        fn area(&self) -> Float {
            0.0
        }

        fn sample_area(&self, _u: &Point2f) -> (Hit, Float) {
            (Hit::new_minimal(Point3f::ZERO, 0.0, None), INFINITY)
        }
    }

    fn square_light(l_emit: Spectrum, two_sided: bool) -> Result<DiffuseAreaLight, String> {
        DiffuseAreaLight::new(
            Arc::new(Transform::IDENTITY),
            MediumInterface::vacuum(),
            l_emit,
            1,
            Arc::new(Square::new()),
            two_sided,
        )
    }

    #[test]
    fn rejects_zero_area() {
        let light = DiffuseAreaLight::new(
            Arc::new(Transform::IDENTITY),
            MediumInterface::vacuum(),
            Spectrum::ONE,
            1,
            Arc::new(Degenerate),
            false,
        );
        assert!(light.is_err());
    }

    #[test]
    fn rejects_invalid_radiance() {
        assert!(square_light(Spectrum::rgb(1.0, -1.0, 1.0), false).is_err());
        assert!(square_light(Spectrum::rgb(Float::NAN, 1.0, 1.0), false).is_err());
        assert!(square_light(Spectrum::ZERO, false).is_ok());
    }

    #[test]
    fn sample_count_is_at_least_one() {
        let light = DiffuseAreaLight::new(
            Arc::new(Transform::IDENTITY),
            MediumInterface::vacuum(),
            Spectrum::ONE,
            0,
            Arc::new(Square::new()),
            false,
        )
        .unwrap();
        assert_eq!(light.get_num_samples(), 1);
        assert!(!light.is_delta_light());
        assert_eq!(light.get_type(), LightType::AREA_LIGHT);
    }

    #[test]
    fn power_doubles_when_two_sided() {
        let one = square_light(Spectrum::new(2.0), false).unwrap();
        let two = square_light(Spectrum::new(2.0), true).unwrap();
        assert!(approx_eq!(f32, one.power()[0], 2.0 * PI, epsilon = 0.0001));
        assert!(approx_eq!(f32, two.power()[1], 4.0 * PI, epsilon = 0.0001));
    }

    #[test]
    fn sample_li_above_square() {
        let light = square_light(Spectrum::ONE, false).unwrap();
        let hit = Hit::new_minimal(Point3f::new(0.0, 0.0, 2.0), 0.0, None);
        let li = light.sample_li(&hit, &Point2f::new(0.5, 0.5));
        assert!(li.is_valid());
        assert!(approx_eq!(f32, li.wi.z, -1.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, li.wi.length(), 1.0, epsilon = 0.0001));
        // Area pdf 1 converted to solid angle: d² / cos = 4.
        assert!(approx_eq!(f32, li.pdf, 4.0, epsilon = 0.001));
        assert!(approx_eq!(
            f32,
            light.pdf_li(&hit, &li.wi),
            li.pdf,
            epsilon = 0.001
        ));
        let vis = li.visibility.unwrap();
        assert!(vis.p1.medium_interface.is_some());
    }

    #[test]
    fn sample_li_from_back_side_is_black_when_one_sided() {
        let light = square_light(Spectrum::ONE, false).unwrap();
        let hit = Hit::new_minimal(Point3f::new(0.0, 0.0, -2.0), 0.0, None);
        let li = light.sample_li(&hit, &Point2f::new(0.5, 0.5));
        assert!(li.pdf > 0.0);
        assert!(li.value.is_black());
    }

    #[test]
    fn sample_li_on_surface_is_degenerate() {
        let light = square_light(Spectrum::ONE, true).unwrap();
        let hit = Hit::new(
            Point3f::ZERO,
            0.0,
            Vector3f::ZERO,
            Vector3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            None,
        );
        let li = light.sample_li(&hit, &Point2f::new(0.5, 0.5));
        assert_eq!(li.pdf, 0.0);
        assert!(li.value.is_black());
        assert!(li.visibility.is_none());
        assert!(!li.value.has_nans());
    }

    #[test]
    fn sample_le_one_sided_leaves_front() {
        let light = square_light(Spectrum::ONE, false).unwrap();
        let le = light.sample_le(&Point2f::new(0.2, 0.8), &Point2f::new(0.3, 0.4), 0.25);
        assert!(le.ray.d.z > 0.0);
        assert_eq!(le.ray.time, 0.25);
        assert!(approx_eq!(f32, le.pdf_pos, 1.0, epsilon = 0.0001));
        assert!(approx_eq!(
            f32,
            le.pdf_dir,
            le.ray.d.normalize().z * INV_PI,
            epsilon = 0.0001
        ));
        let pdf = light.pdf_le(&le.ray, &le.n_light);
        assert!(approx_eq!(f32, pdf.pdf_pos, le.pdf_pos, epsilon = 0.0001));
        assert!(approx_eq!(f32, pdf.pdf_dir, le.pdf_dir, epsilon = 0.0001));
    }

    #[test]
    fn sample_le_two_sided_picks_side_by_coin() {
        let light = square_light(Spectrum::ONE, true).unwrap();
        let front = light.sample_le(&Point2f::new(0.5, 0.5), &Point2f::new(0.2, 0.4), 0.0);
        let back = light.sample_le(&Point2f::new(0.5, 0.5), &Point2f::new(0.7, 0.4), 0.0);
        assert!(front.ray.d.z > 0.0);
        assert!(back.ray.d.z < 0.0);
        assert!(!back.value.is_black());
        assert!(approx_eq!(
            f32,
            back.pdf_dir,
            0.5 * back.ray.d.normalize().z.abs() * INV_PI,
            epsilon = 0.0001
        ));
    }

    #[test]
    fn pdf_le_one_sided_is_zero_behind() {
        let light = square_light(Spectrum::ONE, false).unwrap();
        let ray = Ray::new(
            Point3f::ZERO,
            Vector3f::new(0.0, 0.0, -1.0),
            INFINITY,
            0.0,
            None,
        );
        let pdf = light.pdf_le(&ray, &Normal3f::new(0.0, 0.0, 1.0));
        assert_eq!(pdf.pdf_dir, 0.0);
        assert!(approx_eq!(f32, pdf.pdf_pos, 1.0, epsilon = 0.0001));
    }
}
