//! Point Light Source

use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::medium::*;
use lumen_core::pbrt::*;
use lumen_core::sampling::*;
use lumen_core::spectrum::*;
use std::sync::Arc;

/// Implements an isotropic point light source that emits the same amount of
/// light in all directions.
#[derive(Clone)]
pub struct PointLight {
    /// Light source type.
    pub light_type: LightType,

    /// Participating medium.
    pub medium_interface: MediumInterface,

    /// Transformation from light coordinate system to world coordinate system.
    pub light_to_world: ArcTransform,

    /// Position.
    pub p_light: Point3f,

    /// Intensity.
    pub intensity: Spectrum,
}

impl PointLight {
    /// Returns a new `PointLight` at the light space origin.
    ///
    /// * `light_to_world`   - Transformation from light coordinate system to
    ///                        world coordinate system.
    /// * `medium_interface` - Participating medium.
    /// * `intensity`        - Intensity.
    pub fn new(
        light_to_world: ArcTransform,
        medium_interface: MediumInterface,
        intensity: Spectrum,
    ) -> Self {
        let p_light = light_to_world.transform_point(&Point3f::ZERO);
        Self {
            light_type: LightType::DELTA_POSITION_LIGHT,
            medium_interface,
            light_to_world,
            p_light,
            intensity,
        }
    }

    /// Returns a new `PointLight` at a world space position.
    ///
    /// * `from`      - Position of the light.
    /// * `intensity` - Intensity.
    pub fn at(from: Point3f, intensity: Spectrum) -> Self {
        let l2w = Transform::translate(&Vector3f::from(from));
        Self::new(Arc::new(l2w), MediumInterface::vacuum(), intensity)
    }
}

impl Light for PointLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        self.light_type
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `_u`  - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let d2 = self.p_light.distance_squared(hit.p);
        if d2 == 0.0 {
            return Li::zero();
        }

        let wi = (self.p_light - hit.p).normalize();
        let p1 = Hit::new_minimal(self.p_light, hit.time, Some(self.medium_interface.clone()));
        let vis = VisibilityTester::new(hit.clone(), p1);

        Li::new(wi, 1.0, Some(vis), self.intensity / d2)
    }

    /// Return the total emitted power.
    fn power(&self) -> Spectrum {
        FOUR_PI * self.intensity
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `_hit` - The interaction hit point.
    /// * `_wi`  - The incident direction.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }

    /// Returns a sampled light-carrying ray leaving the light source.
    ///
    /// * `u1`    - Sample values for Monte Carlo.
    /// * `_u2`   - Sample values for Monte Carlo.
    /// * `time`  - Time to use for the ray.
    fn sample_le(&self, u1: &Point2f, _u2: &Point2f, time: Float) -> Le {
        let dir = uniform_sample_sphere(u1);
        let ray = Ray::new(
            self.p_light,
            dir,
            INFINITY,
            time,
            self.medium_interface.inside.clone(),
        );
        Le::new(
            ray,
            Normal3f::from(dir),
            1.0,
            uniform_sphere_pdf(),
            self.intensity,
        )
    }

    /// Returns the probability density for the light’s `sample_le()`.
    ///
    /// * `_ray`     - The ray.
    /// * `_n_light` - The normal.
    fn pdf_le(&self, _ray: &Ray, _n_light: &Normal3f) -> Pdf {
        Pdf::new(0.0, uniform_sphere_pdf())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
