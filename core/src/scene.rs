//! Scene

use crate::geometry::*;
use crate::light::*;
use std::sync::Arc;

/// Scene made of opaque shapes and light sources. Shapes are kept in a flat
/// list and intersected one after another.
#[derive(Clone)]
pub struct Scene {
    /// All shapes in the scene. This includes the shapes of area lights.
    pub shapes: Vec<ArcShape>,

    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,

    /// Infinite light sources in the scene.
    pub infinite_lights: Vec<ArcLight>,
}

impl Scene {
    /// Creates a new `Scene` and lets every light preprocess it.
    ///
    /// * `shapes` - All shapes in the scene.
    /// * `lights` - All light sources in the scene.
    pub fn new(shapes: Vec<ArcShape>, lights: Vec<ArcLight>) -> Self {
        let scene = Self {
            shapes,
            infinite_lights: lights
                .iter()
                .filter(|l| l.get_type().matches(LightType::INFINITE_LIGHT))
                .map(Arc::clone)
                .collect(),
            lights,
        };

        for light in scene.lights.iter() {
            light.preprocess(&scene);
        }

        debug!(
            "Scene has {} shapes and {} lights.",
            scene.shapes.len(),
            scene.lights.len()
        );

        scene
    }

    /// Traces the ray into the scene and returns the closest intersection if
    /// one occurred within the ray's extent.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut r = ray.clone();
        let mut closest: Option<Intersection> = None;

        for shape in self.shapes.iter() {
            if let Some(isect) = shape.intersect(&r) {
                r.t_max = isect.t;
                closest = Some(isect);
            }
        }

        closest
    }

    /// Traces the ray into the scene and returns whether or not an intersection
    /// occurred.
    ///
    /// * `ray` - The ray to trace.
    pub fn intersect_p(&self, ray: &Ray) -> bool {
        self.shapes.iter().any(|shape| shape.intersect_p(ray))
    }
}
