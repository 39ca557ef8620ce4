//! Visibility Tester

use crate::interaction::*;
use crate::medium::*;
use crate::scene::*;
use crate::spectrum::*;

/// VisibilityTester allows lights to return a radiance value under the
/// assumption that the reference point and light source are mutually
/// visible.
#[derive(Clone)]
pub struct VisibilityTester {
    /// One endpoint of shadow ray.
    pub p0: Hit,

    /// Second endpoint of shadow ray.
    pub p1: Hit,
}

impl VisibilityTester {
    /// Create a new `VisibilityTester` for given endpoints of a shadow ray.
    ///
    /// * `p0` - One endpoint of shadow ray.
    /// * `p1` - Second endpoint of shadow ray.
    pub fn new(p0: Hit, p1: Hit) -> Self {
        Self { p0, p1 }
    }

    /// Traces a shadow ray between `p0` and `p1` through the scene and returns
    /// true if the points are visible to each other.
    ///
    /// * `scene` - The scene.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        !scene.intersect_p(&self.p0.spawn_ray_to_hit(&self.p1))
    }

    /// Computes the beam transmittance, the fraction of radiance transmitted
    /// along the segment between the two points. Every surface in the scene
    /// is opaque so a blocked segment transmits nothing; otherwise the medium
    /// the segment starts in attenuates it.
    ///
    /// * `scene` - The scene.
    pub fn tr(&self, scene: &Scene) -> Spectrum {
        let ray = self.p0.spawn_ray_to_hit(&self.p1);

        if scene.intersect_p(&ray) {
            return Spectrum::ZERO;
        }

        ray.medium
            .as_ref()
            .map_or(Spectrum::ONE, |medium: &ArcMedium| medium.tr(&ray))
    }
}
