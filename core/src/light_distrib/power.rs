//! Power Light Distribution.

use super::{compute_light_power_distribution, LightDistribution};
use crate::geometry::*;
use crate::sampling::*;
use crate::scene::*;
use std::sync::Arc;

/// PowerLightDistribution returns a distribution with sampling probability
/// proportional to the total emitted power for each light. It ignores the
/// provided point. This works well when the most powerful lights are also the
/// most important contributors to lighting in the scene.
pub struct PowerLightDistribution {
    distrib: Option<Arc<Distribution1D>>,
}

impl PowerLightDistribution {
    /// Create a new instance of `PowerLightDistribution`.
    ///
    /// * `scene` - The scene.
    pub fn new(scene: &Scene) -> Self {
        Self {
            distrib: compute_light_power_distribution(&scene.lights).map(Arc::new),
        }
    }
}

impl LightDistribution for PowerLightDistribution {
    fn lookup(&self, _p: &Point3f) -> Option<Arc<Distribution1D>> {
        self.distrib.as_ref().map(Arc::clone)
    }
}
