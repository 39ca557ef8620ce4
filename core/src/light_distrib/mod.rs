//! Light Distribution.

mod power;
mod uniform;

pub use power::*;
pub use uniform::*;

use crate::geometry::*;
use crate::light::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Light sampling strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightSampleStategy {
    /// Sample all light sources uniformly.
    Uniform,

    /// Samples light sources according to their emitted power.
    Power,
}

impl From<&str> for LightSampleStategy {
    /// Returns a `LightSampleStrategy` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "uniform" => Self::Uniform,
            "power" => Self::Power,
            _ => {
                error!(
                    "Light sample distribution type '{}' unknown. Using 'power'.",
                    name
                );
                Self::Power
            }
        }
    }
}

/// Interface of light distribution implementations that provide probability
/// distributions for sampling light sources at a given point in space.
pub trait LightDistribution {
    /// Given a point |p| in space, this method returns a sampling
    /// distribution for light sources at that point. Returns `None` when
    /// there are no lights to sample.
    fn lookup(&self, p: &Point3f) -> Option<Arc<Distribution1D>>;
}

/// Atomic reference counted `LightDistribution `.
pub type ArcLightDistribution = Arc<dyn LightDistribution + Send + Sync>;

/// Returns a smart pointer to a new `LightDistribution` implementation.
///
/// * `strategy` - The strategy to use for light sampling.
/// * `scene`    - The scene.
pub fn create_light_sample_distribution(
    strategy: LightSampleStategy,
    scene: &Scene,
) -> ArcLightDistribution {
    let strategy = if scene.lights.len() == 1 {
        LightSampleStategy::Uniform
    } else {
        strategy
    };
    match strategy {
        LightSampleStategy::Uniform => Arc::new(UniformLightDistribution::new(scene)),
        LightSampleStategy::Power => Arc::new(PowerLightDistribution::new(scene)),
    }
}

/// Returns a distribution with probability proportional to the luminance of
/// each light's emitted power, or `None` if there are no lights.
///
/// * `lights` - The light sources.
pub fn compute_light_power_distribution(lights: &[ArcLight]) -> Option<Distribution1D> {
    if lights.is_empty() {
        None
    } else {
        let light_power: Vec<Float> = lights
            .iter()
            .map(|light| max(light.power().y(), 0.0))
            .collect();
        Some(Distribution1D::new(light_power))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
