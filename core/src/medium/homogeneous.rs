//! Homogeneous Medium

use super::Medium;
use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Implements a homogeneous medium representing a region of space with constant
/// σa and σs values throughout its extent.
pub struct HomogeneousMedium {
    /// Scattering coefficient `σs` is the probability of an out-scattering
    /// event occurring per unit distance
    pub sigma_s: Spectrum,

    /// Total reduction in radiance due to absorption and out-scattering
    /// `σt = σs + σa`. This combined effect of absorption and out-scattering is
    /// called attenuation or extinction.
    pub sigma_t: Spectrum,
}

impl HomogeneousMedium {
    /// Create a new `HomogeneousMedium `.
    ///
    /// * `sigma_a` - Absorption cross section `σa`.
    /// * `sigma_s` - Scattering coefficient `σs`.
    pub fn new(sigma_a: Spectrum, sigma_s: Spectrum) -> Self {
        Self {
            sigma_s,
            sigma_t: sigma_s + sigma_a,
        }
    }
}

impl Medium for HomogeneousMedium {
    /// Returns the beam transmittance along a given ray using Beer's law.
    ///
    /// * `ray` - The ray.
    fn tr(&self, ray: &Ray) -> Spectrum {
        (-self.sigma_t * min(ray.t_max * ray.d.length(), Float::MAX)).exp()
    }
}
