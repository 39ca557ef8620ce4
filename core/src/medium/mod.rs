//! Medium

use crate::geometry::*;
use crate::spectrum::*;
use std::sync::Arc;

mod homogeneous;

// Re-exports
pub use homogeneous::*;

/// Medium trait to handle attenuation of light travelling through
/// participating media.
pub trait Medium {
    /// Returns the beam transmittance along a given ray from its origin to
    /// `ray.at(ray.t_max)`.
    ///
    /// * `ray` - The ray.
    fn tr(&self, ray: &Ray) -> Spectrum;
}

/// Atomic reference counted `Medium`.
pub type ArcMedium = Arc<dyn Medium + Send + Sync>;

/// MediumInterface represents the boundary interface between two media.
#[derive(Clone, Default)]
pub struct MediumInterface {
    /// Represent the interior of a geometric primitive.
    pub inside: Option<ArcMedium>,

    /// Represent the exterior of a geometric primitive.
    pub outside: Option<ArcMedium>,
}

impl MediumInterface {
    /// Create a medium interface between two media.
    ///
    /// * `inside`  - The interior medium.
    /// * `outside` - The exterior medium.
    pub fn new(inside: Option<ArcMedium>, outside: Option<ArcMedium>) -> Self {
        Self { inside, outside }
    }

    /// Create a medium interface that represents a vacuum.
    pub fn vacuum() -> Self {
        Self::default()
    }

    /// Returns `true` if the medium interface marks a transition between
    /// two distinct media.
    pub fn is_medium_transition(&self) -> bool {
        match (&self.inside, &self.outside) {
            (Some(inside), Some(outside)) => !Arc::ptr_eq(inside, outside),
            (Some(_), None) => true,
            (None, Some(_)) => true,
            (None, None) => false,
        }
    }
}

impl From<ArcMedium> for MediumInterface {
    /// Create a medium interface between same media.
    ///
    /// * `medium` - The medium on either side of the interface.
    fn from(medium: ArcMedium) -> Self {
        Self {
            inside: Some(Arc::clone(&medium)),
            outside: Some(medium),
        }
    }
}

impl From<Option<ArcMedium>> for MediumInterface {
    /// Create a medium interface between same media.
    ///
    /// * `medium` - The medium on either side of the interface.
    fn from(medium: Option<ArcMedium>) -> Self {
        Self {
            inside: medium.clone(),
            outside: medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_transition() {
        let a: ArcMedium = Arc::new(HomogeneousMedium::new(Spectrum::new(1.0), Spectrum::ZERO));
        let b: ArcMedium = Arc::new(HomogeneousMedium::new(Spectrum::new(1.0), Spectrum::ZERO));

        assert!(!MediumInterface::vacuum().is_medium_transition());
        assert!(!MediumInterface::from(Arc::clone(&a)).is_medium_transition());
        assert!(MediumInterface::new(Some(Arc::clone(&a)), Some(b)).is_medium_transition());
        assert!(MediumInterface::new(None, Some(a)).is_medium_transition());
    }
}
