//! Interactions

use crate::geometry::*;
use crate::medium::*;
use crate::pbrt::*;

/// Hit describes a point where light is received or emitted: a surface point
/// (non-zero normal) or a point in free space (zero normal).
#[derive(Clone)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Time when interaction occurred.
    pub time: Float,

    /// Floating point error for ray intersection points.
    pub p_error: Vector3f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,

    /// Surface normal at the point `p`.
    pub n: Normal3f,

    /// The medium interface used for scattering media.
    pub medium_interface: Option<MediumInterface>,
}

impl Hit {
    /// Create a new hit. A zero `wo` is kept as is; any other value is
    /// normalized.
    ///
    /// `p`                - Point of interaction.
    /// `time`             - Time when interaction occurred.
    /// `p_error`          - Floating point error for ray intersection points.
    /// `wo`               - The negative ray direction (outgoing direction used
    ///                      when computing lighting at points).
    /// `n`                - Surface normal at the point `p`.
    /// `medium_interface` - The medium interface used for scattering media.
    pub fn new(
        p: Point3f,
        time: Float,
        p_error: Vector3f,
        wo: Vector3f,
        n: Normal3f,
        medium_interface: Option<MediumInterface>,
    ) -> Self {
        let wo = if wo.length_squared() > 0.0 {
            wo.normalize()
        } else {
            wo
        };

        Self {
            p,
            time,
            p_error,
            wo,
            n,
            medium_interface,
        }
    }

    /// Create a new hit from minimal fields.
    ///
    /// `p`                - Point of interaction.
    /// `time`             - Time when interaction occurred.
    /// `medium_interface` - The medium interface used for scattering media.
    pub fn new_minimal(p: Point3f, time: Float, medium_interface: Option<MediumInterface>) -> Self {
        Self {
            p,
            time,
            p_error: Vector3f::ZERO,
            wo: Vector3f::ZERO,
            n: Normal3f::ZERO,
            medium_interface,
        }
    }

    /// Returns `true` if this is a surface interaction.
    pub fn is_surface_interaction(&self) -> bool {
        self.n != Normal3f::ZERO
    }

    /// Returns `true` if this is a medium interaction.
    pub fn is_medium_interaction(&self) -> bool {
        !self.is_surface_interaction()
    }

    /// Spawn's a new ray in the given direction.
    ///
    /// * `d` - The new direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, d);
        Ray::new(origin, *d, INFINITY, self.time, self.get_medium_in_direction(d))
    }

    /// Spawn's a new ray towards another point.
    ///
    /// * `p` - The target point.
    pub fn spawn_ray_to_point(&self, p: &Point3f) -> Ray {
        let d = *p - self.p;
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, &d);
        Ray::new(
            origin,
            d,
            1.0 - SHADOW_EPSILON,
            self.time,
            self.get_medium_in_direction(&d),
        )
    }

    /// Spawn's a new ray towards another interaction. Both end points are
    /// offset so that neither surface occludes the segment.
    ///
    /// * `hit` - The interaction.
    pub fn spawn_ray_to_hit(&self, hit: &Hit) -> Ray {
        let origin = Ray::offset_origin(&self.p, &self.p_error, &self.n, &(hit.p - self.p));
        let target = Ray::offset_origin(&hit.p, &hit.p_error, &hit.n, &(origin - hit.p));
        let d = target - origin;
        Ray::new(
            origin,
            d,
            1.0 - SHADOW_EPSILON,
            self.time,
            self.get_medium_in_direction(&d),
        )
    }

    /// Returns the medium towards a direction. Points without a surface
    /// normal report the single medium they are in.
    ///
    /// * `w` - The direction.
    pub fn get_medium_in_direction(&self, w: &Vector3f) -> Option<ArcMedium> {
        if !self.is_surface_interaction() {
            return self.get_medium();
        }

        let mi = self.medium_interface.as_ref()?;
        if w.dot(&self.n) > 0.0 {
            mi.outside.clone()
        } else {
            mi.inside.clone()
        }
    }

    /// Returns the medium when interior and exterior are the same.
    pub fn get_medium(&self) -> Option<ArcMedium> {
        match &self.medium_interface {
            Some(mi) if !mi.is_medium_transition() => mi.inside.clone(),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::*;
    use std::sync::Arc;

    fn fog() -> ArcMedium {
        Arc::new(HomogeneousMedium::new(
            Spectrum::new(0.1),
            Spectrum::new(0.1),
        ))
    }

    #[test]
    fn new_keeps_zero_wo() {
        let hit = Hit::new(
            Point3f::ZERO,
            0.0,
            Vector3f::ZERO,
            Vector3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            None,
        );
        assert_eq!(hit.wo, Vector3f::ZERO);
        assert!(!hit.wo.has_nans());
    }

    #[test]
    fn new_normalizes_wo() {
        let hit = Hit::new(
            Point3f::ZERO,
            0.0,
            Vector3f::ZERO,
            Vector3f::new(0.0, 3.0, 4.0),
            Normal3f::ZERO,
            None,
        );
        assert!((hit.wo.length() - 1.0).abs() < 1e-6);
        assert!(hit.is_medium_interaction());
    }

    #[test]
    fn spawn_ray_to_point_stops_short() {
        let hit = Hit::new_minimal(Point3f::ZERO, 0.5, None);
        let r = hit.spawn_ray_to_point(&Point3f::new(0.0, 0.0, 2.0));
        assert_eq!(r.t_max, 1.0 - SHADOW_EPSILON);
        assert_eq!(r.time, 0.5);
        assert!(r.at(r.t_max).z < 2.0);
    }

    #[test]
    fn medium_in_direction_follows_normal() {
        let inside = fog();
        let mi = MediumInterface::new(Some(Arc::clone(&inside)), None);
        let hit = Hit::new(
            Point3f::ZERO,
            0.0,
            Vector3f::ZERO,
            Vector3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            Some(mi),
        );
        assert!(hit.get_medium_in_direction(&Vector3f::new(0.0, 0.0, 1.0)).is_none());
        let m = hit.get_medium_in_direction(&Vector3f::new(0.0, 0.0, -1.0));
        assert!(m.map_or(false, |m| Arc::ptr_eq(&m, &inside)));
    }

    #[test]
    fn medium_point_uses_shared_medium() {
        let m = fog();
        let hit = Hit::new_minimal(Point3f::ZERO, 0.0, Some(MediumInterface::from(Arc::clone(&m))));
        let r = hit.spawn_ray(&Vector3f::new(1.0, 0.0, 0.0));
        assert!(r.medium.map_or(false, |rm| Arc::ptr_eq(&rm, &m)));
    }
}
