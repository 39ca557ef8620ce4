//! Rays

use super::{Dot, Normal3f, Point3f, Vector3f};
use crate::medium::ArcMedium;
use crate::pbrt::*;
use std::fmt::{Debug, Formatter, Result};

/// A semi-infinite line given by an origin, a direction and a maximum extent.
#[derive(Clone)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,

    /// Time value.
    pub time: Float,

    /// Medium containing the origin.
    pub medium: Option<ArcMedium>,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    /// * `time`   - Time value.
    /// * `medium` - Medium containing origin `o`.
    pub fn new(
        o: Point3f,
        d: Vector3f,
        t_max: Float,
        time: Float,
        medium: Option<ArcMedium>,
    ) -> Self {
        Self {
            o,
            d,
            t_max,
            time,
            medium,
        }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.has_nans() || self.d.has_nans() || self.t_max.is_nan()
    }

    /// Get position along the ray at given parameter.
    ///
    /// * `t` - Parameter to evaluate.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Offset ray origin along the surface normal so that spawned rays do not
    /// re-intersect the surface they leave.
    ///
    /// `p`       - Intersection point.
    /// `p_error` - Floating point error for intersection points.
    /// `n`       - Surface normal at the point `p`.
    /// `w`       - The direction.
    pub fn offset_origin(p: &Point3f, p_error: &Vector3f, n: &Normal3f, w: &Vector3f) -> Point3f {
        let d = n.abs().dot(p_error);

        let mut offset = d * Vector3f::from(*n);
        if w.dot(n) < 0.0 {
            offset = -offset;
        }

        let po = *p + offset;

        // Round offset point po away from p.
        let round = |v: Float, o: Float| {
            if o > 0.0 {
                next_float_up(v)
            } else if o < 0.0 {
                next_float_down(v)
            } else {
                v
            }
        };
        Point3f::new(
            round(po.x, offset.x),
            round(po.y, offset.y),
            round(po.z, offset.z),
        )
    }
}

impl Debug for Ray {
    /// Display the ray parameters.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Ray")
            .field("o", &self.o)
            .field("d", &self.d)
            .field("t_max", &self.t_max)
            .field("time", &self.time)
            .field("medium", &self.medium.is_some())
            .finish()
    }
}

impl Default for Ray {
    /// Returns a default value for `Ray`.
    fn default() -> Self {
        Self {
            o: Point3f::default(),
            d: Vector3f::default(),
            t_max: INFINITY,
            time: 0.0,
            medium: None,
        }
    }
}
