//! 3-D Points

use super::Vector3f;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Sub};

/// A 3-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Point3f {
    /// Zero point (origin).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: Self) -> Float {
        (*self - other).length()
    }

    /// Returns the square of the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: Self) -> Float {
        (*self - other).length_squared()
    }

    /// Returns a new point containing absolute values of the components.
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }
}

impl Add<Vector3f> for Point3f {
    type Output = Self;

    /// Offsets the point by a vector.
    ///
    /// * `v` - The vector.
    fn add(self, v: Vector3f) -> Self::Output {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vector3f> for Point3f {
    fn add_assign(&mut self, v: Vector3f) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }
}

impl Add for Point3f {
    type Output = Self;

    /// Adds two points. Only meaningful for weighted sums like `lerp()`.
    ///
    /// * `other` - The other point.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3f {
    type Output = Vector3f;

    /// Returns the vector between two points.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Self::Output {
        Vector3f::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Sub<Vector3f> for Point3f {
    type Output = Self;

    fn sub(self, v: Vector3f) -> Self::Output {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<Float> for Point3f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    fn mul(self, p: Point3f) -> Self::Output {
        p * self
    }
}

impl Div<Float> for Point3f {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Index<usize> for Point3f {
    type Output = Float;

    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {axis} for Point3f"),
        }
    }
}

impl From<Vector3f> for Point3f {
    /// Convert a 3-D vector to a 3-D point.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Point3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn lerp_midpoint() {
        let p = lerp(0.5, Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 4.0, -6.0));
        assert_eq!(p, Point3f::new(1.0, 2.0, -3.0));
    }

    prop_point3!(
        point3_f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    proptest! {
        #[test]
        fn distance_f32(p1 in point3_f32(), p2 in point3_f32()) {
            let d = p1.distance(p2);
            prop_assert!(approx_eq!(f32, d * d, p1.distance_squared(p2), epsilon = 0.01));
            prop_assert_eq!(d, p2.distance(p1));
        }

        #[test]
        fn offset_by_difference(p1 in point3_f32(), p2 in point3_f32()) {
            let p = p2 + (p1 - p2);
            prop_assert!(approx_eq!(f32, p.x, p1.x, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, p.y, p1.y, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, p.z, p1.z, epsilon = 0.0001));
        }
    }
}
