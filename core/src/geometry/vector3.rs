//! 3-D Vectors

use super::{Dot, Normal3f, Point3f};
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3-D vector containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new 3-D vector.
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

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self {
        // Evaluate in double precision to avoid catastrophic cancellation.
        let (v1x, v1y, v1z) = (self.x as f64, self.y as f64, self.z as f64);
        let (v2x, v2y, v2z) = (other.x as f64, other.y as f64, other.z as f64);
        Self::new(
            ((v1y * v2z) - (v1z * v2y)) as Float,
            ((v1z * v2x) - (v1x * v2z)) as Float,
            ((v1x * v2y) - (v1y * v2x)) as Float,
        )
    }

    /// Returns the largest coordinate value.
    pub fn max_component(&self) -> Float {
        max(self.x, max(self.y, self.z))
    }
}

impl Dot<Vector3f> for Vector3f {
    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    fn dot(&self, other: &Vector3f) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Dot<Normal3f> for Vector3f {
    /// Returns the dot product with a normal.
    ///
    /// * `other` - The normal.
    fn dot(&self, other: &Normal3f) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3f {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector3f {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<Float> for Vector3f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Self::Output {
        v * self
    }
}

impl MulAssign<Float> for Vector3f {
    fn mul_assign(&mut self, f: Float) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
    }
}

impl Div<Float> for Vector3f {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl DivAssign<Float> for Vector3f {
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Vector3f {
    type Output = Float;

    /// Index the vector by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis (0, 1 or 2).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {axis} for Vector3f"),
        }
    }
}

impl From<Point3f> for Vector3f {
    /// Convert a 3-D point to a 3-D vector.
    ///
    /// * `p` - 3-D point.
    fn from(p: Point3f) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Normal3f> for Vector3f {
    /// Convert a 3-D normal to a 3-D vector.
    ///
    /// * `n` - 3-D normal.
    fn from(n: Normal3f) -> Self {
        Self::new(n.x, n.y, n.z)
    }
}

impl fmt::Display for Vector3f {
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
    fn zero_vector() {
        assert!(Vector3f::ZERO == Vector3f::new(0.0, 0.0, 0.0));
        assert!(!Vector3f::ZERO.has_nans());
        assert!(Vector3f::new(Float::NAN, 0.0, 1.0).has_nans());
    }

    #[test]
    fn cross_axes() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        let y = Vector3f::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3f::new(0.0, 0.0, -1.0));
    }

    #[test]
    #[should_panic]
    fn index_out_of_range() {
        let _ = Vector3f::ZERO[3];
    }

    prop_vector3!(
        vector3_f32,
        -100.0..100.0f32,
        -100.0..100.0f32,
        -100.0..100.0f32
    );

    proptest! {
        #[test]
        fn normalize_f32(v in vector3_f32().prop_filter("non-zero", |v| v.length() > 1e-3)) {
            let n = v.normalize();
            prop_assert!(approx_eq!(f32, n.length(), 1.0, epsilon = 0.0001));
        }

        #[test]
        fn cross_is_orthogonal(v1 in vector3_f32(), v2 in vector3_f32()) {
            let c = v1.cross(&v2);
            let scale = (v1.length() * v2.length()).max(1.0);
            prop_assert!((c.dot(&v1) / (scale * v1.length().max(1.0))).abs() < 0.001);
            prop_assert!((c.dot(&v2) / (scale * v2.length().max(1.0))).abs() < 0.001);
        }

        #[test]
        fn add_sub_f32(v1 in vector3_f32(), v2 in vector3_f32()) {
            let v = (v1 + v2) - v2;
            prop_assert!(approx_eq!(f32, v.x, v1.x, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, v.y, v1.y, epsilon = 0.0001));
            prop_assert!(approx_eq!(f32, v.z, v1.z, epsilon = 0.0001));
        }

        #[test]
        fn abs_dot_f32(v1 in vector3_f32(), v2 in vector3_f32()) {
            prop_assert_eq!(v1.abs_dot(&v2), v1.dot(&v2).abs());
        }
    }
}
