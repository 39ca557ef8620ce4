//! 3-D normals

use super::{Dot, FaceForward, Vector3f};
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};

/// A 3-D surface normal containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normal3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Normal3f {
    /// Zero normal.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Creates a new 3-D normal.
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

    /// Returns the square of the normal's length.
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the normal's length.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the unit normal.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns a new normal containing absolute values of the components.
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }
}

impl Dot<Normal3f> for Normal3f {
    /// Returns the dot product with another normal.
    ///
    /// * `other` - The other normal.
    fn dot(&self, other: &Normal3f) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl Dot<Vector3f> for Normal3f {
    /// Returns the dot product with a vector.
    ///
    /// * `other` - The vector.
    fn dot(&self, other: &Vector3f) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

// Allows pointing normals in the same hemisphere as another normal/vector.
impl FaceForward<Vector3f> for Normal3f {}
impl FaceForward<Normal3f> for Normal3f {}

impl Add for Normal3f {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Normal3f {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<Float> for Normal3f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(f * self.x, f * self.y, f * self.z)
    }
}

impl Mul<Normal3f> for Float {
    type Output = Normal3f;

    fn mul(self, n: Normal3f) -> Self::Output {
        n * self
    }
}

impl Div<Float> for Normal3f {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Neg for Normal3f {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Normal3f {
    type Output = Float;

    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {axis} for Normal3f"),
        }
    }
}

impl From<Vector3f> for Normal3f {
    /// Convert a 3-D vector to a 3-D surface normal.
    ///
    /// * `v` - 3-D vector.
    fn from(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Normal3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
