//! 2-D Points

use crate::pbrt::*;
use std::fmt;
use std::ops::Index;

/// A 2-D point containing `Float` values. Used mostly for sample values in
/// `[0, 1)^2`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,
}

impl Point2f {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl Index<usize> for Point2f {
    type Output = Float;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 2-D coordinate axis (0 or 1).
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis {axis} for Point2f"),
        }
    }
}

impl From<[Float; 2]> for Point2f {
    fn from(a: [Float; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

impl fmt::Display for Point2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_from_array() {
        let p = Point2f::from([0.25, 0.75]);
        assert_eq!(p[0], 0.25);
        assert_eq!(p[1], 0.75);
        assert!(!p.has_nans());
    }
}
