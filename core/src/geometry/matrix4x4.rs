//! 4x4 Matrix

use crate::pbrt::*;
use std::ops::{Index, Mul};

/// A 4x4 matrix stored in row-major order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix4x4 {
    /// The matrix elements.
    pub m: [[Float; 4]; 4],
}

impl Matrix4x4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create a new matrix from its rows.
    ///
    /// * `m` - The matrix elements.
    pub const fn new(m: [[Float; 4]; 4]) -> Self {
        Self { m }
    }

    /// Returns the transpose of the matrix.
    pub fn transpose(&self) -> Self {
        let mut t = [[0.0; 4]; 4];
        for (i, row) in self.m.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                t[j][i] = *v;
            }
        }
        Self { m: t }
    }
}

impl Default for Matrix4x4 {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Matrix4x4> for Matrix4x4 {
    type Output = Self;

    /// Multiply two matrices.
    ///
    /// * `other` - The other matrix.
    fn mul(self, other: Self) -> Self::Output {
        let mut r = [[0.0; 4]; 4];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        Self { m: r }
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [Float; 4];

    /// Returns a row of the matrix.
    ///
    /// * `i` - The row index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral() {
        let a = Matrix4x4::new([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        assert_eq!(a * Matrix4x4::IDENTITY, a);
        assert_eq!(Matrix4x4::IDENTITY * a, a);
        assert_eq!(a.transpose()[0], [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(a.transpose().transpose(), a);
    }
}
