//! RGB Spectrum

use super::common::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Number of RGB samples.
pub const RGB_SAMPLES: usize = 3;

/// Stores a spectral power distribution as linear RGB coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBSpectrum {
    /// The RGB coefficients.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black (zero) spectrum.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// Unit spectrum.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub const fn new(v: Float) -> Self {
        Self { c: [v; RGB_SAMPLES] }
    }

    /// Create a new `RGBSpectrum` from individual coefficients.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }
}

impl Default for RGBSpectrum {
    /// Returns a black spectrum.
    fn default() -> Self {
        Self::ZERO
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    fn samples(&self) -> &[Float] {
        &self.c
    }

    fn samples_mut(&mut self) -> &mut [Float] {
        &mut self.c
    }

    fn y(&self) -> Float {
        const Y_WEIGHT: [Float; 3] = [0.212671, 0.715160, 0.072169];
        Y_WEIGHT[0] * self.c[0] + Y_WEIGHT[1] * self.c[1] + Y_WEIGHT[2] * self.c[2]
    }

    fn from_rgb(rgb: &[Float; 3]) -> Self {
        Self { c: *rgb }
    }

    fn to_rgb(&self) -> [Float; 3] {
        self.c
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        let mut s = self;
        s += other;
        s
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.c.iter_mut().zip(other.c.iter()) {
            *a += *b;
        }
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::rgb(
            self.c[0] - other.c[0],
            self.c[1] - other.c[1],
            self.c[2] - other.c[2],
        )
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self::rgb(
            self.c[0] * other.c[0],
            self.c[1] * other.c[1],
            self.c[2] * other.c[2],
        )
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::rgb(self.c[0] * f, self.c[1] * f, self.c[2] * f)
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        for v in self.c.iter_mut() {
            *v *= f;
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::rgb(-self.c[0], -self.c[1], -self.c[2])
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        &self.c[index]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl Clamp<Float> for RGBSpectrum {
    /// Clamps the coefficients to [low, high].
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        Self::rgb(
            clamp(self.c[0], low, high),
            clamp(self.c[1], low, high),
            clamp(self.c[2], low, high),
        )
    }

    /// Clamps the coefficients to [0, ∞].
    fn clamp_default(&self) -> Self {
        self.clamp(0.0, INFINITY)
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
