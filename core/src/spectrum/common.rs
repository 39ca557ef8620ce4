//! Common

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Interface and helper functions for SPDs.
pub trait CoefficientSpectrum:
    Sized
    + Copy
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Self, Output = Self>
    + Mul<Float, Output = Self>
    + MulAssign<Float>
    + Div<Float, Output = Self>
    + Neg<Output = Self>
    + Index<usize, Output = Float>
    + IndexMut<usize>
    + Clamp<Float>
{
    /// Returns the stored samples.
    fn samples(&self) -> &[Float];

    /// Returns stored samples as mutable.
    fn samples_mut(&mut self) -> &mut [Float];

    /// Returns true if either coefficient is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if the values are zero everywhere.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns true if any coefficient is negative.
    fn has_negatives(&self) -> bool {
        self.samples().iter().any(|v| *v < 0.0)
    }

    /// Returns the maximum sample value.
    fn max_component_value(&self) -> Float {
        self.samples().iter().fold(-INFINITY, |m, v| max(m, *v))
    }

    /// Takes the square root of all sample values.
    fn sqrt(&self) -> Self {
        let mut s = *self;
        for v in s.samples_mut().iter_mut() {
            *v = v.sqrt();
        }
        s
    }

    /// Sets sample values `v` to `e^v`.
    fn exp(&self) -> Self {
        let mut s = *self;
        for v in s.samples_mut().iter_mut() {
            *v = v.exp();
        }
        s
    }

    /// Returns the y-coefficient of XYZ colour (luminance).
    fn y(&self) -> Float;

    /// Converts RGB values to a full SPD.
    ///
    /// * `rgb` - RGB colour value.
    fn from_rgb(rgb: &[Float; 3]) -> Self;

    /// Convert the SPD to RGB cooefficients.
    fn to_rgb(&self) -> [Float; 3];
}

/// Converts the given XYZ coefficients to RGB coefficients using RGB spectra
/// defined for high-definition TVs.
///
/// * `xyz` - The XYZ coefficients.
#[rustfmt::skip]
pub fn xyz_to_rgb(xyz: &[Float; 3]) -> [Float; 3] {
    [
         3.240479 * xyz[0] - 1.537150 * xyz[1] - 0.498535 * xyz[2],
        -0.969256 * xyz[0] + 1.875991 * xyz[1] + 0.041556 * xyz[2],
         0.055648 * xyz[0] - 0.204043 * xyz[1] + 1.057311 * xyz[2],
    ]
}

/// Converts the given RGB coefficients to XYZ coefficients using RGB spectra
/// defined for high-definition TVs.
///
/// * `rgb` - The RGB coefficients.
#[rustfmt::skip]
pub fn rgb_to_xyz(rgb: &[Float; 3]) -> [Float; 3] {
    [
        0.412453 * rgb[0] + 0.357580 * rgb[1] + 0.180423 * rgb[2],
        0.212671 * rgb[0] + 0.715160 * rgb[1] + 0.072169 * rgb[2],
        0.019334 * rgb[0] + 0.119193 * rgb[1] + 0.950227 * rgb[2],
    ]
}
