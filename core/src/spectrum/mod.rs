//! Spectrum

mod common;
mod rgb_spectrum;

// Re-export
pub use common::*;
pub use rgb_spectrum::*;

/// Use `RGBSpectrum` for radiometric quantities.
pub type Spectrum = RGBSpectrum;

/// Number of samples used in `Spectrum`.
pub const SPECTRUM_SAMPLES: usize = RGB_SAMPLES;
