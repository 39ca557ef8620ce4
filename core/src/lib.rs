//! Core

extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod geometry;
pub mod interaction;
pub mod light;
pub mod light_distrib;
pub mod low_discrepancy;
pub mod medium;
pub mod pbrt;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod spectrum;
