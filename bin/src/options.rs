//! Command line options

use clap::{Parser, ValueEnum};
use lumen_core::pbrt::Float;

/// Shape used for the area light.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShapeKind {
    /// Disk in the z=0 plane facing +z.
    Disk,

    /// Sphere centered at the origin.
    Sphere,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Check the sampling routines of a diffuse area light.", long_about = None)]
pub struct Options {
    /// Shape of the area light.
    #[arg(long, value_enum, default_value_t = ShapeKind::Disk)]
    pub shape: ShapeKind,

    /// Radius of the shape.
    #[arg(long, short = 'r', value_name = "FLOAT", default_value_t = 1.0)]
    pub radius: Float,

    /// Emitted radiance in every channel.
    #[arg(long = "L", value_name = "FLOAT", default_value_t = 1.0)]
    pub l_emit: Float,

    /// Emit from both sides of the surface.
    #[arg(long = "twosided")]
    pub two_sided: bool,

    /// Distance of the reference point along the +z axis.
    #[arg(long, short = 'd', value_name = "FLOAT", default_value_t = 10.0)]
    pub distance: Float,

    /// Number of light samples to evaluate.
    #[arg(long, short = 'n', value_name = "NUM", default_value_t = 100_000)]
    pub samples: usize,

    /// Number of threads to use.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for sampling."
    )]
    n_threads: usize,

    /// Seed selecting the random number sequences.
    #[arg(long, value_name = "NUM", default_value_t = 0)]
    pub seed: u64,

    /// Evaluate a quarter of the samples.
    #[arg(long = "quick")]
    pub quick: bool,

    /// Suppress all text output other than error messages.
    #[arg(long)]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the number of samples to evaluate.
    pub fn sample_count(&self) -> usize {
        if self.quick {
            (self.samples / 4).max(1)
        } else {
            self.samples
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::parse_from(["lumen"]);
        assert_eq!(options.shape, ShapeKind::Disk);
        assert_eq!(options.radius, 1.0);
        assert!(!options.two_sided);
        assert_eq!(options.threads(), 1);
        assert_eq!(options.sample_count(), 100_000);
    }

    #[test]
    fn quick_reduces_samples() {
        let options = Options::parse_from(["lumen", "--shape", "sphere", "--quick", "-n", "400"]);
        assert_eq!(options.shape, ShapeKind::Sphere);
        assert_eq!(options.sample_count(), 100);
    }

    #[test]
    fn zero_threads_falls_back_to_one() {
        let options = Options::parse_from(["lumen", "--nthreads", "0"]);
        assert_eq!(options.threads(), 1);
    }
}
