//! Parallel light sampling estimates

use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::pbrt::*;
use lumen_core::rng::RNG;
use lumen_core::sampling::*;

/// Number of samples handed to a worker at a time.
pub const BATCH_SIZE: usize = 4096;

/// Statistics gathered over a batch of light samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SampleStats {
    /// Number of samples drawn.
    pub samples: usize,

    /// Samples with a positive density and non-black radiance.
    pub valid: usize,

    /// Largest relative difference between the `sample_li()` density and the
    /// `pdf_li()` density for the same direction.
    pub max_pdf_error: Float,

    /// Sum of `pdf_le()` direction densities divided by the uniform sphere
    /// density. Its mean estimates the integral of the direction density.
    pub pdf_le_sum: f64,
}

impl SampleStats {
    /// Combines the statistics of two batches.
    ///
    /// * `other` - Statistics to merge in.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            valid: self.valid + other.valid,
            max_pdf_error: max(self.max_pdf_error, other.max_pdf_error),
            pdf_le_sum: self.pdf_le_sum + other.pdf_le_sum,
        }
    }

    /// Returns the fraction of samples that carried radiance.
    pub fn valid_fraction(&self) -> Float {
        if self.samples == 0 {
            0.0
        } else {
            self.valid as Float / self.samples as Float
        }
    }

    /// Returns the Monte Carlo estimate of the `pdf_le()` normalisation.
    pub fn pdf_le_integral(&self) -> Float {
        if self.samples == 0 {
            0.0
        } else {
            (self.pdf_le_sum / self.samples as f64) as Float
        }
    }
}

/// Evaluates one batch of samples against a light.
///
/// * `light`   - The light.
/// * `hit`     - Reference point.
/// * `rng`     - Random number generator owned by the worker.
/// * `samples` - Number of samples to draw.
pub fn estimate_batch(light: &ArcLight, hit: &Hit, rng: &mut RNG, samples: usize) -> SampleStats {
    let mut stats = SampleStats {
        samples,
        ..SampleStats::default()
    };

    for _ in 0..samples {
        let li = light.sample_li(hit, &rng.uniform_point2f());
        if li.is_valid() {
            stats.valid += 1;
            let pdf = light.pdf_li(hit, &li.wi);
            stats.max_pdf_error = max(stats.max_pdf_error, (pdf - li.pdf).abs() / li.pdf);
        }

        let le = light.sample_le(&rng.uniform_point2f(), &rng.uniform_point2f(), 0.0);
        let w = uniform_sample_sphere(&rng.uniform_point2f());
        let ray = Ray::new(le.ray.o, w, INFINITY, 0.0, None);
        let pdf = light.pdf_le(&ray, &le.n_light);
        stats.pdf_le_sum += (pdf.pdf_dir / uniform_sphere_pdf()) as f64;
    }

    stats
}

/// Distributes `samples` over `threads` workers and merges their statistics.
///
/// * `light`   - The light.
/// * `hit`     - Reference point.
/// * `samples` - Total number of samples.
/// * `threads` - Number of worker threads.
/// * `seed`    - Offset for the per batch random number sequences.
/// * `quiet`   - Hide the progress bar.
pub fn run_estimate(
    light: &ArcLight,
    hit: &Hit,
    samples: usize,
    threads: usize,
    seed: u64,
    quiet: bool,
) -> Result<SampleStats, String> {
    let batch_count = (samples + BATCH_SIZE - 1) / BATCH_SIZE;
    info!("Estimating {} samples in {} batches", samples, batch_count);

    let progress = create_progress_reporter(batch_count as u64, quiet);
    progress.set_message("Sampling light");

    let (stats_tx, stats_rx) = crossbeam_channel::unbounded();

    crossbeam::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded::<usize>(threads);

        // Spawn worker threads.
        for _ in 0..threads {
            let rxc = rx.clone();
            let stats_tx = stats_tx.clone();
            let progress = &progress;
            scope.spawn(move |_| {
                for batch_idx in rxc.iter() {
                    let start = batch_idx * BATCH_SIZE;
                    let n = min(BATCH_SIZE, samples - start);
                    let mut rng = RNG::new(seed.wrapping_add(batch_idx as u64));
                    let stats = estimate_batch(light, hit, &mut rng, n);
                    if stats_tx.send(stats).is_err() {
                        break;
                    }
                    progress.inc(1);
                }
            });
        }
        drop(rx); // Drop extra rx since we've cloned one for each woker.

        // Send work.
        for batch_idx in 0..batch_count {
            if tx.send(batch_idx).is_err() {
                error!("All sampling workers exited early");
                break;
            }
        }
    })
    .map_err(|_| String::from("A sampling worker panicked"))?;
    drop(stats_tx);

    progress.finish_with_message("Sampling complete");

    Ok(stats_rx
        .iter()
        .fold(SampleStats::default(), |acc, s| acc.merge(&s)))
}

/// Creates a progress bar for `total` units of work.
///
/// * `total` - Amount of work.
/// * `quiet` - Hide the progress bar.
fn create_progress_reporter(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(total);
    match ProgressStyle::with_template("{spinner:.green} {msg} [{wide_bar:.cyan}] {pos}/{len} ({eta})") {
        Ok(style) => progress.set_style(style.progress_chars("=> ")),
        Err(e) => warn!("Invalid progress bar template: {}", e),
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::medium::MediumInterface;
    use lumen_core::spectrum::Spectrum;
    use lumen_lights::DiffuseAreaLight;
    use lumen_shapes::Disk;
    use std::sync::Arc;

    fn disk_light() -> ArcLight {
        let l2w = Arc::new(Transform::IDENTITY);
        let disk = Disk::new(Arc::clone(&l2w), false, 0.0, 1.0, 0.0, 360.0);
        Arc::new(
            DiffuseAreaLight::new(
                l2w,
                MediumInterface::vacuum(),
                Spectrum::ONE,
                1,
                Arc::new(disk),
                true,
            )
            .unwrap(),
        )
    }

    #[test]
    fn thread_count_does_not_change_results() {
        let light = disk_light();
        let hit = Hit::new_minimal(Point3f::new(0.0, 0.0, 3.0), 0.0, None);
        let one = run_estimate(&light, &hit, 10_000, 1, 7, true).unwrap();
        let four = run_estimate(&light, &hit, 10_000, 4, 7, true).unwrap();
        assert_eq!(one.samples, 10_000);
        assert_eq!(one.samples, four.samples);
        assert_eq!(one.valid, four.valid);
        assert_eq!(one.max_pdf_error, four.max_pdf_error);
    }

    #[test]
    fn disk_estimate_is_consistent() {
        let light = disk_light();
        let hit = Hit::new_minimal(Point3f::new(0.0, 0.0, 3.0), 0.0, None);
        let stats = run_estimate(&light, &hit, 20_000, 2, 0, true).unwrap();
        assert!(stats.valid_fraction() > 0.99);
        assert!(stats.max_pdf_error < 1e-4);
        assert!((stats.pdf_le_integral() - 1.0).abs() < 0.05);
    }

    #[test]
    fn empty_stats() {
        let stats = SampleStats::default();
        assert_eq!(stats.valid_fraction(), 0.0);
        assert_eq!(stats.pdf_le_integral(), 0.0);
    }
}
