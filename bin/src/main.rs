#[macro_use]
extern crate log;

mod options;
mod estimate;

use clap::Parser;
use lumen_core::geometry::*;
use lumen_core::interaction::*;
use lumen_core::light::*;
use lumen_core::medium::*;
use lumen_core::spectrum::*;
use lumen_lights::*;
use lumen_shapes::*;
use options::*;
use estimate::*;
use std::sync::Arc;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();

    // In case of error report it and exit with a failure status.
    if let Err(e) = run(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    let light = create_light(options)?;
    let power = light.power();
    info!("Light power: {power} (luminance {})", power.y());

    let hit = Hit::new_minimal(Point3f::new(0.0, 0.0, options.distance), 0.0, None);
    let stats = run_estimate(
        &light,
        &hit,
        options.sample_count(),
        options.threads(),
        options.seed,
        options.quiet,
    )?;

    if !options.quiet {
        println!("samples            : {}", stats.samples);
        println!("valid fraction     : {:.4}", stats.valid_fraction());
        println!("max pdf_li mismatch: {:.3e}", stats.max_pdf_error);
        println!("pdf_le integral    : {:.4}", stats.pdf_le_integral());
    }

    Ok(())
}

/// Builds the area light described by the options.
///
/// * `options` - Command line options.
fn create_light(options: &Options) -> Result<ArcLight, String> {
    let light_to_world = Arc::new(Transform::IDENTITY);
    let shape: ArcShape = match options.shape {
        ShapeKind::Disk => Arc::new(Disk::new(
            Arc::clone(&light_to_world),
            false,
            0.0,
            options.radius,
            0.0,
            360.0,
        )),
        ShapeKind::Sphere => Arc::new(Sphere::full(
            Arc::clone(&light_to_world),
            false,
            options.radius,
        )),
    };

    let light = DiffuseAreaLight::new(
        light_to_world,
        MediumInterface::vacuum(),
        Spectrum::new(options.l_emit),
        1,
        shape,
        options.two_sided,
    )?;
    Ok(Arc::new(light))
}
