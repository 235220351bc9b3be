// Copyright @yucwang 2026

use pathtrace::cli::{exit_status, SceneArgs};
use pathtrace::core::error::RenderError;
use pathtrace::core::integrator::Integrator;
use pathtrace::core::rng::LcgRng;
use pathtrace::core::sensor::Sensor;
use pathtrace::integrators::path::PathIntegrator;
use pathtrace::math::constants::{Float, Vector3f};
use pathtrace::sensors::pinhole::PinholeCamera;

use clap::Parser;

/// Traces a single pixel and prints its averaged radiance. Uses the same
/// per-scanline random stream as a full render, so the value matches column
/// `x` of row `y` in the rendered image.
#[derive(Parser, Debug)]
#[command(name = "render_pixel")]
struct Cli {
    x: usize,
    y: usize,

    #[command(flatten)]
    scene: SceneArgs,
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let scene = cli.scene.build_scene()?;
    let settings = scene.settings().clone();
    let camera = PinholeCamera::from_settings(&settings);
    if cli.x >= camera.width() || cli.y >= camera.height() {
        return Err(RenderError::InvalidSettings(format!(
            "pixel ({}, {}) out of bounds for size {}x{}", cli.x, cli.y, camera.width(), camera.height())));
    }

    let integrator = PathIntegrator::from_settings(&settings);
    let spp = settings.samples_per_pixel.max(1);
    let mut rng = LcgRng::for_scanline(settings.seed, cli.y);

    let mut avg = Vector3f::zeros();
    for x in 0..=cli.x {
        let ray = camera.primary_ray(x, cli.y);
        let mut accum = Vector3f::zeros();
        for _ in 0..spp {
            accum += integrator.li(&scene, &ray, &mut rng);
        }
        avg = accum * (1.0 / spp as Float);
    }

    println!(
        "pixel ({}, {}) spp={} depth={} -> R {:.6}, G {:.6}, B {:.6}",
        cli.x, cli.y, spp, settings.max_depth, avg.x, avg.y, avg.z
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    std::process::exit(exit_status(&run(&cli)));
}
