// Copyright 2020 TwoCookingMice

use pathtrace::cli::{exit_status, SceneArgs};
use pathtrace::core::error::RenderError;
use pathtrace::integrators::path::PathIntegrator;
use pathtrace::io::write_image;
use pathtrace::renderers::scanline::{Renderer, ScanlineRenderer};
use pathtrace::sensors::pinhole::PinholeCamera;

use clap::Parser;
use std::path::PathBuf;

/// Renders the Cornell box with a multi-threaded path tracer.
#[derive(Parser, Debug)]
#[command(name = "pathtrace", version)]
struct Cli {
    /// Output image; the extension picks the format (ppm, exr, png)
    #[arg(short, long, default_value = "binary.ppm")]
    output: PathBuf,

    #[command(flatten)]
    scene: SceneArgs,
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let scene = cli.scene.build_scene()?;
    let settings = scene.settings().clone();
    log::info!("SPP: {}", settings.samples_per_pixel);

    let camera = PinholeCamera::from_settings(&settings);
    let integrator = Box::new(PathIntegrator::from_settings(&settings));
    let renderer = ScanlineRenderer::new(integrator, &settings);
    let image = renderer.render(&scene, &camera);

    write_image(&image, &cli.output)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    std::process::exit(exit_status(&run(&cli)));
}
