// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::core::settings::RenderSettings;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector3f};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

pub use super::renderer::Renderer;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Configured worker count, or the hardware concurrency when unset.
pub fn worker_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => match thread::available_parallelism() {
            Ok(n) => n.get(),
            Err(err) => {
                log::warn!("Cannot query hardware concurrency ({}), rendering with 1 worker.", err);
                1
            }
        },
    }
}

/// Runs `render_row` once for every row in `0..height` on `workers` scoped
/// threads and returns the rows in order.
///
/// Workers claim rows from one shared cursor with `fetch_add`; a claimed row
/// belongs to its worker until it is sent back over the channel, so the
/// results need no lock. The calling thread only collects rows and reports
/// the cursor position to `on_progress` roughly every 100 ms, then once more
/// with `height` after all workers have joined.
pub fn dispatch_scanlines<T, P, R>(height: usize,
                                   workers: usize,
                                   mut on_progress: P,
                                   render_row: R) -> Vec<T>
where
    T: Send,
    P: FnMut(usize),
    R: Fn(usize) -> T + Sync,
{
    let cursor = AtomicUsize::new(0);
    let mut rows: Vec<Option<T>> = (0..height).map(|_| None).collect();
    let (tx, rx) = mpsc::channel::<(usize, T)>();

    thread::scope(|scope| {
        for _ in 0..workers.max(1) {
            let tx = tx.clone();
            let cursor = &cursor;
            let render_row = &render_row;
            scope.spawn(move || {
                loop {
                    let j = cursor.fetch_add(1, Ordering::Relaxed);
                    if j >= height {
                        break;
                    }
                    if tx.send((j, render_row(j))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut received = 0;
        let mut last_report = Instant::now();
        while received < height {
            match rx.recv_timeout(PROGRESS_INTERVAL) {
                Ok((j, row)) => {
                    rows[j] = Some(row);
                    received += 1;
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
            if last_report.elapsed() >= PROGRESS_INTERVAL {
                on_progress(cursor.load(Ordering::Relaxed).min(height));
                last_report = Instant::now();
            }
        }
    });
    on_progress(height);

    rows.into_iter().flatten().collect()
}

/// Renders whole scanlines in parallel. Each row draws its random numbers
/// from a generator seeded by `(seed, row)`, so the image does not depend on
/// the worker count or on which worker claimed which row.
pub struct ScanlineRenderer {
    integrator: Box<dyn Integrator>,
    samples_per_pixel: u32,
    seed: u64,
    threads: Option<usize>,
}

impl ScanlineRenderer {
    pub fn new(integrator: Box<dyn Integrator>, settings: &RenderSettings) -> Self {
        Self {
            integrator,
            samples_per_pixel: settings.samples_per_pixel,
            seed: settings.seed,
            threads: settings.threads,
        }
    }

    /// Averaged radiance for every pixel of row `j`.
    pub fn render_scanline(&self, scene: &Scene, sensor: &dyn Sensor, j: usize) -> Vec<Vector3f> {
        let spp = self.samples_per_pixel.max(1);
        let inv_spp = 1.0 / spp as Float;
        let mut rng = LcgRng::for_scanline(self.seed, j);

        (0..sensor.width())
            .map(|i| {
                let ray = sensor.primary_ray(i, j);
                let mut color = Vector3f::zeros();
                for _ in 0..spp {
                    color += self.integrator.li(scene, &ray, &mut rng);
                }
                color * inv_spp
            })
            .collect()
    }
}

impl ComputationNode for ScanlineRenderer {
    fn describe(&self) -> String {
        format!("ScanlineRenderer: {} spp, seed {}", self.samples_per_pixel, self.seed)
    }
}

impl Renderer for ScanlineRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap {
        let (width, height) = (sensor.width(), sensor.height());
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return bitmap;
        }

        let workers = worker_count(self.threads);
        log::info!("Rendering {}x{} at {} spp on {} workers.",
                   width, height, self.samples_per_pixel, workers);
        log::debug!("{}", sensor.describe());

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} scanlines")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let started = Instant::now();
        let rows = dispatch_scanlines(
            height,
            workers,
            |cursor| {
                progress.set_position(cursor as u64);
                log::debug!("progress {:.1}%", 100.0 * cursor as Float / height as Float);
            },
            |j| self.render_scanline(scene, sensor, j),
        );
        progress.finish_and_clear();

        for (j, row) in rows.iter().enumerate() {
            bitmap.set_row(j, row);
        }
        log::info!("Render finished in {:.2?}.", started.elapsed());
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneObject;
    use crate::integrators::path::PathIntegrator;
    use crate::materials::diffuse_light::DiffuseLight;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::math::spectrum::{RGBSpectrum, Spectrum};
    use crate::sensors::pinhole::PinholeCamera;
    use crate::shapes::triangle::Triangle;
    use std::sync::{Arc, Mutex};

    // A floor lit by a small overhead light, seen from the default eye.
    fn small_scene(settings: &RenderSettings) -> Scene {
        let eye = settings.eye;
        let floor = Triangle::facing(Vector3f::new(-2000.0, 0.0, -2000.0),
                                     Vector3f::new(2500.0, 0.0, -2000.0),
                                     Vector3f::new(278.0, 0.0, 3000.0),
                                     &eye);
        let back = Triangle::facing(Vector3f::new(-2000.0, -100.0, 560.0),
                                    Vector3f::new(2500.0, -100.0, 560.0),
                                    Vector3f::new(278.0, 2000.0, 560.0),
                                    &eye);
        let light = Triangle::facing(Vector3f::new(200.0, 500.0, 200.0),
                                     Vector3f::new(350.0, 500.0, 200.0),
                                     Vector3f::new(278.0, 500.0, 350.0),
                                     &Vector3f::new(278.0, 0.0, 278.0));
        let white: Arc<dyn crate::core::material::Material> =
            Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.7, 0.7, 0.7)));
        let emitter = Arc::new(DiffuseLight::new(RGBSpectrum::new(20.0, 18.0, 15.0),
                                                 RGBSpectrum::new(0.65, 0.65, 0.65)));
        Scene::with_objects(settings.clone(), vec![
            SceneObject::new(Arc::new(floor), white.clone()),
            SceneObject::new(Arc::new(back), white),
            SceneObject::new(Arc::new(light), emitter),
        ])
    }

    fn render_with(settings: &RenderSettings) -> Bitmap {
        let scene = small_scene(settings);
        let camera = PinholeCamera::from_settings(settings);
        let renderer = ScanlineRenderer::new(Box::new(PathIntegrator::from_settings(settings)), settings);
        renderer.render(&scene, &camera)
    }

    #[test]
    fn test_every_scanline_claimed_exactly_once() {
        let height = 37;
        for workers in 1..=worker_count(None) {
            let claimed = Mutex::new(Vec::new());
            let rows = dispatch_scanlines(height, workers, |_| {}, |j| {
                if let Ok(mut claimed) = claimed.lock() {
                    claimed.push(j);
                }
                j * 10
            });

            assert_eq!(rows, (0..height).map(|j| j * 10).collect::<Vec<_>>());
            let mut claimed = claimed.into_inner().unwrap_or_default();
            claimed.sort_unstable();
            assert_eq!(claimed, (0..height).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_progress_ends_at_full_height() {
        let mut reports = Vec::new();
        let rows = dispatch_scanlines(5, 2, |cursor| reports.push(cursor), |j| j);
        assert_eq!(rows.len(), 5);
        assert_eq!(reports.last(), Some(&5));
        assert!(reports.iter().all(|c| *c <= 5));
    }

    #[test]
    fn test_zero_height_dispatch() {
        let rows: Vec<usize> = dispatch_scanlines(0, 4, |_| {}, |j| j);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_worker_count() {
        assert_eq!(worker_count(Some(3)), 3);
        assert!(worker_count(None) >= 1);
        assert!(worker_count(Some(0)) >= 1);
    }

    #[test]
    fn test_render_is_deterministic() {
        let settings = RenderSettings::default()
            .with_resolution(24, 16)
            .with_spp(4)
            .with_max_depth(3)
            .with_seed(7);

        let first = render_with(&settings.clone().with_threads(1));
        let second = render_with(&settings.clone().with_threads(4));
        let third = render_with(&settings.clone().with_threads(4));
        assert_eq!(first, second);
        assert_eq!(second, third);

        assert!(first.pixels().iter().all(|p| p.is_valid()));
        assert!(first.pixels().iter().any(|p| !p.is_black()));

        let reseeded = render_with(&settings.with_seed(8).with_threads(2));
        assert_ne!(first, reseeded);
    }
}
