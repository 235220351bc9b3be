// Copyright @yucwang 2026

use crate::core::error::Result;
use crate::core::material::Material;
use crate::core::scene::{Scene, SceneObject};
use crate::core::settings::RenderSettings;
use crate::materials::diffuse_light::DiffuseLight;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::materials::roughconductor::RoughConductorBSDF;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::sphere::Sphere;
use crate::shapes::triangle::Triangle;
use crate::shapes::triangle_mesh::TriangleMesh;

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Which materials dress the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornellVariant {
    /// All diffuse surfaces.
    Classic,
    /// Copper tall block and a silver sphere resting on the short block.
    Glossy,
}

impl FromStr for CornellVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(CornellVariant::Classic),
            "glossy" => Ok(CornellVariant::Glossy),
            other => Err(format!("unknown scene '{}', expected classic or glossy", other)),
        }
    }
}

/// Point inside the box that every wall and the light face.
const INTERIOR: [Float; 3] = [278.0, 274.0, 280.0];

type Quad = [[Float; 3]; 4];

const WHITE_WALLS: [Quad; 3] = [
    // floor
    [[552.8, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 559.2], [549.6, 0.0, 559.2]],
    // ceiling
    [[556.0, 548.8, 0.0], [556.0, 548.8, 559.2], [0.0, 548.8, 559.2], [0.0, 548.8, 0.0]],
    // back wall
    [[549.6, 0.0, 559.2], [0.0, 0.0, 559.2], [0.0, 548.8, 559.2], [556.0, 548.8, 559.2]],
];

const RED_WALL: [Quad; 1] = [
    [[552.8, 0.0, 0.0], [549.6, 0.0, 559.2], [556.0, 548.8, 559.2], [556.0, 548.8, 0.0]],
];

const GREEN_WALL: [Quad; 1] = [
    [[0.0, 0.0, 559.2], [0.0, 0.0, 0.0], [0.0, 548.8, 0.0], [0.0, 548.8, 559.2]],
];

// Slightly below the ceiling so the light is never coplanar with it.
const LIGHT: [Quad; 1] = [
    [[343.0, 548.7, 227.0], [343.0, 548.7, 332.0], [213.0, 548.7, 332.0], [213.0, 548.7, 227.0]],
];

const SHORT_BLOCK: [Quad; 5] = [
    [[130.0, 165.0, 65.0], [82.0, 165.0, 225.0], [240.0, 165.0, 272.0], [290.0, 165.0, 114.0]],
    [[290.0, 0.0, 114.0], [290.0, 165.0, 114.0], [240.0, 165.0, 272.0], [240.0, 0.0, 272.0]],
    [[130.0, 0.0, 65.0], [130.0, 165.0, 65.0], [290.0, 165.0, 114.0], [290.0, 0.0, 114.0]],
    [[82.0, 0.0, 225.0], [82.0, 165.0, 225.0], [130.0, 165.0, 65.0], [130.0, 0.0, 65.0]],
    [[240.0, 0.0, 272.0], [240.0, 165.0, 272.0], [82.0, 165.0, 225.0], [82.0, 0.0, 225.0]],
];

const TALL_BLOCK: [Quad; 5] = [
    [[423.0, 330.0, 247.0], [265.0, 330.0, 296.0], [314.0, 330.0, 456.0], [472.0, 330.0, 406.0]],
    [[423.0, 0.0, 247.0], [423.0, 330.0, 247.0], [472.0, 330.0, 406.0], [472.0, 0.0, 406.0]],
    [[472.0, 0.0, 406.0], [472.0, 330.0, 406.0], [314.0, 330.0, 456.0], [314.0, 0.0, 456.0]],
    [[314.0, 0.0, 456.0], [314.0, 330.0, 456.0], [265.0, 330.0, 296.0], [265.0, 0.0, 296.0]],
    [[265.0, 0.0, 296.0], [265.0, 330.0, 296.0], [423.0, 330.0, 247.0], [423.0, 0.0, 247.0]],
];

const SPHERE_CENTER: [Float; 3] = [186.0, 225.01, 169.0];
const SPHERE_RADIUS: Float = 60.0;

fn interior() -> Vector3f {
    Vector3f::new(INTERIOR[0], INTERIOR[1], INTERIOR[2])
}

fn quads_to_mesh(quads: &[Quad]) -> TriangleMesh {
    let v = |p: [Float; 3]| Vector3f::new(p[0], p[1], p[2]);
    let triangles = quads
        .iter()
        .flat_map(|q| {
            [Triangle::new(v(q[0]), v(q[1]), v(q[2])),
             Triangle::new(v(q[0]), v(q[2]), v(q[3]))]
        })
        .collect();
    TriangleMesh::new(triangles)
}

pub fn red() -> Arc<dyn Material> {
    Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.63, 0.065, 0.05)))
}

pub fn green() -> Arc<dyn Material> {
    Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.14, 0.45, 0.091)))
}

pub fn white() -> Arc<dyn Material> {
    Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.725, 0.71, 0.68)))
}

/// Ceiling light: a blend of three emission peaks.
pub fn light() -> Arc<dyn Material> {
    let emission = RGBSpectrum::new(0.747 + 0.058, 0.747 + 0.258, 0.747) * 8.0
        + RGBSpectrum::new(0.740 + 0.287, 0.740 + 0.160, 0.740) * 15.6
        + RGBSpectrum::new(0.737 + 0.642, 0.737 + 0.159, 0.737) * 18.4;
    Arc::new(DiffuseLight::new(emission, RGBSpectrum::new(0.65, 0.65, 0.65)))
}

pub fn copper() -> Arc<dyn Material> {
    Arc::new(RoughConductorBSDF::new(0.3, RGBSpectrum::new(0.95, 0.64, 0.54)))
}

pub fn silver() -> Arc<dyn Material> {
    Arc::new(RoughConductorBSDF::new(0.08, RGBSpectrum::new(0.97, 0.96, 0.91)))
}

fn assemble(settings: RenderSettings,
            variant: CornellVariant,
            walls: TriangleMesh,
            short_block: TriangleMesh,
            tall_block: TriangleMesh,
            left: TriangleMesh,
            right: TriangleMesh,
            light_mesh: TriangleMesh) -> Scene {
    let inside = interior();
    let short_center = short_block.centroid();
    let tall_center = tall_block.centroid();

    let tall_material = match variant {
        CornellVariant::Classic => white(),
        CornellVariant::Glossy => copper(),
    };

    let mut objects = vec![
        SceneObject::new(Arc::new(walls.oriented_toward(&inside)), white()).with_name("floor"),
        SceneObject::new(Arc::new(short_block.oriented_away_from(&short_center)), white()).with_name("shortbox"),
        SceneObject::new(Arc::new(tall_block.oriented_away_from(&tall_center)), tall_material).with_name("tallbox"),
        SceneObject::new(Arc::new(left.oriented_toward(&inside)), red()).with_name("left"),
        SceneObject::new(Arc::new(right.oriented_toward(&inside)), green()).with_name("right"),
        SceneObject::new(Arc::new(light_mesh.oriented_toward(&inside)), light()).with_name("light"),
    ];
    if variant == CornellVariant::Glossy {
        let center = Vector3f::new(SPHERE_CENTER[0], SPHERE_CENTER[1], SPHERE_CENTER[2]);
        objects.push(SceneObject::new(Arc::new(Sphere::new(center, SPHERE_RADIUS)), silver()).with_name("sphere"));
    }

    let mut scene = Scene::new(settings);
    for object in objects {
        scene.add_object(object);
    }
    scene.build_bvh();
    scene
}

/// The classic Cornell box built from its published vertex data.
pub fn cornell_box(settings: RenderSettings) -> Scene {
    build_cornell_box(settings, CornellVariant::Classic)
}

pub fn build_cornell_box(settings: RenderSettings, variant: CornellVariant) -> Scene {
    log::info!("Building built-in Cornell box ({:?}).", variant);
    assemble(settings,
             variant,
             quads_to_mesh(&WHITE_WALLS),
             quads_to_mesh(&SHORT_BLOCK),
             quads_to_mesh(&TALL_BLOCK),
             quads_to_mesh(&RED_WALL),
             quads_to_mesh(&GREEN_WALL),
             quads_to_mesh(&LIGHT))
}

/// Same layout and materials, with geometry read from
/// `floor.obj, shortbox.obj, tallbox.obj, left.obj, right.obj, light.obj`.
pub fn cornell_box_from_dir<P: AsRef<Path>>(dir: P, settings: RenderSettings) -> Result<Scene> {
    load_cornell_box(dir, settings, CornellVariant::Classic)
}

/// `cornell_box_from_dir` with the materials of `variant`.
pub fn load_cornell_box<P: AsRef<Path>>(dir: P, settings: RenderSettings, variant: CornellVariant) -> Result<Scene> {
    let dir = dir.as_ref();
    log::info!("Loading Cornell box models from: {} ({:?}).", dir.display(), variant);
    let load = |name: &str| TriangleMesh::from_obj(dir.join(name));
    Ok(assemble(settings,
                variant,
                load("floor.obj")?,
                load("shortbox.obj")?,
                load("tallbox.obj")?,
                load("left.obj")?,
                load("right.obj")?,
                load("light.obj")?))
}
