use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::scene::{ Scene, ColorGrid };
use crate::ray::Ray3D;
use crate::error::RenderError;

/// Renders a ray grid with one task per row.
///
/// The scene is shared read-only between workers and every row is written by
/// exactly one of them, so the output matches `Scene::render` pixel for
/// pixel.
pub fn parallel_render(scene: &Scene, rays: &[Vec<Ray3D>], threads: usize)
    -> Result<ColorGrid, RenderError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    info!("Rendering {} rows using {} threads...", rays.len(),
        pool.current_num_threads());
    let started = Instant::now();

    let grid: ColorGrid = pool.install(|| {
        rays.par_iter()
            .map(|row| scene.render_row(row))
            .collect()
    });

    info!("...done in {:.2?}.", started.elapsed());
    Ok(grid)
}

#[cfg(test)]
use crate::{
    color::Color,
    vector::Vector3D,
    shape::Shape,
    light::PointLight,
    material::{ Material, MaterialTable },
    camera::{ Camera, Screen },
};

#[test]
fn parallel_matches_serial() {
    let mut materials = MaterialTable::new();
    let grey = materials.add(
        Material::new(Color::rgb(200, 200, 200), 0.01, 0.001, 0.002, 50.0, 0.0)
    );
    let cyan = materials.add(
        Material::new(Color::rgb(100, 200, 200), 0.005, 0.05, 0.002, 1000.0, 0.0)
    );

    let shapes = vec![
        Shape::sphere(Vector3D::new(0.0, 0.0, 20.0), 5.0, cyan),
        Shape::plane(Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, -5.0, 0.0), grey),
    ];
    let lights = vec![
        PointLight::new(Color::white(), 1.0, Vector3D::new(15.0, 30.0, -10.0)),
    ];
    let scene = Scene::new(shapes, lights, Color::rgb(100, 100, 100), materials)
        .unwrap();

    let camera = Camera::new(16, 9, Vector3D::new(0.0, 0.0, -10.0),
        Screen::default()).unwrap();
    let rays = camera.rays();

    let serial = scene.render(&rays);
    let parallel = parallel_render(&scene, &rays, 3).unwrap();

    assert_eq!(serial, parallel);
}

#[test]
fn parallel_render_of_empty_grid() {
    let scene = Scene::new(Vec::new(), Vec::new(), Color::black(),
        MaterialTable::new()).unwrap();

    assert!(parallel_render(&scene, &[], 2).unwrap().is_empty());
}
