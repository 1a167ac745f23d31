use crate::vector::Vector3D;
use crate::color::Color;
use crate::shape::Shape;
use crate::light::PointLight;
use crate::material::{ Material, MaterialTable };
use crate::scene::Scene;
use crate::camera::{ Camera, Screen };
use crate::description::SceneSetup;
use crate::error::SceneError;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT };

/// The built-in scene: two spheres in a box of walls, lit from above.
pub fn demo_scene() -> Result<SceneSetup, SceneError> {
    demo_scene_sized(CANVAS_WIDTH, CANVAS_HEIGHT)
}

/// The built-in scene rendered onto a canvas of the given size.
pub fn demo_scene_sized(width: usize, height: usize)
    -> Result<SceneSetup, SceneError> {
    let mut materials = MaterialTable::new();
    let cyan = materials.add(Material::new(
        Color::rgb(100, 200, 200), 0.005, 0.05, 0.002, 1000.0, 0.0
    ));
    let red = materials.add(Material::new(
        Color::rgb(255, 0, 0), 0.003, 0.000005, 0.002, 5.0, 0.0
    ));
    let grey = materials.add(Material::new(
        Color::rgb(200, 200, 200), 0.01, 0.001, 0.002, 5000.0, 0.0
    ));
    let green = materials.add(Material::new(
        Color::rgb(0, 255, 0), 0.001, 0.001, 0.002, 5000.0, 0.0
    ));

    let shapes = vec![
        Shape::sphere(Vector3D::new(-10.0, -5.0, 125.0), 5.0, cyan),
        Shape::sphere(Vector3D::new(10.0, -5.0, 125.0), 5.0, red),

        // Floor, right and left walls.
        Shape::plane(Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, -10.0, 0.0), grey),
        Shape::plane(Vector3D::new(-1.0, 0.0, 0.0),
            Vector3D::new(25.0, -1.0, 0.0), grey),
        Shape::plane(Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(-25.0, -1.0, 0.0), grey),

        // Back wall.
        Shape::plane(Vector3D::new(0.0, 0.0, -1.0),
            Vector3D::new(0.0, -1.0, 200.0), green),
    ];

    let lights = vec![
        PointLight::new(Color::white(), 1.0, Vector3D::new(15.0, 30.0, 30.0)),
    ];

    let scene = Scene::new(shapes, lights, Color::rgb(100, 100, 100), materials)?;
    let camera = Camera::new(width, height, Vector3D::new(0.0, 0.0, -10.0),
        Screen::default())?;

    Ok(SceneSetup { scene, camera })
}

#[cfg(test)]
use crate::ray::Ray3D;

#[test]
fn demo_scene_layout() {
    let setup = demo_scene().unwrap();

    assert_eq!(setup.scene.shapes().len(), 6);
    assert_eq!(setup.scene.lights().len(), 1);
    assert_eq!(setup.scene.materials().len(), 4);
    assert_eq!(setup.camera.hsize, 2000);
    assert_eq!(setup.camera.vsize, 1000);
}

#[test]
fn demo_rays_hit_the_red_sphere() {
    let setup = demo_scene_sized(20, 10).unwrap();
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, -10.0),
        Vector3D::new(10.0, -5.0, 135.0));

    let hit = setup.scene.closest_shape(&r).unwrap();
    assert_eq!(hit.index, 1);
    assert_eq!(setup.scene.color_at(&r).a, 255);
}

#[test]
fn demo_has_no_transparent_pixels() {
    // Every ray ends on a wall or the floor of the box.
    let setup = demo_scene_sized(16, 8).unwrap();
    let grid = setup.scene.render(&setup.camera.rays());

    assert!(grid.iter().flatten().all(|c| c.a == 255));
}
