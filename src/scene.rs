use crate::ray::Ray3D;
use crate::color::Color;
use crate::shape::Shape;
use crate::light::{ PointLight, lighting };
use crate::material::{ Material, MaterialTable };
use crate::intersect::{ Intersection, Intersections, IntersectionComputation };
use crate::error::SceneError;

/// A row-major grid of rays, one per pixel.
pub type RayGrid = Vec<Vec<Ray3D>>;

/// A row-major grid of colors, shaped like the `RayGrid` it came from.
pub type ColorGrid = Vec<Vec<Color>>;

/// A scene with shapes, lights and an ambient color.
///
/// Scenes are built once and only read while rendering. Building one bakes
/// every material's ambient term, so shading never writes to the scene and
/// rows can be rendered in any order, on any thread.
#[derive(Clone, Debug)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<PointLight>,
    ambient: Color,
    materials: MaterialTable,
}

impl Scene {
    /// Creates a scene.
    ///
    /// Fails if a shape refers to a material missing from `materials`.
    pub fn new(shapes: Vec<Shape>, lights: Vec<PointLight>, ambient: Color,
        mut materials: MaterialTable) -> Result<Scene, SceneError> {
        if let Some((i, s)) = shapes.iter().enumerate()
            .find(|(_, s)| !materials.contains(s.material_id())) {
            return Err(SceneError::UnknownMaterial {
                description: format!(
                    "shape {} refers to material {}, but only {} exist",
                    i, s.material_id().0, materials.len()
                ),
            });
        }

        materials.bake_ambient(ambient);
        debug!("scene built with {} shapes, {} lights, {} materials",
            shapes.len(), lights.len(), materials.len());

        Ok(Scene { shapes, lights, ambient, materials })
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// Looks up the material of a shape belonging to this scene.
    pub fn material_of(&self, shape: &Shape) -> &Material {
        &self.materials[shape.material_id()]
    }

    /// Intersects a ray against all shapes in the scene, in scan order.
    pub fn intersect(&self, r: &Ray3D) -> Intersections {
        Intersections::collect(&self.shapes, r)
    }

    /// Finds the nearest shape in front of the ray origin.
    ///
    /// Ties are won by the shape that comes first in the scene.
    pub fn closest_shape(&self, r: &Ray3D) -> Option<Intersection> {
        self.intersect(r).hit()
    }

    /// Every shape except the one at `index`.
    pub fn occluders(&self, index: usize)
        -> impl Iterator<Item = &Shape> + Clone {
        self.shapes.iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .map(|(_, s)| s)
    }

    /// Calculates the color for a hit, based on shadows and light.
    pub fn shade_hit(&self, comps: &IntersectionComputation) -> Color {
        lighting(
            self.material_of(comps.obj),
            self.ambient,
            &self.lights,
            self.occluders(comps.index),
            comps.point,
            comps.eyev,
            comps.normalv,
        )
    }

    /// Determines a color based on the intersection of a ray and the shapes.
    ///
    /// A ray which hits nothing is transparent.
    pub fn color_at(&self, r: &Ray3D) -> Color {
        match self.closest_shape(r) {
            None => Color::transparent(),
            Some(i) => {
                let comps = IntersectionComputation::new(r, &i);
                self.shade_hit(&comps)
            },
        }
    }

    /// Shades a single row of rays.
    pub fn render_row(&self, row: &[Ray3D]) -> Vec<Color> {
        row.iter().map(|r| self.color_at(r)).collect()
    }

    /// Shades every ray of a grid, on the calling thread.
    pub fn render(&self, rays: &[Vec<Ray3D>]) -> ColorGrid {
        rays.iter().map(|row| self.render_row(row)).collect()
    }
}

#[cfg(test)]
use crate::{ vector::Vector3D, material::MaterialId };

/// Two spheres on a floor, lit from above and to the side.
#[cfg(test)]
fn test_scene() -> Scene {
    let mut materials = MaterialTable::new();
    let white = materials.add(
        Material::new(Color::white(), 0.001, 0.0, 0.0, 1.0, 0.0)
    );
    let red = materials.add(
        Material::new(Color::rgb(255, 0, 0), 0.002, 0.001, 0.5, 50.0, 0.0)
    );

    let shapes = vec![
        Shape::sphere(Vector3D::new(0.0, 0.0, 10.0), 1.0, red),
        Shape::sphere(Vector3D::new(0.0, 0.0, 20.0), 3.0, white),
        Shape::plane(Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, -1.0, 0.0), white),
    ];

    let lights = vec![
        PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, 10.0, 10.0)),
        PointLight::new(Color::rgb(0, 0, 255), 0.5, Vector3D::new(10.0, 0.0, 0.0)),
    ];

    Scene::new(shapes, lights, Color::rgb(2, 2, 2), materials).unwrap()
}

#[test]
fn scene_rejects_unknown_material() {
    let shapes = vec![
        Shape::sphere(Vector3D::zero(), 1.0, MaterialId(1)),
    ];
    let mut materials = MaterialTable::new();
    materials.add(Material::default());

    let res = Scene::new(shapes, Vec::new(), Color::black(), materials);
    assert!(matches!(res, Err(SceneError::UnknownMaterial { .. })));
}

#[test]
fn scene_bakes_ambient() {
    let s = test_scene();

    for shape in s.shapes() {
        assert!(s.material_of(shape).baked_ambient().is_some());
    }
}

#[test]
fn closest_shape_picks_nearest_positive() {
    let s = test_scene();
    let r = Ray3D::new(Vector3D::zero(), Vector3D::new(0.0, 0.0, 1.0));

    let hit = s.closest_shape(&r).unwrap();
    assert_eq!(hit.index, 0);
    assert_eq!(hit.t, 9.0);
}

#[test]
fn closest_shape_from_inside_sphere() {
    let s = test_scene();
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 10.0),
        Vector3D::new(0.0, 0.0, 1.0));

    // The far wall of the small sphere, not the origin-side root.
    let hit = s.closest_shape(&r).unwrap();
    assert_eq!(hit.index, 0);
    assert_eq!(hit.t, 1.0);
}

#[test]
fn closest_shape_miss() {
    let s = test_scene();
    let r = Ray3D::new(Vector3D::zero(), Vector3D::new(0.0, 1.0, 0.0));

    assert!(s.closest_shape(&r).is_none());
}

#[test]
fn occluders_skip_only_the_hit_shape() {
    let s = test_scene();
    let others: Vec<&Shape> = s.occluders(1).collect();

    assert_eq!(others.len(), 2);
    assert!(std::ptr::eq(others[0], &s.shapes()[0]));
    assert!(std::ptr::eq(others[1], &s.shapes()[2]));
}

#[test]
fn color_ray_miss() {
    let s = test_scene();
    let r = Ray3D::new(Vector3D::zero(), Vector3D::new(0.0, 1.0, 0.0));

    assert_eq!(s.color_at(&r), Color::transparent());
}

#[test]
fn color_sphere_top_is_lit() {
    let s = test_scene();

    // Straight down onto the small sphere, whose top faces the white light.
    let r = Ray3D::new(Vector3D::new(0.0, 5.0, 10.0),
        Vector3D::new(0.0, -1.0, 0.0));

    let hit = s.closest_shape(&r).unwrap();
    assert_eq!(hit.index, 0);
    assert_eq!(hit.t, 4.0);

    let c = s.color_at(&r);
    assert_eq!(c.a, 255);
    assert_eq!(c.r, 255);
    assert_eq!(c.g, 0);
}

#[test]
fn color_floor_shadowed_by_sphere() {
    let mut materials = MaterialTable::new();
    let white = materials.add(
        Material::new(Color::white(), 0.001, 0.0, 0.0, 1.0, 0.0)
    );
    let shapes = vec![
        Shape::sphere(Vector3D::new(0.0, 5.0, 0.0), 1.0, white),
        Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(), white),
    ];
    let lights = vec![
        PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, 10.0, 0.0)),
    ];
    let s = Scene::new(shapes, lights, Color::black(), materials).unwrap();

    // Straight under the sphere: only the ambient term, which is zero.
    let under = Ray3D::new(Vector3D::new(0.0, 1.0, -1.0),
        Vector3D::new(0.0, -1.0, 1.0));
    assert_eq!(s.color_at(&under), Color::rgb(0, 0, 0));

    // Far from the sphere the floor is lit.
    let open = Ray3D::new(Vector3D::new(50.0, 1.0, 0.0),
        Vector3D::new(0.0, -1.0, 0.0));
    assert!(s.color_at(&open).r > 0);
}

#[test]
fn render_keeps_grid_shape() {
    let s = test_scene();
    let dirs = [
        Vector3D::new(0.0, 0.0, 1.0),
        Vector3D::new(0.0, 1.0, 0.0),
        Vector3D::new(0.0, -1.0, 1.0),
    ];
    let grid: RayGrid = vec![
        dirs.iter().map(|d| Ray3D::new(Vector3D::zero(), *d)).collect(),
        dirs.iter().rev().map(|d| Ray3D::new(Vector3D::zero(), *d)).collect(),
    ];

    let out = s.render(&grid);

    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|row| row.len() == 3));
    assert_eq!(out[0][1], Color::transparent());
    assert_eq!(out[0][0], out[1][2]);
}

#[test]
fn render_is_deterministic() {
    let s = test_scene();
    let grid: RayGrid = (0..8).map(|y| {
        (0..8).map(|x| {
            let d = Vector3D::new(x as f64 - 4.0, y as f64 - 4.0, 10.0);
            Ray3D::new(Vector3D::zero(), d)
        }).collect()
    }).collect();

    assert_eq!(s.render(&grid), s.render(&grid));
}
