use crate::color::Color;
use crate::vector::Vector3D;
use crate::ray::Ray3D;
use crate::shape::Shape;
use crate::material::Material;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
///
/// `intensity` is carried along with the light (nominally in `[0, 1]`) but
/// lighting does not scale by it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f64,
    pub position: Vector3D,
}

impl PointLight {
    pub fn new(color: Color, intensity: f64, position: Vector3D)
        -> PointLight {
        PointLight { color, intensity, position }
    }
}

impl Default for PointLight {
    fn default() -> PointLight {
        PointLight::new(Color::white(), 1.0, Vector3D::zero())
    }
}

/// Determines whether `point` is cut off from `light`.
///
/// A shadow ray is cast from `point` toward the light. Any occluder root
/// strictly less than the distance to the light blocks it, including roots
/// behind `point`. The ray starts exactly at `point`; no offset is applied,
/// so the shape being shaded must not be among `occluders`.
pub fn is_shadowed<'a, I>(light: &PointLight, point: Vector3D, occluders: I)
    -> bool
    where I: IntoIterator<Item = &'a Shape> {
    let v = light.position - point;
    let distance = v.magnitude();
    let r = Ray3D::new(point, v);

    occluders.into_iter().any(|obj| {
        obj.intersect(&r).into_iter().any(|t| t < distance)
    })
}

/// Calculate the lighting of a point on a surface.
///
/// Sums the material's ambient term with the diffuse and specular terms of
/// every light which reaches `point`. `occluders` is every other shape in the
/// scene; it is walked once per light. Each channel is clipped to 8 bits and
/// the result is always opaque.
pub fn lighting<'a, I>(m: &Material, scene_ambient: Color, lights: &[PointLight],
    occluders: I, point: Vector3D, eyev: Vector3D, normalv: Vector3D) -> Color
    where I: IntoIterator<Item = &'a Shape> + Clone {
    let ambient = m.ambient_color(scene_ambient).channels();
    let mut totals = [0.0; 3];

    for light in lights.iter() {
        if is_shadowed(light, point, occluders.clone()) {
            continue;
        }

        let (diffuse, specular) = diffuse_specular(m, light, point, eyev, normalv);
        let color = light.color.channels();
        for c in 0..3 {
            totals[c] += color[c] * (diffuse[c] + specular[c]);
        }
    }

    Color::from_channels([
        ambient[0] + totals[0],
        ambient[1] + totals[1],
        ambient[2] + totals[2],
    ])
}

/// The diffuse and specular terms of a single, unobstructed light.
///
/// Both are zero when the light sits behind the surface.
fn diffuse_specular(m: &Material, light: &PointLight, point: Vector3D,
    eyev: Vector3D, normalv: Vector3D) -> ([f64; 3], [f64; 3]) {
    let mut diffuse = [0.0; 3];
    let mut specular = [0.0; 3];

    let lightv = (light.position - point).normalized();

    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal <= 0.0 {
        return (diffuse, specular);
    }

    let reflectv = (-lightv).reflect(&normalv).normalized();
    let reflect_dot_eye = reflectv.dot(&eyev);
    let factor = if reflect_dot_eye > 0.0 {
        reflect_dot_eye.powf(m.shininess)
    } else {
        0.0
    };

    for c in 0..3 {
        diffuse[c] = m.diffuse_consts[c] * light_dot_normal;
        specular[c] = m.specular_consts[c] * factor;
    }

    (diffuse, specular)
}

#[cfg(test)]
use crate::material::MaterialId;

#[cfg(test)]
fn overhead_light() -> PointLight {
    PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, 10.0, 0.0))
}

#[cfg(test)]
fn dim_material() -> Material {
    Material::new(Color::white(), 0.001, 0.0, 0.0, 1.0, 0.0)
}

#[cfg(test)]
const UP: Vector3D = Vector3D { x: 0.0, y: 1.0, z: 0.0 };

#[test]
fn direct_light_clips_to_white() {
    let m = Material::new(Color::white(), 0.5, 0.5, 0.5, 0.005, 0.5);
    let light = PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, 1.0, 0.0));
    let none: Vec<Shape> = Vec::new();

    let res = lighting(&m, Color::transparent(), &[light], &none,
        Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgba(255, 255, 255, 255));
}

#[test]
fn direct_light_diffuse_only() {
    let none: Vec<Shape> = Vec::new();

    // 255 * (255 * 0.001) = 65.025
    let res = lighting(&dim_material(), Color::black(), &[overhead_light()],
        &none, Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgb(65, 65, 65));
}

#[test]
fn lights_accumulate() {
    let none: Vec<Shape> = Vec::new();
    let lights = [overhead_light(), overhead_light()];

    let res = lighting(&dim_material(), Color::black(), &lights,
        &none, Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgb(130, 130, 130));
}

#[test]
fn light_color_filters_channels() {
    let none: Vec<Shape> = Vec::new();
    let red = PointLight::new(Color::rgb(255, 0, 0), 1.0,
        Vector3D::new(0.0, 10.0, 0.0));

    let res = lighting(&dim_material(), Color::black(), &[red],
        &none, Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgb(65, 0, 0));
}

#[test]
fn light_behind_surface_gives_ambient_only() {
    let m = Material::new(Color::white(), 0.5, 0.5, 0.25, 1.0, 0.0);
    let below = PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, -10.0, 0.0));
    let none: Vec<Shape> = Vec::new();

    let res = lighting(&m, Color::rgb(2, 2, 2), &[below], &none,
        Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgb(127, 127, 127));
}

#[test]
fn light_edge_on_gives_nothing() {
    let m = Material::new(Color::white(), 0.5, 0.5, 0.0, 0.005, 0.5);
    let light = PointLight::new(Color::white(), 1.0, Vector3D::new(1.0, -1.0, 0.0));
    let normal = Vector3D::new(-1.0, -1.0, 0.0).normalized();
    let none: Vec<Shape> = Vec::new();

    let res = lighting(&m, Color::black(), &[light], &none,
        Vector3D::zero(), UP, normal);
    assert_eq!(res, Color::rgb(0, 0, 0));
}

#[test]
fn direct_eclipse_blocks_light() {
    let m = Material::new(Color::white(), 0.5, 0.5, 0.0, 0.005, 0.5);
    let blocker = vec![
        Shape::sphere(Vector3D::new(0.0, 5.0, 0.0), 1.0, MaterialId(0))
    ];

    let res = lighting(&m, Color::black(), &[overhead_light()], &blocker,
        Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgba(0, 0, 0, 255));
}

#[test]
fn indirect_eclipse_blocks_light() {
    let m = Material::new(Color::white(), 0.5, 0.5, 0.0, 0.005, 0.5);
    let light = PointLight::new(Color::white(), 1.0, Vector3D::new(10.0, 10.0, 0.0));
    let blocker = vec![
        Shape::sphere(Vector3D::new(5.0, 5.0, 0.0), 1.0, MaterialId(0))
    ];
    let normal = Vector3D::new(0.0, 1.0, 1.0).normalized();

    let res = lighting(&m, Color::black(), &[light], &blocker,
        Vector3D::zero(), UP, normal);
    assert_eq!(res, Color::rgba(0, 0, 0, 255));
}

#[test]
fn shadow_only_drops_the_blocked_light() {
    let blocker = vec![
        Shape::sphere(Vector3D::new(0.0, 5.0, 0.0), 1.0, MaterialId(0))
    ];
    let side = PointLight::new(Color::white(), 1.0, Vector3D::new(0.0, 10.0, 10.0));
    let lights = [overhead_light(), side];

    // Only the side light arrives, at 45 degrees: 65.025 * cos(45) = 45.98
    let res = lighting(&dim_material(), Color::black(), &lights, &blocker,
        Vector3D::zero(), UP, UP);
    assert_eq!(res, Color::rgb(45, 45, 45));
}

#[test]
fn shadow_collinear_point_and_light() {
    let blocker = vec![
        Shape::sphere(Vector3D::new(0.0, 5.0, 0.0), 1.0, MaterialId(0))
    ];

    assert!(is_shadowed(&overhead_light(), Vector3D::zero(), &blocker));
}

#[test]
fn shadow_object_behind_light() {
    let blocker = vec![
        Shape::sphere(Vector3D::new(0.0, 20.0, 0.0), 1.0, MaterialId(0))
    ];

    assert!(!is_shadowed(&overhead_light(), Vector3D::zero(), &blocker));
}

#[test]
fn shadow_object_behind_point() {
    // Roots behind the point still count: the floor's root is t = -5.
    let floor = vec![
        Shape::plane(UP, Vector3D::new(0.0, -5.0, 0.0), MaterialId(0)),
    ];
    let sphere = vec![
        Shape::sphere(Vector3D::new(0.0, -5.0, 0.0), 1.0, MaterialId(0)),
    ];

    assert!(is_shadowed(&overhead_light(), Vector3D::zero(), &floor));
    assert!(is_shadowed(&overhead_light(), Vector3D::zero(), &sphere));
}

#[test]
fn shadow_ignores_shapes_off_the_line() {
    let blockers = vec![
        Shape::sphere(Vector3D::new(5.0, -5.0, 0.0), 1.0, MaterialId(0)),
        Shape::plane(Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(5.0, 0.0, 0.0), MaterialId(0)),
    ];

    assert!(!is_shadowed(&overhead_light(), Vector3D::zero(), &blockers));
}

#[test]
fn shadow_plane_between_point_and_light() {
    let ceiling = vec![
        Shape::plane(-UP, Vector3D::new(0.0, 5.0, 0.0), MaterialId(0))
    ];

    assert!(is_shadowed(&overhead_light(), Vector3D::zero(), &ceiling));
}
