use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{ Serialize, Deserialize };

use crate::vector::Vector3D;
use crate::shape::Shape;
use crate::light::PointLight;
use crate::material::{ Material, MaterialId, MaterialTable };
use crate::scene::Scene;
use crate::camera::{ Camera, Screen };
use crate::error::SceneError;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT };

/// A scene ready to render: what to draw and where to look from.
pub struct SceneSetup {
    pub scene: Scene,
    pub camera: Camera,
}

impl SceneSetup {
    /// Reads a JSON scene description from disk.
    pub fn load(path: &Path) -> Result<SceneSetup, SceneError> {
        let text = fs::read_to_string(path)?;
        let scene_json: SceneJson = serde_json::from_str(&text)?;

        debug!("loaded scene description from {}", path.display());
        SceneSetup::from_json(scene_json)
    }

    /// Builds the scene and camera from a parsed description.
    pub fn from_json(scene_json: SceneJson) -> Result<SceneSetup, SceneError> {
        // Register materials by name. Names are sorted so ids do not depend
        // on map iteration order.
        let mut names: Vec<&String> = scene_json.materials.keys().collect();
        names.sort();

        let mut materials = MaterialTable::new();
        let mut ids: HashMap<&str, MaterialId> = HashMap::new();
        for name in names {
            let id = materials.add(scene_json.materials[name].into());
            ids.insert(name.as_str(), id);
        }

        let shapes = scene_json.shapes.iter()
            .map(|s| s.to_shape(&ids))
            .collect::<Result<Vec<Shape>, SceneError>>()?;

        let lights = scene_json.lights.iter()
            .map(|l| (*l).into())
            .collect();

        let scene = Scene::new(shapes, lights, scene_json.ambient.into(),
            materials)?;

        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            scene_json.viewer.into(),
            scene_json.screen.into(),
        )?;

        Ok(SceneSetup { scene, camera })
    }

    /// Keeps the scene and viewpoint but renders onto a canvas of a
    /// different size.
    pub fn resized(self, width: usize, height: usize)
        -> Result<SceneSetup, SceneError> {
        let camera = Camera::new(width, height, self.camera.viewer,
            self.camera.screen)?;

        Ok(SceneSetup { scene: self.scene, camera })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    #[serde(default = "default_width")]
    pub canvas_width: usize,
    #[serde(default = "default_height")]
    pub canvas_height: usize,

    pub viewer: [f64; 3],
    #[serde(default)]
    pub screen: ScreenJson,

    pub ambient: [u8; 4],
    pub materials: HashMap<String, MaterialJson>,
    pub lights: Vec<LightJson>,
    pub shapes: Vec<ShapeJson>,
}

fn default_width() -> usize {
    CANVAS_WIDTH
}

fn default_height() -> usize {
    CANVAS_HEIGHT
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ScreenJson {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub z: f64,
}

impl Default for ScreenJson {
    fn default() -> ScreenJson {
        let s = Screen::default();
        ScreenJson {
            left: s.left, right: s.right, bottom: s.bottom, top: s.top, z: s.z
        }
    }
}

impl From<ScreenJson> for Screen {
    fn from(s: ScreenJson) -> Screen {
        Screen {
            left: s.left, right: s.right, bottom: s.bottom, top: s.top, z: s.z
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct MaterialJson {
    pub color: [u8; 4],
    pub diffuse: f64,
    pub specular: f64,
    pub ambient: f64,
    pub shininess: f64,
    #[serde(default)]
    pub matte: f64,
}

impl From<MaterialJson> for Material {
    fn from(m: MaterialJson) -> Material {
        Material::new(m.color.into(), m.diffuse, m.specular, m.ambient,
            m.shininess, m.matte)
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct LightJson {
    pub color: [u8; 4],
    #[serde(default = "full_intensity")]
    pub intensity: f64,
    pub position: [f64; 3],
}

fn full_intensity() -> f64 {
    1.0
}

impl From<LightJson> for PointLight {
    fn from(l: LightJson) -> PointLight {
        PointLight::new(l.color.into(), l.intensity, l.position.into())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "ty", rename_all = "lowercase")]
pub enum ShapeJson {
    Sphere { center: [f64; 3], radius: f64, material: String },
    Plane { normal: [f64; 3], point: [f64; 3], material: String },
}

impl ShapeJson {
    fn to_shape(&self, ids: &HashMap<&str, MaterialId>)
        -> Result<Shape, SceneError> {
        let lookup = |name: &String| {
            ids.get(name.as_str()).copied().ok_or_else(|| {
                SceneError::UnknownMaterial { description: name.clone() }
            })
        };

        Ok(match self {
            ShapeJson::Sphere { center, radius, material } => Shape::sphere(
                Vector3D::from(*center), *radius, lookup(material)?
            ),
            ShapeJson::Plane { normal, point, material } => {
                let mut n = Vector3D::from(*normal);
                n.normalize();
                Shape::plane(n, Vector3D::from(*point), lookup(material)?)
            },
        })
    }
}

#[cfg(test)]
use crate::color::Color;

#[cfg(test)]
const TEST_SCENE: &'static str = r#"{
    "canvas_width": 20,
    "canvas_height": 10,
    "viewer": [0.0, 0.0, -10.0],
    "ambient": [100, 100, 100, 255],
    "materials": {
        "red": { "color": [255, 0, 0, 255], "diffuse": 0.003,
                 "specular": 0.000005, "ambient": 0.002, "shininess": 5.0 },
        "grey": { "color": [200, 200, 200, 255], "diffuse": 0.01,
                  "specular": 0.001, "ambient": 0.002, "shininess": 5000.0 }
    },
    "lights": [
        { "color": [255, 255, 255, 255], "position": [15.0, 30.0, 30.0] }
    ],
    "shapes": [
        { "ty": "sphere", "center": [10.0, -5.0, 125.0], "radius": 5.0,
          "material": "red" },
        { "ty": "plane", "normal": [0.0, 2.0, 0.0], "point": [0.0, -10.0, 0.0],
          "material": "grey" }
    ]
}"#;

#[test]
fn scene_json_builds_scene_and_camera() {
    let scene_json: SceneJson = serde_json::from_str(TEST_SCENE).unwrap();
    let setup = SceneSetup::from_json(scene_json).unwrap();

    assert_eq!(setup.scene.shapes().len(), 2);
    assert_eq!(setup.scene.lights().len(), 1);
    assert_eq!(setup.scene.lights()[0].intensity, 1.0);
    assert_eq!(setup.scene.ambient(), Color::rgb(100, 100, 100));

    assert_eq!(setup.camera.hsize, 20);
    assert_eq!(setup.camera.vsize, 10);
    assert_eq!(setup.camera.screen, Screen::default());

    // Plane normals are normalized on the way in.
    let floor = &setup.scene.shapes()[1];
    assert_eq!(floor.normal_at(&Vector3D::zero()), Vector3D::new(0.0, 1.0, 0.0));

    // "grey" sorts before "red".
    assert_eq!(floor.material_id(), MaterialId(0));
    assert_eq!(setup.scene.material_of(floor).color, Color::rgb(200, 200, 200));
}

#[test]
fn scene_json_canvas_defaults_and_resize() {
    let text = TEST_SCENE
        .replace(r#""canvas_width": 20,"#, "")
        .replace(r#""canvas_height": 10,"#, "");
    let scene_json: SceneJson = serde_json::from_str(&text).unwrap();
    let setup = SceneSetup::from_json(scene_json).unwrap();

    assert_eq!(setup.camera.hsize, CANVAS_WIDTH);
    assert_eq!(setup.camera.vsize, CANVAS_HEIGHT);

    let setup = setup.resized(40, 30).unwrap();
    assert_eq!(setup.camera.hsize, 40);
    assert_eq!(setup.camera.vsize, 30);
    assert_eq!(setup.camera.viewer, Vector3D::new(0.0, 0.0, -10.0));
    assert!(setup.resized(0, 30).is_err());
}

#[test]
fn scene_json_unknown_material() {
    let text = TEST_SCENE.replace(r#""material": "red""#, r#""material": "blue""#);
    let scene_json: SceneJson = serde_json::from_str(&text).unwrap();

    match SceneSetup::from_json(scene_json) {
        Err(SceneError::UnknownMaterial { description }) =>
            assert_eq!(description, "blue"),
        _ => panic!("expected an unknown material error"),
    }
}

#[test]
fn scene_json_unknown_shape_type() {
    let text = TEST_SCENE.replace(r#""ty": "sphere""#, r#""ty": "torus""#);

    assert!(serde_json::from_str::<SceneJson>(&text).is_err());
}

#[test]
fn scene_json_empty_canvas() {
    let text = TEST_SCENE.replace(r#""canvas_width": 20"#, r#""canvas_width": 0"#);
    let scene_json: SceneJson = serde_json::from_str(&text).unwrap();

    assert!(matches!(
        SceneSetup::from_json(scene_json),
        Err(SceneError::EmptyCanvas)
    ));
}

#[test]
fn missing_scene_file() {
    let res = SceneSetup::load(Path::new("./does/not/exist.json"));

    assert!(matches!(res, Err(SceneError::Io { .. })));
}
