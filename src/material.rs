use std::ops::Index;

use crate::color::{ Color, clip };

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient,
/// diffuse, specular and shininess. The coefficients are folded into the
/// base color once, at construction, so lighting only ever reads the
/// per-channel products.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub diffuse_consts: [f64; 3],
    pub specular_consts: [f64; 3],
    pub ambient_consts: [f64; 3],
    pub shininess: f64,

    /// Reserved for reflective blending; lighting ignores it.
    pub matte: f64,

    ambient_color: Option<Color>,
}

impl Default for Material {
    fn default() -> Material {
        Material::new(Color::white(), 0.002, 0.001, 0.002, 200.0, 0.0)
    }
}

impl Material {
    pub fn new(color: Color, diffuse: f64, specular: f64, ambient: f64,
        shininess: f64, matte: f64) -> Material {
        let base = color.channels();

        Material {
            color,
            diffuse_consts: scale_channels(base, diffuse),
            specular_consts: scale_channels(base, specular),
            ambient_consts: scale_channels(base, ambient),
            shininess,
            matte,
            ambient_color: None,
        }
    }

    /// Computes and stores the ambient contribution under `scene_ambient`.
    ///
    /// Baking again replaces the stored value.
    pub fn bake_ambient(&mut self, scene_ambient: Color) {
        self.ambient_color = Some(self.compute_ambient(scene_ambient));
    }

    /// The ambient contribution, if it has been baked.
    pub fn baked_ambient(&self) -> Option<Color> {
        self.ambient_color
    }

    /// The ambient contribution under `scene_ambient`.
    ///
    /// Returns the baked value when there is one, so a material belonging to
    /// a scene answers without recomputing.
    pub fn ambient_color(&self, scene_ambient: Color) -> Color {
        match self.ambient_color {
            Some(c) => c,
            None => self.compute_ambient(scene_ambient),
        }
    }

    fn compute_ambient(&self, scene_ambient: Color) -> Color {
        let sa = scene_ambient.channels();

        Color::rgb(
            clip(self.ambient_consts[0] * sa[0]),
            clip(self.ambient_consts[1] * sa[1]),
            clip(self.ambient_consts[2] * sa[2]),
        )
    }
}

fn scale_channels(base: [f64; 3], k: f64) -> [f64; 3] {
    [base[0] * k, base[1] * k, base[2] * k]
}

/// Identifies a material inside a `MaterialTable`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// The single owner of every material in a scene.
///
/// Shapes hold a `MaterialId` rather than their own copy, so the ambient
/// cache has exactly one home per material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn new() -> MaterialTable {
        Default::default()
    }

    /// Adds a material and returns its id.
    pub fn add(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        id.0 < self.materials.len()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Bakes the ambient contribution of every material.
    pub fn bake_ambient(&mut self, scene_ambient: Color) {
        for m in self.materials.iter_mut() {
            m.bake_ambient(scene_ambient);
        }
    }
}

impl Index<MaterialId> for MaterialTable {
    type Output = Material;

    fn index(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }
}

#[test]
fn material_folds_coefficients_into_color() {
    let m = Material::new(Color::rgb(100, 200, 200), 0.5, 0.25, 0.1, 10.0, 0.0);

    assert_eq!(m.diffuse_consts, [50.0, 100.0, 100.0]);
    assert_eq!(m.specular_consts, [25.0, 50.0, 50.0]);
    assert!(crate::feq(m.ambient_consts[0], 10.0));
    assert!(crate::feq(m.ambient_consts[1], 20.0));
    assert!(crate::feq(m.ambient_consts[2], 20.0));
}

#[test]
fn ambient_is_per_channel() {
    let m = Material::new(Color::rgb(200, 100, 0), 0.0, 0.0, 0.5, 1.0, 0.0);
    let a = m.ambient_color(Color::rgb(2, 3, 200));

    // 100 * 2, 50 * 3, 0 * 200
    assert_eq!(a, Color::rgb(200, 150, 0));
}

#[test]
fn ambient_bakes_once() {
    let mut m = Material::new(Color::white(), 0.0, 0.0, 0.25, 1.0, 0.0);
    assert_eq!(m.baked_ambient(), None);

    m.bake_ambient(Color::rgb(2, 2, 2));
    let baked = m.baked_ambient().unwrap();

    // Later lookups return the baked value whatever ambient they pass.
    assert_eq!(m.ambient_color(Color::black()), baked);
    assert_eq!(baked, Color::rgb(127, 127, 127));
}

#[test]
fn table_hands_out_sequential_ids() {
    let mut t = MaterialTable::new();
    let a = t.add(Material::default());
    let b = t.add(Material::new(Color::black(), 0.0, 0.0, 0.0, 1.0, 0.0));

    assert_eq!(a, MaterialId(0));
    assert_eq!(b, MaterialId(1));
    assert!(t.contains(b));
    assert!(!t.contains(MaterialId(2)));
    assert_eq!(t[b].color, Color::black());
}

#[test]
fn table_bakes_every_material() {
    let mut t = MaterialTable::new();
    let a = t.add(Material::default());
    let b = t.add(Material::default());
    t.bake_ambient(Color::white());

    assert!(t[a].baked_ambient().is_some());
    assert!(t.get(b).and_then(|m| m.baked_ambient()).is_some());
}
