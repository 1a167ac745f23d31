use crate::vector::Vector3D;
use crate::ray::Ray3D;
use crate::material::MaterialId;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeType {
    /// A sphere with a world-space center and radius.
    Sphere { center: Vector3D, radius: f64 },

    /// An infinite plane through `point`, facing along `normal`.
    ///
    /// The normal is used exactly as given; it is never flipped to face the
    /// viewer.
    Plane { normal: Vector3D, point: Vector3D },
}

/// A primitive surface in a scene.
///
/// Shapes are immutable once a scene is built. The material is looked up in
/// the scene's `MaterialTable` through `material`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: MaterialId,
}

impl Shape {
    /// Creates a sphere.
    pub fn sphere(center: Vector3D, radius: f64, material: MaterialId)
        -> Shape {
        Shape {
            ty: ShapeType::Sphere { center, radius },
            material,
        }
    }

    /// Creates a plane containing `point` with the given normal.
    ///
    /// `normal` should be unit length; lighting relies on it.
    pub fn plane(normal: Vector3D, point: Vector3D, material: MaterialId)
        -> Shape {
        Shape {
            ty: ShapeType::Plane { normal, point },
            material,
        }
    }

    pub fn material_id(&self) -> MaterialId {
        self.material
    }

    /// Intersects a ray with a Shape.
    ///
    /// Returns every root along the ray in ascending order, including roots
    /// at or behind the ray origin. Callers decide which ones count.
    pub fn intersect(&self, ray: &Ray3D) -> Vec<f64> {
        match self.ty {
            ShapeType::Sphere { center, radius }
                => intersect_sphere(center, radius, ray),
            ShapeType::Plane { normal, point }
                => intersect_plane(normal, point, ray),
        }
    }

    /// Obtain the normal vector of a Shape at a point on its surface.
    pub fn normal_at(&self, at: &Vector3D) -> Vector3D {
        match self.ty {
            ShapeType::Sphere { center, .. } => (*at - center).normalized(),
            ShapeType::Plane { normal, .. } => normal,
        }
    }

    /// Mirrors `incoming` about the surface normal at `point`.
    ///
    /// The reflected ray starts at `point`.
    pub fn reflect(&self, incoming: &Ray3D, point: &Vector3D) -> Ray3D {
        let normal = self.normal_at(point);
        Ray3D::new(*point, incoming.direction.reflect(&normal))
    }
}

/// Checks whether a ray intersects a sphere.
///
/// Solves `a·t² + b·t + c = 0` along the ray. A negative discriminant is a
/// miss, an exactly zero one yields the single tangent root, and a positive
/// one yields both roots, nearest first.
fn intersect_sphere(center: Vector3D, radius: f64, ray: &Ray3D) -> Vec<f64> {
    let sphere_to_ray = ray.origin - center;

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * ray.direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - radius.powi(2);

    let discriminant = b.powi(2) - (4.0 * a * c);

    if discriminant < 0.0 {
        Vec::new()
    } else if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else {
        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        vec![t1, t2]
    }
}

/// Intersects a ray with a plane.
///
/// A ray exactly parallel to the plane never meets it. Otherwise the single
/// root is returned whatever its sign.
fn intersect_plane(normal: Vector3D, point: Vector3D, ray: &Ray3D)
    -> Vec<f64> {
    let denominator = ray.direction.dot(&normal);
    if denominator == 0.0 {
        return Vec::new();
    }

    vec![(point - ray.origin).dot(&normal) / denominator]
}

#[cfg(test)]
fn test_sphere() -> Shape {
    Shape::sphere(Vector3D::new(0.0, 10.0, 10.0), 1.0, MaterialId(0))
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 10.0),
                       Vector3D::new(0.0, 1.0, 0.0));
    let xs = test_sphere().intersect(&r);

    assert_eq!(xs.len(), 2);
    assert!(crate::feq(xs[0], 9.0));
    assert!(crate::feq(xs[1], 11.0));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 11.0),
                       Vector3D::new(0.0, 1.0, 0.0));
    let xs = test_sphere().intersect(&r);

    assert_eq!(xs.len(), 1);
    assert!(crate::feq(xs[0], 10.0));
}

#[test]
fn ray_misses_sphere() {
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 12.0),
                       Vector3D::new(0.0, 1.0, 0.0));
    let xs = test_sphere().intersect(&r);

    assert!(xs.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 0.0),
                       Vector3D::new(0.0, 0.0, 1.0));
    let s = Shape::sphere(Vector3D::zero(), 1.0, MaterialId(0));
    let xs = s.intersect(&r);

    assert_eq!(xs, vec![-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, 5.0),
                       Vector3D::new(0.0, 0.0, 1.0));
    let s = Shape::sphere(Vector3D::zero(), 1.0, MaterialId(0));
    let xs = s.intersect(&r);

    assert_eq!(xs, vec![-6.0, -4.0]);
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Shape::sphere(Vector3D::zero(), 1.0, MaterialId(0));
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(&Vector3D::new(k, k, k));

    assert_eq!(n, Vector3D::new(k, k, k));
}

#[test]
fn normal_on_offset_sphere() {
    let s = Shape::sphere(Vector3D::new(0.0, -1.0, 0.0), 2.0, MaterialId(0));
    let n = s.normal_at(&Vector3D::new(0.0, 1.0, 0.0));

    assert_eq!(n, Vector3D::new(0.0, 1.0, 0.0));
}

#[test]
fn reflect_off_sphere() {
    let s = Shape::sphere(Vector3D::new(0.0, -1.0, 0.0), 1.0, MaterialId(0));
    let incoming = Ray3D::new(
        Vector3D::new(-1.0, 1.0, 0.0),
        Vector3D::new(1.0, -1.0, 0.0)
    );
    let r = s.reflect(&incoming, &Vector3D::zero());

    assert_eq!(r, Ray3D::new(Vector3D::zero(), Vector3D::new(1.0, 1.0, 0.0)));
}

#[test]
fn normal_on_plane() {
    let p = Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(),
        MaterialId(0));

    let n1 = p.normal_at(&Vector3D::new(0.0, 0.0, 0.0));
    let n2 = p.normal_at(&Vector3D::new(10.0, 0.0, -10.0));
    let n3 = p.normal_at(&Vector3D::new(-5.0, 0.0, 150.0));

    assert_eq!(n1, Vector3D::new(0.0, 1.0, 0.0));
    assert_eq!(n2, Vector3D::new(0.0, 1.0, 0.0));
    assert_eq!(n3, Vector3D::new(0.0, 1.0, 0.0));
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(),
        MaterialId(0));
    let r = Ray3D::new(
        Vector3D::new(0.0, 10.0, 0.0),
        Vector3D::new(0.0, 0.0, 1.0)
    );

    assert!(p.intersect(&r).is_empty());
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(),
        MaterialId(0));
    let r = Ray3D::new(
        Vector3D::new(0.0, 1.0, 0.0),
        Vector3D::new(0.0, -1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), vec![1.0]);
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(),
        MaterialId(0));
    let r = Ray3D::new(
        Vector3D::new(0.0, -1.0, 0.0),
        Vector3D::new(0.0, 1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), vec![1.0]);
}

#[test]
fn plane_behind_ray_keeps_negative_root() {
    let p = Shape::plane(Vector3D::new(0.0, 1.0, 0.0),
        Vector3D::new(0.0, -10.0, 0.0), MaterialId(0));
    let r = Ray3D::new(
        Vector3D::zero(),
        Vector3D::new(0.0, 1.0, 0.0)
    );

    assert_eq!(p.intersect(&r), vec![-10.0]);
}
