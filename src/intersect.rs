use crate::vector::Vector3D;
use crate::ray::Ray3D;
use crate::shape::Shape;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter
/// `t` is analogous to `t` for a ray (the offset from the ray origin).
///
/// `index` is the position of `what` in the scene's shape list. It is how
/// the shaded shape is told apart from its occluders, so two identical
/// shapes are still two shapes.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub index: usize,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t
            && self.index == other.index
            && std::ptr::eq(self.what, other.what)
    }
}

/// A collection of intersections, kept in scan order.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Collects the roots of `ray` against every shape, in slice order.
    pub fn collect(shapes: &'a [Shape], ray: &Ray3D) -> Intersections<'a> {
        let mut is = Intersections::new();
        for (index, what) in shapes.iter().enumerate() {
            for t in what.intersect(ray) {
                is.intersections.push(Intersection { t, index, what });
            }
        }

        is
    }

    /// Finds the nearest intersection in front of the ray origin.
    ///
    /// Only finite offsets strictly greater than zero count. When several
    /// share the smallest offset, the first one collected wins.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        let mut closest: Option<Intersection<'a>> = None;

        for i in self.intersections.iter() {
            if !i.t.is_finite() || i.t <= 0.0 {
                continue;
            }

            match closest {
                Some(c) if c.t <= i.t => (),
                _ => closest = Some(*i),
            }
        }

        closest
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The position of the intersected object in the scene.
    pub index: usize,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Vector3D,

    /// The eye vector for the intersection, pointing back along the ray.
    pub eyev: Vector3D,

    /// The normal vector of the object being intersected.
    ///
    /// Taken straight from the shape; it is not turned toward the eye.
    pub normalv: Vector3D,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    pub fn new(r: &Ray3D, hit: &Intersection<'a>)
        -> IntersectionComputation<'a> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let normalv = obj.normal_at(&point);

        IntersectionComputation {
            t,
            index: hit.index,
            obj,
            point, eyev, normalv,
        }
    }
}

#[test]
fn precompute_intersection_state() {
    let r = Ray3D::new(
        Vector3D::new(0.0, 0.0, -5.0),
        Vector3D::new(0.0, 0.0, 1.0),
    );

    let shape = Shape::sphere(Vector3D::zero(), 1.0, MaterialId(0));
    let i = Intersection { t: 4.0, index: 3, what: &shape };

    let comps = IntersectionComputation::new(&r, &i);

    assert!(std::ptr::eq(comps.obj, i.what));
    assert_eq!(comps.t, i.t);
    assert_eq!(comps.index, 3);
    assert_eq!(comps.point, Vector3D::new(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Vector3D::new(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Vector3D::new(0.0, 0.0, -1.0));
}

#[test]
fn precompute_keeps_plane_normal_facing_away() {
    let r = Ray3D::new(
        Vector3D::new(0.0, -1.0, 0.0),
        Vector3D::new(0.0, 1.0, 0.0),
    );

    let shape = Shape::plane(Vector3D::new(0.0, 1.0, 0.0), Vector3D::zero(),
        MaterialId(0));
    let i = Intersection { t: 1.0, index: 0, what: &shape };

    let comps = IntersectionComputation::new(&r, &i);

    assert_eq!(comps.eyev, Vector3D::new(0.0, -1.0, 0.0));
    assert_eq!(comps.normalv, Vector3D::new(0.0, 1.0, 0.0));
}

#[cfg(test)]
use crate::material::MaterialId;

#[cfg(test)]
fn unit_sphere() -> Shape {
    Shape::sphere(Vector3D::zero(), 1.0, MaterialId(0))
}

#[test]
fn hit_with_all_positive() {
    let s = unit_sphere();
    let i1 = Intersection { t: 1.0, index: 0, what: &s };
    let i2 = Intersection { t: 2.0, index: 0, what: &s };
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit().unwrap(), i1);
}

#[test]
fn hit_with_some_negative() {
    let s = unit_sphere();
    let i1 = Intersection { t: -1.0, index: 0, what: &s };
    let i2 = Intersection { t: 1.0, index: 0, what: &s };
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit().unwrap(), i2);
}

#[test]
fn hit_with_all_negative() {
    let s = unit_sphere();
    let i1 = Intersection { t: -2.0, index: 0, what: &s };
    let i2 = Intersection { t: -1.0, index: 0, what: &s };
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit(), None);
}

#[test]
fn hit_ignores_zero() {
    let s = unit_sphere();
    let i1 = Intersection { t: 0.0, index: 0, what: &s };
    let i2 = Intersection { t: 3.0, index: 0, what: &s };
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit().unwrap(), i2);
}

#[test]
fn hit_multiple() {
    let s = unit_sphere();
    let i1 = Intersection { t: 5.0,  index: 0, what: &s };
    let i2 = Intersection { t: 7.0,  index: 0, what: &s };
    let i3 = Intersection { t: -3.0, index: 0, what: &s };
    let i4 = Intersection { t: 2.0,  index: 0, what: &s };
    let is = Intersections { intersections: vec![i1, i2, i3, i4] };

    assert_eq!(is.hit().unwrap(), i4);
}

#[test]
fn hit_tie_goes_to_first_collected() {
    let shapes = vec![unit_sphere(), unit_sphere()];
    let r = Ray3D::new(Vector3D::new(0.0, 0.0, -5.0),
                       Vector3D::new(0.0, 0.0, 1.0));
    let is = Intersections::collect(&shapes, &r);

    assert_eq!(is.len(), 4);
    let hit = is.hit().unwrap();
    assert_eq!(hit.t, 4.0);
    assert_eq!(hit.index, 0);
}
