use std::ops::{ Add, Sub, Neg, Mul };

use crate::feq;

/// A three-component vector, used for both points and directions.
///
/// Every operation returns a new vector, with the exception of
/// `normalize`, which works in place.
#[derive(Debug, Default, Copy, Clone)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Vector3D {
    fn eq(&self, other: &Vector3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from(v: [f64; 3]) -> Vector3D {
        Vector3D { x: v[0], y: v[1], z: v[2] }
    }
}

impl Vector3D {
    pub fn new(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D { x, y, z }
    }

    pub fn zero() -> Vector3D {
        Vector3D { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn scale(&self, s: f64) -> Vector3D {
        Vector3D {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Scales this vector to unit length, in place.
    ///
    /// A vector of exactly zero magnitude is left untouched.
    pub fn normalize(&mut self) {
        let mag = self.magnitude();
        if mag == 0.0 {
            return;
        }

        self.x /= mag;
        self.y /= mag;
        self.z /= mag;
    }

    /// Returns a unit-length copy, following the same zero policy as
    /// `normalize`.
    pub fn normalized(&self) -> Vector3D {
        let mut v = *self;
        v.normalize();
        v
    }

    pub fn dot(&self, other: &Vector3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    /// Reflects a vector across a normal.
    ///
    /// `normal` must be unit length.
    pub fn reflect(&self, normal: &Vector3D) -> Vector3D {
        *self - (*normal * 2.0 * self.dot(normal))
    }

    /// Component-wise comparison with an explicit tolerance.
    pub fn approx_eq(&self, other: &Vector3D, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance &&
            (self.y - other.y).abs() < tolerance &&
            (self.z - other.z).abs() < tolerance
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector3D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use phong_ray_tracer::vector::Vector3D;
///
/// let v = Vector3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(v * 5.0, Vector3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Vector3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        self.scale(other)
    }
}

/// Implements scalar left-multiplication for a vector.
///
/// ```rust
/// use phong_ray_tracer::vector::Vector3D;
///
/// let v = Vector3D::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * v, Vector3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, other: Vector3D) -> Vector3D {
        other.scale(self)
    }
}

/* Tests */

#[test]
fn add_vectors() {
    let a1 = Vector3D::new(3.0, -2.0, 5.0);
    let a2 = Vector3D::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Vector3D::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Vector3D::new(3.0, 2.0, 1.0);
    let p2 = Vector3D::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector3D::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vector3D::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vector3D::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_fraction() {
    let a = Vector3D::new(1.0, -2.0, 3.0);

    assert_eq!(a * 0.5, Vector3D::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Vector3D::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_clean() {
    let mut v = Vector3D::new(4.0, 0.0, 0.0);
    v.normalize();

    assert_eq!(v, Vector3D::new(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Vector3D::new(1.0, 2.0, 3.0);
    let e = Vector3D::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalized(), e);
}

#[test]
fn normalized_has_unit_magnitude() {
    let vs = [
        Vector3D::new(0.001, 0.0, 0.0),
        Vector3D::new(-3.0, 4.0, 12.0),
        Vector3D::new(1e6, -2e6, 5e5),
        Vector3D::new(0.3, 0.3, -0.3),
    ];

    for v in vs.iter() {
        assert!(crate::feq(v.normalized().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_is_noop() {
    let mut v = Vector3D::zero();
    v.normalize();

    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
    assert_eq!(v.z, 0.0);
}

#[test]
fn dot_vectors() {
    let a = Vector3D::new(1.0, 2.0, 3.0);
    let b = Vector3D::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn reflect_45() {
    let v = Vector3D::new(1.0, -1.0, 0.0);
    let n = Vector3D::new(0.0, 1.0, 0.0);
    let r = v.reflect(&n);

    assert_eq!(r, Vector3D::new(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Vector3D::new(0.0, -1.0, 0.0);
    let n = Vector3D::new(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);
    let r = v.reflect(&n);

    assert_eq!(r, Vector3D::new(1.0, 0.0, 0.0));
}

#[test]
fn reflect_mirrors_normal_component() {
    let n = Vector3D::new(1.0, 2.0, -2.0).normalized();
    let vs = [
        Vector3D::new(3.0, -1.0, 0.5),
        Vector3D::new(-7.0, 0.0, 2.0),
        Vector3D::new(0.0, 0.0, 1.0),
    ];

    for v in vs.iter() {
        let r = v.reflect(&n);
        assert!(crate::feq(r.dot(&n), -v.dot(&n)));
    }
}

#[test]
fn approx_eq_tolerance() {
    let a = Vector3D::new(1.0, 1.0, 1.0);
    let b = Vector3D::new(1.00005, 0.99995, 1.0);

    assert!(a.approx_eq(&b, 1e-4));
    assert!(!a.approx_eq(&b, 1e-6));
}

#[test]
fn eq_uses_tolerance() {
    let a = Vector3D::new(1.0, 2.0, 3.0);

    assert_eq!(a, Vector3D::new(1.00001, 2.0, 2.99999));
    assert_ne!(a, Vector3D::new(1.001, 2.0, 3.0));
}
