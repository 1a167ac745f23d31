use crate::vector::Vector3D;
use crate::error::RenderError;

/// A half-line with an origin and a unit direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray3D {
    pub origin: Vector3D,
    pub direction: Vector3D,
}

impl Ray3D {
    /// Creates a ray, normalizing its own copy of `direction`.
    ///
    /// The caller's vector is never touched. `direction` must have non-zero
    /// length; a zero direction stays zero (see `try_new` for a checked
    /// constructor).
    pub fn new(origin: Vector3D, mut direction: Vector3D) -> Ray3D {
        direction.normalize();

        Ray3D { origin, direction }
    }

    /// Creates a ray, rejecting a zero-length direction.
    pub fn try_new(origin: Vector3D, direction: Vector3D)
        -> Result<Ray3D, RenderError> {
        if direction.magnitude() == 0.0 {
            return Err(RenderError::DegenerateRay);
        }

        Ok(Ray3D::new(origin, direction))
    }

    pub fn position(&self, t: f64) -> Vector3D {
        self.origin + (t * self.direction)
    }
}

#[test]
fn ray_direction_is_normalized() {
    let r = Ray3D::new(
        Vector3D::new(1.0, 2.0, 3.0),
        Vector3D::new(0.0, 5.0, 0.0)
    );

    assert_eq!(r.origin, Vector3D::new(1.0, 2.0, 3.0));
    assert_eq!(r.direction, Vector3D::new(0.0, 1.0, 0.0));
}

#[test]
fn ray_leaves_callers_direction_alone() {
    let d = Vector3D::new(3.0, 4.0, 0.0);
    let r = Ray3D::new(Vector3D::zero(), d);

    assert_eq!(d.magnitude(), 5.0);
    assert_eq!(r.direction, Vector3D::new(0.6, 0.8, 0.0));
}

#[test]
fn ray_rejects_zero_direction() {
    let r = Ray3D::try_new(Vector3D::zero(), Vector3D::zero());

    assert!(matches!(r, Err(RenderError::DegenerateRay)));
}

#[test]
fn ray_position() {
    let r = Ray3D::new(
                Vector3D::new(2.0, 3.0, 4.0),
                Vector3D::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Vector3D::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vector3D::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vector3D::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Vector3D::new(4.5, 3.0, 4.0));
}
