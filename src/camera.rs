use crate::ray::Ray3D;
use crate::vector::Vector3D;
use crate::scene::RayGrid;
use crate::error::SceneError;

/// The rectangle, parallel to the XY plane, that pixels are laid out on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Screen {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,

    /// The depth of the screen plane.
    pub z: f64,
}

impl Default for Screen {
    fn default() -> Screen {
        Screen { left: -2.0, right: 2.0, bottom: -1.0, top: 1.0, z: 1.0 }
    }
}

/// A camera record for generating rays.
///
/// Every ray starts at the viewer and passes through one pixel of the
/// screen. Columns step rightward from `left`, rows step downward from the
/// top, so `(0, 0)` is the top-left pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// Where every ray starts.
    pub viewer: Vector3D,

    pub screen: Screen,

    x_step: f64,
    y_step: f64,
}

impl Camera {
    /// Creates a camera.
    ///
    /// Fails if either canvas size is zero, if the screen rectangle is
    /// empty or inverted, or if the viewer sits on the screen plane (a pixel
    /// under the viewer would give a zero-length ray).
    pub fn new(hsize: usize, vsize: usize, viewer: Vector3D, screen: Screen)
        -> Result<Camera, SceneError> {
        if hsize == 0 || vsize == 0 {
            return Err(SceneError::EmptyCanvas);
        }

        if screen.left >= screen.right {
            return Err(SceneError::InvalidScreen {
                description: format!("left ({}) must be less than right ({})",
                    screen.left, screen.right),
            });
        }

        if screen.bottom >= screen.top {
            return Err(SceneError::InvalidScreen {
                description: format!("bottom ({}) must be less than top ({})",
                    screen.bottom, screen.top),
            });
        }

        if viewer.z == screen.z {
            return Err(SceneError::InvalidScreen {
                description: format!("viewer lies on the screen plane z = {}",
                    screen.z),
            });
        }

        let x_step = (screen.right - screen.left) / (hsize as f64);
        let y_step = (screen.top - screen.bottom) / (vsize as f64);

        Ok(Camera { hsize, vsize, viewer, screen, x_step, y_step })
    }

    /// The point on the screen that pixel `(px, py)` looks through.
    ///
    /// Returns `None` for a pixel outside the canvas.
    pub fn screen_point(&self, px: usize, py: usize) -> Option<Vector3D> {
        if px >= self.hsize || py >= self.vsize {
            return None;
        }

        Some(self.pixel_point(px, py))
    }

    /// The ray through pixel `(px, py)`, or `None` outside the canvas.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Option<Ray3D> {
        self.screen_point(px, py).map(|p| self.ray_through(p))
    }

    // `px` and `py` must be inside the canvas.
    fn pixel_point(&self, px: usize, py: usize) -> Vector3D {
        let x = self.screen.left + (px as f64) * self.x_step;
        let y = self.screen.bottom
            + ((self.vsize - 1 - py) as f64) * self.y_step;

        Vector3D::new(x, y, self.screen.z)
    }

    fn ray_through(&self, pixel: Vector3D) -> Ray3D {
        Ray3D::new(self.viewer, pixel - self.viewer)
    }

    /// Generates one ray per pixel, row by row from the top.
    pub fn rays(&self) -> RayGrid {
        (0..self.vsize).map(|y| {
            (0..self.hsize)
                .map(|x| self.ray_through(self.pixel_point(x, y)))
                .collect()
        }).collect()
    }
}

#[cfg(test)]
fn test_camera() -> Camera {
    Camera::new(4, 2, Vector3D::new(0.0, 0.0, -10.0), Screen::default())
        .unwrap()
}

#[test]
fn camera_rejects_empty_canvas() {
    let c = Camera::new(0, 10, Vector3D::zero(), Screen::default());

    assert!(matches!(c, Err(SceneError::EmptyCanvas)));
}

#[test]
fn camera_rejects_inverted_screen() {
    let screen = Screen { left: 2.0, right: -2.0, ..Default::default() };
    let c = Camera::new(10, 10, Vector3D::zero(), screen);

    assert!(matches!(c, Err(SceneError::InvalidScreen { .. })));

    let screen = Screen { bottom: 1.0, top: 1.0, ..Default::default() };
    let c = Camera::new(10, 10, Vector3D::zero(), screen);

    assert!(matches!(c, Err(SceneError::InvalidScreen { .. })));
}

#[test]
fn camera_rejects_viewer_on_screen_plane() {
    let c = Camera::new(4, 2, Vector3D::new(0.0, 0.0, 1.0), Screen::default());

    assert!(matches!(c, Err(SceneError::InvalidScreen { .. })));
}

#[test]
fn camera_rays_are_never_degenerate() {
    // The viewer sits right in front of a pixel of the screen.
    let c = Camera::new(4, 2, Vector3D::new(0.0, 0.0, 0.999), Screen::default())
        .unwrap();

    for r in c.rays().iter().flatten() {
        assert!(crate::feq(r.direction.magnitude(), 1.0));
    }
}

#[test]
fn pixels_outside_the_canvas() {
    let c = test_camera();

    assert_eq!(c.screen_point(4, 0), None);
    assert_eq!(c.screen_point(0, 2), None);
    assert_eq!(c.ray_for_pixel(0, 7), None);
}

#[test]
fn top_left_pixel_sits_on_the_top_left_corner() {
    let c = test_camera();

    assert_eq!(c.screen_point(0, 0), Some(Vector3D::new(-2.0, 0.0, 1.0)));
    assert_eq!(c.screen_point(3, 0), Some(Vector3D::new(1.0, 0.0, 1.0)));
    assert_eq!(c.screen_point(0, 1), Some(Vector3D::new(-2.0, -1.0, 1.0)));
}

#[test]
fn ray_starts_at_viewer() {
    let c = test_camera();
    let r = c.ray_for_pixel(2, 1).unwrap();

    assert_eq!(r.origin, Vector3D::new(0.0, 0.0, -10.0));
    assert_eq!(r.direction, Vector3D::new(0.0, -1.0, 11.0).normalized());
}

#[test]
fn rays_are_row_major() {
    let c = test_camera();
    let grid = c.rays();

    assert_eq!(grid.len(), 2);
    assert!(grid.iter().all(|row| row.len() == 4));
    assert_eq!(Some(grid[1][3]), c.ray_for_pixel(3, 1));
}
