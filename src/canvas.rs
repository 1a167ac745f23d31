use std::path::Path;

use image::{ ImageBuffer, Rgba, RgbaImage };

use crate::color::Color;
use crate::scene::ColorGrid;
use crate::error::RenderError;

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `Scene`'s shapes.
///
/// The canvas stores the resultant colors for each pixel ray. Once execution
/// finishes, the `Canvas` can be used to save the pixels to an image file.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new, fully transparent canvas.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::transparent(); width * height]
        }
    }

    /// Builds a canvas from a rendered grid.
    ///
    /// Every row must be as long as the first one.
    pub fn from_grid(grid: ColorGrid) -> Result<Canvas, RenderError> {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());

        let mut pixels = Vec::with_capacity(width * height);
        for (row, colors) in grid.into_iter().enumerate() {
            if colors.len() != width {
                return Err(RenderError::RaggedGrid {
                    row, expected: width, found: colors.len()
                });
            }

            pixels.extend(colors);
        }

        Ok(Canvas { width, height, pixels })
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use phong_ray_tracer::color::Color;
    /// # use phong_ray_tracer::canvas::Canvas;
    /// let purple = Color::rgb(255, 0, 255);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Converts the canvas to an RGBA image buffer.
    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = self.pixels[(y as usize * self.width) + x as usize];
            Rgba([c.r, c.g, c.b, c.a])
        })
    }

    /// Saves the canvas to an image file.
    ///
    /// The format follows the file extension; `.png` is the usual choice.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

#[test]
fn new_canvas_is_transparent() {
    let c = Canvas::new(3, 2);

    assert_eq!(c.read_pixel(2, 1), Some(Color::transparent()));
    assert_eq!(c.read_pixel(3, 1), None);
}

#[test]
fn out_of_bounds_write_is_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(5, 0, &Color::white());

    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn canvas_from_grid_is_row_major() {
    let grid = vec![
        vec![Color::white(), Color::black()],
        vec![Color::rgb(1, 2, 3), Color::transparent()],
    ];
    let c = Canvas::from_grid(grid).unwrap();

    assert_eq!(c.width, 2);
    assert_eq!(c.height, 2);
    assert_eq!(c.read_pixel(1, 0), Some(Color::black()));
    assert_eq!(c.read_pixel(0, 1), Some(Color::rgb(1, 2, 3)));
}

#[test]
fn canvas_from_ragged_grid_fails() {
    let grid = vec![
        vec![Color::white(), Color::black()],
        vec![Color::white()],
    ];

    assert!(matches!(
        Canvas::from_grid(grid),
        Err(RenderError::RaggedGrid { row: 1, expected: 2, found: 1 })
    ));
}

#[test]
fn canvas_to_image_keeps_alpha() {
    let mut c = Canvas::new(2, 1);
    c.write_pixel(1, 0, &Color::rgba(9, 8, 7, 6));
    let img = c.to_image();

    assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    assert_eq!(img.get_pixel(1, 0), &Rgba([9, 8, 7, 6]));
}
