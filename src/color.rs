use crate::consts::CHANNEL_MAX;

/// A color.
///
/// Represented with 8-bit red-green-blue-alpha (RGBA) channels, the format
/// handed to the image encoder.
///
/// # Examples
///
/// Construct an opaque red:
///
/// ```
/// # use phong_ray_tracer::color::Color;
/// let red = Color::rgb(255, 0, 0);
/// assert_eq!(red, Color::rgba(255, 0, 0, 255));
/// ```
///
/// Unlit pixels are fully transparent:
///
/// ```
/// # use phong_ray_tracer::color::Color;
/// assert_eq!(Color::default(), Color::transparent());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Conversion from an `[r, g, b, a]` array to a `Color`.
impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Color {
        Color { r: v[0], g: v[1], b: v[2], a: v[3] }
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> [u8; 4] {
        [c.r, c.g, c.b, c.a]
    }
}

impl Color {
    /// Creates a color with red, green, blue and alpha values.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// The background color of pixels which hit nothing.
    pub fn transparent() -> Color {
        Color { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn black() -> Color {
        Color::rgb(0, 0, 0)
    }

    pub fn white() -> Color {
        Color::rgb(0xff, 0xff, 0xff)
    }

    /// The red, green and blue channels as floats, in that order.
    ///
    /// Alpha is left out; lighting never reads it.
    pub fn channels(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Builds an opaque color from three unclipped channel intensities.
    pub fn from_channels(c: [f64; 3]) -> Color {
        Color::rgb(clip(c[0]), clip(c[1]), clip(c[2]))
    }
}

/// Clips a channel intensity to 8 bits.
///
/// Anything above 255 saturates; everything else is truncated toward zero.
///
/// ```
/// # use phong_ray_tracer::color::clip;
/// assert_eq!(clip(100.9), 100);
/// assert_eq!(clip(256.0), 255);
/// ```
pub fn clip(v: f64) -> u8 {
    if v > CHANNEL_MAX {
        0xff
    } else {
        v as u8
    }
}

#[test]
fn clip_no_clip() {
    assert_eq!(clip(100.0), 100);
}

#[test]
fn clip_just_over() {
    assert_eq!(clip(256.0), 255);
}

#[test]
fn clip_huge() {
    assert_eq!(clip(10000000000.0), 255);
}

#[test]
fn clip_truncates() {
    assert_eq!(clip(254.999), 254);
    assert_eq!(clip(0.7), 0);
}

#[test]
fn color_from_array() {
    let c: Color = [1, 2, 3, 4].into();

    assert_eq!(c, Color::rgba(1, 2, 3, 4));
}

#[test]
fn channels_skip_alpha() {
    let c = Color::rgba(10, 20, 30, 0);

    assert_eq!(c.channels(), [10.0, 20.0, 30.0]);
}

#[test]
fn from_channels_is_opaque_and_clipped() {
    let c = Color::from_channels([12.5, 300.0, 0.0]);

    assert_eq!(c, Color::rgba(12, 255, 0, 255));
}
