/// Working-space image representation
///
/// Filter stages operate on interleaved RGBA f32 values in the [0, 1]
/// range rather than on display bytes. Converting once on entry keeps
/// every stage a straightforward float transform and defers
/// quantization to the render context at the end of the chain.
use image::RgbaImage;

/// An RGBA image in float working space.
///
/// Pixel data is interleaved `[r, g, b, a, r, g, b, a, ...]`, row major,
/// with every component nominally in [0, 1]. Stages may produce values
/// outside that range mid-chain; the render context clamps on output.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingImage {
    width: u32,
    height: u32,
    pixels: Vec<f32>,
}

impl WorkingImage {
    /// Convert an 8-bit RGBA bitmap into working space.
    pub fn from_rgba8(image: &RgbaImage) -> Self {
        let pixels = image
            .as_raw()
            .iter()
            .map(|&component| component as f32 / 255.0)
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Build a working image from raw float components.
    ///
    /// Returns `None` if the component count does not match the extent.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<f32>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the image has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The interleaved RGBA components.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Apply a per-pixel color transform, preserving alpha.
    pub fn map_rgb(&self, transform: impl Fn(f32, f32, f32) -> (f32, f32, f32)) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());

        for rgba in self.pixels.chunks_exact(4) {
            let (r, g, b) = transform(rgba[0], rgba[1], rgba[2]);
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
            pixels.push(rgba[3]);
        }

        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
