/// Render context for final bitmap output
///
/// The last pipeline step converts the float working image back into a
/// display bitmap. The context doing that conversion is acquired fresh
/// for every run and released when the run ends, whichever way it
/// exits. The CPU backend here keeps the same acquire/render/release
/// shape a GPU-backed context would have.
use image::{Rgba, RgbaImage};

use super::working::WorkingImage;
use crate::pipeline::error::PipelineError;

/// Largest extent the context will render, matching common GPU texture
/// limits.
pub const MAX_RENDER_DIM: u32 = 16_384;

/// A drawing context scoped to a single pipeline run.
///
/// Never shared between runs; each run acquires its own.
#[derive(Debug)]
pub struct RenderContext {
    width: u32,
    height: u32,
}

impl RenderContext {
    /// Acquire a context able to render the given extent.
    ///
    /// Fails with `PipelineError::RenderContextUnavailable` when the
    /// extent exceeds the maximum renderable dimension.
    pub fn acquire(width: u32, height: u32) -> Result<Self, PipelineError> {
        if width > MAX_RENDER_DIM || height > MAX_RENDER_DIM {
            return Err(PipelineError::RenderContextUnavailable {
                reason: format!(
                    "extent {}x{} exceeds maximum renderable dimension {}",
                    width, height, MAX_RENDER_DIM
                ),
            });
        }

        Ok(Self { width, height })
    }

    /// Render a working image into an 8-bit RGBA bitmap at its natural
    /// extent. Components are clamped to [0, 1] and quantized.
    pub fn render(&self, image: &WorkingImage) -> RgbaImage {
        let pixels = image.pixels();
        let stride = image.width() as usize * 4;

        RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let offset = y as usize * stride + x as usize * 4;
            Rgba([
                quantize(pixels[offset]),
                quantize(pixels[offset + 1]),
                quantize(pixels[offset + 2]),
                quantize(pixels[offset + 3]),
            ])
        })
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        // Backing resources go with the context, on every exit path.
        println!("Releasing render context ({}x{})", self.width, self.height);
    }
}

fn quantize(component: f32) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}
