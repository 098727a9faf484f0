/// Filter stage descriptors and their pixel transforms
///
/// A stage is a named transform plus a map of parameter values. The
/// antique chain uses two of them: sepia toning and exposure
/// adjustment. Stage values are serialized to JSON alongside projects,
/// so the descriptor shape is kept stable and self-describing.
use std::collections::BTreeMap;

use cgmath::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::working::WorkingImage;

/// Stage name for the sepia tone transform.
pub const SEPIA_TONE: &str = "SepiaTone";
/// Stage name for the exposure adjustment transform.
pub const EXPOSURE_ADJUST: &str = "ExposureAdjust";

/// A named filter transform with its parameters.
///
/// Applying a stage is a pure function: (image, params) -> image. A
/// stage that cannot produce a result (unknown name, empty input)
/// yields `None` and the chain aborts at that point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterStage {
    /// Transform name, e.g. "SepiaTone".
    pub name: String,
    /// Parameter name to value, e.g. {"intensity": 1.0}.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl FilterStage {
    /// Create a stage with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f32) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// A sepia tone stage.
    ///
    /// `intensity` blends between the original image (0.0) and the full
    /// sepia matrix (1.0).
    pub fn sepia(intensity: f32) -> Self {
        Self::new(SEPIA_TONE).with_param("intensity", intensity)
    }

    /// An exposure adjustment stage.
    ///
    /// `ev` is in photographic stops: each stop doubles or halves the
    /// channel values.
    pub fn exposure(ev: f32) -> Self {
        Self::new(EXPOSURE_ADJUST).with_param("ev", ev)
    }

    /// Look up a parameter, falling back to a default value.
    pub fn param_or(&self, key: &str, default: f32) -> f32 {
        self.params.get(key).copied().unwrap_or(default)
    }

    /// Apply this stage to a working image.
    ///
    /// Returns `None` when the transform produces no output: the stage
    /// name is unknown or the input has no pixels.
    pub fn apply(&self, input: &WorkingImage) -> Option<WorkingImage> {
        if input.is_empty() {
            return None;
        }

        match self.name.as_str() {
            SEPIA_TONE => Some(sepia(input, self.param_or("intensity", 1.0))),
            EXPOSURE_ADJUST => Some(exposure(input, self.param_or("ev", 0.0))),
            _ => None,
        }
    }
}

/// Apply the sepia tone matrix, blended by `intensity`.
fn sepia(input: &WorkingImage, intensity: f32) -> WorkingImage {
    let intensity = intensity.clamp(0.0, 1.0);

    // Standard sepia kernel, column-major per cgmath convention.
    let kernel = Matrix3::new(
        0.393, 0.349, 0.272, // reds
        0.769, 0.686, 0.534, // greens
        0.189, 0.168, 0.131, // blues
    );

    input.map_rgb(|r, g, b| {
        let toned = kernel * Vector3::new(r, g, b);
        (
            (r + (toned.x - r) * intensity).clamp(0.0, 1.0),
            (g + (toned.y - g) * intensity).clamp(0.0, 1.0),
            (b + (toned.z - b) * intensity).clamp(0.0, 1.0),
        )
    })
}

/// Scale channel values by 2^ev.
fn exposure(input: &WorkingImage, ev: f32) -> WorkingImage {
    let multiplier = 2.0_f32.powf(ev);

    input.map_rgb(|r, g, b| {
        (
            (r * multiplier).clamp(0.0, 1.0),
            (g * multiplier).clamp(0.0, 1.0),
            (b * multiplier).clamp(0.0, 1.0),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(r: u8, g: u8, b: u8) -> WorkingImage {
        WorkingImage::from_rgba8(&RgbaImage::from_pixel(1, 1, Rgba([r, g, b, 255])))
    }

    #[test]
    fn test_sepia_full_intensity_matches_kernel() {
        let toned = FilterStage::sepia(1.0).apply(&solid(60, 120, 180)).unwrap();

        // Hand-applied kernel for (60, 120, 180) / 255.
        assert!((toned.pixels()[0] - 0.587_764_7).abs() < 1e-6);
        assert!((toned.pixels()[1] - 0.523_529_4).abs() < 1e-6);
        assert!((toned.pixels()[2] - 0.407_764_7).abs() < 1e-6);
    }

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let input = solid(60, 120, 180);
        let toned = FilterStage::sepia(0.0).apply(&input).unwrap();
        assert_eq!(toned, input);
    }

    #[test]
    fn test_exposure_one_stop_doubles() {
        let adjusted = FilterStage::exposure(1.0).apply(&solid(64, 64, 64)).unwrap();
        assert!((adjusted.pixels()[0] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_exposure_clamps_highlights() {
        let adjusted = FilterStage::exposure(1.0)
            .apply(&solid(200, 200, 200))
            .unwrap();
        assert!((adjusted.pixels()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_preserved_through_stages() {
        let input = WorkingImage::from_rgba8(&RgbaImage::from_pixel(
            1,
            1,
            Rgba([60, 120, 180, 77]),
        ));

        let toned = FilterStage::sepia(1.0).apply(&input).unwrap();
        let adjusted = FilterStage::exposure(1.0).apply(&toned).unwrap();

        assert!((adjusted.pixels()[3] - 77.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_stage_produces_no_output() {
        let stage = FilterStage::new("Vignette").with_param("radius", 0.5);
        assert!(stage.apply(&solid(10, 10, 10)).is_none());
    }

    #[test]
    fn test_empty_input_produces_no_output() {
        let empty = WorkingImage::from_rgba8(&RgbaImage::new(0, 0));
        assert!(FilterStage::sepia(1.0).apply(&empty).is_none());
    }

    #[test]
    fn test_param_fallback() {
        let stage = FilterStage::new(EXPOSURE_ADJUST);
        assert_eq!(stage.param_or("ev", 0.0), 0.0);
        assert_eq!(FilterStage::exposure(1.0).param_or("ev", 0.0), 1.0);
    }
}
