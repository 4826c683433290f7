use crate::constants::{
    DARK_IMAGE_URL, LIGHT_IMAGE_URL, MAX_RANGE_CSS, MIN_RANGE_CSS, NOISE_ZOOM_CSS,
    RESIZE_DEBOUNCE_MS,
};

/// Runtime configuration for one mounted effect.
///
/// Defaults come from `constants.rs`; the image sources can be overridden per
/// canvas (see `dom::read_config`).
#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub dark_src: String,
    pub light_src: String,
    pub max_range_css: f32,
    pub min_range_css: f32,
    pub noise_zoom_css: f32,
    pub resize_debounce_ms: i32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            dark_src: DARK_IMAGE_URL.to_string(),
            light_src: LIGHT_IMAGE_URL.to_string(),
            max_range_css: MAX_RANGE_CSS,
            min_range_css: MIN_RANGE_CSS,
            noise_zoom_css: NOISE_ZOOM_CSS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

/// Distortion constants in device pixels, uploaded once at setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeUniforms {
    pub max_range: f32,
    pub min_range: f32,
    pub noise_zoom: f32,
}

impl EffectConfig {
    /// Replace the image sources with any non-empty override.
    pub fn with_sources(mut self, dark: Option<String>, light: Option<String>) -> Self {
        if let Some(src) = dark.filter(|s| !s.trim().is_empty()) {
            self.dark_src = src;
        }
        if let Some(src) = light.filter(|s| !s.trim().is_empty()) {
            self.light_src = src;
        }
        self
    }

    pub fn ranges(&self, device_pixel_ratio: f64) -> RangeUniforms {
        let dpr = device_pixel_ratio as f32;
        RangeUniforms {
            max_range: self.max_range_css * dpr,
            min_range: self.min_range_css * dpr,
            noise_zoom: self.noise_zoom_css * dpr,
        }
    }
}
