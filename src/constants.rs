/// Effect tuning constants.
///
/// Distances are in CSS pixels unless noted; they are scaled by the device
/// pixel ratio before reaching the shader.
// Image sources (512x512 placeholders tagged dark/light)
pub const DARK_IMAGE_URL: &str = "https://source.unsplash.com/512x512/?black";
pub const LIGHT_IMAGE_URL: &str = "https://source.unsplash.com/512x512/?white";
pub const NOMINAL_IMAGE_SIZE: u32 = 512; // aspect fallback when the dark image fails

// Distortion radii
pub const MAX_RANGE_CSS: f32 = 125.0; // outer edge of the reveal
pub const MIN_RANGE_CSS: f32 = 75.0; // fully revealed inside this radius
pub const NOISE_ZOOM_CSS: f32 = 75.0; // noise cell size

// Pointer smoothing: x += EASE_FACTOR * (target - x) once per frame
pub const EASE_FACTOR: f32 = 0.1;

// Pointer starts well outside the canvas so nothing is revealed until it moves
pub const POINTER_START: f32 = -500.0;

// Resize settle time before recomputing the projection
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

// Frame timestamps arrive in milliseconds; the shader wants seconds
pub const MS_TO_SEC: f64 = 0.001;
