use crate::constants::NOMINAL_IMAGE_SIZE;
use glam::{DVec2, Mat3, UVec2, Vec2};

/// Backing-store size for a canvas displayed at `css` CSS pixels.
#[inline]
pub fn drawing_buffer_size(css: DVec2, device_pixel_ratio: f64) -> UVec2 {
    let w = (css.x * device_pixel_ratio).round().max(1.0) as u32;
    let h = (css.y * device_pixel_ratio).round().max(1.0) as u32;
    UVec2::new(w, h)
}

#[inline]
fn aspect(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

/// Scale matrix that fits an image of `image` pixels onto a canvas of `css`
/// size. Y is flipped so texture rows run top to bottom.
pub fn projection(css: Vec2, image: UVec2) -> Mat3 {
    let canvas_aspect = aspect(css.x, css.y);
    let image_aspect = aspect(image.x as f32, image.y as f32);
    scaling(image_aspect / canvas_aspect, -1.0)
}

/// `[sx,0,0, 0,sy,0, 0,0,1]`
#[inline]
pub fn scaling(sx: f32, sy: f32) -> Mat3 {
    Mat3::from_scale(Vec2::new(sx, sy))
}

/// Pixel size the projection is fitted to: the dark image's, or the nominal
/// requested size when it failed to load.
#[inline]
pub fn reference_size(dark: Option<UVec2>) -> UVec2 {
    dark.unwrap_or(UVec2::splat(NOMINAL_IMAGE_SIZE))
}
