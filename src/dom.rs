use crate::config::EffectConfig;
use crate::pointer::CanvasRect;
use crate::projection;
use glam::{DVec2, UVec2};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// First `<canvas>` in the document, if any.
pub fn find_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .query_selector("canvas")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Displayed CSS size of the canvas.
#[inline]
pub fn css_size(canvas: &web::HtmlCanvasElement) -> DVec2 {
    DVec2::new(canvas.client_width() as f64, canvas.client_height() as f64)
}

/// Resize the backing store to CSS size * devicePixelRatio. Returns the new
/// drawing-buffer size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> UVec2 {
    let size = projection::drawing_buffer_size(css_size(canvas), device_pixel_ratio());
    if canvas.width() != size.x {
        canvas.set_width(size.x);
    }
    if canvas.height() != size.y {
        canvas.set_height(size.y);
    }
    size
}

/// Bounding rect in page coordinates, matching `MouseEvent.pageX/Y`.
pub fn page_rect(canvas: &web::HtmlCanvasElement) -> CanvasRect {
    let rect = canvas.get_bounding_client_rect();
    let (scroll_x, scroll_y) = web::window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    CanvasRect {
        left: (rect.left() + scroll_x) as f32,
        top: (rect.top() + scroll_y) as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// Defaults plus `data-dark-src` / `data-light-src` overrides on the canvas.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> EffectConfig {
    let data = canvas.dataset();
    EffectConfig::default().with_sources(data.get("darkSrc"), data.get("lightSrc"))
}

/// Milliseconds since navigation start, used for a frame kicked off outside
/// `requestAnimationFrame`.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
