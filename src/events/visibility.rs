use crate::frame::{self, FrameCallback, SharedEffect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Start/stop the render loop as the canvas enters/leaves the viewport.
pub fn observe_visibility(
    canvas: &web::HtmlCanvasElement,
    effect: &SharedEffect,
    tick: &FrameCallback,
) -> Result<web::IntersectionObserver, JsValue> {
    let effect = effect.clone();
    let tick = tick.clone();
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    frame::on_visibility(&effect, &tick, entry.is_intersecting());
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let observer = web::IntersectionObserver::new(closure.as_ref().unchecked_ref())?;
    observer.observe(canvas);
    closure.forget();
    Ok(observer)
}
