use crate::frame::SharedEffect;
use crate::pointer;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn first_touch(list: &web::TouchList) -> Option<Vec2> {
    list.get(0)
        .map(|t| Vec2::new(t.page_x() as f32, t.page_y() as f32))
}

pub fn wire_pointer_handlers(effect: &SharedEffect) {
    wire_mousemove(effect);
    wire_touchmove(effect);
}

fn wire_mousemove(effect: &SharedEffect) {
    let effect = effect.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let page = Vec2::new(ev.page_x() as f32, ev.page_y() as f32);
        effect.borrow_mut().on_pointer(page);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_touchmove(effect: &SharedEffect) {
    let effect = effect.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        let page = pointer::pick_touch(
            first_touch(&ev.touches()),
            first_touch(&ev.changed_touches()),
        );
        if let Some(page) = page {
            effect.borrow_mut().on_pointer(page);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
