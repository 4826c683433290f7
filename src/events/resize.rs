use crate::debounce::{Debounce, TimerHost};
use crate::frame::SharedEffect;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `setTimeout`/`clearTimeout` as a `TimerHost`, always firing `callback`.
struct WindowTimer<'a> {
    window: &'a web::Window,
    callback: &'a js_sys::Function,
}

impl TimerHost for WindowTimer<'_> {
    type Handle = i32;

    fn set_timeout(&mut self, delay_ms: i32) -> anyhow::Result<i32> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(self.callback, delay_ms)
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    fn clear_timeout(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// Recompute size and projection once a burst of `resize` events settles.
pub fn wire_resize(effect: &SharedEffect, delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let debounce = Rc::new(RefCell::new(Debounce::<i32>::new(delay_ms)));

    let settled = {
        let debounce = debounce.clone();
        let effect = effect.clone();
        Closure::wrap(Box::new(move || {
            if debounce.borrow_mut().fire() {
                effect.borrow_mut().resize();
            }
        }) as Box<dyn FnMut()>)
    };
    let settled_fn: js_sys::Function = settled.as_ref().unchecked_ref::<js_sys::Function>().clone();
    settled.forget();

    let on_resize = Closure::wrap(Box::new(move || {
        let Some(window) = web::window() else {
            return;
        };
        if debounce.borrow().is_pending() {
            log::debug!("[resize] coalescing into pending recompute");
        }
        let mut timer = WindowTimer {
            window: &window,
            callback: &settled_fn,
        };
        if let Err(e) = debounce.borrow_mut().trigger(&mut timer) {
            log::warn!("[resize] could not schedule: {:?}", e);
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}
