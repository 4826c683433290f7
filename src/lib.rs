#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod config;
mod constants;
mod debounce;
mod dom;
mod error;
mod events;
mod frame;
mod frame_loop;
mod pointer;
mod projection;
mod render;

/// A mounted effect. Dropping it does not stop anything; the browser holds
/// the listener closures.
struct Ting {
    effect: frame::SharedEffect,
    observer: web::IntersectionObserver,
}

impl Ting {
    fn destroy(&self) {
        self.observer.disconnect();
        // TODO: detach mouse/touch/resize listeners and drop the GPU state
        log::info!(
            "[ting] visibility observer disconnected (animating={})",
            self.effect.borrow().frames.is_animating()
        );
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Ting>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ting-web starting");

    spawn_local(async move {
        match mount().await {
            Ok(Some(ting)) => MOUNTED.with(|m| *m.borrow_mut() = Some(ting)),
            Ok(None) => {}
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}

/// Stop observing the canvas. Listeners and GPU resources stay alive.
#[wasm_bindgen]
pub fn destroy() {
    MOUNTED.with(|m| {
        if let Some(ting) = m.borrow_mut().take() {
            ting.destroy();
        }
    });
}

async fn mount() -> anyhow::Result<Option<Ting>> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(canvas) = dom::find_canvas(&document) else {
        log::info!("no <canvas> in document; nothing to do");
        return Ok(None);
    };
    let settings = dom::read_config(&canvas);

    let effect = frame::Effect::setup(canvas.clone(), &settings).await?;
    let effect: frame::SharedEffect = Rc::new(RefCell::new(effect));
    let tick = frame::install_tick(&effect);

    // Only once setup has resolved: the loop may start from here on
    let observer = events::observe_visibility(&canvas, &effect, &tick)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    events::wire_pointer_handlers(&effect);
    events::wire_resize(&effect, settings.resize_debounce_ms);
    log::info!("[ting] ready");

    Ok(Some(Ting { effect, observer }))
}
