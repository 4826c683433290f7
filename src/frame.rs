use crate::config::EffectConfig;
use crate::constants::MS_TO_SEC;
use crate::dom;
use crate::error::EffectError;
use crate::frame_loop::{FrameHost, RenderLoop, Transition};
use crate::pointer::{CanvasRect, PointerState};
use crate::projection;
use crate::render;
use glam::{UVec2, Vec2};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one mounted canvas needs between frames.
pub struct Effect {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState,
    pub pointer: PointerState,
    pub rect: CanvasRect,
    pub frames: RenderLoop<i32>,
}

pub type SharedEffect = Rc<RefCell<Effect>>;
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

impl Effect {
    pub async fn setup(
        canvas: web::HtmlCanvasElement,
        settings: &EffectConfig,
    ) -> Result<Self, EffectError> {
        dom::sync_canvas_backing_size(&canvas);
        let gpu = render::GpuState::new(&canvas, settings, dom::device_pixel_ratio()).await?;
        let rect = dom::page_rect(&canvas);
        let mut effect = Self {
            canvas,
            gpu,
            pointer: PointerState::default(),
            rect,
            frames: RenderLoop::default(),
        };
        if let Err(e) = effect.gpu.clear() {
            log::warn!("[frame] initial clear failed: {:?}", e);
        }
        effect.resize();
        Ok(effect)
    }

    /// Match the drawing buffer to the displayed size, refit the image and
    /// re-cache the page-space rect.
    pub fn resize(&mut self) {
        let size = dom::sync_canvas_backing_size(&self.canvas);
        self.gpu.resize_if_needed(size);
        let css = dom::css_size(&self.canvas).as_vec2();
        self.gpu
            .set_projection(projection::projection(css, self.gpu.image_size()));
        self.rect = dom::page_rect(&self.canvas);
        log::debug!("[frame] resized to {}x{}", size.x, size.y);
    }

    pub fn on_pointer(&mut self, page: Vec2) {
        let buffer = UVec2::new(self.canvas.width(), self.canvas.height());
        self.pointer
            .retarget(self.frames.is_animating(), page, &self.rect, buffer);
    }

    /// Ease the pointer and draw once.
    pub fn step(&mut self, time_ms: f64) {
        let mouse = self.pointer.ease();
        match self.gpu.render(mouse, (time_ms * MS_TO_SEC) as f32) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

/// `requestAnimationFrame` as a `FrameHost`.
struct RafHost<'a> {
    window: &'a web::Window,
    tick: &'a FrameCallback,
}

impl FrameHost for RafHost<'_> {
    type Handle = i32;

    fn request_frame(&mut self) -> anyhow::Result<i32> {
        let tick = self.tick.borrow();
        let callback = tick
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("frame callback not installed"))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{:?}", e))
    }

    fn cancel_frame(&mut self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}

/// Create the rAF closure for `effect`. Nothing is scheduled until the
/// canvas becomes visible.
pub fn install_tick(effect: &SharedEffect) -> FrameCallback {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let effect_tick = effect.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time_ms: f64| {
        run_step(&effect_tick, &tick_clone, time_ms);
    }) as Box<dyn FnMut(f64)>));
    tick
}

fn run_step(effect: &SharedEffect, tick: &FrameCallback, time_ms: f64) {
    let Some(window) = web::window() else {
        return;
    };
    let mut e = effect.borrow_mut();
    e.step(time_ms);
    let mut host = RafHost {
        window: &window,
        tick,
    };
    if let Err(err) = e.frames.schedule_next(&mut host) {
        log::error!("[frame] could not schedule next frame: {:?}", err);
    }
}

/// Drive the loop from an intersection change.
pub fn on_visibility(effect: &SharedEffect, tick: &FrameCallback, visible: bool) {
    let Some(window) = web::window() else {
        return;
    };
    let transition = {
        let mut host = RafHost {
            window: &window,
            tick,
        };
        effect.borrow_mut().frames.on_visibility(visible, &mut host)
    };
    match transition {
        Transition::Start => {
            log::debug!("[frame] canvas visible; animating");
            run_step(effect, tick, dom::now_ms());
        }
        Transition::Stop => log::debug!("[frame] canvas hidden; idle"),
        Transition::Unchanged => {}
    }
}
