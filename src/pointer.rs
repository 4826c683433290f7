use crate::constants::{EASE_FACTOR, POINTER_START};
use glam::{UVec2, Vec2};

/// Canvas bounding rectangle in page coordinates (client rect + scroll).
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// Map a page-space point into drawing-buffer pixels with a bottom-left
    /// origin. `None` while the rect has no area.
    pub fn page_to_canvas(&self, page: Vec2, buffer: UVec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let w = buffer.x as f32;
        let h = buffer.y as f32;
        let x = (page.x - self.left) * w / self.width;
        let y = h - (page.y - self.top) * h / self.height;
        Some(Vec2::new(x, y))
    }
}

/// Eased pointer position plus the target it chases, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    pub target: Vec2,
}

impl Default for PointerState {
    fn default() -> Self {
        let start = Vec2::splat(POINTER_START);
        Self {
            pos: start,
            target: start,
        }
    }
}

impl PointerState {
    /// One frame of exponential smoothing toward the target.
    #[inline]
    pub fn ease(&mut self) -> Vec2 {
        self.pos = lerp(self.pos, self.target, EASE_FACTOR);
        self.pos
    }

    /// Retarget from a page-space sample. Returns whether the target moved;
    /// samples are dropped while the loop is idle.
    pub fn retarget(&mut self, animating: bool, page: Vec2, rect: &CanvasRect, buffer: UVec2) -> bool {
        if !animating {
            return false;
        }
        match rect.page_to_canvas(page, buffer) {
            Some(target) => {
                self.target = target;
                true
            }
            None => false,
        }
    }
}

#[inline]
pub fn lerp(start: Vec2, end: Vec2, amt: f32) -> Vec2 {
    start * (1.0 - amt) + end * amt
}

/// Pick the page position of a touch event: first active touch, else the
/// first changed touch (on touchend `touches` is already empty).
#[inline]
pub fn pick_touch(active: Option<Vec2>, changed: Option<Vec2>) -> Option<Vec2> {
    active.or(changed)
}
