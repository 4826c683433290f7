// Host-side tests for pointer mapping and easing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod pointer {
    include!("../src/pointer.rs");
}

use glam::{UVec2, Vec2};
use pointer::*;

fn approx(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

fn rect() -> CanvasRect {
    CanvasRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 300.0,
    }
}

#[test]
fn page_to_canvas_scales_and_flips_y() {
    // CSS 400x300 displayed at devicePixelRatio 2
    let buffer = UVec2::new(800, 600);
    let r = rect();

    let top_left = r.page_to_canvas(Vec2::new(100.0, 50.0), buffer).unwrap();
    assert!(approx(top_left, Vec2::new(0.0, 600.0), 1e-4));

    let bottom_right = r.page_to_canvas(Vec2::new(500.0, 350.0), buffer).unwrap();
    assert!(approx(bottom_right, Vec2::new(800.0, 0.0), 1e-4));

    let center = r.page_to_canvas(Vec2::new(300.0, 200.0), buffer).unwrap();
    assert!(approx(center, Vec2::new(400.0, 300.0), 1e-4));
}

#[test]
fn page_to_canvas_outside_rect_is_not_clamped() {
    let buffer = UVec2::new(400, 300);
    let p = rect().page_to_canvas(Vec2::new(0.0, 0.0), buffer).unwrap();
    assert!(approx(p, Vec2::new(-100.0, 350.0), 1e-4));
}

#[test]
fn page_to_canvas_empty_rect_is_none() {
    let r = CanvasRect::default();
    assert!(r.page_to_canvas(Vec2::new(10.0, 10.0), UVec2::new(100, 100)).is_none());
}

#[test]
fn pointer_starts_off_canvas() {
    let s = PointerState::default();
    assert_eq!(s.pos, Vec2::splat(-500.0));
    assert_eq!(s.target, Vec2::splat(-500.0));
}

#[test]
fn retarget_is_ignored_while_idle() {
    let mut s = PointerState::default();
    let before = s;
    let moved = s.retarget(false, Vec2::new(300.0, 200.0), &rect(), UVec2::new(800, 600));
    assert!(!moved);
    assert_eq!(s, before);
}

#[test]
fn retarget_sets_target_only() {
    let mut s = PointerState::default();
    let moved = s.retarget(true, Vec2::new(300.0, 200.0), &rect(), UVec2::new(800, 600));
    assert!(moved);
    assert!(approx(s.target, Vec2::new(400.0, 300.0), 1e-4));
    assert_eq!(s.pos, Vec2::splat(-500.0));
}

#[test]
fn ease_moves_a_tenth_of_the_gap() {
    let mut s = PointerState {
        pos: Vec2::ZERO,
        target: Vec2::new(100.0, -50.0),
    };
    let p = s.ease();
    assert!(approx(p, Vec2::new(10.0, -5.0), 1e-4));
    assert_eq!(p, s.pos);
}

#[test]
fn ease_converges_geometrically() {
    let target = Vec2::new(100.0, 50.0);
    let mut s = PointerState {
        pos: Vec2::splat(-500.0),
        target,
    };
    let e0 = s.pos.distance(target);
    for n in 1..=100 {
        s.ease();
        let bound = e0 * 0.9f32.powi(n);
        let err = s.pos.distance(target);
        assert!(err <= bound * 1.001 + 1e-3, "step {}: err={} bound={}", n, err, bound);
    }
    assert!(s.pos.distance(target) < 0.05);
}

#[test]
fn pick_touch_prefers_active_touch() {
    let a = Vec2::new(1.0, 2.0);
    let c = Vec2::new(3.0, 4.0);
    assert_eq!(pick_touch(Some(a), Some(c)), Some(a));
    assert_eq!(pick_touch(Some(a), None), Some(a));
}

#[test]
fn pick_touch_falls_back_to_changed_on_touchend() {
    let c = Vec2::new(3.0, 4.0);
    assert_eq!(pick_touch(None, Some(c)), Some(c));
    assert_eq!(pick_touch(None, None), None);
}

#[test]
fn touchend_sample_still_retargets() {
    let mut s = PointerState::default();
    let page = pick_touch(None, Some(Vec2::new(300.0, 200.0))).unwrap();
    assert!(s.retarget(true, page, &rect(), UVec2::new(800, 600)));
    assert!(approx(s.target, Vec2::new(400.0, 300.0), 1e-4));
}
