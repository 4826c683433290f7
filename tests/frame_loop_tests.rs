// Host-side tests for the visibility-gated render loop.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod frame_loop {
    include!("../src/frame_loop.rs");
}

use frame_loop::*;

/// Records every scheduled frame; a frame stays outstanding until it fires
/// or is cancelled.
#[derive(Default)]
struct RecordingHost {
    next: u32,
    outstanding: Vec<u32>,
    max_outstanding: usize,
    cancelled: usize,
    fail: bool,
}

impl FrameHost for RecordingHost {
    type Handle = u32;

    fn request_frame(&mut self) -> anyhow::Result<u32> {
        if self.fail {
            anyhow::bail!("no frame for you");
        }
        self.next += 1;
        self.outstanding.push(self.next);
        self.max_outstanding = self.max_outstanding.max(self.outstanding.len());
        Ok(self.next)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.outstanding.retain(|h| *h != handle);
        self.cancelled += 1;
    }
}

/// Deliver a visibility change the way the browser glue does: a `Start`
/// runs a render step straight away, which schedules the next frame.
fn visibility(rl: &mut RenderLoop<u32>, host: &mut RecordingHost, visible: bool) -> Transition {
    let t = rl.on_visibility(visible, host);
    if t == Transition::Start {
        _ = rl.schedule_next(host);
    }
    t
}

/// Fire the pending frame (if any); its render step schedules the next one.
fn fire(rl: &mut RenderLoop<u32>, host: &mut RecordingHost) -> bool {
    match host.outstanding.pop() {
        Some(_) => {
            _ = rl.schedule_next(host);
            true
        }
        None => false,
    }
}

#[test]
fn starts_idle() {
    let rl = RenderLoop::<u32>::default();
    assert!(!rl.is_animating());
}

#[test]
fn entering_viewport_starts_once() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();

    assert_eq!(visibility(&mut rl, &mut host, true), Transition::Start);
    assert!(rl.is_animating());
    assert_eq!(host.outstanding.len(), 1);

    // Repeated "enter" while animating must not double-schedule
    for _ in 0..5 {
        assert_eq!(visibility(&mut rl, &mut host, true), Transition::Unchanged);
    }
    assert_eq!(host.outstanding.len(), 1);
    assert_eq!(host.cancelled, 0);
}

#[test]
fn leaving_viewport_cancels_pending_frame() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();
    visibility(&mut rl, &mut host, true);
    fire(&mut rl, &mut host);

    assert_eq!(visibility(&mut rl, &mut host, false), Transition::Stop);
    assert!(!rl.is_animating());
    assert!(host.outstanding.is_empty());
    assert_eq!(host.cancelled, 1);

    // Leaving again is a no-op
    assert_eq!(visibility(&mut rl, &mut host, false), Transition::Unchanged);
    assert_eq!(host.cancelled, 1);
}

#[test]
fn can_restart_after_leaving() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();
    visibility(&mut rl, &mut host, true);
    visibility(&mut rl, &mut host, false);
    assert_eq!(visibility(&mut rl, &mut host, true), Transition::Start);
    assert!(rl.is_animating());
    assert_eq!(host.outstanding.len(), 1);
}

#[test]
fn each_fired_frame_schedules_exactly_one_more() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();
    visibility(&mut rl, &mut host, true);
    for _ in 0..60 {
        assert!(fire(&mut rl, &mut host));
        assert_eq!(host.outstanding.len(), 1);
    }
    assert_eq!(host.next, 61);
}

#[test]
fn scheduling_failure_returns_to_idle() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();
    visibility(&mut rl, &mut host, true);
    host.outstanding.pop();
    host.fail = true;
    assert!(rl.schedule_next(&mut host).is_err());
    assert!(!rl.is_animating());

    host.fail = false;
    assert_eq!(visibility(&mut rl, &mut host, true), Transition::Start);
}

#[test]
fn never_more_than_one_outstanding_frame() {
    let mut rl = RenderLoop::default();
    let mut host = RecordingHost::default();
    // Small LCG so the event order is varied but reproducible
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..2000 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        match seed >> 30 {
            0 => {
                visibility(&mut rl, &mut host, true);
            }
            1 => {
                visibility(&mut rl, &mut host, false);
            }
            _ => {
                fire(&mut rl, &mut host);
            }
        }
        assert!(host.outstanding.len() <= 1);
        assert_eq!(rl.is_animating(), host.outstanding.len() == 1);
    }
    assert_eq!(host.max_outstanding, 1);
}
