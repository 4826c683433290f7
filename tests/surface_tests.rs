// Host-side tests for surface configuration choices.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod surface {
    include!("../src/render/surface.rs");
}

use surface::*;
use wgpu::{Backend, CompositeAlphaMode};

#[test]
fn browser_webgpu_gets_premultiplied_even_if_only_opaque_is_listed() {
    let mode = surface_alpha_mode(Backend::BrowserWebGpu, &[CompositeAlphaMode::Opaque]);
    assert_eq!(mode, CompositeAlphaMode::PreMultiplied);
}

#[test]
fn never_picks_post_multiplied() {
    let listed = [CompositeAlphaMode::PostMultiplied, CompositeAlphaMode::Opaque];
    for backend in [Backend::BrowserWebGpu, Backend::Gl] {
        assert_ne!(surface_alpha_mode(backend, &listed), CompositeAlphaMode::PostMultiplied);
    }
}

#[test]
fn gl_uses_premultiplied_only_when_listed() {
    assert_eq!(
        surface_alpha_mode(
            Backend::Gl,
            &[CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied]
        ),
        CompositeAlphaMode::PreMultiplied
    );
    assert_eq!(
        surface_alpha_mode(Backend::Gl, &[CompositeAlphaMode::Opaque]),
        CompositeAlphaMode::Opaque
    );
    assert_eq!(surface_alpha_mode(Backend::Gl, &[]), CompositeAlphaMode::Auto);
}
