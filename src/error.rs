//! Effect error types

use thiserror::Error;

/// Failures while bringing the effect up.
///
/// Only `TextureLoad` is recoverable: setup logs it and carries on with an
/// empty texture.
#[derive(Error, Debug)]
pub enum EffectError {
    /// No GPU surface, adapter or device for the canvas
    #[error("GPU context unavailable: {0}")]
    ContextUnavailable(String),

    /// WGSL module or pipeline rejected by validation
    #[error("shader compile error: {0}")]
    ShaderCompile(String),

    /// Image fetch or decode failed
    #[error("failed to load {label} texture from {url}: {reason}")]
    TextureLoad {
        label: &'static str,
        url: String,
        reason: String,
    },

    /// A DOM call failed during setup
    #[error("DOM error: {0}")]
    Dom(String),
}
