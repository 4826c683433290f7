/// Alpha mode for the canvas surface.
///
/// Browser WebGPU only reports `Opaque` but accepts `PreMultiplied`, which is
/// what keeps the transparent clear see-through. With a zero clear and opaque
/// images that matches straight-alpha output. The GL path validates against
/// its capabilities, so it only gets `PreMultiplied` when listed.
pub(crate) fn surface_alpha_mode(
    backend: wgpu::Backend,
    supported: &[wgpu::CompositeAlphaMode],
) -> wgpu::CompositeAlphaMode {
    let premultiplied = wgpu::CompositeAlphaMode::PreMultiplied;
    if backend == wgpu::Backend::BrowserWebGpu || supported.contains(&premultiplied) {
        premultiplied
    } else {
        supported
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}
