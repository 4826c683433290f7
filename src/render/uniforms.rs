use crate::config::RangeUniforms;
use glam::{Mat3, UVec2, Vec2};

/// CPU mirror of `Uniforms` in `ting.wgsl`.
///
/// `mat3x3<f32>` columns are 16-byte aligned in a uniform block, hence the
/// padded `[f32; 4]` columns. Total size is 80 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct EffectUniforms {
    pub(crate) matrix: [[f32; 4]; 3],
    pub(crate) mouse: [f32; 2],
    pub(crate) resolution: [f32; 2],
    pub(crate) time: f32,
    pub(crate) max_range: f32,
    pub(crate) min_range: f32,
    pub(crate) noise_zoom: f32,
}

impl EffectUniforms {
    pub(crate) fn new(ranges: RangeUniforms) -> Self {
        let mut u = Self {
            matrix: [[0.0; 4]; 3],
            mouse: [0.0, 0.0],
            resolution: [1.0, 1.0],
            time: 0.0,
            max_range: ranges.max_range,
            min_range: ranges.min_range,
            noise_zoom: ranges.noise_zoom,
        };
        u.set_matrix(Mat3::IDENTITY);
        u
    }

    pub(crate) fn set_matrix(&mut self, m: Mat3) {
        for (dst, col) in self.matrix.iter_mut().zip(m.to_cols_array_2d()) {
            *dst = [col[0], col[1], col[2], 0.0];
        }
    }

    #[inline]
    pub(crate) fn set_resolution(&mut self, size: UVec2) {
        self.resolution = [size.x as f32, size.y as f32];
    }

    #[inline]
    pub(crate) fn set_frame(&mut self, mouse: Vec2, time_sec: f32) {
        self.mouse = mouse.to_array();
        self.time = time_sec;
    }
}
