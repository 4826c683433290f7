use crate::config::EffectConfig;
use crate::error::EffectError;
use glam::UVec2;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const IMAGE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// An uploaded image, or an empty stand-in when loading failed.
pub(crate) struct ImageTexture {
    pub(crate) _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    /// Source pixel size; `None` for the stand-in.
    pub(crate) size: Option<UVec2>,
}

pub(crate) struct TexturePair {
    pub(crate) dark: ImageTexture,
    pub(crate) light: ImageTexture,
}

fn create_image_texture(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    usage: wgpu::TextureUsages,
) -> (wgpu::Texture, wgpu::TextureView) {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: IMAGE_FORMAT,
        usage,
        view_formats: &[],
    });
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    (tex, view)
}

/// A pending image request. The browser starts fetching as soon as `src` is
/// set, so both requests are in flight before either is awaited.
struct PendingImage {
    label: &'static str,
    url: String,
    image: web::HtmlImageElement,
    decoded: js_sys::Promise,
}

fn begin_fetch(label: &'static str, url: &str) -> Result<PendingImage, EffectError> {
    let image = web::HtmlImageElement::new().map_err(|e| EffectError::Dom(format!("{:?}", e)))?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(url);
    let decoded = image.decode();
    Ok(PendingImage {
        label,
        url: url.to_string(),
        image,
        decoded,
    })
}

async fn finish_fetch(pending: PendingImage) -> Result<web::HtmlImageElement, EffectError> {
    let PendingImage {
        label,
        url,
        image,
        decoded,
    } = pending;
    let fail = |reason: String| EffectError::TextureLoad {
        label,
        url: url.clone(),
        reason,
    };
    JsFuture::from(decoded)
        .await
        .map_err(|e: JsValue| fail(format!("{:?}", e)))?;
    if image.natural_width() == 0 || image.natural_height() == 0 {
        return Err(fail("decoded image has no pixels".to_string()));
    }
    Ok(image)
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &'static str,
    image: &web::HtmlImageElement,
) -> ImageTexture {
    let size = UVec2::new(image.natural_width(), image.natural_height());
    let (texture, view) = create_image_texture(
        device,
        label,
        size.x,
        size.y,
        wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
    );
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width: size.x,
            height: size.y,
            depth_or_array_layers: 1,
        },
    );
    ImageTexture {
        _texture: texture,
        view,
        size: Some(size),
    }
}

/// 1x1 texture left zero-initialised (transparent black).
fn empty(device: &wgpu::Device, label: &'static str) -> ImageTexture {
    let (texture, view) =
        create_image_texture(device, label, 1, 1, wgpu::TextureUsages::TEXTURE_BINDING);
    ImageTexture {
        _texture: texture,
        view,
        size: None,
    }
}

async fn resolve(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pending: Result<PendingImage, EffectError>,
    label: &'static str,
) -> ImageTexture {
    let loaded = match pending {
        Ok(p) => finish_fetch(p).await,
        Err(e) => Err(e),
    };
    match loaded {
        Ok(image) => {
            let tex = upload(device, queue, label, &image);
            log::info!(
                "[textures] {} loaded {}x{}",
                label,
                image.natural_width(),
                image.natural_height()
            );
            tex
        }
        Err(e) => {
            log::error!("[textures] {}", e);
            empty(device, label)
        }
    }
}

/// Fetch and upload the dark/light pair. Failures are logged and replaced by
/// empty textures; setup carries on either way.
pub(crate) async fn load_pair(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    config: &EffectConfig,
) -> TexturePair {
    let dark = begin_fetch("dark", &config.dark_src);
    let light = begin_fetch("light", &config.light_src);
    TexturePair {
        dark: resolve(device, queue, dark, "dark").await,
        light: resolve(device, queue, light, "light").await,
    }
}
