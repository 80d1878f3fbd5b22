//! # 放大镜渲染
//!
//! ## 设计思路
//!
//! 视口计算只给出背景偏移，由宿主界面完成缩放；这里提供一份原生渲染，
//! 直接产出放大镜图像，供无浏览器的宿主使用。
//!
//! ## 实现思路
//!
//! 1. 以采样点为中心截取奇数边长的像素窗口（保证正中只有一个像素），越界部分填黑
//! 2. 使用 `fast_image_resize` 最近邻放大到直径大小，保持像素块边缘锐利
//! 3. 按配置将圆外像素的 alpha 置 0

use fast_image_resize as fr;
use image::{ImageBuffer, Rgba, RgbaImage};

use super::{ImageRaster, MagnifierConfig, PointerSample, MAX_DIAMETER, MAX_ZOOM_LEVEL};
use crate::image_loader::ImageError;

const OFF_IMAGE_PIXEL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// 放大镜窗口边长（栅格像素），向上取为奇数。
pub fn window_span(zoom_level: f64) -> u32 {
    let span = if zoom_level.is_finite() && zoom_level >= 1.0 {
        zoom_level.round() as u32
    } else {
        1
    };
    span | 1
}

/// 渲染以 `coord` 为中心的放大镜图像。
pub fn render_magnifier(
    raster: &ImageRaster,
    coord: PointerSample,
    config: &MagnifierConfig,
) -> Result<RgbaImage, ImageError> {
    if !(config.zoom_level.is_finite() && config.zoom_level <= MAX_ZOOM_LEVEL) {
        return Err(ImageError::ResourceLimit(format!(
            "放大倍数过大：{}（限制：{}）",
            config.zoom_level, MAX_ZOOM_LEVEL
        )));
    }

    let size = if config.diameter.is_finite() && config.diameter >= 1.0 {
        if config.diameter > MAX_DIAMETER {
            return Err(ImageError::ResourceLimit(format!(
                "放大镜直径过大：{}（限制：{}）",
                config.diameter, MAX_DIAMETER
            )));
        }
        config.diameter.round() as u32
    } else {
        return Err(ImageError::Render(format!(
            "放大镜直径无效：{}",
            config.diameter
        )));
    };

    let span = window_span(config.zoom_level);
    let half = i64::from(span / 2);

    // 分配前先确认两块 RGBA 缓冲的长度不会溢出
    rgba_buffer_len(span)?;
    rgba_buffer_len(size)?;

    let window = RgbaImage::from_fn(span, span, |i, j| {
        let x = coord.x - half + i64::from(i);
        let y = coord.y - half + i64::from(j);
        if raster.contains(x, y) {
            Rgba(raster.rgba_at(x as u32, y as u32))
        } else {
            OFF_IMAGE_PIXEL
        }
    });

    let mut zoomed = upscale_nearest(window, size)?;

    if config.circular {
        clip_to_circle(&mut zoomed);
    }

    log::debug!(
        "🔍 渲染放大镜 - 中心 ({}, {}) 窗口 {}px → {}px",
        coord.x,
        coord.y,
        span,
        size
    );

    Ok(zoomed)
}

fn rgba_buffer_len(side: u32) -> Result<usize, ImageError> {
    usize::try_from(side)
        .ok()
        .and_then(|side| side.checked_mul(side))
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| ImageError::ResourceLimit(format!("放大镜缓冲长度溢出：边长 {}", side)))
}

fn upscale_nearest(window: RgbaImage, size: u32) -> Result<RgbaImage, ImageError> {
    let (src_width, src_height) = window.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        window.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| ImageError::Render(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Nearest);

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ImageError::Render(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(size, size, dst_image.into_vec())
        .ok_or_else(|| ImageError::Render("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn clip_to_circle(image: &mut RgbaImage) {
    let radius = f64::from(image.width()) / 2.0;
    let radius_sq = radius * radius;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - radius;
        let dy = f64::from(y) + 0.5 - radius;
        if dx * dx + dy * dy > radius_sq {
            pixel.0[3] = 0;
        }
    }
}
