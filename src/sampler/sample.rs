//! 单像素采样。

use serde::Serialize;

use super::{ImageRaster, PointerSample};
use crate::color::Color;

/// 一次采样的完整结果：坐标、颜色与展示文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelReading {
    pub x: i64,
    pub y: i64,
    pub in_bounds: bool,
    pub color: Color,
    pub hex: String,
    pub rgb_text: String,
}

/// 读取坐标处像素的 RGB，忽略 alpha；越界时返回黑色。
///
/// 完全透明（alpha 为 0）的像素同样读作黑色。
pub fn sample_pixel(coord: PointerSample, raster: &ImageRaster) -> Color {
    if !raster.contains(coord.x, coord.y) {
        return Color::BLACK;
    }

    // contains 已保证坐标落在 u32 范围内
    match raster.rgba_at(coord.x as u32, coord.y as u32) {
        [_, _, _, 0] => Color::BLACK,
        [r, g, b, _] => Color::new(r, g, b),
    }
}

/// 采样并生成面板展示所需的文本。
pub fn read_pixel(coord: PointerSample, raster: &ImageRaster) -> PixelReading {
    let color = sample_pixel(coord, raster);
    PixelReading {
        x: coord.x,
        y: coord.y,
        in_bounds: raster.contains(coord.x, coord.y),
        color,
        hex: color.to_hex(),
        rgb_text: color.rgb_text(),
    }
}
