//! # 放大镜视口
//!
//! ## 设计思路
//!
//! 放大镜是一个圆形裁剪的浮层，背景图为整张栅格按 `diameter / zoom_level`
//! 倍放大后的结果，再通过偏移让被采样像素正好落在圆心。
//!
//! ```text
//! pixel   = diameter / zoom_level
//! size    = image_size * pixel
//! offset  = -(coord * pixel) + diameter / 2 - pixel / 2
//! ```
//!
//! 浮层本身放在指针右上方：`left = local_x + offset_x`，
//! `top = local_y - diameter - offset_y`。

use serde::{Deserialize, Serialize};

use super::{ImageSize, PointerSample};

/// 放大倍数上限（放大镜内可见的栅格像素数）。
pub const MAX_ZOOM_LEVEL: f64 = 256.0;
/// 放大镜直径上限（像素）。
pub const MAX_DIAMETER: f64 = 4096.0;

/// 放大镜配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnifierConfig {
    /// 放大镜直径（像素）。
    pub diameter: f64,
    /// 放大镜内可见的栅格像素数（越小越放大）。
    pub zoom_level: f64,
    /// 浮层相对指针的水平偏移。
    pub offset_x: f64,
    /// 浮层底边与指针之间的垂直间距。
    pub offset_y: f64,
    /// 渲染时是否裁剪为圆形。
    pub circular: bool,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        Self {
            diameter: 150.0,
            zoom_level: 12.0,
            offset_x: 30.0,
            offset_y: 10.0,
            circular: true,
        }
    }
}

/// 放大镜背景图的尺寸与偏移（CSS 像素）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnifierViewport {
    /// 单个栅格像素在放大镜中的边长。
    pub pixel_size: f64,
    pub background_width: f64,
    pub background_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl MagnifierViewport {
    /// `background-size` 取值，如 `"300px 150px"`。
    pub fn css_background_size(&self) -> String {
        format!("{}px {}px", self.background_width, self.background_height)
    }

    /// `background-position` 取值。
    pub fn css_background_position(&self) -> String {
        format!("{}px {}px", self.offset_x, self.offset_y)
    }
}

/// 浮层左上角位置（相对图片显示区域）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPosition {
    pub left: f64,
    pub top: f64,
}

/// 计算放大镜背景的尺寸与偏移，纯坐标变换。
///
/// `zoom_level` 非正或非有限值时按 1 处理。
pub fn compute_magnifier_viewport(
    coord: PointerSample,
    image: ImageSize,
    diameter: f64,
    zoom_level: f64,
) -> MagnifierViewport {
    let zoom = if zoom_level.is_finite() && zoom_level > 0.0 {
        zoom_level
    } else {
        1.0
    };
    let pixel = diameter / zoom;
    let center = diameter / 2.0 - pixel / 2.0;

    MagnifierViewport {
        pixel_size: pixel,
        background_width: f64::from(image.width) * pixel,
        background_height: f64::from(image.height) * pixel,
        offset_x: -(coord.x as f64 * pixel) + center,
        offset_y: -(coord.y as f64 * pixel) + center,
    }
}

/// 浮层放在指针右上方。
pub fn overlay_position(local: (f64, f64), config: &MagnifierConfig) -> OverlayPosition {
    OverlayPosition {
        left: local.0 + config.offset_x,
        top: local.1 - config.diameter - config.offset_y,
    }
}
