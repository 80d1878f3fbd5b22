//! 显示坐标 → 图片像素坐标。
//!
//! 图片在界面上可能被缩放显示，指针位置需要按 `原始尺寸 / 显示尺寸`
//! 换算回栅格坐标，再向下取整。

use serde::{Deserialize, Serialize};

/// 图片在界面上的显示矩形（CSS 像素）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// 原点在 `(0, 0)` 的矩形。
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
            || !(self.left.is_finite() && self.top.is_finite())
    }

    /// 指针相对矩形左上角的位置。
    pub fn local(&self, pointer_x: f64, pointer_y: f64) -> (f64, f64) {
        (pointer_x - self.left, pointer_y - self.top)
    }
}

/// 栅格原始尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 指针对应的栅格坐标，可能越界。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: i64,
    pub y: i64,
}

impl PointerSample {
    /// 无法换算时使用的越界坐标，采样结果为黑色。
    pub const OFF_IMAGE: PointerSample = PointerSample { x: -1, y: -1 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn is_within(&self, size: ImageSize) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < i64::from(size.width) && self.y < i64::from(size.height)
    }
}

/// 将显示坐标换算为栅格坐标。
///
/// `x = floor((pointer_x - rect.left) * image.width / rect.width)`，`y` 同理。
/// 显示矩形退化（宽高非正或非有限值）或指针坐标非有限值时返回
/// [`PointerSample::OFF_IMAGE`]。
pub fn map_display_to_image_coord(
    pointer_x: f64,
    pointer_y: f64,
    rect: &DisplayRect,
    image: ImageSize,
) -> PointerSample {
    if rect.is_degenerate() || !pointer_x.is_finite() || !pointer_y.is_finite() {
        log::debug!("显示矩形或指针坐标无效，视为越界：{:?} ({}, {})", rect, pointer_x, pointer_y);
        return PointerSample::OFF_IMAGE;
    }

    let scale_x = f64::from(image.width) / rect.width;
    let scale_y = f64::from(image.height) / rect.height;
    let (local_x, local_y) = rect.local(pointer_x, pointer_y);

    PointerSample::new(
        (local_x * scale_x).floor() as i64,
        (local_y * scale_y).floor() as i64,
    )
}
