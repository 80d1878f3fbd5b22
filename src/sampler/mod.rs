//! # 像素采样模块（sampler）
//!
//! ## 设计思路
//!
//! 取色与放大镜的全部计算都是纯函数：输入当前指针位置和已加载的栅格，
//! 输出坐标、颜色与视口，不保留任何跨调用状态。
//!
//! - `raster`：不可变 RGBA 栅格
//! - `coords`：显示坐标 → 栅格坐标
//! - `sample`：单像素取色（越界为黑色）
//! - `magnifier`：放大镜背景尺寸 / 偏移 / 浮层位置
//! - `render`：原生渲染放大镜图像

mod coords;
mod magnifier;
mod raster;
mod render;
mod sample;

pub use coords::{map_display_to_image_coord, DisplayRect, ImageSize, PointerSample};
pub use magnifier::{
    compute_magnifier_viewport, overlay_position, MagnifierConfig, MagnifierViewport,
    OverlayPosition, MAX_DIAMETER, MAX_ZOOM_LEVEL,
};
pub use raster::ImageRaster;
pub use render::{render_magnifier, window_span};
pub use sample::{read_pixel, sample_pixel, PixelReading};
