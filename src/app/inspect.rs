//! # 图片取色与放大镜
//!
//! 加载成功后进入 `ImageInspect`，之后：
//! - 指针移动：取色、计算放大镜视口、显示放大镜，并把颜色同步回选择器
//! - 指针离开：隐藏放大镜
//! - 点击：复制该像素的十六进制值
//!
//! `ColorSelect` 模式下指针事件全部忽略。

use image::RgbaImage;
use serde::Serialize;

use super::{AppMode, AppState, ImageSession, InputSource, SelectorView};
use crate::clipboard::CopyAck;
use crate::error::AppError;
use crate::image_loader::{encode_png_data_url, ImageSource};
use crate::sampler::{
    compute_magnifier_viewport, map_display_to_image_coord, overlay_position, read_pixel,
    render_magnifier, DisplayRect, MagnifierViewport, OverlayPosition, PixelReading,
    PointerSample,
};

/// 加载结果摘要。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub mode: &'static str,
}

/// 指针移动后的展示快照。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectView {
    pub reading: PixelReading,
    pub viewport: MagnifierViewport,
    pub background_size: String,
    pub background_position: String,
    pub overlay: OverlayPosition,
    pub magnifier_visible: bool,
    pub selector: SelectorView,
}

impl AppState {
    /// 加载图片并切换到 `ImageInspect`。
    ///
    /// 失败时保持当前模式不变。
    pub fn load_image(&mut self, source: ImageSource) -> Result<ImageSummary, AppError> {
        let raster = self.loader.load(source)?;
        let summary = ImageSummary {
            width: raster.width(),
            height: raster.height(),
            mode: "image_inspect",
        };

        if self.is_inspecting() {
            log::info!("替换已加载图片 - 新尺寸 {}x{}", summary.width, summary.height);
        } else {
            log::info!("进入图片取色模式 - 尺寸 {}x{}", summary.width, summary.height);
        }
        self.mode = AppMode::ImageInspect(ImageSession::new(raster));

        Ok(summary)
    }

    /// 指针在图片区域内移动。
    pub fn pointer_move(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        rect: &DisplayRect,
    ) -> Option<InspectView> {
        let magnifier = self.settings.magnifier.clone();
        let session = self.session_mut()?;
        let raster = session.raster();
        let size = raster.size();

        let coord = map_display_to_image_coord(pointer_x, pointer_y, rect, size);
        let reading = read_pixel(coord, raster);
        let viewport =
            compute_magnifier_viewport(coord, size, magnifier.diameter, magnifier.zoom_level);
        let overlay = overlay_position(rect.local(pointer_x, pointer_y), &magnifier);
        session.magnifier_visible = true;

        log::debug!("取色 ({}, {}) → {}", coord.x, coord.y, reading.hex);

        let selector = self.apply_color(reading.color, InputSource::Sampler);

        Some(InspectView {
            background_size: viewport.css_background_size(),
            background_position: viewport.css_background_position(),
            reading,
            viewport,
            overlay,
            magnifier_visible: true,
            selector,
        })
    }

    /// 指针离开图片区域；返回放大镜是否由可见变为隐藏。
    pub fn pointer_leave(&mut self) -> bool {
        match self.session_mut() {
            Some(session) => std::mem::replace(&mut session.magnifier_visible, false),
            None => false,
        }
    }

    /// 点击图片：复制该像素的十六进制值。
    pub fn pointer_click(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        rect: &DisplayRect,
    ) -> Option<CopyAck> {
        let raster = self.raster()?;
        let coord = map_display_to_image_coord(pointer_x, pointer_y, rect, raster.size());
        let reading = read_pixel(coord, raster);
        Some(self.clipboard.copy_text(&reading.hex))
    }

    /// 以栅格坐标为中心渲染放大镜图像。
    pub fn render_magnifier_at(&self, coord: PointerSample) -> Result<RgbaImage, AppError> {
        let raster = self
            .raster()
            .ok_or_else(|| AppError::Mode("尚未加载图片，无法渲染放大镜".to_string()))?;
        Ok(render_magnifier(raster, coord, &self.settings.magnifier)?)
    }

    /// 放大镜背景图（PNG Data URL），每个会话只编码一次。
    pub fn magnifier_background(&mut self) -> Result<String, AppError> {
        let session = self
            .session_mut()
            .ok_or_else(|| AppError::Mode("尚未加载图片，没有放大镜背景".to_string()))?;

        if let Some(url) = &session.background_url {
            return Ok(url.clone());
        }

        let url = encode_png_data_url(&session.raster)?;
        session.background_url = Some(url.clone());
        Ok(url)
    }
}
