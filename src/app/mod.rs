//! # 应用状态（app）
//!
//! ## 设计思路
//!
//! 所有界面事件都是 `AppState` 上的方法，状态显式传递，不使用全局变量。
//! 生命周期：宿主初始化时创建，加载图片时修改，宿主退出时释放。
//!
//! 取色器与像素放大镜同一时间只有一个处于活动状态，由 `AppMode` 决定：
//!
//! ```text
//! ColorSelect ──(图片解码成功)──▶ ImageInspect(ImageSession)
//!                                   │
//!                                   └──(再次加载成功)──▶ ImageInspect(新 session)
//! ```
//!
//! - `ColorSelect`：滑块 / 数值框 / 取色器 / 十六进制框生效，指针事件忽略
//! - `ImageInspect`：指针事件生效，选择器输入忽略；指针移动时把取到的颜色同步回选择器
//!
//! 当前颜色总是整体替换，最后一次输入生效。
//!
//! - `selector`：选择器输入处理与 `SelectorView`
//! - `inspect`：图片加载、指针处理与 `InspectView`

mod inspect;
mod selector;

pub use inspect::{ImageSummary, InspectView};
pub use selector::{InputSource, SelectorView};

use crate::clipboard::{ClipboardWriter, CopyAck};
use crate::color::Color;
use crate::error::AppError;
use crate::image_loader::ImageLoader;
use crate::sampler::ImageRaster;
use crate::settings::Settings;

/// 已加载图片的会话状态。
#[derive(Debug)]
pub struct ImageSession {
    raster: ImageRaster,
    /// 放大镜背景 Data URL，首次请求时生成。
    background_url: Option<String>,
    magnifier_visible: bool,
}

impl ImageSession {
    fn new(raster: ImageRaster) -> Self {
        Self {
            raster,
            background_url: None,
            magnifier_visible: false,
        }
    }

    pub fn raster(&self) -> &ImageRaster {
        &self.raster
    }

    pub fn magnifier_visible(&self) -> bool {
        self.magnifier_visible
    }
}

/// 当前活动的子系统。
#[derive(Debug)]
pub enum AppMode {
    ColorSelect,
    ImageInspect(ImageSession),
}

impl AppMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorSelect => "color_select",
            Self::ImageInspect(_) => "image_inspect",
        }
    }
}

/// 应用状态。
pub struct AppState {
    mode: AppMode,
    color: Color,
    settings: Settings,
    loader: ImageLoader,
    clipboard: ClipboardWriter,
}

impl AppState {
    /// 使用系统剪贴板创建状态。
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let clipboard = ClipboardWriter::new(settings.clipboard.clone());
        Self::with_clipboard(settings, clipboard)
    }

    /// 注入自定义剪贴板写入器（测试或嵌入式宿主）。
    pub fn with_clipboard(settings: Settings, clipboard: ClipboardWriter) -> Result<Self, AppError> {
        settings.validate()?;
        let color = settings.initial_color()?;
        let loader = ImageLoader::new(settings.loader.clone());

        log::info!("应用状态已创建 - 初始颜色 {}", color);

        Ok(Self {
            mode: AppMode::ColorSelect,
            color,
            settings,
            loader,
            clipboard,
        })
    }

    pub fn mode(&self) -> &AppMode {
        &self.mode
    }

    pub fn is_inspecting(&self) -> bool {
        matches!(self.mode, AppMode::ImageInspect(_))
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn raster(&self) -> Option<&ImageRaster> {
        match &self.mode {
            AppMode::ImageInspect(session) => Some(session.raster()),
            AppMode::ColorSelect => None,
        }
    }

    /// 复制按钮：复制当前颜色的十六进制文本，两种模式下都可用。
    ///
    /// 复制的是已生效颜色的规范化 `#RRGGBB`，而不是十六进制框里的原始文本；
    /// 框内尚未输入完整的半成品不会被复制。
    pub fn copy_current_hex(&mut self) -> CopyAck {
        let hex = self.color.to_hex();
        self.clipboard.copy_text(&hex)
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut ImageSession> {
        match &mut self.mode {
            AppMode::ImageInspect(session) => Some(session),
            AppMode::ColorSelect => None,
        }
    }
}
