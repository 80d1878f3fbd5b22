//! # 颜色选择器输入
//!
//! 每次输入都会整体替换当前颜色，再生成一份 `SelectorView`。
//! 触发更新的那个输入框不会被回写，避免打断用户正在输入的内容：
//!
//! | 来源 | 十六进制框 | 取色器 |
//! |------|-----------|--------|
//! | 滑块 / 数值框 | 回写 | 回写 |
//! | 取色器 | 回写 | 保留 |
//! | 十六进制框 | 保留 | 回写 |
//! | 像素采样 | 回写 | 回写 |
//!
//! 处于 `ImageInspect` 模式时，选择器输入全部忽略（返回 `None`）。

use serde::Serialize;

use super::AppState;
use crate::color::{clamp_channel, hex_to_rgb, is_complete_hex, Channel, ChannelInput, Color};
use crate::error::AppError;

/// 触发更新的输入来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Channels,
    Picker,
    HexField,
    Sampler,
}

/// 选择器面板的展示快照。
///
/// `hex_field` / `picker_field` 为 `None` 时表示该输入框保持原样。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorView {
    pub color: Color,
    pub hex: String,
    pub rgb_text: String,
    pub css_rgb: String,
    pub hex_field: Option<String>,
    pub picker_field: Option<String>,
}

impl SelectorView {
    pub fn new(color: Color, source: InputSource) -> Self {
        let hex = color.to_hex();
        Self {
            color,
            rgb_text: color.rgb_text(),
            css_rgb: color.css_rgb(),
            hex_field: (source != InputSource::HexField).then(|| hex.clone()),
            picker_field: (source != InputSource::Picker).then(|| hex.clone()),
            hex,
        }
    }
}

impl AppState {
    /// 当前颜色的完整快照（所有输入框都回写）。
    pub fn selector_view(&self) -> SelectorView {
        SelectorView::new(self.color, InputSource::Channels)
    }

    /// 滑块或数值框同时提交三个通道。
    pub fn set_channels(
        &mut self,
        r: impl ChannelInput,
        g: impl ChannelInput,
        b: impl ChannelInput,
    ) -> Option<SelectorView> {
        if self.is_inspecting() {
            return None;
        }
        let color = Color::from_channels(r, g, b);
        Some(self.apply_color(color, InputSource::Channels))
    }

    /// 单个通道的输入；空文本视为 0。
    pub fn set_channel(&mut self, channel: Channel, raw: &str) -> Option<SelectorView> {
        if self.is_inspecting() {
            return None;
        }
        let value = if raw.trim().is_empty() { 0 } else { clamp_channel(raw) };
        let color = self.color.with_channel(channel, value);
        Some(self.apply_color(color, InputSource::Channels))
    }

    /// 十六进制框逐字输入：只有完整的 `#RRGGBB` 才会生效，其余忽略。
    pub fn hex_input(&mut self, raw: &str) -> Option<SelectorView> {
        if self.is_inspecting() || !is_complete_hex(raw) {
            return None;
        }
        let color = hex_to_rgb(raw).ok()?;
        Some(self.apply_color(color, InputSource::HexField))
    }

    /// 十六进制框按下回车：不做预过滤，格式错误时返回错误并保持原颜色。
    pub fn hex_submit(&mut self, raw: &str) -> Result<Option<SelectorView>, AppError> {
        if self.is_inspecting() {
            return Ok(None);
        }
        let color = hex_to_rgb(raw)?;
        Ok(Some(self.apply_color(color, InputSource::HexField)))
    }

    /// 原生取色器输入。
    pub fn picker_input(&mut self, raw: &str) -> Result<Option<SelectorView>, AppError> {
        if self.is_inspecting() {
            return Ok(None);
        }
        let color = hex_to_rgb(raw)?;
        Ok(Some(self.apply_color(color, InputSource::Picker)))
    }

    pub(super) fn apply_color(&mut self, color: Color, source: InputSource) -> SelectorView {
        log::debug!("颜色更新 {:?}: {} → {}", source, self.color, color);
        self.color = color;
        SelectorView::new(color, source)
    }
}
