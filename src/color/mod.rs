//! # 颜色模型（color）
//!
//! ## 设计思路
//!
//! `Color` 是整个应用唯一的颜色表示，数值三元组与 `#RRGGBB` 文本都由它派生，
//! 因此同时展示时两者永远一致。
//!
//! - `convert`：纯函数换算（clamp / to_hex / rgb_to_hex / hex_to_rgb）
//! - `error`：十六进制解析错误

mod convert;
mod error;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use convert::{
    clamp, clamp_channel, hex_to_rgb, is_complete_hex, rgb_to_hex, to_hex, ChannelInput,
    CHANNEL_MAX, CHANNEL_MIN,
};
pub use error::ColorError;

/// RGB 颜色，每个通道 `[0, 255]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// 颜色通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 接受 `r`/`g`/`b` 或完整英文名（大小写不敏感）。
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "r" | "red" => Some(Self::Red),
            "g" | "green" => Some(Self::Green),
            "b" | "blue" => Some(Self::Blue),
            _ => None,
        }
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 从任意通道输入构建颜色，每个通道单独 clamp。
    pub fn from_channels(
        r: impl ChannelInput,
        g: impl ChannelInput,
        b: impl ChannelInput,
    ) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// 规范文本形式 `#RRGGBB`。
    pub fn to_hex(&self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    /// 面板上的 `"r, g, b"` 文本。
    pub fn rgb_text(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// CSS 形式 `rgb(r, g, b)`，用于预览色块。
    pub fn css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn with_channel(self, channel: Channel, value: u8) -> Self {
        match channel {
            Channel::Red => Self { r: value, ..self },
            Channel::Green => Self { g: value, ..self },
            Channel::Blue => Self { b: value, ..self },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}
