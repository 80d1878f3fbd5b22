//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，所有对宿主暴露的操作统一返回
//! `Result<T, AppError>`，宿主通过 `Serialize` 获得可读的错误信息。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ColorError` / `ImageError` / `io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串。

use serde::Serialize;

use crate::color::ColorError;
use crate::image_loader::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 颜色文本格式错误
    #[error("{0}")]
    Color(#[from] ColorError),

    /// 图片加载 / 解码 / 渲染错误
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写或校验失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 当前模式下不允许的操作
    #[error("模式错误: {0}")]
    Mode(String),

    /// 控制台命令解析失败
    #[error("命令错误: {0}")]
    Command(String),
}

impl AppError {
    /// 稳定的错误码，供宿主分支处理。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Image(err) => err.code(),
            Self::Io(_) => "io",
            Self::Settings(_) => "settings",
            Self::Mode(_) => "mode",
            Self::Command(_) => "command",
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
