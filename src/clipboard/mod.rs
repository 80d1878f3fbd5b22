//! # 剪贴板模块（clipboard）
//!
//! ## 设计思路
//!
//! 复制十六进制色值时先走系统剪贴板，失败则只回退一次到传统选区机制，不做更多重试。
//! 无论走哪条路径，调用方都只拿到一份确认信息（`CopyAck`）用于短暂提示，
//! 失败细节只写日志，不会以错误形式抛给界面。
//!
//! ## 实现思路
//!
//! - 写入端抽象为 `ClipboardSink`，`ClipboardWriter` 只负责编排首选 / 回退顺序。
//! - 测试中可注入内存写入端，不依赖真实剪贴板。

mod sink;

use serde::{Deserialize, Serialize};

pub use sink::{
    ClipboardFailureKind, ClipboardSink, ClipboardWriteFailure, LegacySelectionSink,
    SystemClipboardSink,
};

/// 剪贴板配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// 首选写入失败后是否尝试传统选区。
    pub enable_fallback: bool,
    /// 确认提示的展示时长（毫秒），由宿主负责计时。
    pub ack_display_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            enable_fallback: true,
            ack_display_ms: 1500,
        }
    }
}

/// 实际生效的写入路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPath {
    Native,
    Fallback,
    /// 两条路径都失败；界面仍然给出确认提示。
    Unavailable,
}

/// 复制完成后的确认信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyAck {
    pub text: String,
    pub path: CopyPath,
    pub message: String,
    pub display_ms: u64,
}

/// 剪贴板写入编排器。
pub struct ClipboardWriter {
    primary: Box<dyn ClipboardSink>,
    fallback: Box<dyn ClipboardSink>,
    config: ClipboardConfig,
}

impl ClipboardWriter {
    /// 使用系统剪贴板与传统选区。
    pub fn new(config: ClipboardConfig) -> Self {
        Self::with_sinks(
            Box::new(SystemClipboardSink::new()),
            Box::new(LegacySelectionSink::new()),
            config,
        )
    }

    pub fn with_sinks(
        primary: Box<dyn ClipboardSink>,
        fallback: Box<dyn ClipboardSink>,
        config: ClipboardConfig,
    ) -> Self {
        Self {
            primary,
            fallback,
            config,
        }
    }

    /// 复制文本，始终返回确认信息。
    pub fn copy_text(&mut self, text: &str) -> CopyAck {
        let path = self.write_with_fallback(text);
        CopyAck {
            text: text.to_string(),
            path,
            message: format!("已复制 {}", text),
            display_ms: self.config.ack_display_ms,
        }
    }

    fn write_with_fallback(&mut self, text: &str) -> CopyPath {
        log::debug!("📋 准备复制到剪贴板 - {}", text);

        let failure = match self.primary.write_text(text) {
            Ok(()) => {
                log::info!("✅ 复制成功 ({}) - {}", self.primary.name(), text);
                return CopyPath::Native;
            }
            Err(failure) => failure,
        };

        log::warn!(
            "❌ {} 写入失败: {}（kind={:?}）",
            self.primary.name(),
            failure.message,
            failure.kind
        );

        if !self.config.enable_fallback {
            return CopyPath::Unavailable;
        }

        match self.fallback.write_text(text) {
            Ok(()) => {
                log::info!("✅ 回退复制成功 ({}) - {}", self.fallback.name(), text);
                CopyPath::Fallback
            }
            Err(fallback_failure) => {
                log::warn!(
                    "❌ 回退路径 {} 也失败: {}（kind={:?}）",
                    self.fallback.name(),
                    fallback_failure.message,
                    fallback_failure.kind
                );
                CopyPath::Unavailable
            }
        }
    }
}
