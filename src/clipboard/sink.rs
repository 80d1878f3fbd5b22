//! # 剪贴板写入端
//!
//! ## 设计思路
//!
//! 与操作系统剪贴板交互的逻辑独立成 `ClipboardSink`，便于隔离平台不稳定因素，
//! 测试时也可以替换为内存实现。
//!
//! - `SystemClipboardSink`：`arboard` 系统剪贴板（首选路径）
//! - `LegacySelectionSink`：回退路径。Linux 下写入 PRIMARY 选区
//!   （中键粘贴的传统选区机制）；其他平台使用一个全新的剪贴板句柄再写一次

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFailureKind {
    Busy,
    Transient,
    Fatal,
}

/// 单次写入失败的分类与描述。
#[derive(Debug, Clone)]
pub struct ClipboardWriteFailure {
    pub kind: ClipboardFailureKind,
    pub message: String,
}

impl ClipboardWriteFailure {
    pub fn busy(message: impl Into<String>) -> Self {
        Self {
            kind: ClipboardFailureKind::Busy,
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            kind: ClipboardFailureKind::Transient,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            kind: ClipboardFailureKind::Fatal,
            message: message.into(),
        }
    }

    fn from_arboard(operation: &str, error: arboard::Error) -> Self {
        let message = format!("{}失败：{}", operation, error);
        match error {
            arboard::Error::ClipboardOccupied => Self::busy(message),
            arboard::Error::ClipboardNotSupported => Self::fatal(message),
            _ => Self::transient(message),
        }
    }
}

/// 文本写入端。
pub trait ClipboardSink {
    /// 日志用名称。
    fn name(&self) -> &'static str;

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure>;
}

/// 系统剪贴板。
///
/// 句柄懒创建并在写入成功后保留：部分平台上剪贴板内容归属于句柄，
/// 过早释放会导致内容丢失。写入失败时丢弃句柄，下次重新创建。
#[derive(Default)]
pub struct SystemClipboardSink {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardWriteFailure> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardWriteFailure::from_arboard("打开剪贴板", e))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ClipboardWriteFailure::fatal("剪贴板句柄不可用"))
    }
}

impl ClipboardSink for SystemClipboardSink {
    fn name(&self) -> &'static str {
        "system"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        let result = self
            .handle()?
            .set_text(text.to_owned())
            .map_err(|e| ClipboardWriteFailure::from_arboard("写入剪贴板", e));

        if result.is_err() {
            self.clipboard = None;
        }
        result
    }
}

/// 传统选区回退。
#[derive(Default)]
pub struct LegacySelectionSink {
    clipboard: Option<arboard::Clipboard>,
}

impl LegacySelectionSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for LegacySelectionSink {
    fn name(&self) -> &'static str {
        "legacy-selection"
    }

    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        use arboard::{LinuxClipboardKind, SetExtLinux};

        // 每次都用新句柄，避免复用首选路径已失效的连接
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardWriteFailure::from_arboard("打开选区", e))?;
        clipboard
            .set()
            .clipboard(LinuxClipboardKind::Primary)
            .text(text.to_owned())
            .map_err(|e| ClipboardWriteFailure::from_arboard("写入 PRIMARY 选区", e))?;
        self.clipboard = Some(clipboard);
        Ok(())
    }

    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClipboardWriteFailure::from_arboard("打开剪贴板", e))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardWriteFailure::from_arboard("写入剪贴板", e))?;
        self.clipboard = Some(clipboard);
        Ok(())
    }
}
