//! # 数据源与中间模型
//!
//! - `ImageSource` 表示外部来源语义
//! - `RawImageData` 表示已加载但未解码的字节

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 本地文件路径。
    FilePath(String),
    /// Data URL（`data:image/...;base64,`）或纯 Base64 字符串。
    DataUrl(String),
    /// 已在内存中的文件字节。
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// 日志用的来源标识。
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::FilePath(_) => "file",
            Self::DataUrl(_) => "data_url",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    pub(crate) source_hint: &'static str,
}
