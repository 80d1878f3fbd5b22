//! 颜色解析错误。

/// 颜色换算错误类型。
///
/// 数值输入永远不会失败（会被收敛到 `[0, 255]`），
/// 只有十六进制文本可能因格式非法而被拒绝。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("颜色格式错误：{0}")]
    InvalidFormat(String),
}
