//! # 加载配置
//!
//! 将读取与解码阶段的资源上限集中到 `LoaderConfig`，
//! 所有上限都在完整解码之前检查，尽早拒绝异常输入。

use serde::{Deserialize, Serialize};

use super::ImageError;

/// 图片加载配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
        }
    }
}

impl LoaderConfig {
    /// 上限均需为正数。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.max_file_size == 0 || self.max_decoded_pixels == 0 || self.max_decoded_bytes == 0 {
            return Err(ImageError::ResourceLimit(format!(
                "加载上限必须大于 0：{:?}",
                self
            )));
        }
        Ok(())
    }
}
