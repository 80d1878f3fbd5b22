//! # Data URL 编码
//!
//! 放大镜的背景图需要一个可直接引用的图片地址。
//! 这里将已加载的栅格重新编码为 PNG，再包装成 `data:image/png;base64,` 形式。

use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use std::io::Cursor;

use super::ImageError;
use crate::sampler::ImageRaster;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// 将栅格编码为 PNG Data URL。
pub fn encode_png_data_url(raster: &ImageRaster) -> Result<String, ImageError> {
    let mut cursor = Cursor::new(Vec::new());
    raster
        .as_rgba()
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;

    let bytes = cursor.into_inner();
    log::debug!("🖼️ 生成放大镜背景 Data URL - PNG {} 字节", bytes.len());

    Ok(format!(
        "{}{}",
        PNG_DATA_URL_PREFIX,
        general_purpose::STANDARD.encode(bytes)
    ))
}
