//! 已解码的 RGBA 栅格。

use image::RgbaImage;

use super::ImageSize;
use crate::image_loader::ImageError;

/// 不可变的 RGBA 位图，宽高至少为 1。
///
/// 加载完成后整个会话内只读，不提供任何可变访问。
#[derive(Debug, Clone)]
pub struct ImageRaster {
    pixels: RgbaImage,
}

impl ImageRaster {
    pub fn new(pixels: RgbaImage) -> Result<Self, ImageError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(ImageError::Decode(format!(
                "图片尺寸无效：{}x{}",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { pixels })
    }

    /// 由 `width * height * 4` 的 RGBA 字节构建。
    pub fn from_rgba(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, ImageError> {
        let len = bytes.len();
        let pixels = RgbaImage::from_raw(width, height, bytes).ok_or_else(|| {
            ImageError::Decode(format!(
                "像素数据长度异常：{} 字节无法组成 {}x{} RGBA",
                len, width, height
            ))
        })?;
        Self::new(pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width(), self.height())
    }

    /// `0 <= x < width && 0 <= y < height`
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }

    /// 调用方需保证坐标在范围内。
    pub fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_raster() {
        assert!(ImageRaster::new(RgbaImage::new(0, 5)).is_err());
        assert!(ImageRaster::from_rgba(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(ImageRaster::from_rgba(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn bounds_check() {
        let raster = ImageRaster::from_rgba(2, 3, vec![0; 24]).expect("valid raster");
        assert!(raster.contains(0, 0));
        assert!(raster.contains(1, 2));
        assert!(!raster.contains(2, 0));
        assert!(!raster.contains(0, 3));
        assert!(!raster.contains(-1, 0));
    }
}
