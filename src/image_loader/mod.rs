//! # 图片加载模块（image_loader）
//!
//! ## 设计思路
//!
//! 将“来源识别 → 加载校验 → 解码”按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `loader`：负责文件 / Data URL / 字节的加载与签名校验
//! - `pipeline`：负责尺寸预检、像素限制与解码
//! - `data_url`：负责把栅格重新编码为放大镜背景用的 Data URL
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! AppState::load_image
//!    ↓
//! ImageLoader::load（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/签名校验）
//!    └─ pipeline.rs（尺寸预检 + 解码 → ImageRaster）
//! ```

mod config;
mod data_url;
mod error;
mod loader;
mod pipeline;
mod source;

use std::time::Instant;

pub use config::LoaderConfig;
pub use data_url::encode_png_data_url;
pub use error::ImageError;
pub use source::ImageSource;

use crate::sampler::ImageRaster;

/// 图片加载器。
///
/// 持有一份加载配置，每次调用都基于同一配置完成整条链路。
#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    config: LoaderConfig,
}

impl ImageLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// 加载并解码图片。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use color_loupe::image_loader::{ImageLoader, ImageSource, LoaderConfig};
    ///
    /// let loader = ImageLoader::new(LoaderConfig::default());
    /// let raster = loader.load(ImageSource::FilePath("photo.png".to_string()))?;
    /// println!("{}x{}", raster.width(), raster.height());
    /// # Ok::<(), color_loupe::image_loader::ImageError>(())
    /// ```
    pub fn load(&self, source: ImageSource) -> Result<ImageRaster, ImageError> {
        let config = &self.config;
        let hint = source.hint();
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = match source {
            ImageSource::FilePath(path) => self.load_from_file(&path, config)?,
            ImageSource::DataUrl(data) => self.load_from_data_url(&data, config)?,
            ImageSource::Bytes(bytes) => self.load_from_bytes(bytes, config)?,
        };
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let raster = self.decode_to_raster(raw, config)?;
        let decode_elapsed = decode_start.elapsed();

        log::info!(
            "✅ 图片加载完成 - 来源: {} load={}ms decode={}ms total={}ms",
            hint,
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(raster)
    }
}
