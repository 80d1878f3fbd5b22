//! 应用设置
//!
//! 设置以 JSON 文件保存，每个分区都带 `#[serde(default)]`，
//! 文件缺失或字段缺省时使用默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clipboard::ClipboardConfig;
use crate::color::{hex_to_rgb, Color};
use crate::error::AppError;
use crate::image_loader::LoaderConfig;
use crate::sampler::{MagnifierConfig, MAX_DIAMETER, MAX_ZOOM_LEVEL};

/// 指定设置文件路径的环境变量。
pub const SETTINGS_ENV: &str = "COLOR_LOUPE_SETTINGS";
/// 未指定时的默认设置文件。
pub const DEFAULT_SETTINGS_FILE: &str = "color-loupe.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub magnifier: MagnifierConfig,
    pub loader: LoaderConfig,
    pub clipboard: ClipboardConfig,
    /// 启动时选择器显示的颜色。
    pub initial_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            magnifier: MagnifierConfig::default(),
            loader: LoaderConfig::default(),
            clipboard: ClipboardConfig::default(),
            initial_color: "#000000".to_string(),
        }
    }
}

/// 从环境变量读取设置文件路径。
pub fn settings_path_from_env() -> PathBuf {
    std::env::var_os(SETTINGS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

impl Settings {
    /// 读取设置文件；文件不存在时返回默认设置。
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("设置文件不存在，使用默认设置: {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings = serde_json::from_str::<Settings>(&content)
            .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;
        settings.validate()?;

        log::info!("已加载设置: {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        self.validate()?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let magnifier = &self.magnifier;
        if !(magnifier.diameter.is_finite()
            && (1.0..=MAX_DIAMETER).contains(&magnifier.diameter))
        {
            return Err(AppError::Settings(format!(
                "放大镜直径必须在 1..={} 之间: {}",
                MAX_DIAMETER, magnifier.diameter
            )));
        }
        if !(magnifier.zoom_level.is_finite()
            && (1.0..=MAX_ZOOM_LEVEL).contains(&magnifier.zoom_level))
        {
            return Err(AppError::Settings(format!(
                "放大倍数必须在 1..={} 之间: {}",
                MAX_ZOOM_LEVEL, magnifier.zoom_level
            )));
        }
        if !(magnifier.offset_x.is_finite() && magnifier.offset_y.is_finite()) {
            return Err(AppError::Settings("放大镜偏移必须为有限值".to_string()));
        }

        self.loader
            .validate()
            .map_err(|e| AppError::Settings(e.to_string()))?;

        self.initial_color()?;
        Ok(())
    }

    /// 解析 `initial_color`。
    pub fn initial_color(&self) -> Result<Color, AppError> {
        hex_to_rgb(&self.initial_color)
            .map_err(|e| AppError::Settings(format!("initial_color 无效: {}", e)))
    }
}
