//! # 颜色放大镜：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │             宿主 (控制台 / 嵌入式界面)                    │
//! │                                                          │
//! │  console ── Command::parse ── dispatch ── JSON 输出      │
//! └───────┼──────────────────────────────────────────────────┘
//!         ↕ Result<T, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕            app::AppState                         │
//! │                                                          │
//! │  ┌─ ColorSelect ── selector: 通道 / 取色器 / 十六进制框   │
//! │  └─ ImageInspect ─ inspect: 指针取色 / 放大镜 / 点击复制  │
//! │                                                          │
//! │  color ────────── RGB ↔ Hex、clamp                       │
//! │  sampler ──────── 坐标映射、像素采样、放大镜视口与渲染    │
//! │  image_loader ─── 文件 / Data URL / 字节 → ImageRaster    │
//! │  clipboard ────── 系统剪贴板 + 一次回退写入               │
//! │  settings ─────── JSON 设置文件                          │
//! │  error ────────── AppError (统一错误类型)                 │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`color`] | 颜色模型：通道钳制、RGB 与十六进制互转 |
//! | [`sampler`] | 显示坐标到图片坐标的映射、像素读取、放大镜 |
//! | [`image_loader`] | 图片加载、尺寸与内存限制、解码 |
//! | [`clipboard`] | 文本写入剪贴板，失败时回退一次 |
//! | [`app`] | 应用状态与两种模式的事件处理 |
//! | [`console`] | 逐行命令解析与分发 |
//! | [`settings`] | 设置文件读写与校验 |
//! | [`error`] | 统一错误类型 `AppError` |

pub mod app;
pub mod clipboard;
pub mod color;
pub mod console;
pub mod error;
pub mod image_loader;
pub mod sampler;
pub mod settings;
