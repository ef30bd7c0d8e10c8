// crates/ae_config/src/lib.rs

//! AeroSect Config Layer (Layer 2)
//!
//! 配置层，提供分段气溶胶模型的全部配置参数。
//! 本层完全无泛型，所有数值使用 f64 存储。
//!
//! # 模块概览
//!
//! - [`aerosol_config`]: AerosolConfig 气溶胶模型配置
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 3: ae_sectional  ─> uses AerosolConfig
//! Layer 2: ae_config     ─> AerosolConfig (本层)
//! Layer 1: ae_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aerosol_config;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use aerosol_config::{normalize_model_name, AerosolConfig, DriftConfig, FluxConfig, SectionalConfig};
pub use error::ConfigError;
