// crates/ae_foundation/src/lib.rs

//! AeroSect Foundation Layer
//!
//! 基础层，为分段气溶胶模型提供公共抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 安全除法、钳位与相对比较
//! - [`tolerance`]: 数值容差配置
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **无全局状态**: 容差通过参数注入
//!
//! # 示例
//!
//! ```
//! use ae_foundation::{AeError, AeResult};
//! use ae_foundation::float::safe_div;
//!
//! fn ratio(a: f64, b: f64) -> AeResult<f64> {
//!     if !a.is_finite() {
//!         return Err(AeError::invalid_input("分子非有限值"));
//!     }
//!     Ok(safe_div(a, b, 0.0))
//! }
//!
//! assert_eq!(ratio(1.0, 0.0).unwrap(), 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;
pub mod tolerance;

/// 层级标识
pub const LAYER: u8 = 1;

// 重导出常用类型
pub use error::{AeError, AeResult};
pub use tolerance::Tolerance;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{AeError, AeResult};
    pub use crate::float::{clamp_or_lower, relative_eq, safe_div};
    pub use crate::tolerance::Tolerance;
    pub use crate::ensure;
}
