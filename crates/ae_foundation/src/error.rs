// crates/ae_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `AeError` 枚举和 `AeResult` 类型别名。分段模型特有的错误
//! （未知模型名、分段网格无效等）在 `ae_sectional` 中扩展。
//!
//! # 示例
//!
//! ```
//! use ae_foundation::error::{AeError, AeResult};
//!
//! fn check_len(v: &[f64]) -> AeResult<()> {
//!     if v.len() != 3 {
//!         return Err(AeError::size_mismatch("velocity", 3, v.len()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_len(&[1.0, 2.0]).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type AeResult<T> = Result<T, AeError>;

/// AeroSect 基础错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AeError {
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: String,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 索引越界
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl AeError {
    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }
}

/// 条件不满足时提前返回错误
///
/// ```
/// use ae_foundation::{ensure, AeError, AeResult};
///
/// fn positive(x: f64) -> AeResult<f64> {
///     ensure!(x > 0.0, AeError::out_of_range("x", x, 0.0, f64::INFINITY));
///     Ok(x)
/// }
///
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch_display() {
        let err = AeError::size_mismatch("phi", 12, 10);
        let msg = err.to_string();
        assert!(msg.contains("phi"));
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = AeError::out_of_range("d", -1.0, 0.0, 1.0);
        assert!(err.to_string().contains("d=-1"));
    }

    #[test]
    fn test_ensure_macro() {
        fn check(n: usize) -> AeResult<usize> {
            ensure!(n >= 1, AeError::invalid_input("n 必须 ≥ 1"));
            Ok(n)
        }
        assert_eq!(check(3), Ok(3));
        assert!(check(0).is_err());
    }
}
