// crates/ae_sectional/src/error.rs

//! 分段模型错误类型
//!
//! 在基础层 [`AeError`] 与配置层 [`ConfigError`] 之上扩展分段模型特有的错误。
//! 所有错误均在模型构建阶段产生；逐步数值计算只在场尺寸与网格不匹配时返回错误。

use ae_config::ConfigError;
use ae_foundation::AeError;
use thiserror::Error;

/// 分段模型结果类型
pub type SectionalResult<T> = Result<T, SectionalError>;

/// 分段模型错误
#[derive(Debug, Error)]
pub enum SectionalError {
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 基础层错误（尺寸不匹配、索引越界等）
    #[error(transparent)]
    Foundation(#[from] AeError),

    /// 未注册的模型名称
    #[error("未知的{kind}类型 '{name}' (可用: {available:?})")]
    UnknownModel {
        /// 模型类别（distribution / inertial model）
        kind: &'static str,
        /// 请求的名称
        name: String,
        /// 已注册的名称
        available: Vec<String>,
    },

    /// 分段网格无效
    #[error("无效的分段网格: {reason}")]
    InvalidSections {
        /// 原因
        reason: String,
    },
}

impl SectionalError {
    /// 场尺寸不匹配
    pub fn size_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Foundation(AeError::size_mismatch(name, expected, actual))
    }

    /// 分段网格无效
    pub fn invalid_sections(reason: impl Into<String>) -> Self {
        Self::InvalidSections {
            reason: reason.into(),
        }
    }

    /// 是否为构建阶段的致命配置错误
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::UnknownModel { .. } | Self::InvalidSections { .. }
        )
    }
}
