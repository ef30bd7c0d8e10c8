// crates/ae_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 不使用全局静态变量，由调用方显式传入。

use serde::{Deserialize, Serialize};

use crate::float::relative_eq;

/// 数值容差
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// 权重求和容差（插值权重之和与 1 的偏差）
    pub weight_sum: f64,
    /// 矩守恒相对容差
    pub moment_rel: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            weight_sum: 1e-12,
            moment_rel: 1e-10,
        }
    }
}

impl Tolerance {
    /// 权重和是否为 1
    #[inline]
    pub fn is_unit_sum(&self, sum: f64) -> bool {
        (sum - 1.0).abs() <= self.weight_sum
    }

    /// 两个矩是否在相对容差内相等
    #[inline]
    pub fn moments_match(&self, a: f64, b: f64) -> bool {
        relative_eq(a, b, self.moment_rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sum() {
        let tol = Tolerance::default();
        assert!(tol.is_unit_sum(0.3 + 0.7));
        assert!(!tol.is_unit_sum(0.9));
    }

    #[test]
    fn test_moments_match() {
        let tol = Tolerance::default();
        assert!(tol.moments_match(1e-21, 1e-21 * (1.0 + 1e-12)));
        assert!(!tol.moments_match(1e-21, 1.1e-21));
    }

    #[test]
    fn test_serde_roundtrip() {
        let tol = Tolerance::default();
        let json = serde_json::to_string(&tol).unwrap();
        let back: Tolerance = serde_json::from_str(&json).unwrap();
        assert_eq!(tol, back);
    }
}
