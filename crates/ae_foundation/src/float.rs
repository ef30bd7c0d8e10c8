// crates/ae_foundation/src/float.rs

//! 浮点辅助函数
//!
//! 安全除法、区间钳位和相对比较。

/// 安全除法阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-300;

/// 安全除法（直接操作 f64）
///
/// 分母接近零或结果非有限时返回 `fallback`。
#[inline]
pub fn safe_div(a: f64, b: f64, fallback: f64) -> f64 {
    if b.abs() < SAFE_DIV_EPSILON {
        fallback
    } else {
        let result = a / b;
        if result.is_finite() {
            result
        } else {
            fallback
        }
    }
}

/// 相对比较：|a - b| <= rel * max(|a|, |b|)，两者都为零时相等
#[inline]
pub fn relative_eq(a: f64, b: f64, rel: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel * scale
}

/// 将值限制到闭区间，NaN 映射到下界
#[inline]
pub fn clamp_or_lower(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        lo
    } else {
        x.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div() {
        assert_eq!(safe_div(1.0, 2.0, 0.0), 0.5);
        assert_eq!(safe_div(1.0, 0.0, -1.0), -1.0);
        assert_eq!(safe_div(f64::MAX, 1e-300, 7.0), 7.0);
    }

    #[test]
    fn test_relative_eq() {
        assert!(relative_eq(1e-24, 1.000_000_000_01e-24, 1e-10));
        assert!(!relative_eq(1.0, 1.1, 1e-10));
        assert!(relative_eq(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_clamp_or_lower() {
        assert_eq!(clamp_or_lower(f64::NAN, 0.0, 4.0), 0.0);
        assert_eq!(clamp_or_lower(9.0, 0.0, 4.0), 4.0);
        assert_eq!(clamp_or_lower(-9.0, 0.0, 4.0), 0.0);
    }
}
