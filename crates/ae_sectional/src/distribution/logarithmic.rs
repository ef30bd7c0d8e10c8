// crates/ae_sectional/src/distribution/logarithmic.rs

//! 对数（等比）分段分布
//!
//! 边界 b_i = min · (max/min)^(i/N)，i = 0..N，相邻边界比值恒定；
//! 代表尺寸取区间几何平均 √(b_i · b_{i+1})。
//!
//! 查找直接由边界公式反解：
//!
//! ```text
//! i = floor( N · ln(s/min) / ln(max/min) )
//! ```
//!
//! 舍入误差最多造成一位偏差，再与存储的边界比较修正，仍为 O(1)。

use super::{check_parameters, floor_index, SectionGrid, SectionalDistribution};
use crate::error::SectionalResult;

/// 对数分段分布
#[derive(Debug, Clone)]
pub struct LogarithmicDistribution {
    grid: SectionGrid,
    min: f64,
    /// ln(max/min)
    log_ratio: f64,
}

impl LogarithmicDistribution {
    /// 注册名称
    pub const NAME: &'static str = "logarithmic";

    /// 创建对数分布
    ///
    /// # 参数
    /// - `n`: 分段数（≥ 1）
    /// - `min`, `max`: 尺寸范围，要求 0 < min < max
    pub fn new(n: usize, min: f64, max: f64) -> SectionalResult<Self> {
        check_parameters(n, min, max)?;

        let ratio = max / min;
        let mut boundaries: Vec<f64> = (0..=n)
            .map(|i| min * ratio.powf(i as f64 / n as f64))
            .collect();
        // 端点精确等于配置值
        boundaries[0] = min;
        boundaries[n] = max;

        let grid = SectionGrid::from_boundaries(boundaries, |lo, hi| (lo * hi).sqrt())?;

        Ok(Self {
            grid,
            min,
            log_ratio: ratio.ln(),
        })
    }

    /// 相邻边界的公共比值 (max/min)^(1/N)
    pub fn growth_factor(&self) -> f64 {
        (self.log_ratio / self.n_sections() as f64).exp()
    }

    #[inline]
    fn fractional_position(&self, s: f64) -> f64 {
        self.n_sections() as f64 * (s / self.min).ln() / self.log_ratio
    }
}

impl SectionalDistribution for LogarithmicDistribution {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn grid(&self) -> &SectionGrid {
        &self.grid
    }

    fn search(&self, s: f64) -> usize {
        if !(s > self.min) {
            return 0;
        }
        let guess = floor_index(self.fractional_position(s), self.n_sections());
        self.grid.locate(s, guess)
    }

    fn search_lower(&self, s: f64) -> usize {
        if !(s > self.min) {
            return 0;
        }
        // 代表尺寸位于 (i + 1/2) 处
        let guess = floor_index(self.fractional_position(s) - 0.5, self.n_sections());
        self.grid.locate_lower(s, guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
        let b = dist.boundaries();
        assert_eq!(b.len(), 6);
        assert_eq!(b[0], 1e-8);
        assert_eq!(b[5], 1e-4);
    }

    #[test]
    fn test_constant_ratio() {
        let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
        let b = dist.boundaries();
        let r0 = b[1] / b[0];
        for w in b.windows(2) {
            assert!(((w[1] / w[0]) / r0 - 1.0).abs() < 1e-12);
        }
        assert!((dist.growth_factor() / r0 - 1.0).abs() < 1e-12);
        // 10^(4/5)
        assert!((r0 / 10f64.powf(0.8) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_representative_is_geometric_mean() {
        let dist = LogarithmicDistribution::new(4, 1e-6, 1e-2).unwrap();
        for s in dist.sections() {
            assert!(((s.size * s.size) / (s.lower * s.upper) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_search_clamps() {
        let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
        assert_eq!(dist.search(0.0), 0);
        assert_eq!(dist.search(-1.0), 0);
        assert_eq!(dist.search(1e-9), 0);
        assert_eq!(dist.search(1e-3), 4);
        assert_eq!(dist.search(1e-4), 4);
        assert_eq!(dist.search(f64::INFINITY), 4);
        assert_eq!(dist.search(f64::NAN), 0);
    }

    #[test]
    fn test_search_boundaries_half_open() {
        let dist = LogarithmicDistribution::new(7, 3e-9, 2e-5).unwrap();
        let b = dist.boundaries().to_vec();
        for i in 1..7 {
            assert_eq!(dist.search(b[i]), i, "boundary {i}");
        }
    }

    #[test]
    fn test_search_lower_ties() {
        let dist = LogarithmicDistribution::new(5, 1e-8, 1e-4).unwrap();
        for i in 0..5 {
            let rep = dist.section(i).size;
            assert_eq!(dist.search_lower(rep), i);
        }
        assert_eq!(dist.search_lower(0.5 * dist.section(0).size), 0);
        assert_eq!(dist.search_lower(1.0), 4);
    }

    #[test]
    fn test_single_section() {
        let dist = LogarithmicDistribution::new(1, 1e-7, 1e-5).unwrap();
        assert_eq!(dist.n_sections(), 1);
        assert_eq!(dist.search(1e-6), 0);
        assert_eq!(dist.search_lower(1e-5), 0);
        assert!((dist.section(0).size - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LogarithmicDistribution::new(0, 1e-8, 1e-4).is_err());
        assert!(LogarithmicDistribution::new(5, 1e-4, 1e-8).is_err());
        assert!(LogarithmicDistribution::new(5, 0.0, 1e-4).is_err());
        assert!(LogarithmicDistribution::new(5, 1e-6, 1e-6).is_err());
    }
}
