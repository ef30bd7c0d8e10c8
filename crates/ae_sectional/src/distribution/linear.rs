// crates/ae_sectional/src/distribution/linear.rs

//! 线性（等差）分段分布
//!
//! 边界 b_i = min + (max - min) · i / N，代表尺寸取区间中点。
//! 适用于尺寸跨度不足一个数量级的单分散气溶胶。

use super::{check_parameters, floor_index, SectionGrid, SectionalDistribution};
use crate::error::SectionalResult;

/// 线性分段分布
#[derive(Debug, Clone)]
pub struct LinearDistribution {
    grid: SectionGrid,
    min: f64,
    span: f64,
}

impl LinearDistribution {
    /// 注册名称
    pub const NAME: &'static str = "linear";

    /// 创建线性分布
    pub fn new(n: usize, min: f64, max: f64) -> SectionalResult<Self> {
        check_parameters(n, min, max)?;

        let span = max - min;
        let mut boundaries: Vec<f64> = (0..=n)
            .map(|i| min + span * (i as f64 / n as f64))
            .collect();
        boundaries[0] = min;
        boundaries[n] = max;

        let grid = SectionGrid::from_boundaries(boundaries, |lo, hi| 0.5 * (lo + hi))?;

        Ok(Self { grid, min, span })
    }

    #[inline]
    fn fractional_position(&self, s: f64) -> f64 {
        self.n_sections() as f64 * (s - self.min) / self.span
    }
}

impl SectionalDistribution for LinearDistribution {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn grid(&self) -> &SectionGrid {
        &self.grid
    }

    fn search(&self, s: f64) -> usize {
        let guess = floor_index(self.fractional_position(s), self.n_sections());
        self.grid.locate(s, guess)
    }

    fn search_lower(&self, s: f64) -> usize {
        let guess = floor_index(self.fractional_position(s) - 0.5, self.n_sections());
        self.grid.locate_lower(s, guess)
    }
}
