// crates/ae_sectional/src/distribution/mod.rs

//! 分段尺寸分布
//!
//! 把连续尺寸空间 `[min, max]` 划分为 N 个相邻的半开区间 `[lower, upper)`，
//! 每段带一个代表尺寸。分布在模型构建时确定，之后不再改变。
//!
//! - [`SectionalDistribution`]: 分布接口（查找、访问）
//! - [`SectionGrid`]: 各分布共用的分段存储
//! - [`LogarithmicDistribution`]: 等比分段（默认）
//! - [`LinearDistribution`]: 等差分段
//!
//! # 查找约定
//!
//! - `search(s)`: 包含 `s` 的分段，边界值属于上方分段（半开区间）
//! - `search_lower(s)`: 代表尺寸不超过 `s` 的最大分段号，恰好落在代表尺寸上时取该分段
//! - 两者对越界、非正和 NaN 输入都钳位到 `[0, N-1]`，从不报错

pub mod linear;
pub mod logarithmic;

pub use linear::LinearDistribution;
pub use logarithmic::LogarithmicDistribution;

use ae_foundation::ensure;
use serde::{Deserialize, Serialize};

use crate::error::{SectionalError, SectionalResult};

// ============================================================
// 分段
// ============================================================

/// 单个分段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// 分段号（按尺寸递增）
    pub index: usize,
    /// 代表尺寸 [m]
    pub size: f64,
    /// 下边界 [m]
    pub lower: f64,
    /// 上边界 [m]
    pub upper: f64,
}

impl Section {
    /// 分段宽度
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// 尺寸是否落在 `[lower, upper)` 内
    #[inline]
    pub fn contains(&self, s: f64) -> bool {
        s >= self.lower && s < self.upper
    }
}

// ============================================================
// 分段存储
// ============================================================

/// 分段网格：N+1 个严格递增的边界与 N 个分段
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGrid {
    boundaries: Vec<f64>,
    sections: Vec<Section>,
}

impl SectionGrid {
    /// 由边界和代表尺寸规则构建
    ///
    /// `representative(lower, upper)` 必须返回 `[lower, upper)` 内的值。
    pub fn from_boundaries<F>(boundaries: Vec<f64>, representative: F) -> SectionalResult<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        if boundaries.len() < 2 {
            return Err(SectionalError::invalid_sections(format!(
                "至少需要 2 个边界，实际 {}",
                boundaries.len()
            )));
        }
        if let Some(w) = boundaries.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(SectionalError::invalid_sections(format!(
                "边界必须严格递增: b[{}]={} >= b[{}]={}",
                w,
                boundaries[w],
                w + 1,
                boundaries[w + 1]
            )));
        }

        let mut sections = Vec::with_capacity(boundaries.len() - 1);
        for (index, w) in boundaries.windows(2).enumerate() {
            let (lower, upper) = (w[0], w[1]);
            let size = representative(lower, upper);
            if !(size >= lower && size < upper) {
                return Err(SectionalError::invalid_sections(format!(
                    "分段 {index} 的代表尺寸 {size} 不在 [{lower}, {upper}) 内"
                )));
            }
            sections.push(Section {
                index,
                size,
                lower,
                upper,
            });
        }

        Ok(Self {
            boundaries,
            sections,
        })
    }

    /// 分段数
    #[inline]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// 是否为空（构建后永不为空）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// 所有边界
    #[inline]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// 所有分段
    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// 由估计值修正得到包含 `s` 的分段号
    ///
    /// `guess` 来自闭式解，舍入误差最多使其偏离一位。
    pub fn locate(&self, s: f64, guess: usize) -> usize {
        let n = self.len();
        if !(s > self.boundaries[0]) {
            return 0;
        }
        if s >= self.boundaries[n] {
            return n - 1;
        }
        let mut i = guess.min(n - 1);
        while i > 0 && s < self.boundaries[i] {
            i -= 1;
        }
        while i + 1 < n && s >= self.boundaries[i + 1] {
            i += 1;
        }
        i
    }

    /// 由估计值修正得到代表尺寸不超过 `s` 的最大分段号
    pub fn locate_lower(&self, s: f64, guess: usize) -> usize {
        let n = self.len();
        if !(s > self.sections[0].size) {
            return 0;
        }
        if s >= self.sections[n - 1].size {
            return n - 1;
        }
        let mut i = guess.min(n - 1);
        while i > 0 && s < self.sections[i].size {
            i -= 1;
        }
        while i + 1 < n && s >= self.sections[i + 1].size {
            i += 1;
        }
        i
    }
}

/// 把浮点估计值转换为分段号，负值和 NaN 映射为 0
#[inline]
pub(crate) fn floor_index(x: f64, n: usize) -> usize {
    if x.is_nan() || x <= 0.0 {
        0
    } else {
        (x.floor() as usize).min(n.saturating_sub(1))
    }
}

// ============================================================
// 分布接口
// ============================================================

/// 分段尺寸分布接口
pub trait SectionalDistribution: Send + Sync + std::fmt::Debug {
    /// 分布类型名称
    fn name(&self) -> &'static str;

    /// 分段存储
    fn grid(&self) -> &SectionGrid;

    /// 包含 `s` 的分段号，越界时钳位
    fn search(&self, s: f64) -> usize;

    /// 代表尺寸不超过 `s` 的最大分段号，越界时钳位
    fn search_lower(&self, s: f64) -> usize;

    /// 分段数 N
    #[inline]
    fn n_sections(&self) -> usize {
        self.grid().len()
    }

    /// 第 `i` 个分段
    ///
    /// # Panics
    ///
    /// `i >= N` 时 panic，与切片索引一致。
    #[inline]
    fn section(&self, i: usize) -> &Section {
        &self.grid().sections()[i]
    }

    /// 所有分段
    #[inline]
    fn sections(&self) -> &[Section] {
        self.grid().sections()
    }

    /// N+1 个边界
    #[inline]
    fn boundaries(&self) -> &[f64] {
        self.grid().boundaries()
    }

    /// 最小尺寸
    #[inline]
    fn size_min(&self) -> f64 {
        self.grid().boundaries()[0]
    }

    /// 最大尺寸
    #[inline]
    fn size_max(&self) -> f64 {
        let b = self.grid().boundaries();
        b[b.len() - 1]
    }

    /// 各分段代表尺寸
    fn representative_sizes(&self) -> Vec<f64> {
        self.sections().iter().map(|s| s.size).collect()
    }
}

/// 校验分布构造参数
pub(crate) fn check_parameters(n: usize, min: f64, max: f64) -> SectionalResult<()> {
    ensure!(
        n >= 1,
        SectionalError::invalid_sections(format!("分段数必须 ≥ 1，实际 {n}"))
    );
    ensure!(
        min.is_finite() && min > 0.0 && max.is_finite() && max > min,
        SectionalError::invalid_sections(format!("尺寸范围无效: [{min}, {max}]"))
    );
    Ok(())
}
