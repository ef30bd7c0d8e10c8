// crates/ae_sectional/src/interpolation.rs

//! 守恒矩插值
//!
//! 把任意尺寸 `s` 上的单位量分配到相邻两个分段的代表尺寸上，
//! 使 k 阶矩严格守恒：
//!
//! ```text
//! w · s_hi^k + (1 - w) · s_lo^k = s^k
//! w = (s^k - s_lo^k) / (s_hi^k - s_lo^k)
//! ```
//!
//! 实际计算采用归一化形式 `x = (s/s_hi)^k, a = (s_lo/s_hi)^k, w = (x - a)/(1 - a)`，
//! 避免 d^k 在微米尺度下的下溢。k = 0 时上式退化，改用对数线性权重。
//!
//! 越界尺寸（含 0、负值和 NaN）由 `search_lower` 钳位，权重全部落在端部分段。

use ae_foundation::float::clamp_or_lower;
use ae_foundation::{ensure, AeError, Tolerance};

use crate::distribution::SectionalDistribution;
use crate::error::{SectionalError, SectionalResult};

/// 插值结果：至多两个分段及其权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionalInterpolationData {
    indices: [usize; 2],
    weights: [f64; 2],
    sizes: [f64; 2],
    len: usize,
    xi: f64,
    order: f64,
    n_sections: usize,
}

impl SectionalInterpolationData {
    fn single(index: usize, size: f64, xi: f64, order: f64, n_sections: usize) -> Self {
        Self {
            indices: [index, index],
            weights: [1.0, 0.0],
            sizes: [size, size],
            len: 1,
            xi,
            order,
            n_sections,
        }
    }

    /// 分段号（长度 1 或 2，递增）
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    /// 与 [`indices`](Self::indices) 对应的权重
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights[..self.len]
    }

    /// 参与插值的代表尺寸
    #[inline]
    pub fn sizes(&self) -> &[f64] {
        &self.sizes[..self.len]
    }

    /// 查询尺寸
    #[inline]
    pub fn xi(&self) -> f64 {
        self.xi
    }

    /// 守恒矩阶数
    #[inline]
    pub fn order(&self) -> f64 {
        self.order
    }

    /// 是否落在单个分段上
    #[inline]
    pub fn is_single(&self) -> bool {
        self.len == 1
    }

    /// (分段号, 权重) 迭代器
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices().iter().copied().zip(self.weights().iter().copied())
    }

    /// 插值后的 k 阶矩 Σ w_i · s_i^k
    pub fn moment_of(&self, k: f64) -> f64 {
        self.weights()
            .iter()
            .zip(self.sizes())
            .map(|(w, s)| w * s.powf(k))
            .sum()
    }

    /// 检查权重和为 1，且两段插值时 k 阶矩守恒
    ///
    /// 钳位到端部分段的结果只检查权重和。
    pub fn is_conservative(&self, tol: &Tolerance) -> bool {
        let sum: f64 = self.weights().iter().sum();
        if !tol.is_unit_sum(sum) {
            return false;
        }
        self.is_single()
            || self.order == 0.0
            || tol.moments_match(self.moment_of(self.order), self.xi.powf(self.order))
    }

    /// 把 `value` 按权重累加到分段数组
    ///
    /// 供凝并、成核等子模型把任意尺寸上的量重新分配到固定分段。
    pub fn scatter(&self, value: f64, target: &mut [f64]) -> SectionalResult<()> {
        if target.len() != self.n_sections {
            return Err(SectionalError::size_mismatch(
                "sectional target",
                self.n_sections,
                target.len(),
            ));
        }
        for (i, w) in self.iter() {
            target[i] += value * w;
        }
        Ok(())
    }
}

/// 守恒矩插值器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentInterpolator {
    order: f64,
}

impl MomentInterpolator {
    /// 创建插值器，`order` 必须为非负有限值
    pub fn new(order: f64) -> SectionalResult<Self> {
        ensure!(
            order.is_finite() && order >= 0.0,
            AeError::out_of_range("interpolation_order", order, 0.0, f64::INFINITY)
        );
        Ok(Self { order })
    }

    /// 质量守恒（k = 3）
    pub fn mass() -> Self {
        Self { order: 3.0 }
    }

    /// 矩阶数
    pub fn order(&self) -> f64 {
        self.order
    }

    /// 计算尺寸 `s` 在分布上的插值权重
    pub fn interpolate<D>(&self, dist: &D, s: f64) -> SectionalInterpolationData
    where
        D: SectionalDistribution + ?Sized,
    {
        let n = dist.n_sections();
        let first = dist.section(0).size;
        let last = dist.section(n - 1).size;

        if n == 1 || !(s > first) {
            return SectionalInterpolationData::single(0, first, s, self.order, n);
        }
        if s >= last {
            return SectionalInterpolationData::single(n - 1, last, s, self.order, n);
        }

        let i = dist.search_lower(s);
        let lo = dist.section(i).size;
        if s == lo || i + 1 >= n {
            return SectionalInterpolationData::single(i, lo, s, self.order, n);
        }
        let hi = dist.section(i + 1).size;

        let w = clamp_or_lower(self.upper_weight(s, lo, hi), 0.0, 1.0);

        SectionalInterpolationData {
            indices: [i, i + 1],
            weights: [1.0 - w, w],
            sizes: [lo, hi],
            len: 2,
            xi: s,
            order: self.order,
            n_sections: n,
        }
    }

    /// 上邻分段的权重，要求 lo < s < hi
    #[inline]
    fn upper_weight(&self, s: f64, lo: f64, hi: f64) -> f64 {
        if self.order == 0.0 {
            return (s / lo).ln() / (hi / lo).ln();
        }
        let x = (s / hi).powf(self.order);
        let a = (lo / hi).powf(self.order);
        (x - a) / (1.0 - a)
    }
}

impl Default for MomentInterpolator {
    fn default() -> Self {
        Self::mass()
    }
}
