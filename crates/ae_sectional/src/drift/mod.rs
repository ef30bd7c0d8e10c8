// crates/ae_sectional/src/drift/mod.rs

//! 惯性漂移模型
//!
//! 计算分散相分段相对载气的漂移速度。闭合关系可插拔：
//! - [`StokesDrift`]: Stokes 阻力（可选 Cunningham 滑移修正）
//! - [`SchillerNaumannDrift`]: Schiller-Naumann 阻力修正，迭代求解
//! - [`NoDrift`]: 无漂移（示踪粒子）
//!
//! 所有模型共享同一个速度限幅器：原始漂移速度模长超过 `VMax` 时
//! 按比例缩放到 `VMax`，方向不变。限幅总是最后一步。
//!
//! 模型不持有对外部场的引用；每次求值通过 [`DriftContext`] 显式传入。

pub mod none;
pub mod schiller_naumann;
pub mod stokes;

pub use none::NoDrift;
pub use schiller_naumann::SchillerNaumannDrift;
pub use stokes::StokesDrift;

use glam::DVec3;
use rayon::prelude::*;

use ae_foundation::float::safe_div;
use ae_foundation::{ensure, AeError};

use crate::error::{SectionalError, SectionalResult};
use crate::fields::{CellProperties, ThermoFields};

// ============================================================
// 求值上下文
// ============================================================

/// 漂移速度求值上下文
#[derive(Debug, Clone, Copy)]
pub struct DriftContext<'a> {
    /// 单元热物性
    pub thermo: &'a ThermoFields,
    /// 重力加速度 [m/s²]
    pub gravity: DVec3,
    /// 是否允许并行
    pub parallel: bool,
    /// 单元数达到此值时并行
    pub parallel_threshold: usize,
}

impl<'a> DriftContext<'a> {
    /// 创建串行上下文
    pub fn new(thermo: &'a ThermoFields, gravity: DVec3) -> Self {
        Self {
            thermo,
            gravity,
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    /// 设置并行策略
    pub fn with_parallel(mut self, parallel: bool, threshold: usize) -> Self {
        self.parallel = parallel;
        self.parallel_threshold = threshold;
        self
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.thermo.n_cells()
    }

    #[inline]
    fn use_parallel(&self) -> bool {
        self.parallel && self.n_cells() >= self.parallel_threshold
    }
}

/// 单次求值统计
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriftStats {
    /// 被限幅的单元数
    pub clamped: usize,
    /// 限幅后速度对应的最大颗粒雷诺数，用于判断阻力区
    pub max_reynolds: f64,
}

impl DriftStats {
    #[inline]
    fn merge(self, other: Self) -> Self {
        Self {
            clamped: self.clamped + other.clamped,
            max_reynolds: self.max_reynolds.max(other.max_reynolds),
        }
    }
}

// ============================================================
// 速度限幅
// ============================================================

/// 漂移速度限幅器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityLimiter {
    v_max: f64,
}

impl VelocityLimiter {
    /// 创建限幅器
    ///
    /// `v_max` 必须为有限正值；负值会使缩放后的速度反向。
    pub fn new(v_max: f64) -> SectionalResult<Self> {
        ensure!(
            v_max.is_finite() && v_max > 0.0,
            AeError::out_of_range("v_max", v_max, f64::MIN_POSITIVE, f64::MAX)
        );
        Ok(Self { v_max })
    }

    /// 最大相对速度 VMax
    #[inline]
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    /// 限幅单个速度，返回 (结果, 是否被修改)
    ///
    /// 非有限速度置零。
    #[inline]
    pub fn apply(&self, v: DVec3) -> (DVec3, bool) {
        let mag = v.length();
        if !mag.is_finite() {
            return (DVec3::ZERO, true);
        }
        if mag > self.v_max {
            (v * (self.v_max / mag), true)
        } else {
            (v, false)
        }
    }

    /// 限幅单个速度
    #[inline]
    pub fn limit(&self, v: DVec3) -> DVec3 {
        self.apply(v).0
    }

    /// 原地限幅整个场，返回被修改的数量
    pub fn limit_field(&self, values: &mut [DVec3]) -> usize {
        let mut clamped = 0;
        for v in values.iter_mut() {
            let (limited, hit) = self.apply(*v);
            *v = limited;
            clamped += hit as usize;
        }
        clamped
    }
}

// ============================================================
// 无量纲数与修正
// ============================================================

/// 颗粒雷诺数 Re = ρc · |V| · d / μ
#[inline]
pub fn particle_reynolds(d: f64, speed: f64, rho_continuous: f64, mu: f64) -> f64 {
    safe_div(rho_continuous * speed.abs() * d.abs(), mu, 0.0)
}

/// Cunningham 滑移修正
///
/// Cc = 1 + Kn · (1.257 + 0.4 · exp(-1.1 / Kn))，Kn = 2λ / d
#[inline]
pub fn cunningham_correction(d: f64, mean_free_path: f64) -> f64 {
    if !(d > 0.0 && mean_free_path > 0.0) {
        return 1.0;
    }
    let kn = 2.0 * mean_free_path / d;
    1.0 + kn * (1.257 + 0.4 * (-1.1 / kn).exp())
}

/// Stokes 终端漂移速度（含可选滑移修正）
///
/// V = Cc · (ρd - ρc) · d² · g / (18 μ)
#[inline]
pub fn stokes_velocity(d: f64, props: &CellProperties, gravity: DVec3, cunningham: bool) -> DVec3 {
    if !(d > 0.0) {
        return DVec3::ZERO;
    }
    let cc = if cunningham {
        cunningham_correction(d, props.mean_free_path)
    } else {
        1.0
    };
    let factor = safe_div(
        cc * (props.rho_dispersed - props.rho_continuous) * d * d,
        18.0 * props.mu,
        0.0,
    );
    gravity * factor
}

// ============================================================
// 模型接口
// ============================================================

/// 惯性漂移模型接口
pub trait InertialModel: Send + Sync + std::fmt::Debug {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 速度限幅器
    fn limiter(&self) -> &VelocityLimiter;

    /// 单个单元的原始（未限幅）漂移速度
    fn cell_velocity(&self, d: f64, props: &CellProperties, gravity: DVec3) -> DVec3;

    /// 颗粒雷诺数
    fn reynolds(&self, d: f64, v: DVec3, props: &CellProperties) -> f64 {
        particle_reynolds(d, v.length(), props.rho_continuous, props.mu)
    }

    /// 单个单元的限幅漂移速度
    fn velocity(&self, d: f64, props: &CellProperties, gravity: DVec3) -> DVec3 {
        self.limiter().limit(self.cell_velocity(d, props, gravity))
    }

    /// 计算直径为 `d` 的分段在所有单元上的漂移速度
    ///
    /// `out` 长度必须等于单元数。
    fn relative_velocity(
        &self,
        d: f64,
        ctx: &DriftContext<'_>,
        out: &mut [DVec3],
    ) -> SectionalResult<DriftStats> {
        let n = ctx.n_cells();
        ctx.thermo.check_len(n)?;
        if out.len() != n {
            return Err(SectionalError::size_mismatch("drift velocity", n, out.len()));
        }

        let limiter = *self.limiter();
        let thermo = ctx.thermo;
        let gravity = ctx.gravity;
        let eval = |cell: usize, v: &mut DVec3| -> DriftStats {
            let props = thermo.cell(cell);
            let (limited, hit) = limiter.apply(self.cell_velocity(d, &props, gravity));
            *v = limited;
            DriftStats {
                clamped: hit as usize,
                max_reynolds: self.reynolds(d, limited, &props),
            }
        };

        let stats = if ctx.use_parallel() {
            out.par_iter_mut()
                .enumerate()
                .map(|(cell, v)| eval(cell, v))
                .reduce(DriftStats::default, DriftStats::merge)
        } else {
            out.iter_mut()
                .enumerate()
                .map(|(cell, v)| eval(cell, v))
                .fold(DriftStats::default(), DriftStats::merge)
        };

        if stats.clamped > 0 {
            log::trace!(
                "{}: d = {:.3e} m, {} 个单元被限幅, Re_max = {:.3e}",
                self.name(),
                d,
                stats.clamped,
                stats.max_reynolds
            );
        }

        Ok(stats)
    }
}
