// crates/ae_sectional/src/drift/schiller_naumann.rs

//! Schiller-Naumann 漂移模型
//!
//! 阻力修正 f(Re) = 1 + 0.15 · Re^0.687，终端速度满足
//!
//! ```text
//! V · f(Re(V)) = V_stokes
//! ```
//!
//! Re 依赖 V，因此用牛顿迭代求解。左端关于 V 单调递增且为凸函数，
//! 从 V_stokes 出发的迭代单调收敛。

use glam::DVec3;

use ae_config::DriftConfig;

use super::{particle_reynolds, stokes_velocity, InertialModel, VelocityLimiter};
use crate::error::SectionalResult;
use crate::fields::CellProperties;

const COEFF: f64 = 0.15;
const EXPONENT: f64 = 0.687;

/// Schiller-Naumann 漂移模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchillerNaumannDrift {
    limiter: VelocityLimiter,
    cunningham: bool,
    max_iterations: usize,
    tolerance: f64,
}

impl SchillerNaumannDrift {
    /// 注册名称
    pub const NAME: &'static str = "schillerNaumann";

    /// 创建模型，使用默认迭代参数
    pub fn new(v_max: f64) -> SectionalResult<Self> {
        Ok(Self {
            limiter: VelocityLimiter::new(v_max)?,
            cunningham: false,
            max_iterations: 20,
            tolerance: 1e-8,
        })
    }

    /// 从配置创建
    pub fn from_config(config: &DriftConfig) -> SectionalResult<Self> {
        Ok(Self {
            limiter: VelocityLimiter::new(config.v_max)?,
            cunningham: config.cunningham,
            max_iterations: config.max_iterations.max(1),
            tolerance: config.tolerance,
        })
    }

    /// 阻力修正因子 f(Re)
    #[inline]
    pub fn drag_factor(re: f64) -> f64 {
        1.0 + COEFF * re.max(0.0).powf(EXPONENT)
    }

    /// 求解终端速度模长
    ///
    /// `v0` 为 Stokes 速度模长。Re 与 V 成正比，故
    /// d(V · f) / dV = 1 + (1 + n) · 0.15 · Re^n。
    fn solve_speed(&self, v0: f64, d: f64, props: &CellProperties) -> f64 {
        let mut v = v0;
        for _ in 0..self.max_iterations {
            let re = particle_reynolds(d, v, props.rho_continuous, props.mu);
            let h = v * Self::drag_factor(re) - v0;
            let dh = 1.0 + (1.0 + EXPONENT) * COEFF * re.powf(EXPONENT);
            let dv = h / dh;
            v = (v - dv).max(0.0);
            if dv.abs() <= self.tolerance * v {
                break;
            }
        }
        v
    }
}

impl InertialModel for SchillerNaumannDrift {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn limiter(&self) -> &VelocityLimiter {
        &self.limiter
    }

    fn cell_velocity(&self, d: f64, props: &CellProperties, gravity: DVec3) -> DVec3 {
        let stokes = stokes_velocity(d, props, gravity, self.cunningham);
        let v0 = stokes.length();
        if !(v0 > 0.0 && v0.is_finite() && props.mu > 0.0) {
            return stokes;
        }
        let v = self.solve_speed(v0, d, props);
        stokes * (v / v0)
    }
}
