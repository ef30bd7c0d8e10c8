// crates/ae_sectional/src/drift/stokes.rs

//! Stokes 漂移模型
//!
//! 适用于 Re < 1 的细颗粒：V = Cc · (ρd - ρc) · d² · g / (18 μ)。
//! 与雷诺数无关，大颗粒的外推由限幅器兜底。
//! 求值统计中的 `max_reynolds` 超过 1 时说明已超出 Stokes 区。

use glam::DVec3;

use ae_config::DriftConfig;

use super::{stokes_velocity, InertialModel, VelocityLimiter};
use crate::error::SectionalResult;
use crate::fields::CellProperties;

/// Stokes 漂移模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StokesDrift {
    limiter: VelocityLimiter,
    cunningham: bool,
}

impl StokesDrift {
    /// 注册名称
    pub const NAME: &'static str = "stokes";

    /// 创建模型，`v_max` 非法时报错
    pub fn new(v_max: f64) -> SectionalResult<Self> {
        Ok(Self {
            limiter: VelocityLimiter::new(v_max)?,
            cunningham: false,
        })
    }

    /// 从配置创建
    pub fn from_config(config: &DriftConfig) -> SectionalResult<Self> {
        Ok(Self::new(config.v_max)?.with_cunningham(config.cunningham))
    }

    /// 启用或关闭 Cunningham 滑移修正
    pub fn with_cunningham(mut self, enabled: bool) -> Self {
        self.cunningham = enabled;
        self
    }
}

impl InertialModel for StokesDrift {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn limiter(&self) -> &VelocityLimiter {
        &self.limiter
    }

    fn cell_velocity(&self, d: f64, props: &CellProperties, gravity: DVec3) -> DVec3 {
        stokes_velocity(d, props, gravity, self.cunningham)
    }
}
