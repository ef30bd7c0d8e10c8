// crates/ae_sectional/src/drift/none.rs

//! 无漂移模型：分散相随载气运动

use glam::DVec3;

use ae_config::DriftConfig;

use super::{InertialModel, VelocityLimiter};
use crate::error::SectionalResult;
use crate::fields::CellProperties;

/// 无漂移模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoDrift {
    limiter: VelocityLimiter,
}

impl NoDrift {
    /// 注册名称
    pub const NAME: &'static str = "none";

    /// 创建模型
    pub fn new(v_max: f64) -> SectionalResult<Self> {
        Ok(Self {
            limiter: VelocityLimiter::new(v_max)?,
        })
    }

    /// 从配置创建
    pub fn from_config(config: &DriftConfig) -> SectionalResult<Self> {
        Self::new(config.v_max)
    }
}

impl InertialModel for NoDrift {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn limiter(&self) -> &VelocityLimiter {
        &self.limiter
    }

    fn cell_velocity(&self, _d: f64, _props: &CellProperties, _gravity: DVec3) -> DVec3 {
        DVec3::ZERO
    }
}
