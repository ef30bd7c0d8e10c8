// crates/ae_sectional/src/lib.rs

//! AeroSect 分段气溶胶核心
//!
//! 把连续粒径空间离散为固定分段，并为每个分段计算有效输运通量。
//!
//! # 模块概览
//!
//! - [`distribution`]: 分段网格与 O(1) 尺寸查找
//! - [`interpolation`]: 守恒矩插值
//! - [`drift`]: 惯性漂移模型与速度限幅
//! - [`flux`]: 有效通量组装、启动门控与通量采样
//! - [`registry`]: 按名称选择分布与漂移模型
//! - [`model`]: 组合以上部分的 [`AerosolModel`]
//! - [`mesh`], [`fields`], [`composition`]: 外部求解器提供的网格与场接口
//!
//! # 示例
//!
//! ```
//! use ae_config::AerosolConfig;
//! use ae_sectional::prelude::*;
//! use glam::DVec3;
//!
//! let mut config = AerosolConfig::default();
//! config.sections.n_sections = 4;
//! let mut model = AerosolModel::new(&config).unwrap();
//!
//! let mesh = BoxMesh::unit_cube(2).unwrap();
//! let flow = FlowFields::uniform(&mesh, DVec3::new(0.1, 0.0, 0.0));
//! let thermo = ThermoFields::uniform(mesh.n_cells(), CellProperties::water_in_air());
//! let mut fluxes = model.create_fluxes(&mesh, &["Y.0"], &["Z.0", "Z.1", "Z.2", "Z.3"]);
//!
//! let outcome = model.correct_fluxes(0.0, &mesh, &flow, &thermo, &mut fluxes).unwrap();
//! assert!(outcome.is_assembled());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod composition;
pub mod distribution;
pub mod drift;
pub mod error;
pub mod fields;
pub mod flux;
pub mod interpolation;
pub mod mesh;
pub mod model;
pub mod registry;

/// 层级标识
pub const LAYER: u8 = 3;

pub use error::{SectionalError, SectionalResult};
pub use model::AerosolModel;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::composition::{PhaseComposition, PhaseKind};
    pub use crate::distribution::{
        LinearDistribution, LogarithmicDistribution, Section, SectionalDistribution,
    };
    pub use crate::drift::{
        DriftContext, InertialModel, NoDrift, SchillerNaumannDrift, StokesDrift, VelocityLimiter,
    };
    pub use crate::error::{SectionalError, SectionalResult};
    pub use crate::fields::{CellField, CellProperties, FaceField, FlowFields, ThermoFields};
    pub use crate::flux::{
        ActivationGate, AssemblyOutcome, EffectiveFluxAssembler, SectionFluxes,
        SectionalFluxReport, SectionalFluxSampler,
    };
    pub use crate::interpolation::{MomentInterpolator, SectionalInterpolationData};
    pub use crate::mesh::{BoxMesh, FvMesh};
    pub use crate::model::AerosolModel;
    pub use crate::registry::{DistributionRegistry, DriftModelRegistry};
}
