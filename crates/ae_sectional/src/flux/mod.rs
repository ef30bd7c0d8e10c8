// crates/ae_sectional/src/flux/mod.rs

//! 有效通量
//!
//! - [`assembler`]: 每分段有效面通量 phiEff = phi + 漂移通量
//! - [`sampling`]: 指定面集合上的分段质量通量统计

pub mod assembler;
pub mod sampling;

pub use assembler::{ActivationGate, AssemblyOutcome, EffectiveFluxAssembler, SectionFluxes};
pub use sampling::{SectionalFluxReport, SectionalFluxSampler};
