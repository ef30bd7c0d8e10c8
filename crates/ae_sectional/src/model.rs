// crates/ae_sectional/src/model.rs

//! 气溶胶模型
//!
//! 把分布、插值器、漂移模型与通量组装器组合在一起，是外部求解器的唯一入口：
//!
//! ```text
//! AerosolConfig ──► 注册表 ──► distribution / drift
//!                                   │
//! mesh + FlowFields + ThermoFields ─┴─► correct_fluxes ──► SectionFluxes
//! ```
//!
//! 模型独占其子模型，网格与场只在调用期间借用。

use glam::DVec3;

use ae_config::AerosolConfig;

use crate::distribution::SectionalDistribution;
use crate::drift::{DriftContext, InertialModel};
use crate::error::SectionalResult;
use crate::fields::{FlowFields, ThermoFields};
use crate::flux::{ActivationGate, AssemblyOutcome, EffectiveFluxAssembler, SectionFluxes};
use crate::interpolation::{MomentInterpolator, SectionalInterpolationData};
use crate::mesh::FvMesh;
use crate::registry::{DistributionRegistry, DriftModelRegistry};

/// 分段气溶胶模型
#[derive(Debug)]
pub struct AerosolModel {
    config: AerosolConfig,
    distribution: Box<dyn SectionalDistribution>,
    drift: Box<dyn InertialModel>,
    interpolator: MomentInterpolator,
    assembler: EffectiveFluxAssembler,
    gravity: DVec3,
    diameters: Vec<f64>,
    was_active: bool,
}

impl AerosolModel {
    /// 使用内置注册表构建
    pub fn new(config: &AerosolConfig) -> SectionalResult<Self> {
        Self::with_registries(
            config,
            &DistributionRegistry::with_defaults(),
            &DriftModelRegistry::with_defaults(),
        )
    }

    /// 使用指定注册表构建
    pub fn with_registries(
        config: &AerosolConfig,
        distributions: &DistributionRegistry,
        drift_models: &DriftModelRegistry,
    ) -> SectionalResult<Self> {
        config.validate()?;

        let distribution = distributions.create(&config.sections.distribution, config)?;
        let drift = drift_models.create(&config.drift.model, config)?;
        let interpolator = MomentInterpolator::new(config.sections.interpolation_order)?;
        let assembler = EffectiveFluxAssembler::from_config(&config.flux);
        let diameters = distribution.representative_sizes();

        log::info!(
            "分段分布: {} (N = {}, [{:.3e}, {:.3e}] m), 插值矩阶数 {}",
            distribution.name(),
            distribution.n_sections(),
            distribution.size_min(),
            distribution.size_max(),
            interpolator.order()
        );
        log::info!(
            "惯性漂移模型: {} (VMax = {} m/s), calcAerosolAfter = {} s",
            drift.name(),
            drift.limiter().v_max(),
            config.flux.calc_aerosol_after
        );

        Ok(Self {
            config: config.clone(),
            distribution,
            drift,
            interpolator,
            assembler,
            gravity: DVec3::from_array(config.drift.gravity),
            diameters,
            was_active: false,
        })
    }

    /// 配置
    pub fn config(&self) -> &AerosolConfig {
        &self.config
    }

    /// 分段分布
    pub fn distribution(&self) -> &dyn SectionalDistribution {
        self.distribution.as_ref()
    }

    /// 漂移模型
    pub fn drift_model(&self) -> &dyn InertialModel {
        self.drift.as_ref()
    }

    /// 插值器
    pub fn interpolator(&self) -> &MomentInterpolator {
        &self.interpolator
    }

    /// 启动门控
    pub fn gate(&self) -> &ActivationGate {
        self.assembler.gate()
    }

    /// 重力加速度
    pub fn gravity(&self) -> DVec3 {
        self.gravity
    }

    /// 各分段代表直径
    pub fn section_diameters(&self) -> &[f64] {
        &self.diameters
    }

    /// 把尺寸 `s` 插值到分段
    pub fn interpolate(&self, s: f64) -> SectionalInterpolationData {
        self.interpolator.interpolate(self.distribution.as_ref(), s)
    }

    /// 时间 `t` 是否计算气溶胶
    pub fn is_active(&self, t: f64) -> bool {
        self.assembler.is_active(t)
    }

    /// 为组分场创建零初值通量场
    pub fn create_fluxes<M, S>(&self, mesh: &M, y_names: &[S], z_names: &[S]) -> SectionFluxes
    where
        M: FvMesh + ?Sized,
        S: AsRef<str>,
    {
        SectionFluxes::new(mesh.n_faces(), y_names, z_names)
    }

    /// 构造漂移求值上下文
    pub fn drift_context<'a>(&self, thermo: &'a ThermoFields) -> DriftContext<'a> {
        DriftContext::new(thermo, self.gravity)
            .with_parallel(self.config.flux.parallel, self.config.flux.parallel_threshold)
    }

    /// 更新所有分段的有效通量
    ///
    /// 门控未开启时返回 [`AssemblyOutcome::Skipped`]，通量场保持不变。
    pub fn correct_fluxes<M: FvMesh + ?Sized>(
        &mut self,
        time: f64,
        mesh: &M,
        flow: &FlowFields,
        thermo: &ThermoFields,
        fluxes: &mut SectionFluxes,
    ) -> SectionalResult<AssemblyOutcome> {
        let active = self.assembler.is_active(time);
        if active && !self.was_active {
            log::info!("t = {time} s: 气溶胶计算启动");
        }
        self.was_active = active;

        let ctx = self.drift_context(thermo);
        self.assembler.assemble(
            time,
            mesh,
            flow,
            self.drift.as_ref(),
            &self.diameters,
            &ctx,
            fluxes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SectionalError;
    use crate::fields::CellProperties;
    use crate::mesh::BoxMesh;

    #[test]
    fn test_build_default() {
        let model = AerosolModel::new(&AerosolConfig::default()).unwrap();
        assert_eq!(model.distribution().name(), "logarithmic");
        assert_eq!(model.drift_model().name(), "stokes");
        assert_eq!(model.section_diameters().len(), 10);
        assert_eq!(model.gravity(), DVec3::new(0.0, 0.0, -9.81));
    }

    #[test]
    fn test_unknown_drift_model_is_fatal() {
        let mut config = AerosolConfig::default();
        config.drift.model = "magic".to_string();
        let err = AerosolModel::new(&config).unwrap_err();
        assert!(matches!(err, SectionalError::UnknownModel { .. }));
        assert!(err.is_setup_error());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AerosolConfig::default();
        config.sections.n_sections = 0;
        assert!(matches!(
            AerosolModel::new(&config),
            Err(SectionalError::Config(_))
        ));
    }

    #[test]
    fn test_gate_transition() {
        let mut config = AerosolConfig::default();
        config.flux.calc_aerosol_after = 0.1;
        config.sections.n_sections = 3;
        let mut model = AerosolModel::new(&config).unwrap();

        let mesh = BoxMesh::unit_cube(2).unwrap();
        let flow = FlowFields::uniform(&mesh, DVec3::X);
        let thermo = ThermoFields::uniform(mesh.n_cells(), CellProperties::water_in_air());
        let mut fluxes = model.create_fluxes(&mesh, &["Y.0"], &["Z.0", "Z.1", "Z.2"]);

        let before = model
            .correct_fluxes(0.05, &mesh, &flow, &thermo, &mut fluxes)
            .unwrap();
        assert_eq!(before, AssemblyOutcome::Skipped);
        assert!(!model.is_active(0.05));

        let after = model
            .correct_fluxes(0.1, &mesh, &flow, &thermo, &mut fluxes)
            .unwrap();
        assert!(after.is_assembled());
        assert_eq!(fluxes.y[0].as_slice(), flow.phi.as_slice());
    }

    #[test]
    fn test_interpolate_through_model() {
        let model = AerosolModel::new(&AerosolConfig::default()).unwrap();
        let data = model.interpolate(0.0);
        assert_eq!(data.indices(), &[0]);
        let data = model.interpolate(1.0);
        assert_eq!(data.indices(), &[9]);
    }
}
