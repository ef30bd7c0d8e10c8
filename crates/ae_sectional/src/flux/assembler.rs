// crates/ae_sectional/src/flux/assembler.rs

//! 有效通量组装
//!
//! 对每个分段 j：
//!
//! ```text
//! phiEff_j[f] = phi[f] + (V_j)_f · Sf
//! ```
//!
//! 连续相分段没有漂移，phiEff = phi；分散相分段用其代表直径计算漂移速度，
//! 单元值线性插值到内部面，边界面取所属单元值。
//!
//! 各分段互不依赖，分段数与面数足够大时按分段并行。
//! 组装受 [`ActivationGate`] 控制：模拟时间未到 `calc_aerosol_after` 前跳过。

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use ae_config::FluxConfig;

use crate::drift::{DriftContext, InertialModel};
use crate::error::{SectionalError, SectionalResult};
use crate::fields::{FaceField, FlowFields};
use crate::mesh::FvMesh;

// ============================================================
// 分段通量场
// ============================================================

/// 每分段一个面通量场
#[derive(Debug, Clone, Default)]
pub struct SectionFluxes {
    /// 连续相分段
    pub y: Vec<FaceField<f64>>,
    /// 分散相分段
    pub z: Vec<FaceField<f64>>,
}

impl SectionFluxes {
    /// 场名前缀
    pub const PREFIX: &'static str = "phiEff";

    /// 创建零初值通量场，名称为 `phiEff.<组分场名>`
    pub fn new<S: AsRef<str>>(n_faces: usize, y_names: &[S], z_names: &[S]) -> Self {
        let make = |names: &[S]| -> Vec<FaceField<f64>> {
            names
                .iter()
                .map(|n| FaceField::uniform(Self::flux_name(n.as_ref()), n_faces, 0.0))
                .collect()
        };
        Self {
            y: make(y_names),
            z: make(z_names),
        }
    }

    /// 组分场对应的通量场名
    pub fn flux_name(field: &str) -> String {
        format!("{}.{}", Self::PREFIX, field)
    }

    /// 按名称查找
    pub fn find(&self, name: &str) -> Option<&FaceField<f64>> {
        self.y.iter().chain(self.z.iter()).find(|f| f.name() == name)
    }

    /// 分段总数
    pub fn len(&self) -> usize {
        self.y.len() + self.z.len()
    }

    /// 是否没有分段
    pub fn is_empty(&self) -> bool {
        self.y.is_empty() && self.z.is_empty()
    }

    /// 检查所有场长度等于面数
    pub fn check<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        for field in self.y.iter().chain(self.z.iter()) {
            field.check_faces(mesh)?;
        }
        Ok(())
    }
}

// ============================================================
// 启动门控
// ============================================================

/// 气溶胶计算启动门控（calcAerosolAfter）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationGate {
    calc_aerosol_after: f64,
}

impl ActivationGate {
    /// 从起始时间创建
    pub fn new(calc_aerosol_after: f64) -> Self {
        Self { calc_aerosol_after }
    }

    /// 始终启用
    pub fn always() -> Self {
        Self::new(f64::NEG_INFINITY)
    }

    /// 起始时间
    pub fn threshold(&self) -> f64 {
        self.calc_aerosol_after
    }

    /// 时间 `t` 是否已启用
    #[inline]
    pub fn is_active(&self, t: f64) -> bool {
        t >= self.calc_aerosol_after
    }
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ============================================================
// 组装器
// ============================================================

/// 组装结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// 已组装
    Assembled {
        /// 组装的分段数
        sections: usize,
        /// 所有分散相分段中被限幅的单元总数
        clamped: usize,
    },
    /// 门控未开启，通量场未改动
    Skipped,
}

impl AssemblyOutcome {
    /// 是否执行了组装
    pub fn is_assembled(&self) -> bool {
        matches!(self, Self::Assembled { .. })
    }
}

/// 有效通量组装器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveFluxAssembler {
    gate: ActivationGate,
    parallel: bool,
    parallel_threshold: usize,
}

impl EffectiveFluxAssembler {
    /// 创建组装器
    pub fn new(gate: ActivationGate, parallel: bool, parallel_threshold: usize) -> Self {
        Self {
            gate,
            parallel,
            parallel_threshold,
        }
    }

    /// 从配置创建
    pub fn from_config(config: &FluxConfig) -> Self {
        Self::new(
            ActivationGate::new(config.calc_aerosol_after),
            config.parallel,
            config.parallel_threshold,
        )
    }

    /// 串行组装器（测试与小网格）
    pub fn serial(gate: ActivationGate) -> Self {
        Self::new(gate, false, usize::MAX)
    }

    /// 启动门控
    pub fn gate(&self) -> &ActivationGate {
        &self.gate
    }

    /// 时间 `t` 是否组装
    #[inline]
    pub fn is_active(&self, t: f64) -> bool {
        self.gate.is_active(t)
    }

    /// 单元漂移速度到面通量
    ///
    /// 内部面按网格插值权重线性插值，边界面取所属单元值，再与 Sf 点积。
    pub fn drift_face_flux<M: FvMesh + ?Sized>(
        &self,
        mesh: &M,
        v: &[DVec3],
        out: &mut [f64],
    ) -> SectionalResult<()> {
        if v.len() != mesh.n_cells() {
            return Err(SectionalError::size_mismatch("drift velocity", mesh.n_cells(), v.len()));
        }
        if out.len() != mesh.n_faces() {
            return Err(SectionalError::size_mismatch("drift flux", mesh.n_faces(), out.len()));
        }

        for (face, flux) in out.iter_mut().enumerate() {
            let owner = mesh.face_owner(face);
            let vf = match mesh.face_neighbor(face) {
                Some(neighbor) => {
                    let w = mesh.face_interpolation_weight(face);
                    v[owner] * w + v[neighbor] * (1.0 - w)
                }
                None => v[owner],
            };
            *flux = vf.dot(mesh.face_area_vector(face));
        }
        Ok(())
    }

    /// 组装所有分段的有效通量
    ///
    /// `diameters[j]` 为分散相分段 j 的代表直径，数量必须与 `fluxes.z` 一致。
    #[allow(clippy::too_many_arguments)]
    pub fn assemble<M: FvMesh + ?Sized>(
        &self,
        time: f64,
        mesh: &M,
        flow: &FlowFields,
        drift: &dyn InertialModel,
        diameters: &[f64],
        ctx: &DriftContext<'_>,
        fluxes: &mut SectionFluxes,
    ) -> SectionalResult<AssemblyOutcome> {
        if !self.gate.is_active(time) {
            log::trace!(
                "t = {time} 早于 calcAerosolAfter = {}，跳过通量组装",
                self.gate.threshold()
            );
            return Ok(AssemblyOutcome::Skipped);
        }

        flow.check(mesh)?;
        ctx.thermo.check(mesh)?;
        fluxes.check(mesh)?;
        if fluxes.z.len() != diameters.len() {
            return Err(SectionalError::size_mismatch(
                "phiEff dispersed sections",
                diameters.len(),
                fluxes.z.len(),
            ));
        }

        let phi = flow.phi.as_slice();
        let n_cells = mesh.n_cells();
        let n_sections = fluxes.len();
        let parallel =
            self.parallel && n_sections.saturating_mul(mesh.n_faces()) >= self.parallel_threshold;

        // 连续相：phi + 0
        let continuous = |field: &mut FaceField<f64>| {
            for (out, p) in field.iter_mut().zip(phi) {
                *out = *p + 0.0;
            }
        };

        // 分散相：phi + 漂移通量
        let dispersed = |field: &mut FaceField<f64>, d: f64| -> SectionalResult<usize> {
            let mut v = vec![DVec3::ZERO; n_cells];
            let stats = drift.relative_velocity(d, ctx, &mut v)?;
            self.drift_face_flux(mesh, &v, field.as_mut_slice())?;
            for (out, p) in field.iter_mut().zip(phi) {
                *out = *p + *out;
            }
            Ok(stats.clamped)
        };

        let clamped = if parallel {
            fluxes.y.par_iter_mut().for_each(continuous);
            fluxes
                .z
                .par_iter_mut()
                .zip(diameters.par_iter())
                .map(|(field, &d)| dispersed(field, d))
                .try_reduce(|| 0, |a, b| Ok(a + b))?
        } else {
            fluxes.y.iter_mut().for_each(continuous);
            let mut total = 0;
            for (field, &d) in fluxes.z.iter_mut().zip(diameters) {
                total += dispersed(field, d)?;
            }
            total
        };

        log::debug!(
            "有效通量组装完成: {} 个分段, {} 个单元被限幅 (drift = {})",
            n_sections,
            clamped,
            drift.name()
        );

        Ok(AssemblyOutcome::Assembled {
            sections: n_sections,
            clamped,
        })
    }
}

impl Default for EffectiveFluxAssembler {
    fn default() -> Self {
        Self::from_config(&FluxConfig::default())
    }
}
