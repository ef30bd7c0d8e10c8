// crates/ae_sectional/src/flux/sampling.rs

//! 分段质量通量采样
//!
//! 在一组面（边界 patch 或面区）上统计每个分散相分段的质量通量：
//!
//! ```text
//! F_j = Σ_f ± phiEff_j[f] · Z_j[upwind(f)]
//! ```
//!
//! phiEff ≥ 0 时迎风单元为所属单元，否则为相邻单元；边界面总取所属单元。
//! 翻转标志为 true 的面取负号，用于统一面区方向。

use std::fmt::Write as _;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use ae_foundation::AeError;

use crate::composition::PhaseComposition;
use crate::error::{SectionalError, SectionalResult};
use crate::flux::SectionFluxes;
use crate::mesh::FvMesh;

/// 单次采样结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionalFluxReport {
    /// 采样器名称
    pub name: String,
    /// 模拟时间 [s]
    pub time: f64,
    /// 分段名称（分散相组分场名）
    pub names: Vec<String>,
    /// 各分段通量
    pub values: Vec<f64>,
}

impl SectionalFluxReport {
    /// 所有分段通量之和
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// 表头：`# time` 后接分段名，制表符分隔
    pub fn header(&self) -> String {
        let mut line = String::from("# time");
        for name in &self.names {
            line.push('\t');
            line.push_str(name);
        }
        line
    }

    /// 数据行
    pub fn row(&self) -> String {
        let mut line = format!("{:e}", self.time);
        for v in &self.values {
            let _ = write!(line, "\t{v:e}");
        }
        line
    }
}

/// 面集合上的分段通量采样器
#[derive(Debug, Clone, PartialEq)]
pub struct SectionalFluxSampler {
    name: String,
    faces: Vec<usize>,
    flip: Vec<bool>,
}

impl SectionalFluxSampler {
    /// 由面列表与翻转标志创建
    pub fn new(name: impl Into<String>, faces: Vec<usize>, flip: Vec<bool>) -> SectionalResult<Self> {
        let name = name.into();
        if faces.len() != flip.len() {
            return Err(SectionalError::size_mismatch(
                format!("{name} flip map"),
                faces.len(),
                flip.len(),
            ));
        }
        Ok(Self { name, faces, flip })
    }

    /// 由连续面范围（如边界 patch）创建，不翻转
    pub fn from_range(name: impl Into<String>, faces: Range<usize>) -> Self {
        let faces: Vec<usize> = faces.collect();
        let flip = vec![false; faces.len()];
        Self {
            name: name.into(),
            faces,
            flip,
        }
    }

    /// 采样器名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 面数
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// 统计各分散相分段的质量通量
    pub fn sample<M: FvMesh + ?Sized>(
        &self,
        time: f64,
        mesh: &M,
        fluxes: &SectionFluxes,
        composition: &PhaseComposition,
    ) -> SectionalResult<SectionalFluxReport> {
        if fluxes.z.len() != composition.z.len() {
            return Err(SectionalError::size_mismatch(
                "phiEff dispersed sections",
                composition.z.len(),
                fluxes.z.len(),
            ));
        }
        fluxes.check(mesh)?;
        composition.check(mesh)?;
        if let Some(&bad) = self.faces.iter().find(|&&f| f >= mesh.n_faces()) {
            return Err(AeError::index_out_of_bounds("face", bad, mesh.n_faces()).into());
        }

        let values = fluxes
            .z
            .iter()
            .zip(&composition.z)
            .map(|(phi_eff, z)| {
                self.faces
                    .iter()
                    .zip(&self.flip)
                    .map(|(&f, &flip)| {
                        let flux = phi_eff[f];
                        let upwind = match mesh.face_neighbor(f) {
                            Some(neighbor) if flux < 0.0 => neighbor,
                            _ => mesh.face_owner(f),
                        };
                        let sign = if flip { -1.0 } else { 1.0 };
                        sign * flux * z[upwind]
                    })
                    .sum()
            })
            .collect();

        Ok(SectionalFluxReport {
            name: self.name.clone(),
            time,
            names: composition.z_names(),
            values,
        })
    }
}
