// crates/ae_sectional/src/fields.rs

//! 场数据容器
//!
//! 流场与热物性由外部求解器每步更新，分段核心只读访问：
//! - [`Field`]: 带名称的单元/面数据
//! - [`FlowFields`]: 单元速度 `U` 与面体积通量 `phi`
//! - [`ThermoFields`]: 漂移闭合所需的单元热物性
//! - [`CellProperties`]: 单个单元的热物性快照

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::error::{SectionalError, SectionalResult};
use crate::mesh::FvMesh;

// ============================================================
// 通用场
// ============================================================

/// 带名称的场数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field<T> {
    name: String,
    values: Vec<T>,
}

/// 单元中心场
pub type CellField<T> = Field<T>;

/// 面心场
pub type FaceField<T> = Field<T>;

impl<T: Clone> Field<T> {
    /// 以统一值创建
    pub fn uniform(name: impl Into<String>, len: usize, value: T) -> Self {
        Self {
            name: name.into(),
            values: vec![value; len],
        }
    }
}

impl<T> Field<T> {
    /// 由数据创建
    pub fn from_values(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// 场名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 数据切片
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// 可变数据切片
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// 取出底层数据
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// 检查长度与网格单元数一致
    pub fn check_cells<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        self.check_len(mesh.n_cells())
    }

    /// 检查长度与网格面数一致
    pub fn check_faces<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        self.check_len(mesh.n_faces())
    }

    fn check_len(&self, expected: usize) -> SectionalResult<()> {
        if self.values.len() != expected {
            return Err(SectionalError::size_mismatch(
                self.name.clone(),
                expected,
                self.values.len(),
            ));
        }
        Ok(())
    }
}

impl<T> Deref for Field<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> DerefMut for Field<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.values
    }
}

// ============================================================
// 流场
// ============================================================

/// 流场：单元速度与面体积通量
#[derive(Debug, Clone)]
pub struct FlowFields {
    /// 单元速度 U [m/s]
    pub u: CellField<DVec3>,
    /// 面体积通量 phi [m³/s]
    pub phi: FaceField<f64>,
}

impl FlowFields {
    /// 由统一速度构造，phi = U · Sf
    pub fn uniform<M: FvMesh + ?Sized>(mesh: &M, velocity: DVec3) -> Self {
        let phi = (0..mesh.n_faces())
            .map(|f| velocity.dot(mesh.face_area_vector(f)))
            .collect();
        Self {
            u: CellField::uniform("U", mesh.n_cells(), velocity),
            phi: FaceField::from_values("phi", phi),
        }
    }

    /// 检查与网格一致
    pub fn check<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        self.u.check_cells(mesh)?;
        self.phi.check_faces(mesh)
    }
}

// ============================================================
// 热物性
// ============================================================

/// 单个单元的热物性
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellProperties {
    /// 连续相密度 [kg/m³]
    pub rho_continuous: f64,
    /// 分散相（液滴）密度 [kg/m³]
    pub rho_dispersed: f64,
    /// 连续相动力粘度 [Pa·s]
    pub mu: f64,
    /// 气体分子平均自由程 [m]
    pub mean_free_path: f64,
}

impl CellProperties {
    /// 20°C 常压空气中的水滴
    pub fn water_in_air() -> Self {
        Self {
            rho_continuous: 1.205,
            rho_dispersed: 998.2,
            mu: 1.81e-5,
            mean_free_path: 6.8e-8,
        }
    }
}

/// 漂移闭合所需的单元热物性场
#[derive(Debug, Clone)]
pub struct ThermoFields {
    /// 连续相密度 [kg/m³]
    pub rho_continuous: CellField<f64>,
    /// 分散相密度 [kg/m³]
    pub rho_dispersed: CellField<f64>,
    /// 连续相动力粘度 [Pa·s]
    pub mu: CellField<f64>,
    /// 平均自由程 [m]
    pub mean_free_path: CellField<f64>,
}

impl ThermoFields {
    /// 所有单元取相同物性
    pub fn uniform(n_cells: usize, props: CellProperties) -> Self {
        Self {
            rho_continuous: CellField::uniform("rhoCont", n_cells, props.rho_continuous),
            rho_dispersed: CellField::uniform("rhoDisp", n_cells, props.rho_dispersed),
            mu: CellField::uniform("mu", n_cells, props.mu),
            mean_free_path: CellField::uniform("lambda", n_cells, props.mean_free_path),
        }
    }

    /// 单元数
    pub fn n_cells(&self) -> usize {
        self.rho_continuous.len()
    }

    /// 读取单元物性
    #[inline]
    pub fn cell(&self, cell: usize) -> CellProperties {
        CellProperties {
            rho_continuous: self.rho_continuous[cell],
            rho_dispersed: self.rho_dispersed[cell],
            mu: self.mu[cell],
            mean_free_path: self.mean_free_path[cell],
        }
    }

    /// 检查所有物性场长度一致
    pub fn check_len(&self, n_cells: usize) -> SectionalResult<()> {
        for field in [
            &self.rho_continuous,
            &self.rho_dispersed,
            &self.mu,
            &self.mean_free_path,
        ] {
            if field.len() != n_cells {
                return Err(SectionalError::size_mismatch(
                    field.name().to_string(),
                    n_cells,
                    field.len(),
                ));
            }
        }
        Ok(())
    }

    /// 检查与网格一致
    pub fn check<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        self.check_len(mesh.n_cells())
    }
}
