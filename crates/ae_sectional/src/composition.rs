// crates/ae_sectional/src/composition.rs

//! 两相组分
//!
//! 连续相分段质量分数 `Y` 与分散相分段质量分数 `Z`。
//! 组分场由外部热物性子系统拥有，这里只提供容器与求和。

use serde::{Deserialize, Serialize};

use crate::error::SectionalResult;
use crate::fields::CellField;
use crate::mesh::FvMesh;

/// 相类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// 连续相（载气）
    Continuous,
    /// 分散相（液滴）
    Dispersed,
}

impl PhaseKind {
    /// 相名称
    pub fn phase_name(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::Dispersed => "dispersed",
        }
    }
}

/// 两相分段质量分数
#[derive(Debug, Clone, Default)]
pub struct PhaseComposition {
    /// 连续相质量分数 Y
    pub y: Vec<CellField<f64>>,
    /// 分散相质量分数 Z
    pub z: Vec<CellField<f64>>,
}

impl PhaseComposition {
    /// 由场列表创建
    pub fn new(y: Vec<CellField<f64>>, z: Vec<CellField<f64>>) -> Self {
        Self { y, z }
    }

    /// 以统一值创建，名称为 `<prefix>.<i>`
    pub fn uniform(n_cells: usize, n_y: usize, n_z: usize, y0: f64, z0: f64) -> Self {
        Self {
            y: (0..n_y)
                .map(|i| CellField::uniform(format!("Y.{i}"), n_cells, y0))
                .collect(),
            z: (0..n_z)
                .map(|i| CellField::uniform(format!("Z.{i}"), n_cells, z0))
                .collect(),
        }
    }

    /// 指定相的场
    pub fn phase(&self, kind: PhaseKind) -> &[CellField<f64>] {
        match kind {
            PhaseKind::Continuous => &self.y,
            PhaseKind::Dispersed => &self.z,
        }
    }

    /// 连续相场名称
    pub fn y_names(&self) -> Vec<String> {
        self.y.iter().map(|f| f.name().to_string()).collect()
    }

    /// 分散相场名称
    pub fn z_names(&self) -> Vec<String> {
        self.z.iter().map(|f| f.name().to_string()).collect()
    }

    /// 连续相质量分数逐单元求和
    pub fn sum_y(&self) -> Vec<f64> {
        sum_fields(&self.y)
    }

    /// 分散相质量分数逐单元求和
    pub fn sum_z(&self) -> Vec<f64> {
        sum_fields(&self.z)
    }

    /// 检查所有场与网格一致
    pub fn check<M: FvMesh + ?Sized>(&self, mesh: &M) -> SectionalResult<()> {
        for field in self.y.iter().chain(self.z.iter()) {
            field.check_cells(mesh)?;
        }
        Ok(())
    }
}

fn sum_fields(fields: &[CellField<f64>]) -> Vec<f64> {
    let n = fields.first().map_or(0, |f| f.len());
    let mut sum = vec![0.0; n];
    for field in fields {
        for (s, v) in sum.iter_mut().zip(field.iter()) {
            *s += v;
        }
    }
    sum
}
