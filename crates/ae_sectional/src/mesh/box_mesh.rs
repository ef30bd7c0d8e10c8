// crates/ae_sectional/src/mesh/box_mesh.rs

//! 均匀笛卡尔块网格
//!
//! `nx × ny × nz` 个六面体单元，用于测试和小规模演示。
//! 面的排列顺序：x 向内部面、y 向内部面、z 向内部面，
//! 随后是 `xMin`、`xMax`、`yMin`、`yMax`、`zMin`、`zMax` 六个边界片。

use ae_foundation::{AeError, AeResult};
use glam::DVec3;
use std::ops::Range;

use super::FvMesh;

/// 边界片名称，顺序与面编号一致
pub const PATCH_NAMES: [&str; 6] = ["xMin", "xMax", "yMin", "yMax", "zMin", "zMax"];

/// 均匀笛卡尔块网格
#[derive(Debug, Clone)]
pub struct BoxMesh {
    dims: [usize; 3],
    spacing: DVec3,
    n_internal: usize,
    owner: Vec<usize>,
    neighbor: Vec<Option<usize>>,
    sf: Vec<DVec3>,
    face_center: Vec<DVec3>,
    weight: Vec<f64>,
    patches: Vec<(String, Range<usize>)>,
}

impl BoxMesh {
    /// 创建块网格
    ///
    /// # 参数
    /// - `dims`: 各方向单元数 `[nx, ny, nz]`
    /// - `spacing`: 各方向单元尺寸 [m]
    pub fn new(dims: [usize; 3], spacing: DVec3) -> AeResult<Self> {
        if dims.iter().any(|&n| n == 0) {
            return Err(AeError::invalid_input(format!("块网格单元数必须 ≥ 1: {dims:?}")));
        }
        if !(spacing.is_finite() && spacing.min_element() > 0.0) {
            return Err(AeError::invalid_input(format!("块网格尺寸必须为正: {spacing}")));
        }

        let mut mesh = Self {
            dims,
            spacing,
            n_internal: 0,
            owner: Vec::new(),
            neighbor: Vec::new(),
            sf: Vec::new(),
            face_center: Vec::new(),
            weight: Vec::new(),
            patches: Vec::with_capacity(6),
        };
        mesh.build_faces();
        Ok(mesh)
    }

    /// 单位立方体内的 `n × n × n` 网格
    pub fn unit_cube(n: usize) -> AeResult<Self> {
        let h = 1.0 / n.max(1) as f64;
        Self::new([n, n, n], DVec3::splat(h))
    }

    /// 各方向单元数
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// 单元线性索引
    #[inline]
    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dims[0] * (j + self.dims[1] * k)
    }

    /// 按名称获取边界片的面索引范围
    pub fn patch(&self, name: &str) -> Option<Range<usize>> {
        self.patches
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.clone())
    }

    /// 所有边界片
    pub fn patches(&self) -> impl Iterator<Item = (&str, Range<usize>)> + '_ {
        self.patches.iter().map(|(n, r)| (n.as_str(), r.clone()))
    }

    /// 面中心
    pub fn face_center(&self, face: usize) -> DVec3 {
        self.face_center[face]
    }

    fn axis_area(&self, axis: usize) -> f64 {
        match axis {
            0 => self.spacing.y * self.spacing.z,
            1 => self.spacing.x * self.spacing.z,
            _ => self.spacing.x * self.spacing.y,
        }
    }

    fn push_face(&mut self, owner: usize, neighbor: Option<usize>, sf: DVec3) {
        let co = self.cell_center(owner);
        let unit = sf.normalize_or_zero();
        let half = 0.5 * self.spacing.dot(unit.abs());
        self.owner.push(owner);
        self.neighbor.push(neighbor);
        self.sf.push(sf);
        self.face_center.push(co + unit * half);
        // 均匀网格上两侧距离相等
        self.weight.push(if neighbor.is_some() { 0.5 } else { 1.0 });
    }

    fn build_faces(&mut self) {
        let [nx, ny, nz] = self.dims;
        let axes = [DVec3::X, DVec3::Y, DVec3::Z];

        // 内部面
        for axis in 0..3 {
            let area = self.axis_area(axis);
            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        let idx = [i, j, k];
                        if idx[axis] + 1 >= self.dims[axis] {
                            continue;
                        }
                        let mut n_idx = idx;
                        n_idx[axis] += 1;
                        let owner = self.cell_index(i, j, k);
                        let neighbor = self.cell_index(n_idx[0], n_idx[1], n_idx[2]);
                        self.push_face(owner, Some(neighbor), axes[axis] * area);
                    }
                }
            }
        }
        self.n_internal = self.owner.len();

        // 边界面
        for (p, name) in PATCH_NAMES.iter().enumerate() {
            let axis = p / 2;
            let upper = p % 2 == 1;
            let area = self.axis_area(axis);
            let sign = if upper { 1.0 } else { -1.0 };
            let start = self.owner.len();
            for k in 0..nz {
                for j in 0..ny {
                    for i in 0..nx {
                        let idx = [i, j, k];
                        let on_patch = if upper {
                            idx[axis] + 1 == self.dims[axis]
                        } else {
                            idx[axis] == 0
                        };
                        if on_patch {
                            let owner = self.cell_index(i, j, k);
                            self.push_face(owner, None, axes[axis] * (sign * area));
                        }
                    }
                }
            }
            self.patches.push((name.to_string(), start..self.owner.len()));
        }
    }
}

impl FvMesh for BoxMesh {
    fn n_cells(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    fn n_faces(&self) -> usize {
        self.owner.len()
    }

    fn n_internal_faces(&self) -> usize {
        self.n_internal
    }

    fn face_owner(&self, face: usize) -> usize {
        self.owner[face]
    }

    fn face_neighbor(&self, face: usize) -> Option<usize> {
        self.neighbor[face]
    }

    fn face_area_vector(&self, face: usize) -> DVec3 {
        self.sf[face]
    }

    fn face_interpolation_weight(&self, face: usize) -> f64 {
        self.weight[face]
    }

    fn cell_center(&self, cell: usize) -> DVec3 {
        let nx = self.dims[0];
        let ny = self.dims[1];
        let i = cell % nx;
        let j = (cell / nx) % ny;
        let k = cell / (nx * ny);
        DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5) * self.spacing
    }

    fn cell_volume(&self, _cell: usize) -> f64 {
        self.spacing.x * self.spacing.y * self.spacing.z
    }
}
