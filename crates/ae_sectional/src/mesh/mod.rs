// crates/ae_sectional/src/mesh/mod.rs

//! 有限体积网格访问接口
//!
//! 网格由外部有限体积框架提供，分段核心只通过 [`FvMesh`] 只读访问。
//!
//! # 约定
//!
//! - 面索引 `0..n_internal_faces()` 为内部面，其后为边界面
//! - 面积矢量 `Sf` 从 owner 单元指向 neighbor 单元（边界面指向域外），模长为面积
//! - 所有实现必须 `Send + Sync`，以便在 rayon 并行迭代器中共享

pub mod box_mesh;

pub use box_mesh::BoxMesh;

use glam::DVec3;

/// 有限体积网格只读接口
pub trait FvMesh: Send + Sync {
    /// 单元总数
    fn n_cells(&self) -> usize;

    /// 面总数（内部面 + 边界面）
    fn n_faces(&self) -> usize;

    /// 内部面数量
    fn n_internal_faces(&self) -> usize;

    /// 边界面数量
    #[inline]
    fn n_boundary_faces(&self) -> usize {
        self.n_faces() - self.n_internal_faces()
    }

    /// 面的 owner 单元
    fn face_owner(&self, face: usize) -> usize;

    /// 面的 neighbor 单元（边界面返回 None）
    fn face_neighbor(&self, face: usize) -> Option<usize>;

    /// 面积矢量 Sf
    fn face_area_vector(&self, face: usize) -> DVec3;

    /// 面积 |Sf|
    #[inline]
    fn face_area(&self, face: usize) -> f64 {
        self.face_area_vector(face).length()
    }

    /// 线性插值时 owner 单元的权重，边界面为 1
    fn face_interpolation_weight(&self, face: usize) -> f64;

    /// 单元中心
    fn cell_center(&self, cell: usize) -> DVec3;

    /// 单元体积
    fn cell_volume(&self, cell: usize) -> f64;

    /// 是否为边界面
    #[inline]
    fn is_boundary_face(&self, face: usize) -> bool {
        face >= self.n_internal_faces()
    }

    /// 内部面索引范围
    #[inline]
    fn internal_faces(&self) -> std::ops::Range<usize> {
        0..self.n_internal_faces()
    }

    /// 边界面索引范围
    #[inline]
    fn boundary_faces(&self) -> std::ops::Range<usize> {
        self.n_internal_faces()..self.n_faces()
    }
}
