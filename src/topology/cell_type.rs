//! Cell type metadata for reference cells.

use serde::{Deserialize, Serialize};

/// Topology families with a canonical reference domain.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CellType {
    /// 1D segment on `[-1, 1]`.
    Line,
    /// 2D simplex `x, y >= 0, x + y <= 1`.
    Triangle,
    /// 2D tensor-product cell on `[-1, 1]^2`.
    Quadrilateral,
    /// 3D simplex `x, y, z >= 0, x + y + z <= 1`.
    Tetrahedron,
    /// 3D tensor-product cell on `[-1, 1]^3`.
    Hexahedron,
    /// 3D wedge/prism: reference triangle times `[-1, 1]`.
    Wedge,
    /// 3D pyramid with base `[-1, 1]^2` at `z = 0` and apex at `(0, 0, 1)`.
    Pyramid,
}

impl CellType {
    /// All supported families, in key order.
    pub const ALL: [CellType; 7] = [
        CellType::Line,
        CellType::Triangle,
        CellType::Quadrilateral,
        CellType::Tetrahedron,
        CellType::Hexahedron,
        CellType::Wedge,
        CellType::Pyramid,
    ];

    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> usize {
        match self {
            CellType::Line => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Wedge | CellType::Pyramid => 3,
        }
    }

    /// Number of corner vertices.
    pub fn vertex_count(self) -> usize {
        match self {
            CellType::Line => 2,
            CellType::Triangle => 3,
            CellType::Quadrilateral | CellType::Tetrahedron => 4,
            CellType::Pyramid => 5,
            CellType::Wedge => 6,
            CellType::Hexahedron => 8,
        }
    }

    /// Stable family identifier used to build shape keys.
    pub(crate) fn family_id(self) -> u32 {
        match self {
            CellType::Line => 1,
            CellType::Triangle => 2,
            CellType::Quadrilateral => 3,
            CellType::Tetrahedron => 4,
            CellType::Hexahedron => 5,
            CellType::Wedge => 6,
            CellType::Pyramid => 7,
        }
    }

    /// Human-readable family name.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Line => "Line",
            CellType::Triangle => "Triangle",
            CellType::Quadrilateral => "Quadrilateral",
            CellType::Tetrahedron => "Tetrahedron",
            CellType::Hexahedron => "Hexahedron",
            CellType::Wedge => "Wedge",
            CellType::Pyramid => "Pyramid",
        }
    }

    /// Reference-domain centroid, used as the initial guess for map inversion.
    pub fn reference_center(self) -> [f64; 3] {
        match self {
            CellType::Line | CellType::Quadrilateral | CellType::Hexahedron => [0.0; 3],
            CellType::Triangle => [1.0 / 3.0, 1.0 / 3.0, 0.0],
            CellType::Tetrahedron => [0.25, 0.25, 0.25],
            CellType::Wedge => [1.0 / 3.0, 1.0 / 3.0, 0.0],
            CellType::Pyramid => [0.0, 0.0, 0.25],
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_ids_are_distinct() {
        let mut ids: Vec<u32> = CellType::ALL.iter().map(|ct| ct.family_id()).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn dimensions() {
        assert_eq!(CellType::Line.dimension(), 1);
        assert_eq!(CellType::Quadrilateral.dimension(), 2);
        assert_eq!(CellType::Pyramid.dimension(), 3);
    }
}
