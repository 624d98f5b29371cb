//! Catalogue of reference-cell shapes: a topology family plus a node count.
//!
//! # Node ordering
//! Reference nodes are listed corners first, then edge midpoints in edge order,
//! then face centers, then the interior node:
//!
//! - **Line**: `[-1, 1]`, then the midpoint.
//! - **Triangle**: `(0,0) (1,0) (0,1)`, edges `01 12 20`.
//! - **Quadrilateral**: counter-clockwise from `(-1,-1)`, edges `01 12 23 30`, center.
//! - **Tetrahedron**: origin and unit axes, edges `01 12 20 03 13 23`, center.
//! - **Hexahedron**: bottom face `[0, 1, 2, 3]` at `z = -1`, top face `[4, 5, 6, 7]`,
//!   bottom edges, vertical edges, top edges, then the center and the face
//!   centers `z-, z+, x-, x+, y-, y+`.
//! - **Wedge**: bottom triangle `[0, 1, 2]` at `z = -1`, top triangle `[3, 4, 5]`,
//!   bottom edges, vertical edges, top edges, then the quad face centers.
//! - **Pyramid**: base quad `[0, 1, 2, 3]` at `z = 0`, apex `4`, base edges,
//!   lateral edges, then the base center.
//!
//! Coordinates are always stored as `[f64; 3]`; components past the shape's
//! dimension are zero.

use crate::locate_error::LocateError;
use crate::topology::cell_type::CellType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A point in reference coordinates, zero-padded to three components.
pub type ReferencePoint = [f64; 3];
/// A point in physical coordinates, zero-padded to three components.
pub type PhysicalPoint = [f64; 3];

/// A concrete reference cell: topology family and node count.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CellShape {
    Line2,
    Line3,
    Triangle3,
    Triangle4,
    Triangle6,
    Quadrilateral4,
    /// Serendipity quadrilateral.
    Quadrilateral8,
    Quadrilateral9,
    Tetrahedron4,
    Tetrahedron10,
    Tetrahedron11,
    Hexahedron8,
    /// Serendipity hexahedron.
    Hexahedron20,
    Hexahedron27,
    Wedge6,
    /// Serendipity wedge.
    Wedge15,
    Wedge18,
    Pyramid5,
    /// Serendipity pyramid.
    Pyramid13,
    Pyramid14,
}

impl CellShape {
    /// Every catalogued shape.
    pub const ALL: [CellShape; 20] = [
        CellShape::Line2,
        CellShape::Line3,
        CellShape::Triangle3,
        CellShape::Triangle4,
        CellShape::Triangle6,
        CellShape::Quadrilateral4,
        CellShape::Quadrilateral8,
        CellShape::Quadrilateral9,
        CellShape::Tetrahedron4,
        CellShape::Tetrahedron10,
        CellShape::Tetrahedron11,
        CellShape::Hexahedron8,
        CellShape::Hexahedron20,
        CellShape::Hexahedron27,
        CellShape::Wedge6,
        CellShape::Wedge15,
        CellShape::Wedge18,
        CellShape::Pyramid5,
        CellShape::Pyramid13,
        CellShape::Pyramid14,
    ];

    /// Look up the shape for a family and node count.
    pub fn new(cell_type: CellType, node_count: usize) -> Result<Self, LocateError> {
        CellShape::ALL
            .into_iter()
            .find(|s| s.cell_type() == cell_type && s.node_count() == node_count)
            .ok_or(LocateError::UnknownShape {
                cell_type,
                node_count,
            })
    }

    /// The topology family.
    pub fn cell_type(self) -> CellType {
        use CellShape::*;
        match self {
            Line2 | Line3 => CellType::Line,
            Triangle3 | Triangle4 | Triangle6 => CellType::Triangle,
            Quadrilateral4 | Quadrilateral8 | Quadrilateral9 => CellType::Quadrilateral,
            Tetrahedron4 | Tetrahedron10 | Tetrahedron11 => CellType::Tetrahedron,
            Hexahedron8 | Hexahedron20 | Hexahedron27 => CellType::Hexahedron,
            Wedge6 | Wedge15 | Wedge18 => CellType::Wedge,
            Pyramid5 | Pyramid13 | Pyramid14 => CellType::Pyramid,
        }
    }

    /// Number of nodes of the shape.
    pub fn node_count(self) -> usize {
        self.reference_nodes().len()
    }

    /// Reference dimension.
    pub fn dimension(self) -> usize {
        self.cell_type().dimension()
    }

    /// Number of corner vertices.
    pub fn vertex_count(self) -> usize {
        self.cell_type().vertex_count()
    }

    /// Stable integer key: family id in the high bits, node count in the low byte.
    pub fn key(self) -> u32 {
        (self.cell_type().family_id() << 8) | self.node_count() as u32
    }

    /// Inverse of [`CellShape::key`].
    pub fn from_key(key: u32) -> Option<Self> {
        SHAPES_BY_KEY.get(&key).copied()
    }

    /// Name in the usual `Family<nodes>` form, e.g. `Hexahedron<27>`.
    pub fn name(self) -> String {
        format!("{}<{}>", self.cell_type().name(), self.node_count())
    }

    /// Reference-domain centroid.
    pub fn reference_center(self) -> ReferencePoint {
        self.cell_type().reference_center()
    }

    /// Nodal reference coordinates, in catalogue node order.
    pub fn reference_nodes(self) -> &'static [ReferencePoint] {
        use CellShape::*;
        match self {
            Line2 => &LINE_NODES[..2],
            Line3 => &LINE_NODES,
            Triangle3 => &TRIANGLE_NODES[..3],
            Triangle4 => &TRIANGLE4_NODES,
            Triangle6 => &TRIANGLE_NODES,
            Quadrilateral4 => &QUAD_NODES[..4],
            Quadrilateral8 => &QUAD_NODES[..8],
            Quadrilateral9 => &QUAD_NODES,
            Tetrahedron4 => &TET_NODES[..4],
            Tetrahedron10 => &TET_NODES[..10],
            Tetrahedron11 => &TET_NODES,
            Hexahedron8 => &HEX_NODES[..8],
            Hexahedron20 => &HEX_NODES[..20],
            Hexahedron27 => &HEX_NODES,
            Wedge6 => &WEDGE_NODES[..6],
            Wedge15 => &WEDGE_NODES[..15],
            Wedge18 => &WEDGE_NODES,
            Pyramid5 => &PYRAMID_NODES[..5],
            Pyramid13 => &PYRAMID_NODES[..13],
            Pyramid14 => &PYRAMID_NODES,
        }
    }

    /// Whether a geometric map (basis) is available for this shape.
    pub fn has_geometric_map(self) -> bool {
        !matches!(
            self,
            CellShape::Triangle4 | CellShape::Tetrahedron11 | CellShape::Pyramid14
        )
    }

    /// Pad a coordinate row of length [`CellShape::dimension`] to three components.
    pub fn pad_point(self, coords: &[f64]) -> Result<ReferencePoint, LocateError> {
        let dim = self.dimension();
        if coords.len() != dim {
            return Err(LocateError::PointDimensionMismatch {
                shape: self,
                expected: dim,
                found: coords.len(),
            });
        }
        let mut out = [0.0; 3];
        out[..dim].copy_from_slice(coords);
        Ok(out)
    }
}

static SHAPES_BY_KEY: Lazy<BTreeMap<u32, CellShape>> =
    Lazy::new(|| CellShape::ALL.into_iter().map(|s| (s.key(), s)).collect());

impl std::fmt::Display for CellShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

const LINE_NODES: [ReferencePoint; 3] = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];

const TRIANGLE_NODES: [ReferencePoint; 6] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
];

const TRIANGLE4_NODES: [ReferencePoint; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0 / 3.0, 1.0 / 3.0, 0.0],
];

const QUAD_NODES: [ReferencePoint; 9] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
];

const TET_NODES: [ReferencePoint; 11] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
    [0.25, 0.25, 0.25],
];

pub(crate) const HEX_NODES: [ReferencePoint; 27] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [0.0, -1.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0],
    [0.0, 0.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];

const WEDGE_NODES: [ReferencePoint; 18] = [
    [0.0, 0.0, -1.0],
    [1.0, 0.0, -1.0],
    [0.0, 1.0, -1.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.5, 0.0, -1.0],
    [0.5, 0.5, -1.0],
    [0.0, 0.5, -1.0],
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.5, 0.0, 1.0],
    [0.5, 0.5, 1.0],
    [0.0, 0.5, 1.0],
    [0.5, 0.0, 0.0],
    [0.5, 0.5, 0.0],
    [0.0, 0.5, 0.0],
];

const PYRAMID_NODES: [ReferencePoint; 14] = [
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.0, 0.0, 0.0],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_round_trip() {
        let mut keys: Vec<u32> = CellShape::ALL.iter().map(|s| s.key()).collect();
        for shape in CellShape::ALL {
            assert_eq!(CellShape::from_key(shape.key()), Some(shape));
        }
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), CellShape::ALL.len());
        assert_eq!(CellShape::from_key(0), None);
        assert_eq!(CellShape::from_key((5 << 8) | 9), None);
    }

    #[test]
    fn node_counts_match_names() {
        assert_eq!(CellShape::Hexahedron27.node_count(), 27);
        assert_eq!(CellShape::Pyramid13.node_count(), 13);
        assert_eq!(CellShape::Triangle4.node_count(), 4);
        assert_eq!(CellShape::Wedge15.name(), "Wedge<15>");
    }

    #[test]
    fn corners_lead_every_node_list() {
        for shape in CellShape::ALL {
            let first = CellShape::new(shape.cell_type(), shape.vertex_count())
                .expect("linear shape is catalogued");
            assert_eq!(
                &shape.reference_nodes()[..shape.vertex_count()],
                first.reference_nodes(),
                "{shape}"
            );
        }
    }

    #[test]
    fn unknown_pair_is_rejected() {
        let err = CellShape::new(CellType::Hexahedron, 9).unwrap_err();
        assert!(matches!(err, LocateError::UnknownShape { node_count: 9, .. }));
    }

    #[test]
    fn pad_point_checks_length() {
        assert_eq!(
            CellShape::Triangle3.pad_point(&[0.2, 0.3]).unwrap(),
            [0.2, 0.3, 0.0]
        );
        assert!(matches!(
            CellShape::Triangle3.pad_point(&[0.2]),
            Err(LocateError::PointDimensionMismatch { expected: 2, found: 1, .. })
        ));
    }
}
