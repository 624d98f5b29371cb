//! Geometric maps from reference coordinates to physical space.
//!
//! [`GeometricMap`] is the isoparametric map `x(r) = sum_i N_i(r) x_i` built
//! from a [`Basis`] and the physical coordinates of a cell's nodes. Callers
//! with an analytic map can implement [`ReferenceMap`] directly and hand it to
//! the inverse-map solver.

use crate::discretization::basis::Basis;
use crate::locate_error::LocateError;
use crate::topology::cell_shape::{CellShape, PhysicalPoint, ReferencePoint};

/// Jacobian of a map, `jac[physical][reference]`; unused rows/columns are zero.
pub type Jacobian = [[f64; 3]; 3];

/// A map from a reference cell into physical space.
pub trait ReferenceMap {
    /// The reference cell the map is defined on.
    fn shape(&self) -> CellShape;

    /// Number of reference coordinates.
    fn reference_dimension(&self) -> usize {
        self.shape().dimension()
    }

    /// Number of physical coordinates the image lives in.
    fn physical_dimension(&self) -> usize;

    /// Magnitude of the physical coordinates, at least 1.
    ///
    /// The inverse map accepts residuals below `tolerance * coordinate_scale()`,
    /// so the threshold tracks the round-off of evaluating the map.
    fn coordinate_scale(&self) -> f64 {
        1.0
    }

    /// Physical position of a reference point.
    fn forward(&self, reference: &ReferencePoint) -> PhysicalPoint;

    /// Derivative of [`ReferenceMap::forward`] with respect to the reference coordinates.
    fn jacobian(&self, reference: &ReferencePoint) -> Jacobian;

    /// Position and Jacobian together; override when they share work.
    fn forward_and_jacobian(&self, reference: &ReferencePoint) -> (PhysicalPoint, Jacobian) {
        (self.forward(reference), self.jacobian(reference))
    }
}

/// Isoparametric map of one concrete cell.
#[derive(Clone, Debug)]
pub struct GeometricMap<'a> {
    basis: Basis,
    nodes: &'a [PhysicalPoint],
    physical_dimension: usize,
    coordinate_scale: f64,
}

impl<'a> GeometricMap<'a> {
    /// Build the map for `shape` over the given physical node coordinates.
    ///
    /// Fails for shapes without a basis, for a node count that does not match
    /// the shape, and for non-finite coordinates.
    pub fn new(shape: CellShape, nodes: &'a [PhysicalPoint]) -> Result<Self, LocateError> {
        let basis = Basis::from_shape(shape)?;
        let expected = basis.num_nodes();
        if nodes.len() != expected {
            return Err(LocateError::NodeCountMismatch {
                shape,
                expected,
                found: nodes.len(),
            });
        }
        if let Some(index) = nodes
            .iter()
            .position(|n| n.iter().any(|c| !c.is_finite()))
        {
            return Err(LocateError::NonFiniteCoordinate { index });
        }
        let embedded = nodes
            .iter()
            .filter_map(|n| n.iter().rposition(|&c| c != 0.0))
            .max()
            .map_or(0, |d| d + 1);
        let coordinate_scale = nodes
            .iter()
            .flatten()
            .fold(1.0, |acc: f64, c| acc.max(c.abs()));
        Ok(Self {
            basis,
            nodes,
            physical_dimension: shape.dimension().max(embedded),
            coordinate_scale,
        })
    }

    /// The basis backing the map.
    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Physical node coordinates.
    pub fn nodes(&self) -> &[PhysicalPoint] {
        self.nodes
    }
}

impl ReferenceMap for GeometricMap<'_> {
    fn shape(&self) -> CellShape {
        self.basis.cell_shape()
    }

    fn physical_dimension(&self) -> usize {
        self.physical_dimension
    }

    fn coordinate_scale(&self) -> f64 {
        self.coordinate_scale
    }

    fn forward(&self, reference: &ReferencePoint) -> PhysicalPoint {
        self.forward_and_jacobian(reference).0
    }

    fn jacobian(&self, reference: &ReferencePoint) -> Jacobian {
        self.forward_and_jacobian(reference).1
    }

    fn forward_and_jacobian(&self, reference: &ReferencePoint) -> (PhysicalPoint, Jacobian) {
        let sf = self.basis.evaluate(reference);
        let mut x = [0.0; 3];
        let mut jac = [[0.0; 3]; 3];
        for ((node, value), grad) in self
            .nodes
            .iter()
            .zip(sf.values())
            .zip(sf.gradients())
        {
            for phys_dim in 0..3 {
                x[phys_dim] += value * node[phys_dim];
                for ref_dim in 0..3 {
                    jac[phys_dim][ref_dim] += node[phys_dim] * grad[ref_dim];
                }
            }
        }
        (x, jac)
    }
}

/// Physical nodes of a cell obtained by pushing the shape's reference nodes through `f`.
pub fn map_reference_nodes<F>(shape: CellShape, f: F) -> Vec<PhysicalPoint>
where
    F: FnMut(&ReferencePoint) -> PhysicalPoint,
{
    shape.reference_nodes().iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn affine(r: &ReferencePoint) -> PhysicalPoint {
        [
            2.0 + 3.0 * r[0] + 2.0 * r[1] + 4.0 * r[2],
            -2.0 + 2.0 * r[0] + 5.0 * r[1] + 4.0 * r[2],
            -3.0 + 2.0 * r[0] + r[1] + 3.0 * r[2],
        ]
    }

    #[test]
    fn affine_map_is_reproduced_for_volume_shapes() {
        let r = [0.1, 0.2, 0.3];
        for shape in [
            CellShape::Tetrahedron4,
            CellShape::Hexahedron20,
            CellShape::Wedge15,
            CellShape::Pyramid13,
        ] {
            let nodes = map_reference_nodes(shape, affine);
            let map = GeometricMap::new(shape, &nodes).unwrap();
            let x = map.forward(&r);
            let expected = affine(&r);
            let jac = map.jacobian(&r);
            for d in 0..3 {
                assert!((x[d] - expected[d]).abs() < 1e-12, "{shape}");
            }
            assert!((jac[0][2] - 4.0).abs() < 1e-12, "{shape}");
            assert!((jac[2][0] - 2.0).abs() < 1e-12, "{shape}");
            assert_eq!(map.physical_dimension(), 3);
        }
    }

    #[test]
    fn planar_cells_report_their_embedding() {
        let nodes = map_reference_nodes(CellShape::Triangle3, |r| [r[0], r[1], 0.0]);
        let flat = GeometricMap::new(CellShape::Triangle3, &nodes).unwrap();
        assert_eq!(flat.physical_dimension(), 2);

        let nodes = map_reference_nodes(CellShape::Triangle3, |r| [r[0], r[1], r[0] + r[1]]);
        let tilted = GeometricMap::new(CellShape::Triangle3, &nodes).unwrap();
        assert_eq!(tilted.physical_dimension(), 3);
    }

    #[test]
    fn coordinate_scale_is_largest_magnitude_with_floor() {
        let nodes =
            map_reference_nodes(CellShape::Quadrilateral4, |r| [0.1 * r[0], 0.1 * r[1], 0.0]);
        let small = GeometricMap::new(CellShape::Quadrilateral4, &nodes).unwrap();
        assert_eq!(small.coordinate_scale(), 1.0);

        let nodes = map_reference_nodes(CellShape::Quadrilateral4, |r| [r[0] - 40.0, r[1], 0.0]);
        let far = GeometricMap::new(CellShape::Quadrilateral4, &nodes).unwrap();
        assert_eq!(far.coordinate_scale(), 41.0);
    }

    #[test]
    fn construction_validates_nodes() {
        let nodes = vec![[0.0; 3]; 3];
        assert!(matches!(
            GeometricMap::new(CellShape::Quadrilateral4, &nodes),
            Err(LocateError::NodeCountMismatch { expected: 4, found: 3, .. })
        ));
        let mut nodes = map_reference_nodes(CellShape::Line2, |r| *r);
        nodes[1][0] = f64::NAN;
        assert!(matches!(
            GeometricMap::new(CellShape::Line2, &nodes),
            Err(LocateError::NonFiniteCoordinate { index: 1 })
        ));
        let nodes = map_reference_nodes(CellShape::Pyramid14, |r| *r);
        assert!(matches!(
            GeometricMap::new(CellShape::Pyramid14, &nodes),
            Err(LocateError::UnsupportedTopology { .. })
        ));
    }
}
