//! Nodal bases and the isoparametric geometric map built from them.

pub mod basis;
pub mod geometric_map;

pub use basis::{Basis, BasisTabulation, ShapeFunctions};
pub use geometric_map::{GeometricMap, Jacobian, ReferenceMap, map_reference_nodes};
