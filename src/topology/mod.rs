//! Reference cell topology.
//!
//! [`CellType`] names a cell family; [`CellShape`] pins a family to a node
//! count and carries the reference node layout used by the geometric map.

pub mod cell_shape;
pub mod cell_type;

pub use cell_shape::{CellShape, PhysicalPoint, ReferencePoint};
pub use cell_type::CellType;
