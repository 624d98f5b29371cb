//! LocateError: unified error type for cell-locator public APIs
//!
//! Structural problems (unknown shapes, malformed node arrays, bad tolerances)
//! are reported once per call, before any per-point work. Per-point numerical
//! failures of the inverse map use [`InversionFailure`] and are folded into the
//! classification result instead of aborting a batch.

use crate::topology::cell_shape::CellShape;
use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for cell-locator operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocateError {
    /// The shape is catalogued but the requested operation has no provider for it.
    #[error("unsupported topology {shape} for {operation}")]
    UnsupportedTopology {
        shape: CellShape,
        operation: &'static str,
    },
    /// No catalogued shape has this family and node count.
    #[error("no {cell_type} shape with {node_count} nodes in the catalogue")]
    UnknownShape {
        cell_type: CellType,
        node_count: usize,
    },
    /// The number of nodes supplied for a cell does not match its shape.
    #[error("node count mismatch for {shape}: expected {expected}, got {found}")]
    NodeCountMismatch {
        shape: CellShape,
        expected: usize,
        found: usize,
    },
    /// One cell per point was requested but the counts differ.
    #[error("cell count mismatch: {points} points but {cells} cells")]
    CellCountMismatch { points: usize, cells: usize },
    /// A coordinate row has the wrong number of components for the shape.
    #[error("point dimension mismatch for {shape}: expected {expected}, got {found}")]
    PointDimensionMismatch {
        shape: CellShape,
        expected: usize,
        found: usize,
    },
    /// A node coordinate is NaN or infinite.
    #[error("non-finite coordinate in node {index}")]
    NonFiniteCoordinate { index: usize },
    /// Tolerances must be finite, positive and small relative to the reference cell.
    #[error("invalid tolerance {0}: expected a finite value in (0, 0.1)")]
    InvalidTolerance(f64),
    /// The Newton iteration budget must be non-zero.
    #[error("invalid iteration limit {0}")]
    InvalidIterationLimit(usize),
}

/// Per-point failure of the inverse geometric map.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InversionFailure {
    /// The iteration budget ran out before the residual dropped below tolerance.
    #[error("inverse map did not converge after {iterations} iterations (residual {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },
    /// The Jacobian could not be inverted at the current iterate.
    #[error("singular Jacobian at iteration {iteration}")]
    SingularJacobian { iteration: usize },
    /// The map produced NaN or infinite values.
    #[error("non-finite map value at iteration {iteration}")]
    NonFinite { iteration: usize },
}
