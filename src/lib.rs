#![cfg_attr(docsrs, feature(doc_cfg))]
//! # cell-locator
//!
//! cell-locator decides whether points lie inside finite-element cells. It
//! covers the standard reference shapes (line, triangle, quadrilateral,
//! tetrahedron, hexahedron, wedge, pyramid) in linear, quadratic and
//! serendipity node layouts.
//!
//! ## Features
//! - Tolerance-aware reference-space inclusion with a tri-state result
//!   (inside, on boundary, outside)
//! - Isoparametric geometric maps for every supported node layout
//! - Newton inversion of curved maps, with least squares for cells embedded in
//!   a higher-dimensional space
//! - Batch classification of physical points against a shared cell or one cell
//!   per point
//! - Optional `rayon` feature for data-parallel batches
//!
//! ## Usage
//!
//! ```
//! use cell_locator::prelude::*;
//!
//! let nodes = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
//! let results = check_physical_inclusion(
//!     CellShape::Triangle3,
//!     &[[0.5, 0.5, 0.0], [3.0, 3.0, 0.0]],
//!     CellNodes::Shared(&nodes),
//!     &LocateOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(results, vec![InclusionResult::Inside, InclusionResult::Outside]);
//! ```
//!
//! ## Failure handling
//!
//! Structural problems (a shape without a geometric map, the wrong number of
//! nodes, invalid options) fail the whole call with a [`LocateError`]. A point
//! whose inverse map does not converge is classified `Outside` and the rest of
//! the batch is unaffected.
//!
//! [`LocateError`]: crate::locate_error::LocateError

pub mod algs;
pub mod discretization;
pub mod geometry;
pub mod locate_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::locate::{
        CellNodes, ClassificationSummary, check_physical_inclusion, check_reference_inclusion,
        check_reference_inclusion_rows, classify_physical_point, classify_reference_point,
        contained_mask,
    };
    pub use crate::discretization::basis::Basis;
    pub use crate::discretization::geometric_map::{
        GeometricMap, ReferenceMap, map_reference_nodes,
    };
    pub use crate::geometry::inclusion::{InclusionResult, check_point_inclusion};
    pub use crate::geometry::inverse_map::invert_map;
    pub use crate::geometry::tolerance::{LocateOptions, Tolerance};
    pub use crate::locate_error::{InversionFailure, LocateError};
    pub use crate::topology::cell_shape::{CellShape, PhysicalPoint, ReferencePoint};
    pub use crate::topology::cell_type::CellType;
}
