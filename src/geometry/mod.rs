//! Geometric predicates on reference cells.
//!
//! - [`inclusion`]: tolerance-aware containment tests in reference coordinates
//! - [`inverse_map`]: Newton inversion of a geometric map
//! - [`tolerance`]: validated tolerance and per-call options

pub mod inclusion;
pub mod inverse_map;
pub mod tolerance;

pub use inclusion::{InclusionResult, check_point_inclusion, reference_margin};
pub use inverse_map::invert_map;
pub use tolerance::{LocateOptions, Tolerance};
