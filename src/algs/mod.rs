//! Re-export public algorithms.

pub mod locate;

pub use locate::{
    CellNodes, ClassificationSummary, check_physical_inclusion, check_reference_inclusion,
    check_reference_inclusion_rows, classify_physical_point, classify_reference_point,
    contained_mask,
};
