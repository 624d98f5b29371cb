//! Reference-domain inclusion predicates, one per topology family.
//!
//! Each predicate reduces the domain to a set of constraints `g_k(x) >= 0` and
//! reports the smallest one as a signed margin. A margin above the tolerance
//! is [`InclusionResult::Inside`], a margin in `[-tol, tol]` is
//! [`InclusionResult::OnBoundary`], anything below (including NaN) is
//! [`InclusionResult::Outside`].
//!
//! | Family        | Constraints                                                   |
//! |---------------|---------------------------------------------------------------|
//! | Line          | `1 - |x|`                                                     |
//! | Triangle      | `x`, `y`, `1 - x - y`                                         |
//! | Quadrilateral | `1 - |x|`, `1 - |y|`                                          |
//! | Tetrahedron   | `x`, `y`, `z`, `1 - x - y - z`                                |
//! | Hexahedron    | `1 - |x|`, `1 - |y|`, `1 - |z|`                               |
//! | Wedge         | triangle on `(x, y)` and `1 - |z|`                            |
//! | Pyramid       | `z`, `1 - z`, `1 - z' - |x|`, `1 - z' - |y|`                  |
//!
//! For the pyramid, `z'` is `z` clamped to `1 - tol` when `z` lies within `tol`
//! of the apex height.

use crate::geometry::tolerance::Tolerance;
use crate::topology::cell_shape::{CellShape, ReferencePoint};
use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

/// Outcome of a containment query for one point.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum InclusionResult {
    /// Strictly inside, farther than the tolerance from the boundary.
    Inside,
    /// Within the tolerance of the boundary, on either side.
    OnBoundary,
    /// Outside the domain, or the point could not be located.
    Outside,
}

impl InclusionResult {
    /// Classify a signed constraint margin.
    pub fn from_margin(margin: f64, tolerance: Tolerance) -> Self {
        let tol = tolerance.value();
        if margin > tol {
            InclusionResult::Inside
        } else if margin >= -tol {
            InclusionResult::OnBoundary
        } else {
            InclusionResult::Outside
        }
    }

    /// Boolean view: boundary points count as contained.
    #[inline]
    pub fn is_contained(self) -> bool {
        !matches!(self, InclusionResult::Outside)
    }
}

/// Signed margin of `point` with respect to the reference domain of `cell_type`.
///
/// Positive inside, negative outside, NaN for NaN input.
pub fn reference_margin(cell_type: CellType, point: &ReferencePoint, tolerance: Tolerance) -> f64 {
    match cell_type {
        CellType::Line => line_margin(point[0]),
        CellType::Triangle => triangle_margin(point[0], point[1]),
        CellType::Quadrilateral => min_nan(line_margin(point[0]), line_margin(point[1])),
        CellType::Tetrahedron => tetrahedron_margin(point),
        CellType::Hexahedron => min_nan(
            min_nan(line_margin(point[0]), line_margin(point[1])),
            line_margin(point[2]),
        ),
        CellType::Wedge => min_nan(triangle_margin(point[0], point[1]), line_margin(point[2])),
        CellType::Pyramid => pyramid_margin(point, tolerance.value()),
    }
}

/// Inclusion test for a single reference point.
pub fn check_point_inclusion(
    shape: CellShape,
    point: &ReferencePoint,
    tolerance: Tolerance,
) -> InclusionResult {
    let margin = reference_margin(shape.cell_type(), point, tolerance);
    InclusionResult::from_margin(margin, tolerance)
}

#[inline]
fn line_margin(x: f64) -> f64 {
    1.0 - x.abs()
}

// NaN must win, so fold with a comparison that propagates it.
#[inline]
fn min_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn triangle_margin(x: f64, y: f64) -> f64 {
    min_nan(min_nan(x, y), 1.0 - x - y)
}

fn tetrahedron_margin(p: &ReferencePoint) -> f64 {
    let [x, y, z] = *p;
    min_nan(min_nan(x, y), min_nan(z, 1.0 - x - y - z))
}

fn pyramid_margin(p: &ReferencePoint, tol: f64) -> f64 {
    let [x, y, z] = *p;
    let zc = if (1.0 - z).abs() <= tol { 1.0 - tol } else { z };
    let lateral = min_nan(1.0 - zc - x.abs(), 1.0 - zc - y.abs());
    min_nan(min_nan(z, 1.0 - z), lateral)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol(v: f64) -> Tolerance {
        Tolerance::new(v).unwrap()
    }

    #[test]
    fn margin_bands() {
        let t = tol(1e-6);
        assert_eq!(InclusionResult::from_margin(0.1, t), InclusionResult::Inside);
        assert_eq!(InclusionResult::from_margin(5e-7, t), InclusionResult::OnBoundary);
        assert_eq!(InclusionResult::from_margin(-5e-7, t), InclusionResult::OnBoundary);
        assert_eq!(InclusionResult::from_margin(-2e-6, t), InclusionResult::Outside);
        assert_eq!(InclusionResult::from_margin(f64::NAN, t), InclusionResult::Outside);
    }

    #[test]
    fn wedge_combines_triangle_and_line() {
        let t = tol(1e-9);
        let inside = check_point_inclusion(CellShape::Wedge6, &[0.2, 0.2, 0.9], t);
        let above = check_point_inclusion(CellShape::Wedge6, &[0.2, 0.2, 1.1], t);
        let beside = check_point_inclusion(CellShape::Wedge6, &[0.7, 0.7, 0.0], t);
        assert_eq!(inside, InclusionResult::Inside);
        assert_eq!(above, InclusionResult::Outside);
        assert_eq!(beside, InclusionResult::Outside);
    }

    #[test]
    fn pyramid_lateral_extent_shrinks_with_height() {
        let t = tol(1e-9);
        assert!(check_point_inclusion(CellShape::Pyramid5, &[0.45, 0.45, 0.5], t).is_contained());
        assert!(!check_point_inclusion(CellShape::Pyramid5, &[0.55, 0.0, 0.5], t).is_contained());
        assert!(!check_point_inclusion(CellShape::Pyramid5, &[0.0, 0.0, -0.1], t).is_contained());
    }

    #[test]
    fn pyramid_apex_is_boundary() {
        let t = tol(1e-9);
        assert_eq!(
            check_point_inclusion(CellShape::Pyramid5, &[0.0, 0.0, 1.0], t),
            InclusionResult::OnBoundary
        );
        assert_eq!(
            check_point_inclusion(CellShape::Pyramid13, &[0.0, 0.0, 1.0 + 0.5e-9], t),
            InclusionResult::OnBoundary
        );
    }

    #[test]
    fn nan_is_outside() {
        let t = Tolerance::default();
        for shape in CellShape::ALL {
            let r = check_point_inclusion(shape, &[f64::NAN, 0.0, 0.0], t);
            assert_eq!(r, InclusionResult::Outside, "{shape}");
        }
    }
}
