//! Batch containment classification.
//!
//! Reference-space queries go straight to the inclusion predicates.
//! Physical-space queries are first pulled back through the inverse geometric
//! map; a point whose pre-image cannot be found is classified
//! [`InclusionResult::Outside`] and the batch carries on.
//!
//! Structural problems (unsupported shape, wrong node counts, invalid options)
//! are reported before any point is processed, so a successful call always
//! returns exactly one result per input point, in input order.
//!
//! With the `rayon` feature enabled the per-point loop runs on the rayon pool.
//! Points are independent and each writes one output slot, so results are
//! identical to the sequential loop.

use crate::discretization::geometric_map::{GeometricMap, ReferenceMap};
use crate::geometry::inclusion::{InclusionResult, check_point_inclusion};
use crate::geometry::inverse_map::invert_map;
use crate::geometry::tolerance::{LocateOptions, Tolerance};
use crate::locate_error::LocateError;
use crate::topology::cell_shape::{CellShape, PhysicalPoint, ReferencePoint};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical cells backing a batch of queries.
#[derive(Clone, Copy, Debug)]
pub enum CellNodes<'a> {
    /// One cell shared by every query point.
    Shared(&'a [PhysicalPoint]),
    /// One cell per query point, in point order.
    PerPoint(&'a [Vec<PhysicalPoint>]),
}

/// Classify reference-space points against the reference domain of `shape`.
pub fn check_reference_inclusion(
    shape: CellShape,
    points: &[ReferencePoint],
    tolerance: Tolerance,
) -> Vec<InclusionResult> {
    map_points(points.len(), |i| {
        check_point_inclusion(shape, &points[i], tolerance)
    })
}

/// Like [`check_reference_inclusion`] for unpadded coordinate rows.
pub fn check_reference_inclusion_rows(
    shape: CellShape,
    rows: &[Vec<f64>],
    tolerance: Tolerance,
) -> Result<Vec<InclusionResult>, LocateError> {
    let points = rows
        .iter()
        .map(|row| shape.pad_point(row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(check_reference_inclusion(shape, &points, tolerance))
}

/// Classify physical-space points against one or more physical cells of `shape`.
pub fn check_physical_inclusion(
    shape: CellShape,
    points: &[PhysicalPoint],
    cells: CellNodes<'_>,
    options: &LocateOptions,
) -> Result<Vec<InclusionResult>, LocateError> {
    options.validate()?;
    let results = match cells {
        CellNodes::Shared(nodes) => {
            let map = GeometricMap::new(shape, nodes)?;
            map_points(points.len(), |i| locate_one(&map, &points[i], options))
        }
        CellNodes::PerPoint(cells) => {
            if cells.len() != points.len() {
                return Err(LocateError::CellCountMismatch {
                    points: points.len(),
                    cells: cells.len(),
                });
            }
            let maps = cells
                .iter()
                .map(|nodes| GeometricMap::new(shape, nodes))
                .collect::<Result<Vec<_>, _>>()?;
            map_points(points.len(), |i| locate_one(&maps[i], &points[i], options))
        }
    };

    let failures = results.iter().filter(|(_, located)| !located).count();
    if failures > 0 && failures == results.len() {
        log::warn!("{shape}: inverse map failed for all {failures} points");
    }
    Ok(results.into_iter().map(|(result, _)| result).collect())
}

/// Classify one reference point.
pub fn classify_reference_point(
    shape: CellShape,
    point: &ReferencePoint,
    tolerance: Tolerance,
) -> InclusionResult {
    check_point_inclusion(shape, point, tolerance)
}

/// Classify one physical point against any [`ReferenceMap`].
pub fn classify_physical_point<M>(
    map: &M,
    point: &PhysicalPoint,
    options: &LocateOptions,
) -> InclusionResult
where
    M: ReferenceMap + ?Sized,
{
    locate_one(map, point, options).0
}

/// Boolean view of a batch: `true` for inside or on the boundary.
pub fn contained_mask(results: &[InclusionResult]) -> Vec<bool> {
    results.iter().map(|r| r.is_contained()).collect()
}

/// Outcome counts for a batch.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub inside: usize,
    pub on_boundary: usize,
    pub outside: usize,
}

impl ClassificationSummary {
    /// Tally a batch of results.
    pub fn from_results(results: &[InclusionResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r {
                InclusionResult::Inside => acc.inside += 1,
                InclusionResult::OnBoundary => acc.on_boundary += 1,
                InclusionResult::Outside => acc.outside += 1,
            }
            acc
        })
    }

    /// Points inside or on the boundary.
    pub fn contained(&self) -> usize {
        self.inside + self.on_boundary
    }

    /// Total number of points.
    pub fn total(&self) -> usize {
        self.contained() + self.outside
    }
}

/// Result for one point and whether its pre-image was found.
fn locate_one<M>(map: &M, point: &PhysicalPoint, options: &LocateOptions) -> (InclusionResult, bool)
where
    M: ReferenceMap + ?Sized,
{
    match invert_map(map, point, options) {
        Ok(reference) => (
            check_point_inclusion(map.shape(), &reference, options.tolerance),
            true,
        ),
        Err(failure) => {
            log::debug!("{}: point {point:?} treated as outside: {failure}", map.shape());
            (InclusionResult::Outside, false)
        }
    }
}

#[cfg(feature = "rayon")]
fn map_points<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..n).into_par_iter().map(f).collect()
}

#[cfg(not(feature = "rayon"))]
fn map_points<T, F>(n: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..n).map(f).collect()
}
