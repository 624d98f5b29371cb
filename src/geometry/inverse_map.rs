//! Inverse of a geometric map by Newton iteration.
//!
//! Starting from the reference centroid, each step linearizes the map,
//! `x(r + dr) ~ x(r) + J(r) dr`, and solves `J dr = -(x(r) - target)`. When the
//! physical dimension exceeds the reference dimension (a surface or curve
//! embedded in 3D) the step solves the normal equations `JᵀJ dr = -Jᵀe`
//! instead, which is the least-squares pseudo-inverse.
//!
//! The iteration succeeds only when the physical residual drops below the
//! tolerance times [`ReferenceMap::coordinate_scale`]; every other exit is a
//! failure. Each update is capped at [`MAX_STEP`] reference units. There is no line search,
//! so strongly distorted cells can still send the iteration away from the
//! reference domain; such points surface as [`InversionFailure::NotConverged`].

use crate::discretization::geometric_map::{Jacobian, ReferenceMap};
use crate::geometry::tolerance::LocateOptions;
use crate::locate_error::InversionFailure;
use crate::topology::cell_shape::{PhysicalPoint, ReferencePoint};
use itertools::Itertools;

/// Largest Newton update, in reference units.
pub const MAX_STEP: f64 = 4.0;

/// Find `r` with `map.forward(r) == target` within `options.tolerance`.
///
/// The result may lie outside the reference domain when the target is outside
/// the physical cell; classifying it is left to the inclusion predicates.
pub fn invert_map<M>(
    map: &M,
    target: &PhysicalPoint,
    options: &LocateOptions,
) -> Result<ReferencePoint, InversionFailure>
where
    M: ReferenceMap + ?Sized,
{
    let threshold = options.tolerance.value() * map.coordinate_scale();
    let ref_dim = map.reference_dimension();
    let phys_dim = map.physical_dimension();
    let mut r = map.shape().reference_center();
    let mut residual = f64::INFINITY;

    for iteration in 0..options.max_iterations {
        let (x, jac) = map.forward_and_jacobian(&r);
        let e = sub(x, *target);
        residual = norm(e);
        if !residual.is_finite() {
            return Err(InversionFailure::NonFinite { iteration });
        }
        log::trace!("newton iteration {iteration}: r = {r:?}, residual = {residual:e}");
        if residual < threshold {
            return Ok(r);
        }

        let mut dr = newton_step(&jac, &e, ref_dim, phys_dim)
            .ok_or(InversionFailure::SingularJacobian { iteration })?;
        let step = norm(dr);
        if !step.is_finite() {
            return Err(InversionFailure::NonFinite { iteration });
        }
        if step > MAX_STEP {
            dr = scale(dr, MAX_STEP / step);
        }
        for d in 0..ref_dim {
            r[d] += dr[d];
        }
    }

    Err(InversionFailure::NotConverged {
        iterations: options.max_iterations,
        residual,
    })
}

/// Solve for the Newton update `dr`; `None` when the system is singular.
fn newton_step(
    jac: &Jacobian,
    e: &[f64; 3],
    ref_dim: usize,
    phys_dim: usize,
) -> Option<[f64; 3]> {
    let (matrix, rhs) = if phys_dim == ref_dim {
        (*jac, *e)
    } else {
        let mut jtj = [[0.0; 3]; 3];
        let mut jte = [0.0; 3];
        for i in 0..ref_dim {
            for p in 0..phys_dim {
                jte[i] += jac[p][i] * e[p];
                for j in 0..ref_dim {
                    jtj[i][j] += jac[p][i] * jac[p][j];
                }
            }
        }
        (jtj, jte)
    };
    let inv = invert_matrix(ref_dim, &matrix)?;
    let mut dr = [0.0; 3];
    for i in 0..ref_dim {
        for j in 0..ref_dim {
            dr[i] -= inv[i][j] * rhs[j];
        }
    }
    Some(dr)
}

/// Invert the leading `dim x dim` block.
///
/// The block is singular when its determinant is below machine epsilon
/// relative to the size of its entries.
fn invert_matrix(dim: usize, m: &[[f64; 3]; 3]) -> Option<[[f64; 3]; 3]> {
    let scale = (0..dim)
        .cartesian_product(0..dim)
        .map(|(i, j)| m[i][j].abs())
        .fold(0.0, f64::max);
    if scale == 0.0 {
        return None;
    }
    let singular = |det: f64| det.abs() <= f64::EPSILON * scale.powi(dim as i32);
    let mut inv = [[0.0; 3]; 3];
    match dim {
        1 => {
            let det = m[0][0];
            if singular(det) {
                return None;
            }
            inv[0][0] = 1.0 / det;
        }
        2 => {
            let [a, b, _] = m[0];
            let [c, d, _] = m[1];
            let det = a * d - b * c;
            if singular(det) {
                return None;
            }
            inv[0] = [d / det, -b / det, 0.0];
            inv[1] = [-c / det, a / det, 0.0];
        }
        3 => {
            let [a, b, c] = m[0];
            let [d, e, f] = m[1];
            let [g, h, i] = m[2];
            let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
            if singular(det) {
                return None;
            }
            inv = [
                [(e * i - f * h) / det, (c * h - b * i) / det, (b * f - c * e) / det],
                [(f * g - d * i) / det, (a * i - c * g) / det, (c * d - a * f) / det],
                [(d * h - e * g) / det, (b * g - a * h) / det, (a * e - b * d) / det],
            ];
        }
        _ => return None,
    }
    Some(inv)
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn norm(a: [f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}
