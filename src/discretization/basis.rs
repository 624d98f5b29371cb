//! Nodal shape functions for every catalogued shape that carries a geometric map.
//!
//! Each basis function is attached to one reference node of
//! [`CellShape::reference_nodes`] and is 1 there and 0 at every other node.
//! The functions are resolved from the node coordinates, so node order is
//! defined in a single place (the catalogue).
//!
//! | Basis                         | Shapes                                  |
//! |-------------------------------|-----------------------------------------|
//! | Lagrange P1/P2 simplex        | Line2/3 (as tensor), Triangle3/6, Tet4/10 |
//! | Lagrange Q1/Q2 tensor product | Quadrilateral4/9, Hexahedron8/27        |
//! | Serendipity                   | Quadrilateral8, Hexahedron20, Wedge15, Pyramid13 |
//! | Triangle x line               | Wedge6/18                               |
//! | Rational                      | Pyramid5                                |

use crate::locate_error::LocateError;
use crate::topology::cell_shape::{CellShape, HEX_NODES, ReferencePoint};
use static_assertions::const_assert_eq;

/// Largest node count of any basis.
pub const MAX_NODES: usize = 27;
const_assert_eq!(MAX_NODES, HEX_NODES.len());

/// Pyramid functions contain `1 / (1 - z)`; heights closer to the apex are clamped.
pub const PYRAMID_APEX_EPS: f64 = f64::EPSILON;

/// Supported basis implementations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Basis {
    /// Linear Lagrange basis on a segment.
    LagrangeP1Line,
    /// Quadratic Lagrange basis on a segment.
    LagrangeP2Line,
    LagrangeP1Triangle,
    LagrangeP2Triangle,
    /// Bilinear Lagrange basis on a quadrilateral.
    LagrangeQ1Quadrilateral,
    /// 8-node serendipity quadrilateral.
    SerendipityQuadrilateral,
    /// Biquadratic Lagrange basis on a quadrilateral.
    LagrangeQ2Quadrilateral,
    LagrangeP1Tetrahedron,
    LagrangeP2Tetrahedron,
    LagrangeQ1Hexahedron,
    /// 20-node serendipity hexahedron.
    SerendipityHexahedron,
    LagrangeQ2Hexahedron,
    LagrangeP1Wedge,
    /// 15-node serendipity wedge.
    SerendipityWedge,
    LagrangeP2Wedge,
    /// 5-node rational pyramid.
    LagrangeP1Pyramid,
    /// 13-node serendipity pyramid.
    SerendipityPyramid,
}

/// Shape-function values and reference gradients at one point.
#[derive(Clone, Debug)]
pub struct ShapeFunctions {
    len: usize,
    values: [f64; MAX_NODES],
    gradients: [[f64; 3]; MAX_NODES],
}

impl ShapeFunctions {
    fn zeroed(len: usize) -> Self {
        Self {
            len,
            values: [0.0; MAX_NODES],
            gradients: [[0.0; 3]; MAX_NODES],
        }
    }

    /// Basis values, one per node.
    pub fn values(&self) -> &[f64] {
        &self.values[..self.len]
    }

    /// Reference gradients, one `[d/dx, d/dy, d/dz]` per node.
    pub fn gradients(&self) -> &[[f64; 3]] {
        &self.gradients[..self.len]
    }
}

/// Basis function tabulation on the reference element.
#[derive(Clone, Debug)]
pub struct BasisTabulation {
    /// Basis values per point: `[pt][basis]`.
    pub values: Vec<Vec<f64>>,
    /// Reference gradients per point: `[pt][basis][dim]`.
    pub gradients: Vec<Vec<Vec<f64>>>,
}

impl Basis {
    /// Resolve the basis used for the geometric map of `shape`.
    pub fn from_shape(shape: CellShape) -> Result<Self, LocateError> {
        use CellShape::*;
        match shape {
            Line2 => Ok(Basis::LagrangeP1Line),
            Line3 => Ok(Basis::LagrangeP2Line),
            Triangle3 => Ok(Basis::LagrangeP1Triangle),
            Triangle6 => Ok(Basis::LagrangeP2Triangle),
            Quadrilateral4 => Ok(Basis::LagrangeQ1Quadrilateral),
            Quadrilateral8 => Ok(Basis::SerendipityQuadrilateral),
            Quadrilateral9 => Ok(Basis::LagrangeQ2Quadrilateral),
            Tetrahedron4 => Ok(Basis::LagrangeP1Tetrahedron),
            Tetrahedron10 => Ok(Basis::LagrangeP2Tetrahedron),
            Hexahedron8 => Ok(Basis::LagrangeQ1Hexahedron),
            Hexahedron20 => Ok(Basis::SerendipityHexahedron),
            Hexahedron27 => Ok(Basis::LagrangeQ2Hexahedron),
            Wedge6 => Ok(Basis::LagrangeP1Wedge),
            Wedge15 => Ok(Basis::SerendipityWedge),
            Wedge18 => Ok(Basis::LagrangeP2Wedge),
            Pyramid5 => Ok(Basis::LagrangeP1Pyramid),
            Pyramid13 => Ok(Basis::SerendipityPyramid),
            Triangle4 | Tetrahedron11 | Pyramid14 => Err(LocateError::UnsupportedTopology {
                shape,
                operation: "geometric map",
            }),
        }
    }

    /// The shape supported by this basis.
    pub fn cell_shape(&self) -> CellShape {
        match self {
            Basis::LagrangeP1Line => CellShape::Line2,
            Basis::LagrangeP2Line => CellShape::Line3,
            Basis::LagrangeP1Triangle => CellShape::Triangle3,
            Basis::LagrangeP2Triangle => CellShape::Triangle6,
            Basis::LagrangeQ1Quadrilateral => CellShape::Quadrilateral4,
            Basis::SerendipityQuadrilateral => CellShape::Quadrilateral8,
            Basis::LagrangeQ2Quadrilateral => CellShape::Quadrilateral9,
            Basis::LagrangeP1Tetrahedron => CellShape::Tetrahedron4,
            Basis::LagrangeP2Tetrahedron => CellShape::Tetrahedron10,
            Basis::LagrangeQ1Hexahedron => CellShape::Hexahedron8,
            Basis::SerendipityHexahedron => CellShape::Hexahedron20,
            Basis::LagrangeQ2Hexahedron => CellShape::Hexahedron27,
            Basis::LagrangeP1Wedge => CellShape::Wedge6,
            Basis::SerendipityWedge => CellShape::Wedge15,
            Basis::LagrangeP2Wedge => CellShape::Wedge18,
            Basis::LagrangeP1Pyramid => CellShape::Pyramid5,
            Basis::SerendipityPyramid => CellShape::Pyramid13,
        }
    }

    /// Reference dimension of the basis.
    pub fn dimension(&self) -> usize {
        self.cell_shape().dimension()
    }

    /// Number of basis functions per element.
    pub fn num_nodes(&self) -> usize {
        self.cell_shape().node_count()
    }

    /// Evaluate all basis values and reference gradients at `point`.
    pub fn evaluate(&self, point: &ReferencePoint) -> ShapeFunctions {
        let nodes = self.cell_shape().reference_nodes();
        let mut out = ShapeFunctions::zeroed(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            let (value, grad) = match self {
                Basis::LagrangeP1Line => tensor_lagrange(1, 1, node, point),
                Basis::LagrangeP2Line => tensor_lagrange(1, 2, node, point),
                Basis::LagrangeQ1Quadrilateral => tensor_lagrange(2, 1, node, point),
                Basis::LagrangeQ2Quadrilateral => tensor_lagrange(2, 2, node, point),
                Basis::LagrangeQ1Hexahedron => tensor_lagrange(3, 1, node, point),
                Basis::LagrangeQ2Hexahedron => tensor_lagrange(3, 2, node, point),
                Basis::LagrangeP1Triangle => simplex_lagrange(2, 1, node, point),
                Basis::LagrangeP2Triangle => simplex_lagrange(2, 2, node, point),
                Basis::LagrangeP1Tetrahedron => simplex_lagrange(3, 1, node, point),
                Basis::LagrangeP2Tetrahedron => simplex_lagrange(3, 2, node, point),
                Basis::SerendipityQuadrilateral => tensor_serendipity(2, node, point),
                Basis::SerendipityHexahedron => tensor_serendipity(3, node, point),
                Basis::LagrangeP1Wedge => wedge_lagrange(1, node, point),
                Basis::LagrangeP2Wedge => wedge_lagrange(2, node, point),
                Basis::SerendipityWedge => wedge_serendipity(node, point),
                Basis::LagrangeP1Pyramid => pyramid_linear(node, point),
                Basis::SerendipityPyramid => pyramid_serendipity(node, point),
            };
            out.values[i] = value;
            out.gradients[i] = grad;
        }
        out
    }

    /// Evaluate basis values and gradients at reference points.
    pub fn tabulate(&self, points: &[ReferencePoint]) -> BasisTabulation {
        let dim = self.dimension();
        let mut values = Vec::with_capacity(points.len());
        let mut gradients = Vec::with_capacity(points.len());
        for point in points {
            let sf = self.evaluate(point);
            values.push(sf.values().to_vec());
            gradients.push(sf.gradients().iter().map(|g| g[..dim].to_vec()).collect());
        }
        BasisTabulation { values, gradients }
    }
}

/// 1D Lagrange factor on `[-1, 1]` attached to `node` (one of -1, 0, 1).
fn lagrange_1d(degree: u8, node: f64, t: f64) -> (f64, f64) {
    if degree == 1 {
        if node < 0.0 {
            (0.5 * (1.0 - t), -0.5)
        } else {
            (0.5 * (1.0 + t), 0.5)
        }
    } else if node < -0.5 {
        (0.5 * t * (t - 1.0), t - 0.5)
    } else if node > 0.5 {
        (0.5 * t * (t + 1.0), t + 0.5)
    } else {
        (1.0 - t * t, -2.0 * t)
    }
}

/// Combine per-axis factors `(f, f')` into a value and gradient.
fn product_rule(factors: &[(f64, f64)]) -> (f64, [f64; 3]) {
    let value = factors.iter().map(|f| f.0).product();
    let mut grad = [0.0; 3];
    for (k, g) in grad.iter_mut().enumerate().take(factors.len()) {
        *g = factors
            .iter()
            .enumerate()
            .map(|(d, f)| if d == k { f.1 } else { f.0 })
            .product();
    }
    (value, grad)
}

fn tensor_lagrange(
    dim: usize,
    degree: u8,
    node: &ReferencePoint,
    xi: &ReferencePoint,
) -> (f64, [f64; 3]) {
    let mut factors = [(1.0, 0.0); 3];
    for d in 0..dim {
        factors[d] = lagrange_1d(degree, node[d], xi[d]);
    }
    product_rule(&factors[..dim])
}

fn barycentric(dim: usize, p: &ReferencePoint) -> [f64; 4] {
    let mut lambda = [0.0; 4];
    lambda[0] = 1.0 - p[..dim].iter().sum::<f64>();
    lambda[1..=dim].copy_from_slice(&p[..dim]);
    lambda
}

fn barycentric_gradient(dim: usize, k: usize) -> [f64; 3] {
    let mut g = [0.0; 3];
    if k == 0 {
        g[..dim].iter_mut().for_each(|v| *v = -1.0);
    } else {
        g[k - 1] = 1.0;
    }
    g
}

/// Simplex corner index of a node, or the edge `(i, j)` it bisects.
enum SimplexNode {
    Corner(usize),
    Edge(usize, usize),
}

fn classify_simplex_node(dim: usize, node: &ReferencePoint) -> SimplexNode {
    let nb = barycentric(dim, node);
    if let Some(c) = nb[..=dim].iter().position(|&b| b > 0.75) {
        return SimplexNode::Corner(c);
    }
    let mut mids = (0..=dim).filter(|&k| (nb[k] - 0.5).abs() < 0.25);
    let i = mids.next().unwrap_or(0);
    let j = mids.next().unwrap_or(i);
    SimplexNode::Edge(i, j)
}

fn scaled(g: [f64; 3], s: f64) -> [f64; 3] {
    [g[0] * s, g[1] * s, g[2] * s]
}

fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn simplex_lagrange(
    dim: usize,
    degree: u8,
    node: &ReferencePoint,
    xi: &ReferencePoint,
) -> (f64, [f64; 3]) {
    let l = barycentric(dim, xi);
    match classify_simplex_node(dim, node) {
        SimplexNode::Corner(c) if degree == 1 => (l[c], barycentric_gradient(dim, c)),
        SimplexNode::Corner(c) => (
            l[c] * (2.0 * l[c] - 1.0),
            scaled(barycentric_gradient(dim, c), 4.0 * l[c] - 1.0),
        ),
        SimplexNode::Edge(i, j) => (
            4.0 * l[i] * l[j],
            add(
                scaled(barycentric_gradient(dim, i), 4.0 * l[j]),
                scaled(barycentric_gradient(dim, j), 4.0 * l[i]),
            ),
        ),
    }
}

/// Serendipity quadrilateral/hexahedron: corners and edge midpoints only.
fn tensor_serendipity(dim: usize, node: &ReferencePoint, xi: &ReferencePoint) -> (f64, [f64; 3]) {
    let c = &node[..dim];
    let t = &xi[..dim];
    let mut a = [1.0; 3];
    for d in 0..dim {
        a[d] = 1.0 + c[d] * t[d];
    }
    let mut grad = [0.0; 3];
    match c.iter().position(|&ci| ci == 0.0) {
        None => {
            let scale = 0.5f64.powi(dim as i32);
            let s: f64 = c.iter().zip(t).map(|(ci, ti)| ci * ti).sum::<f64>() - (dim as f64 - 1.0);
            let prod: f64 = a[..dim].iter().product();
            for k in 0..dim {
                let others: f64 = (0..dim).filter(|&d| d != k).map(|d| a[d]).product();
                grad[k] = scale * c[k] * others * (s + a[k]);
            }
            (scale * prod * s, grad)
        }
        Some(m) => {
            let scale = 0.5f64.powi(dim as i32 - 1);
            let bubble = 1.0 - t[m] * t[m];
            let others: f64 = (0..dim).filter(|&d| d != m).map(|d| a[d]).product();
            grad[m] = scale * -2.0 * t[m] * others;
            for k in (0..dim).filter(|&k| k != m) {
                let rest: f64 = (0..dim).filter(|&d| d != m && d != k).map(|d| a[d]).product();
                grad[k] = scale * bubble * c[k] * rest;
            }
            (scale * bubble * others, grad)
        }
    }
}

/// Triangle Lagrange factor in `(x, y)` times line Lagrange factor in `z`.
fn wedge_lagrange(degree: u8, node: &ReferencePoint, xi: &ReferencePoint) -> (f64, [f64; 3]) {
    let (tv, tg) = simplex_lagrange(2, degree, node, xi);
    let (lv, lg) = lagrange_1d(degree, node[2], xi[2]);
    (tv * lv, [tg[0] * lv, tg[1] * lv, tv * lg])
}

fn wedge_serendipity(node: &ReferencePoint, xi: &ReferencePoint) -> (f64, [f64; 3]) {
    let l = barycentric(2, xi);
    let z = xi[2];
    let s = node[2];
    let bubble = 1.0 - z * z;
    match classify_simplex_node(2, node) {
        SimplexNode::Corner(c) if s == 0.0 => {
            let g = scaled(barycentric_gradient(2, c), bubble);
            (l[c] * bubble, [g[0], g[1], -2.0 * z * l[c]])
        }
        SimplexNode::Corner(c) => {
            let face = 1.0 + s * z;
            let value = 0.5 * l[c] * (2.0 * l[c] - 1.0) * face - 0.5 * l[c] * bubble;
            let g = scaled(
                barycentric_gradient(2, c),
                0.5 * (4.0 * l[c] - 1.0) * face - 0.5 * bubble,
            );
            let dz = 0.5 * l[c] * (2.0 * l[c] - 1.0) * s + l[c] * z;
            (value, [g[0], g[1], dz])
        }
        SimplexNode::Edge(i, j) => {
            let face = 1.0 + s * z;
            let g = add(
                scaled(barycentric_gradient(2, i), 2.0 * l[j] * face),
                scaled(barycentric_gradient(2, j), 2.0 * l[i] * face),
            );
            (2.0 * l[i] * l[j] * face, [g[0], g[1], 2.0 * l[i] * l[j] * s])
        }
    }
}

fn clamp_apex(z: f64) -> f64 {
    if 1.0 - z < PYRAMID_APEX_EPS {
        1.0 - PYRAMID_APEX_EPS
    } else {
        z
    }
}

fn pyramid_linear(node: &ReferencePoint, xi: &ReferencePoint) -> (f64, [f64; 3]) {
    let [x, y, z] = *xi;
    let z = clamp_apex(z);
    if node[2] > 0.5 {
        return (z, [0.0, 0.0, 1.0]);
    }
    let (sx, sy) = (node[0], node[1]);
    let w = 1.0 / (1.0 - z);
    let value = 0.25 * ((1.0 - z) + sx * x + sy * y + sx * sy * x * y * w);
    let grad = [
        0.25 * sx * (1.0 + sy * y * w),
        0.25 * sy * (1.0 + sx * x * w),
        0.25 * (-1.0 + sx * sy * x * y * w * w),
    ];
    (value, grad)
}

fn pyramid_serendipity(node: &ReferencePoint, xi: &ReferencePoint) -> (f64, [f64; 3]) {
    let [x, y, z] = *xi;
    let z = clamp_apex(z);
    let w = 1.0 / (1.0 - z);
    let [nx, ny, nz] = *node;

    if nz > 0.75 {
        return (z * (2.0 * z - 1.0), [0.0, 0.0, 4.0 * z - 1.0]);
    }
    if nz > 0.25 {
        // lateral edge midpoint
        let (sx, sy) = (nx.signum(), ny.signum());
        let cx = 1.0 + sx * x - z;
        let cy = 1.0 + sy * y - z;
        let grad = [
            z * sx * cy * w,
            z * sy * cx * w,
            w * (cx * cy - z * (cx + cy) + z * cx * cy * w),
        ];
        return (z * cx * cy * w, grad);
    }
    if nx != 0.0 && ny != 0.0 {
        let (sx, sy) = (nx, ny);
        let a = sx * x + sy * y - 1.0;
        let b = (1.0 + sx * x) * (1.0 + sy * y) - z + sx * sy * x * y * z * w;
        let db = [
            sx * (1.0 + sy * y) + sx * sy * y * z * w,
            sy * (1.0 + sx * x) + sx * sy * x * z * w,
            -1.0 + sx * sy * x * y * w * w,
        ];
        let grad = [
            0.25 * (sx * b + a * db[0]),
            0.25 * (sy * b + a * db[1]),
            0.25 * a * db[2],
        ];
        return (0.25 * a * b, grad);
    }
    // base edge midpoint: `u` runs along the edge, `v` is the fixed coordinate
    let (u, v, sv, swap) = if nx == 0.0 { (x, y, ny, false) } else { (y, x, nx, true) };
    let e = 1.0 + sv * v - z;
    let f = (1.0 - z) - u * u * w;
    let du = -e * u * w;
    let dv = 0.5 * sv * f;
    let dz = 0.5 * (-f + e * (-1.0 - u * u * w * w));
    let grad = if swap { [dv, du, dz] } else { [du, dv, dz] };
    (0.5 * e * f, grad)
}
