use cell_locator::prelude::*;
use proptest::prelude::*;

fn curved(r: &ReferencePoint) -> PhysicalPoint {
    let [x, y, z] = *r;
    [
        1.0 + 3.0 * x + 0.5 * y + 0.2 * z + 0.05 * y * y,
        -1.0 + 0.4 * x + 2.5 * y + 0.3 * z - 0.04 * z * z,
        0.5 + 0.1 * x - 0.2 * y + 2.0 * z + 0.06 * x * x,
    ]
}

fn curved_planar(r: &ReferencePoint) -> PhysicalPoint {
    let [x, y, _] = *r;
    [
        1.0 + 3.0 * x + 0.5 * y + 0.05 * y * y,
        -1.0 + 0.4 * x + 2.5 * y - 0.06 * x * x,
        0.0,
    ]
}

// Every map here has Jacobian singular values above 1, so a physical residual
// below `tol * scale` pins the reference point to well within ten times that.
fn assert_round_trip(
    shape: CellShape,
    map_fn: fn(&ReferencePoint) -> PhysicalPoint,
    r: ReferencePoint,
) {
    let nodes = map_reference_nodes(shape, map_fn);
    let map = GeometricMap::new(shape, &nodes).unwrap();
    let options = LocateOptions::default();
    let bound = 10.0 * options.tolerance.value() * map.coordinate_scale();
    let target = map.forward(&r);
    let back = invert_map(&map, &target, &options).unwrap();
    for d in 0..shape.dimension() {
        assert!(
            (back[d] - r[d]).abs() < bound,
            "{shape}: {back:?} vs {r:?} (bound {bound:e})"
        );
    }
    assert_eq!(
        classify_physical_point(&map, &target, &options),
        InclusionResult::Inside,
        "{shape}"
    );
}

proptest! {
    #[test]
    fn hexahedra_round_trip(x in -0.9f64..0.9, y in -0.9f64..0.9, z in -0.9f64..0.9) {
        for shape in [CellShape::Hexahedron8, CellShape::Hexahedron20, CellShape::Hexahedron27] {
            assert_round_trip(shape, curved, [x, y, z]);
        }
    }

    #[test]
    fn tetrahedra_round_trip(x in 0.05f64..0.3, y in 0.05f64..0.3, z in 0.05f64..0.3) {
        for shape in [CellShape::Tetrahedron4, CellShape::Tetrahedron10] {
            assert_round_trip(shape, curved, [x, y, z]);
        }
    }

    #[test]
    fn wedges_round_trip(x in 0.05f64..0.45, y in 0.05f64..0.45, z in -0.9f64..0.9) {
        for shape in [CellShape::Wedge6, CellShape::Wedge15, CellShape::Wedge18] {
            assert_round_trip(shape, curved, [x, y, z]);
        }
    }

    #[test]
    fn pyramids_round_trip(u in -0.9f64..0.9, v in -0.9f64..0.9, z in 0.05f64..0.6) {
        let r = [u * (1.0 - z), v * (1.0 - z), z];
        for shape in [CellShape::Pyramid5, CellShape::Pyramid13] {
            assert_round_trip(shape, curved, r);
        }
    }

    #[test]
    fn planar_cells_round_trip(x in 0.05f64..0.45, y in 0.05f64..0.45) {
        for shape in [
            CellShape::Triangle3,
            CellShape::Triangle6,
            CellShape::Quadrilateral4,
            CellShape::Quadrilateral8,
            CellShape::Quadrilateral9,
        ] {
            assert_round_trip(shape, curved_planar, [x, y, 0.0]);
        }
    }

    #[test]
    fn lines_round_trip(x in -0.9f64..0.9) {
        for shape in [CellShape::Line2, CellShape::Line3] {
            assert_round_trip(
                shape,
                |r| [2.0 + 3.0 * r[0] - 0.1 * r[0] * r[0], 0.0, 0.0],
                [x, 0.0, 0.0],
            );
        }
    }
}
