use cell_locator::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn curved(r: &ReferencePoint) -> PhysicalPoint {
    let [x, y, z] = *r;
    [
        3.0 * x + 0.5 * y + 0.1 * x * y,
        0.4 * x + 2.5 * y + 0.3 * z - 0.05 * z * z,
        0.2 * y + 2.0 * z + 0.05 * x * x * z,
    ]
}

#[test]
fn batch_matches_point_by_point() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let options = LocateOptions::with_tolerance(Tolerance::new(1e-10).unwrap());
    for shape in [
        CellShape::Hexahedron27,
        CellShape::Wedge15,
        CellShape::Pyramid13,
        CellShape::Tetrahedron10,
    ] {
        let nodes = map_reference_nodes(shape, curved);
        let map = GeometricMap::new(shape, &nodes).unwrap();
        let points: Vec<PhysicalPoint> = (0..500)
            .map(|_| {
                [
                    rng.gen_range(-1.0..4.0),
                    rng.gen_range(-1.0..4.0),
                    rng.gen_range(-1.0..3.0),
                ]
            })
            .collect();

        let batch =
            check_physical_inclusion(shape, &points, CellNodes::Shared(&nodes), &options).unwrap();
        let single: Vec<InclusionResult> = points
            .iter()
            .map(|p| classify_physical_point(&map, p, &options))
            .collect();
        assert_eq!(batch, single, "{shape}");

        let summary = ClassificationSummary::from_results(&batch);
        assert_eq!(summary.total(), points.len());
        assert!(summary.inside > 0 && summary.outside > 0, "{shape}: {summary:?}");
    }
}
