#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skelgraph::petgraph::graph::NodeIndex;
use skelgraph::{Point3, SpatialEdge, SpatialGraph, SpatialNode};

/// Add a vertex at the given position.
pub fn node(g: &mut SpatialGraph, x: f64, y: f64, z: f64) -> NodeIndex {
    g.add_node(SpatialNode::new(Point3::new(x, y, z)))
}

/// Add an edge whose interior path runs through `points` (source to target).
pub fn edge(g: &mut SpatialGraph, a: NodeIndex, b: NodeIndex, points: &[(f64, f64, f64)]) {
    let points = points
        .iter()
        .map(|&(x, y, z)| Point3::new(x, y, z))
        .collect();
    g.add_edge(a, b, SpatialEdge::new(points));
}

/// A single straight edge along the x axis: vertices at `ax` and `bx`,
/// interior path points at the given x coordinates.
pub fn straight_segment(ax: f64, bx: f64, interior: &[f64]) -> SpatialGraph {
    let mut g = SpatialGraph::new_undirected();
    let a = node(&mut g, ax, 0.0, 0.0);
    let b = node(&mut g, bx, 0.0, 0.0);
    let points: Vec<(f64, f64, f64)> = interior.iter().map(|&x| (x, 0.0, 0.0)).collect();
    edge(&mut g, a, b, &points);
    g
}

/// An edgeless graph of `n` vertices scattered uniformly in a cube of the
/// given side length, seeded for reproducibility.
pub fn random_cloud(n: usize, side: f64, seed: u64) -> SpatialGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut g = SpatialGraph::new_undirected();
    for _ in 0..n {
        node(
            &mut g,
            rng.gen_range(0.0..side),
            rng.gen_range(0.0..side),
            rng.gen_range(0.0..side),
        );
    }
    g
}
