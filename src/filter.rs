//! Structural filtering of a spatial graph by removal sets.

use crate::compare::RemovalSet;
use crate::graph::SpatialGraph;

/// Copy `g`, excluding the vertices and edges named in `removal`.
///
/// Any edge incident to a removed vertex is dropped as well, whether or not
/// it is separately marked. Handles in the result are renumbered; only the
/// geometric and topological content carries over.
pub fn filter_by_sets(removal: &RemovalSet, g: &SpatialGraph) -> SpatialGraph {
    g.filter_map(
        |v, node| (!removal.nodes.contains(&v)).then(|| node.clone()),
        |e, edge| (!removal.edges.contains(&e)).then(|| edge.clone()),
    )
}
