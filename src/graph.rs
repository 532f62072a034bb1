//! Spatial graph storage consumed by the reconciliation core.
//!
//! The graph itself is a plain petgraph adjacency structure; this crate only
//! defines the node/edge weights that carry geometry. Handles (`NodeIndex`,
//! `EdgeIndex`) are stable for the lifetime of a graph and are used as
//! identities throughout the comparison and clustering passes.

use crate::Point3;
use petgraph::graph::UnGraph;

/// A vertex of the filament network: a 3D position plus an optional integer
/// label (used to store a cluster assignment after the fact).
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialNode {
    pub pos: Point3,
    pub label: Option<u64>,
}

impl SpatialNode {
    /// Node at `pos` with no label.
    #[inline]
    pub fn new(pos: Point3) -> Self {
        Self { pos, label: None }
    }
}

impl From<Point3> for SpatialNode {
    #[inline]
    fn from(pos: Point3) -> Self {
        Self::new(pos)
    }
}

/// An edge of the filament network.
///
/// `points` holds the interior path geometry between the two endpoint
/// vertices, ordered from the edge's source to its target and excluding the
/// endpoints' own positions. May be empty for straight, adjacent vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialEdge {
    pub points: Vec<Point3>,
}

impl SpatialEdge {
    #[inline]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }
}

/// Undirected spatial graph.
///
/// The comparison passes assume a simple graph: at most one edge per
/// unordered vertex pair. Parallel edges make `find_edge` ambiguous and are
/// not supported.
pub type SpatialGraph = UnGraph<SpatialNode, SpatialEdge>;
