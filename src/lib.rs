//! Reconciliation and clustering of spatial graphs extracted from
//! filamentous network skeletons.
//!
//! Two graphs of the same physical network — a coarse low-information graph
//! and a finer high-information graph — are matched point-by-point through a
//! merged spatial index, their topological differences are classified, and
//! edges the finer graph should not have are stripped. Independently,
//! vertices lying within a radius of each other can be grouped into clusters
//! and relabeled by cluster representative.
//!
//! Matching is a greedy proximity heuristic: there is no ground-truth
//! correspondence between the graphs, so ambiguous configurations are
//! reported unresolved rather than guessed at.
//!
//! # Example
//!
//! ```
//! use skelgraph::{
//!     compare_low_and_high_info_graphs, Point3, SpatialEdge, SpatialGraph, SpatialNode,
//! };
//!
//! let mut g0 = SpatialGraph::new_undirected();
//! let a = g0.add_node(SpatialNode::new(Point3::new(0.0, 0.0, 0.0)));
//! let b = g0.add_node(SpatialNode::new(Point3::new(2.0, 0.0, 0.0)));
//! g0.add_edge(a, b, SpatialEdge::new(vec![Point3::new(1.0, 0.0, 0.0)]));
//! let g1 = g0.clone();
//!
//! let output = compare_low_and_high_info_graphs(&g0, &g1).expect("inputs are non-empty");
//! assert_eq!(output.graph.edge_count(), 1);
//! assert!(output.report.removal.is_empty());
//! ```

// Handle and vector types from these crates appear in the public API;
// re-export them so downstream code can name them without version skew.
pub use glam;
pub use petgraph;

mod clusters;
mod compare;
mod error;
mod filter;
mod graph;
mod locator;
mod merge;
mod point_index;
mod types;
mod union_find;

pub use clusters::{
    assign_cluster_label_to_nodes, detect_clusters_with, detect_clusters_with_radius,
    ClusterConfig, ClusterLabelMap,
};
pub use compare::{
    remove_edges_and_nodes_from_high_info_graph, CompareConfig, ComparisonReport, ExtensionEvent,
    ExtensionKind, RemovalSet, DEFAULT_MATCH_RADIUS,
};
pub use error::ReconcileError;
pub use filter::filter_by_sets;
pub use graph::{SpatialEdge, SpatialGraph, SpatialNode};
pub use locator::{GraphPointLocator, RadiusNeighbor};
pub use merge::{merge_graph_points, MergedPointTable, PointDescriptor};
pub use point_index::SpatialPointIndex;
pub use types::{Point3, Point3Like};

/// Result of reconciling the high-info graph against the low-info graph.
#[derive(Debug, Clone)]
pub struct CompareOutput {
    /// The high-info graph with marked edges/vertices filtered out.
    pub graph: SpatialGraph,
    /// What the classifier found, including unresolved extension events.
    pub report: ComparisonReport,
}

/// Reconcile `g1` (high-info) against `g0` (low-info) with default settings.
///
/// Returns the filtered copy of `g1` plus the classification report. `g0` is
/// never mutated and is never filtered; it only serves as the reference.
pub fn compare_low_and_high_info_graphs(
    g0: &SpatialGraph,
    g1: &SpatialGraph,
) -> Result<CompareOutput, ReconcileError> {
    compare_low_and_high_info_graphs_with(g0, g1, &CompareConfig::default())
}

/// Reconcile with explicit configuration.
pub fn compare_low_and_high_info_graphs_with(
    g0: &SpatialGraph,
    g1: &SpatialGraph,
    config: &CompareConfig,
) -> Result<CompareOutput, ReconcileError> {
    if g0.node_count() == 0 {
        return Err(ReconcileError::EmptyGraph { graph_index: 0 });
    }
    if g1.node_count() == 0 {
        return Err(ReconcileError::EmptyGraph { graph_index: 1 });
    }
    if !config.match_radius.is_finite() || config.match_radius <= 0.0 {
        return Err(ReconcileError::InvalidRadius(config.match_radius));
    }

    let report = remove_edges_and_nodes_from_high_info_graph(g0, g1, config);
    let graph = filter_by_sets(&report.removal, g1);
    Ok(CompareOutput { graph, report })
}
