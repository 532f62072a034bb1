//! Radius-based clustering of graph vertices.
//!
//! Two vertices within `cluster_radius` of each other belong to the same
//! cluster, transitively: clusters are the connected components of the
//! within-radius relation, so a chain A–B–C clusters together even when A
//! and C are farther apart than the radius. Detection and label application
//! are separate steps; detection never mutates the graph.

use crate::error::ReconcileError;
use crate::graph::SpatialGraph;
use crate::point_index::SpatialPointIndex;
use crate::union_find::UnionFind;
use glam::DVec3;
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;

/// Maps each clustered vertex to its cluster's representative vertex.
///
/// Only vertices belonging to a cluster of at least two members appear;
/// treat a missing entry as the identity mapping.
pub type ClusterLabelMap = FxHashMap<NodeIndex, NodeIndex>;

/// Configuration for cluster detection.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    /// Vertices closer than this are clustered. Required, no default:
    /// the right value depends on the dataset's spatial scale.
    pub cluster_radius: f64,
    /// Pick the member nearest the cluster centroid as representative
    /// instead of the lowest member handle.
    pub use_cluster_centroid: bool,
    /// Print per-cluster diagnostics to stderr. No behavioral effect.
    pub verbose: bool,
}

impl ClusterConfig {
    /// Configuration with the given radius, centroid representatives, and
    /// quiet output.
    pub fn new(cluster_radius: f64) -> Self {
        Self {
            cluster_radius,
            use_cluster_centroid: true,
            verbose: false,
        }
    }
}

/// Detect clusters with the given radius and default settings.
pub fn detect_clusters_with_radius(
    graph: &SpatialGraph,
    cluster_radius: f64,
) -> Result<ClusterLabelMap, ReconcileError> {
    detect_clusters_with(graph, &ClusterConfig::new(cluster_radius))
}

/// Detect clusters with explicit configuration.
///
/// Returns the vertex-to-representative map; the graph is not touched. Use
/// [`assign_cluster_label_to_nodes`] to write the labels back.
pub fn detect_clusters_with(
    graph: &SpatialGraph,
    config: &ClusterConfig,
) -> Result<ClusterLabelMap, ReconcileError> {
    let radius = config.cluster_radius;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ReconcileError::InvalidRadius(radius));
    }

    let n = graph.node_count();
    if n == 0 {
        return Ok(ClusterLabelMap::default());
    }

    // node_weights iterates in index order, so position i belongs to the
    // vertex with handle i.
    let positions: Vec<DVec3> = graph.node_weights().map(|w| w.pos.to_glam()).collect();
    let index = SpatialPointIndex::new(positions.clone());

    let mut dsu = UnionFind::new(n);
    for i in 0..n {
        for (j, _) in index.within_radius(positions[i], radius) {
            if (j as usize) > i {
                dsu.union_keep_min(i as u32, j);
            }
        }
    }

    let mut members: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
    for i in 0..n as u32 {
        members.entry(dsu.find(i)).or_default().push(i);
    }

    let mut roots: Vec<u32> = members.keys().copied().collect();
    roots.sort_unstable();

    let mut map = ClusterLabelMap::default();
    for root in roots {
        let cluster = &members[&root];
        if cluster.len() < 2 {
            continue;
        }

        let rep = if config.use_cluster_centroid {
            nearest_to_centroid(cluster, &positions)
        } else {
            // union_keep_min makes the root the lowest member handle.
            root
        };

        if config.verbose {
            eprintln!(
                "cluster of {} vertices, representative {}",
                cluster.len(),
                rep
            );
        }
        for &m in cluster {
            map.insert(NodeIndex::new(m as usize), NodeIndex::new(rep as usize));
        }
    }

    Ok(map)
}

/// Member closest to the cluster's centroid, distance ties by lowest handle.
fn nearest_to_centroid(cluster: &[u32], positions: &[DVec3]) -> u32 {
    let centroid = cluster
        .iter()
        .fold(DVec3::ZERO, |acc, &m| acc + positions[m as usize])
        / cluster.len() as f64;

    let mut best = cluster[0];
    let mut best_d2 = f64::INFINITY;
    for &m in cluster {
        let d2 = positions[m as usize].distance_squared(centroid);
        if d2 < best_d2 {
            best_d2 = d2;
            best = m;
        }
    }
    best
}

/// Overwrite the `label` field of every vertex in `map` with its cluster
/// representative's handle. Vertices absent from the map are untouched.
pub fn assign_cluster_label_to_nodes(graph: &mut SpatialGraph, map: &ClusterLabelMap) {
    for (&v, &rep) in map {
        graph[v].label = Some(rep.index() as u64);
    }
}
