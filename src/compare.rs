//! Comparison of a low-information graph against a high-information graph
//! of the same filament network.
//!
//! There is no ground-truth correspondence between the two graphs: positions
//! only approximately agree and structural differences must be inferred from
//! proximity. The classifier therefore runs two greedy passes over the merged
//! descriptor table and accepts false positives/negatives in ambiguous cases
//! rather than guessing:
//!
//! - **Pass A** walks the high-info vertices and marks edges that subdivide a
//!   path the low-info graph considers a single unbroken edge.
//! - **Pass B** walks the low-info vertices and classifies places where the
//!   high-info graph continues past them: growth past a dead end and
//!   convergence of opposite branches are accepted; a possible merge into an
//!   existing path is surfaced as an unresolved event and left alone (a
//!   higher-fidelity graph will disambiguate it).

use crate::graph::SpatialGraph;
use crate::locator::GraphPointLocator;
use crate::merge::PointDescriptor;
use crate::Point3;
use glam::DVec3;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashSet;

/// Search radius (in spatial units) used when projecting a position onto a
/// graph's closest existing point. Chosen empirically for skeletons with
/// voxel-scale discretization noise; re-choose per dataset scale.
pub const DEFAULT_MATCH_RADIUS: f64 = 2.0;

/// Configuration for graph comparison.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Radius for within-radius descriptor projection (Pass B).
    pub match_radius: f64,
    /// Print per-finding diagnostics to stderr. No behavioral effect.
    pub verbose: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            match_radius: DEFAULT_MATCH_RADIUS,
            verbose: false,
        }
    }
}

/// Edges and vertices of the high-info graph marked for exclusion.
///
/// Grows monotonically during classification; both members are sets, so
/// re-marking is a no-op. Vertex removal is currently never produced by the
/// classifier (only the subdividing edge is dropped, the junction vertex
/// stays); the slot exists so the filter honors callers' own vertex marks.
#[derive(Debug, Clone, Default)]
pub struct RemovalSet {
    pub edges: FxHashSet<EdgeIndex>,
    pub nodes: FxHashSet<NodeIndex>,
}

impl RemovalSet {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }
}

/// Classification of one endpoint of a high-info edge that extends past a
/// low-info vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// No low-info counterpart within the match radius: growth past a dead
    /// end. Accepted.
    Growth,
    /// Endpoint lands on a low-info vertex: two opposite-direction branches
    /// have met. Accepted.
    Convergence,
    /// Endpoint lands mid-path on a low-info edge: possibly a merge into an
    /// existing filament. Deliberately unresolved.
    PossibleMerge,
}

/// A place where the high-info graph continues through a low-info vertex.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionEvent {
    /// The low-info vertex the high-info edge passes through.
    pub low_vertex: NodeIndex,
    /// The high-info edge containing that position as an interior point.
    pub high_edge: EdgeIndex,
    /// Classification of the high-info edge's source endpoint against the
    /// low-info graph.
    pub source_kind: ExtensionKind,
    /// Same for the target endpoint.
    pub target_kind: ExtensionKind,
}

impl ExtensionEvent {
    /// True if either endpoint is a possible merge, i.e. the event was left
    /// unclassified rather than accepted.
    #[inline]
    pub fn is_unresolved(&self) -> bool {
        self.source_kind == ExtensionKind::PossibleMerge
            || self.target_kind == ExtensionKind::PossibleMerge
    }
}

/// Outcome of the two classification passes.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReport {
    /// What to strip from the high-info graph.
    pub removal: RemovalSet,
    /// Extension/merge events found by Pass B, in ascending low-vertex order.
    pub extensions: Vec<ExtensionEvent>,
}

impl ComparisonReport {
    /// True if any extension event was left unresolved.
    pub fn has_unresolved(&self) -> bool {
        self.extensions.iter().any(ExtensionEvent::is_unresolved)
    }
}

/// Run both classification passes of `g1` (high-info) against `g0`
/// (low-info) and return the removal sets and extension events.
///
/// Neither input graph is mutated. Iteration is in ascending vertex-handle
/// order and all index queries break ties deterministically, so repeated runs
/// yield identical reports.
pub fn remove_edges_and_nodes_from_high_info_graph(
    g0: &SpatialGraph,
    g1: &SpatialGraph,
    config: &CompareConfig,
) -> ComparisonReport {
    let locator = GraphPointLocator::build(&[g0, g1]);
    let mut report = ComparisonReport::default();

    pass_a_spurious_branches(g1, &locator, config, &mut report);
    pass_b_extensions(g0, g1, &locator, config, &mut report);

    report
}

/// Pass A: edges of `g1` that subdivide a single unbroken `g0` edge.
///
/// A `g1` vertex with no vertex counterpart in `g0` is suspect; when one of
/// its neighbors sits mid-path on a `g0` edge, the connecting `g1` edge
/// bisects what `g0` models as one edge and is marked for removal. Only the
/// edge is marked; the junction vertex itself is kept.
fn pass_a_spurious_branches(
    g1: &SpatialGraph,
    locator: &GraphPointLocator,
    config: &CompareConfig,
    report: &mut ComparisonReport,
) {
    for v in g1.node_indices() {
        let pos = g1[v].pos.to_glam();
        let own = locator.nearest_descriptor(pos, 1);
        assert!(
            own.is_vertex(),
            "merged index returned {} for high-info vertex {}",
            own,
            v.index()
        );

        let in_low = locator.nearest_descriptor(pos, 0);
        if in_low.is_vertex() {
            continue;
        }

        // Vertex has no counterpart in g0. A neighbor that is an interior
        // point of a g0 edge means the path is unbroken there and the edge
        // between them is a spurious subdivision.
        for edge in g1.edges(v) {
            let v_adj = edge.target();
            let adj_in_low = locator.nearest_descriptor(g1[v_adj].pos.to_glam(), 0);
            if adj_in_low.is_edge_point() && report.removal.edges.insert(edge.id()) {
                if config.verbose {
                    let p = g1[v].pos;
                    eprintln!(
                        "spurious subdivision: high-info edge {} (vertex {} at ({}, {}, {}) is {} in low-info graph)",
                        edge.id().index(),
                        v.index(),
                        p.x,
                        p.y,
                        p.z,
                        in_low
                    );
                }
            }
        }
    }
}

/// Pass B: low-info vertices the high-info graph extends past.
///
/// Produces no removals; it classifies each detected extension and records
/// the event. Unresolved outcomes (possible merges, whose exploration could
/// uncover a cycle) are reported, never acted on.
fn pass_b_extensions(
    g0: &SpatialGraph,
    g1: &SpatialGraph,
    locator: &GraphPointLocator,
    config: &CompareConfig,
    report: &mut ComparisonReport,
) {
    for v in g0.node_indices() {
        let pos = g0[v].pos.to_glam();
        let descs = locator.closest_existing_descriptors(pos, config.match_radius);
        assert!(
            descs[0].is_vertex(),
            "merged index returned {} for low-info vertex {}",
            descs[0],
            v.index()
        );

        let PointDescriptor::EdgePoint { edge, .. } = descs[1] else {
            continue;
        };

        // The high-info graph runs through v as edge interior: it has grown
        // past where g0 terminates. Classify by where the edge's endpoints
        // land in g0.
        let (source, target) = g1
            .edge_endpoints(edge)
            .expect("descriptor table holds a stale high-info edge");
        let event = ExtensionEvent {
            low_vertex: v,
            high_edge: edge,
            source_kind: classify_endpoint(locator, g1[source].pos, config.match_radius),
            target_kind: classify_endpoint(locator, g1[target].pos, config.match_radius),
        };

        if config.verbose {
            eprintln!(
                "extension: low-info vertex {} inside high-info edge {} (source {:?}, target {:?}{})",
                v.index(),
                edge.index(),
                event.source_kind,
                event.target_kind,
                if event.is_unresolved() {
                    "; left unresolved"
                } else {
                    ""
                }
            );
        }
        report.extensions.push(event);
    }
}

/// Where does a high-info endpoint land in the low-info graph?
fn classify_endpoint(locator: &GraphPointLocator, pos: Point3, radius: f64) -> ExtensionKind {
    let projected: DVec3 = pos.to_glam();
    match locator.closest_existing_descriptor(projected, radius, 0) {
        PointDescriptor::Absent => ExtensionKind::Growth,
        PointDescriptor::Vertex(_) => ExtensionKind::Convergence,
        PointDescriptor::EdgePoint { .. } => ExtensionKind::PossibleMerge,
    }
}
