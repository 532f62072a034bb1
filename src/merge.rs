//! Merging of geometric points across input graphs.
//!
//! Collects the union of all vertex positions and edge-interior path points
//! from an ordered list of graphs, collapses coinciding positions to a single
//! merged point, and records what each merged point *is* in every source
//! graph. The merged positions feed one [`SpatialPointIndex`]; the descriptor
//! table is immutable once built.
//!
//! Positions collapse on bit-exact coordinate equality. Skeletons of the same
//! structure share grid coordinates exactly; positions that only nearly agree
//! are handled by the radius queries layered on top of the index, not here.

use crate::graph::SpatialGraph;
use crate::point_index::SpatialPointIndex;
use glam::DVec3;
use petgraph::graph::{EdgeIndex, NodeIndex};
use rustc_hash::FxHashMap;
use std::fmt;

/// Role of a merged point within one source graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointDescriptor {
    /// No point of this graph coincides with the merged position.
    Absent,
    /// The merged position is a vertex of this graph.
    Vertex(NodeIndex),
    /// The merged position is an interior path point of an edge, at
    /// `index` within the edge's point sequence (source to target).
    EdgePoint { edge: EdgeIndex, index: usize },
}

impl PointDescriptor {
    /// True unless the descriptor is [`PointDescriptor::Absent`].
    #[inline]
    pub fn exists(&self) -> bool {
        !matches!(self, PointDescriptor::Absent)
    }

    #[inline]
    pub fn is_vertex(&self) -> bool {
        matches!(self, PointDescriptor::Vertex(_))
    }

    #[inline]
    pub fn is_edge_point(&self) -> bool {
        matches!(self, PointDescriptor::EdgePoint { .. })
    }
}

impl fmt::Display for PointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointDescriptor::Absent => write!(f, "absent"),
            PointDescriptor::Vertex(v) => write!(f, "vertex {}", v.index()),
            PointDescriptor::EdgePoint { edge, index } => {
                write!(f, "edge {} point {}", edge.index(), index)
            }
        }
    }
}

/// Bit-exact hash key for a 3D position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey([u64; 3]);

impl PointKey {
    #[inline]
    fn new(p: DVec3) -> Self {
        Self([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
    }
}

/// Deduplicated positions plus one descriptor per (merged point, graph).
pub struct MergedPointTable {
    positions: Vec<DVec3>,
    /// `descriptors[merged_id][graph_index]`.
    descriptors: Vec<Vec<PointDescriptor>>,
    num_graphs: usize,
}

impl MergedPointTable {
    /// Number of merged points.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of source graphs the table was built over.
    #[inline]
    pub fn num_graphs(&self) -> usize {
        self.num_graphs
    }

    /// Position of a merged point.
    #[inline]
    pub fn position(&self, id: u32) -> DVec3 {
        self.positions[id as usize]
    }

    /// Descriptor of a merged point in one source graph.
    #[inline]
    pub fn descriptor(&self, id: u32, graph_index: usize) -> PointDescriptor {
        self.descriptors[id as usize][graph_index]
    }

    /// All per-graph descriptors of a merged point, indexed by source graph.
    #[inline]
    pub fn descriptors(&self, id: u32) -> &[PointDescriptor] {
        &self.descriptors[id as usize]
    }

    /// True if the merged point exists in at least one source graph.
    ///
    /// Every merged point was emitted by some graph, so this holds by
    /// construction; it is exposed for the radius-query filter.
    #[inline]
    pub fn exists_in_any(&self, id: u32) -> bool {
        self.descriptors[id as usize].iter().any(|d| d.exists())
    }
}

/// Merge all vertex and edge-interior positions of `graphs`.
///
/// The order of `graphs` defines the source index (0..N-1) used everywhere
/// downstream. Within one graph, vertices are emitted before edge interiors
/// and an existing descriptor is never overwritten, so a position that is
/// both resolves as the vertex.
///
/// Returns the index over all merged positions together with the descriptor
/// table. At least one graph must contain at least one vertex.
pub fn merge_graph_points(graphs: &[&SpatialGraph]) -> (SpatialPointIndex, MergedPointTable) {
    let num_graphs = graphs.len();
    let mut positions: Vec<DVec3> = Vec::new();
    let mut descriptors: Vec<Vec<PointDescriptor>> = Vec::new();
    let mut by_key: FxHashMap<PointKey, u32> = FxHashMap::default();

    let mut intern = |pos: DVec3,
                      positions: &mut Vec<DVec3>,
                      descriptors: &mut Vec<Vec<PointDescriptor>>|
     -> u32 {
        *by_key.entry(PointKey::new(pos)).or_insert_with(|| {
            let id = positions.len() as u32;
            positions.push(pos);
            descriptors.push(vec![PointDescriptor::Absent; num_graphs]);
            id
        })
    };

    for (graph_index, graph) in graphs.iter().enumerate() {
        for v in graph.node_indices() {
            let id = intern(graph[v].pos.to_glam(), &mut positions, &mut descriptors);
            let slot = &mut descriptors[id as usize][graph_index];
            if !slot.exists() {
                *slot = PointDescriptor::Vertex(v);
            }
        }
        for e in graph.edge_indices() {
            for (index, p) in graph[e].points.iter().enumerate() {
                let id = intern(p.to_glam(), &mut positions, &mut descriptors);
                let slot = &mut descriptors[id as usize][graph_index];
                if !slot.exists() {
                    *slot = PointDescriptor::EdgePoint { edge: e, index };
                }
            }
        }
    }

    let table = MergedPointTable {
        positions: positions.clone(),
        descriptors,
        num_graphs,
    };
    (SpatialPointIndex::new(positions), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SpatialEdge, SpatialNode};
    use crate::Point3;

    fn line_graph(xs: &[f64], interior: &[f64]) -> SpatialGraph {
        let mut g = SpatialGraph::new_undirected();
        let nodes: Vec<_> = xs
            .iter()
            .map(|&x| g.add_node(SpatialNode::new(Point3::new(x, 0.0, 0.0))))
            .collect();
        let points = interior
            .iter()
            .map(|&x| Point3::new(x, 0.0, 0.0))
            .collect();
        g.add_edge(nodes[0], nodes[1], SpatialEdge::new(points));
        g
    }

    #[test]
    fn test_merge_two_identical_graphs() {
        let g0 = line_graph(&[0.0, 3.0], &[1.0, 2.0]);
        let g1 = line_graph(&[0.0, 3.0], &[1.0, 2.0]);
        let (index, table) = merge_graph_points(&[&g0, &g1]);

        // Positions coincide exactly, so nothing is duplicated.
        assert_eq!(table.len(), 4);
        assert_eq!(index.len(), 4);
        assert_eq!(table.num_graphs(), 2);

        for id in 0..table.len() as u32 {
            assert!(table.exists_in_any(id));
            let descs = table.descriptors(id);
            assert_eq!(descs[0].is_vertex(), descs[1].is_vertex());
            assert_eq!(descs[0].is_edge_point(), descs[1].is_edge_point());
        }
    }

    #[test]
    fn test_merge_records_absent_for_unshared_points() {
        let g0 = line_graph(&[0.0, 3.0], &[1.0, 2.0]);
        let g1 = line_graph(&[0.0, 5.0], &[1.0, 2.0]);
        let (index, table) = merge_graph_points(&[&g0, &g1]);

        // 3.0 only in g0, 5.0 only in g1, rest shared.
        assert_eq!(table.len(), 5);

        let at_3 = index.nearest(DVec3::new(3.0, 0.0, 0.0));
        assert!(table.descriptor(at_3, 0).is_vertex());
        assert_eq!(table.descriptor(at_3, 1), PointDescriptor::Absent);

        let at_5 = index.nearest(DVec3::new(5.0, 0.0, 0.0));
        assert_eq!(table.descriptor(at_5, 0), PointDescriptor::Absent);
        assert!(table.descriptor(at_5, 1).is_vertex());
    }

    #[test]
    fn test_vertex_descriptor_not_overwritten_by_edge_point() {
        // Degenerate: an edge path revisits a vertex position.
        let mut g = SpatialGraph::new_undirected();
        let a = g.add_node(SpatialNode::new(Point3::new(0.0, 0.0, 0.0)));
        let b = g.add_node(SpatialNode::new(Point3::new(2.0, 0.0, 0.0)));
        g.add_edge(
            a,
            b,
            SpatialEdge::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]),
        );

        let (index, table) = merge_graph_points(&[&g]);
        let at_origin = index.nearest(DVec3::ZERO);
        assert_eq!(table.descriptor(at_origin, 0), PointDescriptor::Vertex(a));
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(PointDescriptor::Absent.to_string(), "absent");
        assert_eq!(
            PointDescriptor::Vertex(NodeIndex::new(3)).to_string(),
            "vertex 3"
        );
        assert_eq!(
            PointDescriptor::EdgePoint {
                edge: EdgeIndex::new(1),
                index: 4
            }
            .to_string(),
            "edge 1 point 4"
        );
    }
}
