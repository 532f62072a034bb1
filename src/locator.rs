//! Descriptor resolution against the merged point index.
//!
//! Answers "what is this position in graph K?" for arbitrary query points:
//! either via the single nearest merged point, or via a within-radius scan
//! that projects each source graph onto its closest *existing* point. The
//! radius form is what the comparison passes use to look past discretization
//! noise: the nearest merged point may be absent in the graph of interest
//! while a point a fraction of a unit away is not.

use crate::graph::SpatialGraph;
use crate::merge::{merge_graph_points, MergedPointTable, PointDescriptor};
use crate::point_index::SpatialPointIndex;
use glam::DVec3;

/// A merged point returned from a radius query, nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusNeighbor {
    /// Merged point id, usable with [`MergedPointTable`] lookups.
    pub id: u32,
    /// Euclidean distance from the query position.
    pub distance: f64,
}

/// Merged index plus descriptor table for a fixed, ordered list of graphs.
pub struct GraphPointLocator {
    index: SpatialPointIndex,
    table: MergedPointTable,
}

impl GraphPointLocator {
    /// Merge the graphs' points and build the locator over them.
    ///
    /// Graph order defines the source index used by all descriptor lookups.
    pub fn build(graphs: &[&SpatialGraph]) -> Self {
        let (index, table) = merge_graph_points(graphs);
        Self { index, table }
    }

    #[inline]
    pub fn table(&self) -> &MergedPointTable {
        &self.table
    }

    #[inline]
    pub fn index(&self) -> &SpatialPointIndex {
        &self.index
    }

    /// Descriptor of the merged point nearest to `pos`, in `graph_index`.
    ///
    /// Total: always returns a value; `Absent` means the nearest merged
    /// point has no counterpart in that graph.
    pub fn nearest_descriptor(&self, pos: DVec3, graph_index: usize) -> PointDescriptor {
        self.table.descriptor(self.index.nearest(pos), graph_index)
    }

    /// Merged points within `radius` of `pos` that exist in at least one
    /// graph, nearest first, distance ties by id.
    pub fn closest_points_by_radius(&self, pos: DVec3, radius: f64) -> Vec<RadiusNeighbor> {
        self.index
            .within_radius(pos, radius)
            .into_iter()
            .filter(|&(id, _)| self.table.exists_in_any(id))
            .map(|(id, distance)| RadiusNeighbor { id, distance })
            .collect()
    }

    /// Descriptor of the closest in-radius merged point that exists in
    /// `graph_index`, or `Absent` if none does.
    pub fn closest_existing_descriptor(
        &self,
        pos: DVec3,
        radius: f64,
        graph_index: usize,
    ) -> PointDescriptor {
        for (id, _) in self.index.within_radius(pos, radius) {
            let desc = self.table.descriptor(id, graph_index);
            if desc.exists() {
                return desc;
            }
        }
        PointDescriptor::Absent
    }

    /// Per-graph projection of `pos`: for every source graph, the descriptor
    /// of the closest in-radius merged point existing in that graph
    /// (`Absent` where a graph has nothing within `radius`).
    pub fn closest_existing_descriptors(&self, pos: DVec3, radius: f64) -> Vec<PointDescriptor> {
        let num_graphs = self.table.num_graphs();
        let mut out = vec![PointDescriptor::Absent; num_graphs];
        let mut unresolved = num_graphs;
        for (id, _) in self.index.within_radius(pos, radius) {
            for (k, desc) in self.table.descriptors(id).iter().enumerate() {
                if desc.exists() && !out[k].exists() {
                    out[k] = *desc;
                    unresolved -= 1;
                }
            }
            if unresolved == 0 {
                break;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{SpatialEdge, SpatialNode};
    use crate::Point3;

    fn segment(ax: f64, bx: f64, interior: &[f64]) -> SpatialGraph {
        let mut g = SpatialGraph::new_undirected();
        let a = g.add_node(SpatialNode::new(Point3::new(ax, 0.0, 0.0)));
        let b = g.add_node(SpatialNode::new(Point3::new(bx, 0.0, 0.0)));
        let points = interior
            .iter()
            .map(|&x| Point3::new(x, 0.0, 0.0))
            .collect();
        g.add_edge(a, b, SpatialEdge::new(points));
        g
    }

    #[test]
    fn test_nearest_descriptor_is_total() {
        let g0 = segment(0.0, 3.0, &[1.0, 2.0]);
        let g1 = segment(0.0, 5.0, &[1.0]);
        let locator = GraphPointLocator::build(&[&g0, &g1]);

        // 5.0 exists only in g1; asking for g0 yields Absent, not a failure.
        let far = DVec3::new(5.0, 0.0, 0.0);
        assert_eq!(locator.nearest_descriptor(far, 0), PointDescriptor::Absent);
        assert!(locator.nearest_descriptor(far, 1).is_vertex());

        // Arbitrary off-structure positions still resolve.
        let off = DVec3::new(100.0, -40.0, 7.0);
        assert!(locator.nearest_descriptor(off, 1).exists());
    }

    #[test]
    fn test_closest_existing_descriptor_skips_absent_points() {
        let g0 = segment(0.0, 3.0, &[1.0, 2.0]);
        let g1 = segment(0.0, 5.0, &[1.0]);
        let locator = GraphPointLocator::build(&[&g0, &g1]);

        // Nearest merged point to 4.9 is g1's vertex at 5.0, which is absent
        // in g0; the projection walks on to g0's vertex at 3.0.
        let q = DVec3::new(4.9, 0.0, 0.0);
        assert_eq!(
            locator.closest_existing_descriptor(q, 0.5, 0),
            PointDescriptor::Absent
        );
        assert!(locator
            .closest_existing_descriptor(q, 3.0, 0)
            .is_vertex());
    }

    #[test]
    fn test_closest_existing_descriptors_by_graph() {
        let g0 = segment(0.0, 3.0, &[1.0, 2.0]);
        let g1 = segment(0.0, 5.0, &[1.0]);
        let locator = GraphPointLocator::build(&[&g0, &g1]);

        let descs = locator.closest_existing_descriptors(DVec3::new(2.0, 0.0, 0.0), 1.5);
        assert_eq!(descs.len(), 2);
        // g0 has an edge point exactly at the query.
        assert!(descs[0].is_edge_point());
        // g1's closest existing point is the edge point at 1.0.
        assert!(descs[1].is_edge_point());
    }

    #[test]
    fn test_radius_neighbors_nearest_first() {
        let g0 = segment(0.0, 3.0, &[1.0, 2.0]);
        let locator = GraphPointLocator::build(&[&g0]);

        let neighbors = locator.closest_points_by_radius(DVec3::new(1.1, 0.0, 0.0), 1.5);
        assert!(!neighbors.is_empty());
        for w in neighbors.windows(2) {
            assert!(w[0].distance <= w[1].distance);
        }
        let nearest = neighbors[0];
        assert_eq!(locator.index().point(nearest.id), DVec3::new(1.0, 0.0, 0.0));
    }
}
