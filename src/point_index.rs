//! Nearest-neighbor and radius queries over a fixed 3D point set.
//!
//! Thin adapter over an R*-tree that pins down the determinism the
//! reconciliation passes rely on: nearest-point ties resolve to the lowest
//! insertion id, and radius results come back sorted by distance, ties by id.
//! Build once, query many; no mutation after build.

use glam::DVec3;
use rstar::primitives::GeomWithData;
use rstar::RTree;

/// A stored point tagged with its insertion id.
type IndexedPoint = GeomWithData<[f64; 3], u32>;

/// Spatial index over a non-empty set of 3D points.
pub struct SpatialPointIndex {
    tree: RTree<IndexedPoint>,
    points: Vec<DVec3>,
}

impl SpatialPointIndex {
    /// Build the index. Ids are assigned by position order (0..n).
    ///
    /// The point set must be non-empty; queries on an empty index are
    /// meaningless and indicate an upstream construction bug.
    pub fn new(points: Vec<DVec3>) -> Self {
        assert!(
            !points.is_empty(),
            "SpatialPointIndex requires a non-empty point set"
        );
        let entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y, p.z], i as u32))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            points,
        }
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of a stored point.
    #[inline]
    pub fn point(&self, id: u32) -> DVec3 {
        self.points[id as usize]
    }

    /// Id of the stored point closest to `query`.
    ///
    /// Distance ties resolve to the lowest id.
    pub fn nearest(&self, query: DVec3) -> u32 {
        let mut best_id = u32::MAX;
        let mut best_d2 = f64::INFINITY;
        for (entry, d2) in self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[query.x, query.y, query.z])
        {
            if d2 < best_d2 {
                best_d2 = d2;
                best_id = entry.data;
            } else if d2 == best_d2 {
                if entry.data < best_id {
                    best_id = entry.data;
                }
            } else {
                break;
            }
        }
        assert!(best_id != u32::MAX, "nearest query on empty index");
        best_id
    }

    /// All stored points within `radius` of `query`, as `(id, distance)`
    /// pairs sorted ascending by distance, ties by id ascending.
    pub fn within_radius(&self, query: DVec3, radius: f64) -> Vec<(u32, f64)> {
        let mut hits: Vec<(u32, f64)> = self
            .tree
            .locate_within_distance([query.x, query.y, query.z], radius * radius)
            .map(|entry| (entry.data, self.points[entry.data as usize].distance(query)))
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(points: &[[f64; 3]]) -> SpatialPointIndex {
        SpatialPointIndex::new(points.iter().map(|p| DVec3::from_array(*p)).collect())
    }

    #[test]
    fn test_nearest_basic() {
        let idx = index_of(&[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [0.0, 5.0, 0.0]]);
        assert_eq!(idx.nearest(DVec3::new(4.0, 0.5, 0.0)), 1);
        assert_eq!(idx.nearest(DVec3::new(0.1, 0.1, 0.0)), 0);
    }

    #[test]
    fn test_nearest_tie_breaks_to_lowest_id() {
        // Query equidistant from points 0 and 1.
        let idx = index_of(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        assert_eq!(idx.nearest(DVec3::new(1.0, 0.0, 0.0)), 0);

        // Same geometry, reversed insertion order: still the lowest id.
        let idx = index_of(&[[2.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
        assert_eq!(idx.nearest(DVec3::new(1.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_within_radius_sorted_by_distance() {
        let idx = index_of(&[
            [3.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
        ]);
        let hits = idx.within_radius(DVec3::ZERO, 3.5);
        let ids: Vec<u32> = hits.iter().map(|h| h.0).collect();
        assert_eq!(ids, vec![1, 2, 0]);
        for w in hits.windows(2) {
            assert!(w[0].1 <= w[1].1);
        }
    }

    #[test]
    fn test_within_radius_tie_breaks_by_id() {
        // Points 1 and 2 are both at distance 1 from the query.
        let idx = index_of(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]]);
        let hits = idx.within_radius(DVec3::ZERO, 1.5);
        let ids: Vec<u32> = hits.iter().map(|h| h.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_within_radius_empty_result() {
        let idx = index_of(&[[0.0, 0.0, 0.0]]);
        assert!(idx.within_radius(DVec3::new(100.0, 0.0, 0.0), 1.0).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_empty_index_rejected() {
        let _ = SpatialPointIndex::new(Vec::new());
    }
}
