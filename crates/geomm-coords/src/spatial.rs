//! Spatial hash grid for nearest-point queries
//!
//! Used by [`crate::distance::minimum_distance`].

use ahash::AHashMap;
use lin_alg::f64::Vec3;

type CellKey = (i64, i64, i64);

/// Uniform cubic-cell hash over a fixed set of points.
///
/// Cells are keyed relative to the lower corner of the points' bounding box.
/// Queries walk outward ring by ring (Chebyshev cell distance), which is
/// what lets the nearest-point search stop early.
pub(crate) struct SpatialGrid {
    cells: AHashMap<CellKey, Vec<usize>>,
    cell_size: f64,
    origin: Vec3,
    /// Inclusive range of occupied cell keys on each axis
    lo: [i64; 3],
    hi: [i64; 3],
}

impl SpatialGrid {
    /// Build a grid over `points` with roughly one point per cell.
    ///
    /// `points` must not be empty.
    pub fn new(points: &[Vec3]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in points {
            min = Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        let extent = (max.x - min.x).max(max.y - min.y).max(max.z - min.z);
        let per_axis = (points.len() as f64).cbrt().max(1.0);
        let cell_size = if extent > 0.0 { extent / per_axis } else { 1.0 };

        let mut grid = Self {
            cells: AHashMap::with_capacity(points.len()),
            cell_size,
            origin: min,
            lo: [i64::MAX; 3],
            hi: [i64::MIN; 3],
        };
        for (idx, &p) in points.iter().enumerate() {
            grid.insert(p, idx);
        }
        grid
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_key(&self, pos: Vec3) -> CellKey {
        (
            ((pos.x - self.origin.x) / self.cell_size).floor() as i64,
            ((pos.y - self.origin.y) / self.cell_size).floor() as i64,
            ((pos.z - self.origin.z) / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, pos: Vec3, idx: usize) {
        let key = self.cell_key(pos);
        let k = [key.0, key.1, key.2];
        for axis in 0..3 {
            self.lo[axis] = self.lo[axis].min(k[axis]);
            self.hi[axis] = self.hi[axis].max(k[axis]);
        }
        self.cells.entry(key).or_default().push(idx);
    }

    /// Smallest ring around `pos` that can contain an occupied cell
    pub fn first_ring(&self, pos: Vec3) -> i64 {
        let (cx, cy, cz) = self.cell_key(pos);
        let gap = |c: i64, axis: usize| (self.lo[axis] - c).max(c - self.hi[axis]).max(0);
        gap(cx, 0).max(gap(cy, 1)).max(gap(cz, 2))
    }

    /// Largest ring around `pos` that can contain an occupied cell
    pub fn last_ring(&self, pos: Vec3) -> i64 {
        let (cx, cy, cz) = self.cell_key(pos);
        let reach = |c: i64, axis: usize| (c - self.lo[axis]).abs().max((self.hi[axis] - c).abs());
        reach(cx, 0).max(reach(cy, 1)).max(reach(cz, 2))
    }

    /// Collect indices in cells at exactly Chebyshev distance `ring` from `pos`'s cell.
    ///
    /// Any point in ring `r` is at least `(r - 1) * cell_size` away from `pos`.
    pub fn query_ring(&self, pos: Vec3, ring: i64, out: &mut Vec<usize>) {
        out.clear();
        let c = {
            let (x, y, z) = self.cell_key(pos);
            [x, y, z]
        };
        // Only walk the part of the ring that overlaps occupied cells
        let range = |axis: usize| {
            let from = (c[axis] - ring).max(self.lo[axis]);
            let to = (c[axis] + ring).min(self.hi[axis]);
            from..=to
        };
        for x in range(0) {
            for y in range(1) {
                for z in range(2) {
                    let d = (x - c[0]).abs().max((y - c[1]).abs()).max((z - c[2]).abs());
                    if d != ring {
                        continue;
                    }
                    if let Some(indices) = self.cells.get(&(x, y, z)) {
                        out.extend_from_slice(indices);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query_own_cell() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.0, 0.1, 0.0),
            Vec3::new(8.0, 8.0, 8.0),
        ];
        let grid = SpatialGrid::new(&points);

        let mut found = Vec::new();
        grid.query_ring(Vec3::new(0.05, 0.05, 0.0), 0, &mut found);
        found.sort();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_rings_partition_all_points() {
        let points: Vec<Vec3> = (0..27)
            .map(|i| Vec3::new((i % 3) as f64, ((i / 3) % 3) as f64, (i / 9) as f64))
            .collect();
        let grid = SpatialGrid::new(&points);
        let query = Vec3::new(-5.0, 1.0, 1.0);

        let mut all = Vec::new();
        let mut ring = Vec::new();
        for r in grid.first_ring(query)..=grid.last_ring(query) {
            grid.query_ring(query, r, &mut ring);
            all.extend_from_slice(&ring);
        }
        all.sort();
        assert_eq!(all, (0..27).collect::<Vec<_>>());
    }

    #[test]
    fn test_single_point_grid() {
        let grid = SpatialGrid::new(&[Vec3::new(-1.0, -1.0, -1.0)]);
        assert_eq!(grid.cell_size(), 1.0);
        let mut found = Vec::new();
        grid.query_ring(Vec3::new(-1.0, -1.0, -1.0), 0, &mut found);
        assert_eq!(found, vec![0]);
    }

    #[test]
    fn test_first_ring_skips_empty_space() {
        let grid = SpatialGrid::new(&[Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)]);
        // far query: nothing can be closer than the bounding cells
        assert!(grid.first_ring(Vec3::new(100.0, 0.0, 0.0)) > 10);
        assert_eq!(grid.first_ring(Vec3::new(0.5, 0.0, 0.0)), 0);
    }
}
