//! Closest approach between two point sets

use lin_alg::f64::Vec3;

use crate::error::{GeomError, GeomResult};
use crate::spatial::SpatialGrid;

fn to_vec3(p: &[f64; 3]) -> Vec3 {
    Vec3::new(p[0], p[1], p[2])
}

/// Smallest Euclidean distance between any point of `a` and any point of `b`.
///
/// `b` is hashed into a uniform grid; each point of `a` then searches
/// outward ring by ring and stops once no unvisited cell can hold anything
/// closer than the best distance found so far.
pub fn minimum_distance(a: &[[f64; 3]], b: &[[f64; 3]]) -> GeomResult<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }

    let targets: Vec<Vec3> = b.iter().map(to_vec3).collect();
    let grid = SpatialGrid::new(&targets);
    let cell = grid.cell_size();

    let mut best_sq = f64::INFINITY;
    let mut ring_hits = Vec::new();
    for p in a.iter().map(to_vec3) {
        let last = grid.last_ring(p);
        let mut ring = grid.first_ring(p);
        while ring <= last {
            // Anything beyond this ring is at least `ring * cell` away
            let floor = (ring - 1).max(0) as f64 * cell;
            if floor * floor >= best_sq {
                break;
            }
            grid.query_ring(p, ring, &mut ring_hits);
            for &j in &ring_hits {
                let d = p - targets[j];
                best_sq = best_sq.min(d.dot(d));
            }
            ring += 1;
        }
    }

    Ok(best_sq.sqrt())
}
