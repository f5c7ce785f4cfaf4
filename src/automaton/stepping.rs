//! Birth-candidate scan.

use rayon::prelude::*;

use super::grid::{Coord, Grid};
use super::region::Bounds;
use super::rules::Rules;
use super::topology::Neighborhood;

/// Where a candidate reads its neighbour counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// The candidate's own cached activity.
    Own,
    /// The activity of the cell directly below (layered growth).
    Below,
}

/// Indices of every dead, unfrozen cell in `scan` that the rules turn on,
/// in scan order. Nothing is written; the caller commits the births.
pub fn collect_births(
    grid: &Grid,
    rules: &Rules,
    neighborhood: Neighborhood,
    scan: Bounds,
    source: CountSource,
    pool: &rayon::ThreadPool,
) -> Vec<usize> {
    if scan.is_empty() {
        return Vec::new();
    }

    let qualifies = |c: Coord| -> Option<usize> {
        let idx = grid.index_of(c);
        let cell = grid.cell_at(idx);
        if cell.alive || cell.frozen {
            return None;
        }
        let activity = match source {
            CountSource::Own => cell.activity,
            CountSource::Below if c.y == 0 => return None,
            CountSource::Below => grid.cell(Coord::new(c.x, c.y - 1, c.z)).activity,
        };
        rules.should_birth(&activity, neighborhood).then_some(idx)
    };

    pool.install(|| {
        (scan.lo.z..=scan.hi.z)
            .into_par_iter()
            .flat_map_iter(|z| scan.slice(z).filter_map(qualifies))
            .collect()
    })
}
