//! Live-neighbour accounting over a box.
//!
//! Counts are computed from a read-only sweep (split over z slices on the
//! simulation's thread pool) and then written back in scan order, so the
//! result never depends on the number of threads.

use rayon::prelude::*;

use super::grid::{Activity, Grid};
use super::links::LinkSet;
use super::region::Bounds;

/// Live-neighbour counts of the cell at `idx`, per linked class.
pub fn activity_at(grid: &Grid, links: &LinkSet, idx: usize) -> Activity {
    let coord = grid.coord_of(idx);
    let mut activity = Activity::empty(grid.topology());
    for (slot, class) in links.classes().enumerate() {
        let live = links
            .neighbors(coord, idx, slot)
            .filter(|&n| grid.cell_at(n).alive)
            .count();
        activity.set(class, live as u8);
    }
    activity
}

/// Recompute the cached activity of every cell in `bounds`.
pub fn refresh(grid: &mut Grid, links: &LinkSet, bounds: Bounds, pool: &rayon::ThreadPool) {
    if bounds.is_empty() {
        return;
    }

    let snapshot: &Grid = grid;
    let updates: Vec<(usize, Activity)> = pool.install(|| {
        (bounds.lo.z..=bounds.hi.z)
            .into_par_iter()
            .flat_map_iter(|z| {
                bounds.slice(z).map(move |c| {
                    let idx = snapshot.index_of(c);
                    (idx, activity_at(snapshot, links, idx))
                })
            })
            .collect()
    });

    for (idx, activity) in updates {
        grid.set_activity_at(idx, activity);
    }
}
