//! Bounding-region tracking and box extraction/import.

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Dims, Grid};
use super::topology::Topology;

/// Inclusive axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub lo: Coord,
    pub hi: Coord,
}

impl Bounds {
    /// A box that contains nothing.
    pub const EMPTY: Bounds = Bounds::new(Coord::new(1, 0, 0), Coord::new(0, 0, 0));

    pub const fn new(lo: Coord, hi: Coord) -> Self {
        Bounds { lo, hi }
    }

    pub fn is_empty(&self) -> bool {
        self.lo.x > self.hi.x || self.lo.y > self.hi.y || self.lo.z > self.hi.z
    }

    /// Per-axis size; zero on every axis when empty.
    pub fn extent(&self) -> Dims {
        if self.is_empty() {
            return Dims::default();
        }
        Dims::new(
            self.hi.x - self.lo.x + 1,
            self.hi.y - self.lo.y + 1,
            self.hi.z - self.lo.z + 1,
        )
    }

    pub fn contains(&self, c: Coord) -> bool {
        (self.lo.x..=self.hi.x).contains(&c.x)
            && (self.lo.y..=self.hi.y).contains(&c.y)
            && (self.lo.z..=self.hi.z).contains(&c.z)
    }

    /// Coordinates in scan order: z slowest, x fastest.
    pub fn iter(&self) -> impl Iterator<Item = Coord> {
        let b = *self;
        let (ys, xs) = (b.lo.y..=b.hi.y, b.lo.x..=b.hi.x);
        (b.lo.z..=b.hi.z).flat_map(move |z| {
            let xs = xs.clone();
            ys.clone()
                .flat_map(move |y| xs.clone().map(move |x| Coord::new(x, y, z)))
        })
    }

    /// Coordinates of the slice `z`, in scan order.
    pub fn slice(&self, z: usize) -> impl Iterator<Item = Coord> {
        let b = *self;
        let xs = b.lo.x..=b.hi.x;
        (b.lo.y..=b.hi.y).flat_map(move |y| xs.clone().map(move |x| Coord::new(x, y, z)))
    }

    /// Same box with its `y` range replaced.
    pub fn with_layers(&self, lo_y: usize, hi_y: usize) -> Self {
        let mut b = *self;
        b.lo.y = lo_y;
        b.hi.y = hi_y;
        b
    }
}

/// Minimal scan region, kept one cell wider than the live extent and
/// clamped to the grid interior on every tracked axis.
#[derive(Debug, Clone)]
pub struct Region {
    topology: Topology,
    dims: Dims,
    bounds: Bounds,
}

impl Region {
    /// Degenerate region at the grid centre, before any cell is included.
    pub fn centered(topology: Topology, dims: Dims) -> Self {
        let mut lo = Coord::default();
        for axis in topology.tracked_axes() {
            axis.set(&mut lo, axis.extent(dims) / 2);
        }
        Region {
            topology,
            dims,
            bounds: Bounds::new(lo, lo),
        }
    }

    /// Full rescan: the centred region grown around every live cell.
    pub fn around_live(grid: &Grid) -> Self {
        let dims = grid.dims();
        let mut region = Region::centered(grid.topology(), dims);
        for idx in 0..dims.volume() {
            if grid.cell_at(idx).alive {
                region.include(grid.coord_of(idx));
            }
        }
        region
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    fn high_limit(extent: usize) -> usize {
        extent - 2
    }

    /// Grow to cover `c` plus a one-cell margin. Never shrinks, never leaves
    /// the interior `1..=size-2`.
    pub fn include(&mut self, c: Coord) {
        for axis in self.topology.tracked_axes() {
            let v = axis.of(c);
            let limit = Self::high_limit(axis.extent(self.dims));

            let lo = axis.of(self.bounds.lo);
            if v <= lo && lo != 1 {
                axis.set(&mut self.bounds.lo, v.saturating_sub(1).max(1));
            }
            let hi = axis.of(self.bounds.hi);
            if v >= hi && hi != limit {
                axis.set(&mut self.bounds.hi, (v + 1).min(limit));
            }
        }
    }

    /// Whether any tracked bound sits on its interior limit.
    pub fn reached_edge(&self) -> bool {
        self.topology.tracked_axes().iter().any(|axis| {
            axis.of(self.bounds.lo) == 1
                || axis.of(self.bounds.hi) == Self::high_limit(axis.extent(self.dims))
        })
    }

    /// Cells strictly inside the region on the tracked axes.
    pub fn interior(&self) -> Bounds {
        let mut b = self.bounds;
        for axis in self.topology.tracked_axes() {
            let (lo, hi) = (axis.of(self.bounds.lo), axis.of(self.bounds.hi));
            if hi < lo + 2 {
                return Bounds::EMPTY;
            }
            axis.set(&mut b.lo, lo + 1);
            axis.set(&mut b.hi, hi - 1);
        }
        b
    }
}

/// Copy the liveness of `bounds` into `out_buf` as 0/1 bytes.
///
/// # Layout
/// z,y,x order (z changes slowest, x fastest), matching `import_region`.
///
/// # Returns
/// Number of bytes written, or 0 if the box is empty or the buffer too small.
/// The box is clamped to the grid first.
pub fn extract_region(grid: &Grid, bounds: Bounds, out_buf: &mut [u8]) -> usize {
    let dims = grid.dims();
    if bounds.is_empty() || dims.volume() == 0 {
        return 0;
    }
    let clamped = Bounds::new(
        bounds.lo,
        Coord::new(
            bounds.hi.x.min(dims.width - 1),
            bounds.hi.y.min(dims.height - 1),
            bounds.hi.z.min(dims.depth - 1),
        ),
    );
    if clamped.is_empty() {
        return 0;
    }

    let e = clamped.extent();
    let total_size = e.volume();
    if out_buf.len() < total_size {
        return 0;
    }

    for (offset, c) in clamped.iter().enumerate() {
        out_buf[offset] = grid.cell(c).alive as u8;
    }

    total_size
}

/// Birth every cell of `bounds` whose byte in `in_buf` is non-zero.
///
/// # Layout
/// z,y,x order, matching `extract_region`.
///
/// # Returns
/// Number of cells born. Nothing is touched if `in_buf` is shorter than the box.
pub fn import_region(grid: &mut Grid, bounds: Bounds, in_buf: &[u8]) -> usize {
    if bounds.is_empty() || in_buf.len() < bounds.extent().volume() {
        return 0;
    }

    let mut born = 0;
    for (offset, c) in bounds.iter().enumerate() {
        if in_buf[offset] != 0 && grid.birth(c) {
            born += 1;
        }
    }
    born
}
