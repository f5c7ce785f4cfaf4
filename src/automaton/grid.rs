//! Dense cell store and per-cell records.

use serde::{Deserialize, Serialize};

use super::topology::{NeighborClass, Topology};

/// Integer lattice coordinate. Hex lattices use `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Coord { x, y, z }
    }
}

/// Grid extent per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl Dims {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Dims {
            width,
            height,
            depth,
        }
    }

    pub fn volume(&self) -> usize {
        self.width * self.height * self.depth
    }
}

/// Cached live-neighbour counts, shaped per topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Hex { sides: u8 },
    Layered { edges: u8, corners: u8 },
    Cubic { faces: u8, edges: u8, corners: u8 },
}

impl Activity {
    pub fn empty(topology: Topology) -> Self {
        match topology {
            Topology::Hex2D => Activity::Hex { sides: 0 },
            Topology::Layered2D => Activity::Layered {
                edges: 0,
                corners: 0,
            },
            Topology::Cubic3D => Activity::Cubic {
                faces: 0,
                edges: 0,
                corners: 0,
            },
        }
    }

    /// Count for `class`; classes a topology lacks read as zero.
    pub fn count(&self, class: NeighborClass) -> u8 {
        match (*self, class) {
            (Activity::Hex { sides }, NeighborClass::Side) => sides,
            (Activity::Layered { edges, .. }, NeighborClass::Edge) => edges,
            (Activity::Layered { corners, .. }, NeighborClass::Corner) => corners,
            (Activity::Cubic { faces, .. }, NeighborClass::Face) => faces,
            (Activity::Cubic { edges, .. }, NeighborClass::Edge) => edges,
            (Activity::Cubic { corners, .. }, NeighborClass::Corner) => corners,
            _ => 0,
        }
    }

    pub fn set(&mut self, class: NeighborClass, value: u8) {
        match (self, class) {
            (Activity::Hex { sides }, NeighborClass::Side) => *sides = value,
            (Activity::Layered { edges, .. }, NeighborClass::Edge) => *edges = value,
            (Activity::Layered { corners, .. }, NeighborClass::Corner) => *corners = value,
            (Activity::Cubic { faces, .. }, NeighborClass::Face) => *faces = value,
            (Activity::Cubic { edges, .. }, NeighborClass::Edge) => *edges = value,
            (Activity::Cubic { corners, .. }, NeighborClass::Corner) => *corners = value,
            (activity, class) => panic!("{activity:?} has no {class:?} count"),
        }
    }

    /// Sum over every class.
    pub fn total(&self) -> u8 {
        match *self {
            Activity::Hex { sides } => sides,
            Activity::Layered { edges, corners } => edges + corners,
            Activity::Cubic {
                faces,
                edges,
                corners,
            } => faces + edges + corners,
        }
    }
}

/// One lattice site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    /// Excluded from birth evaluation: already alive, or an obstacle.
    pub frozen: bool,
    /// Geometry already submitted by the presentation layer.
    pub rendered: bool,
    pub activity: Activity,
}

impl Cell {
    fn empty(topology: Topology) -> Self {
        Cell {
            alive: false,
            frozen: false,
            rendered: false,
            activity: Activity::empty(topology),
        }
    }
}

/// Owns every cell of one run, addressed by coordinate.
pub struct Grid {
    topology: Topology,
    dims: Dims,
    cells: Vec<Cell>,
    live: usize,
}

impl Grid {
    /// Allocate an all-dead grid with edge length `grid_size`.
    pub fn new(topology: Topology, grid_size: usize) -> Self {
        let dims = topology.dims(grid_size);
        Grid {
            topology,
            dims,
            cells: vec![Cell::empty(topology); dims.volume()],
            live: 0,
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of live cells.
    pub fn live_cells(&self) -> usize {
        self.live
    }

    /// Check if coordinates are within grid bounds.
    #[inline]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.dims.width && coord.y < self.dims.height && coord.z < self.dims.depth
    }

    /// Linear index, z slowest and x fastest.
    ///
    /// # Panics
    /// If `coord` lies outside the grid.
    #[inline]
    pub fn index_of(&self, coord: Coord) -> usize {
        assert!(
            self.in_bounds(coord),
            "coordinate {coord:?} outside grid {:?}",
            self.dims
        );
        coord.z * self.dims.height * self.dims.width + coord.y * self.dims.width + coord.x
    }

    #[inline]
    pub fn coord_of(&self, idx: usize) -> Coord {
        let plane = self.dims.width * self.dims.height;
        Coord::new(
            idx % self.dims.width,
            (idx % plane) / self.dims.width,
            idx / plane,
        )
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.index_of(coord)]
    }

    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Make a cell alive (and frozen). Returns `false` if it already was.
    pub fn birth(&mut self, coord: Coord) -> bool {
        let idx = self.index_of(coord);
        self.birth_at(idx)
    }

    pub fn birth_at(&mut self, idx: usize) -> bool {
        let cell = &mut self.cells[idx];
        if cell.alive {
            return false;
        }
        cell.alive = true;
        cell.frozen = true;
        self.live += 1;
        true
    }

    /// Permanently exclude a cell from birth.
    pub fn freeze(&mut self, coord: Coord) {
        let idx = self.index_of(coord);
        self.cells[idx].frozen = true;
    }

    pub fn set_rendered(&mut self, coord: Coord, rendered: bool) {
        let idx = self.index_of(coord);
        self.cells[idx].rendered = rendered;
    }

    pub fn set_activity_at(&mut self, idx: usize, activity: Activity) {
        self.cells[idx].activity = activity;
    }

    /// Return every cell to dead, unfrozen, unrendered.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty(self.topology));
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grid() {
        let grid = Grid::new(Topology::Cubic3D, 8);
        assert_eq!(grid.dims(), Dims::new(8, 8, 8));
        assert_eq!(grid.live_cells(), 0);
        assert!((0..512).all(|i| !grid.cell_at(i).alive && !grid.cell_at(i).frozen));

        let hex = Grid::new(Topology::Hex2D, 10);
        assert_eq!(hex.dims(), Dims::new(10, 1, 10));
    }

    #[test]
    fn test_index_of() {
        let grid = Grid::new(Topology::Cubic3D, 4);

        assert_eq!(grid.index_of(Coord::new(0, 0, 0)), 0);
        assert_eq!(grid.index_of(Coord::new(3, 3, 3)), 63);
        assert_eq!(grid.index_of(Coord::new(1, 0, 0)), 1);
        assert_eq!(grid.index_of(Coord::new(0, 1, 0)), 4);
        assert_eq!(grid.index_of(Coord::new(0, 0, 1)), 16);

        for idx in [0, 5, 17, 42, 63] {
            assert_eq!(grid.index_of(grid.coord_of(idx)), idx);
        }
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn test_out_of_range_access_panics() {
        let grid = Grid::new(Topology::Cubic3D, 4);
        grid.cell(Coord::new(4, 0, 0));
    }

    #[test]
    fn test_birth_freezes_once() {
        let mut grid = Grid::new(Topology::Cubic3D, 8);
        let c = Coord::new(3, 4, 5);

        assert!(grid.birth(c));
        assert!(grid.cell(c).alive);
        assert!(grid.cell(c).frozen);
        assert_eq!(grid.live_cells(), 1);

        assert!(!grid.birth(c));
        assert_eq!(grid.live_cells(), 1);
    }

    #[test]
    fn test_freeze_is_independent_of_alive() {
        let mut grid = Grid::new(Topology::Cubic3D, 8);
        let c = Coord::new(2, 2, 2);
        grid.freeze(c);
        assert!(grid.cell(c).frozen);
        assert!(!grid.cell(c).alive);
        assert_eq!(grid.live_cells(), 0);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(Topology::Layered2D, 8);
        grid.birth(Coord::new(1, 0, 1));
        grid.freeze(Coord::new(2, 0, 2));
        grid.set_rendered(Coord::new(1, 0, 1), true);
        grid.clear();
        assert_eq!(grid.live_cells(), 0);
        assert_eq!(*grid.cell(Coord::new(1, 0, 1)), Cell::empty(Topology::Layered2D));
        assert!(!grid.cell(Coord::new(2, 0, 2)).frozen);
    }

    #[test]
    fn test_activity_counts_by_class() {
        let mut a = Activity::empty(Topology::Cubic3D);
        a.set(NeighborClass::Face, 2);
        a.set(NeighborClass::Edge, 5);
        a.set(NeighborClass::Corner, 1);
        assert_eq!(a.count(NeighborClass::Edge), 5);
        assert_eq!(a.count(NeighborClass::Side), 0);
        assert_eq!(a.total(), 8);

        let mut l = Activity::empty(Topology::Layered2D);
        l.set(NeighborClass::Edge, 3);
        l.set(NeighborClass::Corner, 1);
        assert_eq!(l.total(), 4);
    }
}
