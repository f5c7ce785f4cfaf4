//! Lattice topologies and their neighbour offset tables.
//!
//! Three lattices share one coordinate space (`x`, `y`, `z`):
//! - `Hex2D`: a single plane (`y == 0`) of hexagons in odd/even column
//!   offset coding, one undivided class of six sides.
//! - `Layered2D`: stacked `x`/`z` planes. Only in-plane neighbours exist; a
//!   layer grows by reading the activity of the layer below it.
//! - `Cubic3D`: the full cube with 6 face, 12 edge and 8 corner neighbours.

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Dims};

/// The lattice a simulation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    Hex2D,
    Layered2D,
    Cubic3D,
}

/// Neighbourhood definition in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// Face-sharing neighbours only.
    VonNeumann,
    /// Face, edge and corner neighbours.
    Moore,
}

impl Neighborhood {
    pub fn toggled(self) -> Self {
        match self {
            Neighborhood::VonNeumann => Neighborhood::Moore,
            Neighborhood::Moore => Neighborhood::VonNeumann,
        }
    }
}

/// A geometric relation shared by a subset of a cell's neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborClass {
    /// The six sides of a hexagon.
    Side,
    Face,
    Edge,
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn of(self, coord: Coord) -> usize {
        match self {
            Axis::X => coord.x,
            Axis::Y => coord.y,
            Axis::Z => coord.z,
        }
    }

    #[inline]
    pub fn set(self, coord: &mut Coord, value: usize) {
        match self {
            Axis::X => coord.x = value,
            Axis::Y => coord.y = value,
            Axis::Z => coord.z = value,
        }
    }

    #[inline]
    pub fn extent(self, dims: Dims) -> usize {
        match self {
            Axis::X => dims.width,
            Axis::Y => dims.height,
            Axis::Z => dims.depth,
        }
    }
}

/// Relative position of a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
    pub dz: i8,
}

const fn off(dx: i8, dy: i8, dz: i8) -> Offset {
    Offset { dx, dy, dz }
}

pub const CUBE_FACES: [Offset; 6] = [
    off(-1, 0, 0),
    off(1, 0, 0),
    off(0, -1, 0),
    off(0, 1, 0),
    off(0, 0, -1),
    off(0, 0, 1),
];

pub const CUBE_EDGES: [Offset; 12] = [
    off(-1, 1, 0),
    off(1, 1, 0),
    off(0, 1, -1),
    off(0, 1, 1),
    off(-1, 0, -1),
    off(-1, 0, 1),
    off(1, 0, -1),
    off(1, 0, 1),
    off(-1, -1, 0),
    off(1, -1, 0),
    off(0, -1, -1),
    off(0, -1, 1),
];

pub const CUBE_CORNERS: [Offset; 8] = [
    off(-1, 1, -1),
    off(-1, 1, 1),
    off(1, 1, -1),
    off(1, 1, 1),
    off(-1, -1, -1),
    off(-1, -1, 1),
    off(1, -1, -1),
    off(1, -1, 1),
];

/// In-plane (`x`/`z`) neighbours sharing an edge.
pub const PLANE_EDGES: [Offset; 4] = [off(-1, 0, 0), off(1, 0, 0), off(0, 0, -1), off(0, 0, 1)];

/// In-plane diagonal neighbours.
pub const PLANE_CORNERS: [Offset; 4] = [off(-1, 0, -1), off(-1, 0, 1), off(1, 0, -1), off(1, 0, 1)];

/// Hexagon sides for an even column.
pub const HEX_EVEN: [Offset; 6] = [
    off(-1, 0, 0),
    off(1, 0, 0),
    off(0, 0, -1),
    off(0, 0, 1),
    off(-1, 0, -1),
    off(1, 0, -1),
];

/// Hexagon sides for an odd column (the diagonal pair shifts up a row).
pub const HEX_ODD: [Offset; 6] = [
    off(-1, 0, 0),
    off(1, 0, 0),
    off(0, 0, -1),
    off(0, 0, 1),
    off(-1, 0, 1),
    off(1, 0, 1),
];

impl Topology {
    /// Grid dimensions for an edge length of `grid_size`.
    pub fn dims(self, grid_size: usize) -> Dims {
        match self {
            Topology::Hex2D => Dims::new(grid_size, 1, grid_size),
            Topology::Layered2D | Topology::Cubic3D => Dims::new(grid_size, grid_size, grid_size),
        }
    }

    /// Neighbour classes in use, in the order their counts are stored.
    pub fn classes(self, neighborhood: Neighborhood) -> &'static [NeighborClass] {
        use NeighborClass::*;
        match (self, neighborhood) {
            (Topology::Hex2D, _) => &[Side],
            (Topology::Layered2D, Neighborhood::VonNeumann) => &[Edge],
            (Topology::Layered2D, Neighborhood::Moore) => &[Edge, Corner],
            (Topology::Cubic3D, Neighborhood::VonNeumann) => &[Face],
            (Topology::Cubic3D, Neighborhood::Moore) => &[Face, Edge, Corner],
        }
    }

    /// Offsets of `class` around a cell in column `x`.
    pub fn offsets(self, class: NeighborClass, x: usize) -> &'static [Offset] {
        match (self, class) {
            (Topology::Hex2D, NeighborClass::Side) if x % 2 == 0 => &HEX_EVEN,
            (Topology::Hex2D, NeighborClass::Side) => &HEX_ODD,
            (Topology::Layered2D, NeighborClass::Edge) => &PLANE_EDGES,
            (Topology::Layered2D, NeighborClass::Corner) => &PLANE_CORNERS,
            (Topology::Cubic3D, NeighborClass::Face) => &CUBE_FACES,
            (Topology::Cubic3D, NeighborClass::Edge) => &CUBE_EDGES,
            (Topology::Cubic3D, NeighborClass::Corner) => &CUBE_CORNERS,
            (topology, class) => panic!("{topology:?} lattice has no {class:?} neighbours"),
        }
    }

    /// Axes along which the bounding region grows.
    pub fn tracked_axes(self) -> &'static [Axis] {
        match self {
            Topology::Hex2D | Topology::Layered2D => &[Axis::X, Axis::Z],
            Topology::Cubic3D => &[Axis::X, Axis::Y, Axis::Z],
        }
    }

    pub fn max_mirror_axes(self) -> u8 {
        self.tracked_axes().len() as u8
    }

    /// Largest count a class can reach.
    pub fn capacity(self, class: NeighborClass) -> u8 {
        self.offsets(class, 0).len() as u8
    }

    /// Whether `coord` carries neighbour links. The outermost ring on every
    /// tracked axis never does.
    #[inline]
    pub fn is_linked(self, dims: Dims, coord: Coord) -> bool {
        self.tracked_axes().iter().all(|axis| {
            let v = axis.of(coord);
            v >= 1 && v + 1 < axis.extent(dims)
        })
    }

    /// Coordinate of the neighbour at `offset`, or `None` on the boundary ring.
    pub fn neighbor(self, dims: Dims, coord: Coord, offset: Offset) -> Option<Coord> {
        if !self.is_linked(dims, coord) {
            return None;
        }
        let shift = |v: usize, d: i8| (v as isize + d as isize) as usize;
        Some(Coord::new(
            shift(coord.x, offset.dx),
            shift(coord.y, offset.dy),
            shift(coord.z, offset.dz),
        ))
    }
}
