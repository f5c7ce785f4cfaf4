//! Core growth engine.
//!
//! This module holds the lattice geometry, the cell store, neighbour
//! accounting, rules, region tracking, seeding and the driver that ties
//! them together. The FFI layer in `ffi/` calls into [`Simulation`].

pub mod accounting;
pub mod grid;
pub mod links;
pub mod region;
pub mod rules;
pub mod seed;
pub mod simulation;
pub mod stepping;
pub mod topology;

pub use grid::{Activity, Cell, Coord, Dims, Grid};
pub use region::{extract_region, import_region, Bounds, Region};
pub use rules::{BirthCounts, MooreTable, RuleTable, Rules, VonNeumannTable};
pub use seed::{SeedPattern, SeedSnapshot};
pub use simulation::Simulation;
pub use topology::{NeighborClass, Neighborhood, Topology};
