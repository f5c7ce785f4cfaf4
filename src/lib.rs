//! Lattice Growth - cellular automaton crystal growth.
//!
//! Grows structures from a seed on a hex plane, a stack of square layers
//! or a full cube, one birth batch per step, until nothing more can be born
//! or the growth reaches the grid edge. The Rust API lives in
//! [`automaton`]; [`ffi`] exposes a C ABI for a rendering host.

pub mod automaton;
pub mod config;
pub mod error;
pub mod export;
pub mod ffi;
pub mod state;

pub use automaton::{Coord, Neighborhood, SeedPattern, Simulation, Topology};
pub use config::SimConfig;
pub use error::GrowthError;
pub use state::{Phase, SimulationState, StepReport, StopReason};
