//! Error type for recoverable failures.
//!
//! Broken invariants (out-of-range coordinates, links used before they were
//! built) panic instead; only caller-supplied configuration and export I/O
//! surface here.

use thiserror::Error;

use crate::automaton::topology::Topology;

/// Errors returned by the simulation and export APIs.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// Mirror seeding asked for more axes than the topology has, or zero.
    #[error("symmetric seeding supports 1 to {max} mirror axes on this lattice, got {requested}")]
    UnsupportedMirrorAxes { requested: u8, max: u8 },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// An explicit seed cell lies outside the seedable interior.
    #[error("seed cell ({x}, {y}, {z}) lies outside the seedable interior")]
    SeedOutOfBounds { x: usize, y: usize, z: usize },

    /// The operation has no meaning for this topology.
    #[error("{operation} is not available on the {topology:?} lattice")]
    Unsupported {
        operation: &'static str,
        topology: Topology,
    },

    /// Malformed saved config text.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
