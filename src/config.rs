//! Per-simulation configuration.

use serde::{Deserialize, Serialize};

use crate::automaton::grid::Coord;
use crate::automaton::region::Bounds;
use crate::automaton::seed::{self, SeedPattern};
use crate::automaton::topology::{Neighborhood, Topology};
use crate::error::GrowthError;

/// Smallest grid edge accepted.
pub const MIN_GRID_SIZE: usize = 8;

/// Largest number of cells one grid may hold.
pub const MAX_CELLS: usize = 1 << 27;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub topology: Topology,
    pub grid_size: usize,
    pub seed_size: usize,
    pub seed_pattern: SeedPattern,
    pub neighborhood: Neighborhood,
    /// Seeds the stream the seed generator draws from.
    pub rng_seed: u64,
    /// Seeds the cubic rule tables.
    pub rule_seed: u64,
    pub von_neumann_probability: f64,
    pub moore_probability: f64,
    /// Side counts that grow a hex cell.
    pub hex_birth: Vec<u8>,
    /// Edge + corner counts below a layered cell that grow it.
    pub layered_birth: Vec<u8>,
    /// Inclusive boxes frozen at every reset.
    pub obstacles: Vec<Bounds>,
    /// Worker threads for the scan and accounting sweeps.
    pub threads: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig::cubic()
    }
}

impl SimConfig {
    pub fn cubic() -> Self {
        SimConfig {
            topology: Topology::Cubic3D,
            grid_size: 100,
            seed_size: 8,
            seed_pattern: SeedPattern::Random,
            neighborhood: Neighborhood::VonNeumann,
            rng_seed: 0,
            rule_seed: 0,
            von_neumann_probability: 0.5,
            moore_probability: 0.2,
            hex_birth: vec![1, 3, 5],
            layered_birth: vec![3, 4],
            obstacles: Vec::new(),
            threads: 1,
        }
    }

    pub fn hex() -> Self {
        SimConfig {
            topology: Topology::Hex2D,
            grid_size: 800,
            ..SimConfig::cubic()
        }
    }

    pub fn layered() -> Self {
        SimConfig {
            topology: Topology::Layered2D,
            seed_size: 90,
            ..SimConfig::cubic()
        }
    }

    /// Largest neighbour total a fixed birth count may name.
    fn max_count(topology: Topology) -> u8 {
        topology
            .classes(Neighborhood::Moore)
            .iter()
            .map(|&class| topology.capacity(class))
            .sum()
    }

    fn cell_count(&self) -> Option<usize> {
        let plane = self.grid_size.checked_mul(self.grid_size)?;
        match self.topology {
            Topology::Hex2D => Some(plane),
            Topology::Layered2D | Topology::Cubic3D => plane.checked_mul(self.grid_size),
        }
    }

    pub fn validate(&self) -> Result<(), GrowthError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(GrowthError::InvalidConfig("grid size must be at least 8"));
        }
        if self.cell_count().map_or(true, |cells| cells > MAX_CELLS) {
            return Err(GrowthError::InvalidConfig("grid holds too many cells"));
        }
        if self.threads == 0 {
            return Err(GrowthError::InvalidConfig("thread count must be at least 1"));
        }
        for p in [self.von_neumann_probability, self.moore_probability] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GrowthError::InvalidConfig(
                    "rule probabilities must lie in [0, 1]",
                ));
            }
        }

        let birth: &[u8] = match self.topology {
            Topology::Hex2D => &self.hex_birth,
            Topology::Layered2D => &self.layered_birth,
            Topology::Cubic3D => &[],
        };
        let max = Self::max_count(self.topology);
        if birth.iter().any(|&c| c > max) {
            return Err(GrowthError::InvalidConfig(
                "birth count exceeds the lattice's neighbour count",
            ));
        }

        let dims = self.topology.dims(self.grid_size);
        for obstacle in &self.obstacles {
            let hi = obstacle.hi;
            if obstacle.is_empty()
                || hi.x >= dims.width
                || hi.y >= dims.height
                || hi.z >= dims.depth
            {
                return Err(GrowthError::InvalidConfig(
                    "obstacle box must be non-empty and inside the grid",
                ));
            }
        }

        seed::validate(&self.seed_pattern, self.topology, dims, self.seed_size)
    }
}

/// Inclusive obstacle box from two corners given in any order.
pub fn obstacle(a: Coord, b: Coord) -> Bounds {
    Bounds::new(
        Coord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
        Coord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
    )
}
