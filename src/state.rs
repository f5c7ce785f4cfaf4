//! Driver state-machine and report types.

use serde::{Deserialize, Serialize};

use crate::automaton::region::Bounds;
use crate::automaton::topology::Neighborhood;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// Still running.
    None,
    /// A step produced no births.
    Stagnation,
    /// The region reached the grid interior edge (or, on layered grids,
    /// the top layer).
    GridEdge,
}

impl StopReason {
    /// Stable numeric code for the C ABI.
    pub fn code(self) -> u8 {
        match self {
            StopReason::None => 0,
            StopReason::Stagnation => 1,
            StopReason::GridEdge => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Seed planted, no step taken yet.
    Seeded,
    Running,
    Stopped(StopReason),
}

impl Phase {
    pub fn is_stopped(self) -> bool {
        matches!(self, Phase::Stopped(_))
    }

    pub fn stop_reason(self) -> StopReason {
        match self {
            Phase::Stopped(reason) => reason,
            _ => StopReason::None,
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub births: usize,
    /// Region after the step.
    pub region: Bounds,
    pub stopped: bool,
    pub stop_reason: StopReason,
}

/// Summary returned by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub live_cells: usize,
    pub region: Bounds,
    pub neighborhood: Neighborhood,
    pub phase: Phase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_of_phase() {
        assert_eq!(Phase::Seeded.stop_reason(), StopReason::None);
        assert_eq!(Phase::Running.stop_reason(), StopReason::None);
        assert!(Phase::Stopped(StopReason::GridEdge).is_stopped());
        assert_eq!(
            Phase::Stopped(StopReason::Stagnation).stop_reason(),
            StopReason::Stagnation
        );
        assert_eq!(StopReason::GridEdge.code(), 2);
    }
}
