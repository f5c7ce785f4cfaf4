//! Stepping and per-cell queries.

use crate::automaton::{Coord, Simulation};
use crate::state::StepReport;

use super::{LG_NULL, LG_OK};

/// Cell flag bits returned by `lg_get_cell`.
pub const LG_CELL_ALIVE: u8 = 1;
pub const LG_CELL_FROZEN: u8 = 1 << 1;
pub const LG_CELL_RENDERED: u8 = 1 << 2;

/// Step outcome in C layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LgStepReport {
    pub births: u64,
    pub region_lo: [u32; 3],
    pub region_hi: [u32; 3],
    /// Non-zero once the run has stopped.
    pub stopped: u8,
    /// 0 none, 1 stagnation, 2 grid edge.
    pub stop_reason: u8,
}

impl From<StepReport> for LgStepReport {
    fn from(report: StepReport) -> Self {
        let xyz = |c: Coord| [c.x as u32, c.y as u32, c.z as u32];
        LgStepReport {
            births: report.births as u64,
            region_lo: xyz(report.region.lo),
            region_hi: xyz(report.region.hi),
            stopped: report.stopped as u8,
            stop_reason: report.stop_reason.code(),
        }
    }
}

/// Advances the simulation by one step.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out` must be null or point to writable storage for one `LgStepReport`
///
/// # Returns
/// 0 on success, -1 on null simulation pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_step(ptr: *mut Simulation, out: *mut LgStepReport) -> i32 {
    if ptr.is_null() {
        return LG_NULL;
    }

    let sim = &mut *ptr;
    let report = sim.step();
    if !out.is_null() {
        *out = report.into();
    }
    LG_OK
}

/// Gets the flags of a cell (bit 0 alive, bit 1 frozen, bit 2 rendered).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 if out of bounds or null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_get_cell(ptr: *const Simulation, x: u32, y: u32, z: u32) -> u8 {
    if ptr.is_null() {
        return 0;
    }

    let sim = &*ptr;
    let coord = Coord::new(x as usize, y as usize, z as usize);
    if !sim.grid().in_bounds(coord) {
        return 0;
    }

    let cell = sim.cell(coord);
    let mut flags = 0;
    if cell.alive {
        flags |= LG_CELL_ALIVE;
    }
    if cell.frozen {
        flags |= LG_CELL_FROZEN;
    }
    if cell.rendered {
        flags |= LG_CELL_RENDERED;
    }
    flags
}

/// Records that the host has submitted geometry for a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// Out-of-bounds coordinates are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn lg_mark_rendered(ptr: *mut Simulation, x: u32, y: u32, z: u32) {
    if ptr.is_null() {
        return;
    }

    let sim = &mut *ptr;
    let coord = Coord::new(x as usize, y as usize, z as usize);
    if sim.grid().in_bounds(coord) {
        sim.mark_rendered(coord);
    }
}

/// Gets the number of live cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn lg_live_cells(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).live_cells() as u64
}
