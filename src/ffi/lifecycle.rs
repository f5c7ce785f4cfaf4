//! Simulation creation, destruction, reset and rule control.

use crate::automaton::{Neighborhood, SeedPattern, Simulation, Topology};
use crate::config::SimConfig;

use super::{LG_NULL, LG_OK, LG_REJECTED};

fn topology_from_code(code: u8) -> Option<Topology> {
    match code {
        0 => Some(Topology::Hex2D),
        1 => Some(Topology::Layered2D),
        2 => Some(Topology::Cubic3D),
        _ => None,
    }
}

/// Creates an empty simulation and returns an opaque pointer.
///
/// `topology`: 0 hex, 1 layered, 2 cubic. No cells are alive until
/// `lg_reset()` plants a seed.
///
/// # Returns
/// A pointer to a new Simulation, or null if the parameters are rejected.
///
/// # Safety
/// The returned pointer must eventually be freed with `lg_destroy()`.
#[no_mangle]
pub extern "C" fn lg_create(
    topology: u8,
    grid_size: u32,
    rng_seed: u64,
    rule_seed: u64,
) -> *mut Simulation {
    let Some(topology) = topology_from_code(topology) else {
        return std::ptr::null_mut();
    };
    let preset = match topology {
        Topology::Hex2D => SimConfig::hex(),
        Topology::Layered2D => SimConfig::layered(),
        Topology::Cubic3D => SimConfig::cubic(),
    };
    let config = SimConfig {
        grid_size: grid_size as usize,
        seed_pattern: SeedPattern::Cells(Vec::new()),
        rng_seed,
        rule_seed,
        ..preset
    };

    match Simulation::new(config) {
        Ok(sim) => Box::into_raw(Box::new(sim)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroys a simulation and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `lg_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn lg_destroy(ptr: *mut Simulation) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Plants a fresh seed of edge `seed_size`.
///
/// `mirror_axes` 0 seeds at random, 1..=3 mirrors across that many axes.
/// `moore` non-zero selects the Moore neighbourhood.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 if rejected (state unchanged), -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_reset(
    ptr: *mut Simulation,
    seed_size: u32,
    mirror_axes: u8,
    moore: u8,
) -> i32 {
    if ptr.is_null() {
        return LG_NULL;
    }

    let sim = &mut *ptr;
    let pattern = match mirror_axes {
        0 => SeedPattern::Random,
        n => SeedPattern::Mirror(n),
    };
    let neighborhood = if moore != 0 {
        Neighborhood::Moore
    } else {
        Neighborhood::VonNeumann
    };
    match sim.reset(seed_size as usize, pattern, neighborhood) {
        Ok(_) => LG_OK,
        Err(_) => LG_REJECTED,
    }
}

/// Switches between Von Neumann and Moore.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 1 if Moore is now active, 0 for Von Neumann, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_toggle_neighborhood(ptr: *mut Simulation) -> i32 {
    if ptr.is_null() {
        return LG_NULL;
    }

    let sim = &mut *ptr;
    match sim.toggle_neighborhood() {
        Neighborhood::Moore => 1,
        Neighborhood::VonNeumann => 0,
    }
}

/// Draws new cubic rule tables from `seed`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// 0 on success, 1 on a lattice with fixed rules, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_regenerate_rules(ptr: *mut Simulation, seed: u64) -> i32 {
    if ptr.is_null() {
        return LG_NULL;
    }

    let sim = &mut *ptr;
    match sim.regenerate_rules(seed) {
        Ok(()) => LG_OK,
        Err(_) => LG_REJECTED,
    }
}

/// Gets the number of successful steps since the last reset.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn lg_generation(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let sim = lg_create(2, 32, 1, 1);
            assert!(!sim.is_null());
            assert_eq!(lg_generation(sim), 0);

            // Should not crash
            lg_destroy(sim);
        }
    }

    #[test]
    fn test_create_rejects_bad_parameters() {
        assert!(lg_create(3, 32, 0, 0).is_null());
        assert!(lg_create(2, 4, 0, 0).is_null());
        assert!(lg_create(2, u32::MAX, 0, 0).is_null());
        assert!(lg_create(1, 1 << 20, 0, 0).is_null());
    }

    #[test]
    fn test_reset_status_codes() {
        unsafe {
            let sim = lg_create(2, 32, 7, 7);
            assert_eq!(lg_reset(sim, 8, 3, 0), LG_OK);
            assert_eq!(lg_reset(sim, 8, 4, 0), LG_REJECTED);
            assert_eq!(lg_reset(sim, 40, 0, 0), LG_REJECTED);
            lg_destroy(sim);

            let hex = lg_create(0, 40, 7, 7);
            assert_eq!(lg_reset(hex, 8, 3, 0), LG_REJECTED);
            assert_eq!(lg_reset(hex, 8, 2, 0), LG_OK);
            assert_eq!(lg_regenerate_rules(hex, 5), LG_REJECTED);
            lg_destroy(hex);
        }
    }

    #[test]
    fn test_toggle_and_regenerate() {
        unsafe {
            let sim = lg_create(2, 32, 0, 0);
            assert_eq!(lg_toggle_neighborhood(sim), 1);
            assert_eq!(lg_toggle_neighborhood(sim), 0);
            assert_eq!(lg_regenerate_rules(sim, 9), LG_OK);
            lg_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            lg_destroy(ptr::null_mut()); // Should not crash
            assert_eq!(lg_reset(ptr::null_mut(), 8, 0, 0), LG_NULL);
            assert_eq!(lg_toggle_neighborhood(ptr::null_mut()), LG_NULL);
            assert_eq!(lg_regenerate_rules(ptr::null_mut(), 1), LG_NULL);
            assert_eq!(lg_generation(ptr::null()), 0);
        }
    }
}
