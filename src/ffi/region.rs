//! Region bounds and seed snapshot FFI functions.

use crate::automaton::Simulation;

use super::{LG_NULL, LG_OK};

/// Writes the current region as six values: low x, y, z then high x, y, z.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out` must point to a buffer of at least 6 `u32`s, or be null
///
/// # Returns
/// 0 on success, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn lg_get_region(ptr: *const Simulation, out: *mut u32) -> i32 {
    if ptr.is_null() || out.is_null() {
        return LG_NULL;
    }

    let b = (*ptr).region();
    let out = std::slice::from_raw_parts_mut(out, 6);
    out.copy_from_slice(&[
        b.lo.x as u32,
        b.lo.y as u32,
        b.lo.z as u32,
        b.hi.x as u32,
        b.hi.y as u32,
        b.hi.z as u32,
    ]);
    LG_OK
}

/// Gets the length of the seed snapshot in bytes.
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
#[no_mangle]
pub unsafe extern "C" fn lg_seed_len(ptr: *const Simulation) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).seed_snapshot().cells.len() as u64
}

/// Copies the seed snapshot into a flat buffer.
///
/// # Layout
/// One 0/1 byte per cell in z,y,x order (z changes slowest, x changes fastest).
///
/// # Safety
/// - `ptr` must be a valid pointer to a Simulation, or null
/// - `out_buf` must point to a buffer of at least `len` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error or if `len` is smaller than
/// `lg_seed_len()`.
#[no_mangle]
pub unsafe extern "C" fn lg_extract_seed(
    ptr: *const Simulation,
    out_buf: *mut u8,
    len: u64,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let seed = &(*ptr).seed_snapshot().cells;
    if (len as usize) < seed.len() {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, seed.len());
    buf_slice.copy_from_slice(seed);
    seed.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_region_contains_seed() {
        unsafe {
            let sim = lifecycle::lg_create(2, 32, 11, 11);
            lifecycle::lg_reset(sim, 8, 0, 0);

            let mut region = [0u32; 6];
            assert_eq!(lg_get_region(sim, region.as_mut_ptr()), LG_OK);
            // The seed box is 12..=19 on every axis.
            for axis in 0..3 {
                assert!(region[axis] >= 11 && region[axis] <= 12);
                assert!(region[axis + 3] >= 19 && region[axis + 3] <= 20);
            }

            lifecycle::lg_destroy(sim);
        }
    }

    #[test]
    fn test_extract_seed() {
        unsafe {
            let sim = lifecycle::lg_create(2, 32, 5, 5);
            lifecycle::lg_reset(sim, 8, 3, 0);

            let len = lg_seed_len(sim);
            assert!(len > 0);
            let mut buffer = vec![0u8; len as usize];
            assert_eq!(lg_extract_seed(sim, buffer.as_mut_ptr(), len), len);
            assert_eq!(
                buffer.iter().filter(|&&b| b == 1).count() as u64,
                crate::ffi::grid::lg_live_cells(sim)
            );

            // Too small a buffer is refused.
            assert_eq!(lg_extract_seed(sim, buffer.as_mut_ptr(), len - 1), 0);

            lifecycle::lg_destroy(sim);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut region = [0u32; 6];
            let mut buffer = vec![0u8; 8];
            assert_eq!(lg_get_region(ptr::null(), region.as_mut_ptr()), LG_NULL);
            assert_eq!(lg_seed_len(ptr::null()), 0);
            assert_eq!(lg_extract_seed(ptr::null(), buffer.as_mut_ptr(), 8), 0);

            let sim = lifecycle::lg_create(2, 16, 0, 0);
            assert_eq!(lg_get_region(sim, ptr::null_mut()), LG_NULL);
            assert_eq!(lg_extract_seed(sim, ptr::null_mut(), 8), 0);
            lifecycle::lg_destroy(sim);
        }
    }
}
