//! C FFI layer for a rendering host.
//!
//! This module exports C ABI functions for use from a foreign host loop.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.
//!
//! Status codes: 0 ok, 1 request rejected, -1 null pointer.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{lg_get_cell, lg_live_cells, lg_mark_rendered, lg_step, LgStepReport};
pub use lifecycle::{
    lg_create, lg_destroy, lg_generation, lg_regenerate_rules, lg_reset, lg_toggle_neighborhood,
};
pub use region::{lg_extract_seed, lg_get_region, lg_seed_len};

pub const LG_OK: i32 = 0;
pub const LG_REJECTED: i32 = 1;
pub const LG_NULL: i32 = -1;
