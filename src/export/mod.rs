//! Writers derived purely from simulation state.

pub mod config_text;
pub mod mesh;

pub use config_text::{append_config, parse_config, write_config, SavedConfig};
pub use mesh::{cube_triangles, simulation_triangles, write_obj, write_stl, Triangle};
