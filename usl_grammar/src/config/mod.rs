//! Configuration module for the USL grammar engine
//!
//! All grammar tables are pure module-level data (see `grammar`); this module
//! only carries resource limits and logging bounds.

pub mod constants;

pub use constants::compile_time;
