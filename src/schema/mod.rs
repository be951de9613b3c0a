//! Schema module - Configuration types for snow crystal simulations.

mod config;

pub use config::*;
