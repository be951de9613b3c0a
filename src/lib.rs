//! Snowfake - Gravner-Griffeath snow crystal growth.
//!
//! This crate implements the mesoscopic lattice map of Janko Gravner and
//! David Griffeath ("Modeling Snow Crystal Growth II", Physica D 237, 2008):
//! a cellular automaton on a hexagonal lattice where vapor diffuses,
//! freezes at the crystal boundary, attaches by neighbor-count rules and
//! partially melts back.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Configuration types and validation
//! - `compute`: Lattice state and the update passes (diffusion, freezing,
//!   attachment, melting, noise) driven by [`CrystalPropagator`]
//! - `render`: SVG output of the finished crystal
//!
//! # Example
//!
//! ```rust,no_run
//! use snowfake::{CrystalConfig, CrystalPropagator, SvgRenderer};
//!
//! let config = CrystalConfig::with_size(201);
//! let mut propagator = CrystalPropagator::new(config)?;
//!
//! let summary = propagator.run();
//! if !summary.converged() {
//!     eprintln!("stopped at the iteration cap");
//! }
//!
//! SvgRenderer::default().save(propagator.crystal(), "flake.svg")?;
//! # Ok::<(), snowfake::SnowfakeError>(())
//! ```

pub mod compute;
pub mod error;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{CrystalPropagator, CrystalView, RunSummary, SimulationStats, StopReason};
pub use error::SnowfakeError;
pub use render::{RenderConfig, SvgRenderer};
pub use schema::{ConfigError, CrystalConfig, GrowthParams, RunConfig};
