//! Compute module - Lattice state and the crystal growth update passes.

mod attachment;
mod diffusion;
mod freezing;
mod lattice;
mod melting;
mod propagator;

pub use attachment::*;
pub use diffusion::*;
pub use freezing::*;
pub use lattice::*;
pub use melting::*;
pub use propagator::*;
