//! Crystal propagator - Main simulation driver.
//!
//! Orchestrates the update passes for each iteration:
//! diffusion, freezing, attachment, melting, noise, then a buffer swap.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::SnowfakeError;
use crate::schema::CrystalConfig;

use super::{AttachmentReport, Cell, Lattice, attach, diffuse, freeze, melt, perturb};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Growth reached the outer third of the lattice.
    OuterThird,
    /// The iteration cap was hit first; the crystal is incomplete.
    IterationCap,
}

/// Result of a single [`CrystalPropagator::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Stopped(StopReason),
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub stop_reason: StopReason,
    pub stats: SimulationStats,
}

impl RunSummary {
    /// Whether growth stopped on its own rather than at the cap.
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::OuterThird
    }
}

/// CPU crystal growth propagator.
///
/// Owns the double-buffered lattice and the noise random source. All
/// parameters are fixed at construction.
pub struct CrystalPropagator {
    config: CrystalConfig,
    lattice: Lattice,
    rng: StdRng,
    iteration: u64,
    stopped: Option<StopReason>,
}

impl CrystalPropagator {
    /// Create a new propagator and seed its lattice.
    pub fn new(config: CrystalConfig) -> Result<Self, SnowfakeError> {
        config.validate()?;

        let lattice = Lattice::new(config.size, config.growth.rho)?;
        let rng = match config.run.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "Seeded {size}x{size} lattice at center ({center}, {center})",
            size = config.size,
            center = lattice.center()
        );

        Ok(Self {
            config,
            lattice,
            rng,
            iteration: 0,
            stopped: None,
        })
    }

    /// Perform one iteration.
    ///
    /// Once stopped, further calls return the same reason and leave the
    /// lattice untouched.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.stopped {
            return StepOutcome::Stopped(reason);
        }
        if self.iteration >= self.config.run.max_iterations {
            log::warn!(
                "Iteration cap {} reached before growth hit the outer third",
                self.config.run.max_iterations
            );
            return self.stop(StopReason::IterationCap);
        }

        let size = self.config.size;
        let params = self.config.growth;

        let (current, next) = self.lattice.buffers_mut();
        diffuse(current, next, size, params.rho);
        freeze(next, size, params.kappa);
        let report: AttachmentReport = attach(next, size, &params);

        self.iteration += 1;

        if report.reached_outer_third {
            self.lattice.swap();
            log::info!(
                "Growth reached the outer third after {} iterations ({} cells attached)",
                self.iteration,
                self.lattice.attached_count()
            );
            return self.stop(StopReason::OuterThird);
        }

        melt(next, size, params.mu, params.gamma);
        if params.noise_enabled() {
            perturb(next, size, params.sigma, &mut self.rng);
        }
        self.lattice.swap();

        let interval = self.config.run.progress_interval;
        if interval > 0 && self.iteration % interval == 0 {
            log::info!(
                "Iteration {}: {} cells attached",
                self.iteration,
                self.lattice.attached_count()
            );
        }

        StepOutcome::Continue
    }

    /// Run until growth reaches the outer third or the iteration cap.
    pub fn run(&mut self) -> RunSummary {
        loop {
            if let StepOutcome::Stopped(stop_reason) = self.step() {
                return RunSummary {
                    stop_reason,
                    stats: self.stats(),
                };
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> StepOutcome {
        self.stopped = Some(reason);
        StepOutcome::Stopped(reason)
    }

    /// Read-only view of the crystal for rendering.
    pub fn crystal(&self) -> CrystalView<'_> {
        CrystalView {
            size: self.lattice.size(),
            center: self.lattice.center(),
            cells: self.lattice.current(),
        }
    }

    /// Current simulation statistics.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_lattice(&self.lattice, self.iteration)
    }

    /// Iterations performed so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Stop reason, if the run has finished.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Get lattice reference.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get configuration reference.
    pub fn config(&self) -> &CrystalConfig {
        &self.config
    }
}

/// An attached cell as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrystalSite {
    pub row: usize,
    pub col: usize,
    pub crystal_mass: f32,
}

/// Finished crystal handed to rendering: attachment and crystal mass only.
#[derive(Clone, Copy)]
pub struct CrystalView<'a> {
    size: usize,
    center: usize,
    cells: &'a [Cell],
}

impl<'a> CrystalView<'a> {
    /// Lattice side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row and column of the seed cell.
    pub fn center(&self) -> usize {
        self.center
    }

    /// Whether `(row, col)` is part of the crystal.
    pub fn is_attached(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.size + col].attached
    }

    /// Attached cells in row-major order.
    pub fn attached_cells(self) -> impl Iterator<Item = CrystalSite> + 'a {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.attached)
            .map(move |(idx, cell)| CrystalSite {
                row: idx / size,
                col: idx % size,
                crystal_mass: cell.crystal_mass,
            })
    }
}

/// Simulation statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub iteration: u64,
    pub attached_cells: usize,
    pub total_mass: f32,
    pub crystal_mass: f32,
    pub diffusive_mass: f32,
    pub max_crystal_mass: f32,
}

impl SimulationStats {
    /// Compute statistics from the current lattice buffer.
    pub fn from_lattice(lattice: &Lattice, iteration: u64) -> Self {
        let mut stats = Self {
            iteration,
            attached_cells: 0,
            total_mass: 0.0,
            crystal_mass: 0.0,
            diffusive_mass: 0.0,
            max_crystal_mass: 0.0,
        };

        for cell in lattice.current() {
            stats.total_mass += cell.total_mass();
            stats.diffusive_mass += cell.diffusive_mass;
            if cell.attached {
                stats.attached_cells += 1;
                stats.crystal_mass += cell.crystal_mass;
                stats.max_crystal_mass = stats.max_crystal_mass.max(cell.crystal_mass);
            }
        }

        stats
    }
}
