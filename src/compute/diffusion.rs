//! Vapor diffusion with a reflective crystal surface and a fixed-density
//! reservoir at the lattice edge.

use super::lattice::{Cell, NEIGHBOR_OFFSETS, neighbor};

/// Diffused vapor for the unattached cell at `(row, col)`.
///
/// Averages the cell's own mass with its six neighbors. Attached neighbors
/// and neighbors outside the grid contribute the cell's own mass instead,
/// so the crystal neither absorbs vapor here nor dilutes the average.
#[inline]
pub fn diffuse_cell(prev: &[Cell], size: usize, row: usize, col: usize) -> f32 {
    let own = prev[row * size + col].diffusive_mass;
    let mut sum = own;
    for k in 0..NEIGHBOR_OFFSETS.len() {
        sum += match neighbor(size, row, col, k) {
            Some((r, c)) if !prev[r * size + c].attached => prev[r * size + c].diffusive_mass,
            _ => own,
        };
    }
    sum / (NEIGHBOR_OFFSETS.len() + 1) as f32
}

/// Run one diffusion pass from `current` into `next`.
///
/// Edge cells are first refilled to `rho` in `current`, so the interior
/// sweep reads the reservoir value. Every cell is then carried into `next`
/// with all its fields, and unattached interior cells take the diffused
/// vapor. Attached cells hold no vapor.
pub fn diffuse(current: &mut [Cell], next: &mut [Cell], size: usize, rho: f32) {
    refill_edges(current, size, rho);

    next.copy_from_slice(current);

    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let idx = row * size + col;
            next[idx].diffusive_mass = if current[idx].attached {
                0.0
            } else {
                diffuse_cell(current, size, row, col)
            };
        }
    }
}

/// Reset the vapor of every unattached edge cell to `rho`.
pub fn refill_edges(cells: &mut [Cell], size: usize, rho: f32) {
    let last = size - 1;
    for (idx, cell) in cells.iter_mut().enumerate() {
        let (row, col) = (idx / size, idx % size);
        if (row == 0 || col == 0 || row == last || col == last) && !cell.attached {
            cell.diffusive_mass = rho;
        }
    }
}
