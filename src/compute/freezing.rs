//! Freezing of boundary vapor into boundary and crystal mass.

use super::lattice::Cell;

/// Convert the vapor of every interior boundary cell.
///
/// A `kappa` fraction becomes crystal mass and the rest becomes boundary
/// mass. Cells off the crystal boundary are untouched.
pub fn freeze(cells: &mut [Cell], size: usize, kappa: f32) {
    for row in 1..size - 1 {
        for cell in &mut cells[row * size + 1..(row + 1) * size - 1] {
            if cell.is_boundary() {
                freeze_cell(cell, kappa);
            }
        }
    }
}

#[inline]
fn freeze_cell(cell: &mut Cell, kappa: f32) {
    let d = cell.diffusive_mass;
    cell.crystal_mass += kappa * d;
    cell.boundary_mass += (1.0 - kappa) * d;
    cell.diffusive_mass = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::lattice::total_mass;

    #[test]
    fn test_boundary_cell_freezes() {
        let size = 3;
        let mut cells = vec![Cell::vapor(0.5); size * size];
        cells[4] = Cell {
            attached_neighbors: 2,
            boundary_mass: 0.1,
            crystal_mass: 0.2,
            diffusive_mass: 1.0,
            ..Default::default()
        };
        freeze(&mut cells, size, 0.25);

        let cell = cells[4];
        assert_eq!(cell.diffusive_mass, 0.0);
        assert!((cell.crystal_mass - 0.45).abs() < 1e-6);
        assert!((cell.boundary_mass - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_non_boundary_cells_untouched() {
        let size = 5;
        let mut cells = vec![Cell::vapor(0.5); size * size];
        cells[12] = Cell::seed();
        // Edge boundary cell is outside the interior sweep.
        cells[2].attached_neighbors = 1;
        let before = cells.clone();

        freeze(&mut cells, size, 0.1);
        assert_eq!(cells, before);
    }

    #[test]
    fn test_freezing_conserves_mass() {
        let size = 7;
        let mut cells = vec![Cell::vapor(0.42); size * size];
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.attached_neighbors = (i % 4) as u8;
            cell.boundary_mass = 0.01 * (i % 5) as f32;
        }
        let before = total_mass(&cells);
        freeze(&mut cells, size, 0.01);
        assert!((total_mass(&cells) - before).abs() < 1e-4);
    }
}
