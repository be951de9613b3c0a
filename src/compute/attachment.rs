//! Attachment of boundary cells to the crystal.
//!
//! The sweep mutates the lattice in place, row-major from the top-left
//! interior cell. An attachment bumps the neighbor counts of cells later in
//! the same sweep, so the visiting order decides the crystal shape.

use crate::schema::GrowthParams;

use super::lattice::{Cell, neighbors};

/// Outcome of one attachment sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentReport {
    /// Cells that joined the crystal during the sweep.
    pub attached: usize,
    /// Some attachment landed within a third of the lattice from an edge.
    pub reached_outer_third: bool,
}

/// Decide whether a boundary cell joins the crystal.
///
/// `neighborhood` yields the diffusive mass of the cell plus its in-bounds
/// neighbors; it is only evaluated for the 3-neighbor concavity rule.
pub fn attachment_rule(
    attached_neighbors: u8,
    boundary_mass: f32,
    neighborhood: impl FnOnce() -> f32,
    params: &GrowthParams,
) -> bool {
    match attached_neighbors {
        0 => false,
        // tip or edge
        1 | 2 => boundary_mass >= params.beta,
        // concavity
        3 => {
            boundary_mass >= 1.0 || (boundary_mass >= params.alpha && neighborhood() < params.theta)
        }
        // hole
        _ => true,
    }
}

/// Run one attachment sweep over the interior of `cells`.
pub fn attach(cells: &mut [Cell], size: usize, params: &GrowthParams) -> AttachmentReport {
    let third = size / 3;
    let mut report = AttachmentReport::default();

    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let idx = row * size + col;
            let cell = cells[idx];
            if cell.attached {
                continue;
            }

            let joins = attachment_rule(
                cell.attached_neighbors,
                cell.boundary_mass,
                || neighborhood_vapor(cells, size, row, col),
                params,
            );
            if !joins {
                continue;
            }

            attach_cell(cells, size, row, col);
            report.attached += 1;
            if row < third || row >= size - third || col < third || col >= size - third {
                report.reached_outer_third = true;
            }
        }
    }

    report
}

/// Mark `(row, col)` attached, fold its boundary mass into crystal mass
/// and bump its neighbors' counts.
fn attach_cell(cells: &mut [Cell], size: usize, row: usize, col: usize) {
    let cell = &mut cells[row * size + col];
    cell.attached = true;
    cell.crystal_mass += cell.boundary_mass;
    cell.boundary_mass = 0.0;

    for (r, c) in neighbors(size, row, col) {
        cells[r * size + c].attached_neighbors += 1;
    }
}

fn neighborhood_vapor(cells: &[Cell], size: usize, row: usize, col: usize) -> f32 {
    cells[row * size + col].diffusive_mass
        + neighbors(size, row, col)
            .map(|(r, c)| cells[r * size + c].diffusive_mass)
            .sum::<f32>()
}
