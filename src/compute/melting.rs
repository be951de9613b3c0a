//! Melting of boundary and crystal mass back into vapor, plus the optional
//! diffusive noise perturbation.

use rand::Rng;

use super::lattice::Cell;

/// Return a `mu` fraction of boundary mass and a `gamma` fraction of crystal
/// mass to vapor, for every unattached interior boundary cell.
pub fn melt(cells: &mut [Cell], size: usize, mu: f32, gamma: f32) {
    for row in 1..size - 1 {
        for cell in &mut cells[row * size + 1..(row + 1) * size - 1] {
            if !cell.is_boundary() {
                continue;
            }
            let b0 = cell.boundary_mass;
            let c0 = cell.crystal_mass;
            cell.boundary_mass = (1.0 - mu) * b0;
            cell.crystal_mass = (1.0 - gamma) * c0;
            cell.diffusive_mass += mu * b0 + gamma * c0;
        }
    }
}

/// Scale every interior cell's vapor by `1 + sigma` or `1 - sigma`, with
/// the sign drawn independently per cell.
pub fn perturb<R: Rng + ?Sized>(cells: &mut [Cell], size: usize, sigma: f32, rng: &mut R) {
    for row in 1..size - 1 {
        for cell in &mut cells[row * size + 1..(row + 1) * size - 1] {
            let s = if rng.gen_bool(0.5) { sigma } else { -sigma };
            cell.diffusive_mass *= 1.0 + s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::lattice::total_mass;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_boundary_cell_melts() {
        let size = 3;
        let mut cells = vec![Cell::vapor(0.0); size * size];
        cells[4] = Cell {
            attached_neighbors: 1,
            boundary_mass: 1.0,
            crystal_mass: 0.5,
            diffusive_mass: 0.1,
            ..Default::default()
        };
        melt(&mut cells, size, 0.1, 0.2);

        let cell = cells[4];
        assert!((cell.boundary_mass - 0.9).abs() < 1e-6);
        assert!((cell.crystal_mass - 0.4).abs() < 1e-6);
        assert!((cell.diffusive_mass - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_attached_and_free_cells_skipped() {
        let size = 3;
        let mut cells = vec![Cell::vapor(0.2); size * size];
        cells[4] = Cell {
            attached: true,
            attached_neighbors: 5,
            crystal_mass: 2.0,
            ..Default::default()
        };
        let before = cells.clone();
        melt(&mut cells, size, 0.5, 0.5);
        assert_eq!(cells, before);
    }

    #[test]
    fn test_melting_conserves_mass() {
        let size = 9;
        let mut cells = vec![Cell::vapor(0.1); size * size];
        for (i, cell) in cells.iter_mut().enumerate() {
            cell.attached_neighbors = (i % 3) as u8;
            cell.boundary_mass = 0.3;
            cell.crystal_mass = 0.02;
        }
        let before = total_mass(&cells);
        melt(&mut cells, size, 0.06, 0.006);
        assert!((total_mass(&cells) - before).abs() < 1e-4);
    }

    #[test]
    fn test_perturb_scales_interior_only() {
        let size = 7;
        let sigma = 0.1;
        let mut cells = vec![Cell::vapor(1.0); size * size];
        let mut rng = StdRng::seed_from_u64(7);
        perturb(&mut cells, size, sigma, &mut rng);

        let (mut up, mut down) = (0, 0);
        for r in 0..size {
            for c in 0..size {
                let d = cells[r * size + c].diffusive_mass;
                if r == 0 || c == 0 || r == size - 1 || c == size - 1 {
                    assert_eq!(d, 1.0);
                } else if (d - 1.1).abs() < 1e-6 {
                    up += 1;
                } else {
                    assert!((d - 0.9).abs() < 1e-6, "unexpected vapor {}", d);
                    down += 1;
                }
            }
        }
        assert_eq!(up + down, 25);
        assert!(up > 0 && down > 0);
    }

    #[test]
    fn test_perturb_is_reproducible_with_seed() {
        let size = 9;
        let mut a = vec![Cell::vapor(0.5); size * size];
        let mut b = a.clone();
        perturb(&mut a, size, 0.05, &mut StdRng::seed_from_u64(42));
        perturb(&mut b, size, 0.05, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
