//! Double-buffered hexagonal lattice state.
//!
//! The hexagonal lattice is embedded in a square grid: each cell sees the
//! six axial neighbors in [`NEIGHBOR_OFFSETS`]. Cells are stored as flat
//! row-major arrays with indexing `row * size + col`.

use std::ops::Range;

use crate::error::SnowfakeError;
use crate::schema::validate_size;

/// Relative `(row, col)` offsets of the six hex neighbors, in sweep order.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 6] =
    [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, 1)];

/// State of a single lattice site.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    /// Permanently part of the crystal.
    pub attached: bool,
    /// Number of attached hex neighbors (0-6).
    pub attached_neighbors: u8,
    /// Mass held at the crystal surface.
    pub boundary_mass: f32,
    /// Permanently bound mass.
    pub crystal_mass: f32,
    /// Freely diffusing vapor mass.
    pub diffusive_mass: f32,
}

impl Cell {
    /// Unattached cell holding only ambient vapor.
    pub fn vapor(rho: f32) -> Self {
        Self {
            diffusive_mass: rho,
            ..Default::default()
        }
    }

    /// The attached seed crystal.
    pub fn seed() -> Self {
        Self {
            attached: true,
            crystal_mass: 1.0,
            ..Default::default()
        }
    }

    /// Unattached with at least one attached neighbor.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.attached && self.attached_neighbors > 0
    }

    /// Sum of all three mass fields.
    #[inline]
    pub fn total_mass(&self) -> f32 {
        self.boundary_mass + self.crystal_mass + self.diffusive_mass
    }
}

/// Position of the `k`-th hex neighbor of `(row, col)`, or `None` when it
/// falls outside a `size`-wide grid.
#[inline]
pub fn neighbor(size: usize, row: usize, col: usize, k: usize) -> Option<(usize, usize)> {
    let (dr, dc) = NEIGHBOR_OFFSETS[k];
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < size && c < size).then_some((r, c))
}

/// In-bounds hex neighbors of `(row, col)` in table order.
pub fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..NEIGHBOR_OFFSETS.len()).filter_map(move |k| neighbor(size, row, col, k))
}

/// Two equal-shape cell buffers with an O(1) swap.
pub struct Lattice {
    size: usize,
    center: usize,
    buffers: [Vec<Cell>; 2],
    /// Index of the authoritative buffer.
    current: usize,
}

impl Lattice {
    /// Allocate both buffers and seed the crystal at the center.
    pub fn new(size: usize, rho: f32) -> Result<Self, SnowfakeError> {
        validate_size(size)?;
        let cells = size * size;
        let center = size / 2 + 1;

        let mut front = alloc_buffer(cells, Cell::vapor(rho))?;
        front[center * size + center] = Cell::seed();
        for (r, c) in neighbors(size, center, center) {
            front[r * size + c].attached_neighbors = 1;
        }

        let mut back = alloc_buffer(cells, Cell::default())?;
        back.copy_from_slice(&front);

        Ok(Self {
            size,
            center,
            buffers: [front, back],
            current: 0,
        })
    }

    /// Lattice side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row and column of the seed cell.
    ///
    /// This is `size / 2 + 1`, one past the geometric center.
    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    /// Flat index of `(row, col)`.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Row range (and column range) of the interior cells.
    #[inline]
    pub fn interior(&self) -> Range<usize> {
        1..self.size - 1
    }

    /// Whether `(row, col)` lies on the outermost ring.
    #[inline]
    pub fn is_edge(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.size - 1 || col == self.size - 1
    }

    /// The authoritative buffer.
    #[inline]
    pub fn current(&self) -> &[Cell] {
        &self.buffers[self.current]
    }

    /// The in-progress buffer.
    #[inline]
    pub fn next(&self) -> &[Cell] {
        &self.buffers[1 - self.current]
    }

    /// Mutable access to the authoritative buffer.
    #[inline]
    pub fn current_mut(&mut self) -> &mut [Cell] {
        &mut self.buffers[self.current]
    }

    /// Mutable access to the in-progress buffer.
    #[inline]
    pub fn next_mut(&mut self) -> &mut [Cell] {
        &mut self.buffers[1 - self.current]
    }

    /// Borrow `(current, next)` together for a pass that reads one and
    /// writes the other.
    pub fn buffers_mut(&mut self) -> (&mut [Cell], &mut [Cell]) {
        let [a, b] = &mut self.buffers;
        if self.current == 0 {
            (a.as_mut_slice(), b.as_mut_slice())
        } else {
            (b.as_mut_slice(), a.as_mut_slice())
        }
    }

    /// Make the in-progress buffer authoritative. No cells are copied.
    #[inline]
    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    /// Cell at `(row, col)` in the current buffer.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.current()[self.index(row, col)]
    }

    /// Total mass of the current buffer.
    pub fn total_mass(&self) -> f32 {
        total_mass(self.current())
    }

    /// Total mass of the current buffer, excluding the edge reservoir.
    pub fn interior_mass(&self) -> f32 {
        interior_mass(self.current(), self.size)
    }

    /// Number of attached cells in the current buffer.
    pub fn attached_count(&self) -> usize {
        self.current().iter().filter(|c| c.attached).count()
    }
}

/// Sum of all mass fields over a buffer.
pub fn total_mass(cells: &[Cell]) -> f32 {
    cells.iter().map(Cell::total_mass).sum()
}

/// Sum of all mass fields over the interior of a `size`-wide buffer.
pub fn interior_mass(cells: &[Cell], size: usize) -> f32 {
    cells
        .chunks_exact(size)
        .skip(1)
        .take(size - 2)
        .flat_map(|row| &row[1..size - 1])
        .map(Cell::total_mass)
        .sum()
}

fn alloc_buffer(cells: usize, fill: Cell) -> Result<Vec<Cell>, SnowfakeError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_| SnowfakeError::Allocation { cells })?;
    buffer.resize(cells, fill);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_initialization() {
        for size in [3, 5, 21, 51] {
            let lattice = Lattice::new(size, 0.42).unwrap();
            let center = lattice.center();
            assert_eq!(center, size / 2 + 1);
            assert_eq!(lattice.current().len(), size * size);
            assert_eq!(lattice.next().len(), size * size);
            assert_eq!(lattice.attached_count(), 1);
            assert!(lattice.get(center, center).attached);
            assert_eq!(lattice.get(center, center).crystal_mass, 1.0);

            assert!(lattice.interior().contains(&(size / 2)));
            let ring: Vec<_> = neighbors(size, center, center).collect();
            for r in 0..size {
                for c in 0..size {
                    let expected = u8::from(ring.contains(&(r, c)));
                    assert_eq!(
                        lattice.get(r, c).attached_neighbors,
                        expected,
                        "size {} cell ({}, {})",
                        size,
                        r,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn test_initial_vapor() {
        let lattice = Lattice::new(9, 0.5).unwrap();
        let center = lattice.center();
        for r in 0..9 {
            for c in 0..9 {
                let cell = lattice.get(r, c);
                if (r, c) == (center, center) {
                    assert_eq!(cell.diffusive_mass, 0.0);
                } else {
                    assert_eq!(cell.diffusive_mass, 0.5);
                    assert!(!cell.attached);
                }
            }
        }
        assert_eq!(lattice.current(), lattice.next());
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert!(matches!(
            Lattice::new(10, 0.42),
            Err(SnowfakeError::Config(_))
        ));
        assert!(matches!(Lattice::new(1, 0.42), Err(SnowfakeError::Config(_))));
    }

    #[test]
    fn test_swap_exchanges_buffers() {
        let mut lattice = Lattice::new(5, 0.42).unwrap();
        lattice.next_mut()[0].diffusive_mass = 9.0;
        let next_ptr = lattice.next().as_ptr();
        lattice.swap();
        assert_eq!(lattice.current().as_ptr(), next_ptr);
        assert_eq!(lattice.current()[0].diffusive_mass, 9.0);
        lattice.swap();
        assert_eq!(lattice.current()[0].diffusive_mass, 0.42);
    }

    #[test]
    fn test_corner_neighbors() {
        let size = 7;
        let top_left: Vec<_> = neighbors(size, 0, 0).collect();
        assert_eq!(top_left, vec![(0, 1), (1, 0), (1, 1)]);

        let bottom_right: Vec<_> = neighbors(size, 6, 6).collect();
        assert_eq!(bottom_right, vec![(5, 5), (5, 6), (6, 5)]);

        // The off-diagonal corners lose four of the six offsets.
        assert_eq!(neighbors(size, 0, 6).count(), 2);
        assert_eq!(neighbors(size, 6, 0).count(), 2);
        assert_eq!(neighbors(size, 3, 3).count(), 6);
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let size = 5;
        for r in 0..size {
            for c in 0..size {
                for (rr, cc) in neighbors(size, r, c) {
                    assert!(neighbors(size, rr, cc).any(|p| p == (r, c)));
                }
            }
        }
    }

    #[test]
    fn test_interior_mass_excludes_edges() {
        let lattice = Lattice::new(5, 1.0).unwrap();
        // 9 interior cells, one of them the seed holding crystal mass 1.
        assert!((lattice.interior_mass() - 9.0).abs() < 1e-6);
        assert!((lattice.total_mass() - 25.0).abs() < 1e-6);
    }
}
