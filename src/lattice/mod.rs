mod square;

pub use square::Square;

use crate::region::Rect;

/// Bravais lattice that can be replicated into a simulation box
pub trait Lattice {
    /// Edge lengths of the unit cell
    fn cell_lengths(&self) -> [f64; 3];
    /// Fractional coordinates of the sites within the unit cell
    fn basis(&self) -> Vec<[f64; 3]>;
    /// Number of spatial dimensions the lattice spans
    fn dimensions(&self) -> usize;

    /// Box holding `n` unit cells along each lattice direction, centered on
    /// the origin. Missing trailing counts default to one cell.
    fn bounding_rect(&self, n: &[usize]) -> Rect {
        let cells = cell_counts(n);
        let lengths = self.cell_lengths();
        Rect::centered([
            lengths[0] * cells[0] as f64,
            lengths[1] * cells[1] as f64,
            lengths[2] * cells[2] as f64,
        ])
    }

    /// Site coordinates of `n` replicated unit cells inside `bounding_rect(n)`
    fn coords(&self, n: &[usize]) -> Vec<[f64; 3]> {
        let cells = cell_counts(n);
        let lengths = self.cell_lengths();
        let basis = self.basis();
        let lo = self.bounding_rect(n).lo();
        let dims = self.dimensions();

        let mut coords = Vec::with_capacity(cells.iter().product::<usize>() * basis.len());
        for i in 0..cells[0] {
            for j in 0..cells[1] {
                for k in 0..cells[2] {
                    let origin = [i as f64, j as f64, k as f64];
                    for b in &basis {
                        let mut site = [0.0; 3];
                        for axis in 0..dims {
                            site[axis] = lo[axis] + lengths[axis] * (origin[axis] + b[axis]);
                        }
                        coords.push(site);
                    }
                }
            }
        }
        coords
    }
}

fn cell_counts(n: &[usize]) -> [usize; 3] {
    let mut cells = [1; 3];
    for (c, &ni) in cells.iter_mut().zip(n.iter()) {
        *c = ni;
    }
    cells
}
