use crate::{
    utils::{Axis, Index},
    Container,
};

/// Neighbor list grid of bins covering the simulation box
#[derive(Clone, Debug)]
pub struct Grid {
    lo_corner: [f64; 3],
    bin_size: [f64; 3],
    num_bins: [usize; 3],
    periodic: [bool; 3],
}
impl Grid {
    /// Bins are at least `min_bin_size` wide, so only adjacent bins can hold
    /// neighbors
    pub fn new(container: &Container, min_bin_size: f64) -> Self {
        assert!(
            min_bin_size > 0.0,
            "Bin size should be positive, found {}",
            min_bin_size
        );
        let rect = container.rect();
        let mut bin_size = [0.0; 3];
        let mut num_bins = [1; 3];
        let mut periodic = [false; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            let length = rect.length(axis);
            num_bins[i] = ((length / min_bin_size).floor() as usize).max(1);
            bin_size[i] = length / num_bins[i] as f64;
            periodic[i] = container.is_periodic(axis);
        }
        Self {
            lo_corner: rect.lo(),
            bin_size,
            num_bins,
            periodic,
        }
    }
    pub fn bin_size(&self) -> [f64; 3] {
        self.bin_size
    }
    pub fn num_bins(&self) -> [usize; 3] {
        self.num_bins
    }
    pub fn total_num_bins(&self) -> usize {
        self.num_bins.iter().product()
    }
    /// Linear bin index of a coordinate. Coordinates outside the box are
    /// clamped to the edge bins.
    pub fn coord_to_bin(&self, coord: &[f64; 3]) -> usize {
        let mut inds = [0; 3];
        for k in 0..3 {
            let x = ((coord[k] - self.lo_corner[k]) / self.bin_size[k]).floor();
            inds[k] = (x.max(0.0) as usize).min(self.num_bins[k] - 1);
        }
        Index::from_3d(&inds, &self.num_bins).idx()
    }
    /// Bins adjacent to `bin` (including itself), wrapped across periodic
    /// boundaries, without duplicates
    pub fn neighbor_bins(&self, bin: usize) -> Vec<usize> {
        let center = Index::from_linear(bin, &self.num_bins).to_3d();
        let mut bins = Vec::with_capacity(27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(inds) = self.offset(center, [dx, dy, dz]) {
                        bins.push(Index::from_3d(&inds, &self.num_bins).idx());
                    }
                }
            }
        }
        bins.sort_unstable();
        bins.dedup();
        bins
    }

    fn offset(&self, center: [usize; 3], delta: [i64; 3]) -> Option<[usize; 3]> {
        let mut inds = [0; 3];
        for k in 0..3 {
            let n = self.num_bins[k] as i64;
            let mut x = center[k] as i64 + delta[k];
            if x < 0 || x >= n {
                if !self.periodic[k] {
                    return None;
                }
                x = x.rem_euclid(n);
            }
            inds[k] = x as usize;
        }
        Some(inds)
    }
}
