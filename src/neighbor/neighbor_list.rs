use log::debug;

use super::{Grid, UpdateSettings};
use crate::{
    utils::{self, Axis},
    Atoms, Container, Error, Result,
};

/// Half neighbor list built from a cell list.
///
/// Each pair `i < j` closer than the force cutoff plus the skin distance is
/// stored once, under `i`. Pairs belonging to the same rigid body are
/// excluded.
#[derive(Clone, Debug)]
pub struct NeighborList {
    force_distance: f64,
    skin_distance: f64,
    neighbors: Vec<Vec<usize>>,
    pos_at_prev_build: Vec<[f64; 3]>,
    update_settings: UpdateSettings,
    num_builds: usize,
}
impl NeighborList {
    pub fn new(force_distance: f64, skin_distance: f64) -> Result<Self> {
        if !(force_distance > 0.0) {
            return Err(Error::InvalidParam(format!(
                "force cutoff distance should be positive, found {force_distance}"
            )));
        }
        if !(skin_distance >= 0.0) {
            return Err(Error::InvalidParam(format!(
                "skin distance should not be negative, found {skin_distance}"
            )));
        }
        Ok(Self {
            force_distance,
            skin_distance,
            neighbors: Vec::new(),
            pos_at_prev_build: Vec::new(),
            update_settings: UpdateSettings::default(),
            num_builds: 0,
        })
    }

    // Getters
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }
    pub fn force_distance(&self) -> f64 {
        self.force_distance
    }
    pub fn skin_distance(&self) -> f64 {
        self.skin_distance
    }
    /// Distance within which pairs are stored
    pub fn cutoff_distance(&self) -> f64 {
        self.force_distance + self.skin_distance
    }
    pub fn is_built(&self) -> bool {
        self.num_builds > 0
    }
    pub fn num_builds(&self) -> usize {
        self.num_builds
    }
    pub fn update_settings(&self) -> &UpdateSettings {
        &self.update_settings
    }

    /// Ensure the minimum image convention holds for the list cutoff
    pub fn check_box(&self, container: &Container) -> Result<()> {
        let required = 2.0 * self.cutoff_distance();
        for axis in Axis::ALL {
            let length = container.rect().length(axis);
            if container.is_periodic(axis) && length < required {
                return Err(Error::BoxTooSmall {
                    axis: axis.index(),
                    length,
                    required,
                });
            }
        }
        Ok(())
    }

    /// Rebuild if the list was never built or the update settings ask for it
    pub fn update(&mut self, atoms: &Atoms, container: &Container, step: u64) -> Result<bool> {
        let needs_build = !self.is_built()
            || self.pos_at_prev_build.len() != atoms.num_atoms()
            || self
                .update_settings
                .should_update_neighbors(step, || self.atoms_moved_too_far(atoms, container));
        if needs_build {
            self.build(atoms, container)?;
            self.update_settings.set_last_update_step(step);
        }
        Ok(needs_build)
    }

    pub fn build(&mut self, atoms: &Atoms, container: &Container) -> Result<()> {
        self.check_box(container)?;
        let grid = Grid::new(container, self.cutoff_distance());
        let cutoff2 = self.cutoff_distance() * self.cutoff_distance();

        let bin_numbers: Vec<usize> = atoms
            .positions()
            .iter()
            .map(|coord| grid.coord_to_bin(coord))
            .collect();
        let sort_indices = utils::get_sort_indices(&bin_numbers);
        let mut bin_start = utils::bin_counts(&bin_numbers);
        bin_start.resize(grid.total_num_bins() + 1, 0);
        let mut acc = 0;
        for s in bin_start.iter_mut() {
            let count = *s;
            *s = acc;
            acc += count;
        }
        let adjacent: Vec<Vec<usize>> = (0..grid.total_num_bins())
            .map(|bin| grid.neighbor_bins(bin))
            .collect();

        let mut neighbors = vec![Vec::new(); atoms.num_atoms()];
        for (i, neighbors_i) in neighbors.iter_mut().enumerate() {
            let posi = &atoms.positions[i];
            let bodyi = atoms.bodies[i];
            for &bin in &adjacent[bin_numbers[i]] {
                for &j in &sort_indices[bin_start[bin]..bin_start[bin + 1]] {
                    if j <= i || (bodyi.is_some() && bodyi == atoms.bodies[j]) {
                        continue;
                    }
                    let r = container.separation(posi, &atoms.positions[j]);
                    if utils::norm_squared(&r) < cutoff2 {
                        neighbors_i.push(j);
                    }
                }
            }
        }

        self.neighbors = neighbors;
        self.pos_at_prev_build = atoms.positions.clone();
        self.num_builds += 1;
        debug!(
            "Built neighbor list over {} bins ({} pairs)",
            grid.total_num_bins(),
            self.neighbors.iter().map(Vec::len).sum::<usize>()
        );
        Ok(())
    }

    // Private functions
    fn atoms_moved_too_far(&self, atoms: &Atoms, container: &Container) -> bool {
        let half_skin_dist = self.skin_distance * 0.5;
        let opt = self
            .pos_at_prev_build
            .iter()
            .zip(atoms.positions().iter())
            .map(|(old, new)| utils::norm_squared(&container.separation(new, old)))
            .reduce(f64::max);

        match opt {
            Some(max_dist_sq) => max_dist_sq > half_skin_dist * half_skin_dist,
            None => false,
        }
    }
}
