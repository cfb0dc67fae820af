use std::ops::Range;

use nalgebra::{UnitQuaternion, Vector3};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{Error, Result};

/// Particle properties during simulation, not including forces.
///
/// Stored as parallel vectors indexed by particle index; particles are never
/// reordered, so an index is also a stable particle tag.
#[derive(Clone, Debug, Default)]
pub struct Atoms {
    pub types: Vec<usize>,
    pub positions: Vec<[f64; 3]>,
    pub velocities: Vec<[f64; 3]>,
    pub images: Vec<[i32; 3]>,
    pub masses: Vec<f64>,
    /// Principal moments of inertia in the body frame
    pub moment_inertia: Vec<[f64; 3]>,
    pub orientations: Vec<UnitQuaternion<f64>>,
    /// Angular momentum in the body frame
    pub angmom: Vec<Vector3<f64>>,
    /// Rigid body each particle belongs to, if any
    pub bodies: Vec<Option<usize>>,
}
impl Atoms {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn num_atoms(&self) -> usize {
        self.types.len()
    }
    pub fn types(&self) -> &[usize] {
        &self.types
    }
    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }
    pub fn velocities(&self) -> &[[f64; 3]] {
        &self.velocities
    }
    pub fn mass(&self, idx: usize) -> f64 {
        self.masses[idx]
    }
    pub fn body(&self, idx: usize) -> Option<usize> {
        self.bodies[idx]
    }
    pub fn count_type(&self, atom_type: usize) -> usize {
        self.types.iter().filter(|&&t| t == atom_type).count()
    }

    /// Append particles of one type at the given coordinates, at rest and
    /// with identity orientation. Returns the index range of the new particles.
    pub fn add_atoms(&mut self, atom_type: usize, mass: f64, coords: Vec<[f64; 3]>) -> Range<usize> {
        let first = self.num_atoms();
        let num_atoms = coords.len();
        self.types.extend(std::iter::repeat(atom_type).take(num_atoms));
        self.velocities.extend(std::iter::repeat([0.0; 3]).take(num_atoms));
        self.images.extend(std::iter::repeat([0; 3]).take(num_atoms));
        self.masses.extend(std::iter::repeat(mass).take(num_atoms));
        self.moment_inertia
            .extend(std::iter::repeat([0.0; 3]).take(num_atoms));
        self.orientations
            .extend(std::iter::repeat(UnitQuaternion::identity()).take(num_atoms));
        self.angmom
            .extend(std::iter::repeat(Vector3::zeros()).take(num_atoms));
        self.bodies.extend(std::iter::repeat(None).take(num_atoms));
        self.positions.extend(coords);
        first..first + num_atoms
    }

    /// Set the moment of inertia of every particle of `atom_type`, leaving
    /// other particles untouched. Returns the number of particles updated.
    pub fn set_moment_inertia_by_type(&mut self, atom_type: usize, moment: [f64; 3]) -> usize {
        let mut count = 0;
        for (t, m) in self.types.iter().zip(self.moment_inertia.iter_mut()) {
            if *t == atom_type {
                *m = moment;
                count += 1;
            }
        }
        count
    }

    pub fn increment_position(&mut self, i: usize, increment: [f64; 3]) {
        self.positions[i][0] += increment[0];
        self.positions[i][1] += increment[1];
        self.positions[i][2] += increment[2];
    }
    pub fn increment_velocity(&mut self, i: usize, increment: [f64; 3]) {
        self.velocities[i][0] += increment[0];
        self.velocities[i][1] += increment[1];
        self.velocities[i][2] += increment[2];
    }

    /// Draw Maxwell-Boltzmann velocities (and angular momenta about axes with
    /// a nonzero moment) at temperature `kt` for the given particles, then
    /// remove their center of mass drift.
    pub fn set_temperature<R: Rng>(
        &mut self,
        members: &[usize],
        kt: f64,
        dimensions: usize,
        rng: &mut R,
    ) -> Result<()> {
        let dist = Normal::new(0.0, kt.sqrt())
            .map_err(|_| Error::InvalidParam(format!("invalid temperature {kt}")))?;
        for &i in members {
            let sqrt_m = self.masses[i].sqrt();
            let mut v = [0.0; 3];
            for vk in v.iter_mut().take(dimensions) {
                *vk = dist.sample(rng) / sqrt_m;
            }
            self.velocities[i] = v;

            let moment = self.moment_inertia[i];
            let mut angmom = Vector3::zeros();
            for k in 0..3 {
                // Only rotation about z exists in a planar system
                if moment[k] > 0.0 && (dimensions == 3 || k == 2) {
                    angmom[k] = dist.sample(rng) * moment[k].sqrt();
                }
            }
            self.angmom[i] = angmom;
        }

        let total_mass: f64 = members.iter().map(|&i| self.masses[i]).sum();
        if total_mass > 0.0 {
            let mut momentum = [0.0; 3];
            for &i in members {
                for k in 0..3 {
                    momentum[k] += self.masses[i] * self.velocities[i][k];
                }
            }
            let drift = momentum.map(|p| p / total_mass);
            for &i in members {
                self.increment_velocity(i, drift.map(|d| -d));
            }
        }
        Ok(())
    }
}
