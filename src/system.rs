use crate::{
    rigid::BodyForces, AtomTypes, Atoms, Container, Group, LJCut, NeighborList, RigidConstraint,
    Result,
};

/// Particle data and everything derived from it that integrators act on
#[derive(Clone, Debug)]
pub struct System {
    pub atoms: Atoms,
    pub types: AtomTypes,
    pub container: Container,
    pub rigid: RigidConstraint,
    pub dimensions: usize,
    /// Net forces and torques from the last force evaluation
    pub net: BodyForces,
    pub potential_energy: f64,
    /// Molecular virial from the last force evaluation
    pub virial: f64,
}
impl System {
    pub fn new(atoms: Atoms, types: AtomTypes, container: Container, rigid: RigidConstraint, dimensions: usize) -> Self {
        Self {
            atoms,
            types,
            container,
            rigid,
            dimensions,
            net: BodyForces::default(),
            potential_energy: 0.0,
            virial: 0.0,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.num_atoms()
    }
    pub fn volume(&self) -> f64 {
        self.container.volume(self.dimensions)
    }

    /// Evaluate pair forces, fold them onto rigid bodies and store the result
    pub fn compute_forces(&mut self, potential: &LJCut, nlist: &NeighborList) {
        let pair = potential.compute(&self.atoms, &self.container, nlist);
        let mut net = self.rigid.aggregate(&self.atoms, &pair.forces);
        if self.dimensions == 2 {
            for (f, t) in net.forces.iter_mut().zip(net.torques.iter_mut()) {
                f[2] = 0.0;
                t.x = 0.0;
                t.y = 0.0;
            }
        }
        self.potential_energy = pair.energy;
        self.virial = pair.virial + net.virial_correction;
        self.net = net;
    }

    /// Wrap positions into the box and re-place rigid constituents
    pub fn update_positions(&mut self) {
        let Atoms {
            positions, images, ..
        } = &mut self.atoms;
        for (p, image) in positions.iter_mut().zip(images.iter_mut()) {
            self.container.wrap(p, image);
        }
        self.rigid.update_constituents(&mut self.atoms, &self.container);
    }

    /// Zero out-of-plane velocity and rotation of the given particles
    pub fn enforce_2d(&mut self, group: &Group) {
        if self.dimensions != 2 {
            return;
        }
        for &i in group.members() {
            self.atoms.velocities[i][2] = 0.0;
            self.atoms.angmom[i].x = 0.0;
            self.atoms.angmom[i].y = 0.0;
        }
    }

    /// Reject groups that would integrate rigid constituents directly
    pub fn check_group(&self, group: &Group) -> Result<()> {
        if let Some(&i) = group
            .members()
            .iter()
            .find(|&&i| i >= self.num_atoms() || self.rigid.is_constituent(&self.atoms, i))
        {
            return Err(crate::Error::InvalidParam(format!(
                "group '{}' contains particle {} which cannot be integrated",
                group.name(),
                i
            )));
        }
        Ok(())
    }

    pub fn is_finite(&self, group: &Group) -> bool {
        group.members().iter().all(|&i| {
            crate::utils::is_finite(&self.atoms.positions[i])
                && crate::utils::is_finite(&self.atoms.velocities[i])
                && self.atoms.angmom[i].iter().all(|x| x.is_finite())
        })
    }
}
