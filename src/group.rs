use crate::{Atoms, RigidConstraint};

/// Named, read-only selection of particle indices
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    name: String,
    members: Vec<usize>,
}
impl Group {
    pub fn new(name: &str, members: Vec<usize>) -> Self {
        Self {
            name: name.to_string(),
            members,
        }
    }
    pub fn all(atoms: &Atoms) -> Self {
        Self::new("all", (0..atoms.num_atoms()).collect())
    }
    /// Centers of rigid bodies
    pub fn rigid_center(rigid: &RigidConstraint) -> Self {
        Self::new(
            "rigid_center",
            rigid.bodies().iter().map(|b| b.center).collect(),
        )
    }
    /// Particles that are not constituents of a rigid body
    pub fn integrable(atoms: &Atoms, rigid: &RigidConstraint) -> Self {
        Self::new(
            "integrable",
            (0..atoms.num_atoms())
                .filter(|&i| !rigid.is_constituent(atoms, i))
                .collect(),
        )
    }
    pub fn of_type(atoms: &Atoms, atom_type: usize) -> Self {
        Self::new(
            &format!("type {atom_type}"),
            (0..atoms.num_atoms())
                .filter(|&i| atoms.types[i] == atom_type)
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn members(&self) -> &[usize] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
