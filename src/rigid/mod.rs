mod template;

pub use template::BodyTemplate;

use log::info;
use nalgebra::{UnitQuaternion, Vector3};

use crate::{AtomTypes, Atoms, Container, Error, Result};

/// A rigid body: a center particle and the constituents attached to it
#[derive(Clone, Debug)]
pub struct Body {
    pub center: usize,
    pub constituents: Vec<usize>,
    offsets: Vec<Vector3<f64>>,
}
impl Body {
    /// Constituent offsets from the center in the body frame
    pub fn offsets(&self) -> &[Vector3<f64>] {
        &self.offsets
    }
}

#[derive(Clone, Debug)]
struct ResolvedTemplate {
    offsets: Vec<Vector3<f64>>,
    types: Vec<usize>,
}

/// Net forces and torques after folding constituent forces onto body centers
#[derive(Clone, Debug, Default)]
pub struct BodyForces {
    /// Net force per particle; zero on constituents
    pub forces: Vec<[f64; 3]>,
    /// Space frame torque per particle; zero on constituents
    pub torques: Vec<Vector3<f64>>,
    /// Amount to add to the pair virial to obtain the molecular virial
    pub virial_correction: f64,
}

/// Rigid body constraint: templates keyed by center type, and the bodies
/// created from them
#[derive(Clone, Debug, Default)]
pub struct RigidConstraint {
    templates: Vec<Option<ResolvedTemplate>>,
    bodies: Vec<Body>,
}
impl RigidConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template of bodies centered on particles of `anchor_type`
    pub fn set_param(&mut self, anchor_type: usize, template: &BodyTemplate, types: &AtomTypes) -> Result<()> {
        if anchor_type >= types.len() {
            return Err(Error::InvalidParam(format!(
                "rigid anchor type id {anchor_type} is not registered"
            )));
        }
        let resolved = ResolvedTemplate {
            offsets: template
                .positions
                .iter()
                .map(|p| Vector3::from(*p))
                .collect(),
            types: template
                .types
                .iter()
                .map(|name| types.index_of(name))
                .collect::<Result<_>>()?,
        };
        if self.templates.len() <= anchor_type {
            self.templates.resize(anchor_type + 1, None);
        }
        self.templates[anchor_type] = Some(resolved);
        Ok(())
    }
    pub fn has_template(&self, anchor_type: usize) -> bool {
        matches!(self.templates.get(anchor_type), Some(Some(_)))
    }
    pub fn anchor_types(&self) -> Vec<usize> {
        (0..self.templates.len())
            .filter(|&t| self.has_template(t))
            .collect()
    }
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }
    pub fn is_center(&self, atoms: &Atoms, idx: usize) -> bool {
        atoms
            .body(idx)
            .is_some_and(|b| self.bodies[b].center == idx)
    }
    pub fn is_constituent(&self, atoms: &Atoms, idx: usize) -> bool {
        atoms
            .body(idx)
            .is_some_and(|b| self.bodies[b].center != idx)
    }

    /// Create constituent particles for every particle whose type has a
    /// template. Returns the number of bodies created.
    pub fn create_bodies(&mut self, atoms: &mut Atoms, container: &Container, types: &AtomTypes) -> Result<usize> {
        let centers: Vec<usize> = (0..atoms.num_atoms())
            .filter(|&i| self.has_template(atoms.types[i]) && atoms.body(i).is_none())
            .collect();

        for &center in &centers {
            let Some(template) = self.templates[atoms.types[center]].clone() else {
                continue;
            };
            let body_idx = self.bodies.len();
            atoms.bodies[center] = Some(body_idx);
            let mut constituents = Vec::with_capacity(template.types.len());
            for (offset, &t) in template.offsets.iter().zip(template.types.iter()) {
                let (position, image) = place(atoms, container, center, offset);
                let range = atoms.add_atoms(t, types.get(t).mass(), vec![position]);
                atoms.images[range.start] = image;
                atoms.bodies[range.start] = Some(body_idx);
                constituents.push(range.start);
            }
            self.bodies.push(Body {
                center,
                constituents,
                offsets: template.offsets,
            });
        }
        self.update_constituents(atoms, container);
        info!(
            "Created {} rigid bodies, {} particles in total",
            centers.len(),
            atoms.num_atoms()
        );
        Ok(centers.len())
    }

    /// Place constituents rigidly relative to their body center and give
    /// them the velocity of the body at their position
    pub fn update_constituents(&self, atoms: &mut Atoms, container: &Container) {
        for body in &self.bodies {
            let c = body.center;
            let omega = atoms.orientations[c]
                .transform_vector(&angular_velocity(&atoms.angmom[c], &atoms.moment_inertia[c]));
            let vc = Vector3::from(atoms.velocities[c]);
            for (&k, offset) in body.constituents.iter().zip(body.offsets.iter()) {
                let (position, image) = place(atoms, container, c, offset);
                let d = atoms.orientations[c].transform_vector(offset);
                atoms.positions[k] = position;
                atoms.images[k] = image;
                atoms.velocities[k] = (vc + omega.cross(&d)).into();
            }
        }
    }

    /// Fold constituent forces onto body centers as net forces and torques
    pub fn aggregate(&self, atoms: &Atoms, forces: &[[f64; 3]]) -> BodyForces {
        let mut net = BodyForces {
            forces: forces.to_vec(),
            torques: vec![Vector3::zeros(); atoms.num_atoms()],
            virial_correction: 0.0,
        };
        for body in &self.bodies {
            let q = &atoms.orientations[body.center];
            let mut force = Vector3::from(forces[body.center]);
            let mut torque = Vector3::zeros();
            for (&k, offset) in body.constituents.iter().zip(body.offsets.iter()) {
                let d = q.transform_vector(offset);
                let f = Vector3::from(forces[k]);
                force += f;
                torque += d.cross(&f);
                net.virial_correction -= d.dot(&f);
                net.forces[k] = [0.0; 3];
            }
            net.forces[body.center] = force.into();
            net.torques[body.center] = torque;
        }
        net
    }
}

/// Body frame angular velocity; axes without a moment of inertia do not rotate
pub fn angular_velocity(angmom: &Vector3<f64>, moment: &[f64; 3]) -> Vector3<f64> {
    Vector3::from_fn(|k, _| {
        if moment[k] > 0.0 {
            angmom[k] / moment[k]
        } else {
            0.0
        }
    })
}

/// Advance an orientation by a body frame angular velocity over `dt`
pub fn rotate(q: &UnitQuaternion<f64>, omega: &Vector3<f64>, dt: f64) -> UnitQuaternion<f64> {
    q * UnitQuaternion::from_scaled_axis(omega * dt)
}

fn place(atoms: &Atoms, container: &Container, center: usize, offset: &Vector3<f64>) -> ([f64; 3], [i32; 3]) {
    let d = atoms.orientations[center].transform_vector(offset);
    let c = atoms.positions[center];
    let mut position = [c[0] + d.x, c[1] + d.y, c[2] + d.z];
    let mut image = atoms.images[center];
    container.wrap(&mut position, &mut image);
    (position, image)
}
