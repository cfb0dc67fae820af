use crate::{rigid, utils, Group, System};

/// Translational kinetic energy of the group
pub fn translational(system: &System, group: &Group) -> f64 {
    0.5 * group
        .members()
        .iter()
        .map(|&i| system.atoms.mass(i) * utils::norm_squared(&system.atoms.velocities[i]))
        .sum::<f64>()
}

/// Rotational kinetic energy of the group, about axes with a moment of inertia
pub fn rotational(system: &System, group: &Group) -> f64 {
    0.5 * group
        .members()
        .iter()
        .map(|&i| {
            let angmom = &system.atoms.angmom[i];
            let omega = rigid::angular_velocity(angmom, &system.atoms.moment_inertia[i]);
            angmom.dot(&omega)
        })
        .sum::<f64>()
}
