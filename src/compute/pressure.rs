use crate::System;

/// Instantaneous pressure from the virial theorem,
/// P = (2 K + W) / (D V), with K the translational kinetic energy and W the
/// molecular virial
pub fn compute(system: &System, translational_kinetic_energy: f64) -> f64 {
    let d = system.dimensions as f64;
    (2.0 * translational_kinetic_energy + system.virial) / (d * system.volume())
}
