use crate::System;

pub fn compute(system: &System) -> f64 {
    system.potential_energy
}
