use crate::{Group, System};

/// Translational degrees of freedom, less the conserved total momentum
pub fn translational(system: &System, group: &Group) -> usize {
    let d = system.dimensions;
    (d * group.len()).saturating_sub(d)
}

/// Rotational degrees of freedom: one per principal axis with a nonzero
/// moment of inertia. A planar system can only rotate about z.
pub fn rotational(system: &System, group: &Group) -> usize {
    group
        .members()
        .iter()
        .map(|&i| {
            let moment = &system.atoms.moment_inertia[i];
            if system.dimensions == 2 {
                usize::from(moment[2] > 0.0)
            } else {
                moment.iter().filter(|&&m| m > 0.0).count()
            }
        })
        .sum()
}
