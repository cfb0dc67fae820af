use super::*;

/// Velocity-Verlet integration in the microcanonical ensemble
#[derive(Clone, Debug)]
pub struct Nve {
    group: Group,
}
impl Nve {
    pub fn new(group: Group) -> Self {
        Self { group }
    }
}

impl IntegrationMethod for Nve {
    fn group(&self) -> &Group {
        &self.group
    }
    fn first_step(&mut self, system: &mut System, dt: f64) {
        for &i in self.group.members() {
            kick(system, i, 0.5 * dt);
            drift(system, i, dt);
        }
    }
    fn second_step(&mut self, system: &mut System, dt: f64) {
        for &i in self.group.members() {
            kick(system, i, 0.5 * dt);
        }
    }
}
