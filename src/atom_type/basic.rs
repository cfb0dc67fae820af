/// A named particle type with a per-type mass
#[derive(Clone, Debug, PartialEq)]
pub struct AtomType {
    name: String,
    mass: f64,
}
impl AtomType {
    pub fn new(name: &str, mass: f64) -> Self {
        assert!(mass > 0.0, "Mass should be positive, found {}", mass);
        Self {
            name: name.to_string(),
            mass,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn mass(&self) -> f64 {
        self.mass
    }
}
