mod basic;

pub use basic::AtomType;

use crate::{Error, Result};

/// Append-only registry of particle types. A type's position in the
/// registry is the type id stored on each particle.
#[derive(Clone, Debug, Default)]
pub struct AtomTypes {
    types: Vec<AtomType>,
}
impl AtomTypes {
    pub fn new() -> Self {
        Self::default()
    }
    /// Register a new type with unit mass and return its id
    pub fn add(&mut self, name: &str) -> Result<usize> {
        self.add_with_mass(name, 1.0)
    }
    pub fn add_with_mass(&mut self, name: &str, mass: f64) -> Result<usize> {
        if self.index_of(name).is_ok() {
            return Err(Error::DuplicateType(name.to_string()));
        }
        if !(mass > 0.0) {
            return Err(Error::InvalidParam(format!(
                "mass of type '{name}' should be positive, found {mass}"
            )));
        }
        self.types.push(AtomType::new(name, mass));
        Ok(self.types.len() - 1)
    }
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.types
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }
    pub fn get(&self, idx: usize) -> &AtomType {
        &self.types[idx]
    }
    pub fn name(&self, idx: usize) -> &str {
        self.types[idx].name()
    }
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name()).collect()
    }
    pub fn len(&self) -> usize {
        self.types.len()
    }
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
