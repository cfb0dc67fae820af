pub mod kinetic_energy;
pub mod ndof;
pub mod potential_energy;
pub mod pressure;
pub mod temperature;

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{output::Value, Error, Group, System};

/// Scalar quantities that can be logged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Temperature,
    Pressure,
    Volume,
    TranslationalKineticEnergy,
    RotationalKineticEnergy,
    KineticEnergy,
    PotentialEnergy,
    TranslationalNdof,
    RotationalNdof,
    #[serde(rename = "N")]
    N,
}
impl Quantity {
    pub const ALL: [Quantity; 10] = [
        Quantity::Temperature,
        Quantity::Pressure,
        Quantity::Volume,
        Quantity::TranslationalKineticEnergy,
        Quantity::RotationalKineticEnergy,
        Quantity::KineticEnergy,
        Quantity::PotentialEnergy,
        Quantity::TranslationalNdof,
        Quantity::RotationalNdof,
        Quantity::N,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "pressure",
            Quantity::Volume => "volume",
            Quantity::TranslationalKineticEnergy => "translational_kinetic_energy",
            Quantity::RotationalKineticEnergy => "rotational_kinetic_energy",
            Quantity::KineticEnergy => "kinetic_energy",
            Quantity::PotentialEnergy => "potential_energy",
            Quantity::TranslationalNdof => "translational_ndof",
            Quantity::RotationalNdof => "rotational_ndof",
            Quantity::N => "N",
        }
    }
}
impl FromStr for Quantity {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| Error::UnknownQuantity(s.to_string()))
    }
}
impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

/// Thermodynamic state of a group of integrated particles
#[derive(Clone, Debug, PartialEq)]
pub struct Thermo {
    pub translational_kinetic_energy: f64,
    pub rotational_kinetic_energy: f64,
    pub translational_ndof: usize,
    pub rotational_ndof: usize,
    pub temperature: f64,
    pub pressure: f64,
    pub volume: f64,
    pub potential_energy: f64,
    pub num_particles: usize,
}
impl Thermo {
    pub fn compute(system: &System, group: &Group) -> Self {
        let translational_kinetic_energy = kinetic_energy::translational(system, group);
        let rotational_kinetic_energy = kinetic_energy::rotational(system, group);
        let translational_ndof = ndof::translational(system, group);
        let rotational_ndof = ndof::rotational(system, group);
        Self {
            translational_kinetic_energy,
            rotational_kinetic_energy,
            translational_ndof,
            rotational_ndof,
            temperature: temperature::from_kinetic(
                translational_kinetic_energy + rotational_kinetic_energy,
                translational_ndof + rotational_ndof,
            ),
            pressure: pressure::compute(system, translational_kinetic_energy),
            volume: system.volume(),
            potential_energy: potential_energy::compute(system),
            num_particles: system.num_atoms(),
        }
    }
    pub fn ndof(&self) -> usize {
        self.translational_ndof + self.rotational_ndof
    }
    pub fn get(&self, quantity: Quantity) -> Value {
        match quantity {
            Quantity::Temperature => Value::Float(self.temperature),
            Quantity::Pressure => Value::Float(self.pressure),
            Quantity::Volume => Value::Float(self.volume),
            Quantity::TranslationalKineticEnergy => Value::Float(self.translational_kinetic_energy),
            Quantity::RotationalKineticEnergy => Value::Float(self.rotational_kinetic_energy),
            Quantity::KineticEnergy => {
                Value::Float(self.translational_kinetic_energy + self.rotational_kinetic_energy)
            }
            Quantity::PotentialEnergy => Value::Float(self.potential_energy),
            Quantity::TranslationalNdof => Value::Usize(self.translational_ndof),
            Quantity::RotationalNdof => Value::Usize(self.rotational_ndof),
            Quantity::N => Value::Usize(self.num_particles),
        }
    }
}
