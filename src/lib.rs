//! Rigid trimer molecules on a square lattice, simulated in the NPT ensemble.
// TODO: anisotropic barostat couplings (per-axis box scaling)

pub mod atom_type;
pub mod atomic;
pub mod atoms;
pub mod builder;
pub mod compute;
pub mod config;
pub mod container;
pub mod context;
pub mod error;
pub mod group;
pub mod integrators;
pub mod lattice;
pub mod neighbor;
pub mod output;
pub mod prelude;
pub mod region;
pub mod rigid;
pub mod simulation;
pub mod system;
pub mod trimer;
pub mod utils;

pub use atom_type::{AtomType, AtomTypes};
pub use atomic::*;
pub use atoms::Atoms;
pub use builder::{PairCoeff, PotentialConfig, SystemBuilder};
pub use compute::{Quantity, Thermo};
pub use config::TrimerConfig;
pub use container::{Container, BC};
pub use context::{Context, Device, ExecutionConfig};
pub use error::{Error, Result};
pub use group::Group;
pub use neighbor::NeighborList;
pub use rigid::{BodyTemplate, RigidConstraint};
pub use simulation::Simulation;
pub use system::System;
