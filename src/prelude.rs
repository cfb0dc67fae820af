pub use super::builder::{PairCoeff, PotentialConfig, SystemBuilder};
pub use super::compute::{Quantity, Thermo};
pub use super::config::TrimerConfig;
pub use super::context::{Context, Device, ExecutionConfig};
pub use super::integrators::{IntegrationMethod, Integrator, IntegratorMode, Npt, NptParams, NptUpdate, Nve};
pub use super::lattice::{Lattice, Square};
pub use super::output::LogConfig;
pub use super::rigid::BodyTemplate;
pub use super::simulation::Simulation;
pub use super::{Error, Group, Result};
