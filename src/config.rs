//! YAML configuration of the trimer protocol. Every field defaults to the
//! standard protocol, so an empty document reproduces it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    builder::PotentialConfig, integrators::NptUpdate, output::LogConfig, BodyTemplate,
    ExecutionConfig, Result,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub spacing: f64,
    pub cells: [usize; 2],
}
impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            spacing: 4.0,
            cells: [50, 50],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub anchor: String,
    pub satellite: String,
    pub distance: f64,
    pub angle_degrees: f64,
}
impl BodyConfig {
    pub fn template(&self) -> BodyTemplate {
        BodyTemplate::trimer(&self.satellite, self.distance, self.angle_degrees.to_radians())
    }
}
impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            anchor: "A".to_string(),
            satellite: "B".to_string(),
            distance: 1.0,
            angle_degrees: 60.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFileConfig {
    pub filename: PathBuf,
    pub period: u64,
    pub quantities: Vec<String>,
}
impl LogFileConfig {
    /// Resolve quantity names
    pub fn to_log_config(&self) -> Result<LogConfig> {
        let names: Vec<&str> = self.quantities.iter().map(|q| q.as_str()).collect();
        LogConfig::new(&self.filename, &names, self.period)
    }
}
impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from("out.dat"),
            period: 1000,
            quantities: [
                "temperature",
                "pressure",
                "volume",
                "translational_kinetic_energy",
                "rotational_kinetic_energy",
                "rotational_ndof",
                "translational_ndof",
                "N",
            ]
            .iter()
            .map(|q| q.to_string())
            .collect(),
        }
    }
}

/// Targets held fixed over the whole protocol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub kt: f64,
    pub pressure: f64,
}
impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            kt: 2.0,
            pressure: 13.5,
        }
    }
}

/// One run segment with its time step and coupling constants
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub steps: u64,
    pub dt: f64,
    pub tau: f64,
    pub tau_p: f64,
}
impl Phase {
    pub fn npt_update(&self) -> NptUpdate {
        NptUpdate {
            tau: Some(self.tau),
            tau_p: Some(self.tau_p),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimerConfig {
    pub context: ExecutionConfig,
    pub lattice: LatticeConfig,
    pub moment_inertia: [f64; 3],
    pub potential: PotentialConfig,
    pub body: BodyConfig,
    pub log: LogFileConfig,
    pub ensemble: EnsembleConfig,
    pub phases: Vec<Phase>,
    /// Draw initial velocities at this temperature; particles start at rest
    /// when unset
    pub initial_kt: Option<f64>,
    pub seed: u64,
}
impl Default for TrimerConfig {
    fn default() -> Self {
        Self {
            context: ExecutionConfig::default(),
            lattice: LatticeConfig::default(),
            moment_inertia: [0.0, 0.0, 1.65],
            potential: PotentialConfig::trimer(),
            body: BodyConfig::default(),
            log: LogFileConfig::default(),
            ensemble: EnsembleConfig::default(),
            phases: vec![
                Phase {
                    steps: 10_000,
                    dt: 0.001,
                    tau: 5.0,
                    tau_p: 5.0,
                },
                Phase {
                    steps: 100_000,
                    dt: 0.005,
                    tau: 1.0,
                    tau_p: 1.0,
                },
            ],
            initial_kt: None,
            seed: 0,
        }
    }
}
impl TrimerConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
    /// Total number of timesteps over all phases
    pub fn total_steps(&self) -> u64 {
        self.phases.iter().map(|p| p.steps).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Device, Error, Quantity};

    #[test]
    fn empty_document_gives_defaults() {
        let config = TrimerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, TrimerConfig::default());
        assert_eq!(config.total_steps(), 110_000);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let yaml = "
context:
  device: cpu
lattice:
  cells: [6, 6]
log:
  filename: short.dat
phases:
  - { steps: 100, dt: 0.001, tau: 5, tau_p: 5 }
seed: 7
";
        let config = TrimerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.context.device, Device::Cpu);
        assert_eq!(config.lattice.cells, [6, 6]);
        assert_eq!(config.lattice.spacing, 4.0);
        assert_eq!(config.log.filename, PathBuf::from("short.dat"));
        assert_eq!(config.log.period, 1000);
        assert_eq!(config.phases.len(), 1);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn yaml_round_trip_of_defaults() {
        let config = TrimerConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(TrimerConfig::from_yaml_str(&text).unwrap(), config);
    }

    #[test]
    fn log_quantities_resolve_in_order() {
        let log = LogFileConfig::default().to_log_config().unwrap();
        assert_eq!(log.quantities.len(), 8);
        assert_eq!(log.quantities[0], Quantity::Temperature);
        assert_eq!(log.quantities[7], Quantity::N);

        let bad = LogFileConfig {
            quantities: vec!["enthalpy".to_string()],
            ..Default::default()
        };
        assert!(matches!(bad.to_log_config(), Err(Error::UnknownQuantity(_))));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            TrimerConfig::from_yaml_str("lattice: [1, 2"),
            Err(Error::Yaml(_))
        ));
    }
}
