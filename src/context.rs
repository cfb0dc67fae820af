use std::fmt::Display;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Requested execution device
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Best available device
    #[default]
    Auto,
    Cpu,
    Gpu,
}
impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Device::Auto => "auto",
            Device::Cpu => "cpu",
            Device::Gpu => "gpu",
        };
        s.fmt(f)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub device: Device,
}

/// Execution context of one simulation: the selected device and the
/// dimensionality particles are constrained to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    device: Device,
    dimensions: usize,
}
impl Context {
    /// Select execution resources. Fails if the requested device is not
    /// available.
    pub fn initialize(config: &ExecutionConfig) -> Result<Self> {
        let device = match config.device {
            Device::Auto | Device::Cpu => Device::Cpu,
            Device::Gpu => {
                return Err(Error::DeviceUnavailable(
                    "no GPU support in this build".to_string(),
                ))
            }
        };
        info!("Initialized execution context on {}", device);
        Ok(Self {
            device,
            dimensions: 3,
        })
    }
    /// Restrict particle positions and velocities to the xy plane
    pub fn enforce_2d(mut self) -> Self {
        self.dimensions = 2;
        self
    }
    pub fn device(&self) -> Device {
        self.device
    }
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}
