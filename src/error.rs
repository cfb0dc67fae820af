use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
///
/// Every variant is fatal to a simulation protocol; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested execution device is not available in this build.
    #[error("execution device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A particle type name was referenced before being registered.
    #[error("unknown particle type '{0}'")]
    UnknownType(String),

    #[error("particle type '{0}' is already registered")]
    DuplicateType(String),

    /// Unordered type pairs without pair coefficients.
    #[error("missing pair coefficients for {}", format_pairs(.0))]
    MissingPairCoefficients(Vec<(String, String)>),

    /// Rigid anchor type without a moment of inertia.
    #[error("no moment of inertia set for rigid anchor type '{0}'")]
    MissingMomentOfInertia(String),

    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Periodic box length too short for the neighbor list cutoff.
    #[error("box length {length} along axis {axis} is smaller than the required {required}")]
    BoxTooSmall {
        axis: usize,
        length: f64,
        required: f64,
    },

    #[error("unknown log quantity '{0}'")]
    UnknownQuantity(String),

    /// A particle position or velocity became non-finite.
    #[error("simulation diverged at timestep {timestep}")]
    Diverged { timestep: u64 },

    #[error("no {0} integration method attached")]
    NoSuchIntegrator(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a}, {b})"))
        .collect::<Vec<_>>()
        .join(", ")
}
