//! ---
//! nsim_section: "01-core-engine"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Error taxonomy for the simulation engine."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Configuration errors surfaced before a simulation run starts.
///
/// The per-tick loop itself is total over validated inputs and never fails.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation duration must be positive, got {0} s")]
    NonPositiveDuration(u64),
    #[error("time step must be positive, got {0} s")]
    NonPositiveTimeStep(f64),
    #[error("payload size must be positive")]
    EmptyPayload,
    #[error("noise standard deviation must be non-negative, got {0}")]
    NegativeNoise(f64),
    #[error("signal period must be positive, got {0} s")]
    NonPositivePeriod(f64),
    #[error("radio bitrate must be positive, got {0} bps")]
    NonPositiveBitrate(f64),
    #[error("power draw '{name}' must be non-negative, got {value} mW")]
    NegativePower { name: &'static str, value: f64 },
    #[error("action duration '{name}' must be non-negative, got {value} s")]
    NegativeDuration { name: &'static str, value: f64 },
    #[error("failed to read config override {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config override {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
