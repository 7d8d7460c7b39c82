//! ---
//! nsim_section: "01-core-engine"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Node and energy-model configuration types."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, SimError};

fn default_duration_s() -> u64 {
    600
}

fn default_dt_s() -> f64 {
    1.0
}

fn default_payload_bytes() -> u32 {
    24
}

fn default_seed() -> u64 {
    42
}

fn default_signal_base() -> f64 {
    20.0
}

fn default_signal_amp() -> f64 {
    3.0
}

fn default_signal_period_s() -> f64 {
    120.0
}

fn default_noise_std() -> f64 {
    0.2
}

fn default_change_threshold() -> f64 {
    0.5
}

fn default_max_silence_s() -> u64 {
    30
}

/// Configuration for one simulated sensor node run.
///
/// Units: times in seconds, signal values in whatever unit the sensed
/// quantity uses (the simulator is agnostic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Total simulated duration.
    #[serde(default = "default_duration_s")]
    pub duration_s: u64,
    /// Discrete time step between ticks.
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,
    /// Bytes sent per transmission.
    #[serde(default = "default_payload_bytes")]
    pub payload_bytes: u32,
    /// Seed for the sensor-noise random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Ground-truth signal baseline.
    #[serde(default = "default_signal_base")]
    pub signal_base: f64,
    /// Ground-truth primary amplitude.
    #[serde(default = "default_signal_amp")]
    pub signal_amp: f64,
    /// Ground-truth primary period.
    #[serde(default = "default_signal_period_s")]
    pub signal_period_s: f64,
    /// Standard deviation of additive gaussian sensor noise.
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
    /// Magnitude change that triggers the adaptive policy.
    #[serde(default = "default_change_threshold")]
    pub change_threshold: f64,
    /// Keep-alive interval for the adaptive policy.
    #[serde(default = "default_max_silence_s")]
    pub max_silence_s: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            duration_s: default_duration_s(),
            dt_s: default_dt_s(),
            payload_bytes: default_payload_bytes(),
            seed: default_seed(),
            signal_base: default_signal_base(),
            signal_amp: default_signal_amp(),
            signal_period_s: default_signal_period_s(),
            noise_std: default_noise_std(),
            change_threshold: default_change_threshold(),
            max_silence_s: default_max_silence_s(),
        }
    }
}

impl NodeConfig {
    /// Validate structural invariants. Must pass before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.duration_s == 0 {
            return Err(SimError::NonPositiveDuration(self.duration_s));
        }
        if !(self.dt_s > 0.0) {
            return Err(SimError::NonPositiveTimeStep(self.dt_s));
        }
        if self.payload_bytes == 0 {
            return Err(SimError::EmptyPayload);
        }
        if self.noise_std < 0.0 {
            return Err(SimError::NegativeNoise(self.noise_std));
        }
        if !(self.signal_period_s > 0.0) {
            return Err(SimError::NonPositivePeriod(self.signal_period_s));
        }
        Ok(())
    }

    /// Number of loop iterations minus one; the loop runs `steps() + 1` ticks.
    pub fn steps(&self) -> u64 {
        (self.duration_s as f64 / self.dt_s) as u64
    }

    /// Apply a JSON override file. Only recognized fields replace the
    /// current values; unknown fields are ignored.
    pub fn apply_overrides(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(config_path = %path.display(), "loading config override");
        let raw = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let patch: NodeConfigPatch =
            serde_json::from_str(&raw).map_err(|source| SimError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        patch.apply(self);
        Ok(())
    }
}

/// Partial override of [`NodeConfig`], deserialized from an operator-supplied
/// JSON document. Absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfigPatch {
    pub duration_s: Option<u64>,
    pub dt_s: Option<f64>,
    pub payload_bytes: Option<u32>,
    pub seed: Option<u64>,
    pub signal_base: Option<f64>,
    pub signal_amp: Option<f64>,
    pub signal_period_s: Option<f64>,
    pub noise_std: Option<f64>,
    pub change_threshold: Option<f64>,
    pub max_silence_s: Option<u64>,
}

impl NodeConfigPatch {
    /// Overlay the present fields onto `config`.
    pub fn apply(&self, config: &mut NodeConfig) {
        if let Some(v) = self.duration_s {
            config.duration_s = v;
        }
        if let Some(v) = self.dt_s {
            config.dt_s = v;
        }
        if let Some(v) = self.payload_bytes {
            config.payload_bytes = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.signal_base {
            config.signal_base = v;
        }
        if let Some(v) = self.signal_amp {
            config.signal_amp = v;
        }
        if let Some(v) = self.signal_period_s {
            config.signal_period_s = v;
        }
        if let Some(v) = self.noise_std {
            config.noise_std = v;
        }
        if let Some(v) = self.change_threshold {
            config.change_threshold = v;
        }
        if let Some(v) = self.max_silence_s {
            config.max_silence_s = v;
        }
    }
}

fn default_power_sleep_mw() -> f64 {
    0.5
}

fn default_power_idle_awake_mw() -> f64 {
    15.0
}

fn default_power_cpu_mw() -> f64 {
    35.0
}

fn default_power_sense_mw() -> f64 {
    25.0
}

fn default_power_tx_mw() -> f64 {
    120.0
}

fn default_t_sense_s() -> f64 {
    0.010
}

fn default_t_cpu_s() -> f64 {
    0.004
}

fn default_bitrate_bps() -> f64 {
    250_000.0
}

fn default_tx_overhead_s() -> f64 {
    0.002
}

/// Energy model using power * time accounting.
///
/// Units: power draws in milliwatts, durations in seconds, so every energy
/// quantity comes out in millijoules (mW * s = mJ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyModel {
    #[serde(default = "default_power_sleep_mw")]
    pub power_sleep_mw: f64,
    #[serde(default = "default_power_idle_awake_mw")]
    pub power_idle_awake_mw: f64,
    #[serde(default = "default_power_cpu_mw")]
    pub power_cpu_mw: f64,
    #[serde(default = "default_power_sense_mw")]
    pub power_sense_mw: f64,
    #[serde(default = "default_power_tx_mw")]
    pub power_tx_mw: f64,
    /// Time one sensing action takes.
    #[serde(default = "default_t_sense_s")]
    pub t_sense_s: f64,
    /// Time one on-board processing burst takes.
    #[serde(default = "default_t_cpu_s")]
    pub t_cpu_s: f64,
    /// Radio bitrate.
    #[serde(default = "default_bitrate_bps")]
    pub bitrate_bps: f64,
    /// Fixed per-transmission radio overhead (startup, headers).
    #[serde(default = "default_tx_overhead_s")]
    pub tx_overhead_s: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            power_sleep_mw: default_power_sleep_mw(),
            power_idle_awake_mw: default_power_idle_awake_mw(),
            power_cpu_mw: default_power_cpu_mw(),
            power_sense_mw: default_power_sense_mw(),
            power_tx_mw: default_power_tx_mw(),
            t_sense_s: default_t_sense_s(),
            t_cpu_s: default_t_cpu_s(),
            bitrate_bps: default_bitrate_bps(),
            tx_overhead_s: default_tx_overhead_s(),
        }
    }
}

impl EnergyModel {
    /// Validate structural invariants: all draws and durations non-negative,
    /// bitrate strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("power_sleep_mw", self.power_sleep_mw),
            ("power_idle_awake_mw", self.power_idle_awake_mw),
            ("power_cpu_mw", self.power_cpu_mw),
            ("power_sense_mw", self.power_sense_mw),
            ("power_tx_mw", self.power_tx_mw),
        ] {
            if value < 0.0 {
                return Err(SimError::NegativePower { name, value });
            }
        }
        for (name, value) in [
            ("t_sense_s", self.t_sense_s),
            ("t_cpu_s", self.t_cpu_s),
            ("tx_overhead_s", self.tx_overhead_s),
        ] {
            if value < 0.0 {
                return Err(SimError::NegativeDuration { name, value });
            }
        }
        if !(self.bitrate_bps > 0.0) {
            return Err(SimError::NonPositiveBitrate(self.bitrate_bps));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        NodeConfig::default().validate().unwrap();
        EnergyModel::default().validate().unwrap();
    }

    #[test]
    fn zero_duration_is_rejected() {
        let cfg = NodeConfig {
            duration_s: 0,
            ..NodeConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimError::NonPositiveDuration(0))
        ));
    }

    #[test]
    fn non_positive_time_step_is_rejected() {
        let cfg = NodeConfig {
            dt_s: 0.0,
            ..NodeConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::NonPositiveTimeStep(_))));
    }

    #[test]
    fn negative_power_is_rejected() {
        let energy = EnergyModel {
            power_tx_mw: -1.0,
            ..EnergyModel::default()
        };
        assert!(matches!(
            energy.validate(),
            Err(SimError::NegativePower {
                name: "power_tx_mw",
                ..
            })
        ));
    }

    #[test]
    fn override_file_replaces_only_known_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"duration_s": 120, "noise_std": 0.0, "not_a_field": true}}"#
        )
        .unwrap();

        let mut cfg = NodeConfig::default();
        cfg.apply_overrides(file.path()).unwrap();
        assert_eq!(cfg.duration_s, 120);
        assert_eq!(cfg.noise_std, 0.0);
        assert_eq!(cfg.payload_bytes, NodeConfig::default().payload_bytes);
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let mut cfg = NodeConfig::default();
        assert!(matches!(
            cfg.apply_overrides("does/not/exist.json"),
            Err(SimError::ConfigRead { .. })
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = NodeConfig::default();
        let raw = serde_json::to_string(&cfg).unwrap();
        let back: NodeConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(cfg, back);
    }
}
