//! ---
//! nsim_section: "01-core-engine"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Power * time energy accounting for node actions."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::config::EnergyModel;

impl EnergyModel {
    /// Energy spent asleep for `dt_s` seconds.
    pub fn e_sleep(&self, dt_s: f64) -> f64 {
        self.power_sleep_mw * dt_s
    }

    /// Energy spent awake but idle for `dt_s` seconds.
    pub fn e_idle_awake(&self, dt_s: f64) -> f64 {
        self.power_idle_awake_mw * dt_s
    }

    /// Energy of one sensing action. Fixed cost, independent of the tick step.
    pub fn e_sense(&self) -> f64 {
        self.power_sense_mw * self.t_sense_s
    }

    /// Energy of one on-board processing burst. Fixed cost.
    pub fn e_cpu(&self) -> f64 {
        self.power_cpu_mw * self.t_cpu_s
    }

    /// Energy of transmitting `payload_bytes` over the radio.
    ///
    /// Airtime is the fixed overhead plus payload bits over bitrate.
    pub fn e_tx(&self, payload_bytes: u32) -> f64 {
        let bits = f64::from(payload_bytes) * 8.0;
        let t_tx = self.tx_overhead_s + bits / self.bitrate_bps;
        self.power_tx_mw * t_tx
    }
}

/// Accumulated energy per category over one run, in millijoules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    pub sleep: f64,
    pub idle_awake: f64,
    pub sensing: f64,
    pub cpu: f64,
    pub tx: f64,
}

impl EnergyBreakdown {
    /// Exact sum of the five categories.
    pub fn total(&self) -> f64 {
        self.sleep + self.idle_awake + self.sensing + self.cpu + self.tx
    }

    /// Category name/value pairs in a stable order, for reports and charts.
    pub fn categories(&self) -> [(&'static str, f64); 5] {
        [
            ("sleep", self.sleep),
            ("idle_awake", self.idle_awake),
            ("sensing", self.sensing),
            ("cpu", self.cpu),
            ("tx", self.tx),
        ]
    }
}
