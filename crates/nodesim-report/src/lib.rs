//! ---
//! nsim_section: "04-reporting-visualisation"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Structured report export for simulation runs."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
//! Collaborators that consume a finished [`SimResult`]: a JSON report writer
//! and (behind the `charts` feature) best-effort PNG chart rendering.

pub mod charts;

use std::{fs, path::Path, path::PathBuf};

use chrono::{DateTime, Utc};
use nodesim_engine::{EnergyBreakdown, EnergyModel, NodeConfig, SimResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub use charts::save_charts;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Aggregate numbers an operator compares across policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub duration_s: u64,
    pub samples_taken: u64,
    pub packets_sent: u64,
    pub mae: f64,
    pub energy_total_mj: f64,
    pub energy_breakdown_mj: EnergyBreakdown,
}

/// Full report envelope for one simulation run: which policy ran, with what
/// configuration, and what came out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub generated_at: DateTime<Utc>,
    pub policy: String,
    pub config: NodeConfig,
    pub energy_model: EnergyModel,
    pub summary: ReportSummary,
}

impl SimReport {
    pub fn new(
        policy: impl Into<String>,
        config: &NodeConfig,
        energy_model: &EnergyModel,
        result: &SimResult,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            policy: policy.into(),
            config: config.clone(),
            energy_model: energy_model.clone(),
            summary: ReportSummary {
                duration_s: config.duration_s,
                samples_taken: result.samples_taken,
                packets_sent: result.packets_sent,
                mae: result.mae,
                energy_total_mj: result.energy_total_mj,
                energy_breakdown_mj: result.energy_breakdown_mj,
            },
        }
    }

    pub fn exporter(&self) -> ReportExporter<'_> {
        ReportExporter::new(self)
    }
}

#[derive(Debug)]
pub struct ReportExporter<'a> {
    report: &'a SimReport,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a SimReport) -> Self {
        Self { report }
    }

    /// Write `report.json` under `out_dir`, creating the directory if needed.
    pub fn export(&self, out_dir: &Path) -> Result<PathBuf> {
        if !out_dir.exists() {
            fs::create_dir_all(out_dir)?;
        }
        let path = out_dir.join("report.json");
        let serialized = serde_json::to_string_pretty(self.report)?;
        fs::write(&path, serialized)?;
        info!(report = %path.display(), "report exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodesim_engine::{simulate, FixedSamplingPolicy, Policy};

    fn sample_report() -> SimReport {
        let cfg = NodeConfig {
            duration_s: 20,
            seed: 7,
            ..NodeConfig::default()
        };
        let energy = EnergyModel::default();
        let mut policy = FixedSamplingPolicy::new(5);
        let result = simulate(&mut policy, &cfg, &energy).unwrap();
        SimReport::new(policy.name(), &cfg, &energy, &result)
    }

    #[test]
    fn summary_mirrors_the_result() {
        let report = sample_report();
        assert_eq!(report.policy, "fixed_5s");
        assert_eq!(report.summary.duration_s, 20);
        assert_eq!(report.summary.samples_taken, 5);
        assert_eq!(report.summary.packets_sent, 5);
        assert_eq!(
            report.summary.energy_total_mj,
            report.summary.energy_breakdown_mj.total()
        );
    }

    #[test]
    fn export_writes_parseable_json() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = report.exporter().export(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "report.json");

        let raw = fs::read_to_string(&path).unwrap();
        let back: SimReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.policy, report.policy);
        assert_eq!(back.summary.packets_sent, report.summary.packets_sent);
    }

    #[test]
    fn export_surfaces_unwritable_locations() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        // A file where the directory should be.
        let blocker = dir.path().join("out");
        fs::write(&blocker, b"x").unwrap();
        assert!(matches!(
            report.exporter().export(&blocker),
            Err(ReportError::Io(_))
        ));
    }
}
