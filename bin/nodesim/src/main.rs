//! ---
//! nsim_section: "05-cli"
//! nsim_subsection: "binary"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Operator CLI running one simulation and exporting artifacts."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nodesim_engine::{
    simulate, AdaptiveThresholdPolicy, DutyCyclingPolicy, EnergyModel, FixedSamplingPolicy,
    NodeConfig, Policy,
};
use nodesim_logging as logging;
use nodesim_report::{save_charts, SimReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyKind {
    /// Always awake; sample and transmit every 5 s.
    Fixed,
    /// Wake 2 s out of every 10 s; sample every 5 s while awake.
    DutyCycling,
    /// Sample every 2 s; transmit on change or keep-alive.
    AdaptiveThreshold,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Energy-aware sensor node simulator", long_about = None)]
struct Cli {
    /// Which strategy/policy to simulate.
    #[arg(long, value_enum, default_value_t = PolicyKind::AdaptiveThreshold)]
    policy: PolicyKind,
    /// Simulation duration in seconds.
    #[arg(long, default_value_t = 600)]
    duration: u64,
    /// Output directory for reports and charts.
    #[arg(long, default_value = "results")]
    out: PathBuf,
    /// Random seed for the sensor-noise source.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Optional JSON config file; recognized fields override the flags.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn build_config(cli: &Cli) -> Result<NodeConfig> {
    let mut cfg = NodeConfig {
        duration_s: cli.duration,
        seed: cli.seed,
        ..NodeConfig::default()
    };
    if let Some(path) = &cli.config {
        cfg.apply_overrides(path)
            .with_context(|| format!("applying config override {}", path.display()))?;
    }
    Ok(cfg)
}

fn build_policy(kind: PolicyKind, cfg: &NodeConfig) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Fixed => Box::new(FixedSamplingPolicy::new(5)),
        PolicyKind::DutyCycling => Box::new(DutyCyclingPolicy::new(10, 2, 5)),
        PolicyKind::AdaptiveThreshold => Box::new(AdaptiveThresholdPolicy::from_config(2, cfg)),
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let cfg = build_config(&cli)?;
    let energy = EnergyModel::default();
    let mut policy = build_policy(cli.policy, &cfg);

    let result = simulate(policy.as_mut(), &cfg, &energy)?;

    let report = SimReport::new(policy.name(), &cfg, &energy, &result);
    let report_path = report
        .exporter()
        .export(&cli.out)
        .with_context(|| format!("writing report under {}", cli.out.display()))?;

    let plot_dir = cli.out.join("plots");
    let charts = save_charts(&result, &plot_dir, policy.name());

    println!("=== Energy-Aware Sensor Node Simulator ===");
    println!("Policy: {}", policy.name());
    println!("Duration: {}s", cfg.duration_s);
    println!("Samples taken: {}", result.samples_taken);
    println!("Packets sent: {}", result.packets_sent);
    println!("Data quality (MAE): {:.3} (lower is better)", result.mae);
    println!("Total energy: {:.1} mJ", result.energy_total_mj);
    println!("Energy breakdown (mJ):");
    for (name, value) in result.energy_breakdown_mj.categories() {
        println!("  - {name}: {value:.1}");
    }
    println!();
    println!("Saved report: {}", report_path.display());
    if charts.is_empty() {
        println!("Charts skipped (chart rendering unavailable).");
    } else {
        println!("Saved charts in: {}", plot_dir.display());
    }

    Ok(())
}
