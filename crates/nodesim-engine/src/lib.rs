//! ---
//! nsim_section: "01-core-engine"
//! nsim_subsection: "01-bootstrap"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Simulation engine module exports and shared types."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
//! Discrete-time simulator of energy and data-quality trade-offs for a
//! single battery-powered sensor node observing a periodic signal.
//!
//! Everything here is deterministic and single-threaded: a run seeds its own
//! noise source and owns all per-run state, so independent runs are safe to
//! execute concurrently as long as each gets its own policy instance.

pub mod config;
pub mod energy;
pub mod errors;
pub mod policy;
pub mod signal;
pub mod simulator;

pub use config::{EnergyModel, NodeConfig, NodeConfigPatch};
pub use energy::EnergyBreakdown;
pub use errors::{Result, SimError};
pub use policy::{
    AdaptiveThresholdPolicy, DutyCyclingPolicy, FixedSamplingPolicy, Policy, PolicyOutput,
};
pub use signal::ground_truth;
pub use simulator::{simulate, simulate_with_rng, SimResult};
