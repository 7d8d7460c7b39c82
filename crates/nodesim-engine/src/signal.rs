//! ---
//! nsim_section: "01-core-engine"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Synthetic ground-truth signal generation."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use std::f64::consts::PI;

use crate::config::NodeConfig;

/// Ground-truth value of the observed physical signal at `t_s`.
///
/// A smooth periodic signal: primary sinusoid plus a smaller slow harmonic
/// (amplitude 0.25, frequency 0.33x) for mild drift-like variation.
pub fn ground_truth(t_s: u64, cfg: &NodeConfig) -> f64 {
    let w = 2.0 * PI / cfg.signal_period_s.max(1.0);
    let t = t_s as f64;
    cfg.signal_base + cfg.signal_amp * (w * t).sin() + 0.25 * (w * 0.33 * t).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_base() {
        let cfg = NodeConfig::default();
        assert_eq!(ground_truth(0, &cfg), cfg.signal_base);
    }

    #[test]
    fn stays_within_envelope() {
        let cfg = NodeConfig::default();
        let bound = cfg.signal_amp + 0.25;
        for t in 0..=3600 {
            let v = ground_truth(t, &cfg);
            assert!(
                (v - cfg.signal_base).abs() <= bound,
                "signal escaped envelope at t={t}: {v}"
            );
        }
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let cfg = NodeConfig::default();
        assert_eq!(ground_truth(37, &cfg), ground_truth(37, &cfg));
    }

    #[test]
    fn sub_second_periods_are_clamped() {
        let cfg = NodeConfig {
            signal_period_s: 0.25,
            ..NodeConfig::default()
        };
        // Clamp to 1 s keeps the angular frequency finite and modest.
        assert!(ground_truth(1, &cfg).is_finite());
    }
}
