//! ---
//! nsim_section: "06-testing-qa"
//! nsim_subsection: "integration-tests"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Report export round-trip over a full simulation run."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use nodesim_engine::{simulate, DutyCyclingPolicy, EnergyModel, NodeConfig, Policy};
use nodesim_report::{save_charts, SimReport};

#[test]
fn report_round_trips_through_disk() {
    let cfg = NodeConfig {
        duration_s: 60,
        seed: 9,
        ..NodeConfig::default()
    };
    let energy = EnergyModel::default();
    let mut policy = DutyCyclingPolicy::new(10, 2, 5);
    let result = simulate(&mut policy, &cfg, &energy).unwrap();

    let report = SimReport::new(policy.name(), &cfg, &energy, &result);
    let dir = tempfile::tempdir().unwrap();
    let path = report.exporter().export(dir.path()).unwrap();

    let raw = std::fs::read_to_string(path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["policy"], "duty_w10s_a2s_s5s");
    assert_eq!(value["summary"]["duration_s"], 60);
    assert_eq!(
        value["summary"]["samples_taken"].as_u64().unwrap(),
        result.samples_taken
    );
    assert_eq!(
        value["summary"]["packets_sent"].as_u64().unwrap(),
        result.packets_sent
    );
    let breakdown = &value["summary"]["energy_breakdown_mj"];
    for key in ["sleep", "idle_awake", "sensing", "cpu", "tx"] {
        assert!(
            breakdown[key].as_f64().unwrap() >= 0.0,
            "category {key} missing or negative"
        );
    }
    // The config the report embeds is the one that ran.
    assert_eq!(value["config"]["seed"], 9);
    assert_eq!(value["config"]["duration_s"], 60);
}

#[test]
fn chart_step_never_fails_a_run() {
    let cfg = NodeConfig {
        duration_s: 30,
        ..NodeConfig::default()
    };
    let energy = EnergyModel::default();
    let mut policy = DutyCyclingPolicy::new(10, 2, 5);
    let result = simulate(&mut policy, &cfg, &energy).unwrap();

    let dir = tempfile::tempdir().unwrap();
    // Whether or not chart rendering is compiled in, this must not panic and
    // must report exactly the artifacts it produced.
    let paths = save_charts(&result, &dir.path().join("plots"), policy.name());
    for path in &paths {
        assert!(path.exists());
    }
}
