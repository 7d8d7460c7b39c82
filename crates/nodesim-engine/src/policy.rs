//! ---
//! nsim_section: "02-decision-policies"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Wake/sample/transmit decision policies."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
use crate::config::NodeConfig;

/// Per-tick decision emitted by a [`Policy`].
///
/// `take_sample` and `transmit` are only honoured by the simulator when
/// `awake` is true; policies are expected to keep them consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyOutput {
    pub awake: bool,
    pub take_sample: bool,
    pub transmit: bool,
}

impl PolicyOutput {
    /// A sleeping node does nothing this tick.
    pub fn asleep() -> Self {
        Self {
            awake: false,
            take_sample: false,
            transmit: false,
        }
    }
}

/// Decision strategy for the sensor node.
///
/// `step` is called exactly once per tick in non-decreasing time order. It
/// must be a pure function of its arguments and the policy's own memory; in
/// particular it must not draw randomness. `reset` clears any memory so the
/// same instance can be reused across runs.
pub trait Policy {
    /// Stable identifier embedding the tunable parameters.
    fn name(&self) -> &str;

    /// Clear internal memory at the start of a run.
    fn reset(&mut self) {}

    /// Decide wake/sample/transmit for tick `t_s`, given the most recent
    /// measurement and the time of the most recent transmission this run.
    fn step(&mut self, t_s: u64, last_measurement: Option<f64>, last_tx_s: Option<u64>)
        -> PolicyOutput;
}

/// Always awake; samples and transmits together every `sample_every_s`
/// seconds, aligned to absolute time.
#[derive(Debug, Clone)]
pub struct FixedSamplingPolicy {
    sample_every_s: u64,
    name: String,
}

impl FixedSamplingPolicy {
    pub fn new(sample_every_s: u64) -> Self {
        let sample_every_s = sample_every_s.max(1);
        Self {
            sample_every_s,
            name: format!("fixed_{sample_every_s}s"),
        }
    }
}

impl Policy for FixedSamplingPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, t_s: u64, _last_measurement: Option<f64>, _last_tx_s: Option<u64>)
        -> PolicyOutput {
        let due = t_s % self.sample_every_s == 0;
        PolicyOutput {
            awake: true,
            take_sample: due,
            transmit: due,
        }
    }
}

/// Sleeps most of the time, waking for `awake_window_s` out of every
/// `wake_every_s` seconds. While awake it samples and transmits on the same
/// absolute-time alignment as [`FixedSamplingPolicy`]: alignment is to
/// global time, not to time since waking.
#[derive(Debug, Clone)]
pub struct DutyCyclingPolicy {
    wake_every_s: u64,
    awake_window_s: u64,
    sample_every_s: u64,
    name: String,
}

impl DutyCyclingPolicy {
    pub fn new(wake_every_s: u64, awake_window_s: u64, sample_every_s: u64) -> Self {
        let wake_every_s = wake_every_s.max(1);
        let awake_window_s = awake_window_s.max(1);
        let sample_every_s = sample_every_s.max(1);
        Self {
            wake_every_s,
            awake_window_s,
            sample_every_s,
            name: format!("duty_w{wake_every_s}s_a{awake_window_s}s_s{sample_every_s}s"),
        }
    }
}

impl Policy for DutyCyclingPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, t_s: u64, _last_measurement: Option<f64>, _last_tx_s: Option<u64>)
        -> PolicyOutput {
        let phase = t_s % self.wake_every_s;
        let awake = phase < self.awake_window_s;
        if !awake {
            return PolicyOutput::asleep();
        }
        let due = t_s % self.sample_every_s == 0;
        PolicyOutput {
            awake: true,
            take_sample: due,
            transmit: due,
        }
    }
}

/// Always awake; samples every `base_every_s` seconds but transmits only when
/// the signal has moved by at least `threshold` since the last transmitted
/// value, with a keep-alive after `max_silence_s` seconds of radio silence.
///
/// The first sampling tick of a run always transmits: there is no prior
/// transmission to compare against. Transmit decisions are only made on
/// sampling ticks.
#[derive(Debug, Clone)]
pub struct AdaptiveThresholdPolicy {
    base_every_s: u64,
    threshold: f64,
    max_silence_s: u64,
    name: String,
    last_tx_value: Option<f64>,
}

impl AdaptiveThresholdPolicy {
    pub fn new(base_every_s: u64, threshold: f64, max_silence_s: u64) -> Self {
        let base_every_s = base_every_s.max(1);
        let max_silence_s = max_silence_s.max(1);
        Self {
            base_every_s,
            threshold,
            max_silence_s,
            name: format!("adaptive_b{base_every_s}s_th{threshold}_ms{max_silence_s}s"),
            last_tx_value: None,
        }
    }

    /// Build from the node configuration's adaptive parameters.
    pub fn from_config(base_every_s: u64, cfg: &NodeConfig) -> Self {
        Self::new(base_every_s, cfg.change_threshold, cfg.max_silence_s)
    }
}

impl Policy for AdaptiveThresholdPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.last_tx_value = None;
    }

    fn step(&mut self, t_s: u64, last_measurement: Option<f64>, last_tx_s: Option<u64>)
        -> PolicyOutput {
        let take_sample = t_s % self.base_every_s == 0;
        let mut transmit = false;

        if take_sample {
            transmit = match last_tx_s {
                None => true,
                Some(tx_s) => {
                    let changed = match (last_measurement, self.last_tx_value) {
                        (Some(m), Some(prev)) => (m - prev).abs() >= self.threshold,
                        (Some(m), None) => {
                            // The initial transmit fired before any measurement
                            // was visible; the first one seen is the baseline.
                            self.last_tx_value = Some(m);
                            false
                        }
                        (None, _) => false,
                    };
                    changed || t_s.saturating_sub(tx_s) >= self.max_silence_s
                }
            };
            if transmit {
                self.last_tx_value = last_measurement;
            }
        }

        PolicyOutput {
            awake: true,
            take_sample,
            transmit,
        }
    }
}
