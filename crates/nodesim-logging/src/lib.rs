//! ---
//! nsim_section: "03-logging"
//! nsim_subsection: "module"
//! nsim_type: "source"
//! nsim_scope: "code"
//! nsim_description: "Tracing subscriber bootstrap for nodesim binaries."
//! nsim_version: "v0.1.0"
//! nsim_owner: "tbd"
//! ---
#![warn(missing_docs)]

//! Structured logging bootstrap shared by the nodesim binaries.
//!
//! The simulator is a short-lived CLI, so a single fmt layer on stdout is
//! enough. The filter honours `RUST_LOG` and defaults to `info`.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

/// Initialize a baseline tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer())
        .try_init();
}
