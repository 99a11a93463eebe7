pub mod config;

use bmca::{Bmca, DecisionCode, PortState, StandardComparator};
use serde::Serialize;
use thiserror::Error;
use tracing_log::AsTrace;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("could not forward log records: {0}")]
    Log(#[from] log::SetLoggerError),
    #[error("could not install the tracing subscriber: {0}")]
    Tracing(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install a global tracing subscriber writing to stderr. Records of the `log`
/// crate, which the `bmca` library uses, are forwarded to it.
pub fn setup_logger(level: log::LevelFilter) -> Result<(), LoggerError> {
    tracing_log::LogTracer::init_with_filter(level)?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.as_trace())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// The recommended state of a single port
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortReport {
    pub port: u16,
    pub state: PortState,
    pub code: Option<DecisionCode>,
}

impl std::fmt::Display for PortReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "port {}: {} ({})", self.port, self.state, code),
            None => write!(f, "port {}: {} (unchanged)", self.port, self.state),
        }
    }
}

/// Run one cycle of the best master clock algorithm on the configured
/// snapshot of the instance.
pub fn evaluate(config: &Config) -> Vec<PortReport> {
    let instance = config.instance_config();
    let snapshots = config.snapshots();

    tracing::info!(
        clock_identity = %instance.clock_identity,
        clock_class = instance.clock_quality.clock_class,
        ports = snapshots.len(),
        "Running best master clock algorithm"
    );

    let bmca = Bmca::new(instance.own_dataset(), StandardComparator);

    bmca.recommend(&snapshots)
        .map(|(port_identity, decision)| PortReport {
            port: port_identity.port_number,
            state: decision.state,
            code: decision.code,
        })
        .collect()
}
