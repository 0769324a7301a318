use thiserror::Error;

// ---------------------------------------------------------------------------
// Setup-time errors
// ---------------------------------------------------------------------------

/// Errors surfaced when a rocket configuration is handed to the simulator.
///
/// Expected flight outcomes (crash, abort, propellant depletion) are not
/// errors; they surface through `FlightPhase` and the event stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rocket configuration contains no parts")]
    EmptyConfig,

    #[error("no stage contains an engine; vehicle cannot fly")]
    NoEngines,
}
