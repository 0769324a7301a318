pub mod error;
pub mod io;
pub mod physics;
pub mod sim;
pub mod vehicle;

pub use error::ConfigError;
pub use sim::{
    Controls, EventKind, FlightEvent, FlightIntegrator, FlightPhase, FlightState, SimParams,
};
pub use vehicle::{Part, PartKind, RocketConfig, StageManager};
