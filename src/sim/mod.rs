pub mod attitude;
pub mod event;
pub mod integrator;
pub mod state;

pub use attitude::AttitudeIntegrator;
pub use event::{EventKind, EventLog, FlightEvent};
pub use integrator::FlightIntegrator;
pub use state::{Attitude, Controls, FlightPhase, FlightState, SimParams};
