use crate::sim::state::{FlightPhase, FlightState};

// ---------------------------------------------------------------------------
// Flight summary statistics
// ---------------------------------------------------------------------------

/// Summary statistics computed from a sampled flight history.
#[derive(Debug, Clone)]
pub struct FlightSummary {
    pub apogee_m: f64,
    pub apogee_time: f64,
    pub max_speed: f64,
    pub max_accel: f64,
    pub flight_time: f64,
    pub final_phase: FlightPhase,
}

impl FlightSummary {
    /// Compute a summary from per-tick state snapshots (oldest first).
    /// Returns None for an empty history.
    pub fn from_history(history: &[FlightState]) -> Option<Self> {
        let last = history.last()?;

        let mut apogee_m = f64::MIN;
        let mut apogee_time = 0.0;
        let mut max_speed = 0.0_f64;
        let mut max_accel = 0.0_f64;
        for s in history {
            if s.altitude > apogee_m {
                apogee_m = s.altitude;
                apogee_time = s.mission_time;
            }
            max_speed = max_speed.max(s.velocity.abs());
            max_accel = max_accel.max(s.acceleration.abs());
        }

        Some(Self {
            apogee_m,
            apogee_time,
            max_speed,
            max_accel,
            flight_time: last.mission_time,
            final_phase: last.phase,
        })
    }
}
