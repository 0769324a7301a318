use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flight phase state machine
// ---------------------------------------------------------------------------

/// Flight phases. Transitions are one-directional;
/// `PreLaunch -> Launching -> Flying` is strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    PreLaunch,
    /// Countdown running; mission time climbs from negative toward zero.
    Launching,
    Flying,
    /// Propellant exhausted; ballistic flight under gravity and drag until
    /// impact or orbit.
    Coasting,
    /// Stable continuation state; the simulation keeps ticking.
    Orbit,
    Crashed,
    Aborted,
}

impl FlightPhase {
    /// Terminal phases never change again within one attempt.
    pub fn is_terminal(self) -> bool {
        matches!(self, FlightPhase::Crashed | FlightPhase::Aborted)
    }

    /// Phases in which translational physics is integrated.
    pub fn is_airborne(self) -> bool {
        matches!(
            self,
            FlightPhase::Flying | FlightPhase::Coasting | FlightPhase::Orbit
        )
    }
}

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Euler angles, radians. Also reused for angular rates (rad/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

// ---------------------------------------------------------------------------
// Flight state snapshot
// ---------------------------------------------------------------------------

/// The single mutable simulation record, owned by the flight integrator.
/// External collaborators receive copies by value, never references.
///
/// Internal unit for altitude is meters; display conversion (m -> km) is
/// the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightState {
    /// Altitude above the launch surface, m.
    pub altitude: f64,
    /// Signed vertical velocity, m/s.
    pub velocity: f64,
    /// Vertical acceleration, m/s^2.
    pub acceleration: f64,
    pub orientation: Attitude,
    /// Angular rates, rad/s.
    pub angular_velocity: Attitude,
    /// Lateral displacement from the pad, m (x, z).
    pub lateral: Vector2<f64>,
    /// Propellant remaining across all stages still attached, kg.
    pub fuel: f64,
    /// Applied throttle fraction, 0..1.
    pub throttle: f64,
    /// Mission clock, s. Negative during countdown.
    pub mission_time: f64,
    pub phase: FlightPhase,
    /// Index of the stage currently firing.
    pub current_stage: usize,
    pub stage_count: usize,
}

impl Default for FlightState {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            orientation: Attitude::default(),
            angular_velocity: Attitude::default(),
            lateral: Vector2::zeros(),
            fuel: 0.0,
            throttle: 0.0,
            mission_time: 0.0,
            phase: FlightPhase::PreLaunch,
            current_stage: 0,
            stage_count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Pilot controls, sampled once per tick
// ---------------------------------------------------------------------------

/// Per-tick pilot input. Axes are normalized to [-1, 1]; throttle is an
/// absolute percentage in [0, 100], rate-limited upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    pub throttle_percent: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Controls {
    /// Build a control sample with all inputs clamped to their valid ranges.
    pub fn new(throttle_percent: f64, pitch: f64, yaw: f64, roll: f64) -> Self {
        Self {
            throttle_percent: throttle_percent.clamp(0.0, 100.0),
            pitch: pitch.clamp(-1.0, 1.0),
            yaw: yaw.clamp(-1.0, 1.0),
            roll: roll.clamp(-1.0, 1.0),
        }
    }

    /// Full throttle, no steering input.
    pub fn full_throttle() -> Self {
        Self::new(100.0, 0.0, 0.0, 0.0)
    }

    /// Zero throttle, no steering input.
    pub fn neutral() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tunable simulation parameters
// ---------------------------------------------------------------------------

/// Simulation constants that are tunable rather than load-bearing physical
/// truths. Defaults reproduce the reference behavior.
#[derive(Debug, Clone)]
pub struct SimParams {
    pub drag_coefficient: f64,
    /// Aerodynamic reference area, m^2.
    pub cross_section_area: f64,
    /// Scales control axis input into a target angular rate, rad/s.
    pub control_sensitivity: f64,
    /// Per-frame exponential damping base for angular rates (at 60 Hz).
    pub stabilization: f64,
    /// Angular rate clamp, rad/s.
    pub max_angular_rate: f64,
    /// Per-tick lateral drift damping factor.
    pub lateral_damping: f64,
    /// Countdown length, s.
    pub countdown: f64,
    /// Substituted when a caller supplies a non-positive or NaN tick, s.
    pub nominal_dt: f64,
    /// Space boundary for the one-shot "space reached" event, m.
    pub space_altitude: f64,
    /// Orbit heuristic: minimum altitude, m.
    pub orbit_altitude: f64,
    /// Orbit heuristic: minimum speed, m/s.
    pub orbit_velocity: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            drag_coefficient: 0.2,
            cross_section_area: 1.0,
            control_sensitivity: 0.5,
            stabilization: 0.9,
            max_angular_rate: 0.1,
            lateral_damping: 0.995,
            countdown: 5.0,
            nominal_dt: 1.0 / 60.0,
            space_altitude: 100_000.0,
            orbit_altitude: 200_000.0,
            orbit_velocity: 7_800.0,
        }
    }
}
