use log::{info, warn};
use nalgebra::Vector2;

use crate::error::ConfigError;
use crate::physics::{drag, gravity};
use crate::sim::attitude::AttitudeIntegrator;
use crate::sim::event::{EventKind, EventLog, FlightEvent};
use crate::sim::state::{Controls, FlightPhase, FlightState, SimParams};
use crate::vehicle::part::RocketConfig;
use crate::vehicle::stage::StageManager;

/// Floor applied to total mass before any division.
const MASS_EPSILON: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Flight integrator: per-tick force composition + phase state machine
// ---------------------------------------------------------------------------

/// Drives one flight attempt. Owns the flight state exclusively; callers
/// receive snapshots by value and a list of discrete events per tick.
#[derive(Debug, Clone)]
pub struct FlightIntegrator {
    params: SimParams,
    state: FlightState,
    stages: Option<StageManager>,
    attitude: AttitudeIntegrator,
    reached_space: bool,
    fuel_exhausted: bool,
    log: EventLog,
}

impl Default for FlightIntegrator {
    fn default() -> Self {
        Self::new(SimParams::default())
    }
}

impl FlightIntegrator {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            state: FlightState::default(),
            stages: None,
            attitude: AttitudeIntegrator::default(),
            reached_space: false,
            fuel_exhausted: false,
            log: EventLog::default(),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> FlightState {
        self.state.clone()
    }

    /// Bounded event log for the current attempt, oldest first.
    pub fn events(&self) -> Vec<FlightEvent> {
        self.log.to_vec()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Clear all per-attempt state; a new `setup_simulation` is required
    /// before the next flight.
    pub fn reset(&mut self) {
        self.state = FlightState::default();
        self.stages = None;
        self.attitude.reset();
        self.reached_space = false;
        self.fuel_exhausted = false;
        self.log.clear();
    }

    /// Reset and derive stages from a rocket configuration.
    ///
    /// Fails fast if the configuration yields no stage with an engine;
    /// no tick will ever run for an ungovernable vehicle. Initial fuel is
    /// seeded from the builder-supplied totals, throttle starts at 100%.
    pub fn setup_simulation(&mut self, config: &RocketConfig) -> Result<(), ConfigError> {
        self.reset();
        let stages = StageManager::build(&config.parts)?;
        self.state.stage_count = stages.len();
        self.state.fuel = config.stats.total_fuel_kg;
        self.state.throttle = 1.0;
        info!(
            "simulation ready: \"{}\", {} stage(s), {:.0} kg propellant",
            config.name,
            stages.len(),
            config.stats.total_fuel_kg
        );
        self.stages = Some(stages);
        Ok(())
    }

    /// Start the countdown. Mission time runs from -countdown toward zero;
    /// the phase flips to `Flying` when it crosses zero.
    pub fn launch(&mut self) {
        if self.state.phase == FlightPhase::PreLaunch && self.stages.is_some() {
            self.state.phase = FlightPhase::Launching;
            self.state.mission_time = -self.params.countdown;
            info!("countdown started: T-{:.0}s", self.params.countdown);
        }
    }

    /// Pilot-initiated abort, handled synchronously.
    ///
    /// On the pad or during countdown the attempt ends quietly (`Aborted`);
    /// in the air it destroys the vehicle (`Crashed`).
    pub fn abort(&mut self) -> Option<FlightEvent> {
        let event = match self.state.phase {
            FlightPhase::PreLaunch | FlightPhase::Launching => {
                self.state.phase = FlightPhase::Aborted;
                info!("launch aborted");
                Some(self.event(EventKind::Abort))
            }
            FlightPhase::Flying | FlightPhase::Coasting => {
                self.state.phase = FlightPhase::Crashed;
                self.state.throttle = 0.0;
                warn!("in-flight abort at {:.0} m", self.state.altitude);
                Some(self.event(EventKind::Crash))
            }
            _ => None,
        };
        if let Some(e) = event {
            self.log.push(e);
        }
        event
    }

    /// Set engine power, percent of rated thrust (clamped to 0-100).
    pub fn set_throttle(&mut self, percent: f64) {
        self.state.throttle = percent.clamp(0.0, 100.0) / 100.0;
    }

    /// Advance the simulation by one tick.
    ///
    /// Re-entrant and bounded: no loops over anything but the fixed stage
    /// list, no blocking. A non-positive or NaN `dt` is replaced by the
    /// nominal tick rather than propagated.
    pub fn tick(&mut self, dt: f64, controls: &Controls) -> (FlightState, Vec<FlightEvent>) {
        let dt = self.guard_dt(dt);
        let mut events = Vec::new();

        match self.state.phase {
            FlightPhase::Launching => {
                self.state.mission_time += dt;
                if self.state.mission_time >= 0.0 {
                    self.state.phase = FlightPhase::Flying;
                    info!("liftoff");
                }
            }
            phase if phase.is_airborne() => {
                self.step_physics(dt, controls, &mut events);
                self.state.mission_time += dt;
            }
            // PreLaunch and the terminal phases are inert.
            _ => {}
        }

        for event in &events {
            self.log.push(*event);
        }
        (self.state.clone(), events)
    }

    // -----------------------------------------------------------------------
    // Per-tick physics
    // -----------------------------------------------------------------------

    fn step_physics(&mut self, dt: f64, controls: &Controls, events: &mut Vec<FlightEvent>) {
        // 1. Orientation from control input; thrust direction follows.
        self.attitude.update(dt, controls, &self.params);
        self.state.orientation = self.attitude.orientation();
        self.state.angular_velocity = self.attitude.angular_velocity();

        // 2. Propellant state and effective thrust (powered flight only).
        let thrust = if self.state.phase == FlightPhase::Flying {
            self.state.throttle = controls.throttle_percent / 100.0;
            self.resolve_thrust(dt, events)
        } else {
            0.0
        };

        // 3. Force composition.
        let total_mass = self
            .stages
            .as_ref()
            .map(StageManager::total_mass)
            .unwrap_or(0.0)
            .max(MASS_EPSILON);
        let g = gravity::gravity_accel(self.state.altitude);
        let drag_n = drag::drag_at_altitude(
            self.state.velocity,
            self.state.altitude,
            self.params.drag_coefficient,
            self.params.cross_section_area,
        );
        let thrust_vec = thrust * self.attitude.direction();

        // 4. Vertical integration. Drag opposes the sign of velocity.
        let drag_signed = if self.state.velocity >= 0.0 { drag_n } else { -drag_n };
        self.state.acceleration = (thrust_vec.y - drag_signed) / total_mass - g;
        self.state.velocity += self.state.acceleration * dt;
        self.state.altitude += self.state.velocity * dt;

        // 5. Lateral drift from horizontal thrust, damped every tick.
        let lat_accel = Vector2::new(thrust_vec.x, thrust_vec.z) / total_mass;
        self.state.lateral += lat_accel * (0.5 * dt * dt);
        self.state.lateral *= self.params.lateral_damping;

        // 6. Bookkeeping visible to callers.
        if let Some(stages) = &self.stages {
            self.state.fuel = stages.remaining_fuel();
            self.state.current_stage = stages.current_index();
        }

        // 7. Ground impact.
        if self.state.altitude < 0.0 {
            self.state.altitude = 0.0;
            self.state.velocity = 0.0;
            self.state.acceleration = 0.0;
            self.state.throttle = 0.0;
            self.state.phase = FlightPhase::Crashed;
            warn!("ground impact at T+{:.1}s", self.state.mission_time);
            events.push(self.event(EventKind::Crash));
            return;
        }

        // 8. Space boundary, once per attempt.
        if !self.reached_space && self.state.altitude >= self.params.space_altitude {
            self.reached_space = true;
            info!("space reached at T+{:.1}s", self.state.mission_time);
            events.push(self.event(EventKind::SpaceReached));
        }

        // 9. Orbit heuristic, once per attempt.
        if self.state.phase != FlightPhase::Orbit
            && self.state.altitude > self.params.orbit_altitude
            && self.state.velocity.abs() > self.params.orbit_velocity
        {
            self.state.phase = FlightPhase::Orbit;
            info!("orbit achieved at T+{:.1}s", self.state.mission_time);
            events.push(self.event(EventKind::OrbitAchieved));
        }
    }

    /// Resolve the active stage's propellant and return effective thrust (N).
    ///
    /// A dry stage triggers a jettison attempt; when the stack is spent the
    /// vehicle enters unpowered coast with throttle frozen at zero. A tick
    /// that would overdraw the tank gets partial thrust for the propellant
    /// actually available.
    fn resolve_thrust(&mut self, dt: f64, events: &mut Vec<FlightEvent>) -> f64 {
        let Some(stages) = self.stages.as_mut() else {
            self.enter_coast(events);
            return 0.0;
        };

        let depleted = stages
            .current()
            .map_or(true, |s| s.fuel_mass <= 0.0)
            || stages.remaining_fuel() <= 0.0;

        if depleted {
            if stages.jettison() {
                let stage = stages.current_index();
                events.push(self.event(EventKind::StageSeparation { stage }));
            } else {
                self.enter_coast(events);
            }
            // Separation and depletion both cost this tick's burn.
            return 0.0;
        }

        let (rate, remaining, rated_thrust) = {
            let s = stages.current().expect("depleted check guarantees a stage");
            (s.fuel_consumption_rate, s.fuel_mass, s.thrust)
        };

        let fuel_used = rate * self.state.throttle * dt;
        if fuel_used <= 0.0 {
            0.0
        } else if fuel_used > remaining {
            // Partial-tick thrust for the last drops in the tank.
            stages.burn_fuel(remaining);
            rated_thrust * (remaining / fuel_used)
        } else {
            stages.burn_fuel(fuel_used);
            rated_thrust * self.state.throttle
        }
    }

    fn enter_coast(&mut self, events: &mut Vec<FlightEvent>) {
        self.state.throttle = 0.0;
        if !self.fuel_exhausted {
            self.fuel_exhausted = true;
            info!("propellant exhausted; unpowered coast");
            events.push(self.event(EventKind::FuelExhausted));
        }
        if self.state.phase == FlightPhase::Flying {
            self.state.phase = FlightPhase::Coasting;
        }
    }

    fn event(&self, kind: EventKind) -> FlightEvent {
        FlightEvent {
            kind,
            mission_time: self.state.mission_time,
            altitude: self.state.altitude,
        }
    }

    fn guard_dt(&self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            warn!("invalid tick length {dt}; substituting nominal {}", self.params.nominal_dt);
            self.params.nominal_dt
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut_for_test(&mut self) -> &mut FlightState {
        &mut self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
