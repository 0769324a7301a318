use nalgebra::{Rotation3, Vector3};

use crate::sim::state::{Attitude, Controls, SimParams};

// ---------------------------------------------------------------------------
// Attitude integration from normalized control axes
// ---------------------------------------------------------------------------

/// Converts pilot pitch/yaw/roll input into a smoothed orientation and a
/// unit thrust-direction vector, with damping toward neutral.
#[derive(Debug, Clone)]
pub struct AttitudeIntegrator {
    orientation: Attitude,
    angular_velocity: Attitude,
    direction: Vector3<f64>,
}

impl Default for AttitudeIntegrator {
    fn default() -> Self {
        Self {
            orientation: Attitude::default(),
            angular_velocity: Attitude::default(),
            // Vertical on the pad: +Y is up.
            direction: Vector3::y(),
        }
    }
}

impl AttitudeIntegrator {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn orientation(&self) -> Attitude {
        self.orientation
    }

    pub fn angular_velocity(&self) -> Attitude {
        self.angular_velocity
    }

    /// Unit vector the engines thrust along.
    pub fn direction(&self) -> Vector3<f64> {
        self.direction
    }

    /// Advance the attitude by one tick.
    ///
    /// Each axis drives its angular rate toward `axis * sensitivity` with an
    /// exponential blend of `stabilization^(dt * 60)`, which makes the
    /// damping frame-rate independent. Pitch clamps to [-pi/2, pi/2];
    /// yaw and roll wrap to (-pi, pi].
    pub fn update(&mut self, dt: f64, controls: &Controls, params: &SimParams) {
        let blend = params.stabilization.powf(dt * 60.0);

        self.angular_velocity.pitch =
            step_rate(self.angular_velocity.pitch, controls.pitch, blend, params);
        self.angular_velocity.yaw =
            step_rate(self.angular_velocity.yaw, controls.yaw, blend, params);
        self.angular_velocity.roll =
            step_rate(self.angular_velocity.roll, controls.roll, blend, params);

        self.orientation.pitch = (self.orientation.pitch + self.angular_velocity.pitch * dt)
            .clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
        self.orientation.yaw = wrap_angle(self.orientation.yaw + self.angular_velocity.yaw * dt);
        self.orientation.roll = wrap_angle(self.orientation.roll + self.angular_velocity.roll * dt);

        self.direction = direction_from(&self.orientation);
    }
}

fn step_rate(rate: f64, axis: f64, blend: f64, params: &SimParams) -> f64 {
    let target = axis * params.control_sensitivity;
    let next = target + (rate - target) * blend;
    next.clamp(-params.max_angular_rate, params.max_angular_rate)
}

/// Wrap an angle into (-pi, pi].
fn wrap_angle(angle: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let wrapped = angle - two_pi * (angle / two_pi).round();
    if wrapped <= -std::f64::consts::PI {
        wrapped + two_pi
    } else {
        wrapped
    }
}

/// Rotate the +Y "up" vector by pitch (about X), then yaw (about Y), then
/// roll (about Z). The order is fixed for reproducibility. Renormalized to
/// guard against drift.
fn direction_from(orientation: &Attitude) -> Vector3<f64> {
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), orientation.roll)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), orientation.yaw)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), orientation.pitch);
    (rot * Vector3::y()).normalize()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn starts_pointing_up() {
        let att = AttitudeIntegrator::default();
        assert_relative_eq!(att.direction(), Vector3::y());
    }

    #[test]
    fn pitch_input_tilts_direction() {
        let mut att = AttitudeIntegrator::default();
        let params = SimParams::default();
        let controls = Controls::new(0.0, 1.0, 0.0, 0.0);
        for _ in 0..120 {
            att.update(DT, &controls, &params);
        }
        assert!(att.orientation().pitch > 0.0);
        assert!(att.direction().y < 1.0);
        assert_relative_eq!(att.direction().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn neutral_input_damps_rates_to_zero() {
        let mut att = AttitudeIntegrator::default();
        let params = SimParams::default();
        att.update(DT, &Controls::new(0.0, 1.0, -1.0, 0.5), &params);
        assert!(att.angular_velocity().pitch.abs() > 0.0);
        for _ in 0..600 {
            att.update(DT, &Controls::neutral(), &params);
        }
        assert!(att.angular_velocity().pitch.abs() < 1e-6);
        assert!(att.angular_velocity().yaw.abs() < 1e-6);
        assert!(att.angular_velocity().roll.abs() < 1e-6);
    }

    #[test]
    fn repeated_neutral_ticks_converge_never_diverge() {
        let mut att = AttitudeIntegrator::default();
        let params = SimParams::default();
        att.update(DT, &Controls::new(0.0, 0.8, 0.0, 0.0), &params);
        let mut prev = att.angular_velocity().pitch.abs();
        for _ in 0..100 {
            att.update(DT, &Controls::neutral(), &params);
            let cur = att.angular_velocity().pitch.abs();
            assert!(cur <= prev + 1e-12);
            prev = cur;
        }
    }

    #[test]
    fn pitch_clamps_to_half_pi() {
        let mut att = AttitudeIntegrator::default();
        let params = SimParams::default();
        let controls = Controls::new(0.0, 1.0, 0.0, 0.0);
        for _ in 0..20_000 {
            att.update(DT, &controls, &params);
        }
        assert!(att.orientation().pitch <= std::f64::consts::FRAC_PI_2 + 1e-12);
    }

    #[test]
    fn angular_rate_respects_clamp() {
        let mut att = AttitudeIntegrator::default();
        let params = SimParams::default();
        let controls = Controls::new(0.0, 1.0, 1.0, 1.0);
        for _ in 0..1_000 {
            att.update(DT, &controls, &params);
            assert!(att.angular_velocity().pitch.abs() <= params.max_angular_rate + 1e-12);
        }
    }

    #[test]
    fn wrap_keeps_angles_in_range() {
        assert_relative_eq!(wrap_angle(3.0 * std::f64::consts::PI), std::f64::consts::PI);
        assert!(wrap_angle(-std::f64::consts::PI) > 0.0);
        assert_relative_eq!(wrap_angle(0.3), 0.3);
    }

    #[test]
    fn damping_is_framerate_independent() {
        // Two small ticks decay an undriven rate the same as one large tick.
        let params = SimParams::default();
        let mut a = AttitudeIntegrator::default();
        let mut b = AttitudeIntegrator::default();
        let spin = Controls::new(0.0, 1.0, 0.0, 0.0);
        a.update(0.02, &spin, &params);
        b.update(0.02, &spin, &params);
        let start_a = a.angular_velocity().pitch;
        let start_b = b.angular_velocity().pitch;
        assert_relative_eq!(start_a, start_b, epsilon = 1e-12);

        a.update(0.01, &Controls::neutral(), &params);
        a.update(0.01, &Controls::neutral(), &params);
        b.update(0.02, &Controls::neutral(), &params);
        assert_relative_eq!(
            a.angular_velocity().pitch,
            b.angular_velocity().pitch,
            epsilon = 1e-9
        );
    }
}
