// ---------------------------------------------------------------------------
// Inverse-square gravity against a fixed-mass, fixed-radius body
// ---------------------------------------------------------------------------

/// Universal gravitational constant, m^3 kg^-1 s^-2.
pub const G: f64 = 6.674_30e-11;

/// Earth mass, kg.
pub const EARTH_MASS: f64 = 5.972e24;

/// Mean Earth radius, m.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Standard gravity used for propellant-flow estimates, m/s^2.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Gravitational acceleration magnitude at a given altitude (positive down).
///
/// g(h) = G * M / (R + h)^2. Negative altitudes clamp to the surface.
pub fn gravity_accel(altitude_m: f64) -> f64 {
    let r = EARTH_RADIUS + altitude_m.max(0.0);
    G * EARTH_MASS / (r * r)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_gravity() {
        // G * M / R^2 for the constants above.
        assert_relative_eq!(gravity_accel(0.0), 9.8199, epsilon = 1e-3);
    }

    #[test]
    fn fixed_altitude_samples() {
        let r = EARTH_RADIUS + 100_000.0;
        assert_relative_eq!(gravity_accel(100_000.0), G * EARTH_MASS / (r * r));
        let r = EARTH_RADIUS + 400_000.0;
        assert_relative_eq!(gravity_accel(400_000.0), G * EARTH_MASS / (r * r));
    }

    #[test]
    fn gravity_decreases_with_altitude() {
        assert!(gravity_accel(100_000.0) < gravity_accel(0.0));
        assert!(gravity_accel(400_000.0) < gravity_accel(100_000.0));
    }

    #[test]
    fn negative_altitude_clamps_to_surface() {
        assert_relative_eq!(gravity_accel(-1_000.0), gravity_accel(0.0));
    }
}
