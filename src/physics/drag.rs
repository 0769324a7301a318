use crate::physics::atmosphere;

// ---------------------------------------------------------------------------
// Quadratic aerodynamic drag
// ---------------------------------------------------------------------------

/// Drag force magnitude: 0.5 * rho * v^2 * Cd * A.
///
/// Always non-negative; callers apply it opposing the sign of velocity.
pub fn drag_force(velocity: f64, air_density: f64, cd: f64, area: f64) -> f64 {
    0.5 * air_density * velocity * velocity * cd * area
}

/// Drag force at a given altitude, using the exponential atmosphere.
pub fn drag_at_altitude(velocity: f64, altitude: f64, cd: f64, area: f64) -> f64 {
    drag_force(velocity, atmosphere::air_density(altitude), cd, area)
}
