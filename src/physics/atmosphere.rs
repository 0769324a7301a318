// ---------------------------------------------------------------------------
// Exponential atmosphere (sea level to the Kármán line)
// ---------------------------------------------------------------------------

/// Sea-level air density, kg/m^3.
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Density scale height of the exponential profile, m.
pub const SCALE_HEIGHT: f64 = 8_500.0;

/// Conventional space boundary, m.
pub const KARMAN_LINE: f64 = 100_000.0;

/// Air density at a given geometric altitude.
///
/// Single exponential decay layer: rho = rho_0 * exp(-h / 8500).
/// Clamps negative altitudes to sea level; returns exact zero above
/// the Kármán line.
pub fn air_density(altitude_m: f64) -> f64 {
    let h = altitude_m.max(0.0);
    if h > KARMAN_LINE {
        return 0.0;
    }
    SEA_LEVEL_DENSITY * (-h / SCALE_HEIGHT).exp()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
