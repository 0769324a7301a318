use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Part templates (immutable once a flight attempt begins)
// ---------------------------------------------------------------------------

/// Closed set of part roles, matched exhaustively when building stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Engine,
    FuelTank,
    StageSeparator,
    Command,
    Structural,
}

/// One part descriptor as placed by the builder, top to bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub id: String,
    pub kind: PartKind,
    /// Dry mass, kg.
    pub mass_kg: f64,
    /// Propellant carried, kg (tanks only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_kg: Option<f64>,
    /// Rated thrust, kN (engines only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrust_kn: Option<f64>,
}

impl Part {
    pub fn engine(id: impl Into<String>, mass_kg: f64, thrust_kn: f64) -> Self {
        Self {
            id: id.into(),
            kind: PartKind::Engine,
            mass_kg,
            fuel_kg: None,
            thrust_kn: Some(thrust_kn),
        }
    }

    pub fn fuel_tank(id: impl Into<String>, mass_kg: f64, fuel_kg: f64) -> Self {
        Self {
            id: id.into(),
            kind: PartKind::FuelTank,
            mass_kg,
            fuel_kg: Some(fuel_kg),
            thrust_kn: None,
        }
    }

    pub fn separator(id: impl Into<String>, mass_kg: f64) -> Self {
        Self {
            id: id.into(),
            kind: PartKind::StageSeparator,
            mass_kg,
            fuel_kg: None,
            thrust_kn: None,
        }
    }

    pub fn command(id: impl Into<String>, mass_kg: f64) -> Self {
        Self {
            id: id.into(),
            kind: PartKind::Command,
            mass_kg,
            fuel_kg: None,
            thrust_kn: None,
        }
    }

    pub fn structural(id: impl Into<String>, mass_kg: f64) -> Self {
        Self {
            id: id.into(),
            kind: PartKind::Structural,
            mass_kg,
            fuel_kg: None,
            thrust_kn: None,
        }
    }

    /// Rated thrust in newtons (zero for non-engines).
    pub fn thrust_n(&self) -> f64 {
        self.thrust_kn.unwrap_or(0.0) * 1_000.0
    }

    /// Propellant in this part (zero for non-tanks).
    pub fn fuel(&self) -> f64 {
        self.fuel_kg.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// Rocket configuration as delivered by the external builder
// ---------------------------------------------------------------------------

/// Aggregate vehicle statistics precomputed by the builder.
/// The simulator trusts these for initial fuel/thrust seeding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RocketStats {
    pub total_mass_kg: f64,
    pub total_fuel_kg: f64,
    pub thrust_kn: f64,
}

/// Ordered part list plus aggregate stats. Immutable for a flight attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketConfig {
    pub name: String,
    pub parts: Vec<Part>,
    pub stats: RocketStats,
}

impl RocketConfig {
    /// Assemble a configuration, filling in the aggregate stats from parts.
    pub fn new(name: impl Into<String>, parts: Vec<Part>) -> Self {
        let stats = Self::compute_stats(&parts);
        Self { name: name.into(), parts, stats }
    }

    /// Aggregate totals the way the builder computes them: dry mass plus
    /// fuel for total mass, summed tank fuel, summed engine thrust.
    pub fn compute_stats(parts: &[Part]) -> RocketStats {
        let mut stats = RocketStats::default();
        for part in parts {
            stats.total_mass_kg += part.mass_kg + part.fuel();
            stats.total_fuel_kg += part.fuel();
            stats.thrust_kn += part.thrust_kn.unwrap_or(0.0);
        }
        stats
    }
}
