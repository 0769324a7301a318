use log::{debug, info};

use crate::error::ConfigError;
use crate::physics::gravity::STANDARD_GRAVITY;
use crate::vehicle::part::{Part, PartKind};

// ---------------------------------------------------------------------------
// Stage: contiguous group of parts that fires and is discarded as a whole
// ---------------------------------------------------------------------------

/// Assumed specific-impulse factor for the propellant-flow estimate.
/// A deliberate simplification, tunable rather than physically derived:
/// flow = thrust / (ISP_ESTIMATE * g0).
pub const ISP_ESTIMATE: f64 = 3_000.0;

/// Derived aggregate for one propulsion stage.
///
/// Holds indices back into the immutable part template list plus numeric
/// aggregates; templates themselves are never mutated during flight.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    /// Indices of engine parts in the source configuration.
    pub engines: Vec<usize>,
    /// Indices of fuel tank parts in the source configuration.
    pub tanks: Vec<usize>,
    /// Structure + engines + empty tanks, kg.
    pub dry_mass: f64,
    /// Remaining propellant, kg. Decremented during flight.
    pub fuel_mass: f64,
    /// Combined rated thrust, N.
    pub thrust: f64,
    /// Propellant flow at full throttle, kg/s.
    pub fuel_consumption_rate: f64,
}

impl Stage {
    fn finalize(mut self) -> Self {
        self.fuel_consumption_rate = self.thrust / (ISP_ESTIMATE * STANDARD_GRAVITY);
        self
    }

    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.fuel_mass
    }
}

// ---------------------------------------------------------------------------
// StageManager: ordered stage list + active-stage bookkeeping
// ---------------------------------------------------------------------------

/// Owns the stage list derived from a rocket configuration and tracks
/// which stage is currently firing. The index only ever advances.
#[derive(Debug, Clone)]
pub struct StageManager {
    stages: Vec<Stage>,
    current: usize,
}

impl StageManager {
    /// Partition parts into stages, scanning in placement order.
    ///
    /// A `StageSeparator` finalizes the working stage only if it has at
    /// least one engine; an engineless segment keeps accumulating into the
    /// next so its mass is never lost. A trailing engineless residue folds
    /// into the most recently finalized stage. The list is reversed so that
    /// index 0 is the stage that fires first.
    pub fn build(parts: &[Part]) -> Result<Self, ConfigError> {
        if parts.is_empty() {
            return Err(ConfigError::EmptyConfig);
        }

        let mut stages: Vec<Stage> = Vec::new();
        let mut working = Stage::default();

        for (idx, part) in parts.iter().enumerate() {
            match part.kind {
                PartKind::Engine => {
                    working.engines.push(idx);
                    working.thrust += part.thrust_n();
                    working.dry_mass += part.mass_kg;
                }
                PartKind::FuelTank => {
                    working.tanks.push(idx);
                    working.fuel_mass += part.fuel();
                    working.dry_mass += part.mass_kg;
                }
                PartKind::StageSeparator => {
                    // The separator hardware departs with the stage it caps.
                    working.dry_mass += part.mass_kg;
                    if !working.engines.is_empty() {
                        stages.push(working.finalize());
                        working = Stage::default();
                    }
                }
                PartKind::Command | PartKind::Structural => {
                    working.dry_mass += part.mass_kg;
                }
            }
        }

        if !working.engines.is_empty() {
            stages.push(working.finalize());
        } else if let Some(last) = stages.last_mut() {
            // Engineless residue (e.g. a bare capsule) rides the adjacent stage.
            last.dry_mass += working.dry_mass;
            last.fuel_mass += working.fuel_mass;
            last.tanks.append(&mut working.tanks);
        }

        if stages.is_empty() {
            return Err(ConfigError::NoEngines);
        }

        stages.reverse();
        debug!("built {} stage(s) from {} part(s)", stages.len(), parts.len());

        Ok(Self { stages, current: 0 })
    }

    /// The active stage, or None once all stages are spent.
    pub fn current(&self) -> Option<&Stage> {
        self.stages.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Separate the active stage. Advances only if a next stage exists;
    /// returns false when the stack is spent (the final stage stays attached
    /// so the vehicle keeps its dry mass in unpowered coast).
    pub fn jettison(&mut self) -> bool {
        if self.current + 1 < self.stages.len() {
            self.current += 1;
            info!("stage separation: now on stage {}", self.current);
            true
        } else {
            false
        }
    }

    /// Mass of the remaining stack: dry mass of every stage from the active
    /// one onward, plus the active stage's remaining fuel only. Upper-stage
    /// propellant is not yet "hot" and deliberately does not count.
    pub fn total_mass(&self) -> f64 {
        let mut mass = 0.0;
        for (i, stage) in self.stages.iter().enumerate().skip(self.current) {
            mass += stage.dry_mass;
            if i == self.current {
                mass += stage.fuel_mass;
            }
        }
        mass
    }

    /// Propellant left across all remaining stages.
    pub fn remaining_fuel(&self) -> f64 {
        self.stages[self.current.min(self.stages.len())..]
            .iter()
            .map(|s| s.fuel_mass)
            .sum()
    }

    /// Drain propellant from the active stage's tanks, floored at zero.
    pub fn burn_fuel(&mut self, kg: f64) {
        if let Some(stage) = self.stages.get_mut(self.current) {
            stage.fuel_mass = (stage.fuel_mass - kg).max(0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_stage_parts() -> Vec<Part> {
        // Listed top to bottom: upper stage first, booster last.
        vec![
            Part::command("capsule", 200.0),
            Part::fuel_tank("upper-tank", 100.0, 400.0),
            Part::engine("upper-engine", 150.0, 60.0),
            Part::separator("decoupler", 50.0),
            Part::fuel_tank("booster-tank", 300.0, 2_000.0),
            Part::engine("booster-engine", 400.0, 240.0),
        ]
    }

    #[test]
    fn splits_at_separator_and_reverses() {
        let mgr = StageManager::build(&two_stage_parts()).unwrap();
        assert_eq!(mgr.len(), 2);
        // Stage 0 fires first: the booster (highest thrust).
        assert_relative_eq!(mgr.stages()[0].thrust, 240_000.0);
        assert_relative_eq!(mgr.stages()[1].thrust, 60_000.0);
    }

    #[test]
    fn consumption_rate_from_thrust() {
        let mgr = StageManager::build(&two_stage_parts()).unwrap();
        let booster = &mgr.stages()[0];
        assert_relative_eq!(
            booster.fuel_consumption_rate,
            240_000.0 / (3_000.0 * 9.81),
            epsilon = 1e-9
        );
    }

    #[test]
    fn stage_masses_sum_to_config_totals() {
        let parts = two_stage_parts();
        let stats = crate::vehicle::part::RocketConfig::compute_stats(&parts);
        let mgr = StageManager::build(&parts).unwrap();
        let total: f64 = mgr.stages().iter().map(Stage::total_mass).sum();
        assert_relative_eq!(total, stats.total_mass_kg, epsilon = 1e-9);
        let fuel: f64 = mgr.stages().iter().map(|s| s.fuel_mass).sum();
        assert_relative_eq!(fuel, stats.total_fuel_kg, epsilon = 1e-9);
    }

    #[test]
    fn engineless_segment_merges_forward() {
        // Separator with no engine above it: the segment is not finalized,
        // its parts keep accumulating into the next stage.
        let parts = vec![
            Part::structural("fairing", 80.0),
            Part::separator("sep-1", 20.0),
            Part::fuel_tank("tank", 100.0, 500.0),
            Part::engine("engine", 150.0, 100.0),
        ];
        let mgr = StageManager::build(&parts).unwrap();
        assert_eq!(mgr.len(), 1);
        assert_relative_eq!(mgr.stages()[0].dry_mass, 80.0 + 20.0 + 100.0 + 150.0);
    }

    #[test]
    fn trailing_engineless_residue_folds_into_last_stage() {
        let parts = vec![
            Part::fuel_tank("tank", 100.0, 500.0),
            Part::engine("engine", 150.0, 100.0),
            Part::separator("sep", 20.0),
            Part::structural("skirt", 60.0),
        ];
        let mgr = StageManager::build(&parts).unwrap();
        assert_eq!(mgr.len(), 1);
        assert_relative_eq!(mgr.stages()[0].dry_mass, 100.0 + 150.0 + 20.0 + 60.0);
    }

    #[test]
    fn no_engines_is_an_error() {
        let parts = vec![
            Part::command("capsule", 200.0),
            Part::fuel_tank("tank", 100.0, 500.0),
        ];
        assert!(matches!(
            StageManager::build(&parts),
            Err(ConfigError::NoEngines)
        ));
    }

    #[test]
    fn empty_config_is_an_error() {
        assert!(matches!(
            StageManager::build(&[]),
            Err(ConfigError::EmptyConfig)
        ));
    }

    #[test]
    fn jettison_advances_then_refuses() {
        let mut mgr = StageManager::build(&two_stage_parts()).unwrap();
        assert_eq!(mgr.current_index(), 0);
        assert!(mgr.jettison());
        assert_eq!(mgr.current_index(), 1);
        // Final stage stays attached.
        assert!(!mgr.jettison());
        assert_eq!(mgr.current_index(), 1);
        assert!(mgr.current().is_some());
    }

    #[test]
    fn total_mass_counts_only_active_stage_fuel() {
        let mgr = StageManager::build(&two_stage_parts()).unwrap();
        let dry: f64 = mgr.stages().iter().map(|s| s.dry_mass).sum();
        // Booster fuel (2000) is hot, upper-stage fuel (400) is not.
        assert_relative_eq!(mgr.total_mass(), dry + 2_000.0, epsilon = 1e-9);
    }

    #[test]
    fn burn_fuel_floors_at_zero() {
        let mut mgr = StageManager::build(&two_stage_parts()).unwrap();
        mgr.burn_fuel(1_500.0);
        assert_relative_eq!(mgr.current().unwrap().fuel_mass, 500.0);
        mgr.burn_fuel(10_000.0);
        assert_eq!(mgr.current().unwrap().fuel_mass, 0.0);
    }

    #[test]
    fn part_indices_survive_reversal() {
        let mgr = StageManager::build(&two_stage_parts()).unwrap();
        // Capsule (index 0) rides the upper stage; part indices survive reversal.
        assert_eq!(mgr.stages()[1].engines, vec![2]);
        assert_eq!(mgr.stages()[0].engines, vec![5]);
    }
}
