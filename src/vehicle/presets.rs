use crate::vehicle::part::{Part, RocketConfig};

// ---------------------------------------------------------------------------
// Preset rocket configurations
// ---------------------------------------------------------------------------

/// Single-stage sounding rocket ("Pathfinder"). TWR ~2 at the pad.
pub fn pathfinder() -> RocketConfig {
    RocketConfig::new(
        "Pathfinder",
        vec![
            Part::command("nose-avionics", 150.0),
            Part::fuel_tank("main-tank", 350.0, 3_000.0),
            Part::engine("main-engine", 500.0, 80.0),
        ],
    )
}

/// Two-stage orbital attempt ("Kestrel"). Parts listed top to bottom;
/// the booster below the decoupler fires first.
pub fn kestrel() -> RocketConfig {
    RocketConfig::new(
        "Kestrel",
        vec![
            Part::command("capsule", 400.0),
            Part::fuel_tank("s2-tank", 300.0, 4_000.0),
            Part::engine("s2-engine", 350.0, 120.0),
            Part::separator("interstage", 80.0),
            Part::fuel_tank("s1-tank", 900.0, 16_000.0),
            Part::engine("s1-engine-a", 600.0, 300.0),
            Part::engine("s1-engine-b", 600.0, 300.0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::stage::StageManager;

    #[test]
    fn presets_build_valid_stage_stacks() {
        assert_eq!(StageManager::build(&pathfinder().parts).unwrap().len(), 1);
        assert_eq!(StageManager::build(&kestrel().parts).unwrap().len(), 2);
    }

    #[test]
    fn kestrel_booster_fires_first() {
        let mgr = StageManager::build(&kestrel().parts).unwrap();
        let booster = mgr.current().unwrap();
        assert!(booster.thrust > 500_000.0);
        assert_eq!(booster.engines.len(), 2);
    }
}
