use ascent_sim::io::{csv, json, FlightSummary};
use ascent_sim::sim::{Controls, FlightIntegrator, FlightPhase, FlightState};
use ascent_sim::vehicle::presets;

const DT: f64 = 1.0 / 60.0;
const MAX_MISSION_TIME: f64 = 1_200.0;

fn main() {
    env_logger::init();

    // -----------------------------------------------------------------------
    // Vehicle: "Kestrel" two-stage orbital attempt
    // -----------------------------------------------------------------------
    let config = presets::kestrel();

    let mut sim = FlightIntegrator::default();
    if let Err(e) = sim.setup_simulation(&config) {
        eprintln!("cannot fly: {e}");
        std::process::exit(1);
    }

    // -----------------------------------------------------------------------
    // Scripted ascent: full throttle, short pitch-over nudge at T+15 s
    // -----------------------------------------------------------------------
    sim.launch();

    let mut history: Vec<FlightState> = vec![sim.state()];
    loop {
        let t = sim.state().mission_time;
        let pitch_cmd = if t > 15.0 && t < 16.5 { 0.2 } else { 0.0 };
        let controls = Controls::new(100.0, pitch_cmd, 0.0, 0.0);

        let (state, _) = sim.tick(DT, &controls);
        history.push(state.clone());

        if state.phase.is_terminal()
            || state.phase == FlightPhase::Orbit
            || state.mission_time > MAX_MISSION_TIME
        {
            break;
        }
    }

    let summary = FlightSummary::from_history(&history).expect("history is non-empty");

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  ROCKET ASCENT SIMULATION — {}", config.name);
    println!("====================================================================");
    println!();
    println!("  Vehicle");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Total mass:    {:>9.0} kg    Propellant:  {:>9.0} kg",
        config.stats.total_mass_kg, config.stats.total_fuel_kg
    );
    println!(
        "  Thrust:        {:>9.0} kN    Parts:       {:>9}",
        config.stats.thrust_kn,
        config.parts.len()
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for event in sim.events() {
        println!(
            "  {:<28} T{:>+8.1}s   alt {:>8.2} km",
            format!("{:?}", event.kind),
            event.mission_time,
            event.altitude / 1_000.0
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Apogee:        {:>9.1} km  at T+{:.1}s",
        summary.apogee_m / 1_000.0,
        summary.apogee_time
    );
    println!("  Max speed:     {:>9.1} m/s", summary.max_speed);
    println!("  Max accel:     {:>9.1} m/s^2", summary.max_accel);
    println!("  Flight time:   {:>9.1} s", summary.flight_time);
    println!("  Final phase:   {:>9}", format!("{:?}", summary.final_phase));
    println!();

    // -----------------------------------------------------------------------
    // Telemetry table (sampled)
    // -----------------------------------------------------------------------
    println!("  Telemetry");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>8}  {:>9}  {:>9}  {:>9}  {:>9}  {:>6}  {:>9}",
        "t (s)", "alt (km)", "vel (m/s)", "acc", "fuel (kg)", "stage", "phase"
    );
    println!("  {}", "─".repeat(66));

    let sample_interval = (history.len() / 30).max(1);
    for (i, s) in history.iter().enumerate() {
        if i % sample_interval != 0 && i != history.len() - 1 {
            continue;
        }
        println!(
            "  {:>8.1}  {:>9.2}  {:>9.1}  {:>9.1}  {:>9.0}  {:>6}  {:>9}",
            s.mission_time,
            s.altitude / 1_000.0,
            s.velocity,
            s.acceleration,
            s.fuel,
            s.current_stage,
            format!("{:?}", s.phase)
        );
    }
    println!();

    // Optional exports: --csv <path> and/or --json <path>
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = flag_value(&args, "--csv") {
        if let Err(e) = csv::write_telemetry_file(path, &history) {
            eprintln!("failed to write telemetry: {e}");
        } else {
            println!("  Telemetry written to {path}");
        }
    }
    if let Some(path) = flag_value(&args, "--json") {
        match std::fs::File::create(path) {
            Ok(mut file) => {
                if let Err(e) = json::write_summary(&mut file, &config.name, &summary) {
                    eprintln!("failed to write summary: {e}");
                } else {
                    println!("  Summary written to {path}");
                }
            }
            Err(e) => eprintln!("failed to create {path}: {e}"),
        }
    }

    println!("  Simulation: {} steps, dt={:.4} s", history.len(), DT);
    println!("====================================================================");
    println!();
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1))
}
