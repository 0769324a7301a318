use std::io::{self, Write};
use std::path::Path;

use crate::sim::state::FlightState;

// ---------------------------------------------------------------------------
// Telemetry export
// ---------------------------------------------------------------------------

/// Write per-tick flight telemetry to CSV.
///
/// Columns: time, altitude, velocity, acceleration, fuel, throttle,
///          pitch_deg, yaw_deg, roll_deg, lateral_x, lateral_z,
///          stage, phase
pub fn write_telemetry<W: Write>(writer: &mut W, history: &[FlightState]) -> io::Result<()> {
    writeln!(
        writer,
        "time,altitude,velocity,acceleration,fuel,throttle,\
         pitch_deg,yaw_deg,roll_deg,lateral_x,lateral_z,stage,phase"
    )?;

    for s in history {
        writeln!(
            writer,
            "{:.3},{:.2},{:.3},{:.3},{:.2},{:.2},\
             {:.2},{:.2},{:.2},{:.3},{:.3},{},{:?}",
            s.mission_time,
            s.altitude,
            s.velocity,
            s.acceleration,
            s.fuel,
            s.throttle,
            s.orientation.pitch.to_degrees(),
            s.orientation.yaw.to_degrees(),
            s.orientation.roll.to_degrees(),
            s.lateral.x,
            s.lateral.y,
            s.current_stage,
            s.phase,
        )?;
    }

    Ok(())
}

/// Write telemetry to a CSV file at the given path.
pub fn write_telemetry_file(path: impl AsRef<Path>, history: &[FlightState]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_telemetry(&mut file, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FlightPhase;

    #[test]
    fn csv_output_has_header_and_rows() {
        let history = vec![
            FlightState::default(),
            FlightState {
                altitude: 1_500.0,
                velocity: 120.0,
                mission_time: 12.0,
                phase: FlightPhase::Flying,
                ..FlightState::default()
            },
        ];

        let mut buf = Vec::new();
        write_telemetry(&mut buf, &history).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("time,altitude,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert!(lines[2].starts_with("12.000,1500.00,"));
        assert!(lines[2].ends_with("Flying"));
    }
}
