use std::io::{self, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::io::summary::FlightSummary;
use crate::vehicle::part::RocketConfig;

// ---------------------------------------------------------------------------
// Rocket configuration loading (builder handoff format)
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read a rocket configuration from JSON.
pub fn load_config<R: Read>(reader: R) -> Result<RocketConfig, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Read a rocket configuration from a JSON file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<RocketConfig, LoadError> {
    let file = std::fs::File::open(path)?;
    load_config(io::BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Flight summary output
// ---------------------------------------------------------------------------

/// Write a flight summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    rocket_name: &str,
    summary: &FlightSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"rocket\": \"{}\",", rocket_name)?;
    writeln!(writer, "  \"performance\": {{")?;
    writeln!(writer, "    \"apogee_m\": {:.2},", summary.apogee_m)?;
    writeln!(writer, "    \"apogee_time_s\": {:.2},", summary.apogee_time)?;
    writeln!(writer, "    \"max_speed_ms\": {:.2},", summary.max_speed)?;
    writeln!(writer, "    \"max_accel_ms2\": {:.2},", summary.max_accel)?;
    writeln!(writer, "    \"flight_time_s\": {:.2},", summary.flight_time)?;
    writeln!(writer, "    \"final_phase\": \"{:?}\"", summary.final_phase)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}
