pub mod csv;
pub mod json;
pub mod summary;

pub use json::{load_config, load_config_file, LoadError};
pub use summary::FlightSummary;
