pub mod part;
pub mod presets;
pub mod stage;

pub use part::{Part, PartKind, RocketConfig, RocketStats};
pub use stage::{Stage, StageManager};
