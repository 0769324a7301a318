pub mod atmosphere;
pub mod drag;
pub mod gravity;

pub use atmosphere::air_density;
pub use drag::drag_force;
pub use gravity::gravity_accel;
