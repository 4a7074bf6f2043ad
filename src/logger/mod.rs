pub mod facade;
pub mod gate;

pub use facade::{ATTRIBUTION, Event, Logger, set_default_sink};
