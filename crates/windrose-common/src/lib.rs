//! Common types shared by the wind rose renderer and service.

pub mod compass;
pub mod error;
pub mod input;

pub use compass::{compass_label, COMPASS_POINTS};
pub use error::{WindRoseError, WindRoseResult};
pub use input::{load, WindInput};
