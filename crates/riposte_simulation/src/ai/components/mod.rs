//! AI components

pub mod director;
pub mod homing;


// Re-export all components
pub use director::*;
pub use homing::*;
