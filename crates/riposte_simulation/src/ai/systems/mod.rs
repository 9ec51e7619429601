//! AI systems (attack directors, homing projectiles)

pub mod director;
pub mod homing;

// Re-export all systems
pub use director::*;
pub use homing::*;
