//! Combat components

pub mod attacker;
pub mod parry;

// Re-export all components
pub use attacker::*;
pub use parry::*;
