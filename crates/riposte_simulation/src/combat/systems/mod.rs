//! Combat systems (strategic layer logic)

pub mod counter;
pub mod damage;
pub mod kinematics;
pub mod parry;
pub mod stun;

// Re-export all systems
pub use counter::*;
pub use damage::*;
pub use kinematics::*;
pub use parry::*;
pub use stun::*;
