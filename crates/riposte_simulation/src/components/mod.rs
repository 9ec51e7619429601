//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье и маркер защищающегося (Health, Defender)
//! - kinematics: снимок движения для arbitration (Kinematics, IntendedMotion)
//!
//! Parry/attacker компоненты живут в `crate::combat`, director — в `crate::ai`.

pub mod actor;
pub mod kinematics;

// Re-exports для удобного импорта
pub use actor::*;
pub use kinematics::*;
