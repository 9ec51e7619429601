//! Kinematic snapshot consumed by parry arbitration.
//!
//! Transforms and physics bodies are owned by the host; every tick
//! `sample_kinematics` copies what arbitration needs into `Kinematics`.

use bevy::prelude::*;

/// Per-tick snapshot: world position, linear velocity, forward facing.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Kinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit vector (bevy convention: -Z forward).
    pub forward: Vec3,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

impl Kinematics {
    pub fn new(position: Vec3, velocity: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            velocity,
            forward: forward.normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Velocity the attacker *plans* to move with this tick.
///
/// Director dashes and homing flight are transform-driven (lerp, not forces),
/// so the physics body reports ~zero velocity while they move. Whoever drives
/// the motion writes it here; `None` means "ask the physics body".
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct IntendedMotion {
    pub velocity: Option<Vec3>,
}

impl IntendedMotion {
    pub fn moving(velocity: Vec3) -> Self {
        Self {
            velocity: Some(velocity),
        }
    }

    pub fn physics_driven() -> Self {
        Self { velocity: None }
    }
}
