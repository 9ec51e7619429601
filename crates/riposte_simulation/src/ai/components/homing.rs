//! Homing projectile (rocket) component.

use bevy::prelude::*;

/// Rocket: flies straight at its target's current position.
///
/// Always parryable unless parry-stunned; after the stun it resumes homing.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct HomingProjectile {
    /// Метры в секунду
    pub speed: f32,
}

impl Default for HomingProjectile {
    fn default() -> Self {
        Self { speed: 7.0 }
    }
}
