//! Kinematic sampling (physics/transform → arbitration snapshot).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::components::{IntendedMotion, Kinematics};

/// System: refresh `Kinematics` from Transform + motion source.
///
/// Velocity priority:
/// 1. `IntendedMotion` (director dash / homing flight — lerp-driven, the body reports ~0)
/// 2. rapier `Velocity` (knockback and other physics-driven motion)
/// 3. zero
pub fn sample_kinematics(
    mut query: Query<(
        &Transform,
        Option<&IntendedMotion>,
        Option<&Velocity>,
        &mut Kinematics,
    )>,
) {
    for (transform, intended, body, mut kinematics) in query.iter_mut() {
        let velocity = intended
            .and_then(|motion| motion.velocity)
            .or_else(|| body.map(|v| v.linvel))
            .unwrap_or(Vec3::ZERO);

        kinematics.position = transform.translation;
        kinematics.velocity = velocity;
        kinematics.forward = transform.forward().as_vec3();
    }
}
