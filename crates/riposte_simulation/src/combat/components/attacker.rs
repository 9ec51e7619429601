//! Attacker components.
//!
//! Everything a hostile entity needs to take part in parry arbitration.

use bevy::prelude::*;

use crate::combat::reachability::{predict_reachability, ReachabilityVerdict};
use crate::components::{IntendedMotion, Kinematics};
use crate::config::ParryConfig;

/// Attacker variants (dispatched by `match`, no shared base type).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum AttackerKind {
    /// Boss melee: telegraphed fixed-duration dash (see `AttackDirector`)
    MeleeDash,
    /// Rocket: homes on the defender, parryable whenever not stunned
    HomingProjectile,
}

/// Attacker — entity that can be parried.
///
/// Registered in `AttackerRegistry` as soon as the component is added,
/// deregistered when it is removed or the entity despawns.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Kinematics, IntendedMotion, Transform)]
pub struct Attacker {
    pub kind: AttackerKind,
    /// Defender this attacker goes after
    pub target: Entity,
    /// Collision radius, subtracted from every prediction distance
    pub half_extent: f32,
    /// Damage to the defender when a parry fails against this attacker
    pub damage: u32,
    /// Knockback impulse magnitude on a successful parry
    pub knockback_impulse: f32,
    /// Parry-stun duration (seconds)
    pub stun_duration: f32,
    /// False while stunned (no re-entrant parries) or not attacking
    pub is_parryable: bool,
}

impl Attacker {
    /// Boss melee dasher. Parryable only while its dash is committed.
    pub fn melee_dash(target: Entity) -> Self {
        Self {
            kind: AttackerKind::MeleeDash,
            target,
            half_extent: 1.0,
            damage: 1,
            knockback_impulse: 45.0,
            stun_duration: 1.0,
            is_parryable: false,
        }
    }

    /// Homing rocket. Parryable from launch.
    pub fn homing_projectile(target: Entity) -> Self {
        Self {
            kind: AttackerKind::HomingProjectile,
            target,
            half_extent: 0.25,
            damage: 1,
            knockback_impulse: 15.0,
            stun_duration: 2.0,
            is_parryable: true,
        }
    }

    /// Capability used by the parry broadcast: report how this attacker
    /// would meet the parry. `None` = not taking part (not parryable).
    pub fn report_reachability(
        &self,
        kinematics: &Kinematics,
        defender: &Kinematics,
        config: &ParryConfig,
    ) -> Option<ReachabilityVerdict> {
        if !self.is_parryable {
            return None;
        }
        Some(predict_reachability(
            defender.position,
            defender.forward,
            kinematics,
            self.half_extent,
            config,
        ))
    }

    /// Knockback impulse pushing this attacker away from the defender.
    pub fn knockback_from(&self, own_position: Vec3, defender_position: Vec3) -> Vec3 {
        let away = (own_position - defender_position).normalize_or_zero();
        away * self.knockback_impulse
    }

    /// Stun ends: rockets resume being parryable, the boss waits for its
    /// next committed dash.
    pub fn parryable_after_stun(&self) -> bool {
        matches!(self.kind, AttackerKind::HomingProjectile)
    }

    /// A rocket that lands on the defender is spent.
    pub fn is_spent_on_hit(&self) -> bool {
        matches!(self.kind, AttackerKind::HomingProjectile)
    }
}

/// Parry stun (attacker was parried).
///
/// Prevents re-entrant parries and cancels any in-flight attack.
#[derive(Component, Clone, Debug, Reflect)]
#[reflect(Component)]
pub struct ParryStun {
    /// Time remaining in stun (seconds)
    pub timer: f32,
    /// Defender who parried us (counter target)
    pub parried_by: Entity,
}

impl ParryStun {
    pub fn new(duration: f32, parried_by: Entity) -> Self {
        Self {
            timer: duration,
            parried_by,
        }
    }

    pub fn is_stunned(&self) -> bool {
        self.timer > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_parryable_reports_nothing() {
        let attacker = Attacker::melee_dash(Entity::PLACEHOLDER);
        let kin = Kinematics::new(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO, Vec3::Z);
        let defender = Kinematics::default();

        assert!(attacker
            .report_reachability(&kin, &defender, &ParryConfig::default())
            .is_none());
    }

    #[test]
    fn test_rocket_reports_from_launch() {
        let attacker = Attacker::homing_projectile(Entity::PLACEHOLDER);
        let kin = Kinematics::new(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO, Vec3::Z);
        let defender = Kinematics::default();

        assert!(attacker
            .report_reachability(&kin, &defender, &ParryConfig::default())
            .is_some());
    }

    #[test]
    fn test_knockback_points_away_from_defender() {
        let attacker = Attacker::melee_dash(Entity::PLACEHOLDER);
        let impulse = attacker.knockback_from(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO);
        assert_eq!(impulse, Vec3::new(0.0, 0.0, -45.0));

        // Same position: no direction, no impulse
        assert_eq!(attacker.knockback_from(Vec3::ZERO, Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_parry_stun_timer() {
        let mut stun = ParryStun::new(1.0, Entity::PLACEHOLDER);
        assert!(stun.is_stunned());
        stun.timer -= 1.0;
        assert!(!stun.is_stunned());
    }
}
