//! Базовые компоненты акторов: Health, Defender

use bevy::prelude::*;

use crate::combat::ParryState;
use crate::components::Kinematics;

/// Защищающийся (игрок) — владелец parry window.
///
/// Автоматически добавляет ParryState и Kinematics через Required Components.
/// Health задаётся при спавне (см. `defender_bundle`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(ParryState, Kinematics, Transform)]
pub struct Defender;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Current / max in [0, 1] (for HP bars).
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_saturates() {
        let mut health = Health::new(10);
        health.take_damage(3);
        assert_eq!(health.current, 7);

        health.take_damage(100);
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_fraction() {
        let mut health = Health::new(100);
        health.take_damage(25);
        assert_eq!(health.fraction(), 0.75);
        assert_eq!(Health::new(0).fraction(), 0.0);
    }
}
