//! AttackerRegistry — attackers that opted into parry checks.
//!
//! # Architecture
//! - Хранит Entity атакующих в порядке регистрации (детерминированный порядок fold'а)
//! - `register_attackers` / `deregister_attackers` держат его в синхроне с `Attacker`
//! - Parry resolution итерирует snapshot: attacker, исчезнувший посреди
//!   broadcast'а, просто пропускается (обычное удаление, не ошибка)

use bevy::prelude::*;

use crate::combat::Attacker;

/// Registry for parry candidates (single-threaded, FixedUpdate only).
#[derive(Resource, Debug, Default, Clone)]
pub struct AttackerRegistry {
    attackers: Vec<Entity>,
}

impl AttackerRegistry {
    /// Register attacker. Returns false if it was already registered.
    pub fn register(&mut self, attacker: Entity) -> bool {
        if self.attackers.contains(&attacker) {
            return false;
        }
        self.attackers.push(attacker);
        true
    }

    /// Deregister attacker. Returns false if it was not registered.
    pub fn deregister(&mut self, attacker: Entity) -> bool {
        let before = self.attackers.len();
        self.attackers.retain(|&e| e != attacker);
        self.attackers.len() != before
    }

    pub fn contains(&self, attacker: Entity) -> bool {
        self.attackers.contains(&attacker)
    }

    pub fn len(&self) -> usize {
        self.attackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attackers.is_empty()
    }

    /// Copy of the current registration list for a broadcast.
    ///
    /// Mutating the registry while iterating the snapshot is safe.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.attackers.clone()
    }
}

/// System: register freshly spawned/activated attackers.
pub fn register_attackers(
    added: Query<Entity, Added<Attacker>>,
    mut registry: ResMut<AttackerRegistry>,
) {
    for entity in added.iter() {
        if registry.register(entity) {
            crate::logger::log(&format!("📋 Registered attacker: {:?}", entity));
        }
    }
}

/// System: deregister attackers whose component was removed or entity despawned.
pub fn deregister_attackers(
    mut removed: RemovedComponents<Attacker>,
    mut registry: ResMut<AttackerRegistry>,
) {
    for entity in removed.read() {
        if registry.deregister(entity) {
            crate::logger::log(&format!("🗑️ Deregistered attacker: {:?}", entity));
        }
    }
}
