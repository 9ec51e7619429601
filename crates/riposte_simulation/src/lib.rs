//! RIPOSTE Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: parry arbitration для action-боя.
//!
//! - combat: ParryState, reachability prediction, arbiter, registry, counter, damage
//! - ai: attack directors (boss), homing projectiles (rockets)
//! - config: ParryConfig (RON)
//!
//! Хост (движок/клиент) владеет рендером, анимацией и input'ом: шлёт input
//! события и читает output события (см. `combat::events`, `ai::events`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, AttackDirector, AttackPattern, AttackTuning, DirectorPhase, HomingProjectile};
pub use combat::{
    arbitrate, predict_reachability, ApplyDamage, Attacker, AttackerKind, AttackerRegistry, CombatPlugin,
    Dead, EntityDied, ParryOutcome, ParryPhase, ParryState, ParryStun, Verdict,
};
pub use components::*;
pub use config::{ConfigError, ParryConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};

/// Fixed simulation tick (Hz)
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок фаз внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// AI двигает атакующих (Transform, IntendedMotion, is_parryable)
    Attackers,
    /// Kinematics snapshot → parry resolution → таймеры → урон
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Attackers, SimulationSet::Combat).chain(),
            )
            // Подсистемы
            .add_plugins((CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один FixedUpdate тик
/// (первый update — warm-up, delta = 0).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Defender (игрок): guard/parry владелец
pub fn defender_bundle(position: Vec3, forward: Vec3, health: u32) -> impl Bundle {
    (
        Defender,
        Health::new(health),
        Transform::from_translation(position).looking_to(forward, Vec3::Y),
    )
}

/// Boss: melee dasher под управлением AttackDirector
pub fn boss_bundle(position: Vec3, target: Entity, tuning: AttackTuning, health: u32) -> impl Bundle {
    (
        Attacker::melee_dash(target),
        AttackDirector::default(),
        tuning,
        Health::new(health),
        Transform::from_translation(position),
    )
}

/// Rocket: homing projectile, нацелен на target с момента запуска
pub fn rocket_bundle(position: Vec3, target: Entity, target_position: Vec3) -> impl Bundle {
    (
        Attacker::homing_projectile(target),
        HomingProjectile::default(),
        Transform::from_translation(position).looking_at(target_position, Vec3::Y),
    )
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
