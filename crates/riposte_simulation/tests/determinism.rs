//! Тесты детерминизма
//!
//! Дуэль (boss с FlashDash + ракеты + скриптованный guard/parry) с одинаковым
//! seed даёт идентичные результаты.

use bevy::prelude::*;
use riposte_simulation::combat::{GuardStarted, ParryPressed};
use riposte_simulation::{
    boss_bundle, create_headless_app, defender_bundle, rocket_bundle, world_snapshot, AttackTuning,
    Health, ParryState,
};

/// Прогоняет дуэль и возвращает snapshot мира
fn run_duel(seed: u64, tick_count: usize) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.update(); // warm-up

    let defender = app
        .world_mut()
        .spawn(defender_bundle(Vec3::ZERO, Vec3::NEG_Z, 50))
        .id();
    app.world_mut()
        .spawn(boss_bundle(Vec3::new(0.0, 0.0, -20.0), defender, AttackTuning::default(), 50));
    for i in 0..3 {
        let angle = i as f32 * 2.0;
        app.world_mut().spawn(rocket_bundle(
            Vec3::new(angle.cos() * 12.0, 0.0, angle.sin() * 12.0),
            defender,
            Vec3::ZERO,
        ));
    }
    app.world_mut().send_event(GuardStarted { defender });

    for tick in 0..tick_count {
        // Parry каждые 0.75 s
        if tick % 45 == 0 {
            app.world_mut().send_event(ParryPressed { defender });
        }
        // Guard заново после hit stun
        if tick % 60 == 30 {
            app.world_mut().send_event(GuardStarted { defender });
        }
        app.update();
    }

    let mut snapshot = world_snapshot::<Transform>(app.world_mut());
    snapshot.extend(world_snapshot::<ParryState>(app.world_mut()));
    snapshot.extend(world_snapshot::<Health>(app.world_mut()));
    snapshot
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1200;

    let snapshot1 = run_duel(SEED, TICK_COUNT);
    let snapshot2 = run_duel(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 600;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_duel(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
