//! Parry window components.
//!
//! State tracking for the defender's guard, parry resolution, cooldown and
//! counter opportunity.

use bevy::prelude::*;

// ============================================================================
// Parry Phase
// ============================================================================

/// Parry lifecycle.
///
/// # Phases
///
/// 1. **Idle**: guard not held (or hit-stunned)
/// 2. **Armed**: guarding, parry input accepted
/// 3. **Resolving**: parry input just happened, arbitration in progress.
///    Lasts zero ticks: entered and left inside the same system call.
/// 4. **Cooldown**: refractory period after every resolution, regardless of outcome
///
/// The cooldown timer itself lives in `ParryState::cooldown_remaining`: a hit
/// reaction drops the phase to Idle but the timer keeps running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum ParryPhase {
    Idle,
    Armed,
    Resolving,
    Cooldown,
}

/// Tri-state outcome of the latest resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum ParryOutcome {
    #[default]
    Pending,
    Success,
    Fail,
}

/// Open counter opportunity after a clean parry.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CounterWindow {
    /// Attacker the counter lands on
    pub attacker: Entity,
    /// Seconds until the opportunity closes
    pub remaining: f32,
}

/// What happened while ticking timers (systems turn these into events).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParryTick {
    /// Cooldown or counter window ended with guard still held → Armed
    pub rearmed: bool,
    /// Counter window ran out unused
    pub counter_expired: Option<Entity>,
}

// ============================================================================
// Parry State Component
// ============================================================================

/// Defender's parry state (one per defender).
///
/// Mutated only by the parry systems; animation/camera/damage collaborators
/// read it.
#[derive(Component, Clone, Debug, Reflect)]
#[reflect(Component)]
pub struct ParryState {
    pub phase: ParryPhase,
    /// Outcome of the latest resolution (Pending while none happened yet)
    pub succeeded: ParryOutcome,
    /// Latest resolution found an attacker that actually mattered
    pub any_attacker_in_range: bool,
    /// Guard input currently held
    pub guard_held: bool,
    /// Hit reaction time left; guard/parry blocked while > 0
    pub hit_stun: f32,
    /// Parry cooldown left; no new resolution while > 0 (survives hit reactions)
    pub cooldown_remaining: f32,
    pub counter: Option<CounterWindow>,
    /// Recovery after a counter; parry blocked while > 0
    pub counter_delay: f32,
}

impl Default for ParryState {
    fn default() -> Self {
        Self {
            phase: ParryPhase::Idle,
            succeeded: ParryOutcome::Pending,
            any_attacker_in_range: false,
            guard_held: false,
            hit_stun: 0.0,
            cooldown_remaining: 0.0,
            counter: None,
            counter_delay: 0.0,
        }
    }
}

impl ParryState {
    pub fn is_armed(&self) -> bool {
        self.phase == ParryPhase::Armed
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_remaining > 0.0 || self.phase == ParryPhase::Cooldown
    }

    pub fn is_hit_stunned(&self) -> bool {
        self.hit_stun > 0.0
    }

    /// Success with a real attacker in range: a counter may follow.
    pub fn is_counter_eligible(&self) -> bool {
        self.succeeded == ParryOutcome::Success && self.any_attacker_in_range
    }

    /// Guard pressed. Returns true on Idle → Armed.
    ///
    /// Ignored entirely while hit-stunned. During Cooldown (even one left
    /// running by a hit reaction) or an open counter window the press is
    /// remembered and arms later.
    pub fn guard_start(&mut self) -> bool {
        if self.is_hit_stunned() {
            return false;
        }
        self.guard_held = true;

        if self.phase == ParryPhase::Idle && self.counter.is_none() && !self.is_cooling_down() {
            self.phase = ParryPhase::Armed;
            return true;
        }
        false
    }

    /// Guard released. Returns true on Armed → Idle.
    pub fn guard_end(&mut self) -> bool {
        self.guard_held = false;

        if self.phase == ParryPhase::Armed {
            self.phase = ParryPhase::Idle;
            return true;
        }
        false
    }

    /// Parry input accepted right now?
    pub fn can_resolve(&self) -> bool {
        self.phase == ParryPhase::Armed
            && !self.is_hit_stunned()
            && !self.is_cooling_down()
            && self.counter_delay <= 0.0
    }

    /// Armed → Resolving. Returns false (input dropped) otherwise.
    pub fn begin_resolution(&mut self) -> bool {
        if !self.can_resolve() {
            return false;
        }
        self.phase = ParryPhase::Resolving;
        self.succeeded = ParryOutcome::Pending;
        self.any_attacker_in_range = false;
        true
    }

    /// Resolving → Cooldown with the arbiter's verdict.
    ///
    /// Cooldown length does not depend on the outcome (no parry spam).
    pub fn finish_resolution(&mut self, outcome: ParryOutcome, any_in_range: bool, cooldown: f32) {
        if self.phase != ParryPhase::Resolving {
            return;
        }
        self.succeeded = outcome;
        self.any_attacker_in_range = any_in_range;
        self.phase = ParryPhase::Cooldown;
        self.cooldown_remaining = cooldown.max(0.0);
    }

    /// Open the counter opportunity (guard pose suppressed while it lasts).
    pub fn open_counter(&mut self, attacker: Entity, duration: f32) {
        self.counter = Some(CounterWindow {
            attacker,
            remaining: duration,
        });
    }

    /// Consume the counter window. Returns the attacker to counter.
    pub fn try_counter(&mut self, recovery: f32) -> Option<Entity> {
        if self.is_hit_stunned() || self.counter_delay > 0.0 {
            return None;
        }
        let window = self.counter.take()?;
        self.counter_delay = recovery;
        Some(window.attacker)
    }

    /// Hit reaction: any phase → Idle, guard and counter cancelled.
    /// A running cooldown is not reset.
    ///
    /// Returns true if the defender was Armed (guard pose dropped).
    pub fn take_hit(&mut self, stun: f32) -> bool {
        let was_armed = self.phase == ParryPhase::Armed;
        self.phase = ParryPhase::Idle;
        self.stagger(stun);
        was_armed
    }

    /// Hit landed through a failed parry: same reaction as `take_hit`, but
    /// the Cooldown just entered keeps running (it never depends on the outcome).
    pub fn absorb_failed_parry(&mut self, stun: f32) {
        self.stagger(stun);
    }

    fn stagger(&mut self, stun: f32) {
        self.guard_held = false;
        self.counter = None;
        self.hit_stun = self.hit_stun.max(stun);
    }

    /// Advance all timers by `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> ParryTick {
        let mut result = ParryTick::default();

        if self.hit_stun > 0.0 {
            self.hit_stun = (self.hit_stun - delta).max(0.0);
        }
        if self.counter_delay > 0.0 {
            self.counter_delay = (self.counter_delay - delta).max(0.0);
        }

        let mut counter_closed = false;
        if let Some(window) = self.counter.as_mut() {
            window.remaining -= delta;
            if window.remaining <= 0.0 {
                result.counter_expired = Some(window.attacker);
                self.counter = None;
                counter_closed = true;
            }
        }

        let mut cooldown_ended = false;
        if self.is_cooling_down() {
            self.cooldown_remaining = (self.cooldown_remaining - delta).max(0.0);
            if self.cooldown_remaining <= 0.0 {
                cooldown_ended = true;
                if self.phase == ParryPhase::Cooldown {
                    self.phase = ParryPhase::Idle;
                }
            }
        }

        if (cooldown_ended || counter_closed) && self.phase == ParryPhase::Idle {
            result.rearmed = self.try_rearm();
        }

        result
    }

    fn try_rearm(&mut self) -> bool {
        if self.guard_held
            && self.counter.is_none()
            && !self.is_hit_stunned()
            && !self.is_cooling_down()
        {
            self.phase = ParryPhase::Armed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> ParryState {
        let mut state = ParryState::default();
        assert!(state.guard_start());
        state
    }

    #[test]
    fn test_guard_arms_and_disarms() {
        let mut state = armed();
        assert!(state.is_armed());
        assert!(!state.guard_start(), "already armed");

        assert!(state.guard_end());
        assert_eq!(state.phase, ParryPhase::Idle);
        assert!(!state.guard_end(), "already idle");
    }

    #[test]
    fn test_parry_requires_armed() {
        let mut state = ParryState::default();
        assert!(!state.begin_resolution());
        assert_eq!(state.phase, ParryPhase::Idle);
    }

    #[test]
    fn test_resolution_enters_cooldown_regardless_of_outcome() {
        for outcome in [ParryOutcome::Success, ParryOutcome::Fail] {
            let mut state = armed();
            assert!(state.begin_resolution());
            assert_eq!(state.phase, ParryPhase::Resolving);

            state.finish_resolution(outcome, false, 0.5);
            assert_eq!(state.phase, ParryPhase::Cooldown);
            assert_eq!(state.cooldown_remaining, 0.5);
            assert_eq!(state.succeeded, outcome);
        }
    }

    #[test]
    fn test_second_press_during_cooldown_dropped() {
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Success, false, 0.5);

        state.tick(0.25);
        assert!(!state.begin_resolution());
        assert!(state.is_cooling_down());
    }

    #[test]
    fn test_cooldown_rearms_when_guard_held() {
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Success, false, 0.5);

        let tick = state.tick(0.6);
        assert!(tick.rearmed);
        assert!(state.is_armed());
    }

    #[test]
    fn test_cooldown_goes_idle_when_guard_released() {
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Fail, false, 0.5);

        assert!(!state.guard_end(), "not armed during cooldown");
        let tick = state.tick(0.6);
        assert!(!tick.rearmed);
        assert_eq!(state.phase, ParryPhase::Idle);
    }

    #[test]
    fn test_guard_press_during_cooldown_arms_later() {
        let mut state = ParryState::default();
        state.phase = ParryPhase::Cooldown;
        state.cooldown_remaining = 0.2;

        assert!(!state.guard_start());
        assert!(state.guard_held);
        assert!(state.tick(0.3).rearmed);
    }

    #[test]
    fn test_hit_forces_idle_and_blocks_guard() {
        let mut state = armed();
        assert!(state.take_hit(0.5));
        assert_eq!(state.phase, ParryPhase::Idle);
        assert!(!state.guard_held);

        assert!(!state.guard_start(), "guard ignored while stunned");
        state.tick(0.6);
        assert!(state.guard_start());
    }

    #[test]
    fn test_counter_window_suppresses_guard_pose() {
        let attacker = Entity::from_raw(7);
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Success, true, 0.5);
        state.open_counter(attacker, 1.5);
        assert!(state.is_counter_eligible());

        // Cooldown ends, guard still held, but the counter window keeps guard down
        let tick = state.tick(0.6);
        assert!(!tick.rearmed);
        assert_eq!(state.phase, ParryPhase::Idle);

        // Window runs out → guard comes back
        let tick = state.tick(1.0);
        assert_eq!(tick.counter_expired, Some(attacker));
        assert!(tick.rearmed);
        assert!(state.is_armed());
    }

    #[test]
    fn test_counter_consumes_window_and_starts_recovery() {
        let attacker = Entity::from_raw(3);
        let mut state = ParryState::default();
        state.open_counter(attacker, 1.5);

        assert_eq!(state.try_counter(1.0), Some(attacker));
        assert!(state.counter.is_none());
        assert_eq!(state.try_counter(1.0), None);
        assert_eq!(state.counter_delay, 1.0);
    }

    #[test]
    fn test_hit_after_failed_parry_keeps_cooldown() {
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Fail, false, 0.5);

        state.absorb_failed_parry(0.5);
        assert!(state.is_cooling_down());
        assert!(!state.guard_held);

        let tick = state.tick(0.6);
        assert!(!tick.rearmed);
        assert_eq!(state.phase, ParryPhase::Idle);
    }

    #[test]
    fn test_hit_during_cooldown_keeps_cooldown_running() {
        let mut state = armed();
        state.begin_resolution();
        state.finish_resolution(ParryOutcome::Success, false, 0.5);

        assert!(!state.take_hit(0.1));
        assert_eq!(state.phase, ParryPhase::Idle);
        assert!(state.is_cooling_down());

        // Stun кончился раньше cooldown'а: guard запоминается, но не армит
        state.tick(0.2);
        assert!(!state.is_hit_stunned());
        assert!(!state.guard_start());
        assert!(!state.begin_resolution());

        // Cooldown истёк → Armed (guard держится)
        let tick = state.tick(0.35);
        assert!(tick.rearmed);
        assert!(state.is_armed());
        assert!(state.begin_resolution());
    }

    #[test]
    fn test_hit_cancels_counter_window() {
        let mut state = ParryState::default();
        state.open_counter(Entity::from_raw(1), 1.5);
        state.take_hit(0.5);
        assert!(state.counter.is_none());
    }
}
