//! Parry arbiter: fold per-attacker verdicts into one outcome.
//!
//! Precedence:
//! - any Fail → aggregate Fail (fail-contagion, no half-parries)
//! - Miss never flips the aggregate, unless `force_resolve_out_of_range`
//!   is set: then an attacker that cannot arrive in time withdraws Success
//! - otherwise Success (also with zero attackers)
//!
//! Every attacker is still evaluated after the first Fail, so each one gets
//! its own side effects (damage from every failing attacker, diagnostics).

use bevy::prelude::*;

use crate::combat::reachability::{ReachabilityVerdict, Verdict};
use crate::combat::ParryOutcome;
use crate::config::ParryConfig;

/// Result of one resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Arbitration {
    pub outcome: ParryOutcome,
    /// At least one attacker was actually parried (not a whiff)
    pub any_attacker_in_range: bool,
    /// Success withdrawn by an out-of-reach attacker (forced-resolve mode)
    pub withdrawn_by_out_of_range: bool,
    /// Per-attacker verdicts in registry order
    pub verdicts: Vec<(Entity, ReachabilityVerdict)>,
}

impl Arbitration {
    /// Counter opportunity: clean parry with a real attacker.
    pub fn is_counter_eligible(&self) -> bool {
        self.outcome == ParryOutcome::Success && self.any_attacker_in_range
    }

    /// Attackers whose own verdict is Fail (they land their hit).
    pub fn failed_attackers(&self) -> impl Iterator<Item = Entity> + '_ {
        self.verdicts
            .iter()
            .filter(|(_, v)| v.verdict == Verdict::Fail)
            .map(|(entity, _)| *entity)
    }

    /// Attackers whose own verdict is Success (stunned when the aggregate succeeds).
    pub fn parried_attackers(&self) -> impl Iterator<Item = Entity> + '_ {
        self.verdicts
            .iter()
            .filter(|(_, v)| v.verdict == Verdict::Success)
            .map(|(entity, _)| *entity)
    }

    /// First failing attacker in registry order (the "failed hit").
    pub fn first_failure(&self) -> Option<Entity> {
        self.failed_attackers().next()
    }
}

/// Aggregate verdicts from all attackers that reported in.
pub fn arbitrate<I>(verdicts: I, config: &ParryConfig) -> Arbitration
where
    I: IntoIterator<Item = (Entity, ReachabilityVerdict)>,
{
    let verdicts: Vec<_> = verdicts.into_iter().collect();

    let mut any_fail = false;
    let mut any_out_of_reach = false;
    let mut any_in_range = false;

    for (_, verdict) in &verdicts {
        match verdict.verdict {
            Verdict::Fail => any_fail = true,
            Verdict::Success => any_in_range = true,
            Verdict::Miss => any_out_of_reach = true,
        }
    }

    let withdrawn = !any_fail && any_out_of_reach && config.force_resolve_out_of_range;
    let outcome = if any_fail || withdrawn {
        ParryOutcome::Fail
    } else {
        ParryOutcome::Success
    };

    Arbitration {
        outcome,
        any_attacker_in_range: any_in_range,
        withdrawn_by_out_of_range: withdrawn,
        verdicts,
    }
}
