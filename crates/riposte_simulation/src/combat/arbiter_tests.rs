//! Tests for parry arbitration.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::arbiter::arbitrate;
    use crate::combat::reachability::{ReachabilityVerdict, Verdict};
    use crate::combat::ParryOutcome;
    use crate::config::ParryConfig;

    fn verdict(v: Verdict) -> ReachabilityVerdict {
        ReachabilityVerdict {
            verdict: v,
            distance: 3.0,
            facing_dot: 1.0,
            time_to_arrival: None,
            residual_distance: None,
        }
    }

    fn entity(i: u32) -> Entity {
        Entity::from_raw(i)
    }

    #[test]
    fn test_zero_attackers_is_whiff_success() {
        let result = arbitrate(Vec::new(), &ParryConfig::default());
        assert_eq!(result.outcome, ParryOutcome::Success);
        assert!(!result.any_attacker_in_range);
        assert!(!result.is_counter_eligible());
    }

    #[test]
    fn test_single_fail_is_contagious() {
        let config = ParryConfig::default();
        // Fail at every position among N = 4 attackers
        for fail_at in 0..4 {
            let verdicts = (0..4).map(|i| {
                let v = if i == fail_at { Verdict::Fail } else { Verdict::Success };
                (entity(i), verdict(v))
            });
            let result = arbitrate(verdicts, &config);

            assert_eq!(result.outcome, ParryOutcome::Fail, "fail_at={fail_at}");
            assert_eq!(result.first_failure(), Some(entity(fail_at)));
            assert_eq!(result.parried_attackers().count(), 3);
            assert!(!result.is_counter_eligible());
        }
    }

    #[test]
    fn test_all_failures_reported() {
        let verdicts = vec![
            (entity(1), verdict(Verdict::Fail)),
            (entity(2), verdict(Verdict::Miss)),
            (entity(3), verdict(Verdict::Fail)),
        ];
        let result = arbitrate(verdicts, &ParryConfig::default());
        let failed: Vec<_> = result.failed_attackers().collect();
        assert_eq!(failed, vec![entity(1), entity(3)]);
    }

    #[test]
    fn test_success_in_range_is_counter_eligible() {
        let verdicts = vec![(entity(1), verdict(Verdict::Success))];
        let result = arbitrate(verdicts, &ParryConfig::default());
        assert_eq!(result.outcome, ParryOutcome::Success);
        assert!(result.any_attacker_in_range);
        assert!(result.is_counter_eligible());
    }

    #[test]
    fn test_miss_does_not_flip_success_by_default() {
        let verdicts = vec![
            (entity(1), verdict(Verdict::Success)),
            (entity(2), verdict(Verdict::Miss)),
        ];
        let result = arbitrate(verdicts, &ParryConfig::default());
        assert_eq!(result.outcome, ParryOutcome::Success);
        assert!(!result.withdrawn_by_out_of_range);
    }

    #[test]
    fn test_only_misses_is_whiff() {
        let verdicts = vec![(entity(1), verdict(Verdict::Miss))];
        let result = arbitrate(verdicts, &ParryConfig::default());
        assert_eq!(result.outcome, ParryOutcome::Success);
        assert!(!result.any_attacker_in_range);
    }

    #[test]
    fn test_forced_resolve_withdraws_success() {
        let config = ParryConfig {
            force_resolve_out_of_range: true,
            ..Default::default()
        };
        let verdicts = vec![
            (entity(1), verdict(Verdict::Success)),
            (entity(2), verdict(Verdict::Miss)),
        ];
        let result = arbitrate(verdicts, &config);

        assert_eq!(result.outcome, ParryOutcome::Fail);
        assert!(result.withdrawn_by_out_of_range);
        // Nobody actually landed a hit
        assert_eq!(result.failed_attackers().count(), 0);
    }
}
