//! Hardfork timeline and rule-set resolution.
//!
//! Rule changes activate at fixed timestamps. Evaluators never compare
//! against wall clock and never test individual gates inline; every
//! decision point reads the [`RuleSet`] resolved once per operation from
//! the head block time, so a given head time always selects the same rule
//! variants on every node and every replay.

use serde::{Deserialize, Serialize};

/// Block timestamp, seconds since the Unix epoch.
pub type Timestamp = u64;

/// The ordered timeline of named activation times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardforkSchedule {
    /// Fee asset must be whitelist-authorized for the payer.
    pub hf419: Timestamp,
    /// Fee-pool sufficiency check; named but its check stays disabled.
    pub hf616: Timestamp,
    /// Transfer fees must be stated in the amount asset's fee-paying asset.
    pub hf620: Timestamp,
    /// Fee burning replaces fee-pool accumulation.
    pub hf623: Timestamp,
    /// Custom percentage fees and EDC daily limits.
    pub hf627: Timestamp,
    /// Custom fee selected by fee-paying asset rather than amount asset.
    pub hf628: Timestamp,
    /// Daily-limit boundary becomes inclusive; blind transfers gain the
    /// daily limit.
    pub hf631: Timestamp,
    /// Rank-based EDC fees; burning destinations leave counters and fees.
    pub hf636: Timestamp,
}

impl HardforkSchedule {
    /// The production timeline.
    pub fn mainnet() -> Self {
        Self {
            hf419: 1_520_000_000,
            hf616: 1_545_000_000,
            hf620: 1_551_000_000,
            hf623: 1_556_000_000,
            hf627: 1_561_000_000,
            hf628: 1_564_000_000,
            hf631: 1_569_000_000,
            hf636: 1_577_000_000,
        }
    }

    /// Evenly spaced gates for tests: HF419 at `1_000`, each later gate
    /// another `1_000` after the previous.
    pub fn regtest() -> Self {
        Self {
            hf419: 1_000,
            hf616: 2_000,
            hf620: 3_000,
            hf623: 4_000,
            hf627: 5_000,
            hf628: 6_000,
            hf631: 7_000,
            hf636: 8_000,
        }
    }

    /// Resolve the rule set in force at `now`.
    ///
    /// Activation edges follow the ledger history: HF636 activates at its
    /// timestamp (`>=`), every other gate strictly after its own (`>`).
    pub fn rules_at(&self, now: Timestamp) -> RuleSet {
        RuleSet {
            fee_asset_must_be_authorized: now > self.hf419,
            fee_asset_is_bound_to_amount_asset: now > self.hf620,
            burn_fees: now > self.hf623,
            custom_fees_active: now > self.hf627,
            select_custom_fee_by_fee_asset: now > self.hf628,
            blind_daily_limit_active: now > self.hf631,
            counter_limit_inclusive: now > self.hf631,
            rank_fees_active: now >= self.hf636,
            burn_exemptions_active: now >= self.hf636,
        }
    }
}

/// The rule variants in force at one head block time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    /// `prepare_fee` requires the payer to be authorized for the fee asset.
    pub fee_asset_must_be_authorized: bool,
    /// Transfer fees must be stated in the configured fee-paying asset.
    pub fee_asset_is_bound_to_amount_asset: bool,
    /// Non-core fees are burned instead of accumulated against the pool.
    pub burn_fees: bool,
    /// Custom percentage fees and the EDC daily limit apply to transfers.
    pub custom_fees_active: bool,
    /// Custom fee rows are selected by the fee-paying asset's id.
    pub select_custom_fee_by_fee_asset: bool,
    /// Blind transfers enforce the EDC daily limit.
    pub blind_daily_limit_active: bool,
    /// Daily limit comparison admits hitting the cap exactly.
    pub counter_limit_inclusive: bool,
    /// Elevated ranks pay the per-rank EDC fee percent.
    pub rank_fees_active: bool,
    /// Transfers into burning accounts skip limits, counters and fees.
    pub burn_exemptions_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_are_ordered() {
        let hf = HardforkSchedule::mainnet();
        let times = [
            hf.hf419, hf.hf616, hf.hf620, hf.hf623, hf.hf627, hf.hf628, hf.hf631, hf.hf636,
        ];
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_strict_activation_edges() {
        let hf = HardforkSchedule::regtest();

        // strictly-after gates are inactive at their own timestamp
        assert!(!hf.rules_at(hf.hf627).custom_fees_active);
        assert!(hf.rules_at(hf.hf627 + 1).custom_fees_active);

        assert!(!hf.rules_at(hf.hf631).counter_limit_inclusive);
        assert!(hf.rules_at(hf.hf631 + 1).counter_limit_inclusive);
    }

    #[test]
    fn test_hf636_is_inclusive() {
        let hf = HardforkSchedule::regtest();
        assert!(!hf.rules_at(hf.hf636 - 1).rank_fees_active);
        assert!(hf.rules_at(hf.hf636).rank_fees_active);
        assert!(hf.rules_at(hf.hf636).burn_exemptions_active);
    }

    #[test]
    fn test_everything_active_far_in_the_future() {
        let rules = HardforkSchedule::mainnet().rules_at(u64::MAX);
        assert!(rules.fee_asset_must_be_authorized);
        assert!(rules.fee_asset_is_bound_to_amount_asset);
        assert!(rules.burn_fees);
        assert!(rules.custom_fees_active);
        assert!(rules.select_custom_fee_by_fee_asset);
        assert!(rules.blind_daily_limit_active);
        assert!(rules.counter_limit_inclusive);
        assert!(rules.rank_fees_active);
    }
}
