//! Chain-wide parameters.

use serde::{Deserialize, Serialize};

use edc_core_protocol::{FeeSchedule, ShareAmount};

use crate::objects::AccountRank;

/// Parameters shared by every evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalParameters {
    /// Core fees above this amount vest over time instead of instantly.
    pub cashback_vesting_threshold: ShareAmount,
    /// Per-rank EDC fee percents for the elevated tiers, percent scale.
    pub rank_fee_percents: [i64; 3],
    /// Base fees per operation.
    pub fee_schedule: FeeSchedule,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            cashback_vesting_threshold: 100_000,
            rank_fee_percents: [20, 10, 5],
            fee_schedule: FeeSchedule::default(),
        }
    }
}

impl GlobalParameters {
    /// The EDC fee percent charged to an account of the given rank;
    /// zero for the default rank.
    pub fn fee_edc_percent_by_rank(&self, rank: AccountRank) -> i64 {
        match rank {
            AccountRank::Default => 0,
            AccountRank::Tier1 => self.rank_fee_percents[0],
            AccountRank::Tier2 => self.rank_fee_percents[1],
            AccountRank::Tier3 => self.rank_fee_percents[2],
        }
    }
}
