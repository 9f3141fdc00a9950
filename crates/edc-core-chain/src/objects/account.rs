//! Account objects.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use edc_core_protocol::{AccountId, ShareAmount};

/// Tier selecting a per-rank EDC fee percent.
///
/// Ordering matters: any tier above [`AccountRank::Default`] pays the
/// rank-based fee once that rule set is active.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AccountRank {
    #[default]
    Default,
    Tier1,
    Tier2,
    Tier3,
}

/// Fee-payment statistics attached to every account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountStatistics {
    /// Fees above the cashback vesting threshold, vesting over time.
    pub pending_fees: ShareAmount,
    /// Fees at or below the threshold, vested immediately.
    pub pending_vested_fees: ShareAmount,
    /// Lifetime total of core fees paid.
    pub lifetime_fees_paid: ShareAmount,
}

impl AccountStatistics {
    /// Record a paid core fee, splitting on the vesting threshold.
    pub fn pay_fee(&mut self, core_fee: ShareAmount, cashback_vesting_threshold: ShareAmount) {
        if core_fee > cashback_vesting_threshold {
            self.pending_fees += core_fee;
        } else {
            self.pending_vested_fees += core_fee;
        }
        self.lifetime_fees_paid += core_fee;
    }
}

/// An account object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub rank: AccountRank,
    /// Set by support while an account is under review; blocks fee payment.
    pub verification_is_required: bool,
    /// Incoming transfers destroy supply instead of crediting the balance.
    pub burning_mode_enabled: bool,
    /// Enforce the EDC daily transfer limit for this account.
    pub edc_limit_transfers_enabled: bool,
    /// Per-account override of the network-wide daily limit; 0 means none.
    pub edc_transfers_max_amount: ShareAmount,
    /// Amount transferred since the last external counter reset.
    pub edc_transfers_amount_counter: ShareAmount,
    /// Number of EDC transfers since the last reset.
    pub edc_transfers_count: u64,
    /// Lifetime EDC destroyed by transfers into burning accounts.
    pub edc_burnt: ShareAmount,
    pub statistics: AccountStatistics,
    /// Authorities that have whitelisted this account.
    pub whitelisting_accounts: BTreeSet<AccountId>,
    /// Authorities that have blacklisted this account.
    pub blacklisting_accounts: BTreeSet<AccountId>,
}

impl Account {
    /// A plain account with every policy knob off.
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rank: AccountRank::Default,
            verification_is_required: false,
            burning_mode_enabled: false,
            edc_limit_transfers_enabled: false,
            edc_transfers_max_amount: 0,
            edc_transfers_amount_counter: 0,
            edc_transfers_count: 0,
            edc_burnt: 0,
            statistics: AccountStatistics::default(),
            whitelisting_accounts: BTreeSet::new(),
            blacklisting_accounts: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(AccountRank::Tier1 > AccountRank::Default);
        assert!(AccountRank::Tier3 > AccountRank::Tier2);
    }

    #[test]
    fn test_pay_fee_splits_on_threshold() {
        let mut stats = AccountStatistics::default();
        stats.pay_fee(100, 1000);
        assert_eq!(stats.pending_vested_fees, 100);
        assert_eq!(stats.pending_fees, 0);

        stats.pay_fee(5000, 1000);
        assert_eq!(stats.pending_fees, 5000);
        assert_eq!(stats.lifetime_fees_paid, 5100);
    }
}
