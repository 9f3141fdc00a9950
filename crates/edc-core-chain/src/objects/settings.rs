//! Chain-wide singletons and ledger records.

use serde::{Deserialize, Serialize};

use edc_core_protocol::{AccountId, AssetAmount, AssetId, Memo, ShareAmount, EDC_ASSET};

use crate::hardfork::Timestamp;

/// A custom-fee table entry: transfers fee-paying in `asset_id` are
/// charged `percent` of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFee {
    pub asset_id: AssetId,
    /// Percent-scale value (see `edc_core_protocol::PERCENT_100`).
    pub percent: i64,
}

/// Look up the custom fee entry for an asset.
pub fn custom_fee(list: &[SettingsFee], asset_id: AssetId) -> Option<&SettingsFee> {
    list.iter().find(|fee| fee.asset_id == asset_id)
}

/// Governance-controlled chain settings (singleton, id 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Custom percentage fees for plain transfers, by fee-paying asset.
    pub transfer_fees: Vec<SettingsFee>,
    /// Custom percentage fees for blind transfers, by amount asset.
    pub blind_transfer_fees: Vec<SettingsFee>,
    /// Fee charged for blind transfers when no custom entry applies.
    pub blind_transfer_default_fee: AssetAmount,
    /// Network-wide EDC daily transfer cap for limited accounts.
    pub edc_transfers_daily_limit: ShareAmount,
    /// Share of burned EDC fees rewarded to witnesses, percent scale.
    pub witness_fees_percent: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transfer_fees: Vec::new(),
            blind_transfer_fees: Vec::new(),
            blind_transfer_default_fee: AssetAmount::new(0, EDC_ASSET),
            edc_transfers_daily_limit: 0,
            witness_fees_percent: 0,
        }
    }
}

/// Witness fee-reward accumulator (singleton).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WitnessesInfo {
    pub witness_fees_reward_edc_amount: ShareAmount,
}

/// A fee-backed-asset bucket aggregating specific fees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FbaAccumulator {
    pub accumulated_fba_fees: ShareAmount,
    /// Bucket destination; an unconfigured bucket routes to plain fee
    /// payment instead.
    pub designated_asset: Option<AssetId>,
}

impl FbaAccumulator {
    pub fn is_configured(&self) -> bool {
        self.designated_asset.is_some()
    }
}

/// Immutable record of a completed blind transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindTransfer2Record {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    /// Fee actually charged, in its own asset.
    pub fee: AssetAmount,
    pub memo: Option<Memo>,
    pub datetime: Timestamp,
}
