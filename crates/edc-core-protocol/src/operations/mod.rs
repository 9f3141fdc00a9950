//! The operation set.
//!
//! Each operation variant has its own struct with a pure `validate` and,
//! where the schedule charges more than a flat fee, content-dependent fee
//! inputs (symbol length, packed memo size). The [`Operation`] enum is the
//! dispatch surface the evaluators in `edc-core-chain` consume.

mod asset;
mod transfer;

pub use asset::{
    is_valid_symbol, AssetCreateOperation, AssetFundFeePoolOperation, AssetIssueOperation,
    AssetOptions, AssetParameters, AssetPublishFeedOperation, AssetReserveOperation,
    AssetUpdate2Operation, AssetUpdateOperation, BitassetOptions, BonusOperation,
    DailyIssueOperation, EdcAssetFundFeePoolOperation, ReferralIssueOperation,
};
pub use transfer::{
    BlindTransfer2Operation, OverrideTransferOperation, TransferOperation,
    UpdateBlindTransfer2SettingsOperation,
};

use serde::{Deserialize, Serialize};

use crate::{
    calculate_data_fee, packed_size, AccountId, AssetAmount, Result, ShareAmount, CORE_ASSET,
};

/// Every operation the evaluation core can process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Transfer(TransferOperation),
    BlindTransfer2(BlindTransfer2Operation),
    UpdateBlindTransfer2Settings(UpdateBlindTransfer2SettingsOperation),
    OverrideTransfer(OverrideTransferOperation),
    AssetCreate(AssetCreateOperation),
    AssetUpdate(AssetUpdateOperation),
    AssetUpdate2(AssetUpdate2Operation),
    AssetPublishFeed(AssetPublishFeedOperation),
    AssetIssue(AssetIssueOperation),
    DailyIssue(DailyIssueOperation),
    ReferralIssue(ReferralIssueOperation),
    Bonus(BonusOperation),
    AssetReserve(AssetReserveOperation),
    AssetFundFeePool(AssetFundFeePoolOperation),
    EdcAssetFundFeePool(EdcAssetFundFeePoolOperation),
}

impl Operation {
    /// Human-readable operation name, for logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transfer(_) => "transfer",
            Operation::BlindTransfer2(_) => "blind_transfer2",
            Operation::UpdateBlindTransfer2Settings(_) => "update_blind_transfer2_settings",
            Operation::OverrideTransfer(_) => "override_transfer",
            Operation::AssetCreate(_) => "asset_create",
            Operation::AssetUpdate(_) => "asset_update",
            Operation::AssetUpdate2(_) => "asset_update2",
            Operation::AssetPublishFeed(_) => "asset_publish_feed",
            Operation::AssetIssue(_) => "asset_issue",
            Operation::DailyIssue(_) => "daily_issue",
            Operation::ReferralIssue(_) => "referral_issue",
            Operation::Bonus(_) => "bonus",
            Operation::AssetReserve(_) => "asset_reserve",
            Operation::AssetFundFeePool(_) => "asset_fund_fee_pool",
            Operation::EdcAssetFundFeePool(_) => "edc_asset_fund_fee_pool",
        }
    }

    /// The account the fee is charged to.
    pub fn fee_payer(&self) -> AccountId {
        match self {
            Operation::Transfer(op) => op.from,
            Operation::BlindTransfer2(op) => op.from,
            Operation::UpdateBlindTransfer2Settings(op) => op.payer,
            Operation::OverrideTransfer(op) => op.issuer,
            Operation::AssetCreate(op) => op.issuer,
            Operation::AssetUpdate(op) => op.issuer,
            Operation::AssetUpdate2(op) => op.issuer,
            Operation::AssetPublishFeed(op) => op.publisher,
            Operation::AssetIssue(op) => op.issuer,
            Operation::DailyIssue(op) => op.issuer,
            Operation::ReferralIssue(op) => op.issuer,
            Operation::Bonus(op) => op.issuer,
            Operation::AssetReserve(op) => op.payer,
            Operation::AssetFundFeePool(op) => op.from_account,
            Operation::EdcAssetFundFeePool(op) => op.from_account,
        }
    }

    /// The fee stated in the operation.
    pub fn fee(&self) -> AssetAmount {
        match self {
            Operation::Transfer(op) => op.fee,
            Operation::BlindTransfer2(op) => op.fee,
            Operation::UpdateBlindTransfer2Settings(op) => op.fee,
            Operation::OverrideTransfer(op) => op.fee,
            Operation::AssetCreate(op) => op.fee,
            Operation::AssetUpdate(op) => op.fee,
            Operation::AssetUpdate2(op) => op.fee,
            Operation::AssetPublishFeed(op) => op.fee,
            Operation::AssetIssue(op) => op.fee,
            Operation::DailyIssue(op) => op.fee,
            Operation::ReferralIssue(op) => op.fee,
            Operation::Bonus(op) => op.fee,
            Operation::AssetReserve(op) => op.fee,
            Operation::AssetFundFeePool(op) => op.fee,
            Operation::EdcAssetFundFeePool(op) => op.fee,
        }
    }

    /// Run the stateless checks for this operation.
    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::Transfer(op) => op.validate(),
            Operation::BlindTransfer2(op) => op.validate(),
            Operation::UpdateBlindTransfer2Settings(op) => op.validate(),
            Operation::OverrideTransfer(op) => op.validate(),
            Operation::AssetCreate(op) => op.validate(),
            Operation::AssetUpdate(op) => op.validate(),
            Operation::AssetUpdate2(op) => op.validate(),
            Operation::AssetPublishFeed(op) => op.validate(),
            Operation::AssetIssue(op) => op.validate(),
            Operation::DailyIssue(op) => op.validate(),
            Operation::ReferralIssue(op) => op.validate(),
            Operation::Bonus(op) => op.validate(),
            Operation::AssetReserve(op) => op.validate(),
            Operation::AssetFundFeePool(op) => op.validate(),
            Operation::EdcAssetFundFeePool(op) => op.validate(),
        }
    }
}

/// Flat fee plus a per-kilobyte component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeWithDataCharge {
    pub fee: ShareAmount,
    pub price_per_kbyte: u64,
}

/// Symbol-length-tiered creation fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreateFeeParameters {
    pub symbol3: ShareAmount,
    pub symbol4: ShareAmount,
    pub long_symbol: ShareAmount,
    pub price_per_kbyte: u64,
}

/// Base fees for every operation, denominated in the core asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub transfer: FeeWithDataCharge,
    pub blind_transfer2: ShareAmount,
    pub update_blind_transfer2_settings: ShareAmount,
    pub override_transfer: FeeWithDataCharge,
    pub asset_create: AssetCreateFeeParameters,
    pub asset_update: FeeWithDataCharge,
    pub asset_publish_feed: ShareAmount,
    pub asset_issue: FeeWithDataCharge,
    pub asset_reserve: ShareAmount,
    pub asset_fund_fee_pool: ShareAmount,
}

/// Base units per whole coin at the default precision of 5.
const BLOCKCHAIN_PRECISION: ShareAmount = 100_000;

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            transfer: FeeWithDataCharge {
                fee: BLOCKCHAIN_PRECISION / 50,
                price_per_kbyte: 10,
            },
            blind_transfer2: BLOCKCHAIN_PRECISION / 50,
            update_blind_transfer2_settings: 0,
            override_transfer: FeeWithDataCharge {
                fee: BLOCKCHAIN_PRECISION / 50,
                price_per_kbyte: 10,
            },
            asset_create: AssetCreateFeeParameters {
                symbol3: 500_000 * BLOCKCHAIN_PRECISION,
                symbol4: 300_000 * BLOCKCHAIN_PRECISION,
                long_symbol: 5_000 * BLOCKCHAIN_PRECISION,
                price_per_kbyte: 10,
            },
            asset_update: FeeWithDataCharge {
                fee: BLOCKCHAIN_PRECISION,
                price_per_kbyte: 10,
            },
            asset_publish_feed: BLOCKCHAIN_PRECISION / 100,
            asset_issue: FeeWithDataCharge {
                fee: BLOCKCHAIN_PRECISION / 5,
                price_per_kbyte: 10,
            },
            asset_reserve: BLOCKCHAIN_PRECISION / 5,
            asset_fund_fee_pool: BLOCKCHAIN_PRECISION / 100,
        }
    }
}

impl FeeSchedule {
    /// A schedule that charges nothing; used by tests that pin exact
    /// balance arithmetic.
    pub fn zeroed() -> Self {
        Self {
            transfer: FeeWithDataCharge {
                fee: 0,
                price_per_kbyte: 0,
            },
            blind_transfer2: 0,
            update_blind_transfer2_settings: 0,
            override_transfer: FeeWithDataCharge {
                fee: 0,
                price_per_kbyte: 0,
            },
            asset_create: AssetCreateFeeParameters {
                symbol3: 0,
                symbol4: 0,
                long_symbol: 0,
                price_per_kbyte: 0,
            },
            asset_update: FeeWithDataCharge {
                fee: 0,
                price_per_kbyte: 0,
            },
            asset_publish_feed: 0,
            asset_issue: FeeWithDataCharge {
                fee: 0,
                price_per_kbyte: 0,
            },
            asset_reserve: 0,
            asset_fund_fee_pool: 0,
        }
    }

    /// Base fee for an operation, in core-asset units.
    ///
    /// Content-dependent components: memo-carrying operations pay per
    /// serialized kilobyte; asset creation is tiered by symbol length and
    /// pays per kilobyte of the whole operation (its option lists can be
    /// large).
    pub fn calculate_fee(&self, op: &Operation) -> Result<AssetAmount> {
        let amount = match op {
            Operation::Transfer(op) => {
                self.transfer.fee
                    + calculate_data_fee(packed_size(&op.memo)?, self.transfer.price_per_kbyte)
            }
            Operation::BlindTransfer2(_) => self.blind_transfer2,
            Operation::UpdateBlindTransfer2Settings(_) => self.update_blind_transfer2_settings,
            Operation::OverrideTransfer(op) => {
                self.override_transfer.fee
                    + calculate_data_fee(
                        packed_size(&op.memo)?,
                        self.override_transfer.price_per_kbyte,
                    )
            }
            Operation::AssetCreate(op) => {
                let tier = match op.symbol.len() {
                    3 => self.asset_create.symbol3,
                    4 => self.asset_create.symbol4,
                    _ => self.asset_create.long_symbol,
                };
                tier + calculate_data_fee(packed_size(op)?, self.asset_create.price_per_kbyte)
            }
            Operation::AssetUpdate(op) => {
                self.asset_update.fee
                    + calculate_data_fee(packed_size(op)?, self.asset_update.price_per_kbyte)
            }
            Operation::AssetUpdate2(_) => 0,
            Operation::AssetPublishFeed(_) => self.asset_publish_feed,
            Operation::AssetIssue(op) => {
                self.asset_issue.fee
                    + calculate_data_fee(packed_size(&op.memo)?, self.asset_issue.price_per_kbyte)
            }
            Operation::DailyIssue(_) | Operation::ReferralIssue(_) | Operation::Bonus(_) => 0,
            Operation::AssetReserve(_) => self.asset_reserve,
            Operation::AssetFundFeePool(_) | Operation::EdcAssetFundFeePool(_) => {
                self.asset_fund_fee_pool
            }
        };
        Ok(AssetAmount::new(amount, CORE_ASSET))
    }
}
