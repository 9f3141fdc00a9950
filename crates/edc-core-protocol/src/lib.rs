//! Protocol definitions for edc-core.
//!
//! This crate is the shared vocabulary of the chain: typed identifiers,
//! asset amounts and prices, the operation set, and everything about an
//! operation that can be checked without looking at ledger state.
//!
//! Nothing here touches the ledger. Stateless validation lives next to the
//! operation definitions (`Operation::validate`), base fees are computed by
//! the [`FeeSchedule`], and [`packed_size`] measures the deterministic
//! serialized size used for per-kilobyte fee proration. State-dependent
//! checks belong to the evaluators in `edc-core-chain`.

mod asset;
mod error;
mod ids;
mod memo;
pub mod operations;
mod pack;

pub use asset::{AssetAmount, Price, PriceFeed};
pub use error::ValidationError;
pub use ids::{AccountId, AssetId};
pub use memo::Memo;
pub use operations::{FeeSchedule, Operation};
pub use pack::packed_size;

/// Result type for pure validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Signed monetary quantity, in integer base units of some asset.
pub type ShareAmount = i64;

/// Ceiling on any asset supply or single amount.
pub const MAX_SHARE_SUPPLY: ShareAmount = 1_000_000_000_000_000;

/// The chain's native unit, the historical fee-accounting asset.
pub const CORE_ASSET: AssetId = AssetId(0);

/// The primary transactable and fee asset.
pub const EDC_ASSET: AssetId = AssetId(1);

/// Scale of stored percent values: a stored `10_000` is 100%.
pub const PERCENT_100: i64 = 10_000;

/// Asset symbol length bounds.
pub const MIN_ASSET_SYMBOL_LENGTH: usize = 3;
pub const MAX_ASSET_SYMBOL_LENGTH: usize = 16;

/// Issuer permission / flag bits.
///
/// `issuer_permissions` records which of these the issuer may enable;
/// `flags` records which are currently active.
pub mod asset_flags {
    /// Market trades in the asset pay the issuer's market fee.
    pub const CHARGE_MARKET_FEE: u16 = 0x01;
    /// Holders must be whitelisted by one of the asset's authorities.
    pub const WHITE_LIST: u16 = 0x02;
    /// The issuer may transfer the asset out of any account.
    pub const OVERRIDE_AUTHORITY: u16 = 0x04;
    /// Transfers require the issuer on one side.
    pub const TRANSFER_RESTRICTED: u16 = 0x08;
    /// Holders may not force-settle against the issuer.
    pub const DISABLE_FORCE_SETTLE: u16 = 0x10;
    /// Permission only, never a flag: allows global settlement.
    pub const GLOBAL_SETTLE: u16 = 0x20;
    /// Confidential (blinded) balances are disabled.
    pub const DISABLE_CONFIDENTIAL: u16 = 0x40;
    /// Price feeds come from active witnesses.
    pub const WITNESS_FED: u16 = 0x80;
    /// Price feeds come from the committee.
    pub const COMMITTEE_FED: u16 = 0x100;

    /// Every known permission bit.
    pub const ASSET_ISSUER_PERMISSION_MASK: u16 = 0x1ff;
    /// Permission bits meaningful for user-issued assets.
    pub const UIA_ASSET_ISSUER_PERMISSION_MASK: u16 = 0x7f;
}

/// `round(amount * percent / PERCENT_100)`, half away from zero.
///
/// All custom-fee percentages go through this; the widening to `i128`
/// keeps the product exact for any in-range `amount`.
pub fn percent_value(amount: ShareAmount, percent: i64) -> ShareAmount {
    let product = amount as i128 * percent as i128;
    let half = (PERCENT_100 as i128) / 2;
    let rounded = if product >= 0 {
        (product + half) / PERCENT_100 as i128
    } else {
        (product - half) / PERCENT_100 as i128
    };
    rounded as ShareAmount
}

/// Kilobyte-prorated data fee: `bytes * price_per_kbyte / 1024`.
pub fn calculate_data_fee(bytes: u64, price_per_kbyte: u64) -> ShareAmount {
    ((bytes as u128 * price_per_kbyte as u128) / 1024) as ShareAmount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_value_rounds_half_up() {
        // 1% of 10_000 units
        assert_eq!(percent_value(10_000, 100), 100);
        // 0.5% of 101 = 0.505 rounds to 1
        assert_eq!(percent_value(101, 50), 1);
        // 0.49 rounds down
        assert_eq!(percent_value(98, 50), 0);
        assert_eq!(percent_value(0, 100), 0);
    }

    #[test]
    fn test_percent_value_no_overflow_at_max_supply() {
        assert_eq!(
            percent_value(MAX_SHARE_SUPPLY, PERCENT_100),
            MAX_SHARE_SUPPLY
        );
    }

    #[test]
    fn test_data_fee_proration() {
        assert_eq!(calculate_data_fee(0, 10), 0);
        assert_eq!(calculate_data_fee(1024, 10), 10);
        assert_eq!(calculate_data_fee(512, 10), 5);
        // sub-kilobyte tails round down
        assert_eq!(calculate_data_fee(1023, 10), 9);
    }
}
