//! Asset definition and supply operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::asset_flags::{
    ASSET_ISSUER_PERMISSION_MASK, COMMITTEE_FED, DISABLE_FORCE_SETTLE, GLOBAL_SETTLE,
    UIA_ASSET_ISSUER_PERMISSION_MASK, WHITE_LIST, WITNESS_FED,
};
use crate::{
    AccountId, AssetAmount, AssetId, Memo, Price, PriceFeed, Result, ShareAmount, ValidationError,
    CORE_ASSET, EDC_ASSET, MAX_ASSET_SYMBOL_LENGTH, MAX_SHARE_SUPPLY, MIN_ASSET_SYMBOL_LENGTH,
    PERCENT_100,
};

/// Check an asset symbol against the grammar.
///
/// Symbols contain `[A-Z0-9]` and at most one `.`, start with an uppercase
/// letter, and are 3 to 16 characters long. A trailing-letter requirement
/// existed historically and is deliberately not enforced.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let len = symbol.chars().count();
    if len < MIN_ASSET_SYMBOL_LENGTH || len > MAX_ASSET_SYMBOL_LENGTH {
        return false;
    }

    let mut chars = symbol.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }

    let mut dot_already_present = false;
    for c in symbol.chars() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            continue;
        }
        if c == '.' {
            if dot_already_present {
                return false;
            }
            dot_already_present = true;
            continue;
        }
        return false;
    }

    true
}

/// Per-asset chain parameters embedded in every asset definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParameters {
    pub bonus_percent: i64,
    pub mining: bool,
    pub daily_bonus: bool,
    pub maturing_bonus_balance: bool,
    pub coin_maturing: bool,
    /// Minimum single transfer that counts toward bonus eligibility.
    pub mandatory_transfer: ShareAmount,
    /// Supply credited to the issuer at creation.
    pub premine: ShareAmount,
    /// Asset in which fees for transfers of this asset must be stated.
    pub fee_paying_asset: AssetId,
}

impl Default for AssetParameters {
    fn default() -> Self {
        Self {
            bonus_percent: 650,
            mining: true,
            daily_bonus: true,
            maturing_bonus_balance: true,
            coin_maturing: true,
            mandatory_transfer: 1000,
            premine: 0,
            fee_paying_asset: EDC_ASSET,
        }
    }
}

/// Options common to every asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// Hard cap on supply, at most [`MAX_SHARE_SUPPLY`].
    pub max_supply: ShareAmount,
    /// Market-trade fee taken for the issuer, in percent scale.
    pub market_fee_percent: u16,
    /// Cap on a single market fee.
    pub max_market_fee: ShareAmount,
    /// Bits the issuer is permitted to enable, within
    /// [`ASSET_ISSUER_PERMISSION_MASK`].
    pub issuer_permissions: u16,
    /// Bits currently active.
    pub flags: u16,
    /// Rate used to convert this asset to the core asset for fee payment.
    pub core_exchange_rate: Price,
    pub whitelist_authorities: BTreeSet<AccountId>,
    pub blacklist_authorities: BTreeSet<AccountId>,
    pub whitelist_markets: BTreeSet<AssetId>,
    pub blacklist_markets: BTreeSet<AssetId>,
    pub description: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            max_supply: MAX_SHARE_SUPPLY,
            market_fee_percent: 0,
            max_market_fee: MAX_SHARE_SUPPLY,
            issuer_permissions: UIA_ASSET_ISSUER_PERMISSION_MASK,
            flags: 0,
            core_exchange_rate: Price::default(),
            whitelist_authorities: BTreeSet::new(),
            blacklist_authorities: BTreeSet::new(),
            whitelist_markets: BTreeSet::new(),
            blacklist_markets: BTreeSet::new(),
            description: String::new(),
        }
    }
}

impl AssetOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_supply <= 0 || self.max_supply > MAX_SHARE_SUPPLY {
            return Err(ValidationError::MaxSupplyOutOfRange(self.max_supply));
        }
        if i64::from(self.market_fee_percent) > PERCENT_100 {
            return Err(ValidationError::PercentOutOfRange(i64::from(
                self.market_fee_percent,
            )));
        }
        if self.max_market_fee < 0 || self.max_market_fee > MAX_SHARE_SUPPLY {
            return Err(ValidationError::MaxSupplyOutOfRange(self.max_market_fee));
        }
        // No high bits whose meaning is not known.
        if self.issuer_permissions & !ASSET_ISSUER_PERMISSION_MASK != 0 {
            return Err(ValidationError::UnknownPermissionBits(
                self.issuer_permissions & !ASSET_ISSUER_PERMISSION_MASK,
            ));
        }
        // Global settlement is a permission, not a live flag.
        if self.flags & GLOBAL_SETTLE != 0 {
            return Err(ValidationError::GlobalSettleFlagSet);
        }
        if self.flags & (WITNESS_FED | COMMITTEE_FED) == (WITNESS_FED | COMMITTEE_FED) {
            return Err(ValidationError::ConflictingFeedFlags);
        }
        self.core_exchange_rate.validate()?;
        if self.core_exchange_rate.base.asset_id != CORE_ASSET
            && self.core_exchange_rate.quote.asset_id != CORE_ASSET
        {
            return Err(ValidationError::WrongExchangeRateTarget {
                expected: CORE_ASSET,
                actual: self.core_exchange_rate.base.asset_id,
            });
        }
        if (!self.whitelist_authorities.is_empty() || !self.blacklist_authorities.is_empty())
            && self.flags & WHITE_LIST == 0
        {
            return Err(ValidationError::WhitelistWithoutFlag);
        }
        for market in &self.whitelist_markets {
            if self.blacklist_markets.contains(market) {
                return Err(ValidationError::MarketListOverlap(*market));
            }
        }
        Ok(())
    }
}

/// Options specific to market-issued assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitassetOptions {
    pub feed_lifetime_sec: u32,
    pub minimum_feeds: u8,
    pub force_settlement_delay_sec: u32,
    pub force_settlement_offset_percent: u16,
    pub maximum_force_settlement_volume: u16,
    /// Asset collateralizing short positions.
    pub short_backing_asset: AssetId,
}

impl Default for BitassetOptions {
    fn default() -> Self {
        Self {
            feed_lifetime_sec: 60 * 60 * 24,
            minimum_feeds: 1,
            force_settlement_delay_sec: 60 * 60 * 24,
            force_settlement_offset_percent: 0,
            maximum_force_settlement_volume: 2000,
            short_backing_asset: CORE_ASSET,
        }
    }
}

impl BitassetOptions {
    pub fn validate(&self) -> Result<()> {
        if self.minimum_feeds == 0 {
            return Err(ValidationError::NoMinimumFeeds);
        }
        if i64::from(self.force_settlement_offset_percent) > PERCENT_100 {
            return Err(ValidationError::PercentOutOfRange(i64::from(
                self.force_settlement_offset_percent,
            )));
        }
        if i64::from(self.maximum_force_settlement_volume) > PERCENT_100 {
            return Err(ValidationError::PercentOutOfRange(i64::from(
                self.maximum_force_settlement_volume,
            )));
        }
        Ok(())
    }
}

/// Create a new asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreateOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub symbol: String,
    /// Decimal places, at most 12.
    pub precision: u8,
    pub common_options: AssetOptions,
    pub bitasset_opts: Option<BitassetOptions>,
    pub is_prediction_market: bool,
    pub params: AssetParameters,
}

impl AssetCreateOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if !is_valid_symbol(&self.symbol) {
            return Err(ValidationError::InvalidSymbol(self.symbol.clone()));
        }
        self.common_options.validate()?;
        if self.common_options.issuer_permissions & (DISABLE_FORCE_SETTLE | GLOBAL_SETTLE) != 0
            && self.bitasset_opts.is_none()
        {
            return Err(ValidationError::BitassetOptionsRequired);
        }
        if self.is_prediction_market {
            if self.bitasset_opts.is_none() {
                return Err(ValidationError::BitassetOptionsRequired);
            }
            if self.common_options.issuer_permissions & GLOBAL_SETTLE == 0 {
                return Err(ValidationError::PredictionMarketNeedsGlobalSettle);
            }
        }
        if let Some(bitasset) = &self.bitasset_opts {
            bitasset.validate()?;
        }

        // One core unit through the exchange rate must land in EDC; new
        // assets pay their fees there.
        let unit = AssetAmount::new(1, CORE_ASSET);
        let converted = unit.convert(&self.common_options.core_exchange_rate)?;
        if converted.asset_id != EDC_ASSET {
            return Err(ValidationError::WrongExchangeRateTarget {
                expected: EDC_ASSET,
                actual: converted.asset_id,
            });
        }
        if self.precision > 12 {
            return Err(ValidationError::PrecisionTooLarge(self.precision));
        }
        Ok(())
    }
}

fn validate_update_options(
    issuer: AccountId,
    asset_to_update: AssetId,
    new_issuer: Option<AccountId>,
    new_options: &AssetOptions,
    fee: &AssetAmount,
) -> Result<()> {
    if fee.amount < 0 {
        return Err(ValidationError::NegativeFee(fee.amount));
    }
    if let Some(new_issuer) = new_issuer {
        if new_issuer == issuer {
            return Err(ValidationError::IssuerUnchanged);
        }
    }
    new_options.validate()?;

    let unit = AssetAmount::new(1, asset_to_update);
    let converted = unit.convert(&new_options.core_exchange_rate)?;
    if converted.asset_id != CORE_ASSET {
        return Err(ValidationError::WrongExchangeRateTarget {
            expected: CORE_ASSET,
            actual: converted.asset_id,
        });
    }
    Ok(())
}

/// Update an asset's options and optionally hand it to a new issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdateOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_issuer: Option<AccountId>,
    pub new_options: AssetOptions,
}

impl AssetUpdateOperation {
    pub fn validate(&self) -> Result<()> {
        validate_update_options(
            self.issuer,
            self.asset_to_update,
            self.new_issuer,
            &self.new_options,
            &self.fee,
        )
    }
}

/// Fee-exempt variant of [`AssetUpdateOperation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpdate2Operation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_update: AssetId,
    pub new_issuer: Option<AccountId>,
    pub new_options: AssetOptions,
}

impl AssetUpdate2Operation {
    pub fn validate(&self) -> Result<()> {
        validate_update_options(
            self.issuer,
            self.asset_to_update,
            self.new_issuer,
            &self.new_options,
            &self.fee,
        )
    }
}

/// Publish a price feed for a market-issued asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPublishFeedOperation {
    pub fee: AssetAmount,
    pub publisher: AccountId,
    pub asset_id: AssetId,
    pub feed: PriceFeed,
}

impl AssetPublishFeedOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.feed.settlement_price.is_null() || self.feed.core_exchange_rate.is_null() {
            return Err(ValidationError::IncompleteFeed);
        }
        self.feed.settlement_price.validate()?;
        self.feed.core_exchange_rate.validate()?;
        if self.feed.settlement_price.base.asset_id != self.feed.core_exchange_rate.base.asset_id {
            return Err(ValidationError::FeedBaseMismatch);
        }
        if !self.feed.is_for(self.asset_id) {
            return Err(ValidationError::FeedForWrongAsset(self.asset_id));
        }
        Ok(())
    }
}

fn validate_issue_amount(amount: &AssetAmount) -> Result<()> {
    if amount.amount <= 0 || amount.amount > MAX_SHARE_SUPPLY {
        return Err(ValidationError::AmountOutOfRange {
            amount: amount.amount,
            max: MAX_SHARE_SUPPLY,
        });
    }
    if amount.asset_id == CORE_ASSET {
        return Err(ValidationError::CoreAssetIssuance);
    }
    Ok(())
}

/// Issue new supply to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIssueOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
    pub memo: Option<Memo>,
}

impl AssetIssueOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        validate_issue_amount(&self.asset_to_issue)
    }
}

/// Scheduled daily issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIssueOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
}

impl DailyIssueOperation {
    pub fn validate(&self) -> Result<()> {
        validate_issue_amount(&self.asset_to_issue)
    }
}

/// Issuance rewarding a referral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralIssueOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
}

impl ReferralIssueOperation {
    pub fn validate(&self) -> Result<()> {
        validate_issue_amount(&self.asset_to_issue)
    }
}

/// Maturity bonus issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusOperation {
    pub fee: AssetAmount,
    pub issuer: AccountId,
    pub asset_to_issue: AssetAmount,
    pub issue_to_account: AccountId,
}

impl BonusOperation {
    pub fn validate(&self) -> Result<()> {
        validate_issue_amount(&self.asset_to_issue)
    }
}

/// Retire supply from the payer's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReserveOperation {
    pub fee: AssetAmount,
    pub payer: AccountId,
    pub amount_to_reserve: AssetAmount,
}

impl AssetReserveOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.amount_to_reserve.amount <= 0 || self.amount_to_reserve.amount > MAX_SHARE_SUPPLY {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount_to_reserve.amount,
                max: MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

/// Fund an asset's legacy core fee pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFundFeePoolOperation {
    /// Must be stated in the core asset.
    pub fee: AssetAmount,
    pub from_account: AccountId,
    pub asset_id: AssetId,
    pub amount: ShareAmount,
}

impl AssetFundFeePoolOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.fee.asset_id != CORE_ASSET {
            return Err(ValidationError::WrongFeeAssetStated {
                expected: CORE_ASSET,
                actual: self.fee.asset_id,
            });
        }
        if self.amount <= 0 {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount,
                max: MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

/// Fund an asset's fee pool from EDC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdcAssetFundFeePoolOperation {
    /// Must be stated in EDC.
    pub fee: AssetAmount,
    pub from_account: AccountId,
    pub asset_id: AssetId,
    pub amount: ShareAmount,
}

impl EdcAssetFundFeePoolOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.fee.asset_id != EDC_ASSET {
            return Err(ValidationError::WrongFeeAssetStated {
                expected: EDC_ASSET,
                actual: self.fee.asset_id,
            });
        }
        if self.amount <= 0 {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount,
                max: MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edc_exchange_rate() -> Price {
        Price::new(
            AssetAmount::new(1, CORE_ASSET),
            AssetAmount::new(1, EDC_ASSET),
        )
    }

    fn create_test_options() -> AssetOptions {
        AssetOptions {
            core_exchange_rate: edc_exchange_rate(),
            ..AssetOptions::default()
        }
    }

    fn create_test_create_op(symbol: &str) -> AssetCreateOperation {
        AssetCreateOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            issuer: AccountId(5),
            symbol: symbol.to_string(),
            precision: 5,
            common_options: create_test_options(),
            bitasset_opts: None,
            is_prediction_market: false,
            params: AssetParameters::default(),
        }
    }

    #[test]
    fn test_symbol_grammar() {
        assert!(is_valid_symbol("EDC"));
        assert!(is_valid_symbol("ABC.DEF"));
        assert!(is_valid_symbol("A12"));
        // trailing digit allowed (the old trailing-letter rule is retired)
        assert!(is_valid_symbol("BTC2"));
        assert!(is_valid_symbol("A23456789012345B"));

        assert!(!is_valid_symbol("AB"));
        assert!(!is_valid_symbol("A234567890123456B"));
        assert!(!is_valid_symbol("1AB"));
        assert!(!is_valid_symbol(".AB"));
        assert!(!is_valid_symbol("A.B.C"));
        assert!(!is_valid_symbol("abc"));
        assert!(!is_valid_symbol("A-B"));
        assert!(!is_valid_symbol(""));
    }

    #[test]
    fn test_options_reject_unknown_permission_bits() {
        let mut options = create_test_options();
        options.issuer_permissions = 0x200;
        assert!(matches!(
            options.validate(),
            Err(ValidationError::UnknownPermissionBits(0x200))
        ));
    }

    #[test]
    fn test_options_reject_global_settle_flag() {
        let mut options = create_test_options();
        options.flags = GLOBAL_SETTLE;
        assert!(matches!(
            options.validate(),
            Err(ValidationError::GlobalSettleFlagSet)
        ));
    }

    #[test]
    fn test_options_reject_both_feed_sources() {
        let mut options = create_test_options();
        options.flags = WITNESS_FED | COMMITTEE_FED;
        assert!(options.validate().is_err());
        options.flags = WITNESS_FED;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_whitelist_requires_flag() {
        let mut options = create_test_options();
        options.whitelist_authorities.insert(AccountId(1));
        assert!(matches!(
            options.validate(),
            Err(ValidationError::WhitelistWithoutFlag)
        ));
        options.flags = WHITE_LIST;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_market_lists_must_not_overlap() {
        let mut options = create_test_options();
        options.whitelist_markets.insert(AssetId(7));
        options.blacklist_markets.insert(AssetId(7));
        assert!(matches!(
            options.validate(),
            Err(ValidationError::MarketListOverlap(AssetId(7)))
        ));
    }

    #[test]
    fn test_create_requires_edc_exchange_target() {
        let mut op = create_test_create_op("NEWCOIN");
        assert!(op.validate().is_ok());

        op.common_options.core_exchange_rate = Price::new(
            AssetAmount::new(1, CORE_ASSET),
            AssetAmount::new(1, AssetId(9)),
        );
        assert!(matches!(
            op.validate(),
            Err(ValidationError::WrongExchangeRateTarget { .. })
        ));
    }

    #[test]
    fn test_create_precision_bound() {
        let mut op = create_test_create_op("NEWCOIN");
        op.precision = 13;
        assert!(matches!(
            op.validate(),
            Err(ValidationError::PrecisionTooLarge(13))
        ));
    }

    #[test]
    fn test_create_prediction_market_couplings() {
        let mut op = create_test_create_op("BETS");
        op.is_prediction_market = true;
        assert!(matches!(
            op.validate(),
            Err(ValidationError::BitassetOptionsRequired)
        ));

        op.bitasset_opts = Some(BitassetOptions::default());
        assert!(matches!(
            op.validate(),
            Err(ValidationError::PredictionMarketNeedsGlobalSettle)
        ));

        op.common_options.issuer_permissions |= GLOBAL_SETTLE;
        assert!(op.validate().is_ok());
    }

    #[test]
    fn test_update_requires_core_exchange_target() {
        let asset = AssetId(9);
        let mut op = AssetUpdateOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            issuer: AccountId(5),
            asset_to_update: asset,
            new_issuer: None,
            new_options: AssetOptions {
                core_exchange_rate: Price::new(
                    AssetAmount::new(1, asset),
                    AssetAmount::new(1, CORE_ASSET),
                ),
                ..AssetOptions::default()
            },
        };
        assert!(op.validate().is_ok());

        op.new_issuer = Some(AccountId(5));
        assert!(matches!(
            op.validate(),
            Err(ValidationError::IssuerUnchanged)
        ));
    }

    #[test]
    fn test_issue_bounds() {
        let mut op = AssetIssueOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            issuer: AccountId(5),
            asset_to_issue: AssetAmount::new(1, EDC_ASSET),
            issue_to_account: AccountId(6),
            memo: None,
        };
        assert!(op.validate().is_ok());

        op.asset_to_issue.amount = 0;
        assert!(op.validate().is_err());
        op.asset_to_issue.amount = MAX_SHARE_SUPPLY + 1;
        assert!(op.validate().is_err());
        op.asset_to_issue = AssetAmount::new(1, CORE_ASSET);
        assert!(matches!(
            op.validate(),
            Err(ValidationError::CoreAssetIssuance)
        ));
    }

    #[test]
    fn test_fund_fee_pool_fee_assets() {
        let core_fund = AssetFundFeePoolOperation {
            fee: AssetAmount::new(0, CORE_ASSET),
            from_account: AccountId(5),
            asset_id: AssetId(9),
            amount: 100,
        };
        assert!(core_fund.validate().is_ok());

        let wrong = AssetFundFeePoolOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            ..core_fund
        };
        assert!(wrong.validate().is_err());

        let edc_fund = EdcAssetFundFeePoolOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            from_account: AccountId(5),
            asset_id: AssetId(9),
            amount: 100,
        };
        assert!(edc_fund.validate().is_ok());
    }

    #[test]
    fn test_publish_feed_validation() {
        let asset = AssetId(9);
        let settlement = Price::new(
            AssetAmount::new(10, asset),
            AssetAmount::new(1, CORE_ASSET),
        );
        let cer = Price::new(AssetAmount::new(10, asset), AssetAmount::new(2, CORE_ASSET));
        let mut op = AssetPublishFeedOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            publisher: AccountId(5),
            asset_id: asset,
            feed: PriceFeed {
                settlement_price: settlement,
                core_exchange_rate: cer,
                maintenance_collateral_ratio: 17500,
                maximum_short_squeeze_ratio: 15000,
            },
        };
        assert!(op.validate().is_ok());

        op.feed.core_exchange_rate = Price::default();
        assert!(matches!(
            op.validate(),
            Err(ValidationError::IncompleteFeed)
        ));

        op.feed.core_exchange_rate = Price::new(
            AssetAmount::new(10, AssetId(8)),
            AssetAmount::new(2, CORE_ASSET),
        );
        assert!(matches!(
            op.validate(),
            Err(ValidationError::FeedBaseMismatch)
        ));

        op.feed.core_exchange_rate = cer;
        op.asset_id = AssetId(8);
        assert!(matches!(
            op.validate(),
            Err(ValidationError::FeedForWrongAsset(_))
        ));
    }
}

#[cfg(test)]
mod symbol_properties {
    use super::is_valid_symbol;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn accepted_symbols_match_grammar(s in "[A-Z][A-Z0-9]{2,14}") {
            prop_assert!(is_valid_symbol(&s));
        }

        #[test]
        fn lowercase_never_accepted(s in "[a-z][a-z0-9]{2,14}") {
            prop_assert!(!is_valid_symbol(&s));
        }

        #[test]
        fn validity_is_stable(s in "\\PC{0,20}") {
            prop_assert_eq!(is_valid_symbol(&s), is_valid_symbol(&s));
        }

        #[test]
        fn at_most_one_dot(a in "[A-Z][A-Z0-9]{1,4}", b in "[A-Z0-9]{1,4}", c in "[A-Z0-9]{1,4}") {
            let two_dots = format!("{a}.{b}.{c}");
            prop_assert!(!is_valid_symbol(&two_dots));
        }
    }
}
