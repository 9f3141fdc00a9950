//! Stateless validation errors.

use thiserror::Error;

use crate::{AssetId, ShareAmount};

/// Failure of a pure, ledger-independent check on an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fee amount {0} is negative")]
    NegativeFee(ShareAmount),

    #[error("invalid asset symbol '{0}'")]
    InvalidSymbol(String),

    #[error("amount {amount} out of range (0, {max}]")]
    AmountOutOfRange { amount: ShareAmount, max: ShareAmount },

    #[error("max supply {0} out of range")]
    MaxSupplyOutOfRange(ShareAmount),

    #[error("percent value {0} exceeds 100%")]
    PercentOutOfRange(i64),

    #[error("unknown bits 0x{0:04x} set in issuer permissions")]
    UnknownPermissionBits(u16),

    #[error("the global-settle bit is a permission, never a flag")]
    GlobalSettleFlagSet,

    #[error("witness-fed and committee-fed are mutually exclusive")]
    ConflictingFeedFlags,

    #[error("whitelist authorities present without the white-list flag")]
    WhitelistWithoutFlag,

    #[error("market {0} appears in both whitelist and blacklist")]
    MarketListOverlap(AssetId),

    #[error("price has an empty side or identical assets")]
    InvalidPrice,

    #[error("amount asset {amount_asset} matches neither price side ({base}/{quote})")]
    PriceAssetMismatch {
        amount_asset: AssetId,
        base: AssetId,
        quote: AssetId,
    },

    #[error("core exchange rate must resolve to {expected}, resolves to {actual}")]
    WrongExchangeRateTarget { expected: AssetId, actual: AssetId },

    #[error("asset precision {0} exceeds 12")]
    PrecisionTooLarge(u8),

    #[error("bitasset options required by the requested permissions")]
    BitassetOptionsRequired,

    #[error("prediction markets require the global-settle permission")]
    PredictionMarketNeedsGlobalSettle,

    #[error("new issuer equals the current issuer")]
    IssuerUnchanged,

    #[error("feed is missing a required price")]
    IncompleteFeed,

    #[error("feed prices disagree on the base asset")]
    FeedBaseMismatch,

    #[error("feed does not price asset {0}")]
    FeedForWrongAsset(AssetId),

    #[error("fee must be paid in {expected}, stated in {actual}")]
    WrongFeeAssetStated { expected: AssetId, actual: AssetId },

    #[error("issuance of the core asset is not permitted")]
    CoreAssetIssuance,

    #[error("minimum feed count must be positive")]
    NoMinimumFeeds,

    #[error("packed size measurement failed: {0}")]
    PackedSize(String),
}
