//! Evaluation errors.
//!
//! Every assertion in the evaluators maps to one of these kinds, enriched
//! with the offending identifiers and amounts. Errors are never recovered
//! inside the core; they terminate the operation and the transaction
//! boundary discards all buffered state.

use thiserror::Error;

use edc_core_protocol::{AccountId, AssetId, ShareAmount, ValidationError};

/// Failure of a state-dependent evaluation or apply step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("fee must be paid in {expected}, operation states {actual}")]
    WrongFeeAsset { expected: AssetId, actual: AssetId },

    #[error("stated fee {stated} is below the required {required}")]
    WrongFeeAmount {
        required: ShareAmount,
        stated: ShareAmount,
    },

    #[error("'from' account {account} is not whitelisted for asset {asset}")]
    FromAccountNotWhitelisted { account: AccountId, asset: AssetId },

    #[error("'to' account {account} is not whitelisted for asset {asset}")]
    ToAccountNotWhitelisted { account: AccountId, asset: AssetId },

    #[error("'from' account {0} is restricted by committee")]
    FromAccountRestricted(AccountId),

    #[error("'to' account {0} is restricted by committee")]
    ToAccountRestricted(AccountId),

    #[error("asset {0} has the transfer-restricted flag enabled")]
    TransferRestrictedAsset(AssetId),

    #[error("insufficient balance: {account} holds {available} of {asset}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        asset: AssetId,
        available: ShareAmount,
        required: ShareAmount,
    },

    #[error("insufficient balance for fee: {account} holds {available} of {asset}, needs {required}")]
    InsufficientBalanceForFee {
        account: AccountId,
        asset: AssetId,
        available: ShareAmount,
        required: ShareAmount,
    },

    #[error("daily transfers limit exceeded: counter {counter} + amount {amount} vs limit {max}")]
    DailyLimitExceeded {
        counter: ShareAmount,
        amount: ShareAmount,
        max: ShareAmount,
    },

    #[error("cannot burn market-issued asset {0}")]
    BurnOfMarketIssuedAsset(AssetId),

    #[error("supply of {asset} is {current_supply}, cannot retire {required}")]
    InsufficientSupply {
        asset: AssetId,
        current_supply: ShareAmount,
        required: ShareAmount,
    },

    #[error("override transfer not permitted for asset {0}")]
    OverrideTransferNotPermitted(AssetId),

    #[error("operation actor {actual} is not the issuer {expected}")]
    WrongIssuer {
        expected: AccountId,
        actual: AccountId,
    },

    #[error("issuing {amount} of {asset} would exceed max supply {max} (current {current_supply})")]
    MaxSupplyExceeded {
        asset: AssetId,
        current_supply: ShareAmount,
        amount: ShareAmount,
        max: ShareAmount,
    },

    #[error("required singleton '{0}' does not exist")]
    MissingSingleton(&'static str),

    #[error("account {0} requires verification before transacting")]
    AccountRequiresVerification(AccountId),

    #[error("account {account} may not pay fees in unauthorized asset {asset}")]
    FeeAssetNotAuthorized { account: AccountId, asset: AssetId },

    #[error("symbol '{0}' already names an asset")]
    DuplicateSymbol(String),

    #[error("asset {0} is not market-issued")]
    NotMarketIssued(AssetId),

    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    #[error("asset {0} does not exist")]
    AssetNotFound(AssetId),

    /// Invariant violation in the apply phase; fatal, never expected after
    /// a successful evaluate.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for evaluation.
pub type Result<T> = std::result::Result<T, EvaluationError>;
