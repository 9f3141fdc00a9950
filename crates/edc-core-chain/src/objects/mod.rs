//! Ledger-owned entities.
//!
//! These objects live for the ledger's lifetime and are only reached
//! through typed identifiers plus a borrow against [`crate::LedgerState`].

mod account;
mod asset;
mod settings;

pub use account::{Account, AccountRank, AccountStatistics};
pub use asset::{Asset, AssetDynamicData, BitassetData};
pub use settings::{
    custom_fee, BlindTransfer2Record, FbaAccumulator, Settings, SettingsFee, WitnessesInfo,
};
