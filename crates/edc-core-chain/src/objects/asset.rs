//! Asset objects and their supply accounting.

use serde::{Deserialize, Serialize};

use edc_core_protocol::asset_flags::{OVERRIDE_AUTHORITY, TRANSFER_RESTRICTED};
use edc_core_protocol::operations::{AssetOptions, AssetParameters, BitassetOptions};
use edc_core_protocol::{AccountId, AssetId, PriceFeed, ShareAmount};

/// State specific to market-issued assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitassetData {
    pub options: BitassetOptions,
    pub is_prediction_market: bool,
    /// Last feed accepted by `asset_publish_feed`.
    pub current_feed: Option<PriceFeed>,
}

/// An asset definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: String,
    pub issuer: AccountId,
    /// Decimal places, at most 12.
    pub precision: u8,
    pub options: AssetOptions,
    pub params: AssetParameters,
    /// Present iff the asset is market-issued.
    pub bitasset: Option<BitassetData>,
}

impl Asset {
    pub fn is_market_issued(&self) -> bool {
        self.bitasset.is_some()
    }

    pub fn is_transfer_restricted(&self) -> bool {
        self.options.flags & TRANSFER_RESTRICTED != 0
    }

    pub fn can_override(&self) -> bool {
        self.options.flags & OVERRIDE_AUTHORITY != 0
    }
}

/// Mutable supply and fee accounting, one per asset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetDynamicData {
    /// Supply in circulation; never negative.
    pub current_supply: ShareAmount,
    /// Core backing the asset's fee payments (legacy, pre fee burning).
    pub fee_pool: ShareAmount,
    /// Fees collected in this asset under fee-pool accounting.
    pub accumulated_fees: ShareAmount,
    /// Total of this asset destroyed by burning transfers and burned fees.
    pub fee_burnt: ShareAmount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use edc_core_protocol::EDC_ASSET;

    #[test]
    fn test_flag_accessors() {
        let mut asset = Asset {
            id: EDC_ASSET,
            symbol: "EDC".to_string(),
            issuer: AccountId(0),
            precision: 5,
            options: AssetOptions::default(),
            params: AssetParameters::default(),
            bitasset: None,
        };
        assert!(!asset.can_override());
        assert!(!asset.is_transfer_restricted());
        assert!(!asset.is_market_issued());

        asset.options.flags = OVERRIDE_AUTHORITY | TRANSFER_RESTRICTED;
        assert!(asset.can_override());
        assert!(asset.is_transfer_restricted());
    }
}
