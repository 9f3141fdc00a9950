//! Asset amounts, prices and feeds.

use serde::{Deserialize, Serialize};

use crate::{AssetId, Result, ShareAmount, ValidationError};

/// An amount of a specific asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetAmount {
    pub amount: ShareAmount,
    pub asset_id: AssetId,
}

impl AssetAmount {
    pub fn new(amount: ShareAmount, asset_id: AssetId) -> Self {
        Self { amount, asset_id }
    }

    /// Convert this amount through an exchange rate.
    ///
    /// The rate must quote this amount's asset on one side; the result is
    /// denominated in the other side's asset. Intermediate math is `i128`,
    /// truncating toward zero as the ledger always has.
    pub fn convert(&self, rate: &Price) -> Result<AssetAmount> {
        if self.asset_id == rate.base.asset_id {
            if rate.base.amount <= 0 {
                return Err(ValidationError::InvalidPrice);
            }
            let result =
                self.amount as i128 * rate.quote.amount as i128 / rate.base.amount as i128;
            Ok(AssetAmount::new(result as ShareAmount, rate.quote.asset_id))
        } else if self.asset_id == rate.quote.asset_id {
            if rate.quote.amount <= 0 {
                return Err(ValidationError::InvalidPrice);
            }
            let result =
                self.amount as i128 * rate.base.amount as i128 / rate.quote.amount as i128;
            Ok(AssetAmount::new(result as ShareAmount, rate.base.asset_id))
        } else {
            Err(ValidationError::PriceAssetMismatch {
                amount_asset: self.asset_id,
                base: rate.base.asset_id,
                quote: rate.quote.asset_id,
            })
        }
    }
}

/// An exchange rate between two assets, expressed as a ratio of amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    pub base: AssetAmount,
    pub quote: AssetAmount,
}

impl Price {
    pub fn new(base: AssetAmount, quote: AssetAmount) -> Self {
        Self { base, quote }
    }

    /// A default-constructed price carries no information.
    pub fn is_null(&self) -> bool {
        *self == Price::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.base.amount <= 0 || self.quote.amount <= 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if self.base.asset_id == self.quote.asset_id {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

/// A published price feed for a market-issued asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceFeed {
    /// Forced settlements execute at this price.
    pub settlement_price: Price,
    /// Rate used when the asset pays network fees.
    pub core_exchange_rate: Price,
    /// Collateral ratio required of borrowers, in percent scale.
    pub maintenance_collateral_ratio: u16,
    /// Margin-call ceiling ratio, in percent scale.
    pub maximum_short_squeeze_ratio: u16,
}

impl PriceFeed {
    /// Whether this feed prices the given asset.
    pub fn is_for(&self, asset_id: AssetId) -> bool {
        self.settlement_price.base.asset_id == asset_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CORE_ASSET, EDC_ASSET};

    #[test]
    fn test_convert_base_to_quote() {
        // 2 EDC per 1 CORE
        let rate = Price::new(
            AssetAmount::new(1, CORE_ASSET),
            AssetAmount::new(2, EDC_ASSET),
        );
        let fee = AssetAmount::new(100, EDC_ASSET).convert(&rate).unwrap();
        assert_eq!(fee, AssetAmount::new(50, CORE_ASSET));

        let back = AssetAmount::new(50, CORE_ASSET).convert(&rate).unwrap();
        assert_eq!(back, AssetAmount::new(100, EDC_ASSET));
    }

    #[test]
    fn test_convert_truncates() {
        let rate = Price::new(
            AssetAmount::new(3, CORE_ASSET),
            AssetAmount::new(10, EDC_ASSET),
        );
        // 7 * 3 / 10 = 2.1 -> 2
        let out = AssetAmount::new(7, EDC_ASSET).convert(&rate).unwrap();
        assert_eq!(out, AssetAmount::new(2, CORE_ASSET));
    }

    #[test]
    fn test_convert_rejects_foreign_asset() {
        let rate = Price::new(
            AssetAmount::new(1, CORE_ASSET),
            AssetAmount::new(2, EDC_ASSET),
        );
        assert!(AssetAmount::new(5, AssetId(9)).convert(&rate).is_err());
    }

    #[test]
    fn test_price_validate() {
        assert!(Price::default().validate().is_err());
        let good = Price::new(
            AssetAmount::new(1, CORE_ASSET),
            AssetAmount::new(2, EDC_ASSET),
        );
        assert!(good.validate().is_ok());
        let same_asset = Price::new(
            AssetAmount::new(1, EDC_ASSET),
            AssetAmount::new(2, EDC_ASSET),
        );
        assert!(same_asset.validate().is_err());
    }
}
