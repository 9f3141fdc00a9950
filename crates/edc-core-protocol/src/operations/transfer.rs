//! Value-transfer operations.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetAmount, Memo, Result, ValidationError};

/// Plain transfer of an asset between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOperation {
    /// Fee stated by the sender; checked against the schedule and any
    /// custom percentage fee at evaluation time.
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
}

impl TransferOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount.amount,
                max: crate::MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

/// Transfer recorded with a confidential memo; the charged fee is resolved
/// from the chain settings at evaluation time and may be denominated in a
/// different asset than the amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindTransfer2Operation {
    pub fee: AssetAmount,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
}

impl BlindTransfer2Operation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount.amount,
                max: crate::MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

/// Governance update of the default blind-transfer fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlindTransfer2SettingsOperation {
    pub fee: AssetAmount,
    pub payer: AccountId,
    /// New default fee, with its own asset.
    pub blind_fee: AssetAmount,
}

impl UpdateBlindTransfer2SettingsOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.blind_fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.blind_fee.amount));
        }
        Ok(())
    }
}

/// Forced movement of an asset by its issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTransferOperation {
    pub fee: AssetAmount,
    /// Must be the issuer of `amount.asset_id`.
    pub issuer: AccountId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: AssetAmount,
    pub memo: Option<Memo>,
}

impl OverrideTransferOperation {
    pub fn validate(&self) -> Result<()> {
        if self.fee.amount < 0 {
            return Err(ValidationError::NegativeFee(self.fee.amount));
        }
        if self.amount.amount <= 0 {
            return Err(ValidationError::AmountOutOfRange {
                amount: self.amount.amount,
                max: crate::MAX_SHARE_SUPPLY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetId, EDC_ASSET};

    fn transfer(amount: i64, fee: i64) -> TransferOperation {
        TransferOperation {
            fee: AssetAmount::new(fee, EDC_ASSET),
            from: AccountId(10),
            to: AccountId(11),
            amount: AssetAmount::new(amount, EDC_ASSET),
            memo: None,
        }
    }

    #[test]
    fn test_transfer_validate() {
        assert!(transfer(100, 1).validate().is_ok());
        assert!(matches!(
            transfer(100, -1).validate(),
            Err(ValidationError::NegativeFee(-1))
        ));
        assert!(transfer(0, 1).validate().is_err());
        assert!(transfer(-5, 1).validate().is_err());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let op = transfer(100, 1);
        assert_eq!(op.validate(), op.validate());
    }

    #[test]
    fn test_update_settings_validate() {
        let op = UpdateBlindTransfer2SettingsOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            payer: AccountId(1),
            blind_fee: AssetAmount::new(5, AssetId(2)),
        };
        assert!(op.validate().is_ok());

        let negative = UpdateBlindTransfer2SettingsOperation {
            blind_fee: AssetAmount::new(-5, AssetId(2)),
            ..op
        };
        assert!(negative.validate().is_err());
    }
}
