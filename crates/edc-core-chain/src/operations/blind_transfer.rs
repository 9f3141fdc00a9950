//! Blind transfer evaluation and its settings update.

use edc_core_protocol::operations::{
    BlindTransfer2Operation, UpdateBlindTransfer2SettingsOperation,
};
use edc_core_protocol::{percent_value, AssetAmount, EDC_ASSET};

use crate::error::{EvaluationError, Result};
use crate::evaluator::OperationResult;
use crate::objects::{custom_fee, AccountRank, BlindTransfer2Record};
use crate::policy::{is_authorized_asset, Direction};
use crate::state::LedgerState;

/// Evaluator for [`BlindTransfer2Operation`].
///
/// Unlike the plain transfer, the charged fee is an amount resolved from
/// the chain settings (default or percentage) and may live in a different
/// asset than the transfer itself. `do_apply` reports the fee actually
/// charged so the containing transaction can surface it.
#[derive(Debug, Default)]
pub struct BlindTransfer2Evaluator {
    /// Resolved fee, with its own asset.
    custom_fee: AssetAmount,
}

impl BlindTransfer2Evaluator {
    pub fn do_evaluate(&mut self, state: &LedgerState, op: &BlindTransfer2Operation) -> Result<()> {
        let rules = state.rules();
        let from_account = state.account(op.from)?;
        let to_account = state.account(op.to)?;
        let asset_type = state.asset(op.amount.asset_id)?;
        let asset_dyn_data = state.asset_dynamic_data(op.amount.asset_id)?;
        let settings = state.settings()?;

        if !is_authorized_asset(from_account, asset_type) {
            return Err(EvaluationError::FromAccountNotWhitelisted {
                account: op.from,
                asset: op.amount.asset_id,
            });
        }
        if !is_authorized_asset(to_account, asset_type) {
            return Err(EvaluationError::ToAccountNotWhitelisted {
                account: op.to,
                asset: op.amount.asset_id,
            });
        }
        if !state.not_restricted_account(op.from, Direction::Payer) {
            return Err(EvaluationError::FromAccountRestricted(op.from));
        }
        if !state.not_restricted_account(op.to, Direction::Receiver) {
            return Err(EvaluationError::ToAccountRestricted(op.to));
        }

        if asset_type.is_transfer_restricted()
            && from_account.id != asset_type.issuer
            && to_account.id != asset_type.issuer
        {
            return Err(EvaluationError::TransferRestrictedAsset(op.amount.asset_id));
        }

        // The daily limit reached blind transfers one gate later than
        // plain ones, with the inclusive comparison from the start.
        if rules.blind_daily_limit_active
            && op.amount.asset_id == EDC_ASSET
            && from_account.edc_limit_transfers_enabled
        {
            let burning_exempt = rules.burn_exemptions_active && to_account.burning_mode_enabled;
            if !burning_exempt {
                let max_amount = if from_account.edc_transfers_max_amount > 0 {
                    from_account.edc_transfers_max_amount
                } else {
                    settings.edc_transfers_daily_limit
                };
                let projected = from_account.edc_transfers_amount_counter + op.amount.amount;
                if max_amount < projected {
                    return Err(EvaluationError::DailyLimitExceeded {
                        counter: from_account.edc_transfers_amount_counter,
                        amount: op.amount.amount,
                        max: max_amount,
                    });
                }
            }
        }

        self.custom_fee = settings.blind_transfer_default_fee;
        state.asset(self.custom_fee.asset_id)?;

        if rules.custom_fees_active {
            if rules.rank_fees_active
                && asset_type.id == EDC_ASSET
                && from_account.rank > AccountRank::Default
                // burning operations pay no fee
                && !to_account.burning_mode_enabled
            {
                let percent = state.account_fee_edc_percent_by_rank(from_account);
                self.custom_fee =
                    AssetAmount::new(percent_value(op.amount.amount, percent), EDC_ASSET);
            } else if !rules.burn_exemptions_active || !to_account.burning_mode_enabled {
                if let Some(fee) = custom_fee(&settings.blind_transfer_fees, asset_type.id) {
                    self.custom_fee = AssetAmount::new(
                        percent_value(op.amount.amount, fee.percent),
                        fee.asset_id,
                    );
                }
            } else {
                // sent to a burning account once the exemptions are active
                self.custom_fee = AssetAmount::new(0, asset_type.id);
            }
            state.asset(self.custom_fee.asset_id)?;

            if op.amount.asset_id == self.custom_fee.asset_id {
                let balance = state.get_balance(op.from, op.amount.asset_id).amount;
                let required = op.amount.amount + self.custom_fee.amount;
                if balance < required {
                    return Err(EvaluationError::InsufficientBalance {
                        account: op.from,
                        asset: op.amount.asset_id,
                        available: balance,
                        required,
                    });
                }
            } else {
                let balance = state.get_balance(op.from, op.amount.asset_id).amount;
                if balance < op.amount.amount {
                    return Err(EvaluationError::InsufficientBalance {
                        account: op.from,
                        asset: op.amount.asset_id,
                        available: balance,
                        required: op.amount.amount,
                    });
                }
                let fee_balance = state.get_balance(op.from, self.custom_fee.asset_id).amount;
                if fee_balance < self.custom_fee.amount {
                    return Err(EvaluationError::InsufficientBalanceForFee {
                        account: op.from,
                        asset: self.custom_fee.asset_id,
                        available: fee_balance,
                        required: self.custom_fee.amount,
                    });
                }
            }

            if self.custom_fee.amount > 0 {
                if op.fee.amount < self.custom_fee.amount {
                    return Err(EvaluationError::WrongFeeAmount {
                        required: self.custom_fee.amount,
                        stated: op.fee.amount,
                    });
                }
                if op.fee.asset_id != self.custom_fee.asset_id {
                    return Err(EvaluationError::WrongFeeAsset {
                        expected: self.custom_fee.asset_id,
                        actual: op.fee.asset_id,
                    });
                }
            }
        } else {
            let balance = state.get_balance(op.from, op.amount.asset_id).amount;
            if balance < op.amount.amount {
                return Err(EvaluationError::InsufficientBalance {
                    account: op.from,
                    asset: op.amount.asset_id,
                    available: balance,
                    required: op.amount.amount,
                });
            }
            let fee_balance = state.get_balance(op.from, self.custom_fee.asset_id).amount;
            if fee_balance < self.custom_fee.amount {
                return Err(EvaluationError::InsufficientBalanceForFee {
                    account: op.from,
                    asset: self.custom_fee.asset_id,
                    available: fee_balance,
                    required: self.custom_fee.amount,
                });
            }
        }

        if to_account.burning_mode_enabled {
            if asset_type.is_market_issued() {
                return Err(EvaluationError::BurnOfMarketIssuedAsset(op.amount.asset_id));
            }
            let debit = op.amount.amount + self.custom_fee.amount;
            if asset_dyn_data.current_supply - debit < 0 {
                return Err(EvaluationError::InsufficientSupply {
                    asset: op.amount.asset_id,
                    current_supply: asset_dyn_data.current_supply,
                    required: debit,
                });
            }
        }

        Ok(())
    }

    pub fn do_apply(
        &mut self,
        state: &mut LedgerState,
        op: &BlindTransfer2Operation,
    ) -> Result<OperationResult> {
        let rules = state.rules();
        let to_burning = state.account(op.to)?.burning_mode_enabled;

        // amount
        state.adjust_balance(op.from, AssetAmount::new(-op.amount.amount, op.amount.asset_id))?;

        // before custom fees were folded into the generic fee machinery,
        // the blind fee was debited and burned here
        if !rules.custom_fees_active {
            if self.custom_fee.amount > 0 {
                state.adjust_balance(
                    op.from,
                    AssetAmount::new(-self.custom_fee.amount, self.custom_fee.asset_id),
                )?;
            }
            let fee_dyn_data = state.asset_dynamic_data_mut(self.custom_fee.asset_id)?;
            fee_dyn_data.current_supply -= self.custom_fee.amount;
            fee_dyn_data.fee_burnt += self.custom_fee.amount;
        }

        // edc daily transfers counter
        if rules.custom_fees_active && op.amount.asset_id == EDC_ASSET {
            let exempt = rules.burn_exemptions_active && to_burning;
            let from_account = state.account_mut(op.from)?;
            if !exempt {
                from_account.edc_transfers_amount_counter += op.amount.amount;
            }
            from_account.edc_transfers_count += 1;
        }

        if !to_burning {
            // normal accrual
            state.adjust_balance(op.to, op.amount)?;
        } else {
            let dyn_data = state.asset_dynamic_data_mut(op.amount.asset_id)?;
            dyn_data.current_supply -= op.amount.amount;
            dyn_data.fee_burnt += op.amount.amount;

            if rules.burn_exemptions_active && op.amount.asset_id == EDC_ASSET {
                state.account_mut(op.from)?.edc_burnt += op.amount.amount;
            }
        }

        let record = BlindTransfer2Record {
            from: op.from,
            to: op.to,
            amount: op.amount,
            fee: self.custom_fee,
            memo: op.memo.clone(),
            datetime: state.head_block_time(),
        };
        state.create_blind_transfer_record(record);

        Ok(OperationResult::Asset(self.custom_fee))
    }
}

/// Evaluator for [`UpdateBlindTransfer2SettingsOperation`].
pub struct UpdateBlindTransfer2SettingsEvaluator;

impl UpdateBlindTransfer2SettingsEvaluator {
    pub fn do_evaluate(
        &self,
        state: &LedgerState,
        _op: &UpdateBlindTransfer2SettingsOperation,
    ) -> Result<()> {
        state.settings()?;
        Ok(())
    }

    pub fn do_apply(
        &self,
        state: &mut LedgerState,
        op: &UpdateBlindTransfer2SettingsOperation,
    ) -> Result<OperationResult> {
        state.settings_mut()?.blind_transfer_default_fee = op.blind_fee;
        Ok(OperationResult::None)
    }
}
