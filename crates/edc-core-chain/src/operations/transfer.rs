//! Plain transfer evaluation.

use edc_core_protocol::operations::TransferOperation;
use edc_core_protocol::{percent_value, AssetAmount, ShareAmount, CORE_ASSET, EDC_ASSET};

use crate::error::{EvaluationError, Result};
use crate::evaluator::OperationResult;
use crate::objects::{custom_fee, AccountRank};
use crate::policy::{is_authorized_asset, Direction};
use crate::state::LedgerState;

/// Evaluator for [`TransferOperation`].
///
/// `do_evaluate` resolves the custom percentage fee (if any) and proves the
/// transfer admissible without touching the ledger; `do_apply` commits the
/// balance movement, burning and counters.
#[derive(Debug, Default)]
pub struct TransferEvaluator {
    /// Percentage fee in the amount asset, resolved during evaluation.
    custom_fee: ShareAmount,
}

impl TransferEvaluator {
    pub fn do_evaluate(&mut self, state: &LedgerState, op: &TransferOperation) -> Result<()> {
        let rules = state.rules();
        let from_account = state.account(op.from)?;
        let to_account = state.account(op.to)?;
        let asset_type = state.asset(op.amount.asset_id)?;
        let asset_dyn_data = state.asset_dynamic_data(op.amount.asset_id)?;

        // Units created before the fee-paying asset existed fall back to core.
        let fee_asset_type = state
            .find_asset(asset_type.params.fee_paying_asset)
            .unwrap_or(state.asset(CORE_ASSET)?);

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

        if rules.custom_fees_active {
            // EDC daily limit
            if op.amount.asset_id == EDC_ASSET && from_account.edc_limit_transfers_enabled {
                let burning_exempt =
                    rules.burn_exemptions_active && to_account.burning_mode_enabled;
                if !burning_exempt {
                    let max_amount = if from_account.edc_transfers_max_amount > 0 {
                        from_account.edc_transfers_max_amount
                    } else {
                        settings.edc_transfers_daily_limit
                    };
                    let projected = from_account.edc_transfers_amount_counter + op.amount.amount;
                    let limit_is_valid = if rules.counter_limit_inclusive {
                        max_amount >= projected
                    } else {
                        max_amount > projected
                    };
                    if !limit_is_valid {
                        return Err(EvaluationError::DailyLimitExceeded {
                            counter: from_account.edc_transfers_amount_counter,
                            amount: op.amount.amount,
                            max: max_amount,
                        });
                    }
                }
            }

            let fee_percent = if rules.select_custom_fee_by_fee_asset {
                if rules.rank_fees_active
                    && fee_asset_type.id == EDC_ASSET
                    && from_account.rank > AccountRank::Default
                    // burning operations pay no fee
                    && !to_account.burning_mode_enabled
                {
                    state.account_fee_edc_percent_by_rank(from_account)
                } else if !rules.burn_exemptions_active || !to_account.burning_mode_enabled {
                    custom_fee(&settings.transfer_fees, fee_asset_type.id)
                        .map(|fee| fee.percent)
                        .unwrap_or(0)
                } else {
                    0
                }
            } else {
                custom_fee(&settings.transfer_fees, asset_type.id)
                    .map(|fee| fee.percent)
                    .unwrap_or(0)
            };

            let balance = state.get_balance(op.from, op.amount.asset_id).amount;
            if fee_percent > 0 {
                self.custom_fee = percent_value(op.amount.amount, fee_percent);
                if balance < op.amount.amount + self.custom_fee {
                    return Err(EvaluationError::InsufficientBalance {
                        account: op.from,
                        asset: op.amount.asset_id,
                        available: balance,
                        required: op.amount.amount + self.custom_fee,
                    });
                }
            }

            if self.custom_fee > 0 && op.fee.amount < self.custom_fee {
                return Err(EvaluationError::WrongFeeAmount {
                    required: self.custom_fee,
                    stated: op.fee.amount,
                });
            }

            if fee_percent == 0 {
                // only the amount itself has to be covered
                if balance < op.amount.amount {
                    return Err(EvaluationError::InsufficientBalance {
                        account: op.from,
                        asset: op.amount.asset_id,
                        available: balance,
                        required: op.amount.amount,
                    });
                }
            }
        }

        if to_account.burning_mode_enabled {
            if asset_type.is_market_issued() {
                return Err(EvaluationError::BurnOfMarketIssuedAsset(op.amount.asset_id));
            }
            let debit = op.amount.amount + self.custom_fee;
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
        op: &TransferOperation,
    ) -> Result<OperationResult> {
        let rules = state.rules();
        let to_burning = state.account(op.to)?.burning_mode_enabled;

        state.adjust_balance(op.from, AssetAmount::new(-op.amount.amount, op.amount.asset_id))?;

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

        // edc daily transfers counter
        if rules.custom_fees_active && op.amount.asset_id == EDC_ASSET {
            let exempt = rules.burn_exemptions_active && to_burning;
            let from_account = state.account_mut(op.from)?;
            if !exempt {
                from_account.edc_transfers_amount_counter += op.amount.amount;
            }
            from_account.edc_transfers_count += 1;
        }

        Ok(OperationResult::None)
    }
}
