//! Issuer-override transfer evaluation.

use edc_core_protocol::operations::OverrideTransferOperation;
use edc_core_protocol::AssetAmount;

use crate::error::{EvaluationError, Result};
use crate::evaluator::OperationResult;
use crate::policy::{is_authorized_asset, Direction};
use crate::state::LedgerState;

/// Evaluator for [`OverrideTransferOperation`].
///
/// The issuer forcibly moves tokens out of an account. Only permitted on
/// assets carrying the override-authority flag, and only by their issuer.
#[derive(Debug, Default)]
pub struct OverrideTransferEvaluator;

impl OverrideTransferEvaluator {
    pub fn do_evaluate(&mut self, state: &LedgerState, op: &OverrideTransferOperation) -> Result<()> {
        let asset_type = state.asset(op.amount.asset_id)?;

        if !asset_type.can_override() {
            return Err(EvaluationError::OverrideTransferNotPermitted(
                op.amount.asset_id,
            ));
        }
        if asset_type.issuer != op.issuer {
            return Err(EvaluationError::WrongIssuer {
                expected: asset_type.issuer,
                actual: op.issuer,
            });
        }

        let from_account = state.account(op.from)?;
        let to_account = state.account(op.to)?;

        if !is_authorized_asset(to_account, asset_type) {
            return Err(EvaluationError::ToAccountNotWhitelisted {
                account: op.to,
                asset: op.amount.asset_id,
            });
        }
        if !is_authorized_asset(from_account, asset_type) {
            return Err(EvaluationError::FromAccountNotWhitelisted {
                account: op.from,
                asset: op.amount.asset_id,
            });
        }
        if !state.not_restricted_account(op.from, Direction::Payer) {
            return Err(EvaluationError::FromAccountRestricted(op.from));
        }
        if !state.not_restricted_account(op.to, Direction::Receiver) {
            return Err(EvaluationError::ToAccountRestricted(op.to));
        }

        let balance = state.get_balance(op.from, op.amount.asset_id).amount;
        if balance < op.amount.amount {
            return Err(EvaluationError::InsufficientBalance {
                account: op.from,
                asset: op.amount.asset_id,
                available: balance,
                required: op.amount.amount,
            });
        }

        if to_account.burning_mode_enabled {
            if asset_type.is_market_issued() {
                return Err(EvaluationError::BurnOfMarketIssuedAsset(op.amount.asset_id));
            }
            let supply = state.asset_dynamic_data(op.amount.asset_id)?.current_supply;
            if supply - op.amount.amount < 0 {
                return Err(EvaluationError::InsufficientSupply {
                    asset: op.amount.asset_id,
                    current_supply: supply,
                    required: op.amount.amount,
                });
            }
        }

        Ok(())
    }

    pub fn do_apply(
        &mut self,
        state: &mut LedgerState,
        op: &OverrideTransferOperation,
    ) -> Result<OperationResult> {
        let to_burning = state.account(op.to)?.burning_mode_enabled;

        state.adjust_balance(op.from, AssetAmount::new(-op.amount.amount, op.amount.asset_id))?;

        if !to_burning {
            state.adjust_balance(op.to, op.amount)?;
        } else {
            let dyn_data = state.asset_dynamic_data_mut(op.amount.asset_id)?;
            dyn_data.current_supply -= op.amount.amount;
            dyn_data.fee_burnt += op.amount.amount;
        }

        Ok(OperationResult::None)
    }
}
