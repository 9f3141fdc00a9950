//! The shared evaluate/apply life-cycle.
//!
//! [`start_evaluate`] is the single entry point for one operation:
//!
//! 1. stateless validation of the operation,
//! 2. the fee-asset binding check for transfers,
//! 3. [`FeeState::prepare`] — payer resolution, fee authorization and the
//!    conversion of the stated fee into core units,
//! 4. the schedule minimum check,
//! 5. the variant evaluator's `do_evaluate`, a dry run against `&LedgerState`,
//! 6. when applying: `do_apply`, the payer debit, [`FeeState::convert_fee`]
//!    and [`FeeState::pay_fee`].
//!
//! `do_evaluate` cannot touch the ledger (it only holds a shared borrow),
//! so a rejected operation leaves the state byte-identical. Within one
//! transaction the caller is expected to clone the state up front and
//! commit the clone only if every operation succeeds; see
//! [`apply_transaction`].

use tracing::{debug, trace};

use edc_core_protocol::{
    AccountId, AssetAmount, Operation, ShareAmount, CORE_ASSET, EDC_ASSET,
};

use crate::error::{EvaluationError, Result};
use crate::operations::{
    AssetOpsEvaluator, BlindTransfer2Evaluator, OverrideTransferEvaluator, TransferEvaluator,
    UpdateBlindTransfer2SettingsEvaluator,
};
use crate::policy::{is_authorized_asset, Direction};
use crate::state::LedgerState;

/// Mutable context shared by the operations of one transaction.
#[derive(Debug, Clone, Default)]
pub struct TransactionEvaluationState {
    /// Skip fee conversion, payment and the payer debit.
    pub skip_fee: bool,
    /// Skip the schedule minimum-fee assertion.
    pub skip_fee_schedule_check: bool,
}

/// Outcome of one applied operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// Nothing beyond the state change itself.
    None,
    /// An asset produced by the operation (the blind-transfer fee charged).
    Asset(AssetAmount),
}

/// Fee bookkeeping resolved by `prepare_fee` and settled after apply.
#[derive(Debug, Clone)]
pub struct FeeState {
    /// The fee exactly as stated in the operation.
    pub fee_from_account: AssetAmount,
    /// The stated fee converted to core units.
    pub core_fee_paid: ShareAmount,
    pub fee_payer: AccountId,
}

impl FeeState {
    /// Resolve and vet the fee payer, then price the fee in core units.
    pub fn prepare(state: &LedgerState, account_id: AccountId, fee: AssetAmount) -> Result<Self> {
        if fee.amount < 0 {
            return Err(EvaluationError::Validation(
                edc_core_protocol::ValidationError::NegativeFee(fee.amount),
            ));
        }

        let rules = state.rules();
        let payer = state.account(account_id)?;
        let fee_asset = state.asset(fee.asset_id)?;
        // dynamic data must exist for the conversion path later
        state.asset_dynamic_data(fee.asset_id)?;

        if rules.fee_asset_must_be_authorized && !is_authorized_asset(payer, fee_asset) {
            return Err(EvaluationError::FeeAssetNotAuthorized {
                account: account_id,
                asset: fee.asset_id,
            });
        }

        if !state.not_restricted_account(account_id, Direction::Payer) {
            return Err(EvaluationError::FromAccountRestricted(account_id));
        }

        if payer.verification_is_required {
            return Err(EvaluationError::AccountRequiresVerification(account_id));
        }

        let core_fee_paid = if fee.asset_id == CORE_ASSET {
            fee.amount
        } else {
            let converted = fee.convert(&fee_asset.options.core_exchange_rate)?;
            if converted.asset_id != CORE_ASSET {
                return Err(EvaluationError::Internal(format!(
                    "core exchange rate of {} does not resolve to core",
                    fee_asset.id
                )));
            }
            converted.amount
            // The fee-pool sufficiency check once planned here stays
            // disabled; historical blocks rely on the permissive behavior.
        };

        Ok(Self {
            fee_from_account: fee,
            core_fee_paid,
            fee_payer: account_id,
        })
    }

    /// Settle a non-core fee against its asset's accounting.
    pub fn convert_fee(
        &self,
        state: &mut LedgerState,
        trx_state: &TransactionEvaluationState,
    ) -> Result<()> {
        if trx_state.skip_fee || self.fee_from_account.asset_id == CORE_ASSET {
            return Ok(());
        }

        let rules = state.rules();
        let fee = self.fee_from_account;
        if rules.burn_fees {
            let dyn_data = state.asset_dynamic_data_mut(fee.asset_id)?;
            dyn_data.current_supply -= fee.amount;
            dyn_data.fee_burnt += fee.amount;

            // witness fee reward
            let witness_fees_percent = state.settings()?.witness_fees_percent;
            if fee.asset_id == EDC_ASSET && witness_fees_percent > 0 {
                state.witnesses_info_mut().witness_fees_reward_edc_amount += fee.amount;
            }
        } else {
            let dyn_data = state.asset_dynamic_data_mut(fee.asset_id)?;
            dyn_data.accumulated_fees += fee.amount;
            dyn_data.fee_pool -= self.core_fee_paid;
        }
        Ok(())
    }

    /// Route the core fee through the payer's statistics.
    pub fn pay_fee(
        &self,
        state: &mut LedgerState,
        trx_state: &TransactionEvaluationState,
    ) -> Result<()> {
        if trx_state.skip_fee {
            return Ok(());
        }
        let threshold = state.parameters().cashback_vesting_threshold;
        let payer = state.account_mut(self.fee_payer)?;
        payer.statistics.pay_fee(self.core_fee_paid, threshold);
        Ok(())
    }

    /// Accrue the core fee to an fba bucket, falling back to plain fee
    /// payment when the bucket is not configured.
    pub fn pay_fba_fee(
        &self,
        state: &mut LedgerState,
        trx_state: &TransactionEvaluationState,
        bucket: u64,
    ) -> Result<()> {
        let configured = state
            .fba_accumulator(bucket)
            .map(|fba| fba.is_configured())
            .unwrap_or(false);
        if !configured {
            return self.pay_fee(state, trx_state);
        }
        let fba = state
            .fba_accumulator_mut(bucket)
            .ok_or_else(|| EvaluationError::Internal("fba bucket disappeared".into()))?;
        fba.accumulated_fba_fees += self.core_fee_paid;
        Ok(())
    }
}

/// Evaluate one operation and, when `apply` is set, commit its effects.
pub fn start_evaluate(
    state: &mut LedgerState,
    trx_state: &TransactionEvaluationState,
    op: &Operation,
    apply: bool,
) -> Result<OperationResult> {
    trace!(op = op.name(), apply, "evaluating operation");

    op.validate()?;

    // Transfers must state their fee in the amount asset's configured
    // fee-paying asset.
    if state.rules().fee_asset_is_bound_to_amount_asset {
        if let Operation::Transfer(transfer) = op {
            let should_pay_in = state.asset(transfer.amount.asset_id)?.params.fee_paying_asset;
            if transfer.fee.asset_id != should_pay_in {
                return Err(EvaluationError::WrongFeeAsset {
                    expected: should_pay_in,
                    actual: transfer.fee.asset_id,
                });
            }
        }
    }

    let fee_state = FeeState::prepare(state, op.fee_payer(), op.fee())?;

    if !trx_state.skip_fee_schedule_check {
        let required = state.parameters().fee_schedule.calculate_fee(op)?;
        if fee_state.core_fee_paid < required.amount {
            return Err(EvaluationError::WrongFeeAmount {
                required: required.amount,
                stated: fee_state.core_fee_paid,
            });
        }
    }

    let result = dispatch(state, op, apply)?;

    if apply && !trx_state.skip_fee {
        let fee = fee_state.fee_from_account;
        state.adjust_balance(fee_state.fee_payer, AssetAmount::new(-fee.amount, fee.asset_id))?;
        fee_state.convert_fee(state, trx_state)?;
        fee_state.pay_fee(state, trx_state)?;
    }

    if apply {
        debug!(op = op.name(), "operation applied");
    }
    Ok(result)
}

/// Run `do_evaluate` and optionally `do_apply` for the operation variant.
fn dispatch(state: &mut LedgerState, op: &Operation, apply: bool) -> Result<OperationResult> {
    match op {
        Operation::Transfer(op) => {
            let mut evaluator = TransferEvaluator::default();
            evaluator.do_evaluate(state, op)?;
            if apply {
                evaluator.do_apply(state, op)
            } else {
                Ok(OperationResult::None)
            }
        }
        Operation::BlindTransfer2(op) => {
            let mut evaluator = BlindTransfer2Evaluator::default();
            evaluator.do_evaluate(state, op)?;
            if apply {
                evaluator.do_apply(state, op)
            } else {
                Ok(OperationResult::None)
            }
        }
        Operation::UpdateBlindTransfer2Settings(op) => {
            let evaluator = UpdateBlindTransfer2SettingsEvaluator;
            evaluator.do_evaluate(state, op)?;
            if apply {
                evaluator.do_apply(state, op)
            } else {
                Ok(OperationResult::None)
            }
        }
        Operation::OverrideTransfer(op) => {
            let mut evaluator = OverrideTransferEvaluator::default();
            evaluator.do_evaluate(state, op)?;
            if apply {
                evaluator.do_apply(state, op)
            } else {
                Ok(OperationResult::None)
            }
        }
        _ => AssetOpsEvaluator::run(state, op, apply),
    }
}

/// Apply a whole transaction atomically.
///
/// Every operation is validated and applied against a clone of the state;
/// the clone replaces the original only if all of them succeed, so a
/// failing operation leaves no partial mutation behind. Returns the
/// per-operation results in order.
pub fn apply_transaction(
    state: &mut LedgerState,
    trx_state: &TransactionEvaluationState,
    operations: &[Operation],
) -> Result<Vec<OperationResult>> {
    let mut staged = state.clone();
    let mut results = Vec::with_capacity(operations.len());
    for op in operations {
        results.push(start_evaluate(&mut staged, trx_state, op, true)?);
    }
    *state = staged;
    Ok(results)
}
