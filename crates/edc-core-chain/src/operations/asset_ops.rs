//! Evaluators for the asset-definition and supply operations.
//!
//! These are considerably simpler than the transfer family: most of the
//! heavy checking is the stateless validation that already ran, so the
//! evaluators only add existence, issuer and supply constraints.

use edc_core_protocol::operations::{
    AssetCreateOperation, AssetPublishFeedOperation, AssetReserveOperation,
};
use edc_core_protocol::{
    AccountId, AssetAmount, AssetId, Operation, ShareAmount, CORE_ASSET, EDC_ASSET,
};

use crate::error::{EvaluationError, Result};
use crate::evaluator::OperationResult;
use crate::objects::{Asset, BitassetData};
use crate::policy::is_authorized_asset;
use crate::state::LedgerState;

/// Dispatcher for the asset-operation variants.
pub struct AssetOpsEvaluator;

impl AssetOpsEvaluator {
    pub fn run(state: &mut LedgerState, op: &Operation, apply: bool) -> Result<OperationResult> {
        match op {
            Operation::AssetCreate(op) => {
                evaluate_create(state, op)?;
                if apply {
                    apply_create(state, op)?;
                }
            }
            Operation::AssetUpdate(op) => {
                evaluate_update(state, op.asset_to_update, op.issuer)?;
                if apply {
                    apply_update(state, op.asset_to_update, op.new_issuer, &op.new_options)?;
                }
            }
            Operation::AssetUpdate2(op) => {
                evaluate_update(state, op.asset_to_update, op.issuer)?;
                if apply {
                    apply_update(state, op.asset_to_update, op.new_issuer, &op.new_options)?;
                }
            }
            Operation::AssetPublishFeed(op) => {
                evaluate_publish_feed(state, op)?;
                if apply {
                    apply_publish_feed(state, op)?;
                }
            }
            Operation::AssetIssue(op) => {
                evaluate_issue(state, op.issuer, op.asset_to_issue, op.issue_to_account)?;
                if apply {
                    apply_issue(state, op.asset_to_issue, op.issue_to_account)?;
                }
            }
            Operation::DailyIssue(op) => {
                evaluate_issue(state, op.issuer, op.asset_to_issue, op.issue_to_account)?;
                if apply {
                    apply_issue(state, op.asset_to_issue, op.issue_to_account)?;
                }
            }
            Operation::ReferralIssue(op) => {
                evaluate_issue(state, op.issuer, op.asset_to_issue, op.issue_to_account)?;
                if apply {
                    apply_issue(state, op.asset_to_issue, op.issue_to_account)?;
                }
            }
            Operation::Bonus(op) => {
                evaluate_issue(state, op.issuer, op.asset_to_issue, op.issue_to_account)?;
                if apply {
                    apply_issue(state, op.asset_to_issue, op.issue_to_account)?;
                }
            }
            Operation::AssetReserve(op) => {
                evaluate_reserve(state, op)?;
                if apply {
                    apply_reserve(state, op)?;
                }
            }
            Operation::AssetFundFeePool(op) => {
                evaluate_fund_fee_pool(state, op.from_account, op.asset_id, op.amount, CORE_ASSET)?;
                if apply {
                    apply_fund_fee_pool(state, op.from_account, op.asset_id, op.amount, CORE_ASSET)?;
                }
            }
            Operation::EdcAssetFundFeePool(op) => {
                evaluate_fund_fee_pool(state, op.from_account, op.asset_id, op.amount, EDC_ASSET)?;
                if apply {
                    apply_fund_fee_pool(state, op.from_account, op.asset_id, op.amount, EDC_ASSET)?;
                }
            }
            _ => {
                return Err(EvaluationError::Internal(format!(
                    "operation '{}' routed to the asset evaluator",
                    op.name()
                )))
            }
        }
        Ok(OperationResult::None)
    }
}

fn evaluate_create(state: &LedgerState, op: &AssetCreateOperation) -> Result<()> {
    if state.find_asset_by_symbol(&op.symbol).is_some() {
        return Err(EvaluationError::DuplicateSymbol(op.symbol.clone()));
    }
    state.account(op.issuer)?;
    Ok(())
}

fn apply_create(state: &mut LedgerState, op: &AssetCreateOperation) -> Result<()> {
    let asset = Asset {
        id: state.next_asset_id(),
        symbol: op.symbol.clone(),
        issuer: op.issuer,
        precision: op.precision,
        options: op.common_options.clone(),
        params: op.params.clone(),
        bitasset: op.bitasset_opts.clone().map(|options| BitassetData {
            options,
            is_prediction_market: op.is_prediction_market,
            current_feed: None,
        }),
    };
    state.insert_asset(asset);
    Ok(())
}

fn evaluate_update(state: &LedgerState, asset_id: AssetId, actor: AccountId) -> Result<()> {
    let asset = state.asset(asset_id)?;
    if asset.issuer != actor {
        return Err(EvaluationError::WrongIssuer {
            expected: asset.issuer,
            actual: actor,
        });
    }
    Ok(())
}

fn apply_update(
    state: &mut LedgerState,
    asset_id: AssetId,
    new_issuer: Option<AccountId>,
    new_options: &edc_core_protocol::operations::AssetOptions,
) -> Result<()> {
    let asset = state.asset_mut(asset_id)?;
    asset.options = new_options.clone();
    if let Some(new_issuer) = new_issuer {
        asset.issuer = new_issuer;
    }
    Ok(())
}

fn evaluate_publish_feed(state: &LedgerState, op: &AssetPublishFeedOperation) -> Result<()> {
    let asset = state.asset(op.asset_id)?;
    if !asset.is_market_issued() {
        return Err(EvaluationError::NotMarketIssued(op.asset_id));
    }
    state.account(op.publisher)?;
    Ok(())
}

fn apply_publish_feed(state: &mut LedgerState, op: &AssetPublishFeedOperation) -> Result<()> {
    let asset = state.asset_mut(op.asset_id)?;
    let bitasset = asset
        .bitasset
        .as_mut()
        .ok_or_else(|| EvaluationError::Internal("bitasset data disappeared".into()))?;
    bitasset.current_feed = Some(op.feed);
    Ok(())
}

fn evaluate_issue(
    state: &LedgerState,
    issuer: AccountId,
    amount: AssetAmount,
    to_account: AccountId,
) -> Result<()> {
    let asset = state.asset(amount.asset_id)?;
    if asset.issuer != issuer {
        return Err(EvaluationError::WrongIssuer {
            expected: asset.issuer,
            actual: issuer,
        });
    }
    let receiver = state.account(to_account)?;
    if !is_authorized_asset(receiver, asset) {
        return Err(EvaluationError::ToAccountNotWhitelisted {
            account: to_account,
            asset: amount.asset_id,
        });
    }
    let dyn_data = state.asset_dynamic_data(amount.asset_id)?;
    if dyn_data.current_supply + amount.amount > asset.options.max_supply {
        return Err(EvaluationError::MaxSupplyExceeded {
            asset: amount.asset_id,
            current_supply: dyn_data.current_supply,
            amount: amount.amount,
            max: asset.options.max_supply,
        });
    }
    Ok(())
}

fn apply_issue(state: &mut LedgerState, amount: AssetAmount, to_account: AccountId) -> Result<()> {
    state.asset_dynamic_data_mut(amount.asset_id)?.current_supply += amount.amount;
    state.adjust_balance(to_account, amount)
}

fn evaluate_reserve(state: &LedgerState, op: &AssetReserveOperation) -> Result<()> {
    let asset = state.asset(op.amount_to_reserve.asset_id)?;
    if asset.is_market_issued() {
        return Err(EvaluationError::BurnOfMarketIssuedAsset(
            op.amount_to_reserve.asset_id,
        ));
    }
    state.account(op.payer)?;
    let balance = state
        .get_balance(op.payer, op.amount_to_reserve.asset_id)
        .amount;
    if balance < op.amount_to_reserve.amount {
        return Err(EvaluationError::InsufficientBalance {
            account: op.payer,
            asset: op.amount_to_reserve.asset_id,
            available: balance,
            required: op.amount_to_reserve.amount,
        });
    }
    Ok(())
}

fn apply_reserve(state: &mut LedgerState, op: &AssetReserveOperation) -> Result<()> {
    state.adjust_balance(
        op.payer,
        AssetAmount::new(-op.amount_to_reserve.amount, op.amount_to_reserve.asset_id),
    )?;
    state
        .asset_dynamic_data_mut(op.amount_to_reserve.asset_id)?
        .current_supply -= op.amount_to_reserve.amount;
    Ok(())
}

fn evaluate_fund_fee_pool(
    state: &LedgerState,
    from_account: AccountId,
    asset_id: AssetId,
    amount: ShareAmount,
    funding_asset: AssetId,
) -> Result<()> {
    state.asset(asset_id)?;
    state.account(from_account)?;
    let balance = state.get_balance(from_account, funding_asset).amount;
    if balance < amount {
        return Err(EvaluationError::InsufficientBalance {
            account: from_account,
            asset: funding_asset,
            available: balance,
            required: amount,
        });
    }
    Ok(())
}

fn apply_fund_fee_pool(
    state: &mut LedgerState,
    from_account: AccountId,
    asset_id: AssetId,
    amount: ShareAmount,
    funding_asset: AssetId,
) -> Result<()> {
    state.adjust_balance(from_account, AssetAmount::new(-amount, funding_asset))?;
    state.asset_dynamic_data_mut(asset_id)?.fee_pool += amount;
    Ok(())
}
