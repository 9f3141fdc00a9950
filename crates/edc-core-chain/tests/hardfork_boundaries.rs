//! One test per hardfork gate: the documented rule change holds on both
//! sides of the activation time.

use edc_core_chain::evaluator::{start_evaluate, TransactionEvaluationState};
use edc_core_chain::hardfork::HardforkSchedule;
use edc_core_chain::objects::{Account, Asset, SettingsFee};
use edc_core_chain::params::GlobalParameters;
use edc_core_chain::state::{seed_core_assets, LedgerState};
use edc_core_chain::EvaluationError;
use edc_core_protocol::asset_flags::WHITE_LIST;
use edc_core_protocol::operations::{AssetOptions, AssetParameters, TransferOperation};
use edc_core_protocol::{
    AccountId, AssetAmount, AssetId, FeeSchedule, Operation, Price, CORE_ASSET, EDC_ASSET,
};

const COMMITTEE: AccountId = AccountId(0);
const ALICE: AccountId = AccountId(10);
const BOB: AccountId = AccountId(11);
const ASSET_X: AssetId = AssetId(2);

fn create_test_state(head_time: u64) -> LedgerState {
    let mut params = GlobalParameters::default();
    params.fee_schedule = FeeSchedule::zeroed();
    let mut state = LedgerState::new(HardforkSchedule::regtest(), params);
    seed_core_assets(&mut state, COMMITTEE);
    state.set_head_block_time(head_time);
    state.insert_account(Account::new(ALICE, "alice"));
    state.insert_account(Account::new(BOB, "bob"));
    state
}

/// An independent asset whose fee-paying asset is EDC (the default).
fn insert_asset_x(state: &mut LedgerState) {
    state.insert_asset(Asset {
        id: ASSET_X,
        symbol: "XTOKEN".to_string(),
        issuer: COMMITTEE,
        precision: 5,
        options: AssetOptions {
            core_exchange_rate: Price::new(
                AssetAmount::new(1, CORE_ASSET),
                AssetAmount::new(1, ASSET_X),
            ),
            ..AssetOptions::default()
        },
        params: AssetParameters::default(),
        bitasset: None,
    });
}

fn fund(state: &mut LedgerState, account: AccountId, amount: AssetAmount) {
    state.adjust_balance(account, amount).unwrap();
    state
        .asset_dynamic_data_mut(amount.asset_id)
        .unwrap()
        .current_supply += amount.amount;
}

#[test]
fn test_hf419_fee_asset_authorization() {
    let hf = HardforkSchedule::regtest();

    // EDC gated behind a whitelist alice is not on; fee stated in EDC,
    // amount moved in the open asset X
    let run = |head_time: u64| {
        let mut state = create_test_state(head_time);
        insert_asset_x(&mut state);
        {
            let edc = state.asset_mut(EDC_ASSET).unwrap();
            edc.options.flags |= WHITE_LIST;
            edc.options.whitelist_authorities.insert(COMMITTEE);
        }
        fund(&mut state, ALICE, AssetAmount::new(1_000, ASSET_X));
        fund(&mut state, ALICE, AssetAmount::new(100, EDC_ASSET));

        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(10, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(100, ASSET_X),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    // before the gate the unauthorized fee asset is tolerated
    run(hf.hf419 - 1).unwrap();

    assert!(matches!(
        run(hf.hf419 + 1),
        Err(EvaluationError::FeeAssetNotAuthorized { .. })
    ));
}

#[test]
fn test_hf620_fee_asset_binding() {
    let hf = HardforkSchedule::regtest();

    let run = |head_time: u64| {
        let mut state = create_test_state(head_time);
        fund(&mut state, ALICE, AssetAmount::new(1_000, EDC_ASSET));
        fund(&mut state, ALICE, AssetAmount::new(100, CORE_ASSET));

        // EDC transfers must pay fees in EDC; stating CORE breaks the rule
        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(10, CORE_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(100, EDC_ASSET),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    run(hf.hf620 - 1).unwrap();

    assert!(matches!(
        run(hf.hf620 + 1),
        Err(EvaluationError::WrongFeeAsset { .. })
    ));
}

#[test]
fn test_hf623_fee_settlement_switch() {
    let hf = HardforkSchedule::regtest();

    let run = |head_time: u64| {
        let mut state = create_test_state(head_time);
        fund(&mut state, ALICE, AssetAmount::new(1_000, EDC_ASSET));
        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(100, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(100, EDC_ASSET),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
        .unwrap();
        state
    };

    // classic fee-pool accounting before the gate
    let state = run(hf.hf623 - 1);
    let dyn_data = state.asset_dynamic_data(EDC_ASSET).unwrap();
    assert_eq!(dyn_data.accumulated_fees, 100);
    assert_eq!(dyn_data.fee_pool, -100);
    assert_eq!(dyn_data.fee_burnt, 0);
    assert_eq!(dyn_data.current_supply, 1_000);

    // burning after the gate
    let state = run(hf.hf623 + 1);
    let dyn_data = state.asset_dynamic_data(EDC_ASSET).unwrap();
    assert_eq!(dyn_data.accumulated_fees, 0);
    assert_eq!(dyn_data.fee_burnt, 100);
    assert_eq!(dyn_data.current_supply, 900);
}

#[test]
fn test_hf627_custom_fees_activate() {
    let hf = HardforkSchedule::regtest();

    let run = |head_time: u64| {
        let mut state = create_test_state(head_time);
        fund(&mut state, ALICE, AssetAmount::new(20_000, EDC_ASSET));
        state.settings_mut().unwrap().transfer_fees = vec![SettingsFee {
            asset_id: EDC_ASSET,
            percent: 100,
        }];

        // stated fee below the 1% custom fee
        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(1, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(10_000, EDC_ASSET),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    run(hf.hf627 - 1).unwrap();

    assert!(matches!(
        run(hf.hf627 + 1),
        Err(EvaluationError::WrongFeeAmount { .. })
    ));
}

#[test]
fn test_hf628_custom_fee_selection_key() {
    let hf = HardforkSchedule::regtest();

    // the table names only asset X; transfers move X and pay fees in EDC
    let run = |head_time: u64, stated_fee: i64| {
        let mut state = create_test_state(head_time);
        insert_asset_x(&mut state);
        fund(&mut state, ALICE, AssetAmount::new(20_000, ASSET_X));
        fund(&mut state, ALICE, AssetAmount::new(1_000, EDC_ASSET));
        state.settings_mut().unwrap().transfer_fees = vec![SettingsFee {
            asset_id: ASSET_X,
            percent: 100,
        }];

        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(stated_fee, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(10_000, ASSET_X),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    // between HF627 and HF628 the row is selected by the amount asset, so
    // the 1% fee on X applies
    assert!(matches!(
        run(hf.hf628 - 1, 1),
        Err(EvaluationError::WrongFeeAmount { .. })
    ));
    run(hf.hf628 - 1, 100).unwrap();

    // past HF628 selection keys on the fee-paying asset (EDC), which has
    // no row; no custom fee applies
    run(hf.hf628 + 1, 1).unwrap();
}

#[test]
fn test_hf631_counter_boundary() {
    let hf = HardforkSchedule::regtest();

    let run = |head_time: u64| {
        let mut state = create_test_state(head_time);
        fund(&mut state, ALICE, AssetAmount::new(1_000, EDC_ASSET));
        {
            let alice = state.account_mut(ALICE).unwrap();
            alice.edc_limit_transfers_enabled = true;
            alice.edc_transfers_max_amount = 100;
            alice.edc_transfers_amount_counter = 99;
        }
        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(0, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(1, EDC_ASSET),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    // strict comparison: 99 + 1 == 100 fails before the gate
    assert!(matches!(
        run(hf.hf631 - 1),
        Err(EvaluationError::DailyLimitExceeded { .. })
    ));
    run(hf.hf631 + 1).unwrap();
}

#[test]
fn test_hf636_rank_fees_and_burning_exemptions() {
    use edc_core_chain::objects::AccountRank;

    let hf = HardforkSchedule::regtest();

    let run = |head_time: u64, stated_fee: i64| {
        let mut state = create_test_state(head_time);
        fund(&mut state, ALICE, AssetAmount::new(20_000, EDC_ASSET));
        state.account_mut(ALICE).unwrap().rank = AccountRank::Tier1;

        let op = Operation::Transfer(TransferOperation {
            fee: AssetAmount::new(stated_fee, EDC_ASSET),
            from: ALICE,
            to: BOB,
            amount: AssetAmount::new(10_000, EDC_ASSET),
            memo: None,
        });
        start_evaluate(
            &mut state,
            &TransactionEvaluationState::default(),
            &op,
            true,
        )
    };

    // before the gate nothing charges the elevated rank
    run(hf.hf636 - 1, 0).unwrap();

    // at the gate (inclusive) the Tier1 percent (0.2% of 10_000 = 20) binds
    assert!(matches!(
        run(hf.hf636, 19),
        Err(EvaluationError::WrongFeeAmount { .. })
    ));
    run(hf.hf636, 20).unwrap();
}
