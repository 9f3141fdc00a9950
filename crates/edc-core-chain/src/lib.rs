//! Consensus-critical operation evaluation for edc-core.
//!
//! This crate is the deterministic state-transition engine: it validates
//! and applies value-transfer operations (plain, blind, issuer-override)
//! and the asset-definition operations against a versioned ledger state.
//! Its output must be byte-identical on every node, at every replay, for
//! every historical block height.
//!
//! ## Structure
//!
//! - [`state`] — the ledger view the evaluators run against
//! - [`objects`] — ledger-owned entities (accounts, assets, singletons)
//! - [`hardfork`] — the timeline of rule activations and the [`hardfork::RuleSet`]
//!   resolved from a head block time
//! - [`policy`] — read-only whitelist/restriction predicates
//! - [`evaluator`] — the shared evaluate/apply life-cycle and fee settlement
//! - [`operations`] — the per-variant evaluators
//!
//! ## Two-phase protocol
//!
//! Every operation is first dry-run via `do_evaluate` against a shared
//! borrow of the state (no mutation is possible), then applied via
//! `do_apply`. A transaction clones the state, applies all of its
//! operations to the clone and commits it only when every one succeeds, so
//! rejected transactions never leave partial state behind.
//!
//! ```
//! use edc_core_chain::evaluator::{apply_transaction, TransactionEvaluationState};
//! use edc_core_chain::hardfork::HardforkSchedule;
//! use edc_core_chain::objects::Account;
//! use edc_core_chain::params::GlobalParameters;
//! use edc_core_chain::state::{seed_core_assets, LedgerState};
//! use edc_core_protocol::operations::TransferOperation;
//! use edc_core_protocol::{AccountId, AssetAmount, FeeSchedule, Operation, EDC_ASSET};
//!
//! let mut params = GlobalParameters::default();
//! params.fee_schedule = FeeSchedule::zeroed();
//! let mut state = LedgerState::new(HardforkSchedule::regtest(), params);
//! seed_core_assets(&mut state, AccountId(0));
//! state.insert_account(Account::new(AccountId(10), "alice"));
//! state.insert_account(Account::new(AccountId(11), "bob"));
//! state.adjust_balance(AccountId(10), AssetAmount::new(1_000, EDC_ASSET)).unwrap();
//!
//! let transfer = Operation::Transfer(TransferOperation {
//!     fee: AssetAmount::new(0, EDC_ASSET),
//!     from: AccountId(10),
//!     to: AccountId(11),
//!     amount: AssetAmount::new(250, EDC_ASSET),
//!     memo: None,
//! });
//! let results = apply_transaction(
//!     &mut state,
//!     &TransactionEvaluationState::default(),
//!     &[transfer],
//! ).unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(state.get_balance(AccountId(11), EDC_ASSET).amount, 250);
//! ```

mod error;
pub mod evaluator;
pub mod hardfork;
pub mod objects;
pub mod operations;
pub mod params;
pub mod policy;
pub mod state;

pub use error::{EvaluationError, Result};
pub use evaluator::{
    apply_transaction, start_evaluate, FeeState, OperationResult, TransactionEvaluationState,
};
pub use hardfork::{HardforkSchedule, RuleSet, Timestamp};
pub use state::LedgerState;
