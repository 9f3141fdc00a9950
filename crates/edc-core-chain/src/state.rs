//! The in-memory ledger state.
//!
//! [`LedgerState`] is the concrete store the evaluators run against: typed
//! lookups by identifier, balance accounting, the chain singletons and the
//! head block time. It is `Clone`; the transaction boundary clones the
//! state, applies every operation of a transaction to the copy and commits
//! it only if all of them succeed, which is what makes rejected
//! transactions atomic.
//!
//! Everything in the state serializes deterministically (`BTreeMap` keys
//! are ordered), so [`LedgerState::state_hash`] yields the same digest for
//! the same logical state on every node.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use edc_core_protocol::{
    AccountId, AssetAmount, AssetId, ShareAmount, CORE_ASSET,
};

use crate::error::{EvaluationError, Result};
use crate::hardfork::{HardforkSchedule, RuleSet, Timestamp};
use crate::objects::{
    Account, Asset, AssetDynamicData, BlindTransfer2Record, FbaAccumulator, Settings,
    WitnessesInfo,
};
use crate::params::GlobalParameters;
use crate::policy::Direction;

/// The ledger view the evaluators mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    head_block_time: Timestamp,
    hardforks: HardforkSchedule,
    parameters: GlobalParameters,

    accounts: BTreeMap<AccountId, Account>,
    assets: BTreeMap<AssetId, Asset>,
    asset_dynamic: BTreeMap<AssetId, AssetDynamicData>,
    balances: BTreeMap<(AccountId, AssetId), ShareAmount>,

    settings: Option<Settings>,
    witnesses_info: WitnessesInfo,
    fba_accumulators: BTreeMap<u64, FbaAccumulator>,
    blind_transfer_records: Vec<BlindTransfer2Record>,

    /// Committee ban lists, by direction.
    restricted_payers: BTreeSet<AccountId>,
    restricted_receivers: BTreeSet<AccountId>,

    next_asset_id: u64,
}

impl LedgerState {
    /// An empty ledger; callers seed accounts, assets and settings.
    pub fn new(hardforks: HardforkSchedule, parameters: GlobalParameters) -> Self {
        Self {
            head_block_time: 0,
            hardforks,
            parameters,
            accounts: BTreeMap::new(),
            assets: BTreeMap::new(),
            asset_dynamic: BTreeMap::new(),
            balances: BTreeMap::new(),
            settings: None,
            witnesses_info: WitnessesInfo::default(),
            fba_accumulators: BTreeMap::new(),
            blind_transfer_records: Vec::new(),
            restricted_payers: BTreeSet::new(),
            restricted_receivers: BTreeSet::new(),
            next_asset_id: 0,
        }
    }

    // --- time and rules ---------------------------------------------------

    pub fn head_block_time(&self) -> Timestamp {
        self.head_block_time
    }

    pub fn set_head_block_time(&mut self, time: Timestamp) {
        self.head_block_time = time;
    }

    pub fn hardforks(&self) -> &HardforkSchedule {
        &self.hardforks
    }

    /// The rule set in force at the current head block time.
    pub fn rules(&self) -> RuleSet {
        self.hardforks.rules_at(self.head_block_time)
    }

    pub fn parameters(&self) -> &GlobalParameters {
        &self.parameters
    }

    /// The EDC fee percent a given account's rank selects.
    pub fn account_fee_edc_percent_by_rank(&self, account: &Account) -> i64 {
        self.parameters.fee_edc_percent_by_rank(account.rank)
    }

    // --- accounts ---------------------------------------------------------

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn find_account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn account(&self, id: AccountId) -> Result<&Account> {
        self.accounts
            .get(&id)
            .ok_or(EvaluationError::AccountNotFound(id))
    }

    pub fn account_mut(&mut self, id: AccountId) -> Result<&mut Account> {
        self.accounts
            .get_mut(&id)
            .ok_or(EvaluationError::AccountNotFound(id))
    }

    // --- assets -----------------------------------------------------------

    /// Register an asset and its zeroed dynamic data.
    ///
    /// The asset's id must be fresh; genesis seeding and the asset-create
    /// evaluator both allocate through [`LedgerState::next_asset_id`].
    pub fn insert_asset(&mut self, asset: Asset) {
        self.next_asset_id = self.next_asset_id.max(asset.id.0 + 1);
        self.asset_dynamic
            .insert(asset.id, AssetDynamicData::default());
        self.assets.insert(asset.id, asset);
    }

    /// The id the next created asset will take.
    pub fn next_asset_id(&self) -> AssetId {
        AssetId(self.next_asset_id)
    }

    pub fn find_asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    pub fn asset(&self, id: AssetId) -> Result<&Asset> {
        self.assets
            .get(&id)
            .ok_or(EvaluationError::AssetNotFound(id))
    }

    pub fn asset_mut(&mut self, id: AssetId) -> Result<&mut Asset> {
        self.assets
            .get_mut(&id)
            .ok_or(EvaluationError::AssetNotFound(id))
    }

    pub fn find_asset_by_symbol(&self, symbol: &str) -> Option<&Asset> {
        self.assets.values().find(|asset| asset.symbol == symbol)
    }

    pub fn asset_dynamic_data(&self, id: AssetId) -> Result<&AssetDynamicData> {
        self.asset_dynamic
            .get(&id)
            .ok_or(EvaluationError::AssetNotFound(id))
    }

    pub fn asset_dynamic_data_mut(&mut self, id: AssetId) -> Result<&mut AssetDynamicData> {
        self.asset_dynamic
            .get_mut(&id)
            .ok_or(EvaluationError::AssetNotFound(id))
    }

    // --- balances ---------------------------------------------------------

    pub fn get_balance(&self, account: AccountId, asset: AssetId) -> AssetAmount {
        let amount = self
            .balances
            .get(&(account, asset))
            .copied()
            .unwrap_or(0);
        AssetAmount::new(amount, asset)
    }

    /// Apply a signed balance delta, refusing to take a balance negative.
    pub fn adjust_balance(&mut self, account: AccountId, delta: AssetAmount) -> Result<()> {
        if delta.amount == 0 {
            return Ok(());
        }
        let entry = self.balances.entry((account, delta.asset_id)).or_insert(0);
        let updated = *entry + delta.amount;
        if updated < 0 {
            return Err(EvaluationError::InsufficientBalance {
                account,
                asset: delta.asset_id,
                available: *entry,
                required: -delta.amount,
            });
        }
        *entry = updated;
        Ok(())
    }

    // --- singletons and records -------------------------------------------

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = Some(settings);
    }

    pub fn settings(&self) -> Result<&Settings> {
        self.settings
            .as_ref()
            .ok_or(EvaluationError::MissingSingleton("settings"))
    }

    pub fn settings_mut(&mut self) -> Result<&mut Settings> {
        self.settings
            .as_mut()
            .ok_or(EvaluationError::MissingSingleton("settings"))
    }

    pub fn witnesses_info(&self) -> &WitnessesInfo {
        &self.witnesses_info
    }

    pub fn witnesses_info_mut(&mut self) -> &mut WitnessesInfo {
        &mut self.witnesses_info
    }

    pub fn set_fba_accumulator(&mut self, bucket: u64, fba: FbaAccumulator) {
        self.fba_accumulators.insert(bucket, fba);
    }

    pub fn fba_accumulator(&self, bucket: u64) -> Option<&FbaAccumulator> {
        self.fba_accumulators.get(&bucket)
    }

    pub fn fba_accumulator_mut(&mut self, bucket: u64) -> Option<&mut FbaAccumulator> {
        self.fba_accumulators.get_mut(&bucket)
    }

    pub fn create_blind_transfer_record(&mut self, record: BlindTransfer2Record) {
        self.blind_transfer_records.push(record);
    }

    pub fn blind_transfer_records(&self) -> &[BlindTransfer2Record] {
        &self.blind_transfer_records
    }

    // --- committee restrictions -------------------------------------------

    pub fn restrict_account(&mut self, account: AccountId, direction: Direction) {
        match direction {
            Direction::Payer => self.restricted_payers.insert(account),
            Direction::Receiver => self.restricted_receivers.insert(account),
        };
    }

    /// Committee ban list check, by direction.
    pub fn not_restricted_account(&self, account: AccountId, direction: Direction) -> bool {
        match direction {
            Direction::Payer => !self.restricted_payers.contains(&account),
            Direction::Receiver => !self.restricted_receivers.contains(&account),
        }
    }

    // --- diagnostics ------------------------------------------------------

    /// Render an amount with the asset's precision and symbol.
    pub fn to_pretty_string(&self, amount: AssetAmount) -> String {
        match self.find_asset(amount.asset_id) {
            Some(asset) => {
                let scale = 10i64.pow(u32::from(asset.precision));
                if scale <= 1 {
                    format!("{} {}", amount.amount, asset.symbol)
                } else {
                    format!(
                        "{}.{:0width$} {}",
                        amount.amount / scale,
                        (amount.amount % scale).abs(),
                        asset.symbol,
                        width = asset.precision as usize
                    )
                }
            }
            None => format!("{} [{}]", amount.amount, amount.asset_id),
        }
    }

    /// Digest of the full logical state.
    ///
    /// Used by tests to prove that rejected evaluations leave the view
    /// byte-identical.
    pub fn state_hash(&self) -> [u8; 32] {
        let bytes = bincode::serialize(self).expect("ledger state is always serializable");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hasher.finalize().into()
    }
}

/// Genesis-style seeding shared by tests and tools: the core and EDC
/// assets under a committee account, plus default settings.
pub fn seed_core_assets(state: &mut LedgerState, committee: AccountId) {
    use edc_core_protocol::operations::{AssetOptions, AssetParameters};
    use edc_core_protocol::{Price, EDC_ASSET};

    state.insert_account(Account::new(committee, "committee-account"));

    state.insert_asset(Asset {
        id: CORE_ASSET,
        symbol: "CORE".to_string(),
        issuer: committee,
        precision: 5,
        options: AssetOptions {
            core_exchange_rate: Price::new(
                AssetAmount::new(1, CORE_ASSET),
                AssetAmount::new(1, EDC_ASSET),
            ),
            ..AssetOptions::default()
        },
        params: AssetParameters {
            fee_paying_asset: CORE_ASSET,
            ..AssetParameters::default()
        },
        bitasset: None,
    });

    state.insert_asset(Asset {
        id: EDC_ASSET,
        symbol: "EDC".to_string(),
        issuer: committee,
        precision: 5,
        options: AssetOptions {
            core_exchange_rate: Price::new(
                AssetAmount::new(1, CORE_ASSET),
                AssetAmount::new(1, EDC_ASSET),
            ),
            ..AssetOptions::default()
        },
        params: AssetParameters::default(),
        bitasset: None,
    });

    state.set_settings(Settings::default());
}
