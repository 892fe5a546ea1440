//! Storage layout and typed accessors.
//!
//! Configuration and running totals live in instance storage as two structs
//! that are loaded and saved as a whole. Per-account and per-strategy records
//! live in persistent storage and are bumped on every touch.

use soroban_sdk::{contracttype, Address, Env, String, Vec};
use vault_common::{StrategyParams, VaultError};

pub(crate) const BUMP_THRESHOLD: u32 = 17_280;
pub(crate) const BUMP_TARGET: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Totals,
    Name,
    Symbol,
    PendingGovernance,
    WithdrawalQueue,
    Entered,
    Balance(Address),
    Allowance(Address, Address),
    Strategy(Address),
}

// ─── Vault state ─────────────────────────────────────────────────────────────

/// Roles and tunables set by governance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub token: Address,
    pub decimals: u32,
    pub governance: Address,
    pub management: Address,
    pub guardian: Address,
    pub rewards: Address,
    pub deposit_limit: i128,
    /// Vault performance fee on gains, bps.
    pub performance_fee: u32,
    /// Annual management fee on strategy debt, bps.
    pub management_fee: u32,
    /// Seconds over which freshly reported profit unlocks.
    pub locked_profit_degradation: u64,
    pub emergency_shutdown: bool,
}

/// Running accounting totals.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultTotals {
    pub total_supply: i128,
    /// Asset lent out to strategies.
    pub total_debt: i128,
    /// Asset held by the vault itself.
    pub total_idle: i128,
    /// Sum of strategy debt ratios, bps.
    pub debt_ratio: u32,
    /// Profit still unlocking, as of `last_report`.
    pub locked_profit: i128,
    pub last_report: u64,
    pub activation: u64,
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Config)
}

pub fn config(e: &Env) -> Result<VaultConfig, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_config(e: &Env, config: &VaultConfig) {
    e.storage().instance().set(&DataKey::Config, config);
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn totals(e: &Env) -> VaultTotals {
    e.storage()
        .instance()
        .get(&DataKey::Totals)
        .unwrap_or_default()
}

pub fn set_totals(e: &Env, totals: &VaultTotals) {
    e.storage().instance().set(&DataKey::Totals, totals);
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn name(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&DataKey::Name)
        .unwrap_or_else(|| String::from_str(e, ""))
}

pub fn symbol(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&DataKey::Symbol)
        .unwrap_or_else(|| String::from_str(e, ""))
}

pub fn set_metadata(e: &Env, name: &String, symbol: &String) {
    e.storage().instance().set(&DataKey::Name, name);
    e.storage().instance().set(&DataKey::Symbol, symbol);
}

pub fn pending_governance(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::PendingGovernance)
}

pub fn set_pending_governance(e: &Env, pending: &Address) {
    e.storage()
        .instance()
        .set(&DataKey::PendingGovernance, pending);
}

pub fn clear_pending_governance(e: &Env) {
    e.storage().instance().remove(&DataKey::PendingGovernance);
}

// ─── Strategies ──────────────────────────────────────────────────────────────

pub fn strategy(e: &Env, strategy: &Address) -> Option<StrategyParams> {
    let key = DataKey::Strategy(strategy.clone());
    let params: Option<StrategyParams> = e.storage().persistent().get(&key);
    if params.is_some() {
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    }
    params
}

/// Params of a strategy that has been added and not migrated away.
pub fn active_strategy(e: &Env, strategy: &Address) -> Result<StrategyParams, VaultError> {
    match self::strategy(e, strategy) {
        Some(params) if params.activation != 0 => Ok(params),
        _ => Err(VaultError::StrategyNotActive),
    }
}

pub fn set_strategy(e: &Env, strategy: &Address, params: &StrategyParams) {
    let key = DataKey::Strategy(strategy.clone());
    e.storage().persistent().set(&key, params);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn withdrawal_queue(e: &Env) -> Vec<Address> {
    e.storage()
        .instance()
        .get(&DataKey::WithdrawalQueue)
        .unwrap_or_else(|| Vec::new(e))
}

pub fn set_withdrawal_queue(e: &Env, queue: &Vec<Address>) {
    e.storage().instance().set(&DataKey::WithdrawalQueue, queue);
}

// ─── Share ledger ────────────────────────────────────────────────────────────

pub fn balance(e: &Env, owner: &Address) -> i128 {
    let key = DataKey::Balance(owner.clone());
    match e.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            amount
        }
        None => 0,
    }
}

pub fn set_balance(e: &Env, owner: &Address, amount: i128) {
    let key = DataKey::Balance(owner.clone());
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn allowance(e: &Env, owner: &Address, spender: &Address) -> i128 {
    e.storage()
        .persistent()
        .get(&DataKey::Allowance(owner.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(e: &Env, owner: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(owner.clone(), spender.clone());
    if amount == 0 {
        e.storage().persistent().remove(&key);
        return;
    }
    e.storage().persistent().set(&key, &amount);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

// ─── Reentrancy flag ─────────────────────────────────────────────────────────

pub fn is_entered(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Entered)
        .unwrap_or(false)
}

pub fn set_entered(e: &Env, entered: bool) {
    e.storage().instance().set(&DataKey::Entered, &entered);
}
