use soroban_sdk::{contracttype, Address, Env, String};
use vault_common::VaultError;

pub(crate) const BUMP_THRESHOLD: u32 = 17_280;
pub(crate) const BUMP_TARGET: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Settings,
    Affiliate,
    PendingAffiliate,
    Vault,
    TotalSupply,
    Balance(Address),
    Allowance(Address, Address),
}

/// Fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub token: Address,
    pub registry: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Settings)
}

pub fn settings(e: &Env) -> Result<Settings, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_settings(e: &Env, settings: &Settings) {
    e.storage().instance().set(&DataKey::Settings, settings);
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn affiliate(e: &Env) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Affiliate)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_affiliate(e: &Env, affiliate: &Address) {
    e.storage().instance().set(&DataKey::Affiliate, affiliate);
}

pub fn pending_affiliate(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::PendingAffiliate)
}

pub fn set_pending_affiliate(e: &Env, pending: Option<&Address>) {
    match pending {
        Some(addr) => e.storage().instance().set(&DataKey::PendingAffiliate, addr),
        None => e.storage().instance().remove(&DataKey::PendingAffiliate),
    }
}

pub fn cached_vault(e: &Env) -> Option<Address> {
    e.storage().instance().get(&DataKey::Vault)
}

pub fn set_cached_vault(e: &Env, vault: &Address) {
    e.storage().instance().set(&DataKey::Vault, vault);
}

pub fn total_supply(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(e: &Env, supply: i128) {
    e.storage().instance().set(&DataKey::TotalSupply, &supply);
    e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);
}

pub fn balance(e: &Env, owner: &Address) -> i128 {
    let key = DataKey::Balance(owner.clone());
    match e.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            balance
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

/// A zero allowance removes the entry.
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
