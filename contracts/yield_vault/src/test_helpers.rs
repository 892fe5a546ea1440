//! Shared test helpers for yield_vault tests.
//! Deploys a Stellar Asset token, the vault, and reference strategies.

#![cfg(test)]

use crate::{YieldVault, YieldVaultClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String};
use test_strategy::{TestStrategy, TestStrategyClient};

/// Ledger time every test starts at.
pub const START: u64 = 1_700_000_000;

pub const ONE_DAY: u64 = 86_400;

/// Default mint for depositors.
pub const DEFAULT_MINT: i128 = 1_000_000_000_000;

pub struct VaultTest<'a> {
    pub vault: YieldVaultClient<'a>,
    pub vault_id: Address,
    pub token: TokenClient<'a>,
    pub asset_admin: StellarAssetClient<'a>,
    pub governance: Address,
    pub management: Address,
    pub guardian: Address,
    pub rewards: Address,
}

pub struct StrategyHandle<'a> {
    pub client: TestStrategyClient<'a>,
    pub id: Address,
    pub strategist: Address,
    pub keeper: Address,
}

/// Vault with default fees and no deposit limit.
pub fn setup(e: &Env) -> VaultTest<'_> {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = START);

    let issuer = Address::generate(e);
    let token_id = e.register_stellar_asset_contract_v2(issuer).address();
    let t = deploy_vault(e, &token_id);
    t.vault.set_deposit_limit(&t.governance, &i128::MAX);
    t
}

/// Same as [`setup`] with both vault fees at zero.
pub fn setup_without_fees(e: &Env) -> VaultTest<'_> {
    let t = setup(e);
    t.vault.set_performance_fee(&t.governance, &0);
    t.vault.set_management_fee(&t.governance, &0);
    t
}

/// Deploys and initializes a vault over an existing token.
pub fn deploy_vault<'a>(e: &'a Env, token_id: &Address) -> VaultTest<'a> {
    let governance = Address::generate(e);
    let management = Address::generate(e);
    let guardian = Address::generate(e);
    let rewards = Address::generate(e);

    let vault_id = e.register(YieldVault, ());
    let vault = YieldVaultClient::new(e, &vault_id);
    vault.initialize(
        token_id,
        &governance,
        &rewards,
        &String::from_str(e, ""),
        &String::from_str(e, ""),
        &guardian,
    );
    vault.set_management(&governance, &management);

    VaultTest {
        vault,
        vault_id,
        token: TokenClient::new(e, token_id),
        asset_admin: StellarAssetClient::new(e, token_id),
        governance,
        management,
        guardian,
        rewards,
    }
}

/// Mints `amount` to `user` and approves the vault to pull it.
pub fn fund(e: &Env, t: &VaultTest, user: &Address, amount: i128) {
    t.asset_admin.mint(user, &amount);
    let expiry = e.ledger().sequence().saturating_add(10_000);
    t.token.approve(user, &t.vault_id, &amount, &expiry);
}

/// New depositor holding `amount` of the asset, vault pre-approved.
pub fn new_user(e: &Env, t: &VaultTest, amount: i128) -> Address {
    let user = Address::generate(e);
    fund(e, t, &user, amount);
    user
}

/// New user who has already deposited `amount`.
pub fn depositor(e: &Env, t: &VaultTest, amount: i128) -> Address {
    let user = new_user(e, t, amount);
    t.vault.deposit(&user, &amount, &user);
    user
}

/// Deploys a reference strategy bound to the vault without adding it.
pub fn deploy_strategy<'a>(e: &'a Env, vault_id: &Address) -> StrategyHandle<'a> {
    let strategist = Address::generate(e);
    let keeper = Address::generate(e);
    let id = e.register(TestStrategy, ());
    let client = TestStrategyClient::new(e, &id);
    client.initialize(vault_id, &strategist, &Address::generate(e), &keeper);
    StrategyHandle {
        client,
        id,
        strategist,
        keeper,
    }
}

/// Deploys a strategy and adds it with no per-harvest limits.
pub fn add_strategy<'a>(
    e: &'a Env,
    t: &VaultTest<'a>,
    debt_ratio: u32,
    performance_fee: u32,
) -> StrategyHandle<'a> {
    let s = deploy_strategy(e, &t.vault_id);
    t.vault.add_strategy(
        &t.governance,
        &s.id,
        &debt_ratio,
        &0,
        &i128::MAX,
        &performance_fee,
    );
    s
}

/// Simulates yield by minting straight to the strategy.
pub fn accrue(t: &VaultTest, s: &StrategyHandle, gain: i128) {
    t.asset_admin.mint(&s.id, &gain);
}

pub fn advance(e: &Env, seconds: u64) {
    e.ledger().with_mut(|li| li.timestamp += seconds);
}
