//! Shared test helpers for test_strategy tests: a stand-in vault that
//! records reports instead of doing vault accounting.

#![cfg(test)]

use crate::{TestStrategy, TestStrategyClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};
use vault_common::interfaces::StrategyClient;
use vault_common::StrategyParams;

pub const START: u64 = 1_700_000_000;

#[contracttype]
#[derive(Clone)]
enum MockKey {
    Token,
    Governance,
    TotalDebt,
    Outstanding,
    LastReport,
    Revoked,
}

#[contract]
pub struct MockVault;

#[contractimpl]
impl MockVault {
    pub fn setup(e: Env, token: Address, governance: Address) {
        e.storage().instance().set(&MockKey::Token, &token);
        e.storage().instance().set(&MockKey::Governance, &governance);
    }

    pub fn set_debt(e: Env, total_debt: i128, outstanding: i128) {
        e.storage().instance().set(&MockKey::TotalDebt, &total_debt);
        e.storage().instance().set(&MockKey::Outstanding, &outstanding);
    }

    pub fn token(e: Env) -> Address {
        e.storage().instance().get(&MockKey::Token).unwrap()
    }

    pub fn governance(e: Env) -> Address {
        e.storage().instance().get(&MockKey::Governance).unwrap()
    }

    pub fn management(e: Env) -> Address {
        Self::governance(e)
    }

    pub fn strategies(e: Env, _strategy: Address) -> StrategyParams {
        StrategyParams {
            total_debt: e.storage().instance().get(&MockKey::TotalDebt).unwrap_or(0),
            ..StrategyParams::default()
        }
    }

    pub fn debt_outstanding(e: Env, _strategy: Address) -> i128 {
        e.storage().instance().get(&MockKey::Outstanding).unwrap_or(0)
    }

    /// Pulls what the strategy offers and remembers the figures.
    pub fn report(e: Env, strategy: Address, gain: i128, loss: i128, debt_payment: i128) -> i128 {
        strategy.require_auth();
        let me = e.current_contract_address();
        let token = TokenClient::new(&e, &Self::token(e.clone()));
        if gain + debt_payment > 0 {
            token.transfer_from(&me, &strategy, &me, &(gain + debt_payment));
        }
        e.storage()
            .instance()
            .set(&MockKey::LastReport, &(gain, loss, debt_payment));
        let outstanding = Self::debt_outstanding(e, strategy);
        (outstanding - debt_payment).max(0)
    }

    pub fn last_report(e: Env) -> (i128, i128, i128) {
        e.storage()
            .instance()
            .get(&MockKey::LastReport)
            .unwrap_or((0, 0, 0))
    }

    pub fn revoke_strategy(e: Env, caller: Address, _strategy: Address) {
        caller.require_auth();
        e.storage().instance().set(&MockKey::Revoked, &true);
    }

    pub fn revoked(e: Env) -> bool {
        e.storage().instance().get(&MockKey::Revoked).unwrap_or(false)
    }

    /// Asks the strategy for funds the way the real vault does.
    pub fn pull(e: Env, strategy: Address, amount: i128) -> i128 {
        StrategyClient::new(&e, &strategy).withdraw(&amount)
    }
}

pub struct StrategyTest<'a> {
    pub strategy: TestStrategyClient<'a>,
    pub strategy_id: Address,
    pub vault: MockVaultClient<'a>,
    pub vault_id: Address,
    pub token: TokenClient<'a>,
    pub asset_admin: StellarAssetClient<'a>,
    pub governance: Address,
    pub strategist: Address,
    pub keeper: Address,
    pub rewards: Address,
}

/// Deploys a token, a mock vault and a strategy bound to it.
pub fn setup(e: &Env) -> StrategyTest<'_> {
    e.mock_all_auths();
    e.ledger().with_mut(|li| li.timestamp = START);

    let issuer = Address::generate(e);
    let token_id = e.register_stellar_asset_contract_v2(issuer).address();
    let governance = Address::generate(e);

    let vault_id = e.register(MockVault, ());
    let vault = MockVaultClient::new(e, &vault_id);
    vault.setup(&token_id, &governance);

    let strategist = Address::generate(e);
    let keeper = Address::generate(e);
    let rewards = Address::generate(e);
    let strategy_id = e.register(TestStrategy, ());
    let strategy = TestStrategyClient::new(e, &strategy_id);
    strategy.initialize(&vault_id, &strategist, &rewards, &keeper);

    StrategyTest {
        strategy,
        strategy_id,
        vault,
        vault_id,
        token: TokenClient::new(e, &token_id),
        asset_admin: StellarAssetClient::new(e, &token_id),
        governance,
        strategist,
        keeper,
        rewards,
    }
}

/// Registers a second strategy on the same mock vault.
pub fn second_strategy<'a>(e: &'a Env, t: &StrategyTest<'a>) -> TestStrategyClient<'a> {
    let id = e.register(TestStrategy, ());
    let client = TestStrategyClient::new(e, &id);
    client.initialize(&t.vault_id, &t.strategist, &t.rewards, &t.keeper);
    client
}
