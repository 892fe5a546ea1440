//! Cross-contract client interfaces.
//!
//! Each contract only sees its collaborators through these traits; the
//! generated clients call functions by name, so the implementing contracts
//! need not implement the traits themselves.

#![allow(clippy::too_many_arguments)]

use crate::types::StrategyParams;
use soroban_sdk::{contractclient, Address, Env, Vec};

/// What the vault requires of a strategy.
#[contractclient(name = "StrategyClient")]
pub trait StrategyInterface {
    /// Asset the strategy works with; must equal the vault's token.
    fn want(e: Env) -> Address;

    /// Vault the strategy reports to.
    fn vault(e: Env) -> Address;

    /// Best estimate of everything the strategy controls, in `want`.
    fn estimated_total_assets(e: Env) -> i128;

    /// Vault-only. Sends up to `amount` of `want` back to the vault and
    /// returns the loss realized while freeing it.
    fn withdraw(e: Env, amount: i128) -> i128;

    /// Vault-only. Hands every asset over to `new_strategy`.
    fn migrate(e: Env, new_strategy: Address);
}

/// The vault surface used by strategies, the registry and wrappers.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn token(e: Env) -> Address;

    fn governance(e: Env) -> Address;

    fn management(e: Env) -> Address;

    fn strategies(e: Env, strategy: Address) -> StrategyParams;

    fn debt_outstanding(e: Env, strategy: Address) -> i128;

    fn report(e: Env, strategy: Address, gain: i128, loss: i128, debt_payment: i128) -> i128;

    fn revoke_strategy(e: Env, caller: Address, strategy: Address);

    fn deposit(e: Env, sender: Address, amount: i128, recipient: Address) -> i128;

    fn withdraw(
        e: Env,
        sender: Address,
        max_shares: i128,
        recipient: Address,
        max_loss_bps: u32,
    ) -> i128;

    fn balance_of(e: Env, owner: Address) -> i128;

    fn price_per_share(e: Env) -> i128;
}

/// Read side of the release registry.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn latest_vault(e: Env, token: Address) -> Address;

    fn all_vaults(e: Env, token: Address) -> Vec<Address>;
}
