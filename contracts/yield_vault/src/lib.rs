#![no_std]

//! Yield vault.
//!
//! Pools deposits of a single asset, mints shares that track the pool's
//! value, and lends the asset to a set of strategies under per-strategy debt
//! ratios. Strategies report gains and losses back through [`YieldVault::report`];
//! fresh profit is locked and released linearly so share price cannot be
//! sandwiched around a harvest.

use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};
use vault_common::math::sub_floor;
use vault_common::text;
use vault_common::{StrategyParams, VaultError};

mod access;
mod accounting;
mod config;
mod deposit;
mod events;
mod reentrancy;
mod report;
mod shares;
mod storage;
mod strategies;
mod withdraw;

pub use storage::{VaultConfig, VaultTotals};

use reentrancy::with_reentrancy_guard;

/// Release tag reported by [`YieldVault::api_version`].
pub const API_VERSION: &str = "0.4.6";

pub const DEFAULT_PERFORMANCE_FEE: u32 = 1_000;
pub const DEFAULT_MANAGEMENT_FEE: u32 = 200;
/// Six hours.
pub const DEFAULT_LOCKED_PROFIT_DEGRADATION: u64 = 21_600;

#[contract]
pub struct YieldVault;

#[contractimpl]
impl YieldVault {
    /// One-time setup. `governance` also becomes management. An empty `name`
    /// or `symbol` is derived from the asset's symbol.
    pub fn initialize(
        e: Env,
        token: Address,
        governance: Address,
        rewards: Address,
        name: String,
        symbol: String,
        guardian: Address,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&e) {
            return Err(VaultError::AlreadyInitialized);
        }
        governance.require_auth();

        let asset = TokenClient::new(&e, &token);
        let asset_symbol = asset.symbol();
        let name = if name.len() == 0 {
            text::concat(&e, "", &asset_symbol, " yVault")?
        } else {
            name
        };
        let symbol = if symbol.len() == 0 {
            text::concat(&e, "yv", &asset_symbol, "")?
        } else {
            symbol
        };

        let config = VaultConfig {
            token,
            decimals: asset.decimals(),
            governance: governance.clone(),
            management: governance,
            guardian,
            rewards,
            deposit_limit: 0,
            performance_fee: DEFAULT_PERFORMANCE_FEE,
            management_fee: DEFAULT_MANAGEMENT_FEE,
            locked_profit_degradation: DEFAULT_LOCKED_PROFIT_DEGRADATION,
            emergency_shutdown: false,
        };
        let now = e.ledger().timestamp();
        let totals = VaultTotals {
            activation: now,
            last_report: now,
            ..VaultTotals::default()
        };
        storage::set_config(&e, &config);
        storage::set_totals(&e, &totals);
        storage::set_metadata(&e, &name, &symbol);
        Ok(())
    }

    pub fn api_version(e: Env) -> String {
        String::from_str(&e, API_VERSION)
    }

    // ─── Deposits & withdrawals ──────────────────────────────────────────

    pub fn deposit(
        e: Env,
        sender: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, VaultError> {
        sender.require_auth();
        with_reentrancy_guard(&e, || deposit::deposit(&e, &sender, amount, &recipient))
    }

    pub fn withdraw(
        e: Env,
        sender: Address,
        max_shares: i128,
        recipient: Address,
        max_loss_bps: u32,
    ) -> Result<i128, VaultError> {
        sender.require_auth();
        with_reentrancy_guard(&e, || {
            withdraw::withdraw(&e, &sender, max_shares, &recipient, max_loss_bps)
        })
    }

    // ─── Share token ─────────────────────────────────────────────────────

    pub fn name(e: Env) -> String {
        storage::name(&e)
    }

    pub fn symbol(e: Env) -> String {
        storage::symbol(&e)
    }

    pub fn decimals(e: Env) -> Result<u32, VaultError> {
        Ok(storage::config(&e)?.decimals)
    }

    pub fn total_supply(e: Env) -> i128 {
        storage::totals(&e).total_supply
    }

    pub fn balance_of(e: Env, owner: Address) -> i128 {
        storage::balance(&e, &owner)
    }

    pub fn allowance(e: Env, owner: Address, spender: Address) -> i128 {
        storage::allowance(&e, &owner, &spender)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        shares::transfer(&e, &from, &to, amount)
    }

    pub fn approve(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        owner.require_auth();
        shares::approve(&e, &owner, &spender, amount)
    }

    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        shares::spend_allowance(&e, &from, &spender, amount)?;
        shares::transfer(&e, &from, &to, amount)
    }

    // ─── Accounting views ────────────────────────────────────────────────

    pub fn total_assets(e: Env) -> Result<i128, VaultError> {
        accounting::total_assets(&storage::totals(&e))
    }

    pub fn total_idle(e: Env) -> i128 {
        storage::totals(&e).total_idle
    }

    pub fn total_debt(e: Env) -> i128 {
        storage::totals(&e).total_debt
    }

    pub fn debt_ratio(e: Env) -> u32 {
        storage::totals(&e).debt_ratio
    }

    /// Profit still locked at the current ledger time.
    pub fn locked_profit(e: Env) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        accounting::locked_profit(
            &storage::totals(&e),
            config.locked_profit_degradation,
            e.ledger().timestamp(),
        )
    }

    pub fn price_per_share(e: Env) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        accounting::price_per_share(&storage::totals(&e), &config, e.ledger().timestamp())
    }

    /// Room left under the deposit limit.
    pub fn available_deposit_limit(e: Env) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        let assets = accounting::total_assets(&storage::totals(&e))?;
        Ok(sub_floor(config.deposit_limit, assets))
    }

    /// Shares that could be redeemed if every queued strategy paid back its
    /// whole debt without loss.
    pub fn max_available_shares(e: Env) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        let totals = storage::totals(&e);
        let now = e.ledger().timestamp();
        let mut available = totals.total_idle;
        for strategy in storage::withdrawal_queue(&e).iter() {
            if let Some(params) = storage::strategy(&e, &strategy) {
                available = vault_common::math::add(available, params.total_debt)?;
            }
        }
        let shares = accounting::shares_for_amount(&totals, &config, now, available)?;
        Ok(shares.min(totals.total_supply))
    }

    pub fn config(e: Env) -> Result<VaultConfig, VaultError> {
        storage::config(&e)
    }

    pub fn totals(e: Env) -> VaultTotals {
        storage::totals(&e)
    }

    pub fn token(e: Env) -> Result<Address, VaultError> {
        Ok(storage::config(&e)?.token)
    }

    pub fn governance(e: Env) -> Result<Address, VaultError> {
        Ok(storage::config(&e)?.governance)
    }

    pub fn pending_governance(e: Env) -> Option<Address> {
        storage::pending_governance(&e)
    }

    pub fn management(e: Env) -> Result<Address, VaultError> {
        Ok(storage::config(&e)?.management)
    }

    pub fn guardian(e: Env) -> Result<Address, VaultError> {
        Ok(storage::config(&e)?.guardian)
    }

    pub fn rewards(e: Env) -> Result<Address, VaultError> {
        Ok(storage::config(&e)?.rewards)
    }

    pub fn emergency_shutdown(e: Env) -> Result<bool, VaultError> {
        Ok(storage::config(&e)?.emergency_shutdown)
    }

    /// Whether a guarded call is in progress.
    pub fn is_locked(e: Env) -> bool {
        storage::is_entered(&e)
    }

    // ─── Strategies ──────────────────────────────────────────────────────

    pub fn add_strategy(
        e: Env,
        caller: Address,
        strategy: Address,
        debt_ratio: u32,
        min_debt_per_harvest: i128,
        max_debt_per_harvest: i128,
        performance_fee: u32,
    ) -> Result<(), VaultError> {
        strategies::add_strategy(
            &e,
            &caller,
            &strategy,
            debt_ratio,
            min_debt_per_harvest,
            max_debt_per_harvest,
            performance_fee,
        )
    }

    pub fn update_strategy_debt_ratio(
        e: Env,
        caller: Address,
        strategy: Address,
        debt_ratio: u32,
    ) -> Result<(), VaultError> {
        strategies::update_debt_ratio(&e, &caller, &strategy, debt_ratio)
    }

    pub fn update_strategy_min_debt(
        e: Env,
        caller: Address,
        strategy: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        strategies::update_min_debt_per_harvest(&e, &caller, &strategy, amount)
    }

    pub fn update_strategy_max_debt(
        e: Env,
        caller: Address,
        strategy: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        strategies::update_max_debt_per_harvest(&e, &caller, &strategy, amount)
    }

    pub fn update_strategy_performance_fee(
        e: Env,
        caller: Address,
        strategy: Address,
        fee: u32,
    ) -> Result<(), VaultError> {
        strategies::update_performance_fee(&e, &caller, &strategy, fee)
    }

    pub fn revoke_strategy(e: Env, caller: Address, strategy: Address) -> Result<(), VaultError> {
        strategies::revoke(&e, &caller, &strategy)
    }

    pub fn migrate_strategy(
        e: Env,
        caller: Address,
        old_strategy: Address,
        new_strategy: Address,
    ) -> Result<(), VaultError> {
        with_reentrancy_guard(&e, || {
            strategies::migrate(&e, &caller, &old_strategy, &new_strategy)
        })
    }

    pub fn withdrawal_queue(e: Env) -> Vec<Address> {
        storage::withdrawal_queue(&e)
    }

    pub fn set_withdrawal_queue(
        e: Env,
        caller: Address,
        queue: Vec<Address>,
    ) -> Result<(), VaultError> {
        strategies::set_queue(&e, &caller, queue)
    }

    pub fn add_strategy_to_queue(
        e: Env,
        caller: Address,
        strategy: Address,
    ) -> Result<(), VaultError> {
        strategies::add_to_queue(&e, &caller, &strategy)
    }

    pub fn remove_strategy_from_queue(
        e: Env,
        caller: Address,
        strategy: Address,
    ) -> Result<(), VaultError> {
        strategies::remove_from_queue(&e, &caller, &strategy)
    }

    pub fn strategies(e: Env, strategy: Address) -> StrategyParams {
        storage::strategy(&e, &strategy).unwrap_or_default()
    }

    pub fn credit_available(e: Env, strategy: Address) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        let params = storage::strategy(&e, &strategy).unwrap_or_default();
        accounting::credit_available(&config, &storage::totals(&e), &params)
    }

    pub fn debt_outstanding(e: Env, strategy: Address) -> Result<i128, VaultError> {
        let config = storage::config(&e)?;
        let params = storage::strategy(&e, &strategy).unwrap_or_default();
        accounting::debt_outstanding(&config, &storage::totals(&e), &params)
    }

    pub fn expected_return(e: Env, strategy: Address) -> Result<i128, VaultError> {
        let params = storage::active_strategy(&e, &strategy)?;
        accounting::expected_return(&params, e.ledger().timestamp())
    }

    /// Called by a strategy about itself after harvesting.
    pub fn report(
        e: Env,
        strategy: Address,
        gain: i128,
        loss: i128,
        debt_payment: i128,
    ) -> Result<i128, VaultError> {
        strategy.require_auth();
        with_reentrancy_guard(&e, || report::report(&e, &strategy, gain, loss, debt_payment))
    }

    // ─── Configuration ───────────────────────────────────────────────────

    pub fn set_deposit_limit(e: Env, caller: Address, limit: i128) -> Result<(), VaultError> {
        config::set_deposit_limit(&e, &caller, limit)
    }

    pub fn set_performance_fee(e: Env, caller: Address, fee: u32) -> Result<(), VaultError> {
        config::set_performance_fee(&e, &caller, fee)
    }

    pub fn set_management_fee(e: Env, caller: Address, fee: u32) -> Result<(), VaultError> {
        config::set_management_fee(&e, &caller, fee)
    }

    pub fn set_locked_profit_degradation(
        e: Env,
        caller: Address,
        seconds: u64,
    ) -> Result<(), VaultError> {
        config::set_locked_profit_degradation(&e, &caller, seconds)
    }

    pub fn set_rewards(e: Env, caller: Address, rewards: Address) -> Result<(), VaultError> {
        config::set_rewards(&e, &caller, &rewards)
    }

    pub fn set_management(e: Env, caller: Address, management: Address) -> Result<(), VaultError> {
        config::set_management(&e, &caller, &management)
    }

    pub fn set_guardian(e: Env, caller: Address, guardian: Address) -> Result<(), VaultError> {
        config::set_guardian(&e, &caller, &guardian)
    }

    pub fn set_governance(e: Env, caller: Address, pending: Address) -> Result<(), VaultError> {
        config::set_governance(&e, &caller, &pending)
    }

    pub fn accept_governance(e: Env, caller: Address) -> Result<(), VaultError> {
        config::accept_governance(&e, &caller)
    }

    pub fn set_emergency_shutdown(
        e: Env,
        caller: Address,
        active: bool,
    ) -> Result<(), VaultError> {
        config::set_emergency_shutdown(&e, &caller, active)
    }

    pub fn sweep(
        e: Env,
        caller: Address,
        token: Address,
        amount: i128,
    ) -> Result<i128, VaultError> {
        config::sweep(&e, &caller, &token, amount)
    }
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod test_deposit;
#[cfg(test)]
mod test_strategies;
