//! Test Strategy Contract
//!
//! Minimal strategy for exercising a yield vault. It keeps every unit of
//! `want` it receives idle, so its assets are just its token balance. Gains
//! are simulated by minting `want` to it and impairments through
//! [`TestStrategy::take_funds`].
//!
//! ## Key design decisions
//!
//! - **Vault-gated withdrawals**: only the bound vault may pull funds or
//!   migrate the strategy.
//! - **Allowance-based settlement**: before reporting, the strategy approves
//!   the vault for exactly what it offers back; the vault never calls back
//!   into the strategy during a report.
//! - **Emergency exit revokes itself** on the vault so the whole debt becomes
//!   outstanding on the next harvest.

#![no_std]

mod events;
mod types;

pub use types::{liquidate_all, prepare_return, Harvest};
use types::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env};
use vault_common::asset::{self, CheckedTransfer, TokenTransfer};
use vault_common::interfaces::{StrategyClient, VaultClient};
use vault_common::math::require_non_negative;
use vault_common::VaultError;

#[cfg(test)]
mod test_helpers;


// ─── Helpers ───────────────────────────────────────────────────────────────

fn read(e: &Env, key: &DataKey) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(key)
        .ok_or(VaultError::NotInitialized)
}

fn require_vault(e: &Env) -> Result<Address, VaultError> {
    let vault = read(e, &DataKey::Vault)?;
    vault.require_auth();
    Ok(vault)
}

/// Strategist or vault governance.
fn require_authorized(e: &Env, caller: &Address) -> Result<(), VaultError> {
    let strategist = read(e, &DataKey::Strategist)?;
    if *caller != strategist {
        let vault = VaultClient::new(e, &read(e, &DataKey::Vault)?);
        if *caller != vault.governance() {
            return Err(VaultError::NotStrategist);
        }
    }
    caller.require_auth();
    Ok(())
}

/// Keeper, strategist, or vault governance or management.
fn require_keeper(e: &Env, caller: &Address) -> Result<(), VaultError> {
    let allowed = *caller == read(e, &DataKey::Keeper)?
        || *caller == read(e, &DataKey::Strategist)?
        || {
            let vault = VaultClient::new(e, &read(e, &DataKey::Vault)?);
            *caller == vault.governance() || *caller == vault.management()
        };
    if !allowed {
        return Err(VaultError::NotKeeper);
    }
    caller.require_auth();
    Ok(())
}

fn want_balance(e: &Env) -> Result<i128, VaultError> {
    let want = read(e, &DataKey::Want)?;
    Ok(CheckedTransfer::new(e, &want).balance(&e.current_contract_address()))
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct TestStrategy;

#[contractimpl]
impl TestStrategy {
    /// One-time setup. `want` is read from the vault.
    pub fn initialize(
        e: Env,
        vault: Address,
        strategist: Address,
        rewards: Address,
        keeper: Address,
    ) -> Result<(), VaultError> {
        if e.storage().instance().has(&DataKey::Vault) {
            return Err(VaultError::AlreadyInitialized);
        }
        strategist.require_auth();
        let want = VaultClient::new(&e, &vault).token();
        e.storage().instance().set(&DataKey::Vault, &vault);
        e.storage().instance().set(&DataKey::Want, &want);
        e.storage().instance().set(&DataKey::Strategist, &strategist);
        e.storage().instance().set(&DataKey::Rewards, &rewards);
        e.storage().instance().set(&DataKey::Keeper, &keeper);
        e.storage().instance().set(&DataKey::EmergencyExit, &false);
        Ok(())
    }

    // ── Strategy interface ─────────────────────────────────────────────────

    pub fn want(e: Env) -> Result<Address, VaultError> {
        read(&e, &DataKey::Want)
    }

    pub fn vault(e: Env) -> Result<Address, VaultError> {
        read(&e, &DataKey::Vault)
    }

    pub fn estimated_total_assets(e: Env) -> Result<i128, VaultError> {
        want_balance(&e)
    }

    /// Sends up to `amount` to the vault; any shortfall is returned as loss.
    pub fn withdraw(e: Env, amount: i128) -> Result<i128, VaultError> {
        let vault = require_vault(&e)?;
        require_non_negative(amount)?;
        let freed = amount.min(want_balance(&e)?);
        CheckedTransfer::new(&e, &read(&e, &DataKey::Want)?).push(&vault, freed)?;
        Ok(amount - freed)
    }

    /// Hands the whole balance to `new_strategy`, which must report to the
    /// same vault.
    pub fn migrate(e: Env, new_strategy: Address) -> Result<(), VaultError> {
        let vault = require_vault(&e)?;
        if StrategyClient::new(&e, &new_strategy).vault() != vault {
            return Err(VaultError::WrongVault);
        }
        let balance = want_balance(&e)?;
        CheckedTransfer::new(&e, &read(&e, &DataKey::Want)?).push(&new_strategy, balance)
    }

    // ── Harvest ────────────────────────────────────────────────────────────

    /// Computes profit, loss and debt payment, approves the vault for what is
    /// offered back and reports. Returns the vault's remaining claim.
    pub fn harvest(e: Env, caller: Address) -> Result<i128, VaultError> {
        require_keeper(&e, &caller)?;
        let me = e.current_contract_address();
        let vault_id = read(&e, &DataKey::Vault)?;
        let vault = VaultClient::new(&e, &vault_id);

        let outstanding = vault.debt_outstanding(&me);
        let balance = want_balance(&e)?;
        let emergency: bool = e
            .storage()
            .instance()
            .get(&DataKey::EmergencyExit)
            .unwrap_or(false);
        let outcome = if emergency {
            liquidate_all(balance, outstanding)
        } else {
            prepare_return(vault.strategies(&me).total_debt, balance, outstanding)
        };

        asset::approve(&e, &read(&e, &DataKey::Want)?, &vault_id, outcome.returned())?;
        let remaining = vault.report(&me, &outcome.profit, &outcome.loss, &outcome.debt_payment);

        events::emit_harvested(
            &e,
            &caller,
            outcome.profit,
            outcome.loss,
            outcome.debt_payment,
            remaining,
        );
        Ok(remaining)
    }

    // ── Roles ──────────────────────────────────────────────────────────────

    pub fn strategist(e: Env) -> Result<Address, VaultError> {
        read(&e, &DataKey::Strategist)
    }

    pub fn keeper(e: Env) -> Result<Address, VaultError> {
        read(&e, &DataKey::Keeper)
    }

    pub fn rewards(e: Env) -> Result<Address, VaultError> {
        read(&e, &DataKey::Rewards)
    }

    pub fn emergency_exit(e: Env) -> bool {
        e.storage()
            .instance()
            .get(&DataKey::EmergencyExit)
            .unwrap_or(false)
    }

    pub fn set_keeper(e: Env, caller: Address, keeper: Address) -> Result<(), VaultError> {
        require_authorized(&e, &caller)?;
        e.storage().instance().set(&DataKey::Keeper, &keeper);
        events::emit_role_updated(&e, "keeper", &keeper);
        Ok(())
    }

    pub fn set_strategist(e: Env, caller: Address, strategist: Address) -> Result<(), VaultError> {
        require_authorized(&e, &caller)?;
        e.storage().instance().set(&DataKey::Strategist, &strategist);
        events::emit_role_updated(&e, "strategist", &strategist);
        Ok(())
    }

    /// Stops taking new debt: revokes the strategy on its vault and makes
    /// the next harvest return everything.
    pub fn set_emergency_exit(e: Env, caller: Address) -> Result<(), VaultError> {
        require_authorized(&e, &caller)?;
        e.storage().instance().set(&DataKey::EmergencyExit, &true);
        let me = e.current_contract_address();
        VaultClient::new(&e, &read(&e, &DataKey::Vault)?).revoke_strategy(&me, &me);
        events::emit_emergency_exit(&e, &caller);
        Ok(())
    }

    /// Moves idle funds to the strategist, simulating an impairment.
    pub fn take_funds(e: Env, caller: Address, amount: i128) -> Result<(), VaultError> {
        let strategist = read(&e, &DataKey::Strategist)?;
        if caller != strategist {
            return Err(VaultError::NotStrategist);
        }
        caller.require_auth();
        CheckedTransfer::new(&e, &read(&e, &DataKey::Want)?).push(&strategist, amount)
    }
}
