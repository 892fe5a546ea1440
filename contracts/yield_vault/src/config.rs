//! Governance-controlled settings and role hand-offs.

use crate::access::{require_role, Role};
use crate::accounting::{MAX_MANAGEMENT_FEE, MAX_VAULT_PERFORMANCE_FEE};
use crate::events;
use crate::storage;
use soroban_sdk::{Address, Env};
use vault_common::asset::{BalanceDeltaTransfer, TokenTransfer};
use vault_common::math::{require_non_negative, sub_floor};
use vault_common::VaultError;

pub fn set_deposit_limit(e: &Env, caller: &Address, limit: i128) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    require_non_negative(limit)?;
    config.deposit_limit = limit;
    storage::set_config(e, &config);
    events::emit_config_updated(e, "deposit_limit", limit);
    Ok(())
}

pub fn set_performance_fee(e: &Env, caller: &Address, fee: u32) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    if fee > MAX_VAULT_PERFORMANCE_FEE {
        return Err(VaultError::FeeTooHigh);
    }
    config.performance_fee = fee;
    storage::set_config(e, &config);
    events::emit_config_updated(e, "performance_fee", fee as i128);
    Ok(())
}

pub fn set_management_fee(e: &Env, caller: &Address, fee: u32) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    if fee > MAX_MANAGEMENT_FEE {
        return Err(VaultError::FeeTooHigh);
    }
    config.management_fee = fee;
    storage::set_config(e, &config);
    events::emit_config_updated(e, "management_fee", fee as i128);
    Ok(())
}

/// Changes the unlock period. Profit already locked keeps unlocking from the
/// last report under the new period.
pub fn set_locked_profit_degradation(
    e: &Env,
    caller: &Address,
    seconds: u64,
) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    if seconds == 0 {
        return Err(VaultError::InvalidDegradation);
    }
    config.locked_profit_degradation = seconds;
    storage::set_config(e, &config);
    events::emit_config_updated(e, "degradation", seconds as i128);
    Ok(())
}

pub fn set_rewards(e: &Env, caller: &Address, rewards: &Address) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    if *rewards == e.current_contract_address() {
        return Err(VaultError::InvalidRecipient);
    }
    config.rewards = rewards.clone();
    storage::set_config(e, &config);
    events::emit_role_updated(e, "rewards", rewards);
    Ok(())
}

pub fn set_management(e: &Env, caller: &Address, management: &Address) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Governance)?;
    config.management = management.clone();
    storage::set_config(e, &config);
    events::emit_role_updated(e, "management", management);
    Ok(())
}

/// The guardian may hand its role on; governance may replace it.
pub fn set_guardian(e: &Env, caller: &Address, guardian: &Address) -> Result<(), VaultError> {
    let mut config = require_role(e, caller, Role::Guardian)?;
    config.guardian = guardian.clone();
    storage::set_config(e, &config);
    events::emit_role_updated(e, "guardian", guardian);
    Ok(())
}

/// First half of the governance hand-off.
pub fn set_governance(e: &Env, caller: &Address, pending: &Address) -> Result<(), VaultError> {
    require_role(e, caller, Role::Governance)?;
    storage::set_pending_governance(e, pending);
    events::emit_role_updated(e, "pending_governance", pending);
    Ok(())
}

pub fn accept_governance(e: &Env, caller: &Address) -> Result<(), VaultError> {
    let mut config = storage::config(e)?;
    if storage::pending_governance(e).as_ref() != Some(caller) {
        return Err(VaultError::NotPendingGovernance);
    }
    caller.require_auth();
    config.governance = caller.clone();
    storage::set_config(e, &config);
    storage::clear_pending_governance(e);
    events::emit_role_updated(e, "governance", caller);
    Ok(())
}

/// Guardian or governance may shut the vault down; only governance may
/// reopen it.
pub fn set_emergency_shutdown(e: &Env, caller: &Address, active: bool) -> Result<(), VaultError> {
    let role = if active {
        Role::Guardian
    } else {
        Role::Governance
    };
    let mut config = require_role(e, caller, role)?;
    config.emergency_shutdown = active;
    storage::set_config(e, &config);
    events::emit_emergency_shutdown(e, active);
    Ok(())
}

/// Sends tokens the vault does not account for to governance. For the vault
/// asset only the balance above `total_idle` can be swept. `i128::MAX`
/// sweeps everything available.
pub fn sweep(e: &Env, caller: &Address, token: &Address, amount: i128) -> Result<i128, VaultError> {
    let config = require_role(e, caller, Role::Governance)?;
    let asset = BalanceDeltaTransfer::for_token(e, token);
    let held = asset.balance(&e.current_contract_address());
    let available = if *token == config.token {
        sub_floor(held, storage::totals(e).total_idle)
    } else {
        held
    };

    let amount = if amount == i128::MAX {
        available
    } else {
        require_non_negative(amount)?;
        amount
    };
    if amount > available {
        return Err(VaultError::InsufficientBalance);
    }

    asset.push(&config.governance, amount)?;
    events::emit_swept(e, token, amount);
    Ok(amount)
}
