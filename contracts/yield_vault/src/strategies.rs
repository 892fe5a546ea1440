//! Strategy lifecycle and withdrawal-queue maintenance.

use crate::access::{require_role, Role};
use crate::accounting::MAX_STRATEGY_PERFORMANCE_FEE;
use crate::events;
use crate::storage;
use soroban_sdk::{Address, Env, Vec};
use vault_common::interfaces::StrategyClient;
use vault_common::math::MAX_BPS;
use vault_common::{StrategyParams, VaultError};

/// Most strategies a vault may have queued at once.
pub const MAXIMUM_STRATEGIES: u32 = 20;

fn check_ratio_total(total: u32) -> Result<(), VaultError> {
    if total as i128 > MAX_BPS {
        return Err(VaultError::DebtRatioExceeded);
    }
    Ok(())
}

/// Confirms `strategy` works with this vault's asset and reports here.
fn check_binding(e: &Env, token: &Address, strategy: &Address) -> Result<(), VaultError> {
    let client = StrategyClient::new(e, strategy);
    if client.want() != *token {
        return Err(VaultError::WrongWant);
    }
    if client.vault() != e.current_contract_address() {
        return Err(VaultError::WrongVault);
    }
    Ok(())
}

pub fn add_strategy(
    e: &Env,
    caller: &Address,
    strategy: &Address,
    debt_ratio: u32,
    min_debt_per_harvest: i128,
    max_debt_per_harvest: i128,
    performance_fee: u32,
) -> Result<(), VaultError> {
    let config = require_role(e, caller, Role::Governance)?;
    if config.emergency_shutdown {
        return Err(VaultError::EmergencyShutdown);
    }
    let mut queue = storage::withdrawal_queue(e);
    if queue.len() >= MAXIMUM_STRATEGIES {
        return Err(VaultError::QueueFull);
    }
    if storage::active_strategy(e, strategy).is_ok() {
        return Err(VaultError::StrategyAlreadyActive);
    }
    check_binding(e, &config.token, strategy)?;

    let mut totals = storage::totals(e);
    let ratio = totals.debt_ratio.saturating_add(debt_ratio);
    check_ratio_total(ratio)?;
    if min_debt_per_harvest < 0 || min_debt_per_harvest > max_debt_per_harvest {
        return Err(VaultError::MinDebtAboveMax);
    }
    if performance_fee > MAX_STRATEGY_PERFORMANCE_FEE {
        return Err(VaultError::FeeTooHigh);
    }

    let now = e.ledger().timestamp();
    let params = StrategyParams {
        performance_fee,
        activation: now,
        debt_ratio,
        min_debt_per_harvest,
        max_debt_per_harvest,
        last_report: now,
        total_debt: 0,
        total_gain: 0,
        total_loss: 0,
    };
    storage::set_strategy(e, strategy, &params);
    totals.debt_ratio = ratio;
    storage::set_totals(e, &totals);
    queue.push_back(strategy.clone());
    storage::set_withdrawal_queue(e, &queue);

    events::emit_strategy_added(e, strategy, &params);
    Ok(())
}

pub fn update_debt_ratio(
    e: &Env,
    caller: &Address,
    strategy: &Address,
    debt_ratio: u32,
) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    let mut params = storage::active_strategy(e, strategy)?;
    let mut totals = storage::totals(e);
    let ratio = (totals.debt_ratio - params.debt_ratio).saturating_add(debt_ratio);
    check_ratio_total(ratio)?;

    totals.debt_ratio = ratio;
    params.debt_ratio = debt_ratio;
    storage::set_totals(e, &totals);
    storage::set_strategy(e, strategy, &params);
    events::emit_strategy_updated(e, strategy, "debt_ratio", debt_ratio as i128);
    Ok(())
}

pub fn update_min_debt_per_harvest(
    e: &Env,
    caller: &Address,
    strategy: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    let mut params = storage::active_strategy(e, strategy)?;
    if amount < 0 || amount > params.max_debt_per_harvest {
        return Err(VaultError::MinDebtAboveMax);
    }
    params.min_debt_per_harvest = amount;
    storage::set_strategy(e, strategy, &params);
    events::emit_strategy_updated(e, strategy, "min_debt", amount);
    Ok(())
}

pub fn update_max_debt_per_harvest(
    e: &Env,
    caller: &Address,
    strategy: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    let mut params = storage::active_strategy(e, strategy)?;
    if amount < params.min_debt_per_harvest {
        return Err(VaultError::MinDebtAboveMax);
    }
    params.max_debt_per_harvest = amount;
    storage::set_strategy(e, strategy, &params);
    events::emit_strategy_updated(e, strategy, "max_debt", amount);
    Ok(())
}

pub fn update_performance_fee(
    e: &Env,
    caller: &Address,
    strategy: &Address,
    fee: u32,
) -> Result<(), VaultError> {
    require_role(e, caller, Role::Governance)?;
    if fee > MAX_STRATEGY_PERFORMANCE_FEE {
        return Err(VaultError::FeeTooHigh);
    }
    let mut params = storage::active_strategy(e, strategy)?;
    params.performance_fee = fee;
    storage::set_strategy(e, strategy, &params);
    events::emit_strategy_updated(e, strategy, "performance_fee", fee as i128);
    Ok(())
}

/// Sets the strategy's debt ratio to zero so its whole debt becomes
/// outstanding. Governance, the guardian and the strategy itself may revoke.
pub fn revoke(e: &Env, caller: &Address, strategy: &Address) -> Result<(), VaultError> {
    if caller == strategy {
        storage::config(e)?;
        caller.require_auth();
    } else {
        require_role(e, caller, Role::Guardian)?;
    }
    let mut params = storage::active_strategy(e, strategy)?;
    if params.debt_ratio == 0 {
        return Ok(());
    }
    let mut totals = storage::totals(e);
    totals.debt_ratio -= params.debt_ratio;
    params.debt_ratio = 0;
    storage::set_totals(e, &totals);
    storage::set_strategy(e, strategy, &params);
    events::emit_strategy_revoked(e, strategy);
    Ok(())
}

/// Moves `old`'s debt and limits to `new`, then tells `old` to hand over its
/// funds.
pub fn migrate(
    e: &Env,
    caller: &Address,
    old: &Address,
    new: &Address,
) -> Result<(), VaultError> {
    let config = require_role(e, caller, Role::Governance)?;
    let mut old_params = storage::active_strategy(e, old)?;
    if storage::active_strategy(e, new).is_ok() {
        return Err(VaultError::StrategyAlreadyActive);
    }
    check_binding(e, &config.token, new)?;

    let new_params = StrategyParams {
        performance_fee: old_params.performance_fee,
        activation: old_params.last_report,
        debt_ratio: old_params.debt_ratio,
        min_debt_per_harvest: old_params.min_debt_per_harvest,
        max_debt_per_harvest: old_params.max_debt_per_harvest,
        last_report: old_params.last_report,
        total_debt: old_params.total_debt,
        total_gain: 0,
        total_loss: 0,
    };
    old_params.debt_ratio = 0;
    old_params.total_debt = 0;
    old_params.activation = 0;
    storage::set_strategy(e, old, &old_params);
    storage::set_strategy(e, new, &new_params);

    let queue = storage::withdrawal_queue(e);
    let mut swapped = Vec::new(e);
    for queued in queue.iter() {
        if queued == *old {
            swapped.push_back(new.clone());
        } else {
            swapped.push_back(queued);
        }
    }
    storage::set_withdrawal_queue(e, &swapped);

    StrategyClient::new(e, old).migrate(new);

    events::emit_strategy_migrated(e, old, new);
    Ok(())
}

// ─── Withdrawal queue ────────────────────────────────────────────────────────

/// Replaces the queue with a reordering of its current entries.
pub fn set_queue(e: &Env, caller: &Address, queue: Vec<Address>) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    let current = storage::withdrawal_queue(e);
    if queue.len() != current.len() {
        return Err(VaultError::InvalidQueue);
    }
    for (i, strategy) in queue.iter().enumerate() {
        if !current.contains(&strategy) {
            return Err(VaultError::InvalidQueue);
        }
        if queue.first_index_of(&strategy) != Some(i as u32) {
            return Err(VaultError::InvalidQueue);
        }
    }
    storage::set_withdrawal_queue(e, &queue);
    events::emit_queue_updated(e, &queue);
    Ok(())
}

pub fn add_to_queue(e: &Env, caller: &Address, strategy: &Address) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    storage::active_strategy(e, strategy)?;
    let mut queue = storage::withdrawal_queue(e);
    if queue.contains(strategy) {
        return Err(VaultError::InvalidQueue);
    }
    if queue.len() >= MAXIMUM_STRATEGIES {
        return Err(VaultError::QueueFull);
    }
    queue.push_back(strategy.clone());
    storage::set_withdrawal_queue(e, &queue);
    events::emit_queue_updated(e, &queue);
    Ok(())
}

pub fn remove_from_queue(e: &Env, caller: &Address, strategy: &Address) -> Result<(), VaultError> {
    require_role(e, caller, Role::Management)?;
    let mut queue = storage::withdrawal_queue(e);
    let index = queue
        .first_index_of(strategy)
        .ok_or(VaultError::InvalidQueue)?;
    queue.remove(index);
    storage::set_withdrawal_queue(e, &queue);
    events::emit_queue_updated(e, &queue);
    Ok(())
}

