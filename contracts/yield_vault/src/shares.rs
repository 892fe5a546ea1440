//! Share ledger: balances, allowances and supply.

use crate::events;
use crate::storage::{self, VaultTotals};
use soroban_sdk::{Address, Env};
use vault_common::math::{add, require_non_negative, sub};
use vault_common::VaultError;

pub fn mint(
    e: &Env,
    totals: &mut VaultTotals,
    to: &Address,
    shares: i128,
) -> Result<(), VaultError> {
    if shares == 0 {
        return Ok(());
    }
    totals.total_supply = add(totals.total_supply, shares)?;
    let balance = add(storage::balance(e, to), shares)?;
    storage::set_balance(e, to, balance);
    events::emit_transfer(e, &e.current_contract_address(), to, shares);
    Ok(())
}

pub fn burn(
    e: &Env,
    totals: &mut VaultTotals,
    from: &Address,
    shares: i128,
) -> Result<(), VaultError> {
    let balance = storage::balance(e, from);
    if shares > balance {
        return Err(VaultError::InsufficientShares);
    }
    totals.total_supply = sub(totals.total_supply, shares)?;
    storage::set_balance(e, from, balance - shares);
    events::emit_transfer(e, from, &e.current_contract_address(), shares);
    Ok(())
}

/// Moves shares between holders. The vault itself never holds shares.
pub fn transfer(e: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
    require_non_negative(amount)?;
    if *to == e.current_contract_address() {
        return Err(VaultError::InvalidRecipient);
    }
    let from_balance = storage::balance(e, from);
    if amount > from_balance {
        return Err(VaultError::InsufficientShares);
    }
    if from != to {
        storage::set_balance(e, from, from_balance - amount);
        let to_balance = add(storage::balance(e, to), amount)?;
        storage::set_balance(e, to, to_balance);
    }
    events::emit_transfer(e, from, to, amount);
    Ok(())
}

pub fn approve(
    e: &Env,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    require_non_negative(amount)?;
    storage::set_allowance(e, owner, spender, amount);
    events::emit_approval(e, owner, spender, amount);
    Ok(())
}

/// Consumes `amount` of `spender`'s allowance over `owner`'s shares. An
/// `i128::MAX` allowance is never decreased.
pub fn spend_allowance(
    e: &Env,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    let allowance = storage::allowance(e, owner, spender);
    if allowance == i128::MAX {
        return Ok(());
    }
    if amount > allowance {
        return Err(VaultError::InsufficientAllowance);
    }
    storage::set_allowance(e, owner, spender, allowance - amount);
    Ok(())
}
