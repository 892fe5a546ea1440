use crate::accounting;
use crate::events;
use crate::shares;
use crate::storage;
use soroban_sdk::{Address, Env};
use vault_common::asset::{BalanceDeltaTransfer, TokenTransfer};
use vault_common::math::{add, require_non_negative, sub_floor};
use vault_common::VaultError;

/// Pulls `amount` of the asset from `sender` and mints shares to
/// `recipient`. `i128::MAX` deposits as much as the limit and the sender's
/// balance allow.
pub fn deposit(
    e: &Env,
    sender: &Address,
    amount: i128,
    recipient: &Address,
) -> Result<i128, VaultError> {
    let config = storage::config(e)?;
    if config.emergency_shutdown {
        return Err(VaultError::EmergencyShutdown);
    }
    let vault = e.current_contract_address();
    if *recipient == vault {
        return Err(VaultError::InvalidRecipient);
    }

    let mut totals = storage::totals(e);
    let assets = accounting::total_assets(&totals)?;
    let asset = BalanceDeltaTransfer::for_token(e, &config.token);

    let amount = if amount == i128::MAX {
        sub_floor(config.deposit_limit, assets).min(asset.balance(sender))
    } else {
        require_non_negative(amount)?;
        if add(assets, amount)? > config.deposit_limit {
            return Err(VaultError::DepositLimitExceeded);
        }
        amount
    };
    if amount == 0 {
        return Err(VaultError::ZeroAmount);
    }

    let now = e.ledger().timestamp();
    let minted = accounting::shares_to_issue(&totals, &config, now, amount)?;
    if minted == 0 {
        return Err(VaultError::ZeroShares);
    }

    totals.total_idle = add(totals.total_idle, amount)?;
    shares::mint(e, &mut totals, recipient, minted)?;
    storage::set_totals(e, &totals);

    asset.pull(sender, amount)?;

    events::emit_deposit(e, recipient, amount, minted);
    Ok(minted)
}
