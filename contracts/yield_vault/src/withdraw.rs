use crate::accounting;
use crate::events;
use crate::shares;
use crate::storage;
use soroban_sdk::{Address, Env};
use vault_common::asset::{BalanceDeltaTransfer, TokenTransfer};
use vault_common::interfaces::StrategyClient;
use vault_common::math::{add, bps, require_non_negative, sub, MAX_BPS};
use vault_common::VaultError;

/// Burns up to `max_shares` of `sender`'s shares and pays their value to
/// `recipient`, pulling from strategies in withdrawal-queue order when idle
/// assets fall short. Fails if the realized loss exceeds `max_loss_bps` of
/// the amount requested.
pub fn withdraw(
    e: &Env,
    sender: &Address,
    max_shares: i128,
    recipient: &Address,
    max_loss_bps: u32,
) -> Result<i128, VaultError> {
    if max_loss_bps as i128 > MAX_BPS {
        return Err(VaultError::InvalidMaxLoss);
    }
    let config = storage::config(e)?;
    let vault = e.current_contract_address();
    if *recipient == vault {
        return Err(VaultError::InvalidRecipient);
    }

    let owned = storage::balance(e, sender);
    let requested = if max_shares == i128::MAX {
        owned
    } else {
        require_non_negative(max_shares)?;
        max_shares
    };
    if requested == 0 {
        return Err(VaultError::ZeroShares);
    }
    if requested > owned {
        return Err(VaultError::InsufficientShares);
    }

    let now = e.ledger().timestamp();
    let mut totals = storage::totals(e);
    let mut burned = requested;
    let mut value = accounting::share_value(&totals, &config, now, burned)?;
    let mut total_loss: i128 = 0;
    let asset = BalanceDeltaTransfer::for_token(e, &config.token);

    if value > totals.total_idle {
        for strategy in storage::withdrawal_queue(e).iter() {
            if value <= totals.total_idle {
                break;
            }
            let mut params = storage::active_strategy(e, &strategy)?;
            let needed = (value - totals.total_idle).min(params.total_debt);
            if needed == 0 {
                continue;
            }

            let before = asset.balance(&vault);
            let reported = StrategyClient::new(e, &strategy).withdraw(&needed);
            require_non_negative(reported)?;
            let withdrawn = sub(asset.balance(&vault), before)?;
            totals.total_idle = add(totals.total_idle, withdrawn)?;

            if reported > 0 {
                let loss = accounting::apply_loss(&mut totals, &mut params, reported)?;
                value = sub(value, loss)?;
                total_loss = add(total_loss, loss)?;
            }

            params.total_debt = sub(params.total_debt, withdrawn)?;
            totals.total_debt = sub(totals.total_debt, withdrawn)?;
            storage::set_strategy(e, &strategy, &params);
        }

        if value > totals.total_idle {
            value = totals.total_idle;
            let covered = add(value, total_loss)?;
            burned = accounting::shares_for_amount(&totals, &config, now, covered)?.min(requested);
        }

        if total_loss > bps(add(value, total_loss)?, max_loss_bps)? {
            return Err(VaultError::MaxLossExceeded);
        }
    }

    shares::burn(e, &mut totals, sender, burned)?;
    totals.total_idle = sub(totals.total_idle, value)?;
    storage::set_totals(e, &totals);

    asset.push(recipient, value)?;

    events::emit_withdraw(e, sender, recipient, burned, value, total_loss);
    Ok(value)
}
