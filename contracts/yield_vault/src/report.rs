use crate::accounting;
use crate::events;
use crate::shares;
use crate::storage;
use soroban_sdk::{Address, Env};
use vault_common::asset::{BalanceDeltaTransfer, TokenTransfer};
use vault_common::math::{add, mul_div, require_non_negative, sub};
use vault_common::VaultError;

/// Settles a strategy's harvest: books loss and gain, charges fees, takes
/// back debt, extends new credit and moves the net difference. Returns what
/// the strategy still owes.
pub fn report(
    e: &Env,
    strategy: &Address,
    gain: i128,
    loss: i128,
    debt_payment: i128,
) -> Result<i128, VaultError> {
    require_non_negative(gain)?;
    require_non_negative(loss)?;
    require_non_negative(debt_payment)?;

    let config = storage::config(e)?;
    let mut totals = storage::totals(e);
    let mut params = storage::active_strategy(e, strategy)?;
    let now = e.ledger().timestamp();

    let asset = BalanceDeltaTransfer::for_token(e, &config.token);
    if asset.balance(strategy) < add(gain, debt_payment)? {
        return Err(VaultError::InsufficientBalance);
    }

    if loss > 0 {
        accounting::apply_loss(&mut totals, &mut params, loss)?;
    }

    // Fee shares are priced before the gain reaches the vault.
    let fees = accounting::assess_fees(&config, &params, gain, now)?;
    if fees.total > 0 {
        let reward = accounting::shares_to_issue(&totals, &config, now, fees.total)?;
        let strategist_reward = if fees.strategist > 0 {
            mul_div(fees.strategist, reward, fees.total)?
        } else {
            0
        };
        shares::mint(e, &mut totals, strategy, strategist_reward)?;
        shares::mint(e, &mut totals, &config.rewards, reward - strategist_reward)?;
    }

    params.total_gain = add(params.total_gain, gain)?;

    let credit = accounting::credit_available(&config, &totals, &params)?;
    let outstanding = accounting::debt_outstanding(&config, &totals, &params)?;
    let debt_paid = debt_payment.min(outstanding);
    if debt_paid > 0 {
        params.total_debt = sub(params.total_debt, debt_paid)?;
        totals.total_debt = sub(totals.total_debt, debt_paid)?;
    }
    if credit > 0 {
        params.total_debt = add(params.total_debt, credit)?;
        totals.total_debt = add(totals.total_debt, credit)?;
    }

    let returned = add(gain, debt_paid)?;
    if returned < credit {
        totals.total_idle = sub(totals.total_idle, credit - returned)?;
    } else {
        totals.total_idle = add(totals.total_idle, returned - credit)?;
    }

    let still_locked = accounting::locked_profit(&totals, config.locked_profit_degradation, now)?;
    totals.locked_profit = add(still_locked, sub(gain, fees.total)?)?;

    params.last_report = now;
    totals.last_report = now;
    storage::set_strategy(e, strategy, &params);
    storage::set_totals(e, &totals);

    if returned < credit {
        asset.push(strategy, credit - returned)?;
    } else {
        asset.pull(strategy, returned - credit)?;
    }

    events::emit_strategy_reported(e, strategy, gain, loss, debt_paid, credit, &params);

    if params.debt_ratio == 0 || config.emergency_shutdown {
        Ok(params.total_debt)
    } else {
        Ok(outstanding - debt_paid)
    }
}
