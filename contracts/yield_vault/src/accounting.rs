//! Pure accounting rules.
//!
//! Nothing here touches storage; callers pass in the loaded config, totals
//! and strategy params together with the current ledger timestamp.

use crate::storage::{VaultConfig, VaultTotals};
use vault_common::math::{add, bps, div, mul, mul_div, sub, sub_floor, MAX_BPS, SECS_PER_YEAR};
use vault_common::{StrategyParams, VaultError};

/// Ceiling for a strategist's performance fee, bps.
pub const MAX_STRATEGY_PERFORMANCE_FEE: u32 = 5_000;

/// Ceiling for the vault performance fee, bps.
pub const MAX_VAULT_PERFORMANCE_FEE: u32 = 5_000;

/// Ceiling for the annual management fee, bps.
pub const MAX_MANAGEMENT_FEE: u32 = 10_000;

/// Idle assets plus everything lent out.
pub fn total_assets(totals: &VaultTotals) -> Result<i128, VaultError> {
    add(totals.total_idle, totals.total_debt)
}

/// Profit still locked at `now`, decaying linearly from `last_report` over
/// `degradation` seconds.
pub fn locked_profit(totals: &VaultTotals, degradation: u64, now: u64) -> Result<i128, VaultError> {
    let elapsed = now.saturating_sub(totals.last_report);
    if degradation == 0 || elapsed >= degradation {
        return Ok(0);
    }
    let released = mul_div(totals.locked_profit, elapsed as i128, degradation as i128)?;
    sub(totals.locked_profit, released)
}

/// Assets that back outstanding shares right now.
pub fn free_funds(
    totals: &VaultTotals,
    config: &VaultConfig,
    now: u64,
) -> Result<i128, VaultError> {
    let locked = locked_profit(totals, config.locked_profit_degradation, now)?;
    Ok(sub_floor(total_assets(totals)?, locked))
}

/// Shares minted for a deposit of `amount`. The first depositor gets 1:1.
pub fn shares_to_issue(
    totals: &VaultTotals,
    config: &VaultConfig,
    now: u64,
    amount: i128,
) -> Result<i128, VaultError> {
    if totals.total_supply == 0 {
        return Ok(amount);
    }
    mul_div(amount, totals.total_supply, free_funds(totals, config, now)?)
}

/// Asset value of `shares`.
pub fn share_value(
    totals: &VaultTotals,
    config: &VaultConfig,
    now: u64,
    shares: i128,
) -> Result<i128, VaultError> {
    if totals.total_supply == 0 {
        return Ok(shares);
    }
    mul_div(shares, free_funds(totals, config, now)?, totals.total_supply)
}

/// Shares worth `amount`; zero when nothing backs the supply.
pub fn shares_for_amount(
    totals: &VaultTotals,
    config: &VaultConfig,
    now: u64,
    amount: i128,
) -> Result<i128, VaultError> {
    let free = free_funds(totals, config, now)?;
    if free <= 0 {
        return Ok(0);
    }
    mul_div(amount, totals.total_supply, free)
}

/// Value of one whole share, scaled by the asset's decimals.
pub fn price_per_share(
    totals: &VaultTotals,
    config: &VaultConfig,
    now: u64,
) -> Result<i128, VaultError> {
    let unit = 10_i128
        .checked_pow(config.decimals)
        .ok_or(VaultError::Overflow)?;
    share_value(totals, config, now, unit)
}

/// Additional assets the vault may lend to a strategy right now.
pub fn credit_available(
    config: &VaultConfig,
    totals: &VaultTotals,
    params: &StrategyParams,
) -> Result<i128, VaultError> {
    if config.emergency_shutdown {
        return Ok(0);
    }
    let assets = total_assets(totals)?;
    let vault_limit = bps(assets, totals.debt_ratio)?;
    let strategy_limit = bps(assets, params.debt_ratio)?;

    if strategy_limit <= params.total_debt || vault_limit <= totals.total_debt {
        return Ok(0);
    }

    let mut available = strategy_limit - params.total_debt;
    available = available.min(vault_limit - totals.total_debt);
    available = available.min(totals.total_idle);

    if available < params.min_debt_per_harvest {
        return Ok(0);
    }
    Ok(available.min(params.max_debt_per_harvest))
}

/// Amount by which a strategy is over its debt limit.
pub fn debt_outstanding(
    config: &VaultConfig,
    totals: &VaultTotals,
    params: &StrategyParams,
) -> Result<i128, VaultError> {
    if totals.debt_ratio == 0 || config.emergency_shutdown {
        return Ok(params.total_debt);
    }
    let strategy_limit = bps(total_assets(totals)?, params.debt_ratio)?;
    Ok(sub_floor(params.total_debt, strategy_limit))
}

/// Gain a strategy should have accrued since its last report, extrapolating
/// its lifetime average.
pub fn expected_return(params: &StrategyParams, now: u64) -> Result<i128, VaultError> {
    let since_last = now.saturating_sub(params.last_report) as i128;
    let lifetime = params.last_report.saturating_sub(params.activation) as i128;
    if since_last == 0 || lifetime == 0 {
        return Ok(0);
    }
    mul_div(params.total_gain, since_last, lifetime)
}

/// Applies a reported loss to the strategy and the vault. The loss is capped
/// at the strategy's debt and the strategy's debt ratio shrinks in
/// proportion. Returns the loss actually applied.
pub fn apply_loss(
    totals: &mut VaultTotals,
    params: &mut StrategyParams,
    loss: i128,
) -> Result<i128, VaultError> {
    let loss = loss.min(params.total_debt);
    if loss <= 0 {
        return Ok(0);
    }
    if totals.debt_ratio != 0 && totals.total_debt > 0 {
        let change = mul_div(loss, totals.debt_ratio as i128, totals.total_debt)?;
        let change = change.min(params.debt_ratio as i128) as u32;
        params.debt_ratio -= change;
        totals.debt_ratio -= change;
    }
    params.total_loss = add(params.total_loss, loss)?;
    params.total_debt = sub(params.total_debt, loss)?;
    totals.total_debt = sub(totals.total_debt, loss)?;
    Ok(loss)
}

/// Fees charged on a report, in asset terms.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Fees {
    /// Everything taken, capped at the reported gain.
    pub total: i128,
    /// The strategist's cut of `total`, before capping.
    pub strategist: i128,
}

/// Time-based management fee on `total_debt` for `elapsed` seconds.
pub fn management_fee(total_debt: i128, elapsed: u64, fee: u32) -> Result<i128, VaultError> {
    let accrued = mul(mul(total_debt, elapsed as i128)?, fee as i128)?;
    div(accrued, MAX_BPS * SECS_PER_YEAR)
}

/// Management, strategist and vault performance fees for a report.
///
/// No fees are charged on the strategy's activation timestamp. A second
/// report within the same second is rejected.
pub fn assess_fees(
    config: &VaultConfig,
    params: &StrategyParams,
    gain: i128,
    now: u64,
) -> Result<Fees, VaultError> {
    if params.activation == now {
        return Ok(Fees::default());
    }
    let elapsed = now.saturating_sub(params.last_report);
    if elapsed == 0 {
        return Err(VaultError::ReportTooSoon);
    }
    if gain == 0 {
        return Ok(Fees::default());
    }

    let management = management_fee(params.total_debt, elapsed, config.management_fee)?;
    let strategist = bps(gain, params.performance_fee)?;
    let performance = bps(gain, config.performance_fee)?;
    let total = add(add(management, strategist)?, performance)?;

    Ok(Fees {
        total: total.min(gain),
        strategist,
    })
}
