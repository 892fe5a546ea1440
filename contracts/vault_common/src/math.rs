//! Checked arithmetic for vault accounting.
//!
//! Amounts are non-negative `i128` values; every helper returns a
//! `VaultError` instead of wrapping or panicking. A subtraction whose result
//! would be negative is reported as `Underflow`.

use crate::VaultError;

/// 100% in basis points.
pub const MAX_BPS: i128 = 10_000;

/// Seconds per year used by the management fee (365.2425 days).
pub const SECS_PER_YEAR: i128 = 31_556_952;

#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_add(b).ok_or(VaultError::Overflow)
}

#[inline]
pub fn sub(a: i128, b: i128) -> Result<i128, VaultError> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(VaultError::Underflow),
    }
}

/// `a - b`, floored at zero.
#[inline]
#[must_use]
pub fn sub_floor(a: i128, b: i128) -> i128 {
    if a > b {
        a - b
    } else {
        0
    }
}

#[inline]
pub fn mul(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_mul(b).ok_or(VaultError::Overflow)
}

#[inline]
pub fn div(a: i128, b: i128) -> Result<i128, VaultError> {
    if b == 0 {
        return Err(VaultError::DivisionByZero);
    }
    a.checked_div(b).ok_or(VaultError::Overflow)
}

/// `a * b / c`, rounding down.
#[inline]
pub fn mul_div(a: i128, b: i128, c: i128) -> Result<i128, VaultError> {
    div(mul(a, b)?, c)
}

/// Basis-point share of an amount: `amount * bps / 10_000`.
#[inline]
pub fn bps(amount: i128, bps: u32) -> Result<i128, VaultError> {
    mul_div(amount, bps as i128, MAX_BPS)
}

/// Rejects negative amounts.
#[inline]
pub fn require_non_negative(amount: i128) -> Result<(), VaultError> {
    if amount < 0 {
        return Err(VaultError::NegativeAmount);
    }
    Ok(())
}
