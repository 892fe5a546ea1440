//! Asset-transfer adapters.
//!
//! Contracts move the underlying asset only through [`TokenTransfer`], never
//! by calling a token client directly. Two variants exist:
//!
//! - [`CheckedTransfer`] invokes the token and maps any failed invocation to
//!   `TransferFailed`. It trusts the token once the call succeeds.
//! - [`BalanceDeltaTransfer`] wraps another adapter and re-reads the
//!   receiving balance, failing with `BalanceMismatch` unless it moved by
//!   exactly the requested amount. A token that silently skims or ignores a
//!   transfer is caught here.
//!
//! Pulls are allowance based: the payer must have approved the current
//! contract as spender beforehand.

use crate::math::require_non_negative;
use crate::VaultError;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{Address, Env};

pub trait TokenTransfer {
    /// Token balance of `owner`.
    fn balance(&self, owner: &Address) -> i128;

    /// Move `amount` from the current contract to `to`.
    fn push(&self, to: &Address, amount: i128) -> Result<(), VaultError>;

    /// Move `amount` from `from` into the current contract.
    fn pull(&self, from: &Address, amount: i128) -> Result<(), VaultError>;
}

/// Trusts a successful token invocation.
pub struct CheckedTransfer<'a> {
    env: &'a Env,
    client: TokenClient<'a>,
}

impl<'a> CheckedTransfer<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            env,
            client: TokenClient::new(env, token),
        }
    }
}

impl TokenTransfer for CheckedTransfer<'_> {
    fn balance(&self, owner: &Address) -> i128 {
        self.client.balance(owner)
    }

    fn push(&self, to: &Address, amount: i128) -> Result<(), VaultError> {
        require_non_negative(amount)?;
        if amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        match self.client.try_transfer(&contract, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(VaultError::TransferFailed),
        }
    }

    fn pull(&self, from: &Address, amount: i128) -> Result<(), VaultError> {
        require_non_negative(amount)?;
        if amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        match self
            .client
            .try_transfer_from(&contract, from, &contract, &amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => Err(VaultError::TransferFailed),
        }
    }
}

/// Confirms every movement against the receiver's balance.
pub struct BalanceDeltaTransfer<'a, T: TokenTransfer> {
    env: &'a Env,
    inner: T,
}

impl<'a, T: TokenTransfer> BalanceDeltaTransfer<'a, T> {
    pub fn new(env: &'a Env, inner: T) -> Self {
        Self { env, inner }
    }
}

impl<'a> BalanceDeltaTransfer<'a, CheckedTransfer<'a>> {
    /// Balance-checked adapter over a plain token invocation.
    pub fn for_token(env: &'a Env, token: &Address) -> Self {
        Self::new(env, CheckedTransfer::new(env, token))
    }
}

fn check_delta(before: i128, after: i128, amount: i128) -> Result<(), VaultError> {
    match after.checked_sub(before) {
        Some(delta) if delta == amount => Ok(()),
        _ => Err(VaultError::BalanceMismatch),
    }
}

impl<T: TokenTransfer> TokenTransfer for BalanceDeltaTransfer<'_, T> {
    fn balance(&self, owner: &Address) -> i128 {
        self.inner.balance(owner)
    }

    fn push(&self, to: &Address, amount: i128) -> Result<(), VaultError> {
        require_non_negative(amount)?;
        if amount == 0 {
            return Ok(());
        }
        let before = self.inner.balance(to);
        self.inner.push(to, amount)?;
        check_delta(before, self.inner.balance(to), amount)
    }

    fn pull(&self, from: &Address, amount: i128) -> Result<(), VaultError> {
        require_non_negative(amount)?;
        if amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        let before = self.inner.balance(&contract);
        self.inner.pull(from, amount)?;
        check_delta(before, self.inner.balance(&contract), amount)
    }
}

/// Ledgers an allowance granted through [`approve`] stays valid for.
pub const APPROVAL_LEDGERS: u32 = 1_000;

/// Grants `spender` an allowance of `amount` over the current contract's
/// `token` balance.
pub fn approve(
    e: &Env,
    token: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    require_non_negative(amount)?;
    let contract = e.current_contract_address();
    let expiration = e.ledger().sequence().saturating_add(APPROVAL_LEDGERS);
    let client = TokenClient::new(e, token);
    match client.try_approve(&contract, spender, &amount, &expiration) {
        Ok(Ok(())) => Ok(()),
        _ => Err(VaultError::TransferFailed),
    }
}
