#![no_std]

//! # Affiliate Token Contract
//!
//! Share token that routes deposits into the newest vault the registry knows
//! for one asset. Every affiliate share is backed by exactly one vault share
//! held by this contract, so the affiliate's total supply always equals its
//! vault share balance.
//!
//! The vault is looked up once, on first use, and cached. Until the registry
//! has a release for the asset every routing call fails with `NoReleases`.

use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};
use vault_common::asset::{self, BalanceDeltaTransfer, TokenTransfer};
use vault_common::interfaces::{RegistryClient, VaultClient};
use vault_common::math::{add, mul_div, require_non_negative, sub};
use vault_common::text;
use vault_common::VaultError;

mod events;
mod storage;

use storage::Settings;

/// Loss bound passed to the vault on every withdrawal, bps.
pub const WITHDRAW_MAX_LOSS_BPS: u32 = 1;

#[contract]
pub struct AffiliateToken;

fn resolve_vault(e: &Env, settings: &Settings) -> Result<Address, VaultError> {
    if let Some(vault) = storage::cached_vault(e) {
        return Ok(vault);
    }
    let registry = RegistryClient::new(e, &settings.registry);
    let vault = match registry.try_latest_vault(&settings.token) {
        Ok(Ok(vault)) => vault,
        _ => return Err(VaultError::NoReleases),
    };
    storage::set_cached_vault(e, &vault);
    events::emit_vault_resolved(e, &settings.token, &vault);
    Ok(vault)
}

fn mint(e: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
    storage::set_total_supply(e, add(storage::total_supply(e), amount)?);
    storage::set_balance(e, to, add(storage::balance(e, to), amount)?);
    events::emit_transfer(e, &e.current_contract_address(), to, amount);
    Ok(())
}

fn burn(e: &Env, from: &Address, amount: i128) -> Result<(), VaultError> {
    let balance = storage::balance(e, from);
    if amount > balance {
        return Err(VaultError::InsufficientShares);
    }
    storage::set_balance(e, from, balance - amount);
    storage::set_total_supply(e, sub(storage::total_supply(e), amount)?);
    events::emit_transfer(e, from, &e.current_contract_address(), amount);
    Ok(())
}

fn move_shares(e: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), VaultError> {
    require_non_negative(amount)?;
    let from_balance = storage::balance(e, from);
    if amount > from_balance {
        return Err(VaultError::InsufficientShares);
    }
    if from != to {
        storage::set_balance(e, from, from_balance - amount);
        storage::set_balance(e, to, add(storage::balance(e, to), amount)?);
    }
    events::emit_transfer(e, from, to, amount);
    Ok(())
}

#[contractimpl]
impl AffiliateToken {
    /// Bind the wrapper to an asset and a registry.
    ///
    /// # Arguments
    /// * `token` - The underlying asset
    /// * `registry` - Registry consulted for the newest vault
    /// * `affiliate` - Address allowed to hand the affiliate role over
    ///
    /// # Errors
    /// * `AlreadyInitialized` - if called twice
    /// * `NameTooLong` - the asset symbol is too long to derive a name
    pub fn initialize(
        e: Env,
        token: Address,
        registry: Address,
        affiliate: Address,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&e) {
            return Err(VaultError::AlreadyInitialized);
        }
        affiliate.require_auth();

        let asset = TokenClient::new(&e, &token);
        let asset_symbol = asset.symbol();
        let settings = Settings {
            name: text::concat(&e, "Affiliate ", &asset_symbol, "")?,
            symbol: text::concat(&e, "af", &asset_symbol, "")?,
            decimals: asset.decimals(),
            token,
            registry,
        };
        storage::set_settings(&e, &settings);
        storage::set_affiliate(&e, &affiliate);
        storage::set_total_supply(&e, 0);
        Ok(())
    }

    /// Newest vault for the asset, resolved from the registry on first use.
    ///
    /// # Errors
    /// * `NoReleases` - the registry has nothing for the asset yet
    pub fn best_vault(e: Env) -> Result<Address, VaultError> {
        let settings = storage::settings(&e)?;
        resolve_vault(&e, &settings)
    }

    /// Every release of the asset, oldest first. Empty when none.
    pub fn all_vaults(e: Env) -> Result<Vec<Address>, VaultError> {
        let settings = storage::settings(&e)?;
        Ok(RegistryClient::new(&e, &settings.registry).all_vaults(&settings.token))
    }

    /// Route `amount` of the asset from `sender` into the best vault.
    ///
    /// `i128::MAX` deposits the sender's whole balance. The sender must have
    /// approved this contract for `amount`.
    ///
    /// # Returns
    /// Shares minted to `sender`, equal to the vault shares received
    ///
    /// # Errors
    /// * `NoReleases` - no vault to deposit into
    /// * `ZeroAmount` - nothing to deposit
    /// * `TransferFailed` / `BalanceMismatch` - the pull did not land exactly
    ///
    /// # Events
    /// Emits `affiliate_deposit` and a mint `transfer`
    pub fn deposit(e: Env, sender: Address, amount: i128) -> Result<i128, VaultError> {
        sender.require_auth();
        let settings = storage::settings(&e)?;
        let vault = resolve_vault(&e, &settings)?;
        let me = e.current_contract_address();

        let transfer = BalanceDeltaTransfer::for_token(&e, &settings.token);
        let amount = if amount == i128::MAX {
            transfer.balance(&sender)
        } else {
            amount
        };
        require_non_negative(amount)?;
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        transfer.pull(&sender, amount)?;
        asset::approve(&e, &settings.token, &vault, amount)?;
        let shares = VaultClient::new(&e, &vault).deposit(&me, &amount, &me);
        mint(&e, &sender, shares)?;

        events::emit_deposit(&e, &sender, &vault, amount, shares);
        Ok(shares)
    }

    /// Burn `amount` shares and pay the redeemed assets to `sender`.
    ///
    /// `i128::MAX` redeems the whole balance. Only the vault shares the vault
    /// actually burned are taken from `sender`.
    ///
    /// # Returns
    /// Assets paid to `sender`
    ///
    /// # Errors
    /// * `NoReleases` - no vault resolved
    /// * `ZeroAmount` - nothing to redeem
    /// * `InsufficientShares` - `sender` holds fewer than `amount`
    ///
    /// # Events
    /// Emits `affiliate_withdraw` and a burn `transfer`
    pub fn withdraw(e: Env, sender: Address, amount: i128) -> Result<i128, VaultError> {
        sender.require_auth();
        let settings = storage::settings(&e)?;
        let vault = resolve_vault(&e, &settings)?;
        let me = e.current_contract_address();

        let balance = storage::balance(&e, &sender);
        let shares = if amount == i128::MAX { balance } else { amount };
        require_non_negative(shares)?;
        if shares == 0 {
            return Err(VaultError::ZeroAmount);
        }
        if shares > balance {
            return Err(VaultError::InsufficientShares);
        }

        let client = VaultClient::new(&e, &vault);
        let before = client.balance_of(&me);
        let assets = client.withdraw(&me, &shares, &sender, &WITHDRAW_MAX_LOSS_BPS);
        let burned = sub(before, client.balance_of(&me))?;
        burn(&e, &sender, burned)?;

        events::emit_withdraw(&e, &sender, &vault, burned, assets);
        Ok(assets)
    }

    /// Asset value of `account`'s shares at the vault's current price.
    pub fn total_vault_balance(e: Env, account: Address) -> Result<i128, VaultError> {
        let settings = storage::settings(&e)?;
        let vault = resolve_vault(&e, &settings)?;
        let pps = VaultClient::new(&e, &vault).price_per_share();
        let one = 10i128
            .checked_pow(settings.decimals)
            .ok_or(VaultError::Overflow)?;
        mul_div(storage::balance(&e, &account), pps, one)
    }

    // ─── Token surface ──────────────────────────────────────────────────

    pub fn name(e: Env) -> Result<String, VaultError> {
        Ok(storage::settings(&e)?.name)
    }

    pub fn symbol(e: Env) -> Result<String, VaultError> {
        Ok(storage::settings(&e)?.symbol)
    }

    pub fn decimals(e: Env) -> Result<u32, VaultError> {
        Ok(storage::settings(&e)?.decimals)
    }

    pub fn token(e: Env) -> Result<Address, VaultError> {
        Ok(storage::settings(&e)?.token)
    }

    pub fn registry(e: Env) -> Result<Address, VaultError> {
        Ok(storage::settings(&e)?.registry)
    }

    pub fn total_supply(e: Env) -> i128 {
        storage::total_supply(&e)
    }

    pub fn balance_of(e: Env, owner: Address) -> i128 {
        storage::balance(&e, &owner)
    }

    pub fn allowance(e: Env, owner: Address, spender: Address) -> i128 {
        storage::allowance(&e, &owner, &spender)
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), VaultError> {
        from.require_auth();
        move_shares(&e, &from, &to, amount)
    }

    pub fn approve(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        owner.require_auth();
        require_non_negative(amount)?;
        storage::set_allowance(&e, &owner, &spender, amount);
        events::emit_approval(&e, &owner, &spender, amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to` on `spender`'s allowance. An
    /// `i128::MAX` allowance is not consumed.
    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        require_non_negative(amount)?;
        let allowance = storage::allowance(&e, &from, &spender);
        if amount > allowance {
            return Err(VaultError::InsufficientAllowance);
        }
        if allowance != i128::MAX {
            storage::set_allowance(&e, &from, &spender, allowance - amount);
        }
        move_shares(&e, &from, &to, amount)
    }

    // ─── Affiliate role ─────────────────────────────────────────────────

    pub fn affiliate(e: Env) -> Result<Address, VaultError> {
        storage::affiliate(&e)
    }

    pub fn pending_affiliate(e: Env) -> Option<Address> {
        storage::pending_affiliate(&e)
    }

    /// Nominate the next affiliate; takes effect on `accept_affiliate`.
    pub fn set_affiliate(e: Env, pending: Address) -> Result<(), VaultError> {
        storage::affiliate(&e)?.require_auth();
        storage::set_pending_affiliate(&e, Some(&pending));
        Ok(())
    }

    /// # Errors
    /// * `NotAffiliate` - `caller` is not the nominee
    pub fn accept_affiliate(e: Env, caller: Address) -> Result<(), VaultError> {
        if storage::pending_affiliate(&e).as_ref() != Some(&caller) {
            return Err(VaultError::NotAffiliate);
        }
        caller.require_auth();
        storage::set_affiliate(&e, &caller);
        storage::set_pending_affiliate(&e, None);
        events::emit_affiliate_updated(&e, &caller);
        Ok(())
    }
}


#[cfg(test)]
mod test_deposit;
