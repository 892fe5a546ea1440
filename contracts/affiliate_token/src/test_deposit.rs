#![cfg(test)]

use crate::test_helpers::{depositor, new_user, setup, setup_unreleased};
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{Address, Env, String};
use vault_common::{text, VaultError};
use yield_vault::{YieldVault, YieldVaultClient};

#[test]
fn test_initialize_derives_metadata() {
    let e = Env::default();
    let t = setup(&e);

    let asset_symbol = t.token.symbol();
    assert_eq!(
        t.affiliate_token.name(),
        text::concat(&e, "Affiliate ", &asset_symbol, "").unwrap()
    );
    assert_eq!(
        t.affiliate_token.symbol(),
        text::concat(&e, "af", &asset_symbol, "").unwrap()
    );
    assert_eq!(t.affiliate_token.decimals(), t.token.decimals());
    assert_eq!(t.affiliate_token.token(), t.token.address);
    assert_eq!(t.affiliate_token.registry(), t.registry.address);
    assert_eq!(t.affiliate_token.affiliate(), t.affiliate);
}

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let t = setup(&e);

    assert_eq!(
        t.affiliate_token
            .try_initialize(&t.token.address, &t.registry.address, &t.affiliate),
        Err(Ok(VaultError::AlreadyInitialized))
    );
}

#[test]
fn test_unusable_before_release() {
    let e = Env::default();
    let (t, _) = setup_unreleased(&e);
    let user = new_user(&e, &t, 1_000);

    assert_eq!(
        t.affiliate_token.try_best_vault(),
        Err(Ok(VaultError::NoReleases))
    );
    assert_eq!(
        t.affiliate_token.try_deposit(&user, &1_000),
        Err(Ok(VaultError::NoReleases))
    );
    assert!(t.affiliate_token.all_vaults().is_empty());
    assert_eq!(t.token.balance(&user), 1_000);
}

#[test]
fn test_best_vault_is_cached() {
    let e = Env::default();
    let t = setup(&e);

    assert_eq!(t.affiliate_token.best_vault(), t.vault_id);

    // a newer release does not move funds already routed
    let newer = e.register(YieldVault, ());
    let governance = Address::generate(&e);
    YieldVaultClient::new(&e, &newer).initialize(
        &t.token.address,
        &governance,
        &governance,
        &String::from_str(&e, ""),
        &String::from_str(&e, ""),
        &governance,
    );
    t.registry.new_release(&newer);

    assert_eq!(t.affiliate_token.best_vault(), t.vault_id);
    assert_eq!(t.affiliate_token.all_vaults().len(), 2);
}

#[test]
fn test_deposit_mints_vault_shares_one_to_one() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 10_000);

    let shares = t.affiliate_token.deposit(&user, &10_000);
    assert!(!e.events().all().is_empty());

    assert_eq!(shares, 10_000);
    assert_eq!(t.affiliate_token.balance_of(&user), 10_000);
    assert_eq!(t.affiliate_token.total_supply(), 10_000);
    assert_eq!(t.vault.balance_of(&t.affiliate_id), 10_000);
    assert_eq!(t.vault.total_assets(), 10_000);
    assert_eq!(t.token.balance(&user), 0);
    assert_eq!(t.token.balance(&t.affiliate_id), 0);
}

#[test]
fn test_supply_tracks_vault_shares_across_depositors() {
    let e = Env::default();
    let t = setup(&e);
    let alice = depositor(&e, &t, 3_000);
    let bob = depositor(&e, &t, 7_000);

    assert_eq!(t.affiliate_token.balance_of(&alice), 3_000);
    assert_eq!(t.affiliate_token.balance_of(&bob), 7_000);
    assert_eq!(
        t.affiliate_token.total_supply(),
        t.vault.balance_of(&t.affiliate_id)
    );
}

#[test]
fn test_deposit_max_uses_whole_balance() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 4_321);

    assert_eq!(t.affiliate_token.deposit(&user, &i128::MAX), 4_321);
    assert_eq!(t.token.balance(&user), 0);
}

#[test]
fn test_zero_deposit_fails() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 100);

    assert_eq!(
        t.affiliate_token.try_deposit(&user, &0),
        Err(Ok(VaultError::ZeroAmount))
    );
    assert_eq!(
        t.affiliate_token.try_deposit(&user, &-5),
        Err(Ok(VaultError::NegativeAmount))
    );
}

#[test]
fn test_total_vault_balance() {
    let e = Env::default();
    let t = setup(&e);
    let user = depositor(&e, &t, 5_000);

    assert_eq!(t.affiliate_token.total_vault_balance(&user), 5_000);
    assert_eq!(
        t.affiliate_token.total_vault_balance(&Address::generate(&e)),
        0
    );
}
