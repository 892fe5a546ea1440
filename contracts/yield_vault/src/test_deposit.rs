#![cfg(test)]

use crate::storage::{self, VaultTotals, BUMP_TARGET};
use crate::test_helpers::*;
use crate::YieldVault;
use soroban_sdk::testutils::storage::Instance as _;
use soroban_sdk::Env;
use vault_common::VaultError;

#[test]
fn test_first_deposit_mints_one_share_per_unit() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 5_000);

    let shares = t.vault.deposit(&user, &5_000, &user);

    assert_eq!(shares, 5_000);
    assert_eq!(t.vault.balance_of(&user), 5_000);
    assert_eq!(t.vault.total_supply(), 5_000);
    assert_eq!(t.vault.total_idle(), 5_000);
    assert_eq!(t.vault.total_assets(), 5_000);
    assert_eq!(t.token.balance(&t.vault_id), 5_000);
    assert_eq!(t.token.balance(&user), 0);
}

#[test]
fn test_deposit_mints_to_recipient() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 1_000);
    let friend = new_user(&e, &t, 0);

    t.vault.deposit(&user, &1_000, &friend);

    assert_eq!(t.vault.balance_of(&user), 0);
    assert_eq!(t.vault.balance_of(&friend), 1_000);
}

#[test]
fn test_later_deposit_priced_on_unlocked_gains() {
    let e = Env::default();
    let t = setup_without_fees(&e);
    let alice = depositor(&e, &t, 1_000);
    let s = add_strategy(&e, &t, 5_000, 0);
    s.client.harvest(&s.keeper);

    advance(&e, ONE_DAY);
    accrue(&t, &s, 100);
    s.client.harvest(&s.keeper);
    advance(&e, ONE_DAY);

    assert_eq!(t.vault.total_assets(), 1_100);
    assert_eq!(t.vault.locked_profit(), 0);

    let bob = new_user(&e, &t, 1_100);
    let shares = t.vault.deposit(&bob, &1_100, &bob);

    assert_eq!(shares, 1_000);
    assert_eq!(t.vault.balance_of(&alice), 1_000);
}

#[test]
fn test_deposit_above_limit_fails() {
    let e = Env::default();
    let t = setup(&e);
    t.vault.set_deposit_limit(&t.governance, &1_000);
    let user = new_user(&e, &t, 2_000);

    t.vault.deposit(&user, &600, &user);
    let result = t.vault.try_deposit(&user, &401, &user);

    assert_eq!(result, Err(Ok(VaultError::DepositLimitExceeded)));
    assert_eq!(t.vault.available_deposit_limit(), 400);
}

#[test]
fn test_deposit_everything_is_capped_by_limit() {
    let e = Env::default();
    let t = setup(&e);
    t.vault.set_deposit_limit(&t.governance, &1_500);
    let user = new_user(&e, &t, 2_000);

    let shares = t.vault.deposit(&user, &i128::MAX, &user);

    assert_eq!(shares, 1_500);
    assert_eq!(t.token.balance(&user), 500);
    assert_eq!(t.vault.available_deposit_limit(), 0);
}

#[test]
fn test_deposit_everything_is_capped_by_balance() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 2_000);

    let shares = t.vault.deposit(&user, &i128::MAX, &user);

    assert_eq!(shares, 2_000);
    assert_eq!(t.token.balance(&user), 0);
}

#[test]
fn test_deposit_everything_with_full_vault_fails() {
    let e = Env::default();
    let t = setup(&e);
    t.vault.set_deposit_limit(&t.governance, &100);
    let user = new_user(&e, &t, 200);
    t.vault.deposit(&user, &100, &user);

    let result = t.vault.try_deposit(&user, &i128::MAX, &user);
    assert_eq!(result, Err(Ok(VaultError::ZeroAmount)));
}

#[test]
fn test_deposit_zero_fails() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 100);
    assert_eq!(
        t.vault.try_deposit(&user, &0, &user),
        Err(Ok(VaultError::ZeroAmount))
    );
}

#[test]
fn test_deposit_negative_fails() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 100);
    assert_eq!(
        t.vault.try_deposit(&user, &-5, &user),
        Err(Ok(VaultError::NegativeAmount))
    );
}

#[test]
fn test_deposit_to_vault_itself_fails() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 100);
    assert_eq!(
        t.vault.try_deposit(&user, &100, &t.vault_id),
        Err(Ok(VaultError::InvalidRecipient))
    );
}

#[test]
fn test_deposit_without_allowance_fails() {
    let e = Env::default();
    let t = setup(&e);
    let user = new_user(&e, &t, 0);
    t.asset_admin.mint(&user, &100);

    assert_eq!(
        t.vault.try_deposit(&user, &100, &user),
        Err(Ok(VaultError::TransferFailed))
    );
    assert_eq!(t.vault.total_supply(), 0);
}

#[test]
fn test_deposit_default_limit_is_zero() {
    let e = Env::default();
    let t = setup(&e);
    t.vault.set_deposit_limit(&t.governance, &0);
    let user = new_user(&e, &t, 100);
    assert_eq!(
        t.vault.try_deposit(&user, &1, &user),
        Err(Ok(VaultError::DepositLimitExceeded))
    );
}

#[test]
fn test_totals_write_extends_instance_ttl() {
    let e = Env::default();
    let vault_id = e.register(YieldVault, ());

    e.as_contract(&vault_id, || {
        storage::set_totals(&e, &VaultTotals::default());
        assert_eq!(e.storage().instance().get_ttl(), BUMP_TARGET);
    });
}
