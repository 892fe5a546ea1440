#![cfg(test)]

use crate::test_helpers::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env};
use vault_common::VaultError;

#[test]
fn test_add_strategy_records_params_and_queues_it() {
    let e = Env::default();
    let t = setup(&e);
    let s = deploy_strategy(&e, &t.vault_id);

    t.vault
        .add_strategy(&t.governance, &s.id, &3_000, &10, &5_000, &1_000);

    let params = t.vault.strategies(&s.id);
    assert_eq!(params.activation, START);
    assert_eq!(params.last_report, START);
    assert_eq!(params.debt_ratio, 3_000);
    assert_eq!(params.min_debt_per_harvest, 10);
    assert_eq!(params.max_debt_per_harvest, 5_000);
    assert_eq!(params.performance_fee, 1_000);
    assert_eq!(params.total_debt, 0);
    assert_eq!(t.vault.debt_ratio(), 3_000);
    assert_eq!(t.vault.withdrawal_queue(), vec![&e, s.id.clone()]);
}

#[test]
fn test_add_strategy_requires_governance() {
    let e = Env::default();
    let t = setup(&e);
    let s = deploy_strategy(&e, &t.vault_id);
    assert_eq!(
        t.vault
            .try_add_strategy(&t.management, &s.id, &1_000, &0, &i128::MAX, &0),
        Err(Ok(VaultError::NotGovernance))
    );
}

#[test]
fn test_add_strategy_twice_fails() {
    let e = Env::default();
    let t = setup(&e);
    let s = add_strategy(&e, &t, 1_000, 0);
    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &1_000, &0, &i128::MAX, &0),
        Err(Ok(VaultError::StrategyAlreadyActive))
    );
}

#[test]
fn test_add_strategy_ratio_ceiling() {
    let e = Env::default();
    let t = setup(&e);
    add_strategy(&e, &t, 6_000, 0);
    let s = deploy_strategy(&e, &t.vault_id);
    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &4_001, &0, &i128::MAX, &0),
        Err(Ok(VaultError::DebtRatioExceeded))
    );
    t.vault
        .add_strategy(&t.governance, &s.id, &4_000, &0, &i128::MAX, &0);
    assert_eq!(t.vault.debt_ratio(), 10_000);
}

#[test]
fn test_add_strategy_bad_limits_and_fee() {
    let e = Env::default();
    let t = setup(&e);
    let s = deploy_strategy(&e, &t.vault_id);
    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &1_000, &100, &99, &0),
        Err(Ok(VaultError::MinDebtAboveMax))
    );
    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &1_000, &0, &100, &5_001),
        Err(Ok(VaultError::FeeTooHigh))
    );
}

#[test]
fn test_add_strategy_for_other_asset_fails() {
    let e = Env::default();
    let t = setup(&e);
    let other_token = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    let other = deploy_vault(&e, &other_token);
    let s = deploy_strategy(&e, &other.vault_id);

    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &1_000, &0, &i128::MAX, &0),
        Err(Ok(VaultError::WrongWant))
    );
}

#[test]
fn test_add_strategy_for_other_vault_fails() {
    let e = Env::default();
    let t = setup(&e);
    let sibling = deploy_vault(&e, &t.token.address);
    let s = deploy_strategy(&e, &sibling.vault_id);

    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &1_000, &0, &i128::MAX, &0),
        Err(Ok(VaultError::WrongVault))
    );
}

#[test]
fn test_add_strategy_queue_full() {
    let e = Env::default();
    let t = setup(&e);
    for _ in 0..20 {
        add_strategy(&e, &t, 0, 0);
    }
    let s = deploy_strategy(&e, &t.vault_id);
    assert_eq!(
        t.vault
            .try_add_strategy(&t.governance, &s.id, &0, &0, &i128::MAX, &0),
        Err(Ok(VaultError::QueueFull))
    );
}

#[test]
fn test_update_debt_ratio() {
    let e = Env::default();
    let t = setup(&e);
    let a = add_strategy(&e, &t, 5_000, 0);
    add_strategy(&e, &t, 4_000, 0);

    t.vault.update_strategy_debt_ratio(&t.management, &a.id, &6_000);
    assert_eq!(t.vault.strategies(&a.id).debt_ratio, 6_000);
    assert_eq!(t.vault.debt_ratio(), 10_000);

    assert_eq!(
        t.vault.try_update_strategy_debt_ratio(&t.management, &a.id, &6_001),
        Err(Ok(VaultError::DebtRatioExceeded))
    );
    assert_eq!(
        t.vault.try_update_strategy_debt_ratio(&t.guardian, &a.id, &1),
        Err(Ok(VaultError::NotManagement))
    );
}

#[test]
fn test_update_unknown_strategy_fails() {
    let e = Env::default();
    let t = setup(&e);
    let stranger = Address::generate(&e);
    assert_eq!(
        t.vault.try_update_strategy_debt_ratio(&t.governance, &stranger, &1),
        Err(Ok(VaultError::StrategyNotActive))
    );
}

#[test]
fn test_update_per_harvest_limits_keep_order() {
    let e = Env::default();
    let t = setup(&e);
    let s = add_strategy(&e, &t, 1_000, 0);

    t.vault.update_strategy_max_debt(&t.management, &s.id, &500);
    assert_eq!(
        t.vault.try_update_strategy_min_debt(&t.management, &s.id, &501),
        Err(Ok(VaultError::MinDebtAboveMax))
    );
    t.vault.update_strategy_min_debt(&t.management, &s.id, &500);
    assert_eq!(
        t.vault.try_update_strategy_max_debt(&t.management, &s.id, &499),
        Err(Ok(VaultError::MinDebtAboveMax))
    );
    let params = t.vault.strategies(&s.id);
    assert_eq!(params.min_debt_per_harvest, 500);
    assert_eq!(params.max_debt_per_harvest, 500);
}

#[test]
fn test_update_performance_fee() {
    let e = Env::default();
    let t = setup(&e);
    let s = add_strategy(&e, &t, 1_000, 0);

    t.vault.update_strategy_performance_fee(&t.governance, &s.id, &5_000);
    assert_eq!(t.vault.strategies(&s.id).performance_fee, 5_000);
    assert_eq!(
        t.vault.try_update_strategy_performance_fee(&t.governance, &s.id, &5_001),
        Err(Ok(VaultError::FeeTooHigh))
    );
    assert_eq!(
        t.vault.try_update_strategy_performance_fee(&t.management, &s.id, &0),
        Err(Ok(VaultError::NotGovernance))
    );
}

#[test]
fn test_revoke_by_guardian() {
    let e = Env::default();
    let t = setup(&e);
    let s = add_strategy(&e, &t, 3_000, 0);

    t.vault.revoke_strategy(&t.guardian, &s.id);

    assert_eq!(t.vault.strategies(&s.id).debt_ratio, 0);
    assert_eq!(t.vault.debt_ratio(), 0);
    // Already revoked: no-op.
    t.vault.revoke_strategy(&t.guardian, &s.id);
}

#[test]
fn test_revoke_by_stranger_fails() {
    let e = Env::default();
    let t = setup(&e);
    let s = add_strategy(&e, &t, 3_000, 0);
    assert_eq!(
        t.vault.try_revoke_strategy(&t.management, &s.id),
        Err(Ok(VaultError::NotGuardian))
    );
}

#[test]
fn test_strategy_emergency_exit_revokes_itself() {
    let e = Env::default();
    let t = setup_without_fees(&e);
    depositor(&e, &t, 10_000);
    let s = add_strategy(&e, &t, 3_000, 0);
    s.client.harvest(&s.keeper);

    s.client.set_emergency_exit(&s.strategist);
    assert_eq!(t.vault.strategies(&s.id).debt_ratio, 0);

    advance(&e, ONE_DAY);
    s.client.harvest(&s.keeper);
    assert_eq!(t.vault.total_debt(), 0);
    assert_eq!(t.vault.total_idle(), 10_000);
}

#[test]
fn test_migrate_moves_debt_and_funds() {
    let e = Env::default();
    let t = setup_without_fees(&e);
    depositor(&e, &t, 10_000);
    let old = add_strategy(&e, &t, 4_000, 500);
    old.client.harvest(&old.keeper);
    let new = deploy_strategy(&e, &t.vault_id);

    t.vault.migrate_strategy(&t.governance, &old.id, &new.id);

    let moved = t.vault.strategies(&new.id);
    assert_eq!(moved.total_debt, 4_000);
    assert_eq!(moved.debt_ratio, 4_000);
    assert_eq!(moved.performance_fee, 500);
    assert_eq!(moved.activation, START);
    let retired = t.vault.strategies(&old.id);
    assert_eq!(retired.total_debt, 0);
    assert_eq!(retired.activation, 0);

    assert_eq!(t.token.balance(&old.id), 0);
    assert_eq!(t.token.balance(&new.id), 4_000);
    assert_eq!(t.vault.total_debt(), 4_000);
    assert_eq!(t.vault.debt_ratio(), 4_000);
    assert_eq!(t.vault.withdrawal_queue(), vec![&e, new.id.clone()]);
    assert!(!t.vault.is_locked());

    advance(&e, 60);
    assert_eq!(
        t.vault.try_report(&old.id, &0, &0, &0),
        Err(Ok(VaultError::StrategyNotActive))
    );
}

#[test]
fn test_migrate_to_active_strategy_fails() {
    let e = Env::default();
    let t = setup(&e);
    let a = add_strategy(&e, &t, 1_000, 0);
    let b = add_strategy(&e, &t, 1_000, 0);
    assert_eq!(
        t.vault.try_migrate_strategy(&t.governance, &a.id, &b.id),
        Err(Ok(VaultError::StrategyAlreadyActive))
    );
}
