#![no_std]

//! # Vault Registry Contract
//!
//! Keeps, for every asset, the ordered list of vault releases so that
//! integrators can always find the newest vault for an asset.
//!
//! ## Features
//! - Append a vault release (the asset is read from the vault itself)
//! - Lookup the latest release or any earlier one by deployment index
//! - Enumerate every asset that has at least one release
//! - Two-step governance hand-off
//!
//! ## Security
//! - Governance-controlled releases
//! - Releases are append-only; the same vault cannot be released twice in a row
//! - Emits events for audit trail

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol, Vec};
use vault_common::interfaces::VaultClient;
use vault_common::VaultError;

const BUMP_THRESHOLD: u32 = 17_280;
const BUMP_TARGET: u32 = 518_400;

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Governance address
    Governance,
    /// Governance nominee awaiting acceptance
    PendingGovernance,
    /// Assets with at least one release, in first-release order
    Tokens,
    /// Asset -> ordered vault releases
    Releases(Address),
}

fn governance(e: &Env) -> Result<Address, VaultError> {
    e.storage()
        .instance()
        .get(&DataKey::Governance)
        .ok_or(VaultError::NotInitialized)
}

fn releases(e: &Env, token: &Address) -> Vec<Address> {
    let key = DataKey::Releases(token.clone());
    match e.storage().persistent().get::<_, Vec<Address>>(&key) {
        Some(list) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            list
        }
        None => Vec::new(e),
    }
}

#[contract]
pub struct VaultRegistry;

#[contractimpl]
impl VaultRegistry {
    /// Initialize the registry with its governance address.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - if called twice
    ///
    /// # Events
    /// Emits `registry_initialized` with the governance address
    pub fn initialize(e: Env, governance: Address) -> Result<(), VaultError> {
        if e.storage().instance().has(&DataKey::Governance) {
            return Err(VaultError::AlreadyInitialized);
        }

        governance.require_auth();

        e.storage()
            .instance()
            .set(&DataKey::Governance, &governance);
        e.storage()
            .instance()
            .set(&DataKey::Tokens, &Vec::<Address>::new(&e));

        e.events()
            .publish((Symbol::new(&e, "registry_initialized"),), governance);
        Ok(())
    }

    /// Publish `vault` as the newest release for its asset.
    ///
    /// # Returns
    /// The deployment index of the new release
    ///
    /// # Errors
    /// * `NotInitialized` - registry has no governance yet
    /// * `ReleaseAlreadyLatest` - `vault` is already the newest release
    ///
    /// # Events
    /// Emits `new_release` with the vault and its deployment index
    pub fn new_release(e: Env, vault: Address) -> Result<u32, VaultError> {
        let governance = governance(&e)?;
        governance.require_auth();

        let token = VaultClient::new(&e, &vault).token();
        let mut list = releases(&e, &token);
        if list.last() == Some(vault.clone()) {
            return Err(VaultError::ReleaseAlreadyLatest);
        }

        if list.is_empty() {
            let mut tokens = Self::tokens(e.clone());
            tokens.push_back(token.clone());
            e.storage().instance().set(&DataKey::Tokens, &tokens);
        }

        let deployment = list.len();
        list.push_back(vault.clone());
        let key = DataKey::Releases(token.clone());
        e.storage().persistent().set(&key, &list);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
        e.storage().instance().extend_ttl(BUMP_THRESHOLD, BUMP_TARGET);

        e.events().publish(
            (Symbol::new(&e, "new_release"), token),
            (vault, deployment),
        );
        Ok(deployment)
    }

    /// Newest vault released for `token`.
    ///
    /// # Errors
    /// * `NoReleases` - nothing has been released for `token`
    pub fn latest_vault(e: Env, token: Address) -> Result<Address, VaultError> {
        releases(&e, &token).last().ok_or(VaultError::NoReleases)
    }

    /// Index the next release for `token` will get.
    pub fn next_deployment(e: Env, token: Address) -> u32 {
        releases(&e, &token).len()
    }

    /// Release number `index` for `token`.
    ///
    /// # Errors
    /// * `IndexOutOfRange` - no release with that index
    pub fn vaults(e: Env, token: Address, index: u32) -> Result<Address, VaultError> {
        releases(&e, &token)
            .get(index)
            .ok_or(VaultError::IndexOutOfRange)
    }

    /// Every release for `token`, oldest first. Empty when none.
    pub fn all_vaults(e: Env, token: Address) -> Vec<Address> {
        releases(&e, &token)
    }

    /// Assets with at least one release.
    pub fn tokens(e: Env) -> Vec<Address> {
        e.storage()
            .instance()
            .get(&DataKey::Tokens)
            .unwrap_or_else(|| Vec::new(&e))
    }

    pub fn num_tokens(e: Env) -> u32 {
        Self::tokens(e).len()
    }

    pub fn governance(e: Env) -> Result<Address, VaultError> {
        governance(&e)
    }

    pub fn pending_governance(e: Env) -> Option<Address> {
        e.storage().instance().get(&DataKey::PendingGovernance)
    }

    /// Nominate `pending` as the next governance. Takes effect once
    /// `pending` calls [`VaultRegistry::accept_governance`].
    ///
    /// # Errors
    /// * `NotInitialized` - registry has no governance yet
    pub fn set_governance(e: Env, pending: Address) -> Result<(), VaultError> {
        governance(&e)?.require_auth();
        e.storage()
            .instance()
            .set(&DataKey::PendingGovernance, &pending);
        Ok(())
    }

    /// Complete the hand-off started by `set_governance`.
    ///
    /// # Errors
    /// * `NotPendingGovernance` - `caller` was not nominated
    ///
    /// # Events
    /// Emits `governance_updated` with the new governance address
    pub fn accept_governance(e: Env, caller: Address) -> Result<(), VaultError> {
        governance(&e)?;
        let pending: Option<Address> = e.storage().instance().get(&DataKey::PendingGovernance);
        if pending.as_ref() != Some(&caller) {
            return Err(VaultError::NotPendingGovernance);
        }
        caller.require_auth();

        e.storage().instance().set(&DataKey::Governance, &caller);
        e.storage().instance().remove(&DataKey::PendingGovernance);

        e.events()
            .publish((Symbol::new(&e, "governance_updated"),), caller);
        Ok(())
    }
}
