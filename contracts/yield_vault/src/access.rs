//! Role checks.
//!
//! Every gated entry point receives the acting address explicitly, checks it
//! against the stored role and then demands its authorization.

use crate::storage::{self, VaultConfig};
use soroban_sdk::{Address, Env};
use vault_common::VaultError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Governance only.
    Governance,
    /// Management or governance.
    Management,
    /// Guardian or governance.
    Guardian,
}

impl Role {
    fn holds(self, config: &VaultConfig, caller: &Address) -> bool {
        let is_governance = *caller == config.governance;
        match self {
            Role::Governance => is_governance,
            Role::Management => is_governance || *caller == config.management,
            Role::Guardian => is_governance || *caller == config.guardian,
        }
    }

    fn error(self) -> VaultError {
        match self {
            Role::Governance => VaultError::NotGovernance,
            Role::Management => VaultError::NotManagement,
            Role::Guardian => VaultError::NotGuardian,
        }
    }
}

/// Loads the config, rejects `caller` unless it holds `role`, then requires
/// its signature. Returns the config so callers need not load it again.
pub fn require_role(e: &Env, caller: &Address, role: Role) -> Result<VaultConfig, VaultError> {
    let config = storage::config(e)?;
    if !role.holds(&config, caller) {
        return Err(role.error());
    }
    caller.require_auth();
    Ok(config)
}
