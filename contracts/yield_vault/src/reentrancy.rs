use crate::storage;
use soroban_sdk::Env;
use vault_common::VaultError;

/// Runs `f` with the vault's entry flag set. A nested entry fails with
/// `ReentrancyDetected`; the flag is cleared whether `f` succeeds or not.
pub fn with_reentrancy_guard<T, F>(e: &Env, f: F) -> Result<T, VaultError>
where
    F: FnOnce() -> Result<T, VaultError>,
{
    if storage::is_entered(e) {
        return Err(VaultError::ReentrancyDetected);
    }
    storage::set_entered(e, true);
    let result = f();
    storage::set_entered(e, false);
    result
}
