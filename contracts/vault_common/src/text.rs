//! Token name/symbol derivation.

use crate::VaultError;
use soroban_sdk::{Env, String};

/// Longest derived name or symbol, in bytes.
pub const MAX_TEXT_LEN: usize = 64;

/// Builds `prefix + body + suffix`, e.g. `"af" + "USDC"`.
pub fn concat(e: &Env, prefix: &str, body: &String, suffix: &str) -> Result<String, VaultError> {
    let body_len = body.len() as usize;
    let start = prefix.len();
    let end = start + body_len;
    let total = end + suffix.len();
    if total > MAX_TEXT_LEN {
        return Err(VaultError::NameTooLong);
    }

    let mut buf = [0u8; MAX_TEXT_LEN];
    buf[..start].copy_from_slice(prefix.as_bytes());
    body.copy_into_slice(&mut buf[start..end]);
    buf[end..total].copy_from_slice(suffix.as_bytes());
    Ok(String::from_bytes(e, &buf[..total]))
}
