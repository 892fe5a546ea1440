use crate::text::{concat, MAX_TEXT_LEN};
use crate::VaultError;
use soroban_sdk::{Env, String};

#[test]
fn test_concat_prefix_and_suffix() {
    let e = Env::default();
    let usdc = String::from_str(&e, "USDC");
    assert_eq!(
        concat(&e, "af", &usdc, ""),
        Ok(String::from_str(&e, "afUSDC"))
    );
    assert_eq!(
        concat(&e, "", &usdc, " yVault"),
        Ok(String::from_str(&e, "USDC yVault"))
    );
    assert_eq!(
        concat(&e, "Affiliate ", &usdc, ""),
        Ok(String::from_str(&e, "Affiliate USDC"))
    );
}

#[test]
fn test_concat_empty_body() {
    let e = Env::default();
    let empty = String::from_str(&e, "");
    assert_eq!(concat(&e, "yv", &empty, ""), Ok(String::from_str(&e, "yv")));
}

#[test]
fn test_concat_too_long() {
    let e = Env::default();
    let long = String::from_bytes(&e, &[b'x'; MAX_TEXT_LEN]);
    assert_eq!(concat(&e, "af", &long, ""), Err(VaultError::NameTooLong));
}
