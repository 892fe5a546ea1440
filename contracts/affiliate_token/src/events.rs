use soroban_sdk::{Address, Env, Symbol};

/// Emitted when assets are routed into the vault.
///
/// # Topics
/// * `Symbol` - "affiliate_deposit"
/// * `Address` - The depositor
///
/// # Data
/// * `Address` - Vault the assets went to
/// * `i128` - Assets deposited
/// * `i128` - Shares minted
pub fn emit_deposit(e: &Env, sender: &Address, vault: &Address, amount: i128, shares: i128) {
    let topics = (Symbol::new(e, "affiliate_deposit"), sender.clone());
    e.events().publish(topics, (vault.clone(), amount, shares));
}

/// Emitted when shares are redeemed through the vault.
///
/// # Topics
/// * `Symbol` - "affiliate_withdraw"
/// * `Address` - The share owner
///
/// # Data
/// * `Address` - Vault the assets came from
/// * `i128` - Shares burned
/// * `i128` - Assets paid out
pub fn emit_withdraw(e: &Env, sender: &Address, vault: &Address, shares: i128, assets: i128) {
    let topics = (Symbol::new(e, "affiliate_withdraw"), sender.clone());
    e.events().publish(topics, (vault.clone(), shares, assets));
}

pub fn emit_transfer(e: &Env, from: &Address, to: &Address, amount: i128) {
    let topics = (Symbol::new(e, "transfer"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}

pub fn emit_approval(e: &Env, owner: &Address, spender: &Address, amount: i128) {
    let topics = (Symbol::new(e, "approval"), owner.clone(), spender.clone());
    e.events().publish(topics, amount);
}

/// Emitted the first time the registry's latest vault is looked up.
///
/// # Topics
/// * `Symbol` - "vault_resolved"
/// * `Address` - The asset
///
/// # Data
/// * `Address` - The vault now cached
pub fn emit_vault_resolved(e: &Env, token: &Address, vault: &Address) {
    let topics = (Symbol::new(e, "vault_resolved"), token.clone());
    e.events().publish(topics, vault.clone());
}

pub fn emit_affiliate_updated(e: &Env, affiliate: &Address) {
    e.events()
        .publish((Symbol::new(e, "affiliate_updated"),), affiliate.clone());
}
