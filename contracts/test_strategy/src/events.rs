use soroban_sdk::{Address, Env, Symbol};

/// Emitted after the strategy reports to its vault.
///
/// # Topics
/// * `Symbol` - "harvested"
/// * `Address` - The caller that triggered the harvest
///
/// # Data
/// * `i128` - Profit reported
/// * `i128` - Loss reported
/// * `i128` - Debt repaid
/// * `i128` - Debt still outstanding
pub fn emit_harvested(
    e: &Env,
    caller: &Address,
    profit: i128,
    loss: i128,
    debt_payment: i128,
    outstanding: i128,
) {
    let topics = (Symbol::new(e, "harvested"), caller.clone());
    e.events()
        .publish(topics, (profit, loss, debt_payment, outstanding));
}

/// Emitted when the strategy enters emergency exit.
///
/// # Topics
/// * `Symbol` - "emergency_exit"
/// * `Address` - The caller
pub fn emit_emergency_exit(e: &Env, caller: &Address) {
    let topics = (Symbol::new(e, "emergency_exit"), caller.clone());
    e.events().publish(topics, ());
}

/// Emitted when the keeper or strategist changes.
///
/// # Topics
/// * `Symbol` - "role_updated"
/// * `Symbol` - The role
///
/// # Data
/// * `Address` - The new holder
pub fn emit_role_updated(e: &Env, role: &str, holder: &Address) {
    let topics = (Symbol::new(e, "role_updated"), Symbol::new(e, role));
    e.events().publish(topics, holder.clone());
}
