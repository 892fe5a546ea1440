use soroban_sdk::{Address, Env, Symbol};
use vault_common::StrategyParams;

/// Emitted when assets are deposited.
///
/// # Topics
/// * `Symbol` - "deposit"
/// * `Address` - The share recipient
///
/// # Data
/// * `i128` - Assets deposited
/// * `i128` - Shares minted
pub fn emit_deposit(e: &Env, recipient: &Address, amount: i128, shares: i128) {
    let topics = (Symbol::new(e, "deposit"), recipient.clone());
    e.events().publish(topics, (amount, shares));
}

/// Emitted when shares are redeemed.
///
/// # Topics
/// * `Symbol` - "withdraw"
/// * `Address` - The share owner
///
/// # Data
/// * `Address` - Asset recipient
/// * `i128` - Shares burned
/// * `i128` - Assets paid out
/// * `i128` - Loss realized from strategies
pub fn emit_withdraw(
    e: &Env,
    owner: &Address,
    recipient: &Address,
    shares: i128,
    value: i128,
    loss: i128,
) {
    let topics = (Symbol::new(e, "withdraw"), owner.clone());
    e.events()
        .publish(topics, (recipient.clone(), shares, value, loss));
}

/// Emitted when a strategy is added.
///
/// # Topics
/// * `Symbol` - "strategy_added"
/// * `Address` - The strategy
///
/// # Data
/// * `u32` - Debt ratio, bps
/// * `i128` - Minimum debt per harvest
/// * `i128` - Maximum debt per harvest
/// * `u32` - Performance fee, bps
pub fn emit_strategy_added(e: &Env, strategy: &Address, params: &StrategyParams) {
    let topics = (Symbol::new(e, "strategy_added"), strategy.clone());
    let data = (
        params.debt_ratio,
        params.min_debt_per_harvest,
        params.max_debt_per_harvest,
        params.performance_fee,
    );
    e.events().publish(topics, data);
}

/// Emitted after a strategy reports.
///
/// # Topics
/// * `Symbol` - "strategy_reported"
/// * `Address` - The strategy
///
/// # Data
/// * `i128` - Gain reported
/// * `i128` - Loss reported
/// * `i128` - Debt repaid
/// * `i128` - Credit extended
/// * `StrategyParams` - Params after the report
pub fn emit_strategy_reported(
    e: &Env,
    strategy: &Address,
    gain: i128,
    loss: i128,
    debt_paid: i128,
    credit: i128,
    params: &StrategyParams,
) {
    let topics = (Symbol::new(e, "strategy_reported"), strategy.clone());
    let data = (gain, loss, debt_paid, credit, params.clone());
    e.events().publish(topics, data);
}

/// Emitted when a strategy's debt ratio is set to zero.
///
/// # Topics
/// * `Symbol` - "strategy_revoked"
/// * `Address` - The strategy
pub fn emit_strategy_revoked(e: &Env, strategy: &Address) {
    let topics = (Symbol::new(e, "strategy_revoked"), strategy.clone());
    e.events().publish(topics, ());
}

/// Emitted when a strategy is replaced by a new one.
///
/// # Topics
/// * `Symbol` - "strategy_migrated"
/// * `Address` - The old strategy
///
/// # Data
/// * `Address` - The new strategy
pub fn emit_strategy_migrated(e: &Env, old_strategy: &Address, new_strategy: &Address) {
    let topics = (Symbol::new(e, "strategy_migrated"), old_strategy.clone());
    e.events().publish(topics, new_strategy.clone());
}

/// Emitted when one of a strategy's limits changes.
///
/// # Topics
/// * `Symbol` - "strategy_updated"
/// * `Address` - The strategy
/// * `Symbol` - Which parameter changed
///
/// # Data
/// * `i128` - New value
pub fn emit_strategy_updated(e: &Env, strategy: &Address, field: &str, value: i128) {
    let topics = (
        Symbol::new(e, "strategy_updated"),
        strategy.clone(),
        Symbol::new(e, field),
    );
    e.events().publish(topics, value);
}

/// Emitted when the withdrawal queue is replaced or edited.
///
/// # Topics
/// * `Symbol` - "queue_updated"
///
/// # Data
/// * `Vec<Address>` - The new queue
pub fn emit_queue_updated(e: &Env, queue: &soroban_sdk::Vec<Address>) {
    e.events()
        .publish((Symbol::new(e, "queue_updated"),), queue.clone());
}

/// Emitted when emergency shutdown is toggled.
///
/// # Topics
/// * `Symbol` - "emergency_shutdown"
///
/// # Data
/// * `bool` - New state
pub fn emit_emergency_shutdown(e: &Env, active: bool) {
    e.events()
        .publish((Symbol::new(e, "emergency_shutdown"),), active);
}

/// Emitted when a role holder changes.
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

/// Emitted when a numeric vault setting changes.
///
/// # Topics
/// * `Symbol` - "config_updated"
/// * `Symbol` - The setting
///
/// # Data
/// * `i128` - New value
pub fn emit_config_updated(e: &Env, setting: &str, value: i128) {
    let topics = (Symbol::new(e, "config_updated"), Symbol::new(e, setting));
    e.events().publish(topics, value);
}

/// Emitted when shares move between accounts (mint and burn included).
///
/// # Topics
/// * `Symbol` - "transfer"
/// * `Address` - Sender
/// * `Address` - Receiver
///
/// # Data
/// * `i128` - Shares moved
pub fn emit_transfer(e: &Env, from: &Address, to: &Address, amount: i128) {
    let topics = (Symbol::new(e, "transfer"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}

/// Emitted when an allowance is set.
///
/// # Topics
/// * `Symbol` - "approval"
/// * `Address` - Owner
/// * `Address` - Spender
///
/// # Data
/// * `i128` - Allowance
pub fn emit_approval(e: &Env, owner: &Address, spender: &Address, amount: i128) {
    let topics = (Symbol::new(e, "approval"), owner.clone(), spender.clone());
    e.events().publish(topics, amount);
}

/// Emitted when stray tokens are swept to governance.
///
/// # Topics
/// * `Symbol` - "swept"
/// * `Address` - The token
///
/// # Data
/// * `i128` - Amount swept
pub fn emit_swept(e: &Env, token: &Address, amount: i128) {
    let topics = (Symbol::new(e, "swept"), token.clone());
    e.events().publish(topics, amount);
}
