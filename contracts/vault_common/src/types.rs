use soroban_sdk::contracttype;

/// Per-strategy accounting kept by the vault.
///
/// `activation == 0` means the strategy was never added.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StrategyParams {
    /// Strategist fee on gains, in basis points.
    pub performance_fee: u32,
    /// Ledger timestamp when the strategy was added.
    pub activation: u64,
    /// Share of vault assets the strategy may hold, in basis points.
    pub debt_ratio: u32,
    /// Credit below this amount is not extended on a harvest.
    pub min_debt_per_harvest: i128,
    /// Upper bound on credit extended in a single harvest.
    pub max_debt_per_harvest: i128,
    /// Ledger timestamp of the last report.
    pub last_report: u64,
    /// Assets currently lent to the strategy.
    pub total_debt: i128,
    /// Lifetime reported gains.
    pub total_gain: i128,
    /// Lifetime reported losses.
    pub total_loss: i128,
}
