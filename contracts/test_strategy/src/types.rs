use soroban_sdk::contracttype;

// ─── Storage keys ───────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Vault,
    Want,
    Strategist,
    Rewards,
    Keeper,
    EmergencyExit,
}

// ─── Harvest outcome ────────────────────────────────────────────────────────

/// What a harvest reports to the vault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Harvest {
    pub profit: i128,
    pub loss: i128,
    pub debt_payment: i128,
}

impl Harvest {
    /// Assets the vault may pull after the report.
    pub fn returned(&self) -> i128 {
        self.profit + self.debt_payment
    }
}

/// Normal harvest: repay what is outstanding, then compare what is left
/// against the remaining debt.
pub fn prepare_return(total_debt: i128, balance: i128, debt_outstanding: i128) -> Harvest {
    let debt_payment = balance.min(debt_outstanding).max(0);
    let remaining_assets = balance - debt_payment;
    let remaining_debt = (total_debt - debt_payment).max(0);
    if remaining_assets > remaining_debt {
        Harvest {
            profit: remaining_assets - remaining_debt,
            loss: 0,
            debt_payment,
        }
    } else {
        Harvest {
            profit: 0,
            loss: remaining_debt - remaining_assets,
            debt_payment,
        }
    }
}

/// Emergency-exit harvest: everything held is freed and offered back.
pub fn liquidate_all(freed: i128, debt_outstanding: i128) -> Harvest {
    if freed < debt_outstanding {
        Harvest {
            profit: 0,
            loss: debt_outstanding - freed,
            debt_payment: freed,
        }
    } else {
        Harvest {
            profit: freed - debt_outstanding,
            loss: 0,
            debt_payment: debt_outstanding,
        }
    }
}
