#![no_std]

//! Building blocks shared by the vault, registry, strategy and affiliate
//! contracts: the canonical error enum, checked fixed-point math and the
//! asset-transfer adapters.

use soroban_sdk::contracterror;

pub mod asset;
pub mod interfaces;
pub mod math;
pub mod text;
pub mod types;

pub use types::StrategyParams;

/// @title  ErrorCategory
/// @notice Groups errors by failure kind for monitoring and off-chain handling.
/// @dev    Off-chain consumers should switch on this value first, then on the
///         specific `VaultError` code for fine-grained handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup errors (codes 1-99).
    Initialization,
    /// Caller lacks the required role (codes 100-199).
    Authorization,
    /// A numeric or structural invariant would be broken (codes 200-299).
    InvariantViolation,
    /// Operation not allowed in the current state (codes 300-399).
    InvalidState,
    /// Zero or otherwise degenerate quantity (codes 400-499).
    ZeroAmount,
    /// Asset transfer did not move the expected balance (codes 500-599).
    TransferFailure,
    /// Checked arithmetic errors (codes 700-799).
    Arithmetic,
}

/// @title  VaultError
/// @notice Canonical error enum shared by every contract in the workspace.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1  -  99  : Initialization
///   100 - 199 : Authorization
///   200 - 299 : InvariantViolation
///   300 - 399 : InvalidState
///   400 - 499 : ZeroAmount
///   500 - 599 : TransferFailure
///   700 - 799 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum VaultError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    NotInitialized = 1,
    /// Contract has already been initialized and cannot be re-initialized.
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the governance address.
    NotGovernance = 100,
    /// Caller is neither management nor governance.
    NotManagement = 101,
    /// Caller is neither guardian nor governance.
    NotGuardian = 102,
    /// Caller may not trigger a harvest.
    NotKeeper = 104,
    /// Caller is not the strategist.
    NotStrategist = 105,
    /// Caller is not the pending governance address.
    NotPendingGovernance = 107,
    /// Caller is not the affiliate (or pending affiliate).
    NotAffiliate = 108,

    // --- InvariantViolation (200-299) ---
    /// Sum of strategy debt ratios would exceed 10000 bps.
    DebtRatioExceeded = 200,
    /// Deposit would push total assets above the deposit limit.
    DepositLimitExceeded = 201,
    /// Realized withdrawal loss exceeds the caller's bound.
    MaxLossExceeded = 202,
    /// Fee exceeds its configured ceiling.
    FeeTooHigh = 203,
    /// Max loss must be in the range 0-10000 bps.
    InvalidMaxLoss = 204,
    /// Minimum debt per harvest would exceed the maximum.
    MinDebtAboveMax = 205,
    /// Share balance is lower than the requested amount.
    InsufficientShares = 206,
    /// Allowance is lower than the requested amount.
    InsufficientAllowance = 207,
    /// Asset balance is lower than the amount the operation needs.
    InsufficientBalance = 208,
    /// Withdrawal queue already holds the maximum number of strategies.
    QueueFull = 209,
    /// Withdrawal queue update is not a valid set of active strategies.
    InvalidQueue = 210,
    /// Recipient is not allowed (e.g. the vault itself).
    InvalidRecipient = 211,
    /// Locked profit unlock period must be positive.
    InvalidDegradation = 212,
    /// Derived token name or symbol is too long.
    NameTooLong = 213,

    // --- InvalidState (300-399) ---
    /// Strategy is not active on this vault.
    StrategyNotActive = 300,
    /// Strategy is already active on this vault.
    StrategyAlreadyActive = 301,
    /// No vault release exists for the asset.
    NoReleases = 302,
    /// Vault is in emergency shutdown.
    EmergencyShutdown = 303,
    /// Reentrancy was detected; the call is rejected.
    ReentrancyDetected = 304,
    /// Strategy already reported at this timestamp.
    ReportTooSoon = 305,
    /// Vault is already the latest release for its asset.
    ReleaseAlreadyLatest = 306,
    /// Strategy's want token is not the vault's asset.
    WrongWant = 307,
    /// Strategy is bound to a different vault.
    WrongVault = 308,
    /// Index is past the end of the list.
    IndexOutOfRange = 309,

    // --- ZeroAmount (400-499) ---
    /// Amount argument must be strictly positive.
    ZeroAmount = 400,
    /// Operation would mint or burn zero shares.
    ZeroShares = 401,
    /// Amount argument must not be negative.
    NegativeAmount = 402,

    // --- TransferFailure (500-599) ---
    /// Token contract rejected the transfer.
    TransferFailed = 500,
    /// Balance delta after a transfer differs from the requested amount.
    BalanceMismatch = 501,

    // --- Arithmetic (700-799) ---
    /// Integer overflow detected during a checked arithmetic operation.
    Overflow = 700,
    /// Subtraction produced a negative amount.
    Underflow = 701,
    /// Division by zero.
    DivisionByZero = 702,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every VaultError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for logging or display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for VaultError {
    fn category(&self) -> ErrorCategory {
        match *self as u32 {
            1..=99 => ErrorCategory::Initialization,
            100..=199 => ErrorCategory::Authorization,
            200..=299 => ErrorCategory::InvariantViolation,
            300..=399 => ErrorCategory::InvalidState,
            400..=499 => ErrorCategory::ZeroAmount,
            500..=599 => ErrorCategory::TransferFailure,
            _ => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            VaultError::NotInitialized => "Contract has not been initialized",
            VaultError::AlreadyInitialized => "Contract has already been initialized",
            VaultError::NotGovernance => "Caller is not governance",
            VaultError::NotManagement => "Caller is neither management nor governance",
            VaultError::NotGuardian => "Caller is neither guardian nor governance",
            VaultError::NotKeeper => "Caller is not allowed to harvest",
            VaultError::NotStrategist => "Caller is not the strategist",
            VaultError::NotPendingGovernance => "Caller is not the pending governance",
            VaultError::NotAffiliate => "Caller is not the affiliate",
            VaultError::DebtRatioExceeded => "Total debt ratio would exceed 10000 bps",
            VaultError::DepositLimitExceeded => "Deposit exceeds the vault deposit limit",
            VaultError::MaxLossExceeded => "Withdrawal loss exceeds the accepted bound",
            VaultError::FeeTooHigh => "Fee exceeds its ceiling",
            VaultError::InvalidMaxLoss => "Max loss must be in range 0-10000 bps",
            VaultError::MinDebtAboveMax => "Minimum debt per harvest exceeds the maximum",
            VaultError::InsufficientShares => "Insufficient share balance",
            VaultError::InsufficientAllowance => "Insufficient allowance",
            VaultError::InsufficientBalance => "Insufficient asset balance",
            VaultError::QueueFull => "Withdrawal queue is full",
            VaultError::InvalidQueue => "Invalid withdrawal queue",
            VaultError::InvalidRecipient => "Recipient is not allowed",
            VaultError::InvalidDegradation => "Profit unlock period must be positive",
            VaultError::NameTooLong => "Derived name or symbol is too long",
            VaultError::StrategyNotActive => "Strategy is not active",
            VaultError::StrategyAlreadyActive => "Strategy is already active",
            VaultError::NoReleases => "No vault release exists for the asset",
            VaultError::EmergencyShutdown => "Vault is in emergency shutdown",
            VaultError::ReentrancyDetected => "Reentrancy detected; call rejected",
            VaultError::ReportTooSoon => "Strategy already reported at this timestamp",
            VaultError::ReleaseAlreadyLatest => "Vault is already the latest release",
            VaultError::WrongWant => "Strategy want token does not match the vault asset",
            VaultError::WrongVault => "Strategy is bound to a different vault",
            VaultError::IndexOutOfRange => "Index out of range",
            VaultError::ZeroAmount => "Amount must be strictly positive (> 0)",
            VaultError::ZeroShares => "Operation would mint or burn zero shares",
            VaultError::NegativeAmount => "Amount must not be negative",
            VaultError::TransferFailed => "Token transfer failed",
            VaultError::BalanceMismatch => "Token balance did not move by the transferred amount",
            VaultError::Overflow => "Integer overflow in checked arithmetic",
            VaultError::Underflow => "Subtraction produced a negative amount",
            VaultError::DivisionByZero => "Division by zero",
        }
    }
}

#[cfg(test)]
mod test_text;
