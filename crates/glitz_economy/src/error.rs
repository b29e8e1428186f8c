//! # Economy Error Types
//!
//! All errors that can occur in the economy core.
//!
//! Financial errors are detected *before* any mutation: an operation that
//! returns one of these left every balance exactly as it found it. Soft-fail
//! cases (a full room, an approval that targets a missing request) are not
//! errors at all; they are reported through outcome enums by the components
//! that own them.

use thiserror::Error;

use crate::wallet::Currency;

/// Errors that can occur in the economy core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Attempted debit exceeds the available balance.
    #[error("insufficient funds: need {required} {currency}, have {available}")]
    InsufficientFunds {
        /// The currency that was short.
        currency: Currency,
        /// The amount the operation required.
        required: u64,
        /// The amount actually available.
        available: u64,
    },

    /// Withdrawal amount is zero.
    #[error("invalid withdrawal amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: u64,
    },

    /// SVIP tier outside the purchasable range.
    #[error("invalid svip tier: {0}")]
    InvalidTier(u8),

    /// Recharge pack not present in the catalog.
    #[error("unknown recharge pack: {0}")]
    UnknownPack(String),

    /// Arithmetic overflow in a balance calculation.
    #[error("arithmetic overflow in balance calculation")]
    ArithmeticOverflow,

    /// Invalid catalog or session configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
