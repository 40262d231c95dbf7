use thiserror::Error;

use crate::Credits;

/// User input that is malformed or out of policy. Shown inline by the flow that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount.")]
    InvalidAmount,
    #[error("Withdrawal amount plus fee cannot exceed your balance.")]
    ExceedsBalance,
    #[error("Minimum withdrawal amount is 100 credits.")]
    BelowMinimum,
    #[error("Please select an image and enter a prompt.")]
    MissingImageOrPrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("cannot debit {requested} credits from a balance of {available}")]
    InsufficientFunds {
        requested: Credits,
        available: Credits,
    },
}
