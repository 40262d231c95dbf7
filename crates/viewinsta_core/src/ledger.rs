use crate::{Credits, LedgerError};

/// Balance every new process starts with.
pub const STARTING_BALANCE: Credits = Credits::from_cents(12_550);

/// In-memory credit balance. Owned by `AppState` and lent to flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    balance: Credits,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Ledger {
    pub fn new(seed: Credits) -> Self {
        Self { balance: seed }
    }

    pub fn balance(&self) -> Credits {
        self.balance
    }

    pub fn earn(&mut self, amount: Credits) -> Credits {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Debits `amount`. Callers validate first; a debit larger than the balance is
    /// refused and leaves the balance untouched.
    pub fn withdraw(&mut self, amount: Credits) -> Result<Credits, LedgerError> {
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })?;
        self.balance = remaining;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earn_then_withdraw() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.earn(Credits::whole(10)), Credits::from_cents(13_550));
        assert_eq!(
            ledger.withdraw(Credits::from_cents(10_250)),
            Ok(Credits::whole(33))
        );
    }

    #[test]
    fn overdraft_is_refused() {
        let mut ledger = Ledger::new(Credits::whole(5));
        let err = ledger.withdraw(Credits::whole(6)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                requested: Credits::whole(6),
                available: Credits::whole(5),
            }
        );
        assert_eq!(ledger.balance(), Credits::whole(5));
    }

    #[test]
    fn withdrawing_everything_leaves_zero() {
        let mut ledger = Ledger::new(Credits::whole(5));
        assert_eq!(ledger.withdraw(Credits::whole(5)), Ok(Credits::ZERO));
    }
}
