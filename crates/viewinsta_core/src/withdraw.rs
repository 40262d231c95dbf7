use crate::{Credits, Ledger, LedgerError, ValidationError};

pub const PROCESSING_FEE: Credits = Credits::from_cents(250);
pub const MINIMUM_WITHDRAWAL: Credits = Credits::whole(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WithdrawStage {
    #[default]
    Form,
    Confirm {
        amount: Credits,
    },
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WithdrawFlow {
    amount_text: String,
    stage: WithdrawStage,
    error: Option<ValidationError>,
}

/// Checks in display order: format, balance, minimum. Only the first failure is reported.
pub fn validate_withdrawal(amount_text: &str, balance: Credits) -> Result<Credits, ValidationError> {
    let amount: Credits = amount_text
        .parse()
        .map_err(|_| ValidationError::InvalidAmount)?;
    if amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }
    match amount.checked_add(PROCESSING_FEE) {
        Some(total) if total <= balance => {}
        _ => return Err(ValidationError::ExceedsBalance),
    }
    if amount < MINIMUM_WITHDRAWAL {
        return Err(ValidationError::BelowMinimum);
    }
    Ok(amount)
}

impl WithdrawFlow {
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn stage(&self) -> WithdrawStage {
        self.stage
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn set_amount(&mut self, text: String) -> bool {
        if self.stage != WithdrawStage::Form {
            return false;
        }
        self.amount_text = text;
        true
    }

    /// `None` outside the form stage.
    pub fn submit(&mut self, balance: Credits) -> Option<Result<Credits, ValidationError>> {
        if self.stage != WithdrawStage::Form {
            return None;
        }
        let result = validate_withdrawal(&self.amount_text, balance);
        match result {
            Ok(amount) => {
                self.error = None;
                self.stage = WithdrawStage::Confirm { amount };
            }
            Err(err) => self.error = Some(err),
        }
        Some(result)
    }

    /// Debits amount plus fee and returns the total taken. `None` when not confirming.
    pub fn confirm(&mut self, ledger: &mut Ledger) -> Option<Result<Credits, LedgerError>> {
        let WithdrawStage::Confirm { amount } = self.stage else {
            return None;
        };
        let total = amount.saturating_add(PROCESSING_FEE);
        let result = ledger.withdraw(total).map(|_| total);
        match result {
            Ok(_) => {
                self.stage = WithdrawStage::Success;
                self.amount_text.clear();
            }
            Err(_) => {
                self.stage = WithdrawStage::Form;
                self.error = Some(ValidationError::ExceedsBalance);
            }
        }
        Some(result)
    }

    /// Confirm back to form. The typed amount stays in the field.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.stage, WithdrawStage::Confirm { .. }) {
            return false;
        }
        self.stage = WithdrawStage::Form;
        true
    }

    pub fn acknowledge(&mut self) -> bool {
        if self.stage != WithdrawStage::Success {
            return false;
        }
        self.stage = WithdrawStage::Form;
        self.amount_text.clear();
        true
    }
}
