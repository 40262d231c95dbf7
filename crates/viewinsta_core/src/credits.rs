use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fixed-point credit amount, stored in hundredths of a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Credits(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a credit amount: {input:?}")]
pub struct ParseCreditsError {
    pub input: String,
}

impl Credits {
    pub const ZERO: Credits = Credits(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn whole(credits: u64) -> Self {
        Self(credits * 100)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Credits) -> Option<Credits> {
        self.0.checked_add(other.0).map(Credits)
    }

    pub fn checked_sub(self, other: Credits) -> Option<Credits> {
        self.0.checked_sub(other.0).map(Credits)
    }

    pub fn saturating_add(self, other: Credits) -> Credits {
        Credits(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Accepts `123`, `123.4`, `123.45`, `.5`, `100.` and an optional leading `+`.
/// Signs other than `+`, exponents and more than two fractional digits are rejected.
impl FromStr for Credits {
    type Err = ParseCreditsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = || ParseCreditsError {
            input: raw.to_string(),
        };
        let text = raw.trim();
        let text = text.strip_prefix('+').unwrap_or(text);

        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if frac_part.len() > 2 {
            return Err(err());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(err());
        }

        let whole = if int_part.is_empty() {
            0
        } else {
            int_part.parse::<u64>().map_err(|_| err())?
        };
        let frac = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<u64>().map_err(|_| err())? * 10,
            _ => frac_part.parse::<u64>().map_err(|_| err())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac))
            .map(Credits)
            .ok_or_else(err)
    }
}
