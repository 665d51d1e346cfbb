//! # Balance Ledger
//!
//! The user's cash balance: a single Money value with a validating credit
//! side and a precondition-trusting debit side. Checkout verifies coverage
//! before debiting, so the balance is never observed negative through the
//! public operations.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::money::Money;

/// The session's cash balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    funds: Money,
}

impl Balance {
    /// Opens the ledger with the given funds.
    pub const fn new(opening: Money) -> Self {
        Balance { funds: opening }
    }

    /// Current funds.
    #[inline]
    pub const fn current(&self) -> Money {
        self.funds
    }

    /// True when `amount` can be debited without going negative.
    #[inline]
    pub fn can_cover(&self, amount: Money) -> bool {
        amount <= self.funds
    }

    /// Adds funds and returns the new balance.
    ///
    /// Fails with [`StoreError::InvalidAmount`] unless the amount is
    /// strictly positive; the balance is untouched on failure.
    pub fn credit(&mut self, amount: Money) -> StoreResult<Money> {
        if !amount.is_positive() {
            return Err(StoreError::InvalidAmount);
        }
        self.funds += amount;
        Ok(self.funds)
    }

    /// Removes funds without re-checking coverage.
    ///
    /// Callers check `can_cover` first; checkout fails with
    /// `InsufficientFunds` before this runs.
    pub(crate) fn debit(&mut self, amount: Money) {
        debug_assert!(self.can_cover(amount), "debit exceeds balance");
        self.funds -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_adds_and_returns_new_balance() {
        let mut balance = Balance::new(Money::from_cents(200_00));

        let after = balance.credit(Money::from_cents(25_50)).unwrap();
        assert_eq!(after, Money::from_cents(225_50));
        assert_eq!(balance.current(), Money::from_cents(225_50));
    }

    #[test]
    fn test_credit_rejects_non_positive_amounts() {
        let mut balance = Balance::new(Money::from_cents(200_00));

        assert!(matches!(
            balance.credit(Money::zero()),
            Err(StoreError::InvalidAmount)
        ));
        assert!(matches!(
            balance.credit(Money::from_cents(-500)),
            Err(StoreError::InvalidAmount)
        ));
        // Untouched after both failures
        assert_eq!(balance.current(), Money::from_cents(200_00));
    }

    #[test]
    fn test_debit_decrements() {
        let mut balance = Balance::new(Money::from_cents(200_00));

        balance.debit(Money::from_cents(150_00));
        assert_eq!(balance.current(), Money::from_cents(50_00));
    }

    #[test]
    fn test_can_cover_boundary() {
        let balance = Balance::new(Money::from_cents(100_00));

        assert!(balance.can_cover(Money::from_cents(100_00)));
        assert!(balance.can_cover(Money::zero()));
        assert!(!balance.can_cover(Money::from_cents(100_01)));
    }
}
