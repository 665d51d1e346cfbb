//! # Input Parsing
//!
//! Turns raw prompt lines into the values the store operations take,
//! mapping parse failures straight onto the domain error taxonomy.
//!
//! The parsers are deliberately strict in the same places the business
//! rules are: a quantity must already be a positive whole number here,
//! while an amount's sign is let through and judged by the ledger.

use loja_core::{Money, StoreError, StoreResult};

/// Parses a quantity line: a positive whole number of units.
///
/// Missing, non-numeric, and zero inputs all read as the same
/// [`StoreError::InvalidQuantity`] the store itself would raise.
pub fn parse_quantity(raw: &str) -> StoreResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(StoreError::InvalidQuantity),
    }
}

/// Parses a balance top-up line: decimal euros with `.` or `,`.
///
/// Only parse failures are rejected here. A negative amount parses fine
/// and is then refused by `credit_balance`: parse first, judge the value
/// second.
pub fn parse_amount(raw: &str) -> StoreResult<Money> {
    raw.parse::<Money>().map_err(|_| StoreError::InvalidAmount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_accepts_positive_integers() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity("  42 ").unwrap(), 42);
    }

    #[test]
    fn test_quantity_rejects_zero_and_garbage() {
        for raw in ["0", "", "  ", "-1", "3.5", "three", "1 2"] {
            assert!(
                matches!(parse_quantity(raw), Err(StoreError::InvalidQuantity)),
                "'{raw}' should be an invalid quantity"
            );
        }
    }

    #[test]
    fn test_amount_accepts_both_separators() {
        assert_eq!(parse_amount("25").unwrap(), Money::from_cents(25_00));
        assert_eq!(parse_amount("25.50").unwrap(), Money::from_cents(25_50));
        assert_eq!(parse_amount("25,50").unwrap(), Money::from_cents(25_50));
    }

    #[test]
    fn test_amount_lets_negative_through_for_the_ledger_to_refuse() {
        assert_eq!(parse_amount("-5").unwrap(), Money::from_cents(-5_00));
    }

    #[test]
    fn test_amount_rejects_garbage_and_sub_cent_precision() {
        for raw in ["", "   ", "abc", "1.2.3", "5€", "0.005"] {
            assert!(
                matches!(parse_amount(raw), Err(StoreError::InvalidAmount)),
                "'{raw}' should be an invalid amount"
            );
        }
    }
}
