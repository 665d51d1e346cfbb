//! # Error Types
//!
//! Domain-specific error types for loja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  loja-core errors (this file)                                          │
//! │  └── StoreError       - Business rule violations                       │
//! │                                                                         │
//! │  loja-core parse errors (money.rs)                                     │
//! │  └── ParseMoneyError  - Text amount cannot be read                     │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── SessionError     - What the session loop reports                  │
//! │                                                                         │
//! │  Flow: StoreError ──► SessionError ──► "Error: ..." on screen          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, counts, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Store Error
// =============================================================================

/// Business rule violations raised by store operations.
///
/// Every operation validates fully before touching state, so any of these
/// errors guarantees the store is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Product id is absent from the catalog.
    ///
    /// Carries the normalized id that was looked up.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog stock for the product is exactly zero at add time.
    #[error("'{0}' is out of stock")]
    OutOfStock(String),

    /// Quantity input was missing, non-numeric, or not strictly positive.
    #[error("Quantity must be a positive whole number")]
    InvalidQuantity,

    /// Requested quantity, together with what the cart already reserves,
    /// exceeds the catalog stock.
    ///
    /// ## When This Occurs
    /// ```text
    /// Add to cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: in cart 0, available 3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "boné", available: 3, in_cart: 0, requested: 5 }
    ///      │
    ///      ▼
    /// Screen shows: "Error: Insufficient stock for boné: ..."
    /// ```
    #[error(
        "Insufficient stock for {product_id}: available {available}, in cart {in_cart}, requested {requested}"
    )]
    InsufficientStock {
        product_id: String,
        available: u32,
        in_cart: u32,
        requested: u32,
    },

    /// Operation requires a non-empty cart.
    #[error("The cart is empty")]
    CartEmpty,

    /// Removal target has no line in the cart.
    #[error("'{0}' is not in the cart")]
    NotInCart(String),

    /// Removal quantity exceeds what the cart holds for the product.
    #[error("Cannot remove {requested} units of '{product_id}': only {in_cart} in the cart")]
    ExceedsCartQuantity {
        product_id: String,
        in_cart: u32,
        requested: u32,
    },

    /// Balance top-up amount was unparsable or not strictly positive.
    #[error("Amount must be a positive number")]
    InvalidAmount,

    /// Checkout total exceeds the current balance.
    #[error("Insufficient funds: total {total}, balance {balance}")]
    InsufficientFunds { total: Money, balance: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
