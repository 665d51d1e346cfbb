//! # loja-core: Pure Business Logic for Loja Virtual
//!
//! This crate is the **heart** of Loja Virtual. It contains all business
//! logic as pure, deterministic code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Loja Virtual Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/terminal (binary: loja)                   │   │
//! │  │    menu ──► prompts ──► dispatch ──► report ──► re-prompt       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ method calls on Store                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ loja-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  catalog  │  │   cart    │  │  ledger   │  │   │
//! │  │   │   Money   │  │  Product  │  │   Cart    │  │  Balance  │  │   │
//! │  │   │   parse   │  │  Catalog  │  │ CartLine  │  │   credit  │  │   │
//! │  │   └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  │   │
//! │  │         └──────────────┴───────┬──────┴──────────────┘        │   │
//! │  │                          ┌─────▼─────┐                        │   │
//! │  │                          │   store   │  the transaction core  │   │
//! │  │                          │   Store   │  validate-then-mutate  │   │
//! │  │                          └───────────┘                        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • NO FLOATS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer-cent arithmetic (no floating point!)
//! - [`catalog`] - Product records and the normalized-id catalog
//! - [`cart`] - The shopping cart and its quantity rules
//! - [`ledger`] - The cash balance
//! - [`store`] - The Store aggregate and its transaction operations
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Logic**: deterministic - same store, same call, same result
//! 2. **No I/O**: stdin, stdout, files, network are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are euro cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//! 5. **Validate Then Mutate**: a failed operation changes nothing
//!
//! ## Example Usage
//!
//! ```rust
//! use loja_core::{Money, Store};
//!
//! let mut store = Store::open();
//!
//! // Reserve three shirts: cart gains 3, stock drops to 97
//! store.add_to_cart("camiseta", 3).unwrap();
//! assert_eq!(store.cart().total_value(store.catalog()), Money::from_cents(150_00));
//!
//! // Pay: the balance drops by the total, the cart empties,
//! // and the sold stock stays sold
//! let receipt = store.checkout().unwrap();
//! assert_eq!(receipt.balance_after, Money::from_cents(50_00));
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use loja_core::Money` instead of
// `use loja_core::money::Money`

pub use cart::{Cart, CartLine};
pub use catalog::{normalize_id, Catalog, Product};
pub use error::{StoreError, StoreResult};
pub use ledger::Balance;
pub use money::{Money, ParseMoneyError};
pub use store::{AddedToCart, CartRow, CartView, Receipt, RemovedFromCart, Store};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Funds every session opens with: 200.00€.
///
/// ## Why a constant?
/// The store has no persistence, so each run starts from the same known
/// state. The terminal app may override this through configuration; the
/// business logic only ever sees the resulting Money value.
pub const OPENING_BALANCE: Money = Money::from_cents(200_00);
