//! # Cart
//!
//! The shopping cart: how many units of each product the user has reserved.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart State Changes                                │
//! │                                                                         │
//! │  Store Operation           Cart Change              Stock Change        │
//! │  ───────────────           ───────────              ────────────        │
//! │                                                                         │
//! │  add_to_cart ────────────► line quantity += n ────► available -= n     │
//! │                                                                         │
//! │  remove_from_cart ───────► line quantity -= n ────► available += n     │
//! │                            (line deleted at 0)                          │
//! │                                                                         │
//! │  checkout ───────────────► clear() ───────────────► (unchanged)        │
//! │                                                                         │
//! │  NOTE: The cart holds quantities only. Prices are read from the        │
//! │        catalog at display and checkout time, never copied here.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_id, Catalog};
use crate::money::Money;

/// One reserved product in the cart.
///
/// ## Invariant
/// `quantity` is never zero: a line that would drop to zero is removed
/// from the cart instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Normalized product id.
    product_id: String,

    /// Reserved units, always > 0.
    quantity: u32,
}

impl CartLine {
    /// The normalized product id this line reserves.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Reserved units.
    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id
/// - Line quantities are always > 0 (setting 0 removes the line)
/// - Lines keep insertion order, which is the display order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Reserved quantity for a product, zero if it has no line.
    ///
    /// The id is normalized before matching, like every id boundary.
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        let normalized = normalize_id(product_id);
        self.lines
            .iter()
            .find(|line| line.product_id == normalized)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Sets the reserved quantity for a product.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line entirely
    /// - An existing line is updated in place, keeping its position
    /// - A new line is appended at the end
    ///
    /// The store coordinates every call with the matching stock
    /// adjustment; calling this on its own moves no stock.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        let normalized = normalize_id(product_id);

        if quantity == 0 {
            self.lines.retain(|line| line.product_id != normalized);
            return;
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == normalized)
        {
            line.quantity = quantity;
            return;
        }

        self.lines.push(CartLine {
            product_id: normalized,
            quantity,
        });
    }

    /// Iterates cart lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Total value of the cart at current catalog prices.
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::cart::Cart;
    /// use loja_core::catalog::Catalog;
    /// use loja_core::money::Money;
    ///
    /// let catalog = Catalog::seed();
    /// let mut cart = Cart::new();
    /// cart.set_quantity("camiseta", 3);
    ///
    /// assert_eq!(cart.total_value(&catalog), Money::from_cents(150_00));
    /// ```
    pub fn total_value(&self, catalog: &Catalog) -> Money {
        self.lines
            .iter()
            .map(|line| {
                let product = catalog
                    .lookup(&line.product_id)
                    .expect("cart line references a product missing from the catalog");
                product.unit_price() * line.quantity
            })
            .sum()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
