//! # Store Operations
//!
//! The `Store` aggregate owns the catalog, the cart, and the balance, and is
//! the only place where more than one of them changes in a single call.
//!
//! ## The Transaction Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Validate Fully, Then Mutate All-Or-Nothing                 │
//! │                                                                         │
//! │  add_to_cart("camiseta", 3)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  VALIDATE (no state touched yet)                                 │  │
//! │  │  1. product exists?          ── no ──► Err(ProductNotFound)      │  │
//! │  │  2. any stock at all?        ── no ──► Err(OutOfStock)           │  │
//! │  │  3. quantity > 0?            ── no ──► Err(InvalidQuantity)      │  │
//! │  │  4. in_cart + qty ≤ stock?   ── no ──► Err(InsufficientStock)    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │       │ all pass                                                        │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  MUTATE (cannot fail anymore)                                    │  │
//! │  │  cart line += qty    AND    catalog stock -= qty                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Any Err means the store is byte-for-byte what it was before the call. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation here follows that shape. It is what keeps the stock
//! conservation invariant true: stock and cart always move together.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::{normalize_id, Catalog};
use crate::error::{StoreError, StoreResult};
use crate::ledger::Balance;
use crate::money::Money;

// =============================================================================
// Operation Outcomes
// =============================================================================

/// What a successful `add_to_cart` reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedToCart {
    /// Normalized product id.
    pub product_id: String,

    /// Units added by this call.
    pub quantity_added: u32,

    /// Units the cart line holds after the add.
    pub line_quantity: u32,

    /// Units still purchasable after the add.
    pub remaining_stock: u32,
}

/// What a successful `remove_from_cart` reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovedFromCart {
    /// Normalized product id.
    pub product_id: String,

    /// Units removed by this call.
    pub quantity_removed: u32,

    /// Units left on the cart line (0 means the line is gone).
    pub line_quantity: u32,

    /// Stock level after the units went back.
    pub restored_stock: u32,
}

/// What a successful `checkout` reports back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Amount debited from the balance.
    pub total: Money,

    /// Balance left after payment.
    pub balance_after: Money,

    /// Distinct product lines that were paid for.
    pub lines_paid: usize,
}

/// One row of the cart view: a product, how many units, and what they cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
    pub subtotal: Money,
}

/// Read-only view over a non-empty cart.
///
/// `rows()` is lazy and restartable: each call starts a fresh pass over the
/// lines in display order. Nothing is mutated by reading.
#[derive(Debug, Clone, Copy)]
pub struct CartView<'a> {
    cart: &'a Cart,
    catalog: &'a Catalog,
}

impl<'a> CartView<'a> {
    /// Iterates `(product_id, quantity, subtotal)` rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = CartRow<'a>> + 'a {
        let catalog = self.catalog;
        let cart = self.cart;
        cart.lines().map(move |line| {
            let product = catalog
                .lookup(line.product_id())
                .expect("cart line references a product missing from the catalog");
            CartRow {
                product_id: line.product_id(),
                quantity: line.quantity(),
                subtotal: product.unit_price() * line.quantity(),
            }
        })
    }

    /// Grand total across all rows.
    pub fn total(&self) -> Money {
        self.cart.total_value(self.catalog)
    }
}

// =============================================================================
// Store
// =============================================================================

/// The session's whole state: catalog, cart, and balance in one place.
///
/// There is no global state anywhere in the crate; whoever runs the session
/// owns a `Store` and calls operations on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    catalog: Catalog,
    cart: Cart,
    balance: Balance,
}

impl Store {
    /// Opens a store over a catalog with the given starting funds.
    /// The cart starts empty.
    pub fn new(catalog: Catalog, opening_balance: Money) -> Self {
        Store {
            catalog,
            cart: Cart::new(),
            balance: Balance::new(opening_balance),
        }
    }

    /// Opens the store with the launch catalog and the standard
    /// opening balance.
    pub fn open() -> Self {
        Store::new(Catalog::seed(), crate::OPENING_BALANCE)
    }

    /// The product catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The shopping cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current funds.
    pub fn balance(&self) -> Money {
        self.balance.current()
    }

    /// Reserves units of a product: cart quantity up, catalog stock down.
    ///
    /// ## Validation Order
    /// Product existence, then out-of-stock, then quantity positivity, then
    /// stock coverage. The order is observable through which error wins when
    /// several apply, so it is fixed.
    pub fn add_to_cart(&mut self, product_id: &str, quantity: u32) -> StoreResult<AddedToCart> {
        let product = self.catalog.lookup(product_id)?;
        let id = product.id().to_string();
        let available = product.available_stock();

        if product.is_out_of_stock() {
            return Err(StoreError::OutOfStock(id));
        }
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity);
        }

        let in_cart = self.cart.quantity_of(&id);
        // Widen before adding so a huge request cannot wrap around u32
        if u64::from(in_cart) + u64::from(quantity) > u64::from(available) {
            return Err(StoreError::InsufficientStock {
                product_id: id,
                available,
                in_cart,
                requested: quantity,
            });
        }

        // Every check passed; both mutations happen, or this line was
        // never reached
        let line_quantity = in_cart + quantity;
        self.cart.set_quantity(&id, line_quantity);
        self.catalog.decrease_stock(&id, quantity);

        Ok(AddedToCart {
            remaining_stock: available - quantity,
            product_id: id,
            quantity_added: quantity,
            line_quantity,
        })
    }

    /// Releases units back to the catalog: cart quantity down, stock up.
    /// A line that drops to zero disappears from the cart.
    pub fn remove_from_cart(
        &mut self,
        product_id: &str,
        quantity: u32,
    ) -> StoreResult<RemovedFromCart> {
        if self.cart.is_empty() {
            return Err(StoreError::CartEmpty);
        }

        let id = normalize_id(product_id);
        let in_cart = self.cart.quantity_of(&id);
        if in_cart == 0 {
            return Err(StoreError::NotInCart(id));
        }
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity);
        }
        if quantity > in_cart {
            return Err(StoreError::ExceedsCartQuantity {
                product_id: id,
                in_cart,
                requested: quantity,
            });
        }

        let line_quantity = in_cart - quantity;
        self.cart.set_quantity(&id, line_quantity);
        self.catalog.increase_stock(&id, quantity);

        let restored_stock = self
            .catalog
            .lookup(&id)
            .expect("product vanished from the catalog during removal")
            .available_stock();

        Ok(RemovedFromCart {
            product_id: id,
            quantity_removed: quantity,
            line_quantity,
            restored_stock,
        })
    }

    /// Read-only view of the cart contents and total.
    ///
    /// Fails with [`StoreError::CartEmpty`] when there is nothing to show.
    pub fn cart_view(&self) -> StoreResult<CartView<'_>> {
        if self.cart.is_empty() {
            return Err(StoreError::CartEmpty);
        }
        Ok(CartView {
            cart: &self.cart,
            catalog: &self.catalog,
        })
    }

    /// Pays for the cart contents.
    ///
    /// On success the total leaves the balance and the cart empties. Stock
    /// is NOT restored: those units were sold, not released. This is the one
    /// operation that breaks the reservation-plus-stock sum on purpose.
    pub fn checkout(&mut self) -> StoreResult<Receipt> {
        if self.cart.is_empty() {
            return Err(StoreError::CartEmpty);
        }

        let total = self.cart.total_value(&self.catalog);
        if !self.balance.can_cover(total) {
            return Err(StoreError::InsufficientFunds {
                total,
                balance: self.balance.current(),
            });
        }

        let lines_paid = self.cart.line_count();
        self.balance.debit(total);
        self.cart.clear();

        Ok(Receipt {
            total,
            balance_after: self.balance.current(),
            lines_paid,
        })
    }

    /// Adds funds to the balance; returns the new balance.
    pub fn credit_balance(&mut self, amount: Money) -> StoreResult<Money> {
        self.balance.credit(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    /// Opening balance used across the scenario tests: 200.00€.
    fn test_store() -> Store {
        Store::new(Catalog::seed(), Money::from_cents(200_00))
    }

    /// Snapshot for the atomicity checks: any failed operation must leave
    /// the store structurally identical to this.
    fn snapshot(store: &Store) -> serde_json::Value {
        serde_json::to_value(store).expect("store serializes")
    }

    fn assert_conservation(store: &Store) {
        for product in store.catalog().products() {
            assert_eq!(
                store.cart().quantity_of(product.id()) + product.available_stock(),
                product.initial_stock(),
                "conservation broken for {}",
                product.id()
            );
        }
    }

    #[test]
    fn test_add_reserves_stock() {
        let mut store = test_store();

        let outcome = store.add_to_cart("camiseta", 3).unwrap();
        assert_eq!(outcome.product_id, "camiseta");
        assert_eq!(outcome.quantity_added, 3);
        assert_eq!(outcome.line_quantity, 3);
        assert_eq!(outcome.remaining_stock, 97);

        assert_eq!(store.cart().quantity_of("camiseta"), 3);
        assert_eq!(
            store.catalog().lookup("camiseta").unwrap().available_stock(),
            97
        );
        assert_conservation(&store);
    }

    #[test]
    fn test_add_merges_into_existing_line() {
        let mut store = test_store();

        store.add_to_cart("boné", 2).unwrap();
        let outcome = store.add_to_cart(" BONÉ ", 1).unwrap();

        assert_eq!(outcome.line_quantity, 3);
        assert_eq!(store.cart().quantity_of("boné"), 3);
        assert_eq!(store.cart().line_count(), 1);
    }

    #[test]
    fn test_add_unknown_product_fails_clean() {
        let mut store = test_store();
        let before = snapshot(&store);

        let err = store.add_to_cart("chapéu", 1).unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(id) if id == "chapéu"));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_add_out_of_stock_wins_over_invalid_quantity() {
        let catalog = Catalog::with_products(vec![Product::new(
            "raro",
            Money::from_cents(10_00),
            "Peça única.",
            0,
        )]);
        let mut store = Store::new(catalog, Money::from_cents(100_00));

        // Stock is checked before the quantity, so zero stock reports
        // OutOfStock even for a zero quantity
        let err = store.add_to_cart("raro", 0).unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock(id) if id == "raro"));
    }

    #[test]
    fn test_add_zero_quantity_fails_clean() {
        let mut store = test_store();
        let before = snapshot(&store);

        let err = store.add_to_cart("camiseta", 0).unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuantity));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_add_beyond_stock_fails_clean() {
        let catalog = Catalog::with_products(vec![Product::new(
            "raro",
            Money::from_cents(10_00),
            "Peça única.",
            3,
        )]);
        let mut store = Store::new(catalog, Money::from_cents(100_00));
        let before = snapshot(&store);

        let err = store.add_to_cart("raro", 5).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 3,
                in_cart: 0,
                requested: 5,
                ..
            }
        ));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_add_counts_existing_reservation_against_stock() {
        let catalog = Catalog::with_products(vec![Product::new(
            "raro",
            Money::from_cents(10_00),
            "Peça única.",
            3,
        )]);
        let mut store = Store::new(catalog, Money::from_cents(100_00));

        store.add_to_cart("raro", 2).unwrap();
        let err = store.add_to_cart("raro", 2).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 1,
                in_cart: 2,
                requested: 2,
                ..
            }
        ));
        // The first reservation is intact
        assert_eq!(store.cart().quantity_of("raro"), 2);
        assert_conservation(&store);
    }

    #[test]
    fn test_remove_releases_stock() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 5).unwrap();

        let outcome = store.remove_from_cart("camiseta", 2).unwrap();
        assert_eq!(outcome.quantity_removed, 2);
        assert_eq!(outcome.line_quantity, 3);
        assert_eq!(outcome.restored_stock, 97);

        assert_eq!(store.cart().quantity_of("camiseta"), 3);
        assert_conservation(&store);
    }

    #[test]
    fn test_remove_full_amount_deletes_the_line() {
        let mut store = test_store();
        store.add_to_cart("boné", 2).unwrap();

        let outcome = store.remove_from_cart("boné", 2).unwrap();
        assert_eq!(outcome.line_quantity, 0);

        // Gone entirely, not a zero-valued line
        assert!(store.cart().is_empty());
        assert_eq!(store.cart().quantity_of("boné"), 0);
        assert_eq!(
            store.catalog().lookup("boné").unwrap().available_stock(),
            100
        );
    }

    #[test]
    fn test_remove_from_empty_cart_fails() {
        let mut store = test_store();
        let err = store.remove_from_cart("camiseta", 1).unwrap_err();
        assert!(matches!(err, StoreError::CartEmpty));
    }

    #[test]
    fn test_remove_product_not_in_cart_fails_clean() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 1).unwrap();
        let before = snapshot(&store);

        let err = store.remove_from_cart("boné", 1).unwrap_err();
        assert!(matches!(err, StoreError::NotInCart(id) if id == "boné"));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_remove_more_than_reserved_fails_clean() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 2).unwrap();
        let before = snapshot(&store);

        let err = store.remove_from_cart("camiseta", 5).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ExceedsCartQuantity {
                in_cart: 2,
                requested: 5,
                ..
            }
        ));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_cart_view_rows_and_total() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 3).unwrap();
        store.add_to_cart("boné", 1).unwrap();

        let view = store.cart_view().unwrap();
        let rows: Vec<(String, u32, i64)> = view
            .rows()
            .map(|r| (r.product_id.to_string(), r.quantity, r.subtotal.cents()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("camiseta".to_string(), 3, 150_00),
                ("boné".to_string(), 1, 30_00),
            ]
        );
        assert_eq!(view.total(), Money::from_cents(180_00));

        // Restartable: a second pass yields the same rows
        assert_eq!(view.rows().count(), 2);
    }

    #[test]
    fn test_cart_view_of_empty_cart_fails() {
        let store = test_store();
        assert!(matches!(store.cart_view(), Err(StoreError::CartEmpty)));
    }

    #[test]
    fn test_checkout_debits_and_clears_but_keeps_stock_sold() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 3).unwrap(); // 150.00€

        let receipt = store.checkout().unwrap();
        assert_eq!(receipt.total, Money::from_cents(150_00));
        assert_eq!(receipt.balance_after, Money::from_cents(50_00));
        assert_eq!(receipt.lines_paid, 1);

        assert!(store.cart().is_empty());
        assert_eq!(store.balance(), Money::from_cents(50_00));
        // Sale is final: the units left the building
        assert_eq!(
            store.catalog().lookup("camiseta").unwrap().available_stock(),
            97
        );
    }

    #[test]
    fn test_checkout_with_empty_cart_fails() {
        let mut store = test_store();
        assert!(matches!(store.checkout(), Err(StoreError::CartEmpty)));
    }

    #[test]
    fn test_checkout_insufficient_funds_fails_clean() {
        let mut store = test_store();
        store.add_to_cart("ténis", 2).unwrap(); // 240.00€ against 200.00€
        let before = snapshot(&store);

        let err = store.checkout().unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientFunds { total, balance }
                if total == Money::from_cents(240_00)
                    && balance == Money::from_cents(200_00)
        ));
        assert_eq!(snapshot(&store), before);
    }

    #[test]
    fn test_checkout_of_exact_balance_succeeds() {
        let mut store = test_store();
        store.add_to_cart("camiseta", 4).unwrap(); // exactly 200.00€

        let receipt = store.checkout().unwrap();
        assert!(receipt.balance_after.is_zero());
    }

    #[test]
    fn test_credit_balance() {
        let mut store = test_store();

        let after = store.credit_balance(Money::from_cents(50_00)).unwrap();
        assert_eq!(after, Money::from_cents(250_00));

        assert!(matches!(
            store.credit_balance(Money::zero()),
            Err(StoreError::InvalidAmount)
        ));
        assert_eq!(store.balance(), Money::from_cents(250_00));
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// One step of a random session against the store.
        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, u32),
            Remove(usize, u32),
            Credit(i64),
            Checkout,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                // Indexes past the catalog end exercise ProductNotFound
                (0usize..6, 0u32..160).prop_map(|(i, q)| Op::Add(i, q)),
                (0usize..6, 0u32..160).prop_map(|(i, q)| Op::Remove(i, q)),
                (-10_00i64..500_00).prop_map(Op::Credit),
                Just(Op::Checkout),
            ]
        }

        fn product_name(index: usize) -> &'static str {
            ["camiseta", "calças", "ténis", "boné", "chapéu", "luvas"][index]
        }

        fn apply(store: &mut Store, op: &Op) -> bool {
            match op {
                Op::Add(i, q) => store.add_to_cart(product_name(*i), *q).is_ok(),
                Op::Remove(i, q) => store.remove_from_cart(product_name(*i), *q).is_ok(),
                Op::Credit(cents) => store.credit_balance(Money::from_cents(*cents)).is_ok(),
                Op::Checkout => store.checkout().is_ok(),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: conservation holds after any operation sequence,
            /// as long as no checkout committed a sale in between.
            #[test]
            fn conservation_holds_without_checkout(
                ops in prop::collection::vec(op_strategy(), 1..40)
            ) {
                let mut store = test_store();
                for op in ops.iter().filter(|op| !matches!(op, Op::Checkout)) {
                    apply(&mut store, op);
                    assert_conservation(&store);
                }
            }

            /// Property: a failed operation leaves the whole store untouched.
            #[test]
            fn failed_operations_mutate_nothing(
                ops in prop::collection::vec(op_strategy(), 1..40)
            ) {
                let mut store = test_store();
                for op in &ops {
                    let before = snapshot(&store);
                    if !apply(&mut store, op) {
                        prop_assert_eq!(snapshot(&store), before);
                    }
                }
            }

            /// Property: quantities and balance never go negative, however
            /// the session plays out.
            #[test]
            fn no_negative_state(
                ops in prop::collection::vec(op_strategy(), 1..40)
            ) {
                let mut store = test_store();
                for op in &ops {
                    apply(&mut store, op);
                    // u32 stock and quantities cannot be negative; the
                    // balance is the one signed value to watch
                    prop_assert!(!store.balance().is_negative());
                }
            }

            /// Property: a successful checkout debits exactly the cart total
            /// and leaves the cart empty.
            #[test]
            fn checkout_settles_exactly(
                ops in prop::collection::vec(op_strategy(), 1..40)
            ) {
                let mut store = test_store();
                for op in &ops {
                    if matches!(op, Op::Checkout) {
                        let balance_before = store.balance();
                        let total = store.cart().total_value(store.catalog());
                        if store.checkout().is_ok() {
                            prop_assert!(store.cart().is_empty());
                            prop_assert_eq!(store.balance(), balance_before - total);
                        }
                    } else {
                        apply(&mut store, op);
                    }
                }
            }
        }
    }
}
