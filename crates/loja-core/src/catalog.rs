//! # Catalog
//!
//! The fixed set of products the store sells, keyed by a human-typed id.
//!
//! ## Lookup Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "  CAMISETA "          Catalog stores: "camiseta"          │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │          normalize_id(input)  =  trim + Unicode lowercase               │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │          lookup("camiseta")  ──►  &Product                              │
//! │                                                                         │
//! │  Every boundary that accepts a product id normalizes it first,         │
//! │  so "Ténis", "ténis" and " TÉNIS " all name the same product.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock lives here, not in the cart: adding to the cart moves units out of
//! `available_stock`, removing moves them back. `initial_stock` never changes
//! after creation, which makes the conservation rule checkable at any time.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::money::Money;

/// Normalizes a product id for lookup and storage: trimmed, Unicode-lowercased.
///
/// ## Example
/// ```rust
/// use loja_core::catalog::normalize_id;
///
/// assert_eq!(normalize_id("  CAMISETA "), "camiseta");
/// assert_eq!(normalize_id("TÉNIS"), "ténis");
/// ```
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Fields are private so stock can only move through the catalog's
/// crate-internal adjustment methods; consumers read through accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Catalog key, stored normalized.
    id: String,

    /// Unit price; never changes during a session.
    unit_price: Money,

    /// Shown by the product listing.
    description: String,

    /// Units currently purchasable.
    available_stock: u32,

    /// Units at creation time. `available_stock + reserved == initial_stock`
    /// holds for every product that has not been sold yet.
    initial_stock: u32,
}

impl Product {
    /// Creates a product with its full stock available.
    ///
    /// The id is normalized on the way in, so catalog keys are always
    /// in canonical form.
    pub fn new(id: &str, unit_price: Money, description: &str, stock: u32) -> Self {
        Product {
            id: normalize_id(id),
            unit_price,
            description: description.to_string(),
            available_stock: stock,
            initial_stock: stock,
        }
    }

    /// The normalized catalog key.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// The display description.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Units currently purchasable.
    #[inline]
    pub fn available_stock(&self) -> u32 {
        self.available_stock
    }

    /// Units the product started the session with.
    #[inline]
    pub fn initial_stock(&self) -> u32 {
        self.initial_stock
    }

    /// True when no units are left to reserve.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.available_stock == 0
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The store's product catalog.
///
/// Products keep their insertion order, which is the order the listing
/// shows them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from a product list.
    pub fn with_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// The launch catalog: the four products the store opens with.
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::catalog::Catalog;
    /// use loja_core::money::Money;
    ///
    /// let catalog = Catalog::seed();
    /// assert_eq!(catalog.len(), 4);
    /// assert_eq!(
    ///     catalog.lookup("camiseta").unwrap().unit_price(),
    ///     Money::from_cents(50_00)
    /// );
    /// ```
    pub fn seed() -> Self {
        Catalog::with_products(vec![
            Product::new(
                "camiseta",
                Money::from_cents(50_00),
                "Camiseta confortável de algodão.",
                100,
            ),
            Product::new(
                "calças",
                Money::from_cents(80_00),
                "Calças de jeans, disponíveis em diversos tamanhos.",
                100,
            ),
            Product::new(
                "ténis",
                Money::from_cents(120_00),
                "Ténis desportivos, ideais para corridas.",
                100,
            ),
            Product::new(
                "boné",
                Money::from_cents(30_00),
                "Boné desportivo para o verão.",
                100,
            ),
        ])
    }

    /// Finds a product by id, normalizing the input first.
    ///
    /// ## Example
    /// ```rust
    /// use loja_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::seed();
    /// assert!(catalog.lookup(" Ténis ").is_ok());
    /// assert!(catalog.lookup("chapéu").is_err());
    /// ```
    pub fn lookup(&self, id: &str) -> StoreResult<&Product> {
        let normalized = normalize_id(id);
        self.products
            .iter()
            .find(|p| p.id == normalized)
            .ok_or(StoreError::ProductNotFound(normalized))
    }

    /// Iterates products in insertion order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Moves units out of stock after a reservation was validated.
    ///
    /// Callers must have looked the product up and checked the quantity
    /// against available stock first.
    pub(crate) fn decrease_stock(&mut self, id: &str, quantity: u32) {
        let product = self
            .product_mut(id)
            .expect("stock adjustment for a product missing from the catalog");
        product.available_stock = product
            .available_stock
            .checked_sub(quantity)
            .expect("stock underflow: reservation exceeds available stock");
    }

    /// Returns units to stock after a validated cart removal.
    pub(crate) fn increase_stock(&mut self, id: &str, quantity: u32) {
        let product = self
            .product_mut(id)
            .expect("stock adjustment for a product missing from the catalog");
        product.available_stock += quantity;
    }

    fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        let normalized = normalize_id(id);
        self.products.iter_mut().find(|p| p.id == normalized)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
