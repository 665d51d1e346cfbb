//! # Menu Commands
//!
//! The eight things a user can ask for, and what each one prints when it
//! finishes.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Choose an option: "  ◄── user types "2", "add", " ADD " ...          │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  Command::parse(line)   trim + lowercase, then match                    │
//! │            │                                                            │
//! │     ┌──────┴────────┐                                                   │
//! │     ▼               ▼                                                   │
//! │  Some(command)   None ──► SessionError::InvalidOption                   │
//! │                                                                         │
//! │  Each command also carries its epilogue: the closing line the loop     │
//! │  prints whether the operation succeeded or failed.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 1. List the catalog.
    ListProducts,
    /// 2. Reserve units into the cart.
    AddToCart,
    /// 3. Release units back to stock.
    RemoveFromCart,
    /// 4. Show cart lines and the running total.
    ShowCart,
    /// 5. Show the current balance.
    ShowBalance,
    /// 6. Top up the balance.
    AddBalance,
    /// 7. Pay for the cart contents.
    Checkout,
    /// 8. End the session.
    Quit,
}

/// Every command in menu order, paired with its menu label.
pub const MENU: [(Command, &str); 8] = [
    (Command::ListProducts, "List products"),
    (Command::AddToCart, "Add to cart"),
    (Command::RemoveFromCart, "Remove from cart"),
    (Command::ShowCart, "Show cart"),
    (Command::ShowBalance, "Show balance"),
    (Command::AddBalance, "Add balance"),
    (Command::Checkout, "Checkout"),
    (Command::Quit, "Quit"),
];

impl Command {
    /// Parses a raw menu line: the option number or a word form, with
    /// whitespace and case ignored.
    pub fn parse(raw: &str) -> Option<Command> {
        match raw.trim().to_lowercase().as_str() {
            "1" | "list" => Some(Command::ListProducts),
            "2" | "add" => Some(Command::AddToCart),
            "3" | "remove" => Some(Command::RemoveFromCart),
            "4" | "show-cart" | "cart" => Some(Command::ShowCart),
            "5" | "show-balance" | "balance" => Some(Command::ShowBalance),
            "6" | "add-balance" => Some(Command::AddBalance),
            "7" | "checkout" | "pay" => Some(Command::Checkout),
            "8" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// The closing line printed after the command ran, success or not.
    /// Read-only informational commands and quit have none.
    pub fn epilogue(&self) -> Option<&'static str> {
        match self {
            Command::AddToCart | Command::RemoveFromCart | Command::AddBalance => {
                Some("Operation complete.")
            }
            Command::ShowCart => Some("Query complete."),
            Command::Checkout => Some("Payment complete."),
            Command::ListProducts | Command::ShowBalance | Command::Quit => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
