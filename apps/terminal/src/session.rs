//! # Interactive Session
//!
//! The read-dispatch-report loop over a [`Store`].
//!
//! ## One Loop Iteration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ===== Loja Virtual =====                                               │
//! │  1. List products            ◄── banner + menu, every iteration         │
//! │  ...                                                                    │
//! │  8. Quit                                                                │
//! │  Choose an option: 2                                                    │
//! │  Product to add: camiseta    ◄── gated prompts: the quantity is only    │
//! │  Quantity of 'camiseta': 3       asked once the product checks out      │
//! │  Added 3 units of 'camiseta' to the cart.                               │
//! │  Operation complete.         ◄── epilogue, printed on success AND on    │
//! │                                  failure                                │
//! │  -----------------------------                                         │
//! │                              ◄── separator + blank line, every          │
//! │                                  iteration, then back to the banner     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is generic over its reader and writer so tests can drive it
//! with a scripted `Cursor` and read the screen back out of a `Vec<u8>`.
//!
//! Domain errors are reported (`Error: ...`) and the loop continues; only
//! I/O failures end the session early. EOF on the menu prompt behaves like
//! quit, since no further command can ever arrive.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use loja_core::{normalize_id, Store, StoreError};

use crate::command::{Command, MENU};
use crate::config::TerminalConfig;
use crate::error::SessionError;
use crate::input::{parse_amount, parse_quantity};

/// Printed after every iteration, like the receipt tear-off line.
const SEPARATOR: &str = "-----------------------------";

/// An interactive store session over arbitrary line I/O.
pub struct Session<R, W> {
    store: Store,
    config: TerminalConfig,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over a store and its line I/O.
    pub fn new(store: Store, config: TerminalConfig, reader: R, writer: W) -> Self {
        Session {
            store,
            config,
            reader,
            writer,
        }
    }

    /// Runs the loop until quit or EOF. Only I/O failures return an error;
    /// every domain error is reported and the loop keeps going.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;

            let line = match self.read_line("Choose an option: ")? {
                Some(line) => line,
                // EOF: nothing more can arrive, leave like quit
                None => {
                    self.print_farewell()?;
                    writeln!(self.writer, "{SEPARATOR}\n")?;
                    return Ok(());
                }
            };

            let command = Command::parse(&line);
            debug!(input = %line.trim(), command = ?command, "menu dispatch");

            let result = match command {
                Some(command) => self.dispatch(command),
                None => Err(SessionError::InvalidOption(line.trim().to_string())),
            };

            if let Err(err) = result {
                match err {
                    SessionError::Io(err) => return Err(err),
                    reportable => writeln!(self.writer, "Error: {reportable}")?,
                }
            }

            // The epilogue runs no matter how the command went
            if let Some(text) = command.and_then(|c| c.epilogue()) {
                writeln!(self.writer, "{text}\n")?;
            }
            writeln!(self.writer, "{SEPARATOR}\n")?;

            if command == Some(Command::Quit) {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<(), SessionError> {
        match command {
            Command::ListProducts => self.handle_list(),
            Command::AddToCart => self.handle_add(),
            Command::RemoveFromCart => self.handle_remove(),
            Command::ShowCart => self.handle_show_cart(),
            Command::ShowBalance => self.handle_show_balance(),
            Command::AddBalance => self.handle_add_balance(),
            Command::Checkout => self.handle_checkout(),
            Command::Quit => self.print_farewell().map_err(SessionError::from),
        }
    }

    // =========================================================================
    // Command Handlers
    // =========================================================================

    fn handle_list(&mut self) -> Result<(), SessionError> {
        writeln!(self.writer, "\nAvailable products:")?;
        for product in self.store.catalog().products() {
            writeln!(
                self.writer,
                "- {} - {}",
                capitalize(product.id()),
                product.unit_price()
            )?;
            writeln!(self.writer, "  {}", product.description())?;
            writeln!(
                self.writer,
                "  Available: {} units\n",
                product.available_stock()
            )?;
        }
        Ok(())
    }

    fn handle_add(&mut self) -> Result<(), SessionError> {
        let raw_id = self.prompt("Product to add: ")?;

        // Gate the quantity prompt: no point asking how many units of a
        // product that does not exist or cannot be bought
        let product = self.store.catalog().lookup(&raw_id)?;
        let id = product.id().to_string();
        if product.is_out_of_stock() {
            return Err(StoreError::OutOfStock(id).into());
        }

        let raw_quantity = self.prompt(&format!("Quantity of '{id}': "))?;
        let quantity = parse_quantity(&raw_quantity)?;

        let outcome = self.store.add_to_cart(&id, quantity)?;
        writeln!(
            self.writer,
            "Added {} units of '{}' to the cart.",
            outcome.quantity_added, outcome.product_id
        )?;
        Ok(())
    }

    fn handle_remove(&mut self) -> Result<(), SessionError> {
        // Gate the product prompt on a non-empty cart, and the quantity
        // prompt on the product actually being in it
        if self.store.cart().is_empty() {
            return Err(StoreError::CartEmpty.into());
        }

        let raw_id = self.prompt("Product to remove: ")?;
        let id = normalize_id(&raw_id);
        if self.store.cart().quantity_of(&id) == 0 {
            return Err(StoreError::NotInCart(id).into());
        }

        let raw_quantity = self.prompt(&format!("Quantity of '{id}' to remove: "))?;
        let quantity = parse_quantity(&raw_quantity)?;

        let outcome = self.store.remove_from_cart(&id, quantity)?;
        writeln!(
            self.writer,
            "Removed {} units of '{}' from the cart.",
            outcome.quantity_removed, outcome.product_id
        )?;
        Ok(())
    }

    fn handle_show_cart(&mut self) -> Result<(), SessionError> {
        let view = self.store.cart_view()?;

        writeln!(self.writer, "\nShopping cart:")?;
        for row in view.rows() {
            writeln!(
                self.writer,
                "- {}x {} - {}",
                row.quantity, row.product_id, row.subtotal
            )?;
        }
        writeln!(self.writer, "Purchase total: {}", view.total())?;
        Ok(())
    }

    fn handle_show_balance(&mut self) -> Result<(), SessionError> {
        writeln!(self.writer, "\nCurrent balance: {}\n", self.store.balance())?;
        Ok(())
    }

    fn handle_add_balance(&mut self) -> Result<(), SessionError> {
        let raw = self.prompt("Amount to add: ")?;
        let amount = parse_amount(&raw)?;

        let new_balance = self.store.credit_balance(amount)?;
        writeln!(self.writer, "Balance updated: {new_balance}")?;
        Ok(())
    }

    fn handle_checkout(&mut self) -> Result<(), SessionError> {
        let receipt = self.store.checkout()?;
        info!(
            total = %receipt.total,
            balance = %receipt.balance_after,
            lines = receipt.lines_paid,
            "checkout settled"
        );

        writeln!(
            self.writer,
            "Payment successful! New balance: {}",
            receipt.balance_after
        )?;
        Ok(())
    }

    // =========================================================================
    // Screen Plumbing
    // =========================================================================

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.writer, "===== {} =====", self.config.store_name)?;
        for (number, (_, label)) in MENU.iter().enumerate() {
            writeln!(self.writer, "{}. {}", number + 1, label)?;
        }
        Ok(())
    }

    fn print_farewell(&mut self) -> io::Result<()> {
        writeln!(self.writer, "Thank you for visiting the store!")?;
        Ok(())
    }

    /// Prompts and reads one line; `None` means EOF.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Prompts inside a command; EOF reads as an empty line, which the
    /// validation downstream rejects in the usual way.
    fn prompt(&mut self, prompt: &str) -> Result<String, SessionError> {
        Ok(self.read_line(prompt)?.unwrap_or_default())
    }
}

/// Uppercases the first letter for the product listing.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
