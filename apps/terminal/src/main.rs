//! # loja: the Loja Virtual terminal
//!
//! Wires the pure store logic to stdin/stdout and runs the session loop.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main()                                                                 │
//! │    │                                                                    │
//! │    ├─► init_tracing()      diagnostics on stderr, RUST_LOG-filtered,   │
//! │    │                       quiet by default                             │
//! │    ├─► TerminalConfig      defaults + LOJA_* overrides                  │
//! │    ├─► Store::new          seed catalog + opening balance               │
//! │    └─► Session::run        locked stdin/stdout until quit or EOF        │
//! │                                                                         │
//! │  The screen (stdout) carries only the interactive conversation;        │
//! │  logs never mix into it.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod command;
mod config;
mod error;
mod input;
mod session;

use std::io;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use loja_core::{Catalog, Store};

use crate::config::TerminalConfig;
use crate::session::Session;

fn main() -> io::Result<()> {
    init_tracing();

    let config = TerminalConfig::from_env();
    debug!(
        store_name = %config.store_name,
        opening_balance = %config.opening_balance,
        "configuration loaded"
    );

    let store = Store::new(Catalog::seed(), config.opening_balance);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Session::new(store, config, stdin, stdout).run()
}

/// Initializes the tracing subscriber.
///
/// Honors `RUST_LOG`; without it only warnings surface, so the interactive
/// screen stays clean. The writer is stderr for the same reason.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
