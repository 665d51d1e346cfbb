//! # Session Error Type
//!
//! What the session loop has to deal with after dispatching a command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Session                            │
//! │                                                                         │
//! │  Store operation ──► StoreError ──┐                                     │
//! │                                   ├──► SessionError ──► which kind?     │
//! │  Unknown menu entry ──────────────┤         │                           │
//! │                                   │         ├─ Store / InvalidOption    │
//! │  read/write failure ──► io::Error ┘         │   → "Error: ..." line,    │
//! │                                             │     keep looping          │
//! │                                             │                           │
//! │                                             └─ Io → fatal, session ends │
//! │                                                                         │
//! │  Domain errors never end the session; only broken stdin/stdout does.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use thiserror::Error;

use loja_core::StoreError;

/// Anything a dispatched command can fail with.
///
/// The `#[from]` conversions let command handlers use `?` on both store
/// calls and writes; the loop then sorts fatal from reportable.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A business rule said no. Reported and the loop continues.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The menu input matched none of the eight commands.
    #[error("Invalid option: '{0}'")]
    InvalidOption(String),

    /// stdin or stdout is broken; nothing sensible can continue.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// True when the session cannot usefully continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SessionError::Io(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
