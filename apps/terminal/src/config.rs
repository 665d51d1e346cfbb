//! # Terminal Configuration
//!
//! Startup configuration for the interactive session.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LOJA_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read once at startup and never changes afterwards,
//! so it is passed around by plain reference.

use serde::Serialize;

use loja_core::{Money, OPENING_BALANCE};

/// Session configuration.
///
/// Defaults reproduce the store's fixed launch state; the environment
/// overrides exist for development convenience only.
#[derive(Debug, Clone, Serialize)]
pub struct TerminalConfig {
    /// Store name shown in the menu banner.
    pub store_name: String,

    /// Funds the session opens with.
    pub opening_balance: Money,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            store_name: "Loja Virtual".to_string(),
            opening_balance: OPENING_BALANCE,
        }
    }
}

impl TerminalConfig {
    /// Creates the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `LOJA_STORE_NAME`: Override the banner name
    /// - `LOJA_OPENING_BALANCE`: Override the opening funds
    ///   (decimal euros, `.` or `,` separator; ignored when unparsable)
    pub fn from_env() -> Self {
        let mut config = TerminalConfig::default();

        if let Ok(store_name) = std::env::var("LOJA_STORE_NAME") {
            if !store_name.trim().is_empty() {
                config.store_name = store_name;
            }
        }

        if let Ok(raw) = std::env::var("LOJA_OPENING_BALANCE") {
            if let Ok(balance) = raw.parse::<Money>() {
                config.opening_balance = balance;
            }
        }

        config
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
