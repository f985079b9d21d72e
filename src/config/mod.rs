//! Configuration layer for the `rexsl-fetch` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`Payload`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers are the exception: TOML headers are sent first and CLI headers are
//! appended after them. Repeated names are kept, since HTTP allows them.
//!
//! `-d` replaces the TOML `request.body`; `--form` replaces both.
//!
//! # Boolean Flag Semantics
//!
//! `--verbose-wire` uses OR semantics with `wire.verbose`: once enabled in
//! either source it stays enabled. `--no-retry` wins over `retry.enabled`.
//!
//! # CLI-Only vs TOML-Only Options
//!
//! Some options are TOML-only (not available via CLI):
//! - `retry.max_delay_ms`, `retry.multiplier`, `retry.jitter`, `retry.deadline_ms`
//! - `wire.optimize_cookies`
//!
//! `--query`, `--path` and `--form` are CLI-only.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{Payload, ValidatedConfig, write_default_config};
