//! Core domain types and protocol grammar for the modrelay module proxy.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Module, version, and artifact value types
//! - The bidirectional request-path grammar (parser and builder)
//! - Configuration types

pub mod command;
pub mod config;
pub mod error;
pub mod module;

pub use command::{Command, ParsedPath, SumCommand, build_cmd, build_sum_cmd, parse_path};
pub use config::{AppConfig, ResolverConfig, ServerConfig};
pub use error::{Error, Result};
pub use module::{Info, ModFile, Module, Version, Versions};

/// Default cache lifetime for positive answers, in seconds (24 hours).
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 86400;
