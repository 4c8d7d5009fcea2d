//! HTTP dispatcher for the modrelay module proxy.
//!
//! This crate binds parsed proxy commands to resolver-chain calls and to
//! the protocol's cache-control policy:
//! - Every hit is served with a long-lived public cache header
//! - Every miss, parse failure included, is a non-cacheable 404

pub mod bootstrap;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::build_chain;
pub use routes::create_router;
pub use state::AppState;
