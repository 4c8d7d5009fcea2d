//! HTTP request handlers.

pub mod common;
pub mod proxy;
pub mod sumdb;

pub use proxy::proxy_handler;
