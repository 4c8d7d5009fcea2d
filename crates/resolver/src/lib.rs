//! Resolver chain for the modrelay module proxy.
//!
//! This crate provides:
//! - The `Resolver` and `ChecksumResolver` capability traits backends
//!   implement
//! - The priority `Registry` and the materialized `ResolverChain` with
//!   first-non-empty-wins dispatch
//! - Backends: in-memory cache and upstream pass-through

pub mod backends;
pub mod error;
pub mod registry;
pub mod traits;

pub use backends::{MemoryCache, ProxyChecksumResolver, ProxyResolver};
pub use error::RegistryError;
pub use registry::{Registry, ResolverChain};
pub use traits::{ChecksumResolver, Resolver, ResolverFactory, ZipStream};
