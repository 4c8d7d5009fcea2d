//! Concrete resolver backends.

pub mod memory;
pub mod proxy;

pub use memory::MemoryCache;
pub use proxy::{ProxyChecksumResolver, ProxyResolver};
