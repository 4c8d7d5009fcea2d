//! Resolver capability trait definitions.
//!
//! A backend answers a query it does not know with `None` (or `false` for
//! `supported`), never with an error: resolver-internal faults are a
//! backend's own concern and must be degraded to a miss before they reach
//! the chain.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use modrelay_core::{Info, ModFile, Module, Version, Versions};
use std::pin::Pin;
use std::sync::Arc;

/// A boxed byte stream carrying a source archive. Single-owner: whoever
/// receives it reads it to exhaustion or drops it.
pub type ZipStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// A module query backend: an upstream proxy, a cache, or a custom source.
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// The version list of a module, if known.
    async fn versions(&self, module: &Module) -> Option<Versions>;

    /// Version metadata, if known. `version` may be the `latest` selector.
    async fn info(&self, module: &Module, version: &Version) -> Option<Info>;

    /// The manifest file contents, if known.
    async fn mod_file(&self, module: &Module, version: &Version) -> Option<ModFile>;

    /// An open source-archive stream, if known. Ownership of the stream
    /// passes to the caller.
    async fn zip(&self, module: &Module, version: &Version) -> Option<ZipStream>;

    /// Backend identifier for logging.
    fn name(&self) -> &'static str;
}

/// A checksum-database backend, local or pass-through.
#[async_trait]
pub trait ChecksumResolver: Send + Sync + 'static {
    /// Whether this backend can answer checksum queries at all.
    async fn supported(&self) -> bool;

    /// The latest signed tree head, if known.
    async fn latest(&self) -> Option<Bytes>;

    /// The lookup record for a module version, if known.
    async fn lookup(&self, module: &Module, version: &Version) -> Option<Bytes>;

    /// Tile data for the given tile coordinates path, if known.
    async fn tile(&self, path: &str) -> Option<Bytes>;
}

/// Constructs a resolver. The argument is the chain materialized so far
/// (every backend registered with a smaller priority), letting a backend
/// delegate to the ones consulted before it.
pub type ResolverFactory = Box<dyn Fn(&[Arc<dyn Resolver>]) -> Arc<dyn Resolver> + Send + Sync>;
