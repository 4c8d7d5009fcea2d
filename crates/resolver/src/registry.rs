//! The resolver registry and the materialized chain.
//!
//! Backends are registered under unique integer priorities during startup;
//! `initialize` walks the priorities ascending and materializes the live
//! chain, handing each factory the resolvers built so far. The chain is
//! immutable afterwards and safe for unsynchronized concurrent reads.

use crate::error::RegistryError;
use crate::traits::{ChecksumResolver, Resolver, ResolverFactory, ZipStream};
use bytes::Bytes;
use modrelay_core::{Info, ModFile, Module, Version, Versions};
use std::collections::BTreeMap;
use std::sync::Arc;

struct ResolverEntry {
    name: String,
    factory: ResolverFactory,
}

/// Ordered collection of resolver factories and checksum resolvers, keyed
/// by chain priority. Owned by startup code; registration is not intended
/// to race with request serving.
#[derive(Default)]
pub struct Registry {
    resolvers: BTreeMap<i32, ResolverEntry>,
    checksums: BTreeMap<i32, Arc<dyn ChecksumResolver>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named resolver factory at the given priority. Fails with
    /// [`RegistryError::DuplicatePriority`] if the priority is taken,
    /// leaving the registry unchanged.
    pub fn register_resolver(
        &mut self,
        name: impl Into<String>,
        priority: i32,
        factory: ResolverFactory,
    ) -> Result<(), RegistryError> {
        if self.resolvers.contains_key(&priority) {
            return Err(RegistryError::DuplicatePriority { priority });
        }
        self.resolvers.insert(
            priority,
            ResolverEntry {
                name: name.into(),
                factory,
            },
        );
        Ok(())
    }

    /// Register an already-built checksum resolver at the given priority.
    /// The checksum index is separate from the resolver index.
    pub fn register_checksum_resolver(
        &mut self,
        priority: i32,
        resolver: Arc<dyn ChecksumResolver>,
    ) -> Result<(), RegistryError> {
        if self.checksums.contains_key(&priority) {
            return Err(RegistryError::DuplicatePriority { priority });
        }
        self.checksums.insert(priority, resolver);
        Ok(())
    }

    /// Display names of registered resolvers in ascending priority order,
    /// reflecting the current registration state.
    pub fn resolver_names(&self) -> Vec<&str> {
        self.resolvers.values().map(|e| e.name.as_str()).collect()
    }

    /// Factories of registered resolvers in the same ascending priority
    /// order as [`Registry::resolver_names`].
    pub fn resolver_factories(&self) -> Vec<&ResolverFactory> {
        self.resolvers.values().map(|e| &e.factory).collect()
    }

    /// Number of registered resolver factories.
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }

    /// Materialize the chain: invoke each factory in ascending priority
    /// order with the resolvers built so far, then snapshot the checksum
    /// resolvers in the same order. Can be called again to rebuild from the
    /// current registrations; the previous chain is unaffected.
    pub fn initialize(&self) -> ResolverChain {
        let mut resolvers: Vec<Arc<dyn Resolver>> = Vec::with_capacity(self.resolvers.len());
        for (priority, entry) in &self.resolvers {
            let resolver = (entry.factory)(&resolvers);
            tracing::debug!(
                name = %entry.name,
                priority,
                position = resolvers.len(),
                "materialized resolver"
            );
            resolvers.push(resolver);
        }
        let checksums: Vec<Arc<dyn ChecksumResolver>> =
            self.checksums.values().cloned().collect();
        ResolverChain {
            resolvers,
            checksums,
        }
    }
}

/// The materialized, immutable resolver chain. Every query walks the chain
/// in ascending priority order and returns the first non-empty answer.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Arc<dyn Resolver>>,
    checksums: Vec<Arc<dyn ChecksumResolver>>,
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .field("checksums", &self.checksums.len())
            .finish()
    }
}

impl ResolverChain {
    /// A chain with no backends; every query misses. This is the state
    /// before any registry has been initialized.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The materialized resolvers in chain order.
    pub fn resolvers(&self) -> &[Arc<dyn Resolver>] {
        &self.resolvers
    }

    /// Fetch the version list of a module; first non-empty answer wins.
    pub async fn resolve_versions(&self, module: &Module) -> Option<Versions> {
        for resolver in &self.resolvers {
            if let Some(versions) = resolver.versions(module).await {
                tracing::trace!(resolver = resolver.name(), %module, "versions hit");
                return Some(versions);
            }
        }
        None
    }

    /// Fetch version metadata; first non-empty answer wins. `version` may
    /// be the `latest` selector.
    pub async fn resolve_info(&self, module: &Module, version: &Version) -> Option<Info> {
        for resolver in &self.resolvers {
            if let Some(info) = resolver.info(module, version).await {
                tracing::trace!(resolver = resolver.name(), %module, %version, "info hit");
                return Some(info);
            }
        }
        None
    }

    /// Fetch manifest contents; first non-empty answer wins.
    pub async fn resolve_mod(&self, module: &Module, version: &Version) -> Option<ModFile> {
        for resolver in &self.resolvers {
            if let Some(mod_file) = resolver.mod_file(module, version).await {
                tracing::trace!(resolver = resolver.name(), %module, %version, "mod hit");
                return Some(mod_file);
            }
        }
        None
    }

    /// Fetch an open source-archive stream; first non-empty answer wins.
    /// The caller owns the returned stream.
    pub async fn resolve_zip(&self, module: &Module, version: &Version) -> Option<ZipStream> {
        for resolver in &self.resolvers {
            if let Some(stream) = resolver.zip(module, version).await {
                tracing::trace!(resolver = resolver.name(), %module, %version, "zip hit");
                return Some(stream);
            }
        }
        None
    }

    /// True if any checksum backend reports supported, in priority order,
    /// short-circuiting on the first.
    pub async fn sum_supported(&self) -> bool {
        for resolver in &self.checksums {
            if resolver.supported().await {
                return true;
            }
        }
        false
    }

    /// The latest signed tree head; first non-empty answer wins.
    pub async fn sum_latest(&self) -> Option<Bytes> {
        for resolver in &self.checksums {
            if let Some(data) = resolver.latest().await {
                return Some(data);
            }
        }
        None
    }

    /// A checksum lookup record; first non-empty answer wins.
    pub async fn sum_lookup(&self, module: &Module, version: &Version) -> Option<Bytes> {
        for resolver in &self.checksums {
            if let Some(data) = resolver.lookup(module, version).await {
                return Some(data);
            }
        }
        None
    }

    /// Tile data for the given coordinates path; first non-empty answer
    /// wins.
    pub async fn sum_tile(&self, path: &str) -> Option<Bytes> {
        for resolver in &self.checksums {
            if let Some(data) = resolver.tile(path).await {
                return Some(data);
            }
        }
        None
    }
}
