//! In-memory cache backend.
//!
//! A settable store that answers from its own maps first and, on a miss,
//! consults its delegate resolvers (the chain built before it) and caches
//! their answer. Archive payloads are held in memory as `Bytes` and
//! replayed as single-chunk streams.

use crate::traits::{Resolver, ZipStream};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, stream};
use modrelay_core::{Info, ModFile, Module, Version, Versions};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct CacheMaps {
    versions: HashMap<Module, Versions>,
    infos: HashMap<(Module, Version), Info>,
    mods: HashMap<(Module, Version), ModFile>,
    zips: HashMap<(Module, Version), Bytes>,
}

/// Settable in-memory resolver.
#[derive(Default)]
pub struct MemoryCache {
    delegates: Vec<Arc<dyn Resolver>>,
    maps: RwLock<CacheMaps>,
}

impl MemoryCache {
    /// An empty cache with no fall-through.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache that falls through to `delegates` in order and
    /// remembers their answers.
    pub fn with_delegates(delegates: Vec<Arc<dyn Resolver>>) -> Self {
        Self {
            delegates,
            maps: RwLock::new(CacheMaps::default()),
        }
    }

    pub fn set_versions(&self, module: Module, versions: Versions) {
        self.write().versions.insert(module, versions);
    }

    pub fn set_info(&self, module: Module, version: Version, info: Info) {
        self.write().infos.insert((module, version), info);
    }

    pub fn set_mod(&self, module: Module, version: Version, mod_file: ModFile) {
        self.write().mods.insert((module, version), mod_file);
    }

    pub fn set_zip(&self, module: Module, version: Version, data: Bytes) {
        self.write().zips.insert((module, version), data);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CacheMaps> {
        // The maps hold plain owned data; a poisoned lock is still usable.
        self.maps.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CacheMaps> {
        self.maps.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Drain a delegate's archive stream into memory. A read error means
    /// the answer is unusable, so it degrades to a miss.
    async fn collect_zip(mut stream: ZipStream) -> Option<Bytes> {
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => buf.extend_from_slice(&bytes),
                Err(e) => {
                    tracing::debug!(error = %e, "dropping partial archive from delegate");
                    return None;
                }
            }
        }
        Some(Bytes::from(buf))
    }

    fn replay(data: Bytes) -> ZipStream {
        Box::pin(stream::once(async move {
            Ok::<Bytes, std::io::Error>(data)
        }))
    }
}

#[async_trait]
impl Resolver for MemoryCache {
    async fn versions(&self, module: &Module) -> Option<Versions> {
        if let Some(versions) = self.read().versions.get(module).cloned() {
            return Some(versions);
        }
        for delegate in &self.delegates {
            if let Some(versions) = delegate.versions(module).await {
                self.set_versions(module.clone(), versions.clone());
                return Some(versions);
            }
        }
        None
    }

    async fn info(&self, module: &Module, version: &Version) -> Option<Info> {
        let key = (module.clone(), version.clone());
        if let Some(info) = self.read().infos.get(&key).cloned() {
            return Some(info);
        }
        for delegate in &self.delegates {
            if let Some(info) = delegate.info(module, version).await {
                self.set_info(module.clone(), version.clone(), info.clone());
                return Some(info);
            }
        }
        None
    }

    async fn mod_file(&self, module: &Module, version: &Version) -> Option<ModFile> {
        let key = (module.clone(), version.clone());
        if let Some(mod_file) = self.read().mods.get(&key).cloned() {
            return Some(mod_file);
        }
        for delegate in &self.delegates {
            if let Some(mod_file) = delegate.mod_file(module, version).await {
                self.set_mod(module.clone(), version.clone(), mod_file.clone());
                return Some(mod_file);
            }
        }
        None
    }

    async fn zip(&self, module: &Module, version: &Version) -> Option<ZipStream> {
        let key = (module.clone(), version.clone());
        if let Some(data) = self.read().zips.get(&key).cloned() {
            return Some(Self::replay(data));
        }
        for delegate in &self.delegates {
            if let Some(stream) = delegate.zip(module, version).await {
                if let Some(data) = Self::collect_zip(stream).await {
                    self.set_zip(module.clone(), version.clone(), data.clone());
                    return Some(Self::replay(data));
                }
            }
        }
        None
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
