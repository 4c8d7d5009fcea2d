//! Server test utilities.

use super::fixtures::{FixtureChecksum, FixtureResolver};
use modrelay_core::{AppConfig, ServerConfig};
use modrelay_resolver::{Registry, ResolverChain};
use modrelay_server::{AppState, create_router};
use std::sync::Arc;

/// A test server wrapper around the router and its state.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
}

#[allow(dead_code)]
impl TestServer {
    /// A server backed by the fixture resolver and an available fixture
    /// checksum backend, with default configuration.
    pub fn new() -> Self {
        Self::with_server_config(|_| {})
    }

    /// Like [`TestServer::new`] with configuration modifications applied.
    pub fn with_server_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut ServerConfig),
    {
        let mut registry = Registry::new();
        registry
            .register_resolver("fixture", 0, Box::new(|_| Arc::new(FixtureResolver)))
            .expect("register fixture resolver");
        registry
            .register_checksum_resolver(0, Arc::new(FixtureChecksum::available()))
            .expect("register fixture checksum resolver");
        Self::from_chain(registry.initialize(), modifier)
    }

    /// A server with no backends at all; every request misses.
    pub fn empty() -> Self {
        Self::from_chain(ResolverChain::empty(), |_| {})
    }

    /// A server over an arbitrary chain, for tests needing custom backends.
    pub fn with_chain(chain: ResolverChain) -> Self {
        Self::from_chain(chain, |_| {})
    }

    fn from_chain<F>(chain: ResolverChain, modifier: F) -> Self
    where
        F: FnOnce(&mut ServerConfig),
    {
        let mut config = AppConfig::default();
        modifier(&mut config.server);
        let state = AppState::new(config, chain).expect("valid test configuration");
        let router = create_router(state.clone());
        Self { router, state }
    }
}
