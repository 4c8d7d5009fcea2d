//! Application state shared across handlers.

use modrelay_core::{AppConfig, Error};
use modrelay_resolver::ResolverChain;
use std::sync::Arc;

/// Shared application state. The chain is immutable after bootstrap and
/// safe for unsynchronized concurrent reads.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The materialized resolver chain.
    pub chain: Arc<ResolverChain>,
}

impl AppState {
    /// Create a new application state. Fails if the configuration does not
    /// validate.
    pub fn new(config: AppConfig, chain: ResolverChain) -> Result<Self, Error> {
        config.validate().map_err(Error::Config)?;
        Ok(Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modrelay_core::ServerConfig;

    #[test]
    fn accepts_valid_configuration() {
        let state = AppState::new(AppConfig::for_testing(), ResolverChain::empty()).unwrap();
        assert_eq!(state.config.server.path_prefix, "/");
    }

    #[test]
    fn rejects_invalid_prefix() {
        let config = AppConfig {
            server: ServerConfig {
                path_prefix: "no-slash".to_string(),
                ..Default::default()
            },
            resolvers: Vec::new(),
        };
        let err = AppState::new(config, ResolverChain::empty()).unwrap_err();
        assert!(err.to_string().contains("path_prefix"));
    }
}
