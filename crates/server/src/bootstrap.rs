//! Chain construction from configuration.

use modrelay_core::{AppConfig, ResolverConfig};
use modrelay_resolver::{
    MemoryCache, ProxyChecksumResolver, ProxyResolver, Registry, RegistryError, Resolver,
    ResolverChain,
};
use std::sync::Arc;

/// Build the resolver chain from the configured backends.
///
/// Each entry registers at its declared priority; a memory cache delegates
/// to every backend registered at a lower priority. Since the chain asks
/// those same backends before the cache, a cache placed after an upstream
/// proxy only answers (and populates) while the proxy itself misses, e.g.
/// during an outage. Duplicate priorities are a configuration error.
pub fn build_chain(config: &AppConfig) -> Result<ResolverChain, RegistryError> {
    let mut registry = Registry::new();
    for resolver in &config.resolvers {
        match resolver {
            ResolverConfig::Memory { priority } => {
                registry.register_resolver(
                    "memory",
                    *priority,
                    Box::new(|built: &[Arc<dyn Resolver>]| {
                        Arc::new(MemoryCache::with_delegates(built.to_vec()))
                    }),
                )?;
            }
            ResolverConfig::Proxy {
                url,
                priority,
                sumdb_url,
            } => {
                let url = url.clone();
                registry.register_resolver(
                    "proxy",
                    *priority,
                    Box::new(move |_| Arc::new(ProxyResolver::new(&url))),
                )?;
                if let Some(sumdb_url) = sumdb_url {
                    registry.register_checksum_resolver(
                        *priority,
                        Arc::new(ProxyChecksumResolver::new(sumdb_url)),
                    )?;
                }
            }
        }
    }
    tracing::info!(resolvers = ?registry.resolver_names(), "resolver chain configured");
    Ok(registry.initialize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_chain_in_priority_order() {
        let config = AppConfig {
            resolvers: vec![
                ResolverConfig::Memory { priority: 10 },
                ResolverConfig::Proxy {
                    url: "http://127.0.0.1:1".to_string(),
                    priority: 0,
                    sumdb_url: None,
                },
            ],
            ..Default::default()
        };
        let chain = build_chain(&config).unwrap();
        let order: Vec<&str> = chain.resolvers().iter().map(|r| r.name()).collect();
        assert_eq!(order, vec!["proxy", "memory"]);
    }

    #[test]
    fn duplicate_priority_is_a_configuration_error() {
        let config = AppConfig {
            resolvers: vec![
                ResolverConfig::Memory { priority: 0 },
                ResolverConfig::Proxy {
                    url: "http://127.0.0.1:1".to_string(),
                    priority: 0,
                    sumdb_url: None,
                },
            ],
            ..Default::default()
        };
        let err = build_chain(&config).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicatePriority { priority: 0 }));
    }

    #[test]
    fn empty_configuration_yields_empty_chain() {
        let chain = build_chain(&AppConfig::default()).unwrap();
        assert!(chain.resolvers().is_empty());
    }
}
