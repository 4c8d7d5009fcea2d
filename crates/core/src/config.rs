//! Configuration types shared across crates.

use crate::DEFAULT_CACHE_MAX_AGE_SECS;
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Serving path prefix. Requests outside this prefix are not found.
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Cache lifetime in seconds for positive answers.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_path_prefix() -> String {
    "/".to_string()
}

fn default_cache_max_age_secs() -> u64 {
    DEFAULT_CACHE_MAX_AGE_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            path_prefix: default_path_prefix(),
            cache_max_age_secs: default_cache_max_age_secs(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if !self.path_prefix.starts_with('/') {
            return Err(format!(
                "server.path_prefix {:?} must start with '/'",
                self.path_prefix
            ));
        }
        Ok(())
    }
}

/// Resolver backend configuration. Each entry registers one backend at the
/// given chain priority; lower priority is consulted first.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolverConfig {
    /// In-memory cache, populated from lower-precedence backends on miss.
    Memory {
        /// Chain priority (must be unique across resolvers).
        priority: i32,
    },
    /// Pass-through to an upstream module proxy.
    Proxy {
        /// Upstream base URL (e.g., "https://proxy.golang.org").
        url: String,
        /// Chain priority (must be unique across resolvers).
        priority: i32,
        /// Optional upstream checksum-database base URL. When set, the
        /// backend also answers `sumdb/` queries.
        #[serde(default)]
        sumdb_url: Option<String>,
    },
}

impl ResolverConfig {
    /// The chain priority of this entry.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Memory { priority } => *priority,
            Self::Proxy { priority, .. } => *priority,
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Resolver backends, registered in declaration order.
    #[serde(default)]
    pub resolvers: Vec<ResolverConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            resolvers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** One in-memory backend, no upstream.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            resolvers: vec![ResolverConfig::Memory { priority: 0 }],
        }
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.path_prefix, "/");
        assert_eq!(config.cache_max_age_secs, 86400);
    }

    #[test]
    fn server_config_rejects_relative_prefix() {
        let config = ServerConfig {
            path_prefix: "mods/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolver_config_deserializes_tagged() {
        let json = r#"{"type":"proxy","url":"https://proxy.golang.org","priority":10}"#;
        let config: ResolverConfig = serde_json::from_str(json).unwrap();
        match config {
            ResolverConfig::Proxy {
                url,
                priority,
                sumdb_url,
            } => {
                assert_eq!(url, "https://proxy.golang.org");
                assert_eq!(priority, 10);
                assert!(sumdb_url.is_none());
            }
            _ => panic!("expected proxy config"),
        }
    }

    #[test]
    fn app_config_defaults_to_no_resolvers() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(config.resolvers.is_empty());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }
}
