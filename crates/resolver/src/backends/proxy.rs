//! Pass-through backend querying an upstream module proxy over HTTP.
//!
//! Upstream URLs are produced by the grammar's builders, so the request
//! shapes stay exactly inverse to the paths this server parses. Any non-2xx
//! status and any transport error degrades to a miss.

use crate::traits::{ChecksumResolver, Resolver, ZipStream};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use modrelay_core::{Command, Info, ModFile, Module, SumCommand, Version, Versions};
use modrelay_core::{build_cmd, build_sum_cmd};

/// Module-query pass-through to an upstream proxy.
pub struct ProxyResolver {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a URL, treating non-success and transport errors as a miss.
    async fn fetch(&self, url: &str) -> Option<reqwest::Response> {
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                tracing::debug!(url, status = %response.status(), "upstream miss");
                None
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream request failed");
                None
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Option<String> {
        let response = self.fetch(url).await?;
        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream body read failed");
                None
            }
        }
    }
}

#[async_trait]
impl Resolver for ProxyResolver {
    async fn versions(&self, module: &Module) -> Option<Versions> {
        let url = build_cmd(
            &self.base_url,
            &Command::List {
                module: module.clone(),
            },
        );
        let text = self.fetch_text(&url).await?;
        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            return None;
        }
        Some(Versions::new(trimmed))
    }

    async fn info(&self, module: &Module, version: &Version) -> Option<Info> {
        // The latest selector has its own upstream endpoint.
        let command = if version.is_latest() {
            Command::Latest {
                module: module.clone(),
            }
        } else {
            Command::Info {
                module: module.clone(),
                version: version.clone(),
            }
        };
        let url = build_cmd(&self.base_url, &command);
        let text = self.fetch_text(&url).await?;
        match Info::from_json(text.as_bytes()) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream returned malformed info");
                None
            }
        }
    }

    async fn mod_file(&self, module: &Module, version: &Version) -> Option<ModFile> {
        let url = build_cmd(
            &self.base_url,
            &Command::Mod {
                module: module.clone(),
                version: version.clone(),
            },
        );
        let text = self.fetch_text(&url).await?;
        if text.is_empty() {
            return None;
        }
        Some(ModFile::new(text))
    }

    async fn zip(&self, module: &Module, version: &Version) -> Option<ZipStream> {
        let url = build_cmd(
            &self.base_url,
            &Command::Zip {
                module: module.clone(),
                version: version.clone(),
            },
        );
        let response = self.fetch(&url).await?;
        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        Some(Box::pin(stream))
    }

    fn name(&self) -> &'static str {
        "proxy"
    }
}

/// Checksum-database pass-through to an upstream sumdb endpoint.
pub struct ProxyChecksumResolver {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyChecksumResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_bytes(&self, cmd: &SumCommand) -> Option<Bytes> {
        let url = build_sum_cmd(&self.base_url, cmd);
        let response = match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(url, status = %response.status(), "upstream sumdb miss");
                return None;
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream sumdb request failed");
                return None;
            }
        };
        match response.bytes().await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream sumdb body read failed");
                None
            }
        }
    }
}

#[async_trait]
impl ChecksumResolver for ProxyChecksumResolver {
    async fn supported(&self) -> bool {
        let url = build_sum_cmd(&self.base_url, &SumCommand::Supported);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "upstream sumdb unreachable");
                false
            }
        }
    }

    async fn latest(&self) -> Option<Bytes> {
        self.fetch_bytes(&SumCommand::Latest).await
    }

    async fn lookup(&self, module: &Module, version: &Version) -> Option<Bytes> {
        self.fetch_bytes(&SumCommand::Lookup {
            module: module.clone(),
            version: version.clone(),
        })
        .await
    }

    async fn tile(&self, path: &str) -> Option<Bytes> {
        self.fetch_bytes(&SumCommand::Tile {
            path: path.to_string(),
        })
        .await
    }
}
