//! Fixed-answer backends for integration tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use modrelay_core::{Info, ModFile, Module, Version, Versions};
use modrelay_resolver::{ChecksumResolver, Resolver, ZipStream};
use time::macros::datetime;

/// The one module every fixture backend knows about.
pub const FIXTURE_MODULE: &str = "example.com/mod";

/// Archive bytes served by [`FixtureResolver`].
pub const FIXTURE_ZIP: &[u8] = b"PK\x03\x04fixture archive";

fn known_version(version: &Version) -> bool {
    matches!(version.as_str(), "v1.0.0" | "v1.1.0")
}

/// Resolver answering fixed data for [`FIXTURE_MODULE`] and nothing else.
pub struct FixtureResolver;

#[async_trait]
impl Resolver for FixtureResolver {
    async fn versions(&self, module: &Module) -> Option<Versions> {
        (module.as_str() == FIXTURE_MODULE).then(|| Versions::from_lines(["v1.0.0", "v1.1.0"]))
    }

    async fn info(&self, module: &Module, version: &Version) -> Option<Info> {
        if module.as_str() != FIXTURE_MODULE {
            return None;
        }
        let resolved = if version.is_latest() {
            Version::new("v1.1.0")
        } else {
            version.clone()
        };
        known_version(&resolved).then(|| Info::new(resolved, datetime!(2021-06-01 12:00:00 UTC)))
    }

    async fn mod_file(&self, module: &Module, version: &Version) -> Option<ModFile> {
        (module.as_str() == FIXTURE_MODULE && known_version(version))
            .then(|| ModFile::new("module example.com/mod\n"))
    }

    async fn zip(&self, module: &Module, version: &Version) -> Option<ZipStream> {
        (module.as_str() == FIXTURE_MODULE && known_version(version)).then(|| {
            Box::pin(stream::once(async {
                Ok::<Bytes, std::io::Error>(Bytes::from_static(FIXTURE_ZIP))
            })) as ZipStream
        })
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

/// Resolver whose archive stream fails after the first chunk, standing in
/// for an upstream that resets mid-transfer.
pub struct BrokenZipResolver;

#[async_trait]
impl Resolver for BrokenZipResolver {
    async fn versions(&self, _module: &Module) -> Option<Versions> {
        None
    }

    async fn info(&self, _module: &Module, _version: &Version) -> Option<Info> {
        None
    }

    async fn mod_file(&self, _module: &Module, _version: &Version) -> Option<ModFile> {
        None
    }

    async fn zip(&self, _module: &Module, _version: &Version) -> Option<ZipStream> {
        let chunks: Vec<std::io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"PK\x03\x04")),
            Err(std::io::Error::other("upstream reset")),
        ];
        Some(Box::pin(stream::iter(chunks)) as ZipStream)
    }

    fn name(&self) -> &'static str {
        "broken-zip"
    }
}

/// Checksum backend with fixed answers for [`FIXTURE_MODULE`].
pub struct FixtureChecksum {
    answers: bool,
}

impl FixtureChecksum {
    pub fn available() -> Self {
        Self { answers: true }
    }

    pub fn unavailable() -> Self {
        Self { answers: false }
    }
}

#[async_trait]
impl ChecksumResolver for FixtureChecksum {
    async fn supported(&self) -> bool {
        self.answers
    }

    async fn latest(&self) -> Option<Bytes> {
        self.answers
            .then(|| Bytes::from_static(b"go.sum database tree\n42\nabc123\n"))
    }

    async fn lookup(&self, module: &Module, version: &Version) -> Option<Bytes> {
        (self.answers && module.as_str() == FIXTURE_MODULE && version.as_str() == "v1.0.0")
            .then(|| Bytes::from_static(b"lookup record for example.com/mod@v1.0.0"))
    }

    async fn tile(&self, path: &str) -> Option<Bytes> {
        (self.answers && path == "1/2/3").then(|| Bytes::from_static(b"tile payload"))
    }
}
