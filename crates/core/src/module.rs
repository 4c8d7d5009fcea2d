//! Value types for module-proxy artifacts.
//!
//! Modules and versions are opaque strings; the proxy protocol never
//! validates them beyond the path grammar. "I don't know this" answers are
//! expressed as `Option::None` by the resolver layer, never as sentinel
//! strings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// A module path, e.g. `"example.com/pkg"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Module(String);

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Module {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Module {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A module version identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// The pseudo-version requesting the latest known version.
    pub const LATEST: &'static str = "latest";

    pub fn new(v: impl Into<String>) -> Self {
        Self(v.into())
    }

    /// The `"latest"` version selector.
    pub fn latest() -> Self {
        Self(Self::LATEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_latest(&self) -> bool {
        self.0 == Self::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A newline-separated list of version identifiers, as served for
/// `{module}/@v/list`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Versions(String);

impl Versions {
    pub fn new(list: impl Into<String>) -> Self {
        Self(list.into())
    }

    /// Build from individual version strings.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Versions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version metadata served for `{module}/@v/{version}.info`.
///
/// Field names and the RFC 3339 timestamp follow the Go proxy wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    #[serde(rename = "Version")]
    pub version: Version,
    #[serde(rename = "Time", with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

impl Info {
    pub fn new(version: Version, time: OffsetDateTime) -> Self {
        Self { version, time }
    }

    /// Serialize to the wire JSON object.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parse from the wire JSON object.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| Error::Serialization(e.to_string()))
    }
}

/// The literal contents of a module manifest (`go.mod`) file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModFile(String);

impl ModFile {
    pub fn new(contents: impl Into<String>) -> Self {
        Self(contents.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModFile {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
