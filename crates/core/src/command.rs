//! The request-path grammar: parsing proxy URL paths into commands and
//! building the canonical path for a command.
//!
//! The two directions are exact inverses for every representable command.
//! Parsing never errors: a path matching no grammar rule is simply `None`,
//! and callers must treat it as "not found".

use crate::module::{Module, Version};

const SUM_PREFIX: &str = "sumdb/";
const SUM_SUPPORTED_SUFFIX: &str = "supported";
const SUM_LATEST: &str = "latest";
const SUM_LOOKUP_PREFIX: &str = "lookup/";
const SUM_TILE_PREFIX: &str = "tile/";

/// A module query command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `{module}/@latest` — metadata for the latest version.
    Latest { module: Module },
    /// `{module}/@v/list` — newline-separated version list.
    List { module: Module },
    /// `{module}/@v/{version}.info` — version metadata.
    Info { module: Module, version: Version },
    /// `{module}/@v/{version}.mod` — manifest text.
    Mod { module: Module, version: Version },
    /// `{module}/@v/{version}.zip` — source archive stream.
    Zip { module: Module, version: Version },
}

/// A checksum-database query command, under the `sumdb/` prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SumCommand {
    /// `sumdb/supported` — whether any checksum backend is available.
    Supported,
    /// `sumdb/latest` — latest signed tree head.
    Latest,
    /// `sumdb/lookup/{module}@{version}` — lookup record.
    Lookup { module: Module, version: Version },
    /// `sumdb/tile/{H}/{L}/{K}[.p/{W}]` — transparency-log tile. The
    /// coordinates are opaque to the grammar; backends interpret them.
    Tile { path: String },
}

/// A successfully parsed request path: exactly one of the two command
/// families. An unparsable path is `None` from [`parse_path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedPath {
    Command(Command),
    Sum(SumCommand),
}

/// Parse a request path (already stripped of the serving prefix) into a
/// command. Returns `None` for any path matching no grammar rule.
pub fn parse_path(request_path: &str) -> Option<ParsedPath> {
    let req = clean_path(request_path);
    if let Some(rest) = req.strip_prefix(SUM_PREFIX) {
        parse_sum_command(rest).map(ParsedPath::Sum)
    } else {
        parse_command(&req).map(ParsedPath::Command)
    }
}

/// Module-command grammar. Rules are tested in fixed priority order; the
/// first match wins.
fn parse_command(req: &str) -> Option<Command> {
    if let Some(module) = req.strip_suffix("/@latest") {
        return Some(Command::Latest {
            module: Module::from(module),
        });
    }
    if let Some(module) = req.strip_suffix("/@v/list") {
        return Some(Command::List {
            module: Module::from(module),
        });
    }
    if let Some(rest) = req.strip_suffix(".info") {
        let (module, version) = split_module_version(rest)?;
        return Some(Command::Info { module, version });
    }
    if let Some(rest) = req.strip_suffix(".mod") {
        let (module, version) = split_module_version(rest)?;
        return Some(Command::Mod { module, version });
    }
    if let Some(rest) = req.strip_suffix(".zip") {
        let (module, version) = split_module_version(rest)?;
        return Some(Command::Zip { module, version });
    }
    None
}

/// Checksum-command grammar, applied after the `sumdb/` prefix is stripped.
fn parse_sum_command(req: &str) -> Option<SumCommand> {
    if req.ends_with(SUM_SUPPORTED_SUFFIX) {
        return Some(SumCommand::Supported);
    }
    if req == SUM_LATEST {
        return Some(SumCommand::Latest);
    }
    if let Some(rest) = req.strip_prefix(SUM_LOOKUP_PREFIX) {
        let (module, version) = split_once_exact(rest, '@')?;
        return Some(SumCommand::Lookup {
            module: Module::from(module),
            version: Version::from(version),
        });
    }
    if let Some(rest) = req.strip_prefix(SUM_TILE_PREFIX) {
        return Some(SumCommand::Tile {
            path: rest.to_string(),
        });
    }
    None
}

/// Split on the `/@v/` separator, requiring exactly one occurrence.
/// A malformed path (zero or multiple separators) fails silently.
fn split_module_version(s: &str) -> Option<(Module, Version)> {
    let mut parts = s.split("/@v/");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(module), Some(version), None) => {
            Some((Module::from(module), Version::from(version)))
        }
        _ => None,
    }
}

/// Split on a separator character, requiring exactly one occurrence.
fn split_once_exact(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut parts = s.split(sep);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Normalize a slash-separated path: collapse repeated separators and `.`
/// segments, resolve `..` against preceding segments, and drop any trailing
/// slash. Equivalent to Go's `path.Clean` for the paths this grammar sees.
fn clean_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&"..") | None if !absolute => segments.push(".."),
                Some(_) => {
                    segments.pop();
                }
                None => {}
            },
            s => segments.push(s),
        }
    }
    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Build the canonical request path for a module command under `base`.
/// Exact inverse of [`parse_path`] for every command.
pub fn build_cmd(base: &str, cmd: &Command) -> String {
    match cmd {
        Command::Latest { module } => format!("{base}/{module}/@latest"),
        Command::List { module } => format!("{base}/{module}/@v/list"),
        Command::Info { module, version } => format!("{base}/{module}/@v/{version}.info"),
        Command::Mod { module, version } => format!("{base}/{module}/@v/{version}.mod"),
        Command::Zip { module, version } => format!("{base}/{module}/@v/{version}.zip"),
    }
}

/// Build the canonical request path for a checksum command under `base`
/// (for the serving grammar, `base` is `sumdb`).
pub fn build_sum_cmd(base: &str, cmd: &SumCommand) -> String {
    match cmd {
        SumCommand::Supported => format!("{base}/supported"),
        SumCommand::Latest => format!("{base}/latest"),
        SumCommand::Lookup { module, version } => format!("{base}/lookup/{module}@{version}"),
        SumCommand::Tile { path } => format!("{base}/tile/{path}"),
    }
}
