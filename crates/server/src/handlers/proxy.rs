//! The module-proxy dispatcher.
//!
//! One fallback handler serves the whole protocol. Module paths contain
//! arbitrary segments and the version endpoints are `.suffix` patterns, so
//! routing by template is impossible; the request path is parsed by the
//! command grammar instead and the command is bound to a chain call.

use crate::handlers::common::{cached, internal_error, not_found};
use crate::handlers::sumdb::handle_sum_command;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use futures::TryStreamExt;
use modrelay_core::command::{parse_path, Command, ParsedPath};
use modrelay_core::Version;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

/// Fallback handler for every proxy request. An unparsable path and an
/// unresolvable command look identical to the client: a non-cacheable 404.
pub async fn proxy_handler(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path();
    let Some(relative) = strip_serving_prefix(path, &state.config.server.path_prefix) else {
        return not_found();
    };
    match parse_path(relative) {
        Some(ParsedPath::Command(command)) => handle_command(&state, command).await,
        Some(ParsedPath::Sum(command)) => handle_sum_command(&state, command).await,
        None => not_found(),
    }
}

/// Strip the configured serving prefix, leaving the command path the
/// grammar expects. Requests outside the prefix are not ours.
fn strip_serving_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let stripped = path.strip_prefix(prefix)?;
    Some(stripped.trim_start_matches('/'))
}

async fn handle_command(state: &AppState, command: Command) -> Response {
    let max_age = state.config.server.cache_max_age_secs;
    match command {
        Command::Latest { module } => {
            match state.chain.resolve_info(&module, &Version::latest()).await {
                Some(info) => info_response(max_age, &info),
                None => not_found(),
            }
        }
        Command::List { module } => match state.chain.resolve_versions(&module).await {
            Some(versions) => cached(max_age, TEXT_PLAIN, versions.as_str().to_string()),
            None => not_found(),
        },
        Command::Info { module, version } => {
            match state.chain.resolve_info(&module, &version).await {
                Some(info) => info_response(max_age, &info),
                None => not_found(),
            }
        }
        Command::Mod { module, version } => {
            match state.chain.resolve_mod(&module, &version).await {
                Some(mod_file) => cached(max_age, TEXT_PLAIN, mod_file.as_str().to_string()),
                None => not_found(),
            }
        }
        Command::Zip { module, version } => {
            match state.chain.resolve_zip(&module, &version).await {
                Some(stream) => {
                    // A chunk error after the 200 goes out can only truncate
                    // the response; log it and let hyper drop the connection.
                    let stream = stream.inspect_err(move |error| {
                        tracing::error!(%module, %version, %error, "zip stream failed mid-transfer");
                    });
                    cached(max_age, OCTET_STREAM, Body::from_stream(stream))
                }
                None => not_found(),
            }
        }
    }
}

fn info_response(max_age: u64, info: &modrelay_core::Info) -> Response {
    match info.to_json() {
        Ok(json) => cached(max_age, APPLICATION_JSON, json),
        Err(error) => {
            tracing::error!(%error, "info serialization failed");
            internal_error()
        }
    }
}
