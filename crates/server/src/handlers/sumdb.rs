//! Checksum-database dispatch.
//!
//! The server never interprets sumdb payloads; it answers `supported` from
//! the chain and relays the opaque bytes of the other queries.

use crate::handlers::common::{cached, not_found};
use crate::state::AppState;
use axum::response::Response;
use modrelay_core::command::SumCommand;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

pub async fn handle_sum_command(state: &AppState, command: SumCommand) -> Response {
    let max_age = state.config.server.cache_max_age_secs;
    match command {
        SumCommand::Supported => {
            if state.chain.sum_supported().await {
                cached(max_age, TEXT_PLAIN, "")
            } else {
                not_found()
            }
        }
        SumCommand::Latest => match state.chain.sum_latest().await {
            Some(data) => cached(max_age, TEXT_PLAIN, data),
            None => not_found(),
        },
        SumCommand::Lookup { module, version } => {
            match state.chain.sum_lookup(&module, &version).await {
                Some(data) => cached(max_age, TEXT_PLAIN, data),
                None => not_found(),
            }
        }
        SumCommand::Tile { path } => match state.chain.sum_tile(&path).await {
            Some(data) => cached(max_age, OCTET_STREAM, data),
            None => not_found(),
        },
    }
}
