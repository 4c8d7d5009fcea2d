//! Registry error types.

use thiserror::Error;

/// Errors reported at registration time. A failing registration leaves the
/// registry unchanged.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("priority {priority} is already registered")]
    DuplicatePriority { priority: i32 },
}
