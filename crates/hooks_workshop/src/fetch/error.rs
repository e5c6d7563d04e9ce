//! Fetch error types.

use derive_more::{Display, Error};

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[display("Request failed: {}", _0)]
    Request(#[error(not(source))] String),

    /// The server answered with a non-success status.
    #[display("Server returned {} for '{}'", status, name)]
    Status {
        /// HTTP status code.
        status: u16,
        /// The name that was requested.
        name: String,
    },

    /// The response body was not the expected JSON.
    #[display("Failed to decode response: {}", _0)]
    Decode(#[error(not(source))] String),
}
