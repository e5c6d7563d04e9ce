//! Data-fetching panel with error recovery.
//!
//! A submitted name flows through a small status machine
//! (idle → pending → resolved | rejected). Failures come back as values and
//! the panel maps them to a recoverable view instead of unwinding.

mod error;
mod fetcher;
mod panel;
mod state;

pub use error::FetchError;
pub use fetcher::{Fetcher, HttpFetcher};
pub use panel::{FetchPanel, PanelView};
pub use state::{FetchAction, FetchState, FetchStatus};
