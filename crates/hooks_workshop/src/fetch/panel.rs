//! The fetch panel and its error boundary.

use super::{FetchAction, FetchError, FetchState, FetchStatus, Fetcher};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// What the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// No name submitted.
    Idle,
    /// Waiting on `name`.
    Loading {
        /// The name being fetched.
        name: String,
    },
    /// Data for `name` arrived.
    Ready {
        /// The name that was fetched.
        name: String,
        /// The fetched record.
        data: Value,
    },
    /// The fetch failed; `retry_with` is the input that triggered it.
    Failed {
        /// Human-readable failure.
        message: String,
        /// Input to resubmit on retry.
        retry_with: String,
    },
}

impl std::fmt::Display for PanelView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelView::Idle => write!(f, "Submit a pokemon"),
            PanelView::Loading { name } => write!(f, "Loading {}...", name),
            PanelView::Ready { data, .. } => {
                let pretty = serde_json::to_string_pretty(data).map_err(|_| std::fmt::Error)?;
                write!(f, "{}", pretty)
            }
            PanelView::Failed {
                message,
                retry_with,
            } => write!(
                f,
                "There was an error: {}\nTry again with '{}'",
                message, retry_with
            ),
        }
    }
}

/// Fetches a record per submitted name and recovers from failures.
///
/// Each distinct input is fetched once. A failure is held until the
/// boundary is reset, by [`reset`](Self::reset), [`retry`](Self::retry), or
/// a different input.
#[derive(Debug)]
pub struct FetchPanel<F> {
    fetcher: F,
    query: Option<String>,
    state: FetchState<Value>,
}

impl<F: Fetcher> FetchPanel<F> {
    /// Creates an idle panel.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            query: None,
            state: FetchState::default(),
        }
    }

    /// Records a submitted name and reports whether it needs fetching.
    ///
    /// Blank input returns the panel to idle. Resubmitting the current
    /// input is a no-op.
    #[instrument(skip(self))]
    pub fn begin(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Blank input, panel idle");
            self.reset();
            return None;
        }
        if self.query.as_deref() == Some(name) {
            debug!("Input unchanged, not refetching");
            return None;
        }

        self.query = Some(name.to_string());
        self.state = std::mem::take(&mut self.state).reduce(FetchAction::Pending);
        Some(name.to_string())
    }

    /// Applies the result of fetching `name`.
    ///
    /// Results for anything but the current input are stale and dropped.
    #[instrument(skip(self, result), fields(ok = result.is_ok()))]
    pub fn complete(&mut self, name: &str, result: Result<Value, FetchError>) {
        if self.query.as_deref() != Some(name) {
            debug!("Dropping stale result");
            return;
        }
        let action = match result {
            Ok(data) => {
                info!("Fetch resolved");
                FetchAction::Resolved(data)
            }
            Err(e) => {
                warn!(error = %e, "Fetch rejected");
                FetchAction::Rejected(e)
            }
        };
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    /// Submits `name` and awaits the fetch if one is needed.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, name: &str) -> PanelView {
        if let Some(name) = self.begin(name) {
            let result = self.fetcher.fetch(&name).await;
            self.complete(&name, result);
        }
        self.view()
    }

    /// Clears the boundary back to idle.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.query = None;
        self.state = FetchState::default();
    }

    /// Resets after a failure and fetches the same input again.
    ///
    /// Does nothing unless the panel is showing a failure.
    #[instrument(skip(self))]
    pub async fn retry(&mut self) -> PanelView {
        if self.state.status() != FetchStatus::Rejected {
            return self.view();
        }
        let Some(name) = self.query.clone() else {
            return self.view();
        };
        info!(name = %name, "Retrying after failure");
        self.reset();
        self.submit(&name).await
    }

    /// The current fetch state.
    pub fn state(&self) -> &FetchState<Value> {
        &self.state
    }

    /// Maps the fetch state to what the panel shows.
    pub fn view(&self) -> PanelView {
        let name = self.query.clone().unwrap_or_default();
        match self.state.status() {
            FetchStatus::Idle => PanelView::Idle,
            FetchStatus::Pending => PanelView::Loading { name },
            FetchStatus::Resolved => PanelView::Ready {
                name,
                data: self.state.data().cloned().unwrap_or(Value::Null),
            },
            FetchStatus::Rejected => PanelView::Failed {
                message: self
                    .state
                    .error()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                retry_with: name,
            },
        }
    }
}
