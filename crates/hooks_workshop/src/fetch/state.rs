//! Fetch status reducer.

use super::FetchError;
use tracing::instrument;

/// Where a fetch is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum FetchStatus {
    /// Nothing requested yet.
    #[default]
    #[display("idle")]
    Idle,
    /// Waiting for a response.
    #[display("pending")]
    Pending,
    /// Data arrived.
    #[display("resolved")]
    Resolved,
    /// The request failed.
    #[display("rejected")]
    Rejected,
}

/// Events that move a fetch through its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchAction<T> {
    /// A request was sent.
    Pending,
    /// A response arrived.
    Resolved(T),
    /// The request failed.
    Rejected(FetchError),
}

/// Status, data and error of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    status: FetchStatus,
    data: Option<T>,
    error: Option<FetchError>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    /// Applies an action, returning the next state.
    ///
    /// Pending clears stale data and errors; resolved and rejected only set
    /// their own field.
    #[instrument(skip_all, fields(from = %self.status))]
    pub fn reduce(self, action: FetchAction<T>) -> Self {
        match action {
            FetchAction::Pending => Self {
                status: FetchStatus::Pending,
                data: None,
                error: None,
            },
            FetchAction::Resolved(data) => Self {
                status: FetchStatus::Resolved,
                data: Some(data),
                ..self
            },
            FetchAction::Rejected(error) => Self {
                status: FetchStatus::Rejected,
                error: Some(error),
                ..self
            },
        }
    }

    /// Current status.
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Fetched data, once resolved.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Failure, once rejected.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_clears_previous_result() {
        let state = FetchState::default()
            .reduce(FetchAction::Resolved(1))
            .reduce(FetchAction::Pending);
        assert_eq!(state.status(), FetchStatus::Pending);
        assert_eq!(state.data(), None);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_resolved_sets_data() {
        let state = FetchState::default()
            .reduce(FetchAction::Pending)
            .reduce(FetchAction::Resolved("pikachu"));
        assert_eq!(state.status(), FetchStatus::Resolved);
        assert_eq!(state.data(), Some(&"pikachu"));
    }

    #[test]
    fn test_rejected_sets_error() {
        let error = FetchError::Request("offline".to_string());
        let state = FetchState::<u8>::default()
            .reduce(FetchAction::Pending)
            .reduce(FetchAction::Rejected(error.clone()));
        assert_eq!(state.status(), FetchStatus::Rejected);
        assert_eq!(state.error(), Some(&error));
        assert_eq!(state.data(), None);
    }
}
