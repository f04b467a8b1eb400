//! One container per screen. Each keeps the data and flags the screen renders
//! and turns every failure into a message plus an error notification, so
//! callers never see an `Err`

use anyhow::Context as _;
use futures::channel::oneshot;
use marlin_client_core::ResponseError;

mod auth;
mod dashboard;
mod locations;
mod logs;
mod pagination;
mod sensors;
mod user_detail;
mod user_profiles;

pub use auth::{AuthState, ACCESS_DENIED_LOGIN_MESSAGE};
pub use dashboard::DashboardState;
pub use locations::LocationsState;
pub use logs::{LogStats, LogsState};
pub use pagination::Pagination;
pub use sensors::SensorsState;
pub use user_detail::UserDetailState;
pub use user_profiles::UserProfilesState;

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure { error: String },
}

impl<T> Outcome<T> {
    pub fn failure<S: Into<String>>(error: S) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure { error } => Outcome::Failure { error },
        }
    }

    pub fn into_result(self) -> anyhow::Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure { error } => Err(anyhow::anyhow!(error)),
        }
    }
}

/// Waits on a client receiver, a dropped sender counts as an error
pub(crate) async fn receive<T>(rx: oneshot::Receiver<anyhow::Result<T>>) -> anyhow::Result<T> {
    rx.await.context("response channel closed before a result was sent")?
}

/// Message sent by the server if there was one, otherwise `fallback`
pub(crate) fn server_message_or(err: &anyhow::Error, fallback: &str) -> String {
    ResponseError::find(err)
        .and_then(|response| response.message.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// The containers await the receivers directly so there is nothing to wake
pub(crate) fn no_wake() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_helpers() {
        let ok: Outcome<u8> = Outcome::Success(1);
        let failed: Outcome<u8> = Outcome::failure("Failed to load sensors");
        assert!(ok.is_success());
        assert_eq!(ok.clone().map(|x| x + 1), Outcome::Success(2));
        assert_eq!(failed.error(), Some("Failed to load sensors"));
        assert!(failed.into_result().is_err());
    }

    #[test]
    fn fallback_used_for_non_response_errors() {
        let err = anyhow::anyhow!("connection refused");
        assert_eq!(server_message_or(&err, "Failed to load users"), "Failed to load users");
    }

    #[tokio::test]
    async fn dropped_sender_is_an_error() {
        let (tx, rx) = oneshot::channel::<anyhow::Result<()>>();
        drop(tx);
        assert!(receive(rx).await.is_err());
    }
}
