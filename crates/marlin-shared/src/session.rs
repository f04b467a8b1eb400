use marlin_time::{Seconds, Timestamp};

use crate::{
    const_config::client::token::{TOKEN_REFRESH_THRESHOLD, TOKEN_REFRESH_TOLERANCE},
    token::{AccessToken, RefreshToken},
    uac::AuthorityRole,
};

/// The authenticated identity held by the client between runs
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: AccessToken,
    pub refresh_token: Option<RefreshToken>,
    pub logged_in_since: Timestamp,
    pub last_token_refresh: Option<Timestamp>,
    pub role: AuthorityRole,
}

impl Session {
    /// Creates the session for a login that just completed
    pub fn new_login(
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        role: AuthorityRole,
        now: Timestamp,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            logged_in_since: now,
            last_token_refresh: None,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == AuthorityRole::Admin
    }

    /// Time since the access token was issued. Falls back to the login time if
    /// it was never refreshed. A timestamp in the future counts as zero.
    pub fn token_age(&self, now: Timestamp) -> Seconds {
        let issued = self.last_token_refresh.unwrap_or(self.logged_in_since);
        now.seconds_since(issued).unwrap_or(Seconds::new(0))
    }

    /// Only sessions that hold a refresh token can be refreshed
    pub fn needs_refresh(&self, now: Timestamp) -> bool {
        self.refresh_token.is_some()
            && self.token_age(now)
                >= TOKEN_REFRESH_THRESHOLD.saturating_sub(TOKEN_REFRESH_TOLERANCE)
    }

    /// The refresh token is only replaced if the server sent a new one
    #[must_use]
    pub fn with_refreshed_tokens(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        now: Timestamp,
    ) -> Self {
        Self {
            access_token,
            refresh_token: refresh_token.or_else(|| self.refresh_token.clone()),
            last_token_refresh: Some(now),
            ..self.clone()
        }
    }
}
