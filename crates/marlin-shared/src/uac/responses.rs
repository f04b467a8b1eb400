use crate::token::{AccessToken, RefreshToken};

use super::AuthorityRole;

/// Returned by login, register and token refresh
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub refresh_token: Option<RefreshToken>,
    #[serde(default)]
    pub role: Option<AuthorityRole>,
    #[serde(default)]
    pub profile: Option<LoginProfile>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginProfile {
    #[serde(default)]
    pub authority_role: Option<AuthorityRole>,
}

impl LoginResponse {
    /// The profile's role wins over the top level one. Defaults to
    /// [`AuthorityRole::User`] if the server sent neither
    pub fn effective_role(&self) -> AuthorityRole {
        self.profile
            .as_ref()
            .and_then(|profile| profile.authority_role)
            .or(self.role)
            .unwrap_or(AuthorityRole::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_profile() {
        let response: LoginResponse = serde_json::from_value(serde_json::json!({
            "accessToken": "a",
            "refreshToken": null,
            "role": "USER",
            "profile": { "authorityRole": "ADMIN" }
        }))
        .unwrap();
        assert_eq!(response.effective_role(), AuthorityRole::Admin);
    }

    #[test]
    fn role_defaults_to_user() {
        let response: LoginResponse =
            serde_json::from_value(serde_json::json!({ "accessToken": "a" })).unwrap();
        assert_eq!(response.refresh_token, None);
        assert_eq!(response.effective_role(), AuthorityRole::User);
    }
}
