use marlin_client_core::Client;
use marlin_shared::{
    id::DbId,
    req_args::admin::{user_profiles::AdminUserUpdate, AssignLocationReqArgs},
    uac::{UserAuthorityRole, UserProfile},
};
use tracing::error;

use super::{no_wake, receive, server_message_or, Outcome};
use crate::{routes::Route, Notifier};

const NO_USER_LOADED: &str = "No user loaded";

/// A single user's page. Changes are sent to the server and then applied to
/// the local copy
#[derive(Debug)]
pub struct UserDetailState {
    client: Client,
    notifier: Notifier,
    user: Option<UserProfile>,
    is_loading: bool,
    is_updating: bool,
    error: Option<String>,
}

impl UserDetailState {
    pub fn new(client: Client, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            user: None,
            is_loading: false,
            is_updating: false,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_updating(&self) -> bool {
        self.is_updating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self, id: DbId) -> Outcome<UserProfile> {
        self.is_loading = true;
        self.error = None;
        let result = receive(self.client.get_user_profile(id, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(user) => {
                self.user = Some(user.clone());
                Outcome::Success(user)
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to load user");
                error!(?err, %message);
                self.user = None;
                self.error = Some(message.clone());
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    /// Sends `update` built from the loaded user and applies `patch` locally
    /// once the server accepts it
    async fn send_update<B, P>(
        &mut self,
        build: B,
        patch: P,
        failure_fallback: &str,
    ) -> Outcome<UserProfile>
    where
        B: FnOnce(&UserProfile) -> AdminUserUpdate,
        P: FnOnce(&mut UserProfile),
    {
        let Some(user) = self.user.as_ref() else {
            return Outcome::failure(NO_USER_LOADED);
        };
        let update = build(user);
        self.is_updating = true;
        let result = receive(self.client.update_user_profile(update, no_wake)).await;
        self.is_updating = false;
        match (result, self.user.as_mut()) {
            (Ok(_), Some(user)) => {
                patch(user);
                Outcome::Success(user.clone())
            }
            (Ok(_), None) => Outcome::failure(NO_USER_LOADED),
            (Err(err), _) => {
                let message = server_message_or(&err, failure_fallback);
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_verification(&mut self) -> Outcome<UserProfile> {
        let outcome = self
            .send_update(
                |user| {
                    AdminUserUpdate::new(user.id)
                        .authority_role(user.authority_role)
                        .verified(!user.verified)
                },
                |user| user.verified = !user.verified,
                "Failed to update verification status",
            )
            .await;
        if let Outcome::Success(user) = &outcome {
            let state = if user.verified { "verified" } else { "unverified" };
            self.notifier.success(format!("User {state} successfully"));
        }
        outcome
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_role(&mut self, role: UserAuthorityRole) -> Outcome<UserProfile> {
        let outcome = self
            .send_update(
                |user| {
                    AdminUserUpdate::new(user.id)
                        .authority_role(role)
                        .verified(user.verified)
                },
                |user| user.authority_role = role,
                "Failed to update user role",
            )
            .await;
        if outcome.is_success() {
            self.notifier.success(format!("User role updated to {role}"));
        }
        outcome
    }

    /// Empty names are cleared on the server
    #[tracing::instrument(skip(self))]
    pub async fn edit_profile(&mut self, first_name: &str, last_name: &str) -> Outcome<UserProfile> {
        let as_option = |name: &str| (!name.is_empty()).then(|| name.to_string());
        let (first, last) = (as_option(first_name), as_option(last_name));
        let outcome = self
            .send_update(
                |user| {
                    AdminUserUpdate::new(user.id)
                        .names(first_name, last_name)
                        .authority_role(user.authority_role)
                        .verified(user.verified)
                },
                |user| {
                    user.first_name = first;
                    user.last_name = last;
                },
                "Failed to update user profile",
            )
            .await;
        if outcome.is_success() {
            self.notifier.success("User profile updated successfully");
        }
        outcome
    }

    /// Goes back to the user list once deleted
    #[tracing::instrument(skip(self))]
    pub async fn delete(&mut self) -> Outcome<()> {
        let Some(id) = self.user.as_ref().map(|u| u.id) else {
            return Outcome::failure(NO_USER_LOADED);
        };
        self.is_updating = true;
        let result = receive(self.client.delete_user_profile(id, no_wake)).await;
        self.is_updating = false;
        match result {
            Ok(()) => {
                self.notifier.success("User deleted successfully");
                self.user = None;
                self.client.navigator().navigate(&Route::Users.path());
                Outcome::Success(())
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to delete user");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn assign_location(&mut self, location_id: DbId) -> Outcome<()> {
        let Some(user_id) = self.user.as_ref().map(|u| u.id) else {
            return Outcome::failure(NO_USER_LOADED);
        };
        let args = AssignLocationReqArgs {
            user_id,
            location_id,
        };
        self.is_updating = true;
        let result = receive(self.client.assign_harbor_master(args, no_wake)).await;
        self.is_updating = false;
        match result {
            Ok(()) => {
                self.notifier
                    .success("Location assigned to harbor master successfully");
                Outcome::Success(())
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to assign location");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn actions_need_a_loaded_user() {
        // Arrange
        let notifier = Notifier::new();
        let mut state = UserDetailState::new(Client::default(), notifier.clone());

        // Act
        let toggled = state.toggle_verification().await;
        let deleted = state.delete().await;

        // Assert
        assert_eq!(toggled.error(), Some(NO_USER_LOADED));
        assert_eq!(deleted.error(), Some(NO_USER_LOADED));
        assert!(notifier.is_empty());
    }
}
