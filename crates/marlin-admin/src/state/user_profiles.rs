use marlin_client_core::{Client, UserProfilesResponse};
use marlin_shared::{
    id::DbId,
    list::ListQuery,
    req_args::{
        admin::user_profiles::{AdminUserUpdate, UserProfileFilters},
        RegisterReqArgs,
    },
    uac::UserProfile,
};
use secrecy::SecretString;
use tracing::error;

use super::{no_wake, receive, server_message_or, Outcome, Pagination};
use crate::Notifier;

/// Query the list was last loaded with
type LoadedKey = (UserProfileFilters, u32, u32);

#[derive(Debug)]
pub struct UserProfilesState {
    client: Client,
    notifier: Notifier,
    users: Vec<UserProfile>,
    total_count: u64,
    pagination: Pagination,
    filters: UserProfileFilters,
    is_loading: bool,
    error: Option<String>,
    loaded: Option<LoadedKey>,
}

impl UserProfilesState {
    pub fn new(client: Client, notifier: Notifier, pagination: Pagination) -> Self {
        Self {
            client,
            notifier,
            users: Vec::new(),
            total_count: 0,
            pagination,
            filters: UserProfileFilters::default(),
            is_loading: false,
            error: None,
            loaded: None,
        }
    }

    pub fn with_filters(mut self, filters: UserProfileFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn filtered_count(&self) -> u64 {
        self.pagination.filtered_count()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn filters(&self) -> &UserProfileFilters {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn key(&self) -> LoadedKey {
        (
            self.filters.clone(),
            self.pagination.page(),
            self.pagination.limit(),
        )
    }

    fn query(&self) -> ListQuery<UserProfileFilters> {
        ListQuery::new(
            self.pagination.request_page(),
            self.pagination.limit(),
            self.filters.clone(),
        )
    }

    async fn fetch(&mut self, announce: bool) -> Outcome<UserProfilesResponse> {
        self.is_loading = true;
        self.error = None;
        self.loaded = Some(self.key());
        let result = receive(self.client.get_user_profiles(&self.query(), no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(response) => {
                self.users = response.items.clone();
                self.total_count = response.total_count;
                self.pagination.set_filtered_count(response.filtered_count);
                if announce {
                    self.notifier.success("Users refreshed");
                }
                Outcome::Success(response)
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to load users");
                error!(?err, %message);
                self.error = Some(message.clone());
                self.notifier.error(&message);
                self.users.clear();
                self.total_count = 0;
                self.pagination.set_filtered_count(0);
                Outcome::failure(message)
            }
        }
    }

    /// Loads the list if filters, page or limit changed since the last load.
    /// Returns `None` when nothing needed loading
    #[tracing::instrument(skip(self))]
    pub async fn sync(&mut self) -> Option<Outcome<UserProfilesResponse>> {
        if self.loaded.as_ref() == Some(&self.key()) {
            return None;
        }
        Some(self.fetch(false).await)
    }

    /// Reloads the current page and confirms with a notification
    #[tracing::instrument(skip(self))]
    pub async fn load_users(&mut self) -> Outcome<UserProfilesResponse> {
        self.fetch(true).await
    }

    /// The matching entry in the list is replaced with the server's copy
    #[tracing::instrument(skip(self))]
    pub async fn update_user_profile(&mut self, update: AdminUserUpdate) -> Outcome<UserProfile> {
        match receive(self.client.update_user_profile(update, no_wake)).await {
            Ok(updated) => {
                if let Some(user) = self.users.iter_mut().find(|u| u.id == updated.id) {
                    *user = updated.clone();
                }
                self.notifier.success("User profile updated successfully");
                Outcome::Success(updated)
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to update user profile");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user_profile(&mut self, id: DbId) -> Outcome<()> {
        match receive(self.client.delete_user_profile(id, no_wake)).await {
            Ok(()) => {
                self.users.retain(|u| u.id != id);
                self.pagination
                    .set_filtered_count(self.pagination.filtered_count().saturating_sub(1));
                self.total_count = self.total_count.saturating_sub(1);
                self.notifier.success("User deleted successfully");
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
    pub async fn block_user(&mut self, id: DbId) -> Outcome<String> {
        match receive(self.client.block_user(id, no_wake)).await {
            Ok(reply) => {
                self.notifier.success("User blocked successfully");
                Outcome::Success(reply)
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to block user");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&mut self, id: DbId) -> Outcome<UserProfile> {
        match receive(self.client.get_user_profile(id, no_wake)).await {
            Ok(user) => Outcome::Success(user),
            Err(err) => {
                let message = format!("Failed to load user with ID {id}");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_user_recent_activity(&mut self, id: DbId) -> Outcome<serde_json::Value> {
        match receive(self.client.get_user_recent_activity(id, no_wake)).await {
            Ok(activity) => Outcome::Success(activity),
            Err(err) => {
                let message = format!("Failed to load recent activity for user {id}");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    /// Registers a new account then reloads the list from the server so the
    /// user shows up once, in server order
    #[tracing::instrument(skip(self, password, password_check))]
    pub async fn create_user(
        &mut self,
        email: &str,
        password: SecretString,
        password_check: &SecretString,
    ) -> Outcome<()> {
        let args = match RegisterReqArgs::try_new(email, password, password_check) {
            Ok(args) => args,
            Err(err) => {
                let message = err.to_string();
                self.notifier.error(&message);
                return Outcome::failure(message);
            }
        };
        match receive(self.client.create_user(args, no_wake)).await {
            Ok(()) => {
                self.notifier.success("User created successfully");
                // Failure to reload is reported by fetch
                let _ = self.fetch(false).await;
                Outcome::Success(())
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to create user");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    /// Applies `change` to the filters and goes back to the first page
    pub fn update_filters<F: FnOnce(&mut UserProfileFilters)>(&mut self, change: F) {
        change(&mut self.filters);
        self.pagination.reset_page();
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(|filters| *filters = UserProfileFilters::default());
    }

    /// Filters by email, an empty query removes the filter
    pub fn search_users(&mut self, query: &str) {
        let email = (!query.is_empty()).then(|| query.to_string());
        self.update_filters(|filters| filters.email = email);
    }

    pub fn go_to_page(&mut self, page: u32) -> bool {
        self.pagination.go_to_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev_page()
    }

    pub fn change_limit(&mut self, limit: u32) {
        self.pagination.change_limit(limit);
    }
}
