use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::{
        PATH_ADMIN_USER_PROFILE, PATH_ADMIN_USER_PROFILES, PATH_ADMIN_USER_PROFILE_BLOCK,
        PATH_ADMIN_USER_PROFILE_DELETE, PATH_ADMIN_USER_PROFILE_RECENT_ACTIVITY,
        PATH_ADMIN_USER_PROFILE_UPDATE,
    },
    id::DbId,
    list::{ListQuery, ListResponse},
    req_args::admin::user_profiles::{AdminUserUpdate, BlockUserReqArgs, UserProfileFilters},
    uac::UserProfile,
};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

pub type UserProfilesResponse = ListResponse<UserProfile>;

impl Client {
    /// Page numbers are 0-based on the wire
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user_profiles<F: UiCallBack>(
        &self,
        query: &ListQuery<UserProfileFilters>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfilesResponse>> {
        self.send_request_expect_json(PATH_ADMIN_USER_PROFILES, &query.query_pairs(), ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user_profile<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_ADMIN_USER_PROFILE.with_id(id), &NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_user_profile<F: UiCallBack>(
        &self,
        update: AdminUserUpdate,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_ADMIN_USER_PROFILE_UPDATE, &update, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_user_profile<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(
            PATH_ADMIN_USER_PROFILE_DELETE.with_id(id),
            &NO_ARGS,
            ui_notify,
        )
    }

    /// The shape of the activity is not fixed so it is returned as is
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_user_recent_activity<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<serde_json::Value>> {
        self.send_request_expect_json(
            PATH_ADMIN_USER_PROFILE_RECENT_ACTIVITY.with_id(id),
            &NO_ARGS,
            ui_notify,
        )
    }

    /// Returns the confirmation text sent by the server
    #[tracing::instrument(skip(ui_notify))]
    pub fn block_user<F: UiCallBack>(
        &self,
        id: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<String>> {
        let args = BlockUserReqArgs { user_id: id };
        self.send_request_expect_text(PATH_ADMIN_USER_PROFILE_BLOCK, &args, ui_notify)
    }
}
