//! Endpoints acting on the profile of the user that is logged in

use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::{
        PATH_USER_PROFILE_CREATE, PATH_USER_PROFILE_DELETE, PATH_USER_PROFILE_UPDATE,
    },
    req_args::user_profile::{CreateUserProfileRequest, UpdateUserProfileRequest},
    uac::UserProfile,
};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_current_user_profile<F: UiCallBack>(
        &self,
        args: CreateUserProfileRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_USER_PROFILE_CREATE, &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_current_user_profile<F: UiCallBack>(
        &self,
        args: UpdateUserProfileRequest,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_USER_PROFILE_UPDATE, &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn delete_current_user_account<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(PATH_USER_PROFILE_DELETE, &NO_ARGS, ui_notify)
    }
}
