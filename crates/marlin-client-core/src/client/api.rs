//! The API services. Every method maps to a single endpoint and adds no state
//! of its own beyond what [`Client`] already holds

use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::PATH_USER_PROFILE,
    uac::UserProfile,
};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod locations;
pub mod logs;
pub mod sensors;
pub mod user_profile;

impl Client {
    /// The profile of the user that is logged in
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_current_user_profile<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserProfile>> {
        self.send_request_expect_json(PATH_USER_PROFILE, &NO_ARGS, ui_notify)
    }
}
