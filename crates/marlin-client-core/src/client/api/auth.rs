use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::PATH_REGISTER, req_args::RegisterReqArgs, uac::LoginResponse,
};
use secrecy::ExposeSecret as _;

use crate::{client::UiCallBack, Client};

impl Client {
    /// Self registration. The returned tokens are not stored
    #[tracing::instrument(skip(ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LoginResponse>> {
        let args = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        self.send_request_expect_json(PATH_REGISTER, &args, ui_notify)
    }

    /// Creates an account on behalf of someone else. Uses the register
    /// endpoint but the tokens issued for the new account are discarded and
    /// the current session is left alone
    #[tracing::instrument(skip(ui_notify))]
    pub fn create_user<F: UiCallBack>(
        &self,
        args: RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let args = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        self.send_request_expect_empty(PATH_REGISTER, &args, ui_notify)
    }
}
