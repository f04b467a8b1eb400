use futures::channel::oneshot;
use marlin_shared::{const_config::path::PATH_ADMIN_DASHBOARD_INFO, dashboard::DashboardInfo};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_dashboard_info<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<DashboardInfo>> {
        self.send_request_expect_json(PATH_ADMIN_DASHBOARD_INFO, &NO_ARGS, ui_notify)
    }
}
