use marlin_client_core::Client;
use marlin_shared::dashboard::DashboardInfo;
use tracing::error;

use super::{no_wake, receive, Outcome};
use crate::Notifier;

#[derive(Debug)]
pub struct DashboardState {
    client: Client,
    notifier: Notifier,
    info: Option<DashboardInfo>,
    is_loading: bool,
    error: Option<String>,
}

impl DashboardState {
    pub fn new(client: Client, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            info: None,
            is_loading: false,
            error: None,
        }
    }

    pub fn info(&self) -> Option<&DashboardInfo> {
        self.info.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_dashboard_info(&mut self) -> Outcome<DashboardInfo> {
        self.is_loading = true;
        self.error = None;
        let result = receive(self.client.get_dashboard_info(no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(info) => {
                self.info = Some(info.clone());
                Outcome::Success(info)
            }
            Err(err) => {
                let message = "Failed to load dashboard information";
                error!(?err, message);
                self.error = Some(message.to_string());
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    pub async fn refresh_dashboard(&mut self) -> Outcome<DashboardInfo> {
        self.load_dashboard_info().await
    }
}
