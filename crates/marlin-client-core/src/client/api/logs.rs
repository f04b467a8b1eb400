//! Logs are served by [`LogSource`], either the server or the in memory mock

use chrono::Utc;
use futures::channel::oneshot;
use marlin_shared::{
    const_config::path::{
        PATH_ADMIN_LOG, PATH_ADMIN_LOGS, PATH_ADMIN_LOGS_CLEAR, PATH_ADMIN_LOGS_EXPORT,
        PATH_ADMIN_LOGS_SERVICES,
    },
    list::ListQuery,
    logs::{ExportFormat, LogEntry, LogExport, LogsResponse},
    req_args::admin::logs::LogFilters,
};

use crate::{
    client::{deliver, ready, UiCallBack, NO_ARGS},
    logs_mock::LogSource,
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_logs<F: UiCallBack>(
        &self,
        query: &ListQuery<LogFilters>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LogsResponse>> {
        match self.log_source().with_mock(|store| Ok(store.get_logs(query))) {
            Some(result) => ready(result, ui_notify),
            None => self.send_request_expect_json(PATH_ADMIN_LOGS, &query.query_pairs(), ui_notify),
        }
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_log<F: UiCallBack>(
        &self,
        id: &str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LogEntry>> {
        match self.log_source().with_mock(|store| store.get_log(id)) {
            Some(result) => ready(result, ui_notify),
            None => self.send_request_expect_json(PATH_ADMIN_LOG.with_id(id), &NO_ARGS, ui_notify),
        }
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn export_logs<F: UiCallBack>(
        &self,
        filters: &LogFilters,
        format: ExportFormat,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LogExport>> {
        if let Some(result) = self
            .log_source()
            .with_mock(|store| store.export(filters, format, Utc::now()))
        {
            return ready(result, ui_notify);
        }

        let mut args = filters.export_query_pairs();
        args.push(("format", format.to_string()));
        let bytes_rx = self.send_request_expect_bytes(PATH_ADMIN_LOGS_EXPORT, &args, || {});
        let (tx, rx) = oneshot::channel();
        reqwest_cross::spawn(async move {
            let msg = match bytes_rx.await {
                Ok(result) => result.map(|bytes| LogExport::new(format, Utc::now(), bytes)),
                Err(_) => Err(anyhow::anyhow!("export response was never delivered")),
            };
            deliver(tx, msg);
            ui_notify();
        });
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn get_log_services<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<String>>> {
        match self.log_source().with_mock(|store| Ok(store.services())) {
            Some(result) => ready(result, ui_notify),
            None => self.send_request_expect_json(PATH_ADMIN_LOGS_SERVICES, &NO_ARGS, ui_notify),
        }
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn clear_logs<F: UiCallBack>(
        &self,
        filters: &LogFilters,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let cleared = self.log_source().with_mock(|store| {
            store.clear(filters);
            Ok(())
        });
        match cleared {
            Some(result) => ready(result, ui_notify),
            None => self.send_request_expect_empty(
                PATH_ADMIN_LOGS_CLEAR,
                &filters.clear_query_pairs(),
                ui_notify,
            ),
        }
    }

    pub fn uses_mock_logs(&self) -> bool {
        matches!(self.log_source(), LogSource::Mock(_))
    }
}
