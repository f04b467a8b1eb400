use chrono::{DateTime, Utc};
use marlin_client_core::Client;
use marlin_shared::{
    list::ListQuery,
    logs::{ExportFormat, LogEntry, LogExport, LogLevel, LogsResponse},
    req_args::admin::logs::{LogFilters, ALL_SERVICES},
};
use tracing::{error, warn};

use super::{no_wake, receive, server_message_or, Outcome, Pagination};
use crate::Notifier;

type LoadedKey = (LogFilters, u32, u32);

/// Count of entries per level on the current page, `total` is for all pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogStats {
    pub total: u64,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub debug: usize,
    pub trace: usize,
    pub fatal: usize,
}

#[derive(Debug)]
pub struct LogsState {
    client: Client,
    notifier: Notifier,
    logs: Vec<LogEntry>,
    services: Vec<String>,
    total_count: u64,
    pagination: Pagination,
    filters: LogFilters,
    is_loading: bool,
    error: Option<String>,
    loaded: Option<LoadedKey>,
}

impl LogsState {
    pub fn new(client: Client, notifier: Notifier, pagination: Pagination) -> Self {
        Self {
            client,
            notifier,
            logs: Vec::new(),
            services: Vec::new(),
            total_count: 0,
            pagination,
            filters: LogFilters::default(),
            is_loading: false,
            error: None,
            loaded: None,
        }
    }

    pub fn with_filters(mut self, filters: LogFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn services(&self) -> &[String] {
        &self.services
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

    pub fn filters(&self) -> &LogFilters {
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

    /// A failure to list services is not worth a notification
    #[tracing::instrument(skip(self))]
    pub async fn load_services(&mut self) -> Outcome<Vec<String>> {
        match receive(self.client.get_log_services(no_wake)).await {
            Ok(services) => {
                self.services = services.clone();
                Outcome::Success(services)
            }
            Err(err) => {
                warn!(?err, "failed to load services");
                self.services.clear();
                Outcome::failure("Failed to load services")
            }
        }
    }

    async fn fetch(&mut self, announce: bool) -> Outcome<LogsResponse> {
        let had_logs = !self.logs.is_empty();
        self.is_loading = true;
        self.error = None;
        self.loaded = Some(self.key());
        let query = ListQuery::new(
            self.pagination.request_page(),
            self.pagination.limit(),
            self.filters.clone(),
        );
        let result = receive(self.client.get_logs(&query, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(response) => {
                self.logs = response.items.clone();
                self.total_count = response.total_count;
                self.pagination.set_filtered_count(response.filtered_count);
                if announce {
                    self.notifier.success("Logs refreshed");
                }
                Outcome::Success(response)
            }
            Err(err) => {
                let message = server_message_or(&err, "Failed to load logs");
                error!(?err, %message);
                self.error = Some(message.clone());
                // Background reloads stay quiet while older logs are on screen
                if announce || !had_logs {
                    self.notifier.error(&message);
                }
                self.logs.clear();
                self.total_count = 0;
                self.pagination.set_filtered_count(0);
                Outcome::failure(message)
            }
        }
    }

    /// Loads the list if filters, page or limit changed since the last load.
    /// Returns `None` when nothing needed loading
    #[tracing::instrument(skip(self))]
    pub async fn sync(&mut self) -> Option<Outcome<LogsResponse>> {
        if self.loaded.as_ref() == Some(&self.key()) {
            return None;
        }
        Some(self.fetch(false).await)
    }

    /// Reloads the current page and confirms with a notification
    #[tracing::instrument(skip(self))]
    pub async fn load_logs(&mut self) -> Outcome<LogsResponse> {
        self.fetch(true).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_log_by_id(&mut self, id: &str) -> Outcome<LogEntry> {
        match receive(self.client.get_log(id, no_wake)).await {
            Ok(entry) => Outcome::Success(entry),
            Err(err) => {
                let message = format!("Failed to load log with ID {id}");
                error!(?err, %message);
                self.notifier.error(&message);
                Outcome::failure(message)
            }
        }
    }

    /// Exports with the current filters. Saving the file is left to the caller
    #[tracing::instrument(skip(self))]
    pub async fn export_logs(&mut self, format: ExportFormat) -> Outcome<LogExport> {
        self.is_loading = true;
        let result = receive(self.client.export_logs(&self.filters, format, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(export) => {
                let format_name = format.to_string().to_uppercase();
                self.notifier
                    .success(format!("Logs exported successfully as {format_name}"));
                Outcome::Success(export)
            }
            Err(err) => {
                let message = "Failed to export logs";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    /// Deletes the logs matching the current filters and empties the list
    #[tracing::instrument(skip(self))]
    pub async fn clear_logs(&mut self) -> Outcome<()> {
        self.is_loading = true;
        let result = receive(self.client.clear_logs(&self.filters, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(()) => {
                self.logs.clear();
                self.total_count = 0;
                self.pagination.set_filtered_count(0);
                self.notifier.success("Logs cleared successfully");
                Outcome::Success(())
            }
            Err(err) => {
                let message = "Failed to clear logs";
                error!(?err, message);
                self.notifier.error(message);
                Outcome::failure(message)
            }
        }
    }

    /// Applies `change` to the filters and goes back to the first page
    pub fn update_filters<F: FnOnce(&mut LogFilters)>(&mut self, change: F) {
        change(&mut self.filters);
        self.pagination.reset_page();
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(|filters| *filters = LogFilters::default());
    }

    pub fn search_logs(&mut self, query: &str) {
        let search = (!query.is_empty()).then(|| query.to_string());
        self.update_filters(|filters| filters.search = search);
    }

    pub fn filter_by_level(&mut self, level: Option<LogLevel>) {
        self.update_filters(|filters| filters.level = level);
    }

    /// [`ALL_SERVICES`] removes the filter
    pub fn filter_by_service(&mut self, service: Option<&str>) {
        let service = service
            .filter(|s| *s != ALL_SERVICES)
            .map(str::to_string);
        self.update_filters(|filters| filters.service = service);
    }

    pub fn filter_by_date_range(
        &mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) {
        self.update_filters(|filters| {
            filters.start_date = start_date;
            filters.end_date = end_date;
        });
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

    pub fn log_stats(&self) -> LogStats {
        let count = |level: LogLevel| self.logs.iter().filter(|l| l.level == level).count();
        LogStats {
            total: self.total_count,
            info: count(LogLevel::Info),
            warning: count(LogLevel::Warning),
            error: count(LogLevel::Error),
            debug: count(LogLevel::Debug),
            trace: count(LogLevel::Trace),
            fatal: count(LogLevel::Fatal),
        }
    }
}
