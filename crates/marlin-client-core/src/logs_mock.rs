//! In memory stand in for the logs endpoints
//!
//! The server does not provide the logs API yet so by default the client
//! serves logs from a generated data set held here.

use anyhow::{bail, Context as _};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use marlin_shared::{
    const_config::client::pagination::PAGINATION_DEFAULT_LIMIT,
    list::{ListQuery, SortDirection},
    logs::{ExportFormat, LogEntry, LogExport, LogLevel, LogsResponse},
    req_args::admin::logs::LogFilters,
};
use rand::{seq::SliceRandom as _, Rng};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    sync::{Arc, Mutex},
};
use strum::IntoEnumIterator as _;

const MOCK_LOG_COUNT: usize = 200;
const MOCK_LOG_FIRST_ID: usize = 1000;
const MOCK_LOG_SPACING_MINS: i64 = 5;
const CSV_HEADERS: [&str; 6] = ["Timestamp", "Level", "Service", "Message", "User", "Details"];

const MOCK_SERVICES: [&str; 15] = [
    "Authentication",
    "Database",
    "API Gateway",
    "Email Service",
    "Sensor Network",
    "Cache Service",
    "Scheduler",
    "WebSocket",
    "Payment Gateway",
    "Analytics",
    "Deployment",
    "Monitoring",
    "File Storage",
    "Queue Service",
    "Search Engine",
];

const HTTP_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

fn messages_for(level: LogLevel) -> &'static [&'static str] {
    match level {
        LogLevel::Info => &[
            "User login successful",
            "Service started successfully",
            "Configuration loaded",
            "Database connection established",
            "Cache warmed up",
            "Scheduled task executed",
            "Backup completed successfully",
            "Report generated",
            "New user registered",
            "Settings updated",
            "Session created",
            "Data synchronized",
        ],
        LogLevel::Warning => &[
            "High memory usage detected",
            "Slow query detected",
            "Rate limit approaching",
            "SSL certificate expires soon",
            "Disk space running low",
            "Deprecated API endpoint used",
            "Connection timeout warning",
            "Unusual activity detected",
            "Cache miss ratio high",
            "Retry attempt failed",
        ],
        LogLevel::Error => &[
            "Failed to connect to database",
            "Authentication failed",
            "Service unavailable",
            "Transaction failed",
            "File not found",
            "Permission denied",
            "Invalid request format",
            "Timeout exceeded",
            "Memory allocation failed",
            "Network error occurred",
        ],
        LogLevel::Debug => &[
            "Request processed",
            "Cache hit",
            "Query executed",
            "Event triggered",
            "Function called",
            "Variable updated",
            "Loop iteration completed",
            "Condition evaluated",
            "Object created",
            "Resource allocated",
        ],
        LogLevel::Trace => &[
            "Entering function",
            "Exiting function",
            "Parameter values",
            "State change detected",
            "Event listener triggered",
            "Middleware executed",
            "Hook called",
            "Component rendered",
            "Route matched",
            "Validation passed",
        ],
        LogLevel::Fatal => &[
            "System crash detected",
            "Critical error - service shutting down",
            "Database corruption detected",
            "Security breach attempt",
            "Out of memory",
            "Stack overflow",
            "Kernel panic",
            "Disk failure",
            "Network interface down",
            "Critical dependency missing",
        ],
    }
}

/// Where the logs operations of the [`crate::Client`] get their data
#[derive(Debug, Clone)]
pub enum LogSource {
    /// The `/admin/logs` endpoints
    Remote,
    Mock(Arc<Mutex<MockLogStore>>),
}

impl Default for LogSource {
    fn default() -> Self {
        Self::mock(MockLogStore::new())
    }
}

impl LogSource {
    pub fn mock(store: MockLogStore) -> Self {
        Self::Mock(Arc::new(Mutex::new(store)))
    }

    /// Runs `f` against the mock store, `None` if the source is remote
    pub(crate) fn with_mock<T>(
        &self,
        f: impl FnOnce(&mut MockLogStore) -> anyhow::Result<T>,
    ) -> Option<anyhow::Result<T>> {
        let Self::Mock(store) = self else {
            return None;
        };
        Some(match store.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(_) => Err(anyhow::anyhow!("mock log store mutex poisoned")),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockLogStore {
    logs: Vec<LogEntry>,
    /// Fixed when the data is generated, clearing logs does not change it
    services: Vec<String>,
}

impl Default for MockLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLogStore {
    pub fn new() -> Self {
        Self::generate(&mut rand::thread_rng(), Utc::now())
    }

    /// Creates entries going back in time from `now`, newest first
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        Self::from_entries(generate_logs(rng, now))
    }

    pub fn from_entries(logs: Vec<LogEntry>) -> Self {
        let services = logs
            .iter()
            .map(|log| log.service.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self { logs, services }
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    #[tracing::instrument(skip(self))]
    pub fn get_logs(&self, query: &ListQuery<LogFilters>) -> LogsResponse {
        let mut filtered: Vec<&LogEntry> = self
            .logs
            .iter()
            .filter(|log| matches_filters(log, &query.filters))
            .collect();
        match &query.filters.sort {
            Some(sort) => filtered.sort_by(|a, b| {
                let ordering = compare_by_field(a, b, &sort.by);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }),
            None => filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }

        let limit = match query.limit {
            0 => PAGINATION_DEFAULT_LIMIT,
            limit => limit,
        } as usize;
        let start = (query.page as usize).saturating_mul(limit);
        let items = filtered
            .iter()
            .skip(start)
            .take(limit)
            .map(|&log| log.clone())
            .collect();
        LogsResponse {
            items,
            total_count: self.logs.len() as u64,
            filtered_count: filtered.len() as u64,
        }
    }

    pub fn get_log(&self, id: &str) -> anyhow::Result<LogEntry> {
        match self.logs.iter().find(|log| log.id == id) {
            Some(log) => Ok(log.clone()),
            None => bail!("Log not found"),
        }
    }

    /// Exports the first page of matching entries
    #[tracing::instrument(skip(self))]
    pub fn export(
        &self,
        filters: &LogFilters,
        format: ExportFormat,
        now: DateTime<Utc>,
    ) -> anyhow::Result<LogExport> {
        let response = self.get_logs(&ListQuery::first_page(filters.clone()));
        let bytes = match format {
            ExportFormat::Json => serde_json::to_vec_pretty(&response.items)
                .context("failed to serialize logs as json")?,
            ExportFormat::Csv => logs_to_csv(&response.items)?,
        };
        Ok(LogExport::new(format, now, bytes))
    }

    pub fn services(&self) -> Vec<String> {
        self.services.clone()
    }

    /// With a level or service set removes entries matching either of them,
    /// otherwise removes everything. The service is compared as given, so
    /// `all` matches no entry here
    #[tracing::instrument(skip(self))]
    pub fn clear(&mut self, filters: &LogFilters) {
        let service = filters.service.as_deref();
        if filters.level.is_none() && service.is_none() {
            self.logs.clear();
            return;
        }
        self.logs.retain(|log| {
            let level_hit = filters.level == Some(log.level);
            let service_hit = service == Some(log.service.as_str());
            !(level_hit || service_hit)
        });
    }

    /// Stores `entry` as the newest log with a freshly assigned id
    pub fn add(&mut self, mut entry: LogEntry) -> LogEntry {
        entry.id = format!("log-{}", Utc::now().timestamp_millis());
        self.logs.insert(0, entry.clone());
        entry
    }

    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        *self = Self::generate(rng, now);
    }
}

fn generate_logs<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<LogEntry> {
    let levels: Vec<LogLevel> = LogLevel::iter().collect();
    (0..MOCK_LOG_COUNT)
        .map(|i| {
            let level = levels[rng.gen_range(0..levels.len())];
            let service = MOCK_SERVICES[rng.gen_range(0..MOCK_SERVICES.len())];
            let messages = messages_for(level);
            let message = messages[rng.gen_range(0..messages.len())];
            let timestamp = now - Duration::minutes(i as i64 * MOCK_LOG_SPACING_MINS);

            let correlation_id = rng
                .gen_bool(0.3)
                .then(|| format!("corr-{}", rng.gen_range(0..1000)));
            let user = rng
                .gen_bool(0.4)
                .then(|| format!("user{}@example.com", rng.gen_range(0..100)));
            let details = rng.gen_bool(0.5).then(|| {
                serde_json::json!({
                    "duration": format!("{}ms", rng.gen_range(0..1000)),
                    "statusCode": rng.gen_range(200..700),
                    "endpoint": format!("/api/{}", service.to_lowercase()),
                    "method": HTTP_METHODS.choose(rng).copied().unwrap_or("GET"),
                })
            });
            let metadata = rng.gen_bool(0.2).then(|| {
                let mut map = serde_json::Map::new();
                map.insert(
                    "ip".into(),
                    format!("192.168.{}.{}", rng.gen_range(0..255), rng.gen_range(0..255)).into(),
                );
                map.insert("userAgent".into(), "Mozilla/5.0".into());
                map.insert(
                    "requestId".into(),
                    format!("req-{}", rng.gen_range(0..10000)).into(),
                );
                map
            });

            LogEntry {
                id: format!("log-{}", MOCK_LOG_FIRST_ID + i),
                timestamp,
                level,
                service: service.to_string(),
                message: message.to_string(),
                details,
                user,
                correlation_id,
                stack_trace: None,
                metadata,
            }
        })
        .collect()
}

fn matches_filters(log: &LogEntry, filters: &LogFilters) -> bool {
    if filters.level.is_some_and(|level| level != log.level) {
        return false;
    }
    if filters
        .effective_service()
        .is_some_and(|service| service != log.service)
    {
        return false;
    }
    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        let search = search.to_lowercase();
        let details = log
            .details
            .as_ref()
            .map(|d| d.to_string().to_lowercase())
            .unwrap_or_default();
        let hit = log.message.to_lowercase().contains(&search)
            || log.service.to_lowercase().contains(&search)
            || log
                .user
                .as_ref()
                .is_some_and(|u| u.to_lowercase().contains(&search))
            || details.contains(&search);
        if !hit {
            return false;
        }
    }
    if filters.start_date.is_some_and(|start| log.timestamp < start) {
        return false;
    }
    if filters.end_date.is_some_and(|end| log.timestamp > end) {
        return false;
    }
    if let Some(user) = filters.user.as_deref().filter(|s| !s.is_empty()) {
        if log.user.as_deref() != Some(user) {
            return false;
        }
    }
    if let Some(id) = filters.correlation_id.as_deref().filter(|s| !s.is_empty()) {
        if log.correlation_id.as_deref() != Some(id) {
            return false;
        }
    }
    true
}

/// Unknown fields fall back to the timestamp
fn compare_by_field(a: &LogEntry, b: &LogEntry, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "level" => <&str>::from(a.level).cmp(<&str>::from(b.level)),
        "service" => a.service.cmp(&b.service),
        "message" => a.message.cmp(&b.message),
        "user" => a.user.cmp(&b.user),
        _ => a.timestamp.cmp(&b.timestamp),
    }
}

fn logs_to_csv(logs: &[LogEntry]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .context("failed to write csv header")?;
    for log in logs {
        let details = log
            .details
            .clone()
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()));
        writer
            .write_record([
                log.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true).as_str(),
                <&str>::from(log.level),
                log.service.as_str(),
                log.message.as_str(),
                log.user.as_deref().unwrap_or_default(),
                details.to_string().as_str(),
            ])
            .with_context(|| format!("failed to write csv row for {}", log.id))?;
    }
    let mut bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv writer: {}", e.error()))?;
    // Rows are separated by newlines, the last one is not terminated
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use marlin_shared::{list::Sort, req_args::admin::logs::ALL_SERVICES};
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn seeded_store() -> MockLogStore {
        MockLogStore::generate(&mut StdRng::seed_from_u64(7), now())
    }

    fn entry(id: &str, mins_ago: i64, level: LogLevel, service: &str) -> LogEntry {
        LogEntry {
            id: id.into(),
            timestamp: now() - Duration::minutes(mins_ago),
            level,
            service: service.into(),
            message: format!("message {id}"),
            details: None,
            user: None,
            correlation_id: None,
            stack_trace: None,
            metadata: None,
        }
    }

    fn small_store() -> MockLogStore {
        MockLogStore::from_entries(vec![
            entry("a", 10, LogLevel::Info, "Database"),
            entry("b", 0, LogLevel::Error, "Scheduler"),
            entry("c", 5, LogLevel::Error, "Database"),
        ])
    }

    fn query(filters: LogFilters) -> ListQuery<LogFilters> {
        ListQuery::first_page(filters)
    }

    #[test]
    fn generated_set_shape() {
        // Act
        let store = seeded_store();

        // Assert
        assert_eq!(store.len(), MOCK_LOG_COUNT);
        assert_eq!(store.logs[0].id, "log-1000");
        assert_eq!(store.logs[199].id, "log-1199");
        assert_eq!(store.logs[0].timestamp, now());
        assert_eq!(
            store.logs[0].timestamp - store.logs[1].timestamp,
            Duration::minutes(5)
        );
        let services = store.services();
        let mut sorted = services.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(services, sorted);
        for log in &store.logs {
            assert!(messages_for(log.level).contains(&log.message.as_str()));
            assert!(MOCK_SERVICES.contains(&log.service.as_str()));
        }
    }

    #[test]
    fn same_seed_same_data() {
        assert_eq!(seeded_store(), seeded_store());
    }

    #[test]
    fn regenerate_restores_cleared_store() {
        // Arrange
        let mut store = seeded_store();
        store.clear(&LogFilters::default());
        assert!(store.is_empty());

        // Act
        store.regenerate(&mut StdRng::seed_from_u64(7), now());

        // Assert
        assert_eq!(store, seeded_store());
    }

    #[test]
    fn default_page_is_newest_ten() {
        // Act
        let actual = seeded_store().get_logs(&query(LogFilters::default()));

        // Assert
        assert_eq!(actual.items.len(), 10);
        assert_eq!(actual.total_count, 200);
        assert_eq!(actual.filtered_count, 200);
        assert_eq!(actual.items[0].id, "log-1000");
        assert!(actual
            .items
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn zero_limit_uses_default() {
        let actual = seeded_store().get_logs(&ListQuery::new(1, 0, LogFilters::default()));
        assert_eq!(actual.items.len(), 10);
        assert_eq!(actual.items[0].id, "log-1010");
    }

    #[test]
    fn level_and_service_filters() {
        // Arrange
        let store = small_store();
        let filters = LogFilters {
            level: Some(LogLevel::Error),
            service: Some("Database".into()),
            ..Default::default()
        };

        // Act
        let actual = store.get_logs(&query(filters));

        // Assert
        assert_eq!(actual.filtered_count, 1);
        assert_eq!(actual.total_count, 3);
        assert_eq!(actual.items[0].id, "c");
    }

    #[test]
    fn service_all_is_ignored() {
        let filters = LogFilters {
            service: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(small_store().get_logs(&query(filters)).filtered_count, 3);
    }

    #[test]
    fn search_is_case_insensitive_over_details() {
        // Arrange
        let mut with_details = entry("d", 1, LogLevel::Debug, "Analytics");
        with_details.details = Some(serde_json::json!({ "endpoint": "/api/Analytics" }));
        let mut store = small_store();
        store.logs.push(with_details);
        let filters = LogFilters {
            search: Some("API/ANALYTICS".into()),
            ..Default::default()
        };

        // Act
        let actual = store.get_logs(&query(filters));

        // Assert
        assert_eq!(actual.items.len(), 1);
        assert_eq!(actual.items[0].id, "d");
    }

    #[test]
    fn date_range_is_inclusive() {
        let filters = LogFilters {
            start_date: Some(now() - Duration::minutes(5)),
            end_date: Some(now()),
            ..Default::default()
        };
        let ids: Vec<_> = small_store()
            .get_logs(&query(filters))
            .items
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn sort_by_service_ascending() {
        let filters = LogFilters {
            sort: Some(Sort::asc("service")),
            ..Default::default()
        };
        let services: Vec<_> = small_store()
            .get_logs(&query(filters))
            .items
            .into_iter()
            .map(|l| l.service)
            .collect();
        assert_eq!(services, ["Database", "Database", "Scheduler"]);
    }

    #[test]
    fn missing_log_errors() {
        let err = small_store().get_log("nope").unwrap_err();
        assert_eq!(err.to_string(), "Log not found");
    }

    #[test]
    fn clear_by_level_or_service() {
        // Arrange
        let mut store = small_store();
        store.logs.push(entry("e", 2, LogLevel::Trace, "Monitoring"));

        // Act
        store.clear(&LogFilters {
            level: Some(LogLevel::Info),
            service: Some("Scheduler".into()),
            ..Default::default()
        });

        // Assert
        let ids: Vec<_> = store.logs.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["c", "e"]);
        assert_eq!(store.services().len(), 2, "services are fixed at creation");
    }

    #[test]
    fn clear_with_service_all_removes_nothing() {
        // Arrange
        let mut store = seeded_store();
        assert_eq!(store.len(), 200);

        // Act
        store.clear(&LogFilters {
            service: Some(ALL_SERVICES.into()),
            ..Default::default()
        });

        // Assert
        assert_eq!(store.len(), 200);
    }

    #[test]
    fn clear_without_filters_removes_everything() {
        let mut store = seeded_store();
        store.clear(&LogFilters::default());
        assert!(store.is_empty());
        assert_eq!(store.get_logs(&query(LogFilters::default())).total_count, 0);
    }

    #[test]
    fn add_prepends_with_new_id() {
        let mut store = small_store();
        let added = store.add(entry("ignored", 0, LogLevel::Fatal, "Deployment"));
        assert!(added.id.starts_with("log-"));
        assert_ne!(added.id, "ignored");
        assert_eq!(store.logs[0], added);
    }

    #[test]
    fn csv_export() {
        // Arrange
        let mut store = MockLogStore::from_entries(vec![entry("a", 0, LogLevel::Info, "Database")]);
        store.logs[0].details = Some(serde_json::json!({ "method": "GET" }));

        // Act
        let export = store
            .export(&LogFilters::default(), ExportFormat::Csv, now())
            .unwrap();

        // Assert
        let text = String::from_utf8(export.bytes).unwrap();
        assert_eq!(
            text,
            "\"Timestamp\",\"Level\",\"Service\",\"Message\",\"User\",\"Details\"\n\
             \"2024-06-01T12:00:00.000Z\",\"info\",\"Database\",\"message a\",\"\",\"{\"\"method\"\":\"\"GET\"\"}\""
        );
        assert!(!text.ends_with('\n'));
        assert_eq!(export.file_name, "logs_2024-06-01T12:00:00.000Z.csv");
    }

    #[test]
    fn json_export_is_first_page() {
        let export = seeded_store()
            .export(&LogFilters::default(), ExportFormat::Json, now())
            .unwrap();
        let items: Vec<LogEntry> = serde_json::from_slice(&export.bytes).unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(export.content_type, "application/json");
    }
}
