use chrono::{DateTime, Utc};

use crate::list::ListResponse;

#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Debug,
    Trace,
    Fatal,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub service: String,
    pub message: String,
    /// Either free text or a JSON object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

pub type LogsResponse = ListResponse<LogEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// A downloadable file of log entries
#[derive(Clone, PartialEq, Eq)]
pub struct LogExport {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl LogExport {
    pub fn new(format: ExportFormat, created: DateTime<Utc>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!(
                "logs_{}.{}",
                created.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                format.extension()
            ),
            content_type: format.content_type(),
            bytes,
        }
    }
}

impl std::fmt::Debug for LogExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogExport")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_file_name() {
        let created = DateTime::parse_from_rfc3339("2024-12-20T14:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let export = LogExport::new(ExportFormat::Csv, created, vec![]);
        assert_eq!(export.file_name, "logs_2024-12-20T14:30:00.000Z.csv");
        assert_eq!(export.content_type, "text/csv");
    }

    #[test]
    fn optional_fields_are_omitted() {
        let entry = LogEntry {
            id: "log-1".into(),
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
            level: LogLevel::Warning,
            service: "Database".into(),
            message: "Slow query detected".into(),
            details: None,
            user: None,
            correlation_id: None,
            stack_trace: None,
            metadata: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["level"], "warning");
        assert!(json.get("user").is_none());
    }
}
