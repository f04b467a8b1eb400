use chrono::{DateTime, SecondsFormat, Utc};

use super::user_profiles::push_non_empty;
use crate::{
    list::{QueryFilters, Sort},
    logs::LogLevel,
};

/// The service filter value that means "every service"
pub const ALL_SERVICES: &str = "all";

/// Filters for `GET /admin/logs` and the export and clear endpoints
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogFilters {
    pub level: Option<LogLevel>,
    pub service: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub user: Option<String>,
    pub correlation_id: Option<String>,
    pub sort: Option<Sort>,
}

impl LogFilters {
    /// Returns the service filter unless it is unset, empty or [`ALL_SERVICES`]
    pub fn effective_service(&self) -> Option<&str> {
        self.service
            .as_deref()
            .filter(|s| !s.is_empty() && *s != ALL_SERVICES)
    }

    /// Only the subset of filters that `GET /admin/logs/export` understands
    pub fn export_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut result = self.clear_query_pairs();
        push_non_empty(&mut result, "search", self.search.as_deref());
        result
    }

    /// Only the subset of filters that `DELETE /admin/logs` understands
    pub fn clear_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut result = Vec::new();
        if let Some(level) = self.level {
            result.push(("level", level.to_string()));
        }
        push_non_empty(&mut result, "service", self.service.as_deref());
        if let Some(start) = self.start_date {
            result.push(("startDate", as_query_date(start)));
        }
        if let Some(end) = self.end_date {
            result.push(("endDate", as_query_date(end)));
        }
        result
    }
}

impl QueryFilters for LogFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut result = self.export_query_pairs();
        push_non_empty(&mut result, "user", self.user.as_deref());
        push_non_empty(
            &mut result,
            "correlationId",
            self.correlation_id.as_deref(),
        );
        if let Some(sort) = &self.sort {
            sort.push_query_pairs(&mut result);
        }
        result
    }
}

fn as_query_date(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
