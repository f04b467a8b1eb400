//! Paged list requests and responses

use crate::const_config::client::pagination::PAGINATION_DEFAULT_LIMIT;

/// Filters that can be turned into query parameters
///
/// Pairs must come out in a fixed order so identical filters produce identical
/// URLs
pub trait QueryFilters {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq, Default, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct Sort {
    pub by: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc<S: Into<String>>(by: S) -> Self {
        Self {
            by: by.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc<S: Into<String>>(by: S) -> Self {
        Self {
            by: by.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn push_query_pairs(&self, pairs: &mut Vec<(&'static str, String)>) {
        pairs.push(("sortBy", self.by.clone()));
        pairs.push(("sortDirection", self.direction.to_string()));
    }
}

/// A request for one page of a list. `page` is 0-based as the server expects
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub limit: u32,
    pub filters: F,
}

impl<F: QueryFilters> ListQuery<F> {
    pub fn new(page: u32, limit: u32, filters: F) -> Self {
        Self {
            page,
            limit,
            filters,
        }
    }

    pub fn first_page(filters: F) -> Self {
        Self::new(0, PAGINATION_DEFAULT_LIMIT, filters)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut result = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        result.extend(self.filters.query_pairs());
        result
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub filtered_count: u64,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            filtered_count: 0,
        }
    }
}
