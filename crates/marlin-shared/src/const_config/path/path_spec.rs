use std::fmt::Display;

use reqwest::Method;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

/// A [`PathSpec`] with any placeholder filled in, ready to be appended to the
/// server address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: String,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    pub const fn put(path: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path,
            method: Method::DELETE,
        }
    }

    /// True if the path contains an `{id}` placeholder that must be filled
    /// using [`Self::with_id`]
    pub fn is_templated(&self) -> bool {
        self.path.contains(ID_PLACEHOLDER)
    }

    pub fn with_id<T: Display>(&self, id: T) -> ResolvedPath {
        debug_assert!(self.is_templated(), "no placeholder in {:?}", self.path);
        ResolvedPath {
            path: self.path.replace(ID_PLACEHOLDER, &id.to_string()),
            method: self.method.clone(),
        }
    }
}

impl From<PathSpec> for ResolvedPath {
    fn from(value: PathSpec) -> Self {
        debug_assert!(!value.is_templated(), "unfilled placeholder in {:?}", value.path);
        Self {
            path: value.path.to_string(),
            method: value.method,
        }
    }
}
