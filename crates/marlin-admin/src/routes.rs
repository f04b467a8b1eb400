//! Screens of the portal and the admin only guard in front of them

use marlin_client_core::{Navigator, SessionStore};
use marlin_shared::{id::DbId, session::Session};
use std::{
    fmt::Display,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, info};

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const ACCESS_DENIED_MESSAGE: &str =
    "You need administrator privileges to access this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Sensors,
    Locations,
    Users,
    UserDetail(DbId),
    Logs,
    Settings,
}

impl Route {
    /// Anything that is not a known route ends up on the login page
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/dashboard" => Self::Dashboard,
            "/sensors" => Self::Sensors,
            "/locations" => Self::Locations,
            "/users" => Self::Users,
            "/logs" => Self::Logs,
            "/settings" => Self::Settings,
            other => other
                .strip_prefix("/users/")
                .and_then(|id| id.parse().ok())
                .map(Self::UserDetail)
                .unwrap_or(Self::Login),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Sensors => "/sensors".to_string(),
            Route::Locations => "/locations".to_string(),
            Route::Users => "/users".to_string(),
            Route::UserDetail(id) => format!("/users/{id}"),
            Route::Logs => "/logs".to_string(),
            Route::Settings => "/settings".to_string(),
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
    /// Show [`ACCESS_DENIED_MESSAGE`] then go to login
    AccessDenied,
}

/// Decides what a protected route shows for the given session
pub fn guard(session: Option<&Session>) -> GuardDecision {
    match session {
        None => GuardDecision::RedirectToLogin,
        Some(session) if !session.is_admin() => GuardDecision::AccessDenied,
        Some(_) => GuardDecision::Render,
    }
}

/// Tracks the route on screen. Protected routes are only entered when the
/// guard allows it
#[derive(Debug)]
pub struct Router {
    session_store: SessionStore,
    current: Mutex<Route>,
    last_decision: Mutex<GuardDecision>,
}

impl Router {
    pub fn new(session_store: SessionStore) -> Self {
        Self {
            session_store,
            current: Mutex::new(Route::Login),
            last_decision: Mutex::new(GuardDecision::Render),
        }
    }

    pub fn current(&self) -> Route {
        *lock(&self.current)
    }

    /// What the guard said the last time a route was opened
    pub fn last_decision(&self) -> GuardDecision {
        *lock(&self.last_decision)
    }

    #[tracing::instrument(skip(self))]
    pub fn open(&self, route: Route) -> GuardDecision {
        let decision = if route.is_protected() {
            guard(self.session_store.load().as_ref())
        } else {
            GuardDecision::Render
        };
        let shown = match decision {
            GuardDecision::Render => route,
            GuardDecision::RedirectToLogin | GuardDecision::AccessDenied => Route::Login,
        };
        info!(?decision, %shown, "route opened");
        *lock(&self.current) = shown;
        *lock(&self.last_decision) = decision;
        decision
    }
}

impl Navigator for Router {
    fn navigate(&self, path: &str) {
        debug!(path, "navigate");
        self.open(Route::parse(path));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
