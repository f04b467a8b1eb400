//! Admin portal front end: the state containers behind each screen, routing
//! with the admin guard, and a terminal interface driving them

#![warn(unused_crate_dependencies)]

#[cfg(test)] // Only the integration tests start mock servers
mod warning_suppress {
    use wiremock as _;
}

pub mod cli;
pub mod commands;
pub mod configuration;
pub mod notifications;
pub mod routes;
pub mod runtime;
pub mod state;
pub mod tracing;

pub use notifications::{Notification, NotificationKind, Notifier};
pub use routes::{guard, GuardDecision, Route, Router};
pub use state::Outcome;
