#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::{Arc, Mutex};

use marlin_client_core::{Client, LogSource, Navigator, SessionStore};
use marlin_shared::{session::Session, uac::AuthorityRole};
use marlin_time::{Seconds, Timestamp};
use wiremock::MockServer;

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

pub struct TestClient {
    pub client: Client,
    pub store: SessionStore,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestClient {
    pub fn new(server: &MockServer, session: Option<Session>) -> Self {
        let store = SessionStore::default();
        store.save(session.as_ref());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = Client::new(server.uri(), store.clone())
            .with_navigator(navigator.clone())
            .with_log_source(LogSource::Remote);
        Self {
            client,
            store,
            navigator,
        }
    }
}

/// An admin session whose access token was issued `age` ago
pub fn session_aged(age: Seconds) -> Session {
    Session::new_login(
        "access".into(),
        Some("refresh".into()),
        AuthorityRole::Admin,
        Timestamp::now() - age,
    )
}

pub fn fresh_session() -> Session {
    session_aged(Seconds::from_mins(5))
}

pub fn stale_session() -> Session {
    session_aged(Seconds::from_hours(4))
}

pub fn no_cb() {}
