#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::{Arc, Mutex};

use marlin_admin::{NotificationKind, Notifier};
use marlin_client_core::{Client, LogSource, Navigator, SessionStore};
use marlin_shared::{session::Session, uac::AuthorityRole};
use marlin_time::Timestamp;
use serde_json::json;
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

pub struct TestApp {
    pub server: MockServer,
    pub client: Client,
    pub store: SessionStore,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Notifier,
}

impl TestApp {
    pub async fn spawn(session: Option<Session>) -> Self {
        let server = MockServer::start().await;
        let store = SessionStore::default();
        store.save(session.as_ref());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = Client::new(server.uri(), store.clone())
            .with_navigator(navigator.clone())
            .with_log_source(LogSource::Remote);
        Self {
            server,
            client,
            store,
            navigator,
            notifier: Notifier::new(),
        }
    }

    pub async fn spawn_as_admin() -> Self {
        Self::spawn(Some(session(AuthorityRole::Admin))).await
    }

    pub fn notifications(&self) -> Vec<(NotificationKind, String)> {
        self.notifier
            .drain()
            .into_iter()
            .map(|n| (n.kind, n.message))
            .collect()
    }
}

pub fn session(role: AuthorityRole) -> Session {
    Session::new_login("access".into(), Some("refresh".into()), role, Timestamp::now())
}

pub fn user_json(id: u64, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "authorityRole": "USER",
        "verified": false
    })
}

pub fn list_json(items: Vec<serde_json::Value>, total: u64, filtered: u64) -> serde_json::Value {
    json!({
        "items": items,
        "totalCount": total,
        "filteredCount": filtered
    })
}

pub fn success(message: &str) -> (NotificationKind, String) {
    (NotificationKind::Success, message.to_string())
}

pub fn error(message: &str) -> (NotificationKind, String) {
    (NotificationKind::Error, message.to_string())
}
