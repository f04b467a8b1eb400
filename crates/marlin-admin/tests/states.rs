use marlin_admin::{
    state::{
        LocationsState, LogsState, Pagination, SensorsState, UserDetailState, UserProfilesState,
    },
    Notifier,
};
use marlin_client_core::Client;
use marlin_shared::{
    id::DbId, req_args::location::UpdateLocationRequest, uac::UserAuthorityRole,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, ResponseTemplate,
};

mod common;
use common::{error, list_json, success, user_json, TestApp};

fn users_state(app: &TestApp, page: u32) -> UserProfilesState {
    UserProfilesState::new(
        app.client.clone(),
        app.notifier.clone(),
        Pagination::new(page, 10),
    )
}

fn log_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "timestamp": "2024-05-01T10:00:00Z",
        "level": "error",
        "service": "Database",
        "message": "Connection timeout"
    })
}

#[tokio::test]
async fn sensor_toggle_replaces_list() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/potential-sensors-toggle/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 41, "name": "Buoy A", "isActive": false },
            { "id": 42, "name": "Buoy B", "isActive": true }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut state = SensorsState::new(app.client.clone(), app.notifier.clone());

    // Act
    let actual = state.toggle_sensor_status(DbId::from(42_u64)).await;

    // Assert
    assert!(actual.is_success());
    assert_eq!(state.total_count(), 2);
    assert_eq!(state.active_count(), 1);
    assert!(state.sensor_by_id(DbId::from(42_u64)).unwrap().is_active);
    assert_eq!(app.notifications(), [success("Sensor Buoy B activated")]);
}

#[tokio::test]
async fn sensor_load_failure_clears_list() {
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/potential-sensors"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    let mut state = SensorsState::new(app.client.clone(), app.notifier.clone());

    let actual = state.load_sensors().await;

    assert_eq!(actual.error(), Some("Failed to load sensors"));
    assert!(state.sensors().is_empty());
    assert_eq!(app.notifications(), [error("Failed to load sensors")]);
}

#[tokio::test]
async fn created_user_shows_up_once_after_reload() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "email": "new@marlin-live.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "other" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![
                user_json(1, "admin@marlin-live.com"),
                user_json(2, "new@marlin-live.com"),
            ],
            2,
            2,
        )))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    // Act
    let actual = state
        .create_user(
            "new@marlin-live.com",
            "pw".to_string().into(),
            &"pw".to_string().into(),
        )
        .await;

    // Assert
    assert!(actual.is_success());
    let matching = state
        .users()
        .iter()
        .filter(|u| u.email == "new@marlin-live.com")
        .count();
    assert_eq!(matching, 1);
    assert_eq!(state.total_count(), 2);
    assert_eq!(app.notifications(), [success("User created successfully")]);
    // The admin session is untouched by the tokens of the new account
    assert_eq!(app.store.load().unwrap().access_token.expose_secret(), "access");
}

#[tokio::test]
async fn invalid_create_form_sends_nothing() {
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    let actual = state
        .create_user(
            "new@marlin-live.com",
            "pw".to_string().into(),
            &"other".to_string().into(),
        )
        .await;

    assert!(!actual.is_success());
    assert_eq!(app.notifications().len(), 1);
}

#[tokio::test]
async fn failed_user_list_is_empty() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Database down" })))
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    // Act
    let actual = state.load_users().await;

    // Assert
    assert_eq!(actual.error(), Some("Database down"));
    assert_eq!(state.error(), Some("Database down"));
    assert!(state.users().is_empty());
    assert_eq!(state.total_count(), 0);
    assert_eq!(state.filtered_count(), 0);
    assert_eq!(app.notifications(), [error("Database down")]);
}

#[tokio::test]
async fn failed_user_list_without_message_uses_fallback() {
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    let actual = state.load_users().await;

    assert_eq!(actual.error(), Some("Failed to load users"));
}

#[tokio::test]
async fn filter_change_refetches_first_page() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(vec![], 40, 40)))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .and(query_param("page", "0"))
        .and(query_param("authorityRole", "HARBOR_MASTER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(
            vec![user_json(7, "harbor@marlin-live.com")],
            40,
            1,
        )))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 3);
    assert!(state.sync().await.unwrap().is_success());

    // Act
    state.update_filters(|f| f.authority_role = Some(UserAuthorityRole::HarborMaster));
    let actual = state.sync().await;

    // Assert
    assert_eq!(state.pagination().page(), 1);
    assert!(actual.unwrap().is_success());
    assert_eq!(state.filtered_count(), 1);
    assert_eq!(state.users().len(), 1);
}

#[tokio::test]
async fn sync_skips_unchanged_query() {
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(vec![], 0, 0)))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    assert!(state.sync().await.is_some());
    assert!(state.sync().await.is_none());
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn paging_stops_at_the_bounds() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_json(vec![], 25, 25)))
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);
    assert!(state.load_users().await.is_success());

    // Act / Assert
    assert!(!state.prev_page());
    assert_eq!(state.pagination().total_pages(), 3);
    assert!(state.go_to_page(3));
    assert!(!state.next_page());
    assert_eq!(state.pagination().page(), 3);
    assert!(!state.go_to_page(4));
}

#[tokio::test]
async fn background_log_reload_stays_quiet_on_error() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(list_json(vec![log_json("a")], 1, 1)),
        )
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    let mut state = LogsState::new(app.client.clone(), app.notifier.clone(), Pagination::default());
    assert!(state.sync().await.unwrap().is_success());
    assert_eq!(state.logs().len(), 1);

    // Act
    state.search_logs("timeout");
    let actual = state.sync().await.unwrap();

    // Assert
    assert_eq!(actual.error(), Some("Failed to load logs"));
    assert!(state.logs().is_empty());
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn first_log_load_failure_is_shown() {
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/logs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    let mut state = LogsState::new(app.client.clone(), app.notifier.clone(), Pagination::default());

    state.sync().await;

    assert_eq!(app.notifications(), [error("Failed to load logs")]);
}

async fn loaded_user_detail(app: &TestApp) -> UserDetailState {
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, "jane@marlin-live.com")))
        .mount(&app.server)
        .await;
    let mut state = UserDetailState::new(app.client.clone(), app.notifier.clone());
    assert!(state.load(DbId::from(5_u64)).await.is_success());
    state
}

#[tokio::test]
async fn toggle_verification_sends_role_and_flag() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    let mut state = loaded_user_detail(&app).await;
    Mock::given(method("PUT"))
        .and(path("/admin/user-profiles"))
        .and(body_json(json!({
            "userId": 5,
            "authorityRole": "USER",
            "verified": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(5, "jane@marlin-live.com")))
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let actual = state.toggle_verification().await;

    // Assert
    assert!(actual.is_success());
    assert!(state.user().unwrap().verified);
    assert_eq!(app.notifications(), [success("User verified successfully")]);
}

#[tokio::test]
async fn deleted_user_goes_back_to_list() {
    let app = TestApp::spawn_as_admin().await;
    let mut state = loaded_user_detail(&app).await;
    Mock::given(method("DELETE"))
        .and(path("/admin/user-profiles/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.server)
        .await;

    let actual = state.delete().await;

    assert!(actual.is_success());
    assert!(state.user().is_none());
    assert_eq!(app.navigator.visited(), ["/users"]);
    assert_eq!(app.notifications(), [success("User deleted successfully")]);
}

#[tokio::test]
async fn location_update_reloads_list() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("PUT"))
        .and(path("/location/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "name": "Kiel" })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Kiel" }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;
    let mut state = LocationsState::new(app.client.clone(), app.notifier.clone());
    let request = UpdateLocationRequest {
        name: Some("Kiel".into()),
        ..Default::default()
    };

    // Act
    let actual = state.update_location(DbId::from(3_u64), request).await;

    // Assert
    assert!(actual.is_success());
    assert_eq!(state.locations().len(), 1);
    assert_eq!(
        app.notifications(),
        [success("Location updated successfully")]
    );
}

#[tokio::test]
async fn unauthorized_list_clears_session() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    Mock::given(method("GET"))
        .and(path("/admin/user-profiles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;
    let mut state = users_state(&app, 1);

    // Act
    let actual = state.load_users().await;

    // Assert
    assert!(!actual.is_success());
    assert_eq!(app.store.load(), None);
    assert_eq!(app.navigator.visited(), ["/login"]);
}

#[tokio::test]
async fn states_without_server_fail_softly() {
    let notifier = Notifier::new();
    let client = Client::new("http://127.0.0.1:9", Default::default());
    let mut state = SensorsState::new(client, notifier.clone());

    let actual = state.load_sensors().await;

    assert!(!actual.is_success());
    assert_eq!(notifier.len(), 1);
}
