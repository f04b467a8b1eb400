use marlin_admin::{
    state::{AuthState, ACCESS_DENIED_LOGIN_MESSAGE},
    NotificationKind, Outcome,
};
use marlin_shared::{req_args::LoginReqArgs, uac::AuthorityRole};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

mod common;
use common::{error, success, TestApp};

fn login_args() -> LoginReqArgs {
    LoginReqArgs::new(
        "admin@marlin-live.com".try_into().unwrap(),
        "secret".to_string().into(),
    )
}

async fn mount_login(app: &TestApp, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(response)
        .expect(1)
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn admin_login_goes_to_dashboard() {
    // Arrange
    let app = TestApp::spawn(None).await;
    mount_login(
        &app,
        ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "a1",
            "refreshToken": "r1",
            "profile": { "authorityRole": "ADMIN" }
        })),
    )
    .await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    // Act
    let actual = state.login(login_args()).await;

    // Assert
    assert_eq!(actual, Outcome::Success(AuthorityRole::Admin));
    assert!(state.is_authenticated());
    assert!(state.is_admin());
    assert!(!state.is_loading());
    assert_eq!(app.navigator.visited(), ["/dashboard"]);
    assert_eq!(
        app.notifications(),
        [success("Login successful! Redirecting...")]
    );
}

#[tokio::test]
async fn non_admin_login_is_denied() {
    // Arrange
    let app = TestApp::spawn(None).await;
    mount_login(
        &app,
        ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "a1",
            "refreshToken": "r1",
            "profile": { "authorityRole": "USER" }
        })),
    )
    .await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    // Act
    let actual = state.login(login_args()).await;

    // Assert
    assert!(actual.error().unwrap().starts_with("Access denied"));
    assert_eq!(app.store.load(), None);
    assert!(!app.navigator.visited().contains(&"/dashboard".to_string()));
    assert_eq!(app.notifications(), [error(ACCESS_DENIED_LOGIN_MESSAGE)]);
}

#[tokio::test]
async fn missing_profile_role_counts_as_user() {
    let app = TestApp::spawn(None).await;
    mount_login(
        &app,
        ResponseTemplate::new(200).set_body_json(json!({ "accessToken": "a1" })),
    )
    .await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    let actual = state.login(login_args()).await;

    assert!(!actual.is_success());
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn bad_credentials_message() {
    // Arrange
    let app = TestApp::spawn(None).await;
    mount_login(
        &app,
        ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
    )
    .await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    // Act
    let actual = state.login(login_args()).await;

    // Assert
    assert_eq!(actual.error(), Some("Bad credentials"));
    assert_eq!(app.notifications(), [error("Invalid email or password")]);
}

#[tokio::test]
async fn rate_limited_login_is_a_warning() {
    let app = TestApp::spawn(None).await;
    mount_login(&app, ResponseTemplate::new(429)).await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    let actual = state.login(login_args()).await;

    assert_eq!(actual.error(), Some("Login failed"));
    assert_eq!(
        app.notifications(),
        [(
            NotificationKind::Warning,
            "Too many login attempts. Please try again later.".to_string()
        )]
    );
}

#[tokio::test]
async fn other_login_failures() {
    let app = TestApp::spawn(None).await;
    mount_login(&app, ResponseTemplate::new(500)).await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    let actual = state.login(login_args()).await;

    assert!(!actual.is_success());
    assert_eq!(app.notifications(), [error("Login failed. Please try again.")]);
}

#[tokio::test]
async fn logout_clears_and_returns_to_login() {
    // Arrange
    let app = TestApp::spawn_as_admin().await;
    let mut state = AuthState::new(app.client.clone(), app.notifier.clone());

    // Act
    state.logout();

    // Assert
    assert_eq!(app.store.load(), None);
    assert_eq!(app.navigator.visited(), ["/login"]);
    assert_eq!(
        app.notifications(),
        [(NotificationKind::Info, "You have been logged out".to_string())]
    );
}
