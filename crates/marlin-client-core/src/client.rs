use anyhow::Context as _;
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use marlin_shared::{
    const_config::{
        client::{CLIENT_DEFAULT_API_BASE_URL, CLIENT_ROUTE_LOGIN},
        path::{ResolvedPath, PATH_AUTH_REFRESH, PATH_LOGIN},
    },
    req_args::LoginReqArgs,
    session::Session,
    token::AccessToken,
    uac::{AuthorityRole, LoginResponse},
};
use marlin_time::Timestamp;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret as _;
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, info, warn};

use crate::{logs_mock::LogSource, session_store::SessionStore};

pub mod api;

/// Used for requests that take no arguments
pub const NO_ARGS: &[(&str, &str)] = &[];

/// Lets the client force the front end onto another route, for example back
/// to the login page once the server rejects the session
pub trait Navigator: Debug + Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        debug!(path, "navigation requested but no navigator is set");
    }
}

/// A response that arrived but did not have a success status
#[derive(Debug, thiserror::Error)]
#[error("{}", self.display_message())]
pub struct ResponseError {
    pub status: StatusCode,
    /// The `message` field of a JSON body if there was one
    pub message: Option<String>,
    pub body: String,
}

impl ResponseError {
    fn new(status: StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string));
        Self {
            status,
            message,
            body,
        }
    }

    fn display_message(&self) -> String {
        match (&self.message, self.body.is_empty()) {
            (Some(message), _) => message.clone(),
            (None, false) => self.body.clone(),
            (None, true) => format!(
                "request failed with status code: {} and no body",
                self.status
            ),
        }
    }

    /// Finds the [`ResponseError`] in an error returned by the [`Client`]
    pub fn find(err: &anyhow::Error) -> Option<&Self> {
        err.downcast_ref()
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    server_address: Arc<str>,
    session_store: SessionStore,
    navigator: Arc<dyn Navigator>,
    /// Held while a token refresh is in progress so only one is sent
    refresh_lock: Arc<futures::lock::Mutex<()>>,
    log_source: LogSource,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_API_BASE_URL, SessionStore::default())
    }
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session has been stored
    Success { role: AuthorityRole },
    /// Credentials were accepted but the role may not use the admin portal.
    /// Nothing was stored
    AccessDenied { role: AuthorityRole },
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn role(&self) -> AuthorityRole {
        match self {
            Self::Success { role } | Self::AccessDenied { role } => *role,
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(session_store))]
    pub fn new<S: Into<String> + Debug>(server_address: S, session_store: SessionStore) -> Self {
        let server_address: String = server_address.into();
        Self {
            api_client: reqwest::Client::new(),
            server_address: server_address.trim_end_matches('/').into(),
            session_store,
            navigator: Arc::new(NoopNavigator),
            refresh_lock: Arc::new(futures::lock::Mutex::new(())),
            log_source: LogSource::default(),
        }
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn with_log_source(mut self, log_source: LogSource) -> Self {
        self.log_source = log_source;
        self
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub(crate) fn log_source(&self) -> &LogSource {
        &self.log_source
    }

    pub fn session(&self) -> Option<Session> {
        self.session_store.load()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session_store.is_admin()
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<LoginOutcome>> {
        let (tx, rx) = oneshot::channel();
        let args = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
            "rememberMe": args.remember_me,
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            deliver(tx, msg);
            ui_notify();
        };

        self.initiate_request(PATH_LOGIN.into(), &args, on_done);
        rx
    }

    /// Local only, the server keeps no session state
    #[tracing::instrument]
    pub fn logout(&self) {
        self.session_store.clear();
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, path: ResolvedPath, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let uses_query = path.method == Method::GET || path.method == Method::DELETE;
        let mut request = self
            .api_client
            .request(path.method, self.path_to_url(&path.path));
        request = if uses_query {
            request.query(args)
        } else {
            request.json(args)
        };
        let client = self.clone();
        reqwest_cross::spawn(async move {
            let request = client.authorize(request).await;
            let response = request.send().await;
            client.intercept_unauthorized(&response);
            on_done(response).await;
        });
    }

    fn send_request_expect_json<F, T, U>(
        &self,
        path: impl Into<ResolvedPath>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp).await;
            deliver(tx, msg);
            ui_notify();
        };
        self.initiate_request(path.into(), args, on_done);
        rx
    }

    fn send_request_expect_empty<F, T>(
        &self,
        path: impl Into<ResolvedPath>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_empty(resp).await;
            deliver(tx, msg);
            ui_notify();
        };
        self.initiate_request(path.into(), args, on_done);
        rx
    }

    fn send_request_expect_text<F, T>(
        &self,
        path: impl Into<ResolvedPath>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<String>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_text(resp).await;
            deliver(tx, msg);
            ui_notify();
        };
        self.initiate_request(path.into(), args, on_done);
        rx
    }

    fn send_request_expect_bytes<F, T>(
        &self,
        path: impl Into<ResolvedPath>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<u8>>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_bytes(resp).await;
            deliver(tx, msg);
            ui_notify();
        };
        self.initiate_request(path.into(), args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!("{}{path}", self.server_address)
    }

    async fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.current_access_token().await {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Returns the token to send, refreshing it first if it is too old
    ///
    /// A failed refresh is not fatal, the stale token is used instead and the
    /// server gets to decide
    async fn current_access_token(&self) -> Option<AccessToken> {
        let session = self.session_store.load()?;
        if session.access_token.is_empty() {
            return None;
        }
        if !session.needs_refresh(Timestamp::now()) {
            return Some(session.access_token);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another request may have completed the refresh while we were waiting
        let session = self.session_store.load()?;
        if !session.needs_refresh(Timestamp::now()) {
            return Some(session.access_token);
        }
        match self.refresh_session(&session).await {
            Ok(refreshed) => Some(refreshed.access_token),
            Err(err) => {
                warn!(?err, "token refresh failed, continuing with stale token");
                Some(session.access_token)
            }
        }
    }

    /// Sent directly so a failure here is never intercepted
    #[tracing::instrument(skip_all, err(Debug))]
    async fn refresh_session(&self, session: &Session) -> anyhow::Result<Session> {
        let refresh_token = session
            .refresh_token
            .as_ref()
            .context("session has no refresh token")?;
        let args = serde_json::json!({ "refreshToken": refresh_token.expose_secret() });
        let response = self
            .api_client
            .request(PATH_AUTH_REFRESH.method, self.path_to_url(PATH_AUTH_REFRESH.path))
            .json(&args)
            .send()
            .await;
        let response: LoginResponse = process_json_body(response).await?;
        let refreshed = session.with_refreshed_tokens(
            response.access_token,
            response.refresh_token,
            Timestamp::now(),
        );
        self.session_store.save(Some(&refreshed));
        info!("access token refreshed");
        Ok(refreshed)
    }

    fn intercept_unauthorized(&self, response: &reqwest::Result<reqwest::Response>) {
        let Ok(response) = response else {
            return;
        };
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url = %response.url(), "unauthorized response, clearing session");
            self.session_store.clear();
            self.navigator.navigate(CLIENT_ROUTE_LOGIN);
        }
    }
}

/// The receiver may already be gone if the caller lost interest
pub(crate) fn deliver<T>(tx: oneshot::Sender<T>, msg: T) {
    if tx.send(msg).is_err() {
        debug!("receiver dropped, discarding response");
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .json()
            .await
            .context("failed to parse result as json")?)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_text(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<String> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .text()
            .await
            .context("failed to read response body")?)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(err(Debug))]
async fn process_bytes(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<Vec<u8>> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .bytes()
            .await
            .context("failed to read response body")?
            .to_vec())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug), skip(client))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<LoginOutcome> {
    let (response, status) = extract_response(response)?;
    if !status.is_success() {
        return Err(handle_error(response).await);
    }
    let login_response: LoginResponse = response
        .json()
        .await
        .context("failed to parse result as json")?;
    let role = login_response.effective_role();
    if role != AuthorityRole::Admin {
        return Ok(LoginOutcome::AccessDenied { role });
    }
    let session = Session::new_login(
        login_response.access_token,
        login_response.refresh_token,
        role,
        Timestamp::now(),
    );
    client.session_store.save(Some(&session));
    Ok(LoginOutcome::Success { role })
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(?err, "failed to get response body");
            String::new()
        }
    };
    ResponseError::new(status, body).into()
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

/// Wraps a value that is already known in a receiver so local operations look
/// the same to callers as remote ones
pub(crate) fn ready<T, F: UiCallBack>(
    value: anyhow::Result<T>,
    ui_notify: F,
) -> oneshot::Receiver<anyhow::Result<T>> {
    let (tx, rx) = oneshot::channel();
    deliver(tx, value);
    ui_notify();
    rx
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
