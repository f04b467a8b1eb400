use marlin_client_core::{Client, LoginOutcome, ResponseError};
use marlin_shared::{
    const_config::client::{CLIENT_ROUTE_DASHBOARD, CLIENT_ROUTE_LOGIN},
    req_args::LoginReqArgs,
    session::Session,
    uac::AuthorityRole,
};
use tracing::{error, warn};

use super::{no_wake, receive, server_message_or, Outcome};
use crate::Notifier;

pub const ACCESS_DENIED_LOGIN_MESSAGE: &str = "Access denied. You are not an administrator. Only users with ADMIN role can access this portal.";

const HTTP_UNAUTHORIZED: u16 = 401;
const HTTP_TOO_MANY_REQUESTS: u16 = 429;

#[derive(Debug)]
pub struct AuthState {
    client: Client,
    notifier: Notifier,
    is_loading: bool,
}

impl AuthState {
    pub fn new(client: Client, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            is_loading: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn session(&self) -> Option<Session> {
        self.client.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_logged_in()
    }

    pub fn is_admin(&self) -> bool {
        self.client.is_admin()
    }

    /// Only administrators end up with a stored session
    #[tracing::instrument(skip(self))]
    pub async fn login(&mut self, args: LoginReqArgs) -> Outcome<AuthorityRole> {
        self.is_loading = true;
        let result = receive(self.client.login(args, no_wake)).await;
        self.is_loading = false;
        match result {
            Ok(LoginOutcome::Success { role }) => {
                self.notifier.success("Login successful! Redirecting...");
                self.client.navigator().navigate(CLIENT_ROUTE_DASHBOARD);
                Outcome::Success(role)
            }
            Ok(LoginOutcome::AccessDenied { role }) => {
                warn!(?role, "login refused for non admin");
                self.notifier.error(ACCESS_DENIED_LOGIN_MESSAGE);
                Outcome::failure(ACCESS_DENIED_LOGIN_MESSAGE)
            }
            Err(err) => {
                error!(?err, "login failed");
                match ResponseError::find(&err).map(|e| e.status.as_u16()) {
                    Some(HTTP_UNAUTHORIZED) => self.notifier.error("Invalid email or password"),
                    Some(HTTP_TOO_MANY_REQUESTS) => self
                        .notifier
                        .warning("Too many login attempts. Please try again later."),
                    _ => self.notifier.error("Login failed. Please try again."),
                }
                Outcome::failure(server_message_or(&err, "Login failed"))
            }
        }
    }

    pub fn logout(&mut self) {
        self.client.logout();
        self.notifier.info("You have been logged out");
        self.client.navigator().navigate(CLIENT_ROUTE_LOGIN);
    }

    /// Returns true if an administrator is logged in. Otherwise moves to the
    /// login page, logging out a non admin session first
    pub fn check_auth(&mut self) -> bool {
        let Some(session) = self.client.session() else {
            self.client.navigator().navigate(CLIENT_ROUTE_LOGIN);
            return false;
        };
        if !session.is_admin() {
            self.notifier.error("Unauthorized access. Admin role required.");
            self.logout();
            return false;
        }
        true
    }
}
