//! Runs one CLI command against the state containers and prints the result

use anyhow::{bail, Context as _};
use marlin_client_core::{Client, LogSource, SessionStore};
use marlin_shared::{
    list::Sort,
    location::Location,
    req_args::{
        admin::{logs::LogFilters, user_profiles::UserProfileFilters},
        location::UpdateLocationRequest,
        LoginReqArgs,
    },
    sensor::PotentialSensor,
    uac::{Email, UserProfile},
};
use marlin_time::Timestamp;
use secrecy::SecretString;
use std::{
    io::{BufRead as _, Write as _},
    sync::Arc,
};
use tracing::info;

use crate::{
    cli::{
        Command, LocationsCommand, LogFilterArgs, LogsCommand, PageArgs, SensorsCommand, SortArgs,
        UsersCommand,
    },
    configuration::Configuration,
    routes::{GuardDecision, Route, Router, ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE},
    state::{
        self, AuthState, DashboardState, LocationsState, LogsState, Pagination, SensorsState,
        UserDetailState, UserProfilesState,
    },
    Notifier,
};

/// Everything a command needs, built once from the configuration
#[derive(Debug)]
pub struct App {
    client: Client,
    notifier: Notifier,
    router: Arc<Router>,
    default_limit: u32,
}

pub async fn run(command: Command, configuration: Configuration) -> anyhow::Result<()> {
    let app = App::new(&configuration)?;
    let result = app.execute(command).await;
    app.print_notifications();
    result
}

impl App {
    pub fn new(configuration: &Configuration) -> anyhow::Result<Self> {
        let session_store = SessionStore::new(configuration.session.storage()?);
        let log_source = if configuration.logs.use_mock {
            LogSource::default()
        } else {
            LogSource::Remote
        };
        Ok(Self::with_client(
            &configuration.api.base_url,
            session_store,
            log_source,
            configuration.pagination.default_limit,
        ))
    }

    pub fn with_client(
        base_url: &str,
        session_store: SessionStore,
        log_source: LogSource,
        default_limit: u32,
    ) -> Self {
        let router = Arc::new(Router::new(session_store.clone()));
        let client = Client::new(base_url, session_store)
            .with_navigator(router.clone())
            .with_log_source(log_source);
        Self {
            client,
            notifier: Notifier::new(),
            router,
            default_limit,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn print_notifications(&self) {
        for notification in self.notifier.drain() {
            println!("[{}] {}", notification.title, notification.message);
        }
    }

    /// Opens `route` and fails unless the guard lets it render
    fn enter(&self, route: Route) -> anyhow::Result<()> {
        match self.router.open(route) {
            GuardDecision::Render => Ok(()),
            GuardDecision::RedirectToLogin => {
                bail!("Not logged in. Run the `login` command first")
            }
            GuardDecision::AccessDenied => bail!("{ACCESS_DENIED_TITLE}: {ACCESS_DENIED_MESSAGE}"),
        }
    }

    fn pagination(&self, args: &PageArgs) -> Pagination {
        Pagination::new(args.page, args.limit.unwrap_or(self.default_limit))
    }

    // Skips the command since it may carry a password
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login {
                email,
                password,
                remember_me,
            } => self.login(&email, password, remember_me).await,
            Command::Logout => {
                AuthState::new(self.client.clone(), self.notifier.clone()).logout();
                Ok(())
            }
            Command::Whoami => self.whoami().await,
            Command::Dashboard => {
                self.enter(Route::Dashboard)?;
                let mut state = DashboardState::new(self.client.clone(), self.notifier.clone());
                let info = state.load_dashboard_info().await.into_result()?;
                print_optional("Total users", info.total_users);
                print_optional("Active sensors", info.active_sensors);
                print_optional("Measurements today", info.measurements_today);
                print_optional("System status", info.system_status);
                for (key, value) in &info.extra {
                    println!("{key}: {value}");
                }
                Ok(())
            }
            Command::Sensors { action } => {
                self.enter(Route::Sensors)?;
                self.sensors(action).await
            }
            Command::Locations { action } => {
                self.enter(Route::Locations)?;
                self.locations(action).await
            }
            Command::Users { action } => self.users(action).await,
            Command::Logs { action } => {
                self.enter(Route::Logs)?;
                self.logs(action).await
            }
        }
    }

    async fn login(
        &self,
        email: &str,
        password: Option<String>,
        remember_me: bool,
    ) -> anyhow::Result<()> {
        let email = Email::try_from(email).context("invalid email")?;
        let password = match password {
            Some(password) => SecretString::from(password),
            None => read_secret("Password")?,
        };
        let args = LoginReqArgs::new(email, password).remember_me(remember_me);
        let mut auth = AuthState::new(self.client.clone(), self.notifier.clone());
        let role = auth.login(args).await.into_result()?;
        info!(%role, route = %self.router.current(), "logged in");
        println!("Logged in as {role}");
        Ok(())
    }

    async fn whoami(&self) -> anyhow::Result<()> {
        let Some(session) = self.client.session() else {
            println!("Not logged in");
            return Ok(());
        };
        println!("Role: {}", session.role);
        println!("Logged in since: {}", session.logged_in_since);
        println!("Token age: {}", session.token_age(Timestamp::now()));
        let profile = state::receive(self.client.get_current_user_profile(state::no_wake))
            .await
            .context("failed to load profile")?;
        println!("{}", user_line(&profile));
        Ok(())
    }

    async fn sensors(&self, action: SensorsCommand) -> anyhow::Result<()> {
        let mut state = SensorsState::new(self.client.clone(), self.notifier.clone());
        match action {
            SensorsCommand::List {
                search,
                active,
                inactive,
            } => {
                state.load_sensors().await.into_result()?;
                let shown: Vec<&PotentialSensor> = match (search.as_deref(), active, inactive) {
                    (Some(query), _, _) => state.search_sensors(query),
                    (None, true, _) => state.active_sensors(),
                    (None, _, true) => state.inactive_sensors(),
                    (None, false, false) => state.sensors().iter().collect(),
                };
                for sensor in shown {
                    println!("{}", sensor_line(sensor));
                }
                println!(
                    "{} sensors ({} active, {} inactive)",
                    state.total_count(),
                    state.active_count(),
                    state.inactive_count()
                );
            }
            SensorsCommand::Toggle { id } => {
                state.toggle_sensor_status(id).await.into_result()?;
                if let Some(sensor) = state.sensor_by_id(id) {
                    println!("{}", sensor_line(sensor));
                }
            }
        }
        Ok(())
    }

    async fn locations(&self, action: LocationsCommand) -> anyhow::Result<()> {
        let mut state = LocationsState::new(self.client.clone(), self.notifier.clone());
        match action {
            LocationsCommand::List {
                search,
                with_coordinates,
            } => {
                state.load_locations().await.into_result()?;
                let shown = match search.as_deref() {
                    Some(query) => state.search_locations(query),
                    None if with_coordinates => state.locations_with_coordinates(),
                    None => state.locations().iter().collect(),
                };
                for location in shown {
                    println!("{}", location_line(location));
                }
            }
            LocationsCommand::Show { id } => {
                let location = state.get_location_details(id).await.into_result()?;
                print_json(&location)?;
            }
            LocationsCommand::Update {
                id,
                name,
                address,
                description,
                opening_time,
                closing_time,
            } => {
                let current = state.get_location_details(id).await.into_result()?;
                let mut request = UpdateLocationRequest::from(&current);
                request.name = name.or(request.name);
                request.address = address.or(request.address);
                request.description = description.or(request.description);
                request.opening_time = opening_time.or(request.opening_time);
                request.closing_time = closing_time.or(request.closing_time);
                let updated = state.update_location(id, request).await.into_result()?;
                print_json(&updated)?;
            }
            LocationsCommand::DeleteImage { id } => {
                state.delete_location_image(id).await.into_result()?;
            }
            LocationsCommand::Assign { user, location } => {
                state.assign_harbor_master(user, location).await.into_result()?;
            }
        }
        Ok(())
    }

    async fn users(&self, action: UsersCommand) -> anyhow::Result<()> {
        match action {
            UsersCommand::List {
                page,
                sort,
                email,
                role,
                verified,
            } => {
                self.enter(Route::Users)?;
                let filters = UserProfileFilters {
                    email: email.filter(|e| !e.is_empty()),
                    authority_role: role,
                    verified,
                    sort: sort_from(sort),
                    ..Default::default()
                };
                let mut state = UserProfilesState::new(
                    self.client.clone(),
                    self.notifier.clone(),
                    self.pagination(&page),
                )
                .with_filters(filters);
                if let Some(outcome) = state.sync().await {
                    outcome.into_result()?;
                }
                for user in state.users() {
                    println!("{}", user_line(user));
                }
                print_page(state.pagination(), state.total_count());
            }
            UsersCommand::Create {
                email,
                password,
                confirm_password,
            } => {
                self.enter(Route::Users)?;
                let password = match password {
                    Some(password) => SecretString::from(password),
                    None => read_secret("Password")?,
                };
                let confirm = match confirm_password {
                    Some(confirm) => SecretString::from(confirm),
                    None => read_secret("Confirm password")?,
                };
                let mut state = UserProfilesState::new(
                    self.client.clone(),
                    self.notifier.clone(),
                    Pagination::new(1, self.default_limit),
                )
                .with_filters(UserProfileFilters {
                    email: Some(email.clone()),
                    ..Default::default()
                });
                state.create_user(&email, password, &confirm).await.into_result()?;
                for user in state.users() {
                    println!("{}", user_line(user));
                }
            }
            UsersCommand::Block { id } => {
                self.enter(Route::Users)?;
                let mut state = UserProfilesState::new(
                    self.client.clone(),
                    self.notifier.clone(),
                    Pagination::default(),
                );
                let reply = state.block_user(id).await.into_result()?;
                if !reply.is_empty() {
                    println!("{reply}");
                }
            }
            UsersCommand::Activity { id } => {
                self.enter(Route::Users)?;
                let mut state = UserProfilesState::new(
                    self.client.clone(),
                    self.notifier.clone(),
                    Pagination::default(),
                );
                let activity = state.get_user_recent_activity(id).await.into_result()?;
                print_json(&activity)?;
            }
            UsersCommand::Show { id } => {
                let state = self.user_detail(id).await?;
                if let Some(user) = state.user() {
                    print_json(user)?;
                }
            }
            UsersCommand::Edit {
                id,
                first_name,
                last_name,
            } => {
                let mut state = self.user_detail(id).await?;
                let user = state
                    .edit_profile(&first_name, &last_name)
                    .await
                    .into_result()?;
                println!("{}", user_line(&user));
            }
            UsersCommand::Role { id, role } => {
                let mut state = self.user_detail(id).await?;
                let user = state.change_role(role).await.into_result()?;
                println!("{}", user_line(&user));
            }
            UsersCommand::Verify { id } => {
                let mut state = self.user_detail(id).await?;
                let user = state.toggle_verification().await.into_result()?;
                println!("{}", user_line(&user));
            }
            UsersCommand::AssignLocation { id, location } => {
                let mut state = self.user_detail(id).await?;
                state.assign_location(location).await.into_result()?;
            }
            UsersCommand::Delete { id } => {
                let mut state = self.user_detail(id).await?;
                state.delete().await.into_result()?;
            }
        }
        Ok(())
    }

    /// Opens the detail page of `id` with the user loaded
    async fn user_detail(&self, id: marlin_shared::id::DbId) -> anyhow::Result<UserDetailState> {
        self.enter(Route::UserDetail(id))?;
        let mut state = UserDetailState::new(self.client.clone(), self.notifier.clone());
        state.load(id).await.into_result()?;
        Ok(state)
    }

    async fn logs(&self, action: LogsCommand) -> anyhow::Result<()> {
        let new_state = |pagination: Pagination, filters: LogFilterArgs| {
            LogsState::new(self.client.clone(), self.notifier.clone(), pagination)
                .with_filters(log_filters(filters))
        };
        match action {
            LogsCommand::List {
                page,
                filters,
                stats,
            } => {
                let mut state = new_state(self.pagination(&page), filters);
                if let Some(outcome) = state.sync().await {
                    outcome.into_result()?;
                }
                for entry in state.logs() {
                    println!(
                        "{}  {:<7}  {:<24}  {}  ({})",
                        entry.timestamp.to_rfc3339(),
                        entry.level,
                        entry.service,
                        entry.message,
                        entry.id
                    );
                }
                print_page(state.pagination(), state.total_count());
                if stats {
                    let stats = state.log_stats();
                    println!(
                        "total {} | info {} | warning {} | error {} | debug {} | trace {} | fatal {}",
                        stats.total,
                        stats.info,
                        stats.warning,
                        stats.error,
                        stats.debug,
                        stats.trace,
                        stats.fatal
                    );
                }
            }
            LogsCommand::Show { id } => {
                let mut state = new_state(Pagination::default(), LogFilterArgs::default());
                let entry = state.get_log_by_id(&id).await.into_result()?;
                print_json(&entry)?;
            }
            LogsCommand::Services => {
                let mut state = new_state(Pagination::default(), LogFilterArgs::default());
                for service in state.load_services().await.into_result()? {
                    println!("{service}");
                }
            }
            LogsCommand::Export {
                format,
                output,
                filters,
            } => {
                let mut state = new_state(Pagination::default(), filters);
                let export = state.export_logs(format).await.into_result()?;
                std::fs::create_dir_all(&output)
                    .with_context(|| format!("failed to create {output:?}"))?;
                // Colons are not allowed in file names on every platform
                let path = output.join(export.file_name.replace(':', "-"));
                std::fs::write(&path, &export.bytes)
                    .with_context(|| format!("failed to write {path:?}"))?;
                println!("Wrote {} bytes to {path:?}", export.bytes.len());
            }
            LogsCommand::Clear { filters } => {
                let mut state = new_state(Pagination::default(), filters);
                state.clear_logs().await.into_result()?;
            }
        }
        Ok(())
    }
}

fn log_filters(args: LogFilterArgs) -> LogFilters {
    let filters = LogFilters {
        level: args.level,
        service: args.service,
        start_date: args.since,
        end_date: args.until,
        search: args.search.filter(|s| !s.is_empty()),
        ..Default::default()
    };
    let service = filters.effective_service().map(str::to_string);
    LogFilters { service, ..filters }
}

fn sort_from(args: SortArgs) -> Option<Sort> {
    let by = args.sort_by?;
    Some(if args.desc { Sort::desc(by) } else { Sort::asc(by) })
}

fn read_secret(prompt: &str) -> anyhow::Result<SecretString> {
    eprint!("{prompt}: ");
    std::io::stderr().flush().context("failed to flush stderr")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(SecretString::from(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to format as json")?;
    println!("{text}");
    Ok(())
}

fn print_optional<T: std::fmt::Display>(label: &str, value: Option<T>) {
    if let Some(value) = value {
        println!("{label}: {value}");
    }
}

fn print_page(pagination: &Pagination, total_count: u64) {
    println!(
        "Page {} of {} ({} matching, {} total)",
        pagination.page(),
        pagination.total_pages().max(1),
        pagination.filtered_count(),
        total_count
    );
}

fn sensor_line(sensor: &PotentialSensor) -> String {
    let state = if sensor.is_active { "active" } else { "inactive" };
    format!("{:>6}  {state:<8}  {}", sensor.id, sensor.display_name())
}

fn location_line(location: &Location) -> String {
    let coordinates = match location.coordinates {
        Some(point) if location.has_valid_coordinates() => {
            format!("{:.4}, {:.4}", point.lat, point.lon)
        }
        _ => "-".to_string(),
    };
    format!(
        "{:>6}  {:<30}  {coordinates}",
        location.id,
        location.name.as_deref().unwrap_or("Unnamed")
    )
}

fn user_line(user: &UserProfile) -> String {
    let verified = if user.verified { "verified" } else { "unverified" };
    let location = user
        .assigned_location
        .as_ref()
        .map(|l| format!("  [{l}]"))
        .unwrap_or_default();
    format!(
        "{:>6}  {:<14}  {verified:<10}  {} <{}>{location}",
        user.id,
        user.authority_role,
        user.display_name(),
        user.email
    )
}

#[cfg(test)]
mod tests {
    use marlin_shared::logs::LogLevel;

    use super::*;
    use crate::Outcome;

    #[test]
    fn all_services_dropped_from_cli_filters() {
        let actual = log_filters(LogFilterArgs {
            level: Some(LogLevel::Warning),
            service: Some("all".into()),
            search: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(actual.service, None);
        assert_eq!(actual.search, None);
        assert_eq!(actual.level, Some(LogLevel::Warning));
    }

    #[test]
    fn sort_direction_from_flag() {
        let actual = sort_from(SortArgs {
            sort_by: Some("email".into()),
            desc: true,
        });
        assert_eq!(actual, Some(Sort::desc("email")));
        assert_eq!(
            sort_from(SortArgs {
                sort_by: None,
                desc: false
            }),
            None
        );
    }

    #[test]
    fn protected_command_needs_session() {
        let app = App::with_client(
            "http://127.0.0.1:9",
            SessionStore::default(),
            LogSource::Remote,
            10,
        );
        let actual = app.enter(Route::Sensors).unwrap_err();
        assert!(actual.to_string().contains("Not logged in"));
        assert_eq!(app.router().current(), Route::Login);
    }

    #[test]
    fn outcome_failure_becomes_error() {
        let outcome: Outcome<()> = Outcome::failure("Failed to load sensors");
        assert_eq!(
            outcome.into_result().unwrap_err().to_string(),
            "Failed to load sensors"
        );
    }
}
