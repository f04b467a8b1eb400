use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use marlin_shared::{
    id::DbId,
    logs::{ExportFormat, LogLevel},
    uac::UserAuthorityRole,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as an administrator, the password is read from stdin if not given
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        remember_me: bool,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session and the profile of the logged in user
    Whoami,
    /// Summary figures
    Dashboard,
    Sensors {
        #[command(subcommand)]
        action: SensorsCommand,
    },
    Locations {
        #[command(subcommand)]
        action: LocationsCommand,
    },
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
    Logs {
        #[command(subcommand)]
        action: LogsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SensorsCommand {
    List {
        /// Only show sensors with this text in their name or description
        #[arg(long)]
        search: Option<String>,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Flip the active flag of a sensor
    Toggle { id: DbId },
}

#[derive(Subcommand, Debug)]
pub enum LocationsCommand {
    List {
        /// Match on name or id
        #[arg(long)]
        search: Option<String>,
        /// Only locations that have coordinates set
        #[arg(long)]
        with_coordinates: bool,
    },
    Show {
        id: DbId,
    },
    /// Fields not given keep their current value
    Update {
        id: DbId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        opening_time: Option<String>,
        #[arg(long)]
        closing_time: Option<String>,
    },
    DeleteImage {
        id: DbId,
    },
    /// Make a user the harbor master of a location
    Assign {
        #[arg(long)]
        user: DbId,
        #[arg(long)]
        location: DbId,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Defaults to the configured page size
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct SortArgs {
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long, requires = "sort_by")]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        sort: SortArgs,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<UserAuthorityRole>,
        #[arg(long)]
        verified: Option<bool>,
    },
    Show {
        id: DbId,
    },
    /// Register a new account, passwords are read from stdin if not given
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Change first and last name, an empty value clears it
    Edit {
        id: DbId,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    Role {
        id: DbId,
        role: UserAuthorityRole,
    },
    /// Flip the verified flag
    Verify {
        id: DbId,
    },
    /// Make the user harbor master of a location
    AssignLocation {
        id: DbId,
        #[arg(long)]
        location: DbId,
    },
    Delete {
        id: DbId,
    },
    Block {
        id: DbId,
    },
    Activity {
        id: DbId,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct LogFilterArgs {
    #[arg(long)]
    pub level: Option<LogLevel>,
    /// `all` means no service filter
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
    /// RFC 3339, e.g. 2024-05-01T00:00:00Z
    #[arg(long)]
    pub since: Option<DateTime<Utc>>,
    #[arg(long)]
    pub until: Option<DateTime<Utc>>,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filters: LogFilterArgs,
        /// Also print counts per level
        #[arg(long)]
        stats: bool,
    },
    Show {
        id: String,
    },
    Services,
    Export {
        #[arg(long, default_value = "json")]
        format: ExportFormat,
        /// Folder to write the export into
        #[arg(long, default_value = ".")]
        output: PathBuf,
        #[command(flatten)]
        filters: LogFilterArgs,
    },
    /// Delete the logs matching the filters
    Clear {
        #[command(flatten)]
        filters: LogFilterArgs,
    },
}
