use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gym_domain::Credentials;

use crate::commands::{
    Attendance, Classes, Expenses, Login, Logout, Members, ShowStats, ThemeCommand, Trainers,
    Whoami,
};

#[derive(Parser, Debug)]
#[clap(name = "gym", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory holding the data files
    #[clap(long, env = "GYM_DATA_DIR", default_value = "gym-data")]
    pub data_dir: PathBuf,

    /// Operator name accepted by `login`
    #[clap(long, env = "GYM_ADMIN_USER", default_value = "admin")]
    pub admin_user: String,

    /// Operator password accepted by `login`
    #[clap(long, env = "GYM_ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub admin_password: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.admin_user.clone(),
            password: self.admin_password.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in as the operator
    #[clap(name = "login")]
    Login(Login),
    #[clap(name = "logout")]
    Logout(Logout),
    /// Show the logged in operator
    #[clap(name = "whoami")]
    Whoami(Whoami),

    #[clap(subcommand)]
    Theme(ThemeCommand),

    /// Manage members
    #[clap(subcommand)]
    Members(Members),
    /// Check-ins
    #[clap(subcommand)]
    Attendance(Attendance),
    #[clap(subcommand)]
    Expenses(Expenses),
    #[clap(subcommand)]
    Trainers(Trainers),
    #[clap(subcommand)]
    Classes(Classes),

    /// Show the dashboard
    #[clap(name = "stats")]
    Stats(ShowStats),
}

impl Command {
    /// Everything but logging in and the theme requires a session.
    pub fn needs_session(&self) -> bool {
        !matches!(
            self,
            Command::Login(_) | Command::Logout(_) | Command::Whoami(_) | Command::Theme(_)
        )
    }
}
