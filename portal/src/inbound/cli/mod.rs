//! Command-line front end.
//!
//! Each invocation performs at most one user action against the persisted
//! portal state and then prints the resulting view.

mod controller;
mod notifier;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use zeroize::Zeroizing;

pub use controller::PortalController;
pub use notifier::TerminalNotifier;
pub use render::render;

use crate::domain::ports::{KeyValueStore, Notifier};
use crate::domain::{
    ApplicationDraft, ApplicationId, AuthMode, LoginCredentials, PortalResult, RegistrationForm,
    Resolution,
};

/// `gorodok` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gorodok",
    about = "Municipal complaint portal: file neighbourhood upkeep tickets and review them",
    version
)]
pub struct Cli {
    /// Directory holding the portal entries. Overrides `PORTAL_DATA_DIR`.
    #[arg(long = "data-dir", value_name = "path", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Action to perform. Defaults to showing the current view.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Login or registration tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Login,
    Register,
}

impl From<Tab> for AuthMode {
    fn from(value: Tab) -> Self {
        match value {
            Tab::Login => Self::Login,
            Tab::Register => Self::Register,
        }
    }
}

/// User actions.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current view.
    Show {
        /// Tab to show when nobody is signed in.
        #[arg(long, value_enum)]
        tab: Option<Tab>,
    },
    /// Sign in.
    Login {
        #[arg(long)]
        login: String,
        #[arg(long)]
        password: String,
    },
    /// Create a resident account and sign in.
    Register {
        #[arg(long = "full-name", default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        login: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long = "confirm-password", default_value = "")]
        confirm_password: String,
    },
    /// Sign out.
    Logout,
    /// File a ticket.
    Apply {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a ticket as resolved.
    Resolve { id: u64 },
    /// Mark a ticket as rejected.
    Reject { id: u64 },
}

impl Default for Command {
    fn default() -> Self {
        Self::Show { tab: None }
    }
}

/// Run `command` through `controller`.
pub fn execute<S, N>(controller: &mut PortalController<S, N>, command: Command) -> PortalResult<()>
where
    S: KeyValueStore,
    N: Notifier,
{
    match command {
        Command::Show { tab } => {
            if let Some(tab) = tab {
                controller.switch_tab(tab.into());
            }
            Ok(())
        }
        Command::Login { login, password } => {
            controller.submit_login(LoginCredentials::new(login, password))
        }
        Command::Register {
            full_name,
            login,
            email,
            phone,
            password,
            confirm_password,
        } => controller.submit_registration(RegistrationForm {
            full_name,
            login,
            email,
            phone,
            password: Zeroizing::new(password),
            confirm_password: Zeroizing::new(confirm_password),
        }),
        Command::Logout => controller.logout(),
        Command::Apply { title, description } => {
            controller.submit_application(ApplicationDraft::new(title, description))
        }
        Command::Resolve { id } => controller.review(ApplicationId::new(id), Resolution::Resolved),
        Command::Reject { id } => controller.review(ApplicationId::new(id), Resolution::Rejected),
    }
}
