//! View state machine and the ticket lists each view shows.
//!
//! Rendering is left to the inbound adapters; this module only decides which
//! view is active and what it contains, so it can be tested without a
//! surface.

use std::fmt;

use super::application::{Application, Resolution};
use super::portal_state::PortalState;
use super::user::{Role, User, UserId};

/// Tab shown to a visitor who is not signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Вход",
            Self::Register => "Регистрация",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which screen the portal shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Login or registration tab.
    Unauthenticated { mode: AuthMode },
    /// Every ticket, with review actions on open ones.
    AdminView,
    /// Ticket form plus the resident's own tickets.
    ResidentView,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Unauthenticated {
            mode: AuthMode::default(),
        }
    }
}

/// Inputs that move the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    SwitchTab(AuthMode),
    SignedIn(Role),
    SignedOut,
}

impl ViewState {
    /// View matching a session loaded from storage.
    pub fn for_session(user: Option<&User>) -> Self {
        match user.map(User::role) {
            Some(role) => Self::for_role(role),
            None => Self::default(),
        }
    }

    const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminView,
            Role::Resident => Self::ResidentView,
        }
    }

    /// Apply `event`. Events a state does not react to leave it unchanged.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{AuthMode, Role, ViewEvent, ViewState};
    ///
    /// let view = ViewState::default()
    ///     .transition(ViewEvent::SwitchTab(AuthMode::Register))
    ///     .transition(ViewEvent::SignedIn(Role::Resident));
    /// assert_eq!(view, ViewState::ResidentView);
    /// assert_eq!(
    ///     view.transition(ViewEvent::SignedOut),
    ///     ViewState::Unauthenticated { mode: AuthMode::Login }
    /// );
    /// ```
    #[must_use]
    pub const fn transition(self, event: ViewEvent) -> Self {
        match (self, event) {
            (Self::Unauthenticated { .. }, ViewEvent::SwitchTab(mode)) => {
                Self::Unauthenticated { mode }
            }
            (Self::Unauthenticated { .. }, ViewEvent::SignedIn(role)) => Self::for_role(role),
            (Self::AdminView | Self::ResidentView, ViewEvent::SignedOut) => {
                Self::Unauthenticated {
                    mode: AuthMode::Login,
                }
            }
            (state, _) => state,
        }
    }

    pub const fn is_authenticated(self) -> bool {
        !matches!(self, Self::Unauthenticated { .. })
    }

    /// Whether this view shows review buttons for `application`.
    pub fn offers_resolution(self, application: &Application) -> bool {
        matches!(self, Self::AdminView) && application.status().is_open()
    }

    /// Whether this view shows the ticket form.
    pub const fn offers_ticket_form(self) -> bool {
        matches!(self, Self::ResidentView)
    }
}

/// A ticket as the admin panel lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminTicket<'a> {
    pub application: &'a Application,
    /// `None` when the author id has no matching user.
    pub author: Option<&'a User>,
    /// Empty once the ticket is closed.
    pub actions: &'static [Resolution],
}

/// Every ticket in filing order, with its author and available actions.
pub fn admin_tickets(state: &PortalState) -> Vec<AdminTicket<'_>> {
    state
        .applications()
        .iter()
        .map(|application| AdminTicket {
            application,
            author: state.user(application.user_id()),
            actions: if application.status().is_open() {
                &Resolution::ALL
            } else {
                &[]
            },
        })
        .collect()
}

/// Tickets filed by `user_id`, in filing order.
pub fn resident_tickets(state: &PortalState, user_id: UserId) -> Vec<&Application> {
    state.applications_by(user_id).collect()
}
