//! Domain primitives, ports and use-cases for the complaint portal.
//!
//! Purpose: model users, tickets and the session, validate registration
//! input, and run the portal handlers against a key-value store port. Keep
//! this layer free of terminal and filesystem concerns.
//!
//! Public surface:
//! - Error (alias to `error::DomainError`) and ErrorCode.
//! - User, Application and their identifiers.
//! - PortalService, the handler entry point.
//! - ViewState, the screen state machine.

pub mod application;
pub mod auth;
pub mod error;
pub mod notification;
pub mod portal_service;
pub mod portal_state;
pub mod portal_storage;
pub mod ports;
pub mod registration;
pub mod user;
pub mod view;

pub use self::application::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, CREATED_AT_FORMAT,
    Resolution, format_created_at,
};
pub use self::auth::LoginCredentials;
pub use self::error::{DomainError, DomainError as Error, ERROR_TITLE, ErrorCode};
pub use self::notification::{Notification, Severity};
pub use self::portal_service::PortalService;
pub use self::portal_state::PortalState;
pub use self::portal_storage::{
    APPLICATIONS_KEY, CURRENT_USER_KEY, PortalStorage, PortalStorageError, USERS_KEY,
};
pub use self::registration::{
    PASSWORD_MIN, RegistrationErrors, RegistrationField, RegistrationForm, validate_registration,
};
pub use self::user::{Role, SEEDED_ADMIN_LOGIN, User, UserId, UserProfile};
pub use self::view::{AdminTicket, AuthMode, ViewEvent, ViewState, admin_tickets, resident_tickets};

/// Handler result alias.
pub type PortalResult<T> = Result<T, Error>;

/// Identifier handed to the next entity when `count` already exist.
pub(crate) fn sequential_id(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX).saturating_add(1)
}
