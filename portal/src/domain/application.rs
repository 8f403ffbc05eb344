//! Complaint tickets ("applications") filed by residents.
//!
//! A ticket starts as [`ApplicationStatus::New`] and is closed by an admin
//! with a [`Resolution`]. Nothing in the domain reopens a ticket: the only
//! inputs to a status change are the two closing resolutions.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// `strftime` pattern for ticket timestamps, e.g. `19.10.2026, 14:05:09`.
pub const CREATED_AT_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Render a local timestamp the way tickets display it.
pub fn format_created_at(at: DateTime<Local>) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}

/// Sequential ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(u64);

impl ApplicationId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Identifier assigned to the next ticket when `count` tickets exist.
    pub fn next_after(count: usize) -> Self {
        Self(super::sequential_id(count))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a ticket.
///
/// Stored as its display label so persisted entries read the same way the
/// portal shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Filed and awaiting review.
    #[serde(rename = "Новая")]
    New,
    /// Closed as fixed.
    #[serde(rename = "Решена")]
    Resolved,
    /// Closed without action.
    #[serde(rename = "Отклонена")]
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "Новая",
            Self::Resolved => "Решена",
            Self::Rejected => "Отклонена",
        }
    }

    /// Whether an admin can still act on the ticket.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::New)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closing decision an admin applies to a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Mark the ticket fixed.
    Resolved,
    /// Decline the ticket.
    Rejected,
}

impl Resolution {
    /// Both decisions, in the order the admin panel offers them.
    pub const ALL: [Self; 2] = [Self::Resolved, Self::Rejected];

    pub const fn status(self) -> ApplicationStatus {
        match self {
            Self::Resolved => ApplicationStatus::Resolved,
            Self::Rejected => ApplicationStatus::Rejected,
        }
    }
}

impl From<Resolution> for ApplicationStatus {
    fn from(value: Resolution) -> Self {
        value.status()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status().label())
    }
}

/// Title and description typed into the ticket form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationDraft {
    pub title: String,
    pub description: String,
}

impl ApplicationDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields hold at least one character.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A filed ticket.
///
/// ## Invariants
/// - `user_id` references the user who filed it.
/// - `status` only ever moves from `New` to `Resolved` or `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    user_id: UserId,
    title: String,
    description: String,
    status: ApplicationStatus,
    created_at: String,
}

impl Application {
    /// File a new ticket from a draft.
    pub fn file(
        id: ApplicationId,
        user_id: UserId,
        draft: ApplicationDraft,
        created_at: impl Into<String>,
    ) -> Self {
        let ApplicationDraft { title, description } = draft;
        Self {
            id,
            user_id,
            title,
            description,
            status: ApplicationStatus::New,
            created_at: created_at.into(),
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn created_at(&self) -> &str {
        self.created_at.as_str()
    }

    /// Replace the status with a closing decision, leaving every other field
    /// untouched.
    pub(crate) fn apply(&mut self, resolution: Resolution) {
        self.status = resolution.status();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    fn filed() -> Application {
        Application::file(
            ApplicationId::new(1),
            UserId::new(2),
            ApplicationDraft::new("Сломана скамейка", "Во дворе дома 5 сломана скамейка"),
            "19.10.2026, 14:05:09",
        )
    }

    #[rstest]
    fn filed_tickets_start_new() {
        let ticket = filed();
        assert_eq!(ticket.status(), ApplicationStatus::New);
        assert!(ticket.status().is_open());
    }

    #[rstest]
    #[case(Resolution::Resolved, ApplicationStatus::Resolved)]
    #[case(Resolution::Rejected, ApplicationStatus::Rejected)]
    fn apply_sets_only_status(#[case] resolution: Resolution, #[case] expected: ApplicationStatus) {
        let mut ticket = filed();
        ticket.apply(resolution);

        assert_eq!(ticket.status(), expected);
        assert!(!ticket.status().is_open());
        assert_eq!(ticket.title(), "Сломана скамейка");
        assert_eq!(ticket.user_id(), UserId::new(2));
        assert_eq!(ticket.created_at(), "19.10.2026, 14:05:09");
    }

    #[rstest]
    #[case("", "описание", false)]
    #[case("заголовок", "", false)]
    #[case("", "", false)]
    #[case(" ", " ", true)]
    #[case("заголовок", "описание", true)]
    fn draft_completeness(#[case] title: &str, #[case] description: &str, #[case] expected: bool) {
        assert_eq!(ApplicationDraft::new(title, description).is_complete(), expected);
    }

    #[rstest]
    fn serialises_status_as_label() {
        let value = serde_json::to_value(filed()).expect("serialise ticket");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "userId": 2,
                "title": "Сломана скамейка",
                "description": "Во дворе дома 5 сломана скамейка",
                "status": "Новая",
                "createdAt": "19.10.2026, 14:05:09"
            })
        );
    }

    #[rstest]
    #[case("\"Решена\"", ApplicationStatus::Resolved)]
    #[case("\"Отклонена\"", ApplicationStatus::Rejected)]
    #[case("\"Новая\"", ApplicationStatus::New)]
    fn deserialises_status_labels(#[case] raw: &str, #[case] expected: ApplicationStatus) {
        let status: ApplicationStatus = serde_json::from_str(raw).expect("status label");
        assert_eq!(status, expected);
    }

    #[rstest]
    fn formats_timestamp_like_the_portal() {
        let at = Local
            .with_ymd_and_hms(2026, 3, 7, 9, 4, 5)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_created_at(at), "07.03.2026, 09:04:05");
    }
}
