//! Toast-style notifications raised by portal actions.

use std::fmt;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Informational or success message.
    #[default]
    Default,
    /// Failure message.
    Destructive,
}

/// A dismissible message with a short title.
///
/// # Examples
/// ```
/// use portal::domain::{Notification, Severity};
///
/// let toast = Notification::success("Вы вышли", "До встречи!");
/// assert_eq!(toast.severity(), Severity::Default);
/// assert_eq!(toast.to_string(), "[Вы вышли] До встречи!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    title: String,
    message: String,
    severity: Severity,
}

impl Notification {
    /// Build a notification with an explicit severity.
    pub fn new(title: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
        }
    }

    /// Build a [`Severity::Default`] notification.
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Default)
    }

    /// Build a [`Severity::Destructive`] notification.
    pub fn destructive(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, Severity::Destructive)
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}
