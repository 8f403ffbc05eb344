//! Domain-level error types.
//!
//! These errors are presentation agnostic. The command-line front end turns
//! them into notifications and exit codes; a different surface could render
//! them as inline banners.

use serde_json::{Map, Value};

use super::notification::Notification;

/// Title shown on every failure notification.
pub const ERROR_TITLE: &str = "Ошибка";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Registration form fields failed validation.
    ValidationFailed,
    /// Login did not match a user or the password was rejected.
    InvalidCredentials,
    /// A required ticket field was left blank.
    MissingFields,
    /// The action needs a signed-in user.
    NotAuthenticated,
    /// The action is not offered by the current view.
    Forbidden,
    /// Reading or writing the local store failed.
    StorageFailure,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use portal::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::MissingFields, "Заполните все поля");
/// assert_eq!(err.code(), ErrorCode::MissingFields);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl DomainError {
    /// Create a new error with no details.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message shown to the resident or admin.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{DomainError, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = DomainError::new(ErrorCode::ValidationFailed, "bad")
    ///     .with_details(json!({ "fields": { "login": "taken" } }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Per-field messages carried by [`ErrorCode::ValidationFailed`] errors,
    /// keyed by form field name.
    pub fn field_messages(&self) -> Vec<(&str, &str)> {
        self.details
            .as_ref()
            .and_then(|details| details.get("fields"))
            .and_then(Value::as_object)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|(field, message)| {
                        message.as_str().map(|text| (field.as_str(), text))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`] carrying
    /// per-field messages.
    pub fn validation_failed<'a>(
        message: impl Into<String>,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let fields: Map<String, Value> = fields
            .into_iter()
            .map(|(field, text)| (field.to_owned(), Value::String(text.to_owned())))
            .collect();
        let mut details = Map::new();
        details.insert("fields".to_owned(), Value::Object(fields));
        Self::new(ErrorCode::ValidationFailed, message).with_details(Value::Object(details))
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::MissingFields`].
    pub fn missing_fields(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingFields, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageFailure`].
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }

    /// Destructive notification describing this error.
    pub fn notification(&self) -> Notification {
        Notification::destructive(ERROR_TITLE, self.message.clone())
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests;
