//! Tests for the domain error payload and its notification mapping.

use super::*;
use crate::domain::notification::Severity;
use rstest::{fixture, rstest};

#[fixture]
fn validation_error() -> DomainError {
    DomainError::validation_failed(
        "Проверьте правильность заполнения полей",
        [("login", "Этот логин уже занят"), ("phone", "Формат: +7 (XXX)XXX-XX-XX")],
    )
}

#[rstest]
fn missing_fields_constructor_sets_code() {
    let err = DomainError::missing_fields("Заполните все поля");
    assert_eq!(err.code(), ErrorCode::MissingFields);
    assert_eq!(err.message(), "Заполните все поля");
}

#[rstest]
fn validation_failed_carries_field_messages(validation_error: DomainError) {
    assert_eq!(validation_error.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        validation_error.field_messages(),
        vec![
            ("login", "Этот логин уже занят"),
            ("phone", "Формат: +7 (XXX)XXX-XX-XX"),
        ]
    );
}

#[rstest]
fn field_messages_are_empty_without_details() {
    let err = DomainError::invalid_credentials("Неверный логин или пароль");
    assert!(err.field_messages().is_empty());
}

#[rstest]
fn notification_is_destructive_with_error_title(validation_error: DomainError) {
    let notification = validation_error.notification();
    assert_eq!(notification.title(), ERROR_TITLE);
    assert_eq!(
        notification.message(),
        "Проверьте правильность заполнения полей"
    );
    assert_eq!(notification.severity(), Severity::Destructive);
}

#[rstest]
fn display_uses_message() {
    let err = DomainError::storage_failure("Не удалось сохранить данные");
    assert_eq!(err.to_string(), "Не удалось сохранить данные");
}
