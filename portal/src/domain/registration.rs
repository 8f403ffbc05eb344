//! Registration form and its field validation.
//!
//! Every field is checked on every call and each failure is reported under
//! its field key, so a form can show all problems at once. Validation has no
//! side effects.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

use super::user::{User, UserProfile};

/// Minimum password length, counted in UTF-16 code units.
pub const PASSWORD_MIN: usize = 6;

const FULL_NAME_MESSAGE: &str = "ФИО должно содержать только кириллицу, пробелы и дефисы";
const LOGIN_CHARSET_MESSAGE: &str = "Логин должен содержать только латиницу и цифры";
const LOGIN_TAKEN_MESSAGE: &str = "Этот логин уже занят";
const EMAIL_MESSAGE: &str = "Неверный формат email";
const PHONE_MESSAGE: &str = "Формат: +7 (XXX)XXX-XX-XX";
const PASSWORD_MESSAGE: &str = "Пароль должен содержать минимум 6 символов";
const CONFIRM_PASSWORD_MESSAGE: &str = "Пароли не совпадают";

static FULL_NAME_RE: OnceLock<Regex> = OnceLock::new();
static LOGIN_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, name: &str, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("{name} regex failed to compile: {error}"))
    })
}

fn full_name_regex() -> &'static Regex {
    compiled(&FULL_NAME_RE, "full name", r"^[а-яА-ЯёЁ\s-]+$")
}

fn login_regex() -> &'static Regex {
    compiled(&LOGIN_RE, "login", "^[a-zA-Z0-9_]+$")
}

fn email_regex() -> &'static Regex {
    compiled(&EMAIL_RE, "email", r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

fn phone_regex() -> &'static Regex {
    // `[0-9]` rather than `\d`: the mask only admits ASCII digits.
    compiled(&PHONE_RE, "phone", r"^\+7 \([0-9]{3}\)[0-9]{3}-[0-9]{2}-[0-9]{2}$")
}

/// Fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    /// Cyrillic full name.
    FullName,
    /// Latin login, unique across users.
    Login,
    /// Contact email.
    Email,
    /// Phone in the `+7 (XXX)XXX-XX-XX` mask.
    Phone,
    /// Password, at least [`PASSWORD_MIN`] long.
    Password,
    /// Repeated password.
    ConfirmPassword,
}

impl RegistrationField {
    /// Every field, in form order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Login,
        Self::Email,
        Self::Phone,
        Self::Password,
        Self::ConfirmPassword,
    ];

    /// Stable key used in error details.
    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Login => "login",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    /// Label shown next to the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "ФИО",
            Self::Login => "Логин",
            Self::Email => "Email",
            Self::Phone => "Телефон",
            Self::Password => "Пароль",
            Self::ConfirmPassword => "Повтор пароля",
        }
    }

    /// Reverse of [`RegistrationField::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Values typed into the registration form.
///
/// Passwords are wiped from memory when the form is dropped or cleared.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub login: String,
    pub email: String,
    pub phone: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
}

impl RegistrationForm {
    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Contact details to store on the new user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            full_name: self.full_name.clone(),
            login: self.login.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("full_name", &self.full_name)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

/// Field-keyed validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationErrors(BTreeMap<RegistrationField, String>);

impl RegistrationErrors {
    /// No field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a message.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded against `field`, if any.
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: RegistrationField) -> bool {
        self.0.contains_key(&field)
    }

    /// Messages in form order.
    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Record a message, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: RegistrationField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Rebuild from `(field key, message)` pairs, skipping unknown keys.
    pub fn from_keyed<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut errors = Self::default();
        for (key, message) in pairs {
            if let Some(field) = RegistrationField::from_key(key) {
                errors.insert(field, message);
            }
        }
        errors
    }
}

/// Check every registration field against the format rules and the logins
/// already taken by `existing_users`.
///
/// # Examples
/// ```
/// use portal::domain::{RegistrationField, RegistrationForm, User, validate_registration};
///
/// let form = RegistrationForm {
///     login: "admin".to_owned(),
///     ..RegistrationForm::default()
/// };
/// let errors = validate_registration(&form, &[User::seeded_admin()]);
/// assert_eq!(errors.get(RegistrationField::Login), Some("Этот логин уже занят"));
/// assert_eq!(errors.len(), 5);
/// ```
pub fn validate_registration(form: &RegistrationForm, existing_users: &[User]) -> RegistrationErrors {
    let mut errors = RegistrationErrors::default();

    if !full_name_regex().is_match(&form.full_name) {
        errors.insert(RegistrationField::FullName, FULL_NAME_MESSAGE);
    }

    if !login_regex().is_match(&form.login) {
        errors.insert(RegistrationField::Login, LOGIN_CHARSET_MESSAGE);
    }

    // A taken login outranks the charset message.
    if existing_users.iter().any(|user| user.login() == form.login) {
        errors.insert(RegistrationField::Login, LOGIN_TAKEN_MESSAGE);
    }

    if !email_regex().is_match(&form.email) {
        errors.insert(RegistrationField::Email, EMAIL_MESSAGE);
    }

    if !phone_regex().is_match(&form.phone) {
        errors.insert(RegistrationField::Phone, PHONE_MESSAGE);
    }

    if form.password.encode_utf16().count() < PASSWORD_MIN {
        errors.insert(RegistrationField::Password, PASSWORD_MESSAGE);
    }

    if *form.password != *form.confirm_password {
        errors.insert(RegistrationField::ConfirmPassword, CONFIRM_PASSWORD_MESSAGE);
    }

    errors
}
