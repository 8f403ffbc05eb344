//! Login credentials.
//!
//! The login is kept exactly as typed: lookups compare it verbatim against
//! stored logins, so no trimming or case folding happens here.

use std::fmt;

use zeroize::Zeroizing;

/// Credentials entered on the login tab.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin", "password");
/// assert_eq!(creds.login(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login string used for the user lookup.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Forget both values.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  admin  ", "  admin  ")]
    #[case("", "")]
    fn login_is_kept_verbatim(#[case] login: &str, #[case] expected: &str) {
        let creds = LoginCredentials::new(login, "pw");
        assert_eq!(creds.login(), expected);
    }

    #[rstest]
    fn debug_hides_password() {
        let creds = LoginCredentials::new("admin", "password");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("\"password\""));
    }

    #[rstest]
    fn clear_empties_both_fields() {
        let mut creds = LoginCredentials::new("admin", "password");
        creds.clear();
        assert_eq!(creds, LoginCredentials::default());
    }
}
