//! Port for password checks during login.
//!
//! There is no per-user password storage. The fixture verifier accepts a
//! pair of shared demo passwords for every account, which keeps the seeded
//! admin and freshly registered residents usable without a credential store.

use crate::domain::User;

/// Passwords accepted by [`FixtureCredentialVerifier`].
pub const DEMO_PASSWORDS: [&str; 2] = ["password", "123456"];

/// Decides whether `password` unlocks `user`.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier {
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Accepts any of [`DEMO_PASSWORDS`] for any user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCredentialVerifier;

impl CredentialVerifier for FixtureCredentialVerifier {
    fn verify(&self, _user: &User, password: &str) -> bool {
        DEMO_PASSWORDS.contains(&password)
    }
}
