//! User data model.
//!
//! Users are created by registration or seeded (the single admin account)
//! and never edited afterwards. Field values are validated by
//! [`crate::domain::registration`] before a resident is built; stored users
//! are trusted as written.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequential user identifier.
///
/// Identifiers are assigned as `count + 1` at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Identifier assigned to the next user when `count` users exist.
    pub fn next_after(count: usize) -> Self {
        Self(super::sequential_id(count))
    }

    /// Raw numeric identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a signed-in user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Reviews every ticket and resolves or rejects it.
    Admin,
    /// Files tickets and sees only their own.
    Resident,
}

impl Role {
    /// Label shown in the page header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Администратор",
            Self::Resident => "Пользователь",
        }
    }
}

/// Contact details captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub full_name: String,
    pub login: String,
    pub email: String,
    pub phone: String,
}

/// Portal account.
///
/// ## Invariants
/// - `login` is unique across all users (enforced at registration).
/// - Serialised with camelCase keys (`fullName`, `isAdmin`) so stored
///   entries keep the portal's established shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    full_name: String,
    login: String,
    email: String,
    phone: String,
    is_admin: bool,
}

/// Login of the seeded administrator account.
pub const SEEDED_ADMIN_LOGIN: &str = "admin";

impl User {
    /// Build a user from a profile and role.
    pub fn new(id: UserId, profile: UserProfile, role: Role) -> Self {
        let UserProfile {
            full_name,
            login,
            email,
            phone,
        } = profile;
        Self {
            id,
            full_name,
            login,
            email,
            phone,
            is_admin: role == Role::Admin,
        }
    }

    /// The administrator account present before anyone registers.
    pub fn seeded_admin() -> Self {
        Self::new(
            UserId::new(1),
            UserProfile {
                full_name: "Администратор".to_owned(),
                login: SEEDED_ADMIN_LOGIN.to_owned(),
                email: "admin@test.ru".to_owned(),
                phone: "+7 (900)000-00-00".to_owned(),
            },
            Role::Admin,
        )
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Resident
        }
    }
}
