//! In-memory portal state: users, tickets and the session pointer.
//!
//! The state is an explicit value owned by [`crate::domain::PortalService`];
//! handlers mutate it and then flush the touched entry to storage.

use super::application::{Application, ApplicationId};
use super::portal_storage::{PortalStorage, PortalStorageError};
use super::ports::KeyValueStore;
use super::user::{User, UserId};

/// Users, tickets and the signed-in user.
///
/// ## Invariants
/// - Insertion order of `users` and `applications` is preserved.
/// - `current_user` is a copy of a user, not a reference into `users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalState {
    users: Vec<User>,
    applications: Vec<Application>,
    current_user: Option<User>,
}

impl Default for PortalState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PortalState {
    /// Fresh state: the seeded admin, no tickets, nobody signed in.
    pub fn seeded() -> Self {
        Self {
            users: vec![User::seeded_admin()],
            applications: Vec::new(),
            current_user: None,
        }
    }

    /// Build state from explicit parts.
    pub fn from_parts(
        users: Vec<User>,
        applications: Vec<Application>,
        current_user: Option<User>,
    ) -> Self {
        Self {
            users,
            applications,
            current_user,
        }
    }

    /// Read every entry once. A missing user list falls back to the seeded
    /// admin.
    pub fn load<S>(storage: &PortalStorage<S>) -> Result<Self, PortalStorageError>
    where
        S: KeyValueStore,
    {
        let current_user = storage.load_session()?;
        let users = storage
            .load_users()?
            .unwrap_or_else(|| vec![User::seeded_admin()]);
        let applications = storage.load_applications()?;
        Ok(Self {
            users,
            applications,
            current_user,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Exact, case-sensitive login lookup.
    pub fn find_user_by_login(&self, login: &str) -> Option<&User> {
        self.users.iter().find(|user| user.login() == login)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    pub fn application(&self, id: ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|ticket| ticket.id() == id)
    }

    /// Tickets filed by `user_id`, in filing order.
    pub fn applications_by(&self, user_id: UserId) -> impl Iterator<Item = &Application> {
        self.applications
            .iter()
            .filter(move |ticket| ticket.user_id() == user_id)
    }

    pub fn next_user_id(&self) -> UserId {
        UserId::next_after(self.users.len())
    }

    pub fn next_application_id(&self) -> ApplicationId {
        ApplicationId::next_after(self.applications.len())
    }

    pub(crate) fn push_user(&mut self, user: User) {
        self.users.push(user);
    }

    pub(crate) fn push_application(&mut self, application: Application) {
        self.applications.push(application);
    }

    pub(crate) fn application_mut(&mut self, id: ApplicationId) -> Option<&mut Application> {
        self.applications.iter_mut().find(|ticket| ticket.id() == id)
    }

    pub(crate) fn set_current_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::application::ApplicationDraft;
    use crate::domain::user::{Role, UserProfile};
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::rstest;

    fn resident(id: u64, login: &str) -> User {
        User::new(
            UserId::new(id),
            UserProfile {
                full_name: "Петров Пётр".to_owned(),
                login: login.to_owned(),
                email: format!("{login}@mail.ru"),
                phone: "+7 (912)345-67-89".to_owned(),
            },
            Role::Resident,
        )
    }

    fn ticket(id: u64, user: u64) -> Application {
        Application::file(
            ApplicationId::new(id),
            UserId::new(user),
            ApplicationDraft::new("Яма на дороге", "Глубокая яма у подъезда"),
            "19.10.2026, 14:05:09",
        )
    }

    #[rstest]
    fn empty_store_loads_seeded_state() {
        let storage = PortalStorage::new(Arc::new(InMemoryKeyValueStore::default()));
        let state = PortalState::load(&storage).expect("load state");
        assert_eq!(state, PortalState::seeded());
        assert_eq!(state.next_user_id(), UserId::new(2));
        assert_eq!(state.next_application_id(), ApplicationId::new(1));
    }

    #[rstest]
    fn stored_users_replace_the_seed() {
        let storage = PortalStorage::new(Arc::new(InMemoryKeyValueStore::default()));
        let users = vec![User::seeded_admin(), resident(2, "petrov")];
        storage.save_users(&users).expect("save users");
        storage.save_session(Some(&users[1])).expect("save session");

        let state = PortalState::load(&storage).expect("load state");
        assert_eq!(state.users(), users.as_slice());
        assert_eq!(state.current_user(), Some(&users[1]));
    }

    #[rstest]
    fn filter_by_author_is_exact() {
        let state = PortalState::from_parts(
            vec![User::seeded_admin(), resident(2, "petrov"), resident(3, "sidorov")],
            vec![ticket(1, 2), ticket(2, 3), ticket(3, 2)],
            None,
        );
        let ids: Vec<u64> = state
            .applications_by(UserId::new(2))
            .map(|ticket| ticket.id().get())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(state.applications_by(UserId::new(9)).count(), 0);
    }

    #[rstest]
    #[case("petrov", Some(2))]
    #[case("Petrov", None)]
    #[case("petrov ", None)]
    #[case("admin", Some(1))]
    fn login_lookup_is_exact(#[case] login: &str, #[case] expected: Option<u64>) {
        let state =
            PortalState::from_parts(vec![User::seeded_admin(), resident(2, "petrov")], vec![], None);
        assert_eq!(
            state.find_user_by_login(login).map(|user| user.id().get()),
            expected
        );
    }
}
