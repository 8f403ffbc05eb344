//! Portal use-cases: sign in, register, sign out, file and review tickets.
//!
//! Every handler mutates the in-memory [`PortalState`] first, then flushes
//! the touched entries through [`PortalStorage`], then raises a
//! notification. Failures are notified as well as returned so the caller
//! only needs the result for its own bookkeeping (clearing forms, switching
//! views).

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use serde_json::json;
use tracing::{debug, info, warn};

use super::application::{
    Application, ApplicationDraft, ApplicationId, Resolution, format_created_at,
};
use super::auth::LoginCredentials;
use super::error::DomainError;
use super::notification::Notification;
use super::portal_state::PortalState;
use super::portal_storage::{PortalStorage, PortalStorageError};
use super::ports::{CredentialVerifier, FixtureCredentialVerifier, KeyValueStore, Notifier};
use super::registration::{RegistrationForm, validate_registration};
use super::user::{Role, User};

const INVALID_CREDENTIALS_MESSAGE: &str = "Неверный логин или пароль";
const INVALID_REGISTRATION_MESSAGE: &str = "Проверьте правильность заполнения полей";
const MISSING_FIELDS_MESSAGE: &str = "Заполните все поля";
const NOT_AUTHENTICATED_MESSAGE: &str = "Войдите, чтобы создать заявку";
const SAVE_FAILED_MESSAGE: &str = "Не удалось сохранить данные";
const LOAD_FAILED_MESSAGE: &str = "Не удалось загрузить данные";

/// Application service owning the portal state and its collaborators.
pub struct PortalService<S, N> {
    state: PortalState,
    storage: PortalStorage<S>,
    notifier: Arc<N>,
    verifier: Arc<dyn CredentialVerifier>,
    clock: Arc<dyn Clock>,
}

impl<S, N> PortalService<S, N>
where
    S: KeyValueStore,
    N: Notifier,
{
    /// Wrap existing state. Uses the demo password check and the system clock.
    pub fn new(state: PortalState, storage: PortalStorage<S>, notifier: Arc<N>) -> Self {
        Self {
            state,
            storage,
            notifier,
            verifier: Arc::new(FixtureCredentialVerifier),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Read the persisted entries from `store` and build a service over them.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use portal::domain::PortalService;
    /// use portal::outbound::notifications::TracingNotifier;
    /// use portal::outbound::storage::InMemoryKeyValueStore;
    ///
    /// let service = PortalService::load(
    ///     Arc::new(InMemoryKeyValueStore::default()),
    ///     Arc::new(TracingNotifier),
    /// )
    /// .expect("empty store loads");
    /// assert_eq!(service.state().users().len(), 1);
    /// assert!(service.current_user().is_none());
    /// ```
    pub fn load(store: Arc<S>, notifier: Arc<N>) -> Result<Self, DomainError> {
        let storage = PortalStorage::new(store);
        let state = PortalState::load(&storage).map_err(storage_error)?;
        debug!(
            users = state.users().len(),
            applications = state.applications().len(),
            signed_in = state.current_user().is_some(),
            "portal state loaded"
        );
        Ok(Self::new(state, storage, notifier))
    }

    /// Replace the clock used to stamp new tickets.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the password check.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user()
    }

    /// Notification surface shared with the caller.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Sign in by exact login match and an accepted password.
    ///
    /// Unknown logins and wrong passwords fail identically.
    pub fn login(&mut self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        let user = self
            .state
            .find_user_by_login(credentials.login())
            .filter(|user| self.verifier.verify(user, credentials.password()))
            .cloned();

        let Some(user) = user else {
            info!(login = credentials.login(), "login rejected");
            return Err(self.fail(DomainError::invalid_credentials(
                INVALID_CREDENTIALS_MESSAGE,
            )));
        };

        self.state.set_current_user(Some(user.clone()));
        self.persist(|storage, state| storage.save_session(state.current_user()))?;

        info!(user_id = %user.id(), login = user.login(), "user signed in");
        self.notifier.notify(&Notification::success(
            "Успешно!",
            format!("Добро пожаловать, {}!", user.full_name()),
        ));
        Ok(user)
    }

    /// Register a resident and sign them in.
    ///
    /// All fields are validated; on any failure nothing is stored and the
    /// per-field messages travel in the error's `details.fields`.
    pub fn register(&mut self, form: &RegistrationForm) -> Result<User, DomainError> {
        let errors = validate_registration(form, self.state.users());
        if !errors.is_empty() {
            info!(
                login = form.login.as_str(),
                failed_fields = errors.len(),
                "registration rejected"
            );
            let error = DomainError::validation_failed(
                INVALID_REGISTRATION_MESSAGE,
                errors.iter().map(|(field, message)| (field.key(), message)),
            );
            return Err(self.fail(error));
        }

        let user = User::new(self.state.next_user_id(), form.profile(), Role::Resident);
        self.state.push_user(user.clone());
        self.persist(|storage, state| storage.save_users(state.users()))?;
        self.state.set_current_user(Some(user.clone()));
        self.persist(|storage, state| storage.save_session(state.current_user()))?;

        info!(user_id = %user.id(), login = user.login(), "user registered");
        self.notifier
            .notify(&Notification::success("Регистрация завершена!", "Добро пожаловать!"));
        Ok(user)
    }

    /// Clear the session.
    pub fn logout(&mut self) -> Result<(), DomainError> {
        let previous = self.state.current_user().map(User::id);
        self.state.set_current_user(None);
        self.persist(|storage, _| storage.save_session(None))?;

        match previous {
            Some(user_id) => info!(%user_id, "user signed out"),
            None => debug!("logout without an active session"),
        }
        self.notifier
            .notify(&Notification::success("Вы вышли", "До встречи!"));
        Ok(())
    }

    /// File a ticket for the signed-in user.
    ///
    /// Both draft fields are checked before the session.
    pub fn create_application(
        &mut self,
        draft: ApplicationDraft,
    ) -> Result<Application, DomainError> {
        if !draft.is_complete() {
            debug!("ticket draft incomplete");
            return Err(self.fail(DomainError::missing_fields(MISSING_FIELDS_MESSAGE)));
        }

        let Some(author) = self.state.current_user().map(User::id) else {
            warn!("ticket filed without a session");
            return Err(self.fail(DomainError::not_authenticated(NOT_AUTHENTICATED_MESSAGE)));
        };

        let application = Application::file(
            self.state.next_application_id(),
            author,
            draft,
            format_created_at(self.clock.local()),
        );
        self.state.push_application(application.clone());
        self.persist(|storage, state| storage.save_applications(state.applications()))?;

        info!(
            application_id = %application.id(),
            user_id = %author,
            "ticket filed"
        );
        self.notifier
            .notify(&Notification::success("Заявка создана!", "Ожидайте рассмотрения"));
        Ok(application)
    }

    /// Close a ticket with `resolution`.
    ///
    /// Returns `Ok(None)` without storing or notifying anything when no
    /// ticket has `id`. Role checks belong to the caller.
    pub fn change_status(
        &mut self,
        id: ApplicationId,
        resolution: Resolution,
    ) -> Result<Option<Application>, DomainError> {
        let Some(application) = self.state.application_mut(id) else {
            debug!(application_id = %id, "status change for unknown ticket ignored");
            return Ok(None);
        };
        application.apply(resolution);
        let updated = application.clone();
        self.persist(|storage, state| storage.save_applications(state.applications()))?;

        let status = updated.status();
        info!(application_id = %id, %status, "ticket status changed");
        self.notifier.notify(&Notification::success(
            "Статус обновлен",
            format!("Заявка помечена как \"{status}\""),
        ));
        Ok(Some(updated))
    }

    fn persist<F>(&self, write: F) -> Result<(), DomainError>
    where
        F: FnOnce(&PortalStorage<S>, &PortalState) -> Result<(), PortalStorageError>,
    {
        write(&self.storage, &self.state).map_err(|err| self.fail(storage_error(err)))
    }

    fn fail(&self, error: DomainError) -> DomainError {
        self.notifier.notify(&error.notification());
        error
    }
}

fn storage_error(error: PortalStorageError) -> DomainError {
    warn!(error = %error, "portal storage failed");
    let message = if error.is_read() {
        LOAD_FAILED_MESSAGE
    } else {
        SAVE_FAILED_MESSAGE
    };
    DomainError::storage_failure(message).with_details(json!({ "reason": error.to_string() }))
}

#[cfg(test)]
#[path = "portal_service_tests.rs"]
mod tests;
