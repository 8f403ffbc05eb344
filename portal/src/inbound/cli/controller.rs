//! Screen controller: owns the transient forms and the active view, and
//! forwards submissions to the portal service.
//!
//! Actions the active view does not offer are refused here, before any
//! handler runs. Forms are cleared on success and kept on failure so the
//! next render shows what was typed.

use tracing::debug;

use crate::domain::ports::{KeyValueStore, Notifier};
use crate::domain::{
    ApplicationDraft, ApplicationId, AuthMode, DomainError, LoginCredentials, PortalResult,
    PortalService, RegistrationErrors, RegistrationForm, Resolution, ViewEvent, ViewState,
};

const UNAVAILABLE_MESSAGE: &str = "Действие недоступно";

/// Portal screen state plus the service it drives.
pub struct PortalController<S, N> {
    service: PortalService<S, N>,
    view: ViewState,
    login_form: LoginCredentials,
    registration: RegistrationForm,
    registration_errors: RegistrationErrors,
    draft: ApplicationDraft,
}

impl<S, N> PortalController<S, N>
where
    S: KeyValueStore,
    N: Notifier,
{
    /// Start on the view matching the loaded session.
    pub fn new(service: PortalService<S, N>) -> Self {
        let view = ViewState::for_session(service.current_user());
        Self {
            service,
            view,
            login_form: LoginCredentials::default(),
            registration: RegistrationForm::default(),
            registration_errors: RegistrationErrors::default(),
            draft: ApplicationDraft::default(),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn service(&self) -> &PortalService<S, N> {
        &self.service
    }

    pub fn login_form(&self) -> &LoginCredentials {
        &self.login_form
    }

    pub fn registration_form(&self) -> &RegistrationForm {
        &self.registration
    }

    /// Inline messages from the last failed registration.
    pub fn registration_errors(&self) -> &RegistrationErrors {
        &self.registration_errors
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Switch between the login and registration tabs.
    pub fn switch_tab(&mut self, mode: AuthMode) {
        self.apply(ViewEvent::SwitchTab(mode));
    }

    pub fn submit_login(&mut self, credentials: LoginCredentials) -> PortalResult<()> {
        if self.view.is_authenticated() {
            return Err(self.refuse("login"));
        }
        self.switch_tab(AuthMode::Login);
        self.login_form = credentials;

        let user = self.service.login(&self.login_form)?;
        self.login_form.clear();
        self.apply(ViewEvent::SignedIn(user.role()));
        Ok(())
    }

    pub fn submit_registration(&mut self, form: RegistrationForm) -> PortalResult<()> {
        if self.view.is_authenticated() {
            return Err(self.refuse("register"));
        }
        self.switch_tab(AuthMode::Register);
        self.registration = form;

        match self.service.register(&self.registration) {
            Ok(user) => {
                self.registration.clear();
                self.registration_errors.clear();
                self.apply(ViewEvent::SignedIn(user.role()));
                Ok(())
            }
            Err(error) => {
                self.registration_errors = RegistrationErrors::from_keyed(error.field_messages());
                Err(error)
            }
        }
    }

    pub fn logout(&mut self) -> PortalResult<()> {
        if !self.view.is_authenticated() {
            return Err(self.refuse("logout"));
        }
        self.service.logout()?;
        self.draft.clear();
        self.apply(ViewEvent::SignedOut);
        Ok(())
    }

    /// File a ticket from the resident view.
    pub fn submit_application(&mut self, draft: ApplicationDraft) -> PortalResult<()> {
        if !self.view.offers_ticket_form() {
            return Err(self.refuse("apply"));
        }
        self.draft = draft;
        self.service.create_application(self.draft.clone())?;
        self.draft.clear();
        Ok(())
    }

    /// Resolve or reject a ticket from the admin panel.
    ///
    /// Only open tickets carry review buttons, so unknown ids and closed
    /// tickets are refused like any other unavailable action.
    pub fn review(&mut self, id: ApplicationId, resolution: Resolution) -> PortalResult<()> {
        let offered = self
            .service
            .state()
            .application(id)
            .is_some_and(|ticket| self.view.offers_resolution(ticket));
        if !offered {
            return Err(self.refuse("review"));
        }
        self.service.change_status(id, resolution)?;
        Ok(())
    }

    fn apply(&mut self, event: ViewEvent) {
        let next = self.view.transition(event);
        if next != self.view {
            debug!(from = ?self.view, to = ?next, "view changed");
        }
        self.view = next;
    }

    fn refuse(&self, action: &'static str) -> DomainError {
        debug!(action, view = ?self.view, "action not offered by the current view");
        let error = DomainError::forbidden(UNAVAILABLE_MESSAGE);
        self.service.notifier().notify(&error.notification());
        error
    }
}
