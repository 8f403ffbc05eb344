//! Plain-text rendering of the active view.

use std::fmt::{self, Write};

use crate::domain::ports::{KeyValueStore, Notifier};
use crate::domain::{
    AdminTicket, Application, AuthMode, RegistrationField, RegistrationForm, User, ViewState,
    admin_tickets, resident_tickets,
};

use super::controller::PortalController;

const TITLE: &str = "ГородОк";
const SUBTITLE: &str = "Современный портал благоустройства территорий";
const DEMO_HINT: &str = "Тестовые данные: admin / password";

/// Render the controller's current view as text.
///
/// # Errors
///
/// Propagates [`fmt::Error`] from the underlying writes.
pub fn render<S, N>(controller: &PortalController<S, N>) -> Result<String, fmt::Error>
where
    S: KeyValueStore,
    N: Notifier,
{
    let mut out = String::new();
    write_view(&mut out, controller)?;
    Ok(out)
}

fn write_view<S, N>(out: &mut String, controller: &PortalController<S, N>) -> fmt::Result
where
    S: KeyValueStore,
    N: Notifier,
{
    let state = controller.service().state();
    match (controller.view(), state.current_user()) {
        (ViewState::Unauthenticated { mode }, _) => write_auth(out, mode, controller),
        (ViewState::AdminView, Some(user)) => {
            write_header(out, user)?;
            write_admin(out, &admin_tickets(state))
        }
        (ViewState::ResidentView, Some(user)) => {
            write_header(out, user)?;
            write_resident(out, controller, &resident_tickets(state, user.id()))
        }
        // A signed-in view without a session user renders as the login tab.
        (ViewState::AdminView | ViewState::ResidentView, None) => {
            write_auth(out, AuthMode::Login, controller)
        }
    }
}

fn write_auth<S, N>(
    out: &mut String,
    mode: AuthMode,
    controller: &PortalController<S, N>,
) -> fmt::Result
where
    S: KeyValueStore,
    N: Notifier,
{
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out)?;
    for tab in [AuthMode::Login, AuthMode::Register] {
        if tab == mode {
            write!(out, "[{tab}] ")?;
        } else {
            write!(out, " {tab}  ")?;
        }
    }
    writeln!(out)?;
    writeln!(out)?;

    match mode {
        AuthMode::Login => {
            writeln!(out, "Логин: {}", controller.login_form().login())?;
            writeln!(out, "Пароль: {}", mask(controller.login_form().password()))?;
            writeln!(out)?;
            writeln!(out, "{DEMO_HINT}")
        }
        AuthMode::Register => write_registration(out, controller),
    }
}

fn write_registration<S, N>(out: &mut String, controller: &PortalController<S, N>) -> fmt::Result
where
    S: KeyValueStore,
    N: Notifier,
{
    let form = controller.registration_form();
    let errors = controller.registration_errors();
    for field in RegistrationField::ALL {
        writeln!(out, "{}: {}", field.label(), field_value(form, field))?;
        if let Some(message) = errors.get(field) {
            writeln!(out, "  ! {message}")?;
        }
    }
    Ok(())
}

fn field_value(form: &RegistrationForm, field: RegistrationField) -> String {
    match field {
        RegistrationField::FullName => form.full_name.clone(),
        RegistrationField::Login => form.login.clone(),
        RegistrationField::Email => form.email.clone(),
        RegistrationField::Phone => form.phone.clone(),
        RegistrationField::Password => mask(&form.password),
        RegistrationField::ConfirmPassword => mask(&form.confirm_password),
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn write_header(out: &mut String, user: &User) -> fmt::Result {
    writeln!(out, "{TITLE} | {} ({})", user.full_name(), user.role().label())?;
    writeln!(out)
}

fn write_admin(out: &mut String, tickets: &[AdminTicket<'_>]) -> fmt::Result {
    writeln!(out, "Панель администратора")?;
    writeln!(out, "Управление заявками жителей")?;
    writeln!(out)?;
    if tickets.is_empty() {
        return writeln!(out, "Заявок пока нет");
    }
    for row in tickets {
        write_ticket(out, row.application)?;
        match row.author {
            Some(author) => writeln!(out, "    {} ({})", author.full_name(), author.email())?,
            None => writeln!(out, "    ?")?,
        }
        if !row.actions.is_empty() {
            let labels: Vec<String> = row
                .actions
                .iter()
                .map(|resolution| format!("[{resolution}]"))
                .collect();
            writeln!(out, "    {}", labels.join(" "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_resident<S, N>(
    out: &mut String,
    controller: &PortalController<S, N>,
    tickets: &[&Application],
) -> fmt::Result
where
    S: KeyValueStore,
    N: Notifier,
{
    let draft = controller.draft();
    writeln!(out, "Создать заявку")?;
    writeln!(out, "Название заявки: {}", draft.title)?;
    writeln!(out, "Описание проблемы: {}", draft.description)?;
    writeln!(out)?;
    writeln!(out, "Мои заявки")?;
    writeln!(out)?;
    if tickets.is_empty() {
        writeln!(out, "У вас пока нет заявок")?;
        return writeln!(out, "Создайте первую заявку выше");
    }
    for ticket in tickets {
        write_ticket(out, ticket)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_ticket(out: &mut String, ticket: &Application) -> fmt::Result {
    writeln!(
        out,
        "#{} [{}] {}",
        ticket.id(),
        ticket.status(),
        ticket.created_at()
    )?;
    writeln!(out, "    {}", ticket.title())?;
    writeln!(out, "    {}", ticket.description())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::{
        ApplicationDraft, ApplicationId, LoginCredentials, PortalService, Resolution,
    };
    use crate::outbound::storage::InMemoryKeyValueStore;
    use crate::test_support::{FixtureClock, RecordingNotifier};
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    type Controller = PortalController<InMemoryKeyValueStore, RecordingNotifier>;

    #[fixture]
    fn controller() -> Controller {
        let service = PortalService::load(
            Arc::new(InMemoryKeyValueStore::default()),
            Arc::new(RecordingNotifier::default()),
        )
        .expect("empty store loads")
        .with_clock(Arc::new(FixtureClock::default()));
        PortalController::new(service)
    }

    fn register(ctl: &mut Controller, login: &str, name: &str) {
        ctl.submit_registration(RegistrationForm {
            full_name: name.to_owned(),
            login: login.to_owned(),
            email: format!("{login}@mail.ru"),
            phone: "+7 (903)111-22-33".to_owned(),
            password: Zeroizing::new("qwerty".to_owned()),
            confirm_password: Zeroizing::new("qwerty".to_owned()),
        })
        .expect("register");
    }

    #[rstest]
    fn login_tab_shows_title_and_demo_hint(controller: Controller) {
        let text = render(&controller).expect("render view");
        assert!(text.starts_with("ГородОк\nСовременный портал благоустройства территорий\n"));
        assert!(text.contains("[Вход]"));
        assert!(text.contains(DEMO_HINT));
    }

    #[rstest]
    fn register_tab_shows_inline_errors(mut controller: Controller) {
        controller
            .submit_registration(RegistrationForm::default())
            .expect_err("empty form");
        let text = render(&controller).expect("render view");
        assert!(text.contains("[Регистрация]"));
        assert!(text.contains("  ! Неверный формат email"));
        assert!(!text.contains(DEMO_HINT));
    }

    #[rstest]
    fn resident_empty_state(mut controller: Controller) {
        register(&mut controller, "maria", "Орлова Мария");
        let text = render(&controller).expect("render view");
        assert!(text.contains("ГородОк | Орлова Мария (Пользователь)"));
        assert!(text.contains("Мои заявки"));
        assert!(text.contains("У вас пока нет заявок\nСоздайте первую заявку выше"));
    }

    #[rstest]
    fn resident_sees_only_own_tickets(mut controller: Controller) {
        register(&mut controller, "maria", "Орлова Мария");
        controller
            .submit_application(ApplicationDraft::new("Лужа у подъезда", "Не пройти"))
            .expect("file");
        controller.logout().expect("logout");
        register(&mut controller, "pavel", "Зуев Павел");
        controller
            .submit_application(ApplicationDraft::new("Сломаны качели", "Во дворе"))
            .expect("file");

        let text = render(&controller).expect("render view");
        assert!(text.contains("Сломаны качели"));
        assert!(!text.contains("Лужа у подъезда"));
    }

    #[rstest]
    fn admin_panel_empty_state(mut controller: Controller) {
        controller
            .submit_login(LoginCredentials::new("admin", "password"))
            .expect("login");
        let text = render(&controller).expect("render view");
        assert!(text.contains("ГородОк | Администратор (Администратор)"));
        assert!(text.contains("Заявок пока нет"));
    }

    #[rstest]
    fn admin_actions_disappear_after_review(mut controller: Controller) {
        register(&mut controller, "maria", "Орлова Мария");
        controller
            .submit_application(ApplicationDraft::new("Лужа у подъезда", "Не пройти"))
            .expect("file");
        controller.logout().expect("logout");
        controller
            .submit_login(LoginCredentials::new("admin", "password"))
            .expect("login");

        let before = render(&controller).expect("render view");
        assert!(before.contains("Орлова Мария (maria@mail.ru)"));
        assert!(before.contains("[Решена] [Отклонена]"));
        assert!(before.contains("[Новая]"));

        controller
            .review(ApplicationId::new(1), Resolution::Resolved)
            .expect("resolve");
        let after = render(&controller).expect("render view");
        assert!(!after.contains("[Решена] [Отклонена]"));
        assert!(after.contains("#1 [Решена]"));
    }
}
