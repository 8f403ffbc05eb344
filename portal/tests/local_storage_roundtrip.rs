//! Round-trip tests for portal entries stored in a real directory.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use local_storage::LocalStorage;
use portal::domain::{
    APPLICATIONS_KEY, Application, ApplicationDraft, ApplicationId, CURRENT_USER_KEY,
    PortalState, PortalStorage, Role, USERS_KEY, User, UserId, UserProfile,
};
use portal::outbound::storage::LocalStorageStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn storage(&self) -> PortalStorage<LocalStorageStore> {
        let store = LocalStorageStore::open(self.dir.path()).expect("open store");
        PortalStorage::new(Arc::new(store))
    }

    fn raw(&self, key: &str) -> Option<Value> {
        LocalStorage::open(self.dir.path())
            .expect("open raw store")
            .get(key)
            .expect("read raw entry")
            .map(|text| serde_json::from_str(&text).expect("entry is JSON"))
    }
}

#[fixture]
fn sandbox() -> Sandbox {
    Sandbox {
        dir: TempDir::new().expect("temp dir"),
    }
}

fn resident() -> User {
    User::new(
        UserId::new(2),
        UserProfile {
            full_name: "Белова Анна".to_owned(),
            login: "anna_b".to_owned(),
            email: "anna@mail.ru".to_owned(),
            phone: "+7 (921)000-11-22".to_owned(),
        },
        Role::Resident,
    )
}

fn tickets() -> Vec<Application> {
    let first: Application = serde_json::from_value(json!({
        "id": 1,
        "userId": 2,
        "title": "Разбит тротуар",
        "description": "Возле школы разбит тротуар",
        "status": "Отклонена",
        "createdAt": "01.09.2026, 08:30:00"
    }))
    .expect("stored ticket shape");
    let second = Application::file(
        ApplicationId::new(2),
        UserId::new(2),
        ApplicationDraft::new("Нет урны", "На остановке нет урны"),
        "02.09.2026, 18:45:10",
    );
    vec![first, second]
}

#[rstest]
fn collections_reload_equal_and_in_order(sandbox: Sandbox) {
    let users = vec![User::seeded_admin(), resident()];
    let applications = tickets();
    let storage = sandbox.storage();
    storage.save_users(&users).expect("save users");
    storage.save_applications(&applications).expect("save tickets");
    storage.save_session(Some(&users[1])).expect("save session");

    let state = PortalState::load(&sandbox.storage()).expect("reload");
    assert_eq!(state.users(), users.as_slice());
    assert_eq!(state.applications(), applications.as_slice());
    assert_eq!(state.current_user(), Some(&users[1]));
}

#[rstest]
fn entries_keep_the_portal_json_shape(sandbox: Sandbox) {
    let storage = sandbox.storage();
    storage.save_applications(&tickets()).expect("save tickets");
    storage.save_users(&[resident()]).expect("save users");

    assert_eq!(
        sandbox.raw(APPLICATIONS_KEY).expect("tickets stored")[0],
        json!({
            "id": 1,
            "userId": 2,
            "title": "Разбит тротуар",
            "description": "Возле школы разбит тротуар",
            "status": "Отклонена",
            "createdAt": "01.09.2026, 08:30:00"
        })
    );
    assert_eq!(
        sandbox.raw(APPLICATIONS_KEY).expect("tickets stored")[1]["status"],
        json!("Новая")
    );
    assert_eq!(
        sandbox.raw(USERS_KEY).expect("users stored")[0]["isAdmin"],
        json!(false)
    );
}

#[rstest]
fn signing_out_removes_the_session_file(sandbox: Sandbox) {
    let storage = sandbox.storage();
    storage
        .save_session(Some(&User::seeded_admin()))
        .expect("save session");
    assert!(sandbox.raw(CURRENT_USER_KEY).is_some());

    storage.save_session(None).expect("clear session");
    assert!(sandbox.raw(CURRENT_USER_KEY).is_none());
}

#[rstest]
fn missing_directory_starts_seeded(sandbox: Sandbox) {
    let store = LocalStorageStore::open(sandbox.dir.path().join("nested").join("data"))
        .expect("create nested store");
    let state = PortalState::load(&PortalStorage::new(Arc::new(store))).expect("load");
    assert_eq!(state, PortalState::seeded());
}
