use super::*;
use client_core::{DraftMode, RemoteOperation, RemoteOutcome};
use crossbeam_channel::bounded;
use shared::{domain::User, protocol::UserPayload};

struct Harness {
    app: DesktopGuiApp,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn harness() -> Harness {
    let (cmd_tx, cmd_rx) = bounded(8);
    let (ui_tx, ui_rx) = bounded(8);
    Harness {
        app: DesktopGuiApp::bootstrap(cmd_tx, ui_rx, "http://127.0.0.1:8080/users".into()),
        cmd_rx,
        ui_tx,
    }
}

fn user(id: i64, name: &str, email: &str) -> User {
    User::new(UserId(id), name, email)
}

fn loaded_harness() -> Harness {
    let mut h = harness();
    assert_eq!(h.cmd_rx.try_recv(), Ok(BackendCommand::LoadUsers));
    h.ui_tx
        .send(UiEvent::Remote(RemoteOutcome::Loaded(vec![
            user(1, "A", "a@x.com"),
            user(2, "B", "b@x.com"),
        ])))
        .expect("send");
    h.app.process_ui_events();
    h
}

#[test]
fn bootstrap_queues_initial_load() {
    let h = harness();
    assert_eq!(h.cmd_rx.try_recv(), Ok(BackendCommand::LoadUsers));
    assert!(h.cmd_rx.try_recv().is_err());
    assert!(h.app.status.is_empty());
}

#[test]
fn loaded_event_fills_table() {
    let h = loaded_harness();
    assert_eq!(h.app.view.users().len(), 2);
}

#[test]
fn submit_keeps_form_open_until_outcome_arrives() {
    let mut h = loaded_harness();
    h.app.open_create_form();
    h.app.view.draft_mut().name = "C".into();
    h.app.view.draft_mut().email = "c@x.com".into();
    h.app.submit_form();

    assert_eq!(
        h.cmd_rx.try_recv(),
        Ok(BackendCommand::CreateUser(UserPayload::new("C", "c@x.com")))
    );
    assert!(h.app.view.is_form_open());

    h.ui_tx
        .send(UiEvent::Remote(RemoteOutcome::Created(user(3, "C", "c@x.com"))))
        .expect("send");
    h.app.process_ui_events();
    assert!(!h.app.view.is_form_open());
    assert_eq!(h.app.view.users().len(), 3);
}

#[test]
fn failed_submit_is_silent_and_keeps_draft() {
    let mut h = loaded_harness();
    h.app.open_edit_form(UserId(2));
    h.app.view.draft_mut().name = "B2".into();
    h.app.submit_form();
    assert_eq!(
        h.cmd_rx.try_recv(),
        Ok(BackendCommand::UpdateUser {
            id: UserId(2),
            payload: UserPayload::new("B2", "b@x.com"),
        })
    );

    h.ui_tx
        .send(UiEvent::Remote(RemoteOutcome::Failed(RemoteOperation::Update)))
        .expect("send");
    h.app.process_ui_events();

    assert!(h.app.view.is_form_open());
    assert_eq!(h.app.view.draft().mode, DraftMode::Editing(UserId(2)));
    assert_eq!(h.app.view.draft().name, "B2");
    assert_eq!(h.app.view.users().get(UserId(2)), Some(&user(2, "B", "b@x.com")));
    assert!(h.app.status.is_empty());
}

#[test]
fn edit_action_for_missing_row_is_ignored() {
    let mut h = loaded_harness();
    h.app.apply_row_action(RowAction::Edit(UserId(9)));
    assert!(!h.app.view.is_form_open());
}

#[test]
fn delete_action_queues_delete_and_waits_for_confirmation() {
    let mut h = loaded_harness();
    h.app.apply_row_action(RowAction::Delete(UserId(1)));
    assert_eq!(h.cmd_rx.try_recv(), Ok(BackendCommand::DeleteUser(UserId(1))));
    assert_eq!(h.app.view.users().len(), 2);

    h.ui_tx
        .send(UiEvent::Remote(RemoteOutcome::Deleted(UserId(1))))
        .expect("send");
    h.app.process_ui_events();
    assert_eq!(h.app.view.users().as_slice(), &[user(2, "B", "b@x.com")]);
}

#[test]
fn worker_failure_reaches_status_line() {
    let mut h = harness();
    h.ui_tx
        .send(UiEvent::WorkerFailed("backend worker startup failure".into()))
        .expect("send");
    h.app.process_ui_events();
    assert_eq!(h.app.status, "backend worker startup failure");
}

#[test]
fn disconnected_worker_is_reported_on_dispatch() {
    let mut h = loaded_harness();
    drop(h.cmd_rx);
    h.app.request_delete(UserId(1));
    assert!(h.app.status.contains("disconnected"));
    assert_eq!(h.app.view.users().len(), 2);
}
