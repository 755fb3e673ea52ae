use std::path::PathBuf;

use anyhow::Result;
use test_utils::conversation_fixture;
use test_utils::documents_fixture;
use tui_textarea::Input;
use tui_textarea::Key;

use super::AppState;
use super::SESSION_EXPIRED_MESSAGE;
use super::SIGNED_OUT_MESSAGE;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ButtonStatus;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationRef;
use crate::domain::models::Document;
use crate::domain::models::Event;
use crate::domain::models::FetchTicket;
use crate::domain::models::InputStatus;
use crate::domain::models::Route;
use crate::domain::models::SelectedFile;

fn key(key: Key) -> Event {
    return Event::KeyboardCharInput(Input {
        key,
        ..Default::default()
    });
}

fn ctrl(c: char) -> Event {
    return Event::KeyboardCharInput(Input {
        key: Key::Char(c),
        ctrl: true,
        ..Default::default()
    });
}

fn documents() -> Vec<Document> {
    return serde_json::from_str(documents_fixture()).unwrap();
}

fn conversation(id: &str) -> Conversation {
    let mut conversation: Conversation = serde_json::from_str(conversation_fixture()).unwrap();
    conversation.conversationid = id.to_string();
    return conversation;
}

fn single(actions: Vec<Action>) -> Action {
    assert_eq!(actions.len(), 1, "expected one action, got {actions:?}");
    return actions.into_iter().next().unwrap();
}

fn fetch_ticket(action: Action) -> FetchTicket {
    match action {
        Action::FetchConversation(ticket) => return ticket,
        other => panic!("expected a fetch, got {other:?}"),
    }
}

fn on_documents() -> AppState {
    let (mut app_state, actions) = AppState::new(Route::Documents, None);
    assert_eq!(actions, vec![Action::ListDocuments(1)]);
    app_state.handle_event(Event::DocumentsLoaded(1, Ok(documents())));
    return app_state;
}

#[test]
fn it_starts_on_the_requested_route() {
    let (app_state, actions) = AppState::new(Route::chat("d1", "c1"), Some("ada@example.com".to_string()));

    assert_eq!(app_state.route(), Route::chat("d1", "c1"));
    assert_eq!(
        actions,
        vec![Action::FetchConversation(FetchTicket {
            document_id: "d1".to_string(),
            conversation_id: "c1".to_string(),
            request_id: 1,
        })]
    );
}

#[test]
fn it_opens_conversations_and_creates_new_ones() -> Result<()> {
    let mut app_state = on_documents();
    assert_eq!(app_state.documents.documents.len(), 3);

    let fetch = fetch_ticket(single(app_state.handle_event(key(Key::Enter))));
    assert_eq!(app_state.route(), Route::chat("d1", "c1"));
    app_state.handle_event(Event::ConversationLoaded(fetch, Ok(conversation("c1"))));

    let create = match single(app_state.handle_event(ctrl('t'))) {
        Action::CreateConversation(ticket) => ticket,
        other => panic!("expected a create, got {other:?}"),
    };
    let fetch = fetch_ticket(single(
        app_state.handle_event(Event::ConversationCreated(create, Ok("c2".to_string()))),
    ));
    assert_eq!(app_state.route(), Route::chat("d1", "c2"));

    let mut created = conversation("c2");
    created.messages.clear();
    created.document.conversations.push(ConversationRef {
        conversationid: "c2".to_string(),
        created: "2024-01-02T10:00:00.000000Z".to_string(),
    });
    app_state.handle_event(Event::ConversationLoaded(fetch, Ok(created)));

    let view = app_state.conversation.as_ref().unwrap();
    let sidebar = view
        .conversations()
        .iter()
        .map(|e| return e.conversationid.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(sidebar, vec!["c1", "c2"]);

    return Ok(());
}

#[test]
fn it_switches_conversations_from_the_sidebar() {
    let (mut app_state, actions) = AppState::new(Route::chat("d1", "c2"), None);
    let mut loaded = conversation("c2");
    loaded.document.conversations.push(ConversationRef {
        conversationid: "c2".to_string(),
        created: "2024-01-02T10:00:00.000000Z".to_string(),
    });
    app_state.handle_event(Event::ConversationLoaded(
        fetch_ticket(single(actions)),
        Ok(loaded),
    ));

    let fetch = fetch_ticket(single(app_state.handle_event(ctrl('p'))));
    assert_eq!(fetch.conversation_id, "c1");
    assert_eq!(app_state.route(), Route::chat("d1", "c1"));
}

#[test]
fn it_goes_back_to_the_document_list() {
    let (mut app_state, _) = AppState::new(Route::chat("d1", "c1"), None);

    let actions = app_state.handle_event(key(Key::Esc));
    assert_eq!(actions, vec![Action::ListDocuments(1)]);
    assert_eq!(app_state.route(), Route::Documents);
    assert!(app_state.conversation.is_none());
}

#[test]
fn it_submits_prompts_typed_into_the_chat() {
    let (mut app_state, actions) = AppState::new(Route::chat("d1", "c1"), None);
    app_state.handle_event(Event::ConversationLoaded(
        fetch_ticket(single(actions)),
        Ok(conversation("c1")),
    ));

    app_state.handle_event(Event::KeyboardPaste("Who signed".to_string()));
    app_state.handle_event(key(Key::Char('?')));

    match single(app_state.handle_event(key(Key::Enter))) {
        Action::PostPrompt(ticket) => {
            assert_eq!(ticket.prompt, "Who signed?");
            assert_eq!(ticket.file_name, "annual-report.pdf");
        }
        other => panic!("expected a prompt, got {other:?}"),
    }
}

#[test]
fn it_deletes_the_selected_document_and_reloads() {
    let mut app_state = on_documents();

    let action = single(app_state.handle_event(key(Key::Char('d'))));
    assert_eq!(action, Action::DeleteDocument("d1".to_string()));

    let actions = app_state.handle_event(Event::DocumentDeleted("d1".to_string(), Ok(())));
    assert_eq!(actions, vec![Action::ListDocuments(2)]);

    let remaining = documents()
        .into_iter()
        .filter(|e| return e.documentid != "d1")
        .collect::<Vec<Document>>();
    app_state.handle_event(Event::DocumentsLoaded(2, Ok(remaining)));
    assert!(!app_state
        .documents
        .documents
        .iter()
        .any(|e| return e.documentid == "d1"));
}

#[test]
fn it_does_not_delete_documents_still_processing() {
    let mut app_state = on_documents();
    app_state.handle_event(Event::UIScrollDown());

    assert!(app_state.handle_event(key(Key::Char('d'))).is_empty());
}

#[test]
fn it_uploads_through_the_path_prompt() {
    let mut app_state = on_documents();

    app_state.handle_event(key(Key::Char('u')));
    assert!(app_state.path_input.is_some());
    app_state.handle_event(Event::KeyboardPaste("/tmp/report.pdf".to_string()));

    let action = single(app_state.handle_event(key(Key::Enter)));
    assert_eq!(action, Action::InspectFile("/tmp/report.pdf".to_string()));
    assert!(app_state.path_input.is_none());

    let file = SelectedFile::from_path(PathBuf::from("/tmp/report.pdf"), 2048);
    app_state.handle_event(Event::FileInspected(Ok(file.clone())));
    assert_eq!(app_state.uploader.input_status, InputStatus::Valid);
    assert!(app_state.hotkeys().contains("Enter: Upload"));

    let action = single(app_state.handle_event(key(Key::Enter)));
    assert_eq!(action, Action::UploadDocument(file));
    assert_eq!(app_state.uploader.button_status, ButtonStatus::Uploading);

    let actions = app_state.handle_event(Event::DocumentUploaded("report.pdf".to_string(), Ok(())));
    assert_eq!(actions, vec![Action::ListDocuments(2)]);
    assert_eq!(app_state.uploader.button_status, ButtonStatus::Success);
}

#[test]
fn it_rejects_non_pdf_selections() {
    let mut app_state = on_documents();
    let file = SelectedFile::from_path(PathBuf::from("/tmp/cat.png"), 10);

    app_state.handle_event(Event::FileInspected(Ok(file)));
    assert_eq!(app_state.uploader.input_status, InputStatus::Idle);

    // Enter falls through to opening the selected document.
    let action = single(app_state.handle_event(key(Key::Enter)));
    assert!(matches!(action, Action::FetchConversation(_)));
}

#[test]
fn it_reports_missing_files() {
    let mut app_state = on_documents();

    app_state.handle_event(Event::FileInspected(Err("No such file".to_string())));
    assert_eq!(app_state.uploader.error, Some("No such file".to_string()));
    assert_eq!(app_state.uploader.input_status, InputStatus::Idle);
}

#[test]
fn it_quits_after_signing_out() {
    let mut app_state = on_documents();

    let action = single(app_state.handle_event(key(Key::Char('s'))));
    assert_eq!(action, Action::SignOut());
    assert!(!app_state.should_quit);

    app_state.handle_event(Event::SignedOut(Ok(())));
    assert!(app_state.should_quit);
    assert_eq!(app_state.exit_message, Some(SIGNED_OUT_MESSAGE.to_string()));
}

#[test]
fn it_stays_open_when_signing_out_fails() {
    let mut app_state = on_documents();

    app_state.handle_event(Event::SignedOut(Err(anyhow::anyhow!(
        "A static token is configured, unset --token or DOCCHAT_TOKEN to sign out."
    ))));

    assert!(!app_state.should_quit);
    assert_eq!(app_state.exit_message, None);
    assert!(app_state
        .documents
        .error
        .as_ref()
        .is_some_and(|e| return e.contains("DOCCHAT_TOKEN")));
}

#[test]
fn it_flags_rejected_sessions() {
    let (mut app_state, _) = AppState::new(Route::Documents, Some("ada@example.com".to_string()));
    assert!(!app_state.session_expired);

    app_state.handle_event(Event::DocumentsLoaded(
        1,
        Err(ApiError::Unauthenticated("token expired".to_string())),
    ));

    assert!(app_state.session_expired);
    assert!(SESSION_EXPIRED_MESSAGE.contains("docchat auth login"));
}

#[test]
fn it_quits_on_ctrl_c() {
    let mut app_state = on_documents();
    app_state.handle_event(Event::KeyboardCTRLC());

    assert!(app_state.should_quit);
    assert_eq!(app_state.exit_message, None);
}

#[test]
fn it_lists_hotkeys_per_screen() {
    let app_state = on_documents();
    insta::assert_snapshot!(app_state.hotkeys(), @"Up/Down: Select | Enter: Chat | u: Upload | d: Delete | r: Refresh | s: Sign out | q: Quit");

    let (app_state, _) = AppState::new(Route::chat("d1", "c1"), None);
    assert!(app_state.hotkeys().starts_with("Enter: Send"));
}
