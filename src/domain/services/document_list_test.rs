use anyhow::Result;
use test_utils::documents_fixture;

use super::DocumentList;
use super::ListPlaceholder;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ApiOperation;
use crate::domain::models::DeleteStatus;
use crate::domain::models::Document;
use crate::domain::models::Route;
use crate::domain::models::Status;

fn documents() -> Vec<Document> {
    return serde_json::from_str(documents_fixture()).unwrap();
}

fn loaded() -> DocumentList {
    let mut list = DocumentList::default();
    let action = list.refresh();
    assert_eq!(action, Action::ListDocuments(1));
    list.apply_list(1, Ok(documents()));
    return list;
}

#[test]
fn it_shows_nothing_here_yet_when_idle_and_empty() {
    let list = DocumentList::default();
    assert_eq!(list.status, Status::Idle);
    assert_eq!(list.placeholder(), ListPlaceholder::NothingHereYet);
}

#[test]
fn it_shows_loading_when_loading_and_empty() {
    let mut list = DocumentList::default();
    list.refresh();
    assert_eq!(list.status, Status::Loading);
    assert_eq!(list.placeholder(), ListPlaceholder::Loading);
}

#[test]
fn it_keeps_listing_documents_while_refreshing() {
    let mut list = loaded();
    list.refresh();
    assert_eq!(list.status, Status::Loading);
    assert_eq!(list.placeholder(), ListPlaceholder::Documents);
}

#[test]
fn it_replaces_documents_on_load() {
    let list = loaded();
    assert_eq!(list.status, Status::Idle);
    assert_eq!(list.documents.len(), 3);
    assert!(list.error.is_none());
}

#[test]
fn it_drops_stale_list_responses() {
    let mut list = DocumentList::default();
    list.refresh();
    list.refresh();

    assert!(!list.apply_list(1, Ok(documents())));
    assert!(list.documents.is_empty());
    assert_eq!(list.status, Status::Loading);

    assert!(list.apply_list(2, Ok(vec![])));
    assert_eq!(list.status, Status::Idle);
}

#[test]
fn it_returns_to_idle_on_failure_keeping_documents() {
    let mut list = loaded();
    list.refresh();
    list.apply_list(
        2,
        Err(ApiError::Status {
            operation: ApiOperation::ListDocuments,
            status: 502,
        }),
    );

    assert_eq!(list.status, Status::Idle);
    assert_eq!(list.documents.len(), 3);
    assert_eq!(
        list.error,
        Some("The backend answered with status 502 while listing documents.".to_string())
    );
}

#[test]
fn it_only_deletes_ready_documents() {
    let mut list = loaded();

    assert_eq!(list.delete("d2"), None);
    assert_eq!(list.delete("d3"), None);
    assert_eq!(list.delete("missing"), None);
    assert_eq!(list.delete("d1"), Some(Action::DeleteDocument("d1".to_string())));
    assert_eq!(list.delete_status("d1"), DeleteStatus::Deleting);
    // Already in flight.
    assert_eq!(list.delete("d1"), None);
}

#[test]
fn it_reloads_after_delete_instead_of_splicing() -> Result<()> {
    let mut list = loaded();
    list.delete("d1");

    let action = list.apply_delete("d1", Ok(()));
    assert_eq!(action, Some(Action::ListDocuments(2)));
    assert_eq!(list.documents.len(), 3);
    assert_eq!(list.delete_status("d1"), DeleteStatus::Idle);

    let remaining = documents()
        .into_iter()
        .filter(|e| return e.documentid != "d1")
        .collect::<Vec<Document>>();
    list.apply_list(2, Ok(remaining));

    assert!(!list.documents.iter().any(|e| return e.documentid == "d1"));

    return Ok(());
}

#[test]
fn it_reports_failed_deletes() {
    let mut list = loaded();
    list.delete("d1");

    let action = list.apply_delete(
        "d1",
        Err(ApiError::Transport {
            operation: ApiOperation::DeleteDocument {
                document_id: "d1".to_string(),
            },
            message: "connection reset".to_string(),
        }),
    );

    assert_eq!(action, None);
    assert_eq!(list.delete_status("d1"), DeleteStatus::Idle);
    assert_eq!(
        list.error,
        Some("Request failed while deleting document d1: connection reset".to_string())
    );
}

#[test]
fn it_opens_the_first_conversation() {
    let mut list = loaded();
    assert_eq!(list.open_selected(), Some(Route::chat("d1", "c1")));

    list.select_next();
    list.select_next();
    list.select_next();
    assert_eq!(list.selected, 2);
    // No conversations yet.
    assert_eq!(list.open_selected(), None);

    list.select_previous();
    assert_eq!(list.open_selected(), Some(Route::chat("d2", "c9")));
}

#[test]
fn it_formats_document_details() {
    let list = loaded();
    let lines = list.document_lines(&list.documents[0]).join("\n");

    insta::assert_snapshot!(lines, @r###"
    annual-report.pdf
      42 pages | 1.5 MB | January 1, 2024 - 9:05
      Ready to chat (d to delete)
    "###);
}
