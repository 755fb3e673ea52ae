use std::path::PathBuf;

use anyhow::Result;
use tempdir::TempDir;

use super::inspect_file;
use super::Uploader;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ApiOperation;
use crate::domain::models::ButtonStatus;
use crate::domain::models::InputStatus;
use crate::domain::models::SelectedFile;

fn pdf() -> SelectedFile {
    return SelectedFile::from_path(PathBuf::from("/tmp/report.pdf"), 2048);
}

#[test]
fn it_derives_content_types_from_extensions() {
    assert_eq!(pdf().content_type, "application/pdf");
    assert_eq!(pdf().name, "report.pdf");

    let text = SelectedFile::from_path(PathBuf::from("/tmp/notes.txt"), 10);
    assert_eq!(text.content_type, "text/plain");

    let unknown = SelectedFile::from_path(PathBuf::from("/tmp/README"), 10);
    assert_eq!(unknown.content_type, "");
}

#[test]
fn it_rejects_non_pdf_files() {
    let mut uploader = Uploader::default();
    let accepted = uploader.select(SelectedFile::from_path(PathBuf::from("/tmp/image.png"), 10));

    assert!(!accepted);
    assert_eq!(uploader.input_status, InputStatus::Idle);
    assert_eq!(uploader.selected_file, None);
    assert_eq!(uploader.upload(), None);
}

#[test]
fn it_accepts_pdf_files() {
    let mut uploader = Uploader::default();

    assert!(uploader.select(pdf()));
    assert_eq!(uploader.input_status, InputStatus::Valid);
    assert_eq!(uploader.button_status, ButtonStatus::Ready);
}

#[test]
fn it_walks_through_a_successful_upload() {
    let mut uploader = Uploader::default();
    uploader.select(pdf());
    assert_eq!(uploader.button_status, ButtonStatus::Ready);

    assert_eq!(uploader.upload(), Some(Action::UploadDocument(pdf())));
    assert_eq!(uploader.button_status, ButtonStatus::Uploading);
    // No double submit.
    assert_eq!(uploader.upload(), None);

    assert!(uploader.apply_upload(Ok(())));
    assert_eq!(uploader.button_status, ButtonStatus::Success);
    // Completion is only signalled once.
    assert!(!uploader.apply_upload(Ok(())));
}

#[test]
fn it_returns_to_ready_after_a_failed_upload() {
    let mut uploader = Uploader::default();
    uploader.select(pdf());
    uploader.upload();

    let notify = uploader.apply_upload(Err(ApiError::Status {
        operation: ApiOperation::Upload {
            file_name: "report.pdf".to_string(),
        },
        status: 403,
    }));

    assert!(!notify);
    assert_eq!(uploader.button_status, ButtonStatus::Ready);
    assert_eq!(uploader.input_status, InputStatus::Valid);
    assert!(uploader.error.is_some());
    assert!(uploader.upload().is_some());
}

#[test]
fn it_cannot_cancel_while_uploading() {
    let mut uploader = Uploader::default();
    uploader.select(pdf());
    uploader.upload();

    assert!(!uploader.reset());
    assert_eq!(uploader.input_status, InputStatus::Valid);
}

#[test]
fn it_resets_to_initial_state() {
    let mut uploader = Uploader::default();
    uploader.select(pdf());
    uploader.upload();
    uploader.apply_upload(Ok(()));

    assert!(uploader.reset());
    assert_eq!(uploader.input_status, InputStatus::Idle);
    assert_eq!(uploader.button_status, ButtonStatus::Ready);
    assert_eq!(uploader.selected_file, None);
}

#[test]
fn it_describes_the_selection() {
    let mut uploader = Uploader::default();
    uploader.select(pdf());

    insta::assert_snapshot!(uploader.lines().join("\n"), @r###"
    report.pdf (2.05 kB)
    Enter: Upload document | Esc: Cancel
    "###);
}

#[tokio::test]
async fn it_inspects_local_files() -> Result<()> {
    let tmp_dir = TempDir::new("docchat")?;
    let file_path = tmp_dir.path().join("paper.pdf");
    std::fs::write(&file_path, b"%PDF-1.4")?;

    let file = inspect_file(file_path.to_str().unwrap()).await?;
    assert_eq!(file.name, "paper.pdf");
    assert_eq!(file.size, 8);
    assert_eq!(file.content_type, "application/pdf");

    assert!(inspect_file("/does/not/exist.pdf").await.is_err());

    return Ok(());
}
