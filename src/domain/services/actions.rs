#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::inspect_file;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::ApiOperation;
use crate::domain::models::AuthSession;
use crate::domain::models::Event;
use crate::domain::models::SelectedFile;

/// Reads the file and PUTs it to a freshly requested pre-signed URL.
pub async fn upload_file(api: &ApiBox, file: &SelectedFile) -> Result<(), ApiError> {
    let bytes = fs::read(&file.path).await.map_err(|err| {
        return ApiError::Transport {
            operation: ApiOperation::Upload {
                file_name: file.name.to_string(),
            },
            message: err.to_string(),
        };
    })?;

    let presigned_url = api.presigned_upload_url(&file.name).await?;
    api.upload(&presigned_url, &file.name, bytes).await?;

    tracing::info!(file_name = %file.name, size = file.size, "Uploaded document");
    return Ok(());
}

async fn run(api: ApiBox, session: AuthSession, action: Action) -> Event {
    match action {
        Action::ListDocuments(generation) => {
            return Event::DocumentsLoaded(generation, api.list_documents().await);
        }
        Action::DeleteDocument(document_id) => {
            let res = api.delete_document(&document_id).await;
            return Event::DocumentDeleted(document_id, res);
        }
        Action::InspectFile(path) => {
            let res = inspect_file(&path)
                .await
                .map_err(|err| return format!("Could not read {path}: {err}"));
            return Event::FileInspected(res);
        }
        Action::UploadDocument(file) => {
            let res = upload_file(&api, &file).await;
            return Event::DocumentUploaded(file.name, res);
        }
        Action::FetchConversation(ticket) => {
            let res = api
                .get_conversation(&ticket.document_id, &ticket.conversation_id)
                .await;
            return Event::ConversationLoaded(ticket, res);
        }
        Action::CreateConversation(ticket) => {
            let res = api.create_conversation(&ticket.document_id).await;
            return Event::ConversationCreated(ticket, res);
        }
        Action::PostPrompt(ticket) => {
            let res = api
                .post_prompt(
                    &ticket.document_id,
                    &ticket.conversation_id,
                    &ticket.file_name,
                    &ticket.prompt,
                )
                .await;
            return Event::PromptSent(ticket, res);
        }
        Action::SignOut() => {
            return Event::SignedOut(session.sign_out().await);
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every action on its own task. Nothing is cancelled, results for
    /// views that moved on are dropped by the receiving state.
    pub async fn start(
        api: ApiBox,
        session: AuthSession,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(action = ?action, "Dispatching action");

            let worker_api = api.clone();
            let worker_session = session.clone();
            let worker_tx = tx.clone();
            tokio::spawn(async move {
                let event = run(worker_api, worker_session, action).await;
                if worker_tx.send(event).is_err() {
                    tracing::debug!("Event receiver closed, dropping result");
                }
            });
        }

        return Ok(());
    }
}
