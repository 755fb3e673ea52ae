use std::sync::Arc;

use async_trait::async_trait;

use super::ApiError;
use super::Conversation;
use super::Document;

pub type ApiBox = Arc<dyn DocumentApi + Send + Sync>;

#[async_trait]
pub trait DocumentApi {
    /// Lists every document owned by the signed in user.
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError>;

    async fn delete_document(&self, document_id: &str) -> Result<(), ApiError>;

    /// Returns a time-limited URL the raw PDF can be PUT to.
    async fn presigned_upload_url(&self, file_name: &str) -> Result<String, ApiError>;

    /// Uploads the file to a pre-signed URL. This is the only call made
    /// without a bearer token.
    async fn upload(
        &self,
        presigned_url: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError>;

    async fn get_conversation(
        &self,
        document_id: &str,
        conversation_id: &str,
    ) -> Result<Conversation, ApiError>;

    /// Creates a new conversation for a document and returns its identifier.
    async fn create_conversation(&self, document_id: &str) -> Result<String, ApiError>;

    /// Sends a prompt. The answer is persisted by the backend, callers fetch
    /// the conversation again to see it.
    async fn post_prompt(
        &self,
        document_id: &str,
        conversation_id: &str,
        file_name: &str,
        prompt: &str,
    ) -> Result<(), ApiError>;
}
