#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::ApiError;
use crate::domain::models::ApiOperation;
use crate::domain::models::AuthSession;
use crate::domain::models::Conversation;
use crate::domain::models::Document;
use crate::domain::models::DocumentApi;

#[derive(Debug, Deserialize)]
struct PresignedUrlResponse {
    presignedurl: String,
}

#[derive(Debug, Deserialize)]
struct CreateConversationResponse {
    conversationid: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptRequest {
    file_name: String,
    prompt: String,
}

/// The document chat backend over HTTP.
pub struct RestApi {
    url: String,
    session: AuthSession,
    client: reqwest::Client,
}

impl RestApi {
    pub fn new(url: &str, session: AuthSession) -> RestApi {
        return RestApi {
            url: url.trim_end_matches('/').to_string(),
            session,
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{}/{path}", self.url);
    }

    fn transport_error(operation: &ApiOperation, err: reqwest::Error) -> ApiError {
        return ApiError::Transport {
            operation: operation.clone(),
            message: err.to_string(),
        };
    }

    /// Sends a request, failing on any non 2xx answer.
    async fn send(
        &self,
        operation: &ApiOperation,
        req: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let res = req
            .send()
            .await
            .map_err(|err| return RestApi::transport_error(operation, err))?;

        let status = res.status().as_u16();
        tracing::debug!(operation = %operation, status, "Backend responded");

        if status == 401 || status == 403 {
            return Err(ApiError::Unauthenticated(format!(
                "the backend answered with status {status} while {operation}"
            )));
        }
        if !res.status().is_success() {
            return Err(ApiError::Status {
                operation: operation.clone(),
                status,
            });
        }

        return Ok(res);
    }

    /// Attaches the bearer token. No request is sent when there is none.
    async fn send_authorized(
        &self,
        operation: &ApiOperation,
        req: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let token = self.session.token().await.map_err(|err| {
            tracing::warn!(operation = %operation, "No token available, request not sent");
            return err;
        })?;

        return self
            .send(operation, req.header("authorization", format!("Bearer {token}")))
            .await;
    }

    async fn decode<T: DeserializeOwned>(
        operation: &ApiOperation,
        res: Response,
    ) -> Result<T, ApiError> {
        return res.json::<T>().await.map_err(|err| {
            return ApiError::Decode {
                operation: operation.clone(),
                message: err.to_string(),
            };
        });
    }
}

#[async_trait]
impl DocumentApi for RestApi {
    #[allow(clippy::implicit_return)]
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        let operation = ApiOperation::ListDocuments;
        let req = self.client.get(self.endpoint("doc"));
        let res = self.send_authorized(&operation, req).await?;

        return RestApi::decode::<Vec<Document>>(&operation, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn delete_document(&self, document_id: &str) -> Result<(), ApiError> {
        let operation = ApiOperation::DeleteDocument {
            document_id: document_id.to_string(),
        };
        let req = self.client.delete(self.endpoint(&format!("doc/{document_id}")));
        self.send_authorized(&operation, req).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn presigned_upload_url(&self, file_name: &str) -> Result<String, ApiError> {
        let operation = ApiOperation::PresignUpload {
            file_name: file_name.to_string(),
        };
        let req = self
            .client
            .get(self.endpoint("generate_presigned_url"))
            .query(&[("file_name", file_name)]);
        let res = self.send_authorized(&operation, req).await?;

        let body = RestApi::decode::<PresignedUrlResponse>(&operation, res).await?;
        return Ok(body.presignedurl);
    }

    #[allow(clippy::implicit_return)]
    async fn upload(
        &self,
        presigned_url: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let operation = ApiOperation::Upload {
            file_name: file_name.to_string(),
        };
        let req = self
            .client
            .put(presigned_url)
            .header("content-type", "application/pdf")
            .body(bytes);
        self.send(&operation, req).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_conversation(
        &self,
        document_id: &str,
        conversation_id: &str,
    ) -> Result<Conversation, ApiError> {
        let operation = ApiOperation::GetConversation {
            document_id: document_id.to_string(),
            conversation_id: conversation_id.to_string(),
        };
        let req = self
            .client
            .get(self.endpoint(&format!("doc/{document_id}/{conversation_id}")));
        let res = self.send_authorized(&operation, req).await?;

        return RestApi::decode::<Conversation>(&operation, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn create_conversation(&self, document_id: &str) -> Result<String, ApiError> {
        let operation = ApiOperation::CreateConversation {
            document_id: document_id.to_string(),
        };
        let req = self.client.post(self.endpoint(&format!("doc/{document_id}")));
        let res = self.send_authorized(&operation, req).await?;

        let body = RestApi::decode::<CreateConversationResponse>(&operation, res).await?;
        return Ok(body.conversationid);
    }

    #[allow(clippy::implicit_return)]
    async fn post_prompt(
        &self,
        document_id: &str,
        conversation_id: &str,
        file_name: &str,
        prompt: &str,
    ) -> Result<(), ApiError> {
        let operation = ApiOperation::PostPrompt {
            document_id: document_id.to_string(),
            conversation_id: conversation_id.to_string(),
        };
        let req = self
            .client
            .post(self.endpoint(&format!("{document_id}/{conversation_id}")))
            .json(&PromptRequest {
                file_name: file_name.to_string(),
                prompt: prompt.to_string(),
            });
        self.send_authorized(&operation, req).await?;

        return Ok(());
    }
}
