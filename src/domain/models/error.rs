use std::fmt;

/// The backend call that failed, with the identifiers it was issued for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiOperation {
    ListDocuments,
    DeleteDocument { document_id: String },
    PresignUpload { file_name: String },
    Upload { file_name: String },
    GetConversation { document_id: String, conversation_id: String },
    CreateConversation { document_id: String },
    PostPrompt { document_id: String, conversation_id: String },
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiOperation::ListDocuments => return write!(f, "listing documents"),
            ApiOperation::DeleteDocument { document_id } => {
                return write!(f, "deleting document {document_id}");
            }
            ApiOperation::PresignUpload { file_name } => {
                return write!(f, "requesting an upload URL for {file_name}");
            }
            ApiOperation::Upload { file_name } => return write!(f, "uploading {file_name}"),
            ApiOperation::GetConversation {
                document_id,
                conversation_id,
            } => {
                return write!(
                    f,
                    "loading conversation {conversation_id} of document {document_id}"
                );
            }
            ApiOperation::CreateConversation { document_id } => {
                return write!(f, "creating a conversation for document {document_id}");
            }
            ApiOperation::PostPrompt {
                document_id,
                conversation_id,
            } => {
                return write!(
                    f,
                    "sending a prompt to conversation {conversation_id} of document {document_id}"
                );
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("You are not signed in ({0}). Run `docchat auth login` and try again.")]
    Unauthenticated(String),
    #[error("The backend answered with status {status} while {operation}.")]
    Status { operation: ApiOperation, status: u16 },
    #[error("Request failed while {operation}: {message}")]
    Transport {
        operation: ApiOperation,
        message: String,
    },
    #[error("Unexpected response while {operation}: {message}")]
    Decode {
        operation: ApiOperation,
        message: String,
    },
}

impl ApiError {
    pub fn is_unauthenticated(&self) -> bool {
        return matches!(self, ApiError::Unauthenticated(_));
    }
}
