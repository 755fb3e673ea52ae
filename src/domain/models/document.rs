#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DocumentStatus {
    /// Stored, waiting for the backend to pick it up.
    Uploaded,
    /// Embeddings are being generated.
    Processing,
    /// Ready to chat.
    Ready,
    #[serde(other)]
    Unknown,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => return "Awaiting processing",
            DocumentStatus::Processing => return "Processing document",
            DocumentStatus::Ready => return "Ready to chat",
            DocumentStatus::Unknown => return "Unknown status",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRef {
    pub conversationid: String,
    pub created: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub documentid: String,
    pub userid: String,
    pub filename: String,
    pub filesize: String,
    pub docstatus: DocumentStatus,
    pub created: String,
    pub pages: String,
    #[serde(default)]
    pub conversations: Vec<ConversationRef>,
}

impl Document {
    /// Deleting is only offered once processing has finished.
    pub fn can_delete(&self) -> bool {
        return self.docstatus == DocumentStatus::Ready;
    }

    pub fn default_conversation(&self) -> Option<&ConversationRef> {
        return self.conversations.first();
    }

    pub fn size_in_bytes(&self) -> u64 {
        return self.filesize.trim().parse::<u64>().unwrap_or(0);
    }
}
