use std::path::PathBuf;

/// Identifiers a conversation fetch was issued for. A response is only
/// applied while the view still shows the same document and conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub document_id: String,
    pub conversation_id: String,
    pub request_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTicket {
    pub document_id: String,
    pub request_id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTicket {
    pub document_id: String,
    pub conversation_id: String,
    pub file_name: String,
    pub prompt: String,
    pub request_id: u64,
}

/// A local file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Content type declared for the file, derived from its extension.
    pub content_type: String,
}

impl SelectedFile {
    pub fn from_path(path: PathBuf, size: u64) -> SelectedFile {
        let name = path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_default();
        let content_type = mime_guess::from_path(&path)
            .first()
            .map(|e| return e.essence_str().to_string())
            .unwrap_or_default();

        return SelectedFile {
            path,
            name,
            size,
            content_type,
        };
    }
}
