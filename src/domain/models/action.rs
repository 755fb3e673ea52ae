use super::CreateTicket;
use super::FetchTicket;
use super::PromptTicket;
use super::SelectedFile;

/// Work requested by the UI, executed by the actions service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Carries the list generation it was issued for.
    ListDocuments(u64),
    DeleteDocument(String),
    /// Local path typed into the upload prompt.
    InspectFile(String),
    UploadDocument(SelectedFile),
    FetchConversation(FetchTicket),
    CreateConversation(CreateTicket),
    PostPrompt(PromptTicket),
    SignOut(),
}
