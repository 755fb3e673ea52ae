use tui_textarea::Input;

use super::ApiError;
use super::Conversation;
use super::CreateTicket;
use super::Document;
use super::FetchTicket;
use super::PromptTicket;
use super::SelectedFile;

pub enum Event {
    DocumentsLoaded(u64, Result<Vec<Document>, ApiError>),
    DocumentDeleted(String, Result<(), ApiError>),
    DocumentUploaded(String, Result<(), ApiError>),
    FileInspected(Result<SelectedFile, String>),
    ConversationLoaded(FetchTicket, Result<Conversation, ApiError>),
    ConversationCreated(CreateTicket, Result<String, ApiError>),
    PromptSent(PromptTicket, Result<(), ApiError>),
    SignedOut(anyhow::Result<()>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}

impl Event {
    /// The backend failure a worker reported, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Event::DocumentsLoaded(_, Err(err)) => return Some(err),
            Event::DocumentDeleted(_, Err(err)) => return Some(err),
            Event::DocumentUploaded(_, Err(err)) => return Some(err),
            Event::ConversationLoaded(_, Err(err)) => return Some(err),
            Event::ConversationCreated(_, Err(err)) => return Some(err),
            Event::PromptSent(_, Err(err)) => return Some(err),
            _ => return None,
        }
    }
}
