#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use tui_textarea::Input;
use tui_textarea::Key;

use super::ConversationView;
use super::DocumentList;
use super::Uploader;
use crate::domain::models::Action;
use crate::domain::models::ButtonStatus;
use crate::domain::models::Event;
use crate::domain::models::InputStatus;
use crate::domain::models::Route;
use crate::domain::models::TextArea;

pub const SESSION_EXPIRED_MESSAGE: &str =
    "Session expired, run `docchat auth login` and restart";

pub const SIGNED_OUT_MESSAGE: &str = "Signed out. Run `docchat auth login` to sign in again.";

/// Everything the UI shows. Owned by the UI loop, events go in and the
/// backend work they trigger comes out as actions.
pub struct AppState {
    pub documents: DocumentList,
    pub uploader: Uploader,
    pub conversation: Option<ConversationView>,
    pub path_input: Option<tui_textarea::TextArea<'static>>,
    pub user_email: Option<String>,
    /// Set once the backend rejected the credentials.
    pub session_expired: bool,
    pub should_quit: bool,
    pub exit_message: Option<String>,
}

impl AppState {
    /// Builds the state for a starting route, along with the requests that
    /// load it.
    pub fn new(route: Route, user_email: Option<String>) -> (AppState, Vec<Action>) {
        let mut app_state = AppState {
            documents: DocumentList::default(),
            uploader: Uploader::default(),
            conversation: None,
            path_input: None,
            user_email,
            session_expired: false,
            should_quit: false,
            exit_message: None,
        };

        let actions = app_state.navigate(route);
        return (app_state, actions);
    }

    pub fn route(&self) -> Route {
        if let Some(conversation) = &self.conversation {
            return conversation.route();
        }

        return Route::Documents;
    }

    pub fn navigate(&mut self, route: Route) -> Vec<Action> {
        tracing::debug!(route = %route, "Navigating");
        self.path_input = None;

        match route {
            Route::Documents => {
                self.conversation = None;
                return vec![self.documents.refresh()];
            }
            Route::Chat {
                document_id,
                conversation_id,
            } => {
                let mut view = ConversationView::new(&document_id, &conversation_id);
                let action = view.fetch();
                self.conversation = Some(view);
                return vec![action];
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Action> {
        if event.api_error().is_some_and(|e| return e.is_unauthenticated()) {
            tracing::warn!("Backend rejected the session");
            self.session_expired = true;
        }

        match event {
            Event::DocumentsLoaded(generation, res) => {
                self.documents.apply_list(generation, res);
            }
            Event::DocumentDeleted(document_id, res) => {
                return self
                    .documents
                    .apply_delete(&document_id, res)
                    .into_iter()
                    .collect();
            }
            Event::DocumentUploaded(file_name, res) => {
                tracing::debug!(file_name = %file_name, ok = res.is_ok(), "Upload finished");
                if self.uploader.apply_upload(res) {
                    return vec![self.documents.refresh()];
                }
            }
            Event::FileInspected(res) => match res {
                Ok(file) => {
                    self.uploader.select(file);
                }
                Err(err) => {
                    self.uploader.reset();
                    self.uploader.error = Some(err);
                }
            },
            Event::ConversationLoaded(ticket, res) => {
                if let Some(view) = self.conversation.as_mut() {
                    view.apply_conversation(ticket, res);
                }
            }
            Event::ConversationCreated(ticket, res) => {
                if let Some(view) = self.conversation.as_mut() {
                    return view.apply_created(ticket, res).into_iter().collect();
                }
            }
            Event::PromptSent(ticket, res) => {
                if let Some(view) = self.conversation.as_mut() {
                    return view.apply_prompt(ticket, res).into_iter().collect();
                }
            }
            Event::SignedOut(res) => match res {
                Ok(_) => {
                    self.should_quit = true;
                    self.exit_message = Some(SIGNED_OUT_MESSAGE.to_string());
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to sign out");
                    self.documents.error = Some(format!("Failed to sign out: {err}"));
                }
            },
            Event::KeyboardCTRLC() => {
                self.should_quit = true;
            }
            Event::KeyboardPaste(text) => {
                if let Some(input) = self.path_input.as_mut() {
                    input.insert_str(text);
                } else if let Some(view) = self.conversation.as_mut() {
                    view.insert_str(&text);
                }
            }
            Event::KeyboardCharInput(input) => {
                return self.handle_input(input);
            }
            Event::UIScrollDown() => {
                if let Some(view) = self.conversation.as_mut() {
                    view.scroll.down();
                } else {
                    self.documents.select_next();
                }
            }
            Event::UIScrollUp() => {
                if let Some(view) = self.conversation.as_mut() {
                    view.scroll.up();
                } else {
                    self.documents.select_previous();
                }
            }
            Event::UIScrollPageDown() => {
                if let Some(view) = self.conversation.as_mut() {
                    view.scroll.down_page();
                }
            }
            Event::UIScrollPageUp() => {
                if let Some(view) = self.conversation.as_mut() {
                    view.scroll.up_page();
                }
            }
            Event::UIResize() | Event::UITick() => {}
        }

        return vec![];
    }

    fn handle_input(&mut self, input: Input) -> Vec<Action> {
        if self.path_input.is_some() {
            return self.handle_path_input(input);
        }
        if self.conversation.is_some() {
            return self.handle_chat_input(input);
        }

        return self.handle_documents_input(input);
    }

    fn handle_path_input(&mut self, input: Input) -> Vec<Action> {
        match input {
            Input { key: Key::Esc, .. } => {
                self.path_input = None;
            }
            Input {
                key: Key::Enter, ..
            } => {
                let path = self
                    .path_input
                    .take()
                    .map(|e| return e.lines().join(""))
                    .unwrap_or_default();
                if !path.trim().is_empty() {
                    return vec![Action::InspectFile(path.trim().to_string())];
                }
            }
            input => {
                if let Some(textarea) = self.path_input.as_mut() {
                    textarea.input(input);
                }
            }
        }

        return vec![];
    }

    fn handle_documents_input(&mut self, input: Input) -> Vec<Action> {
        match input {
            Input {
                key: Key::Enter, ..
            } => {
                if self.uploader.input_status == InputStatus::Valid
                    && self.uploader.button_status == ButtonStatus::Ready
                {
                    return self.uploader.upload().into_iter().collect();
                }
                if let Some(route) = self.documents.open_selected() {
                    return self.navigate(route);
                }
            }
            Input { key: Key::Esc, .. } => {
                self.uploader.reset();
            }
            Input {
                key: Key::Char('u'),
                ctrl: false,
                ..
            } => {
                if self.uploader.button_status != ButtonStatus::Uploading {
                    self.path_input = Some(TextArea::with_title("Path to a PDF document"));
                }
            }
            Input {
                key: Key::Char('r'),
                ctrl: false,
                ..
            } => {
                return vec![self.documents.refresh()];
            }
            Input {
                key: Key::Char('d'),
                ctrl: false,
                ..
            } => {
                let document_id = self
                    .documents
                    .selected_document()
                    .map(|e| return e.documentid.to_string());
                if let Some(document_id) = document_id {
                    return self.documents.delete(&document_id).into_iter().collect();
                }
            }
            Input {
                key: Key::Char('s'),
                ctrl: false,
                ..
            } => {
                return vec![Action::SignOut()];
            }
            Input {
                key: Key::Char('q'),
                ctrl: false,
                ..
            } => {
                self.should_quit = true;
            }
            _ => {}
        }

        return vec![];
    }

    fn handle_chat_input(&mut self, input: Input) -> Vec<Action> {
        match input {
            Input { key: Key::Esc, .. } => {
                return self.navigate(Route::Documents);
            }
            Input {
                key: Key::Enter, ..
            } => {
                if let Some(view) = self.conversation.as_mut() {
                    return view.submit().into_iter().collect();
                }
            }
            Input {
                key: Key::Char('t'),
                ctrl: true,
                ..
            } => {
                if let Some(view) = self.conversation.as_mut() {
                    return view.create_conversation().into_iter().collect();
                }
            }
            Input {
                key: Key::Char(c @ ('n' | 'p')),
                ctrl: true,
                ..
            } => {
                let offset = if c == 'n' { 1 } else { -1 };
                if let Some(view) = self.conversation.as_mut() {
                    if let Some(conversation_id) = view.adjacent_conversation(offset) {
                        return view
                            .switch_conversation(&conversation_id)
                            .into_iter()
                            .collect();
                    }
                }
            }
            input => {
                if let Some(view) = self.conversation.as_mut() {
                    view.input(input);
                }
            }
        }

        return vec![];
    }

    /// Hotkeys for the footer of the current screen.
    pub fn hotkeys(&self) -> String {
        if self.path_input.is_some() {
            return "Enter: Select file | Esc: Cancel".to_string();
        }
        if self.conversation.is_some() {
            return "Enter: Send | Ctrl+N/Ctrl+P: Switch conversation | Ctrl+T: New conversation | Esc: Documents | Ctrl+C: Quit".to_string();
        }

        let mut hotkeys = vec!["Up/Down: Select", "Enter: Chat"];
        if self.uploader.input_status == InputStatus::Valid
            && self.uploader.button_status == ButtonStatus::Ready
        {
            hotkeys = vec!["Up/Down: Select", "Enter: Upload"];
        }
        hotkeys.extend(["u: Upload", "d: Delete", "r: Refresh", "s: Sign out", "q: Quit"]);

        return hotkeys.join(" | ");
    }
}
