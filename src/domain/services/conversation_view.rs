#[cfg(test)]
#[path = "conversation_view_test.rs"]
mod tests;

use chrono::Utc;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::block::Position;
use ratatui::widgets::block::Title;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Frame;
use tui_textarea::Input;

use super::format_datetime;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::Conversation;
use crate::domain::models::ConversationRef;
use crate::domain::models::CreateTicket;
use crate::domain::models::FetchTicket;
use crate::domain::models::Loading;
use crate::domain::models::Message;
use crate::domain::models::PromptTicket;
use crate::domain::models::Route;
use crate::domain::models::Status;
use crate::domain::models::TextArea;

/// A message as it is rendered, pending ones are local previews still
/// waiting for the backend to persist them.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayMessage {
    pub message: Message,
    pub pending: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct PendingMessage {
    request_id: u64,
    /// Request id of the fetch that will carry the persisted message.
    confirmed_by: Option<u64>,
    message: Message,
}

pub struct ConversationView {
    document_id: String,
    conversation_id: String,
    pub loading: Status,
    pub message_status: Status,
    pub conversation_list_status: Status,
    pub error: Option<String>,
    conversation: Option<Conversation>,
    sidebar: Vec<ConversationRef>,
    pending: Vec<PendingMessage>,
    prompt: tui_textarea::TextArea<'static>,
    next_request_id: u64,
    latest_fetch: u64,
    last_applied: u64,
    pending_create: Option<u64>,
    pub bubble_list: BubbleList,
    pub scroll: Scroll,
}

impl ConversationView {
    pub fn new(document_id: &str, conversation_id: &str) -> ConversationView {
        return ConversationView {
            document_id: document_id.to_string(),
            conversation_id: conversation_id.to_string(),
            loading: Status::Idle,
            message_status: Status::Idle,
            conversation_list_status: Status::Idle,
            error: None,
            conversation: None,
            sidebar: vec![],
            pending: vec![],
            prompt: TextArea::default(),
            next_request_id: 0,
            latest_fetch: 0,
            last_applied: 0,
            pending_create: None,
            bubble_list: BubbleList::default(),
            scroll: Scroll::default(),
        };
    }

    fn request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        return self.next_request_id;
    }

    pub fn document_id(&self) -> &str {
        return &self.document_id;
    }

    pub fn conversation_id(&self) -> &str {
        return &self.conversation_id;
    }

    pub fn route(&self) -> Route {
        return Route::chat(&self.document_id, &self.conversation_id);
    }

    pub fn fetch(&mut self) -> Action {
        let request_id = self.request_id();
        self.latest_fetch = request_id;
        self.loading = Status::Loading;

        return Action::FetchConversation(FetchTicket {
            document_id: self.document_id.to_string(),
            conversation_id: self.conversation_id.to_string(),
            request_id,
        });
    }

    pub fn switch_conversation(&mut self, conversation_id: &str) -> Option<Action> {
        if conversation_id == self.conversation_id && self.loaded_conversation().is_some() {
            return None;
        }

        tracing::debug!(
            from = %self.conversation_id,
            to = conversation_id,
            "Switching conversation"
        );
        self.conversation_id = conversation_id.to_string();
        self.pending.clear();
        self.message_status = Status::Idle;
        self.error = None;
        self.scroll = Scroll::default();
        self.bubble_list.clear();

        return Some(self.fetch());
    }

    /// The conversation the view currently shows, if it has been loaded.
    pub fn loaded_conversation(&self) -> Option<&Conversation> {
        return self
            .conversation
            .as_ref()
            .filter(|e| return e.conversationid == self.conversation_id);
    }

    /// Applies a fetched conversation. Returns false when the response was
    /// issued for another conversation or superseded by a newer one.
    pub fn apply_conversation(
        &mut self,
        ticket: FetchTicket,
        res: Result<Conversation, ApiError>,
    ) -> bool {
        if ticket.document_id != self.document_id
            || ticket.conversation_id != self.conversation_id
            || ticket.request_id < self.last_applied
        {
            tracing::debug!(
                document_id = %ticket.document_id,
                conversation_id = %ticket.conversation_id,
                request_id = ticket.request_id,
                "Dropping stale conversation"
            );
            return false;
        }

        if ticket.request_id == self.latest_fetch {
            self.loading = Status::Idle;
        }

        match res {
            Ok(conversation) => {
                self.last_applied = ticket.request_id;
                self.pending.retain(|e| {
                    return !matches!(e.confirmed_by, Some(id) if id <= ticket.request_id);
                });
                self.sidebar = conversation.document.conversations.clone();
                self.conversation = Some(conversation);
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load conversation");
                self.error = Some(err.to_string());
            }
        }

        return true;
    }

    pub fn prompt(&self) -> String {
        return self.prompt.lines().join("\n");
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompt = TextArea::default();
        self.prompt.insert_str(text);
    }

    pub fn input(&mut self, input: Input) {
        self.prompt.input(input);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.prompt.insert_str(text);
    }

    pub fn submit(&mut self) -> Option<Action> {
        if self.message_status.is_loading() {
            return None;
        }

        let prompt = self.prompt();
        if prompt.trim().is_empty() {
            return None;
        }

        let file_name = self.loaded_conversation()?.document.filename.to_string();
        let request_id = self.request_id();
        self.pending.push(PendingMessage {
            request_id,
            confirmed_by: None,
            message: Message::preview(&prompt),
        });
        self.message_status = Status::Loading;
        self.error = None;
        self.scroll.last();

        return Some(Action::PostPrompt(PromptTicket {
            document_id: self.document_id.to_string(),
            conversation_id: self.conversation_id.to_string(),
            file_name,
            prompt,
            request_id,
        }));
    }

    /// Handles a finished prompt post. On success the input is cleared and
    /// the conversation is re-fetched, the persisted messages replace the
    /// local preview once that fetch lands.
    pub fn apply_prompt(&mut self, ticket: PromptTicket, res: Result<(), ApiError>) -> Option<Action> {
        if ticket.document_id != self.document_id || ticket.conversation_id != self.conversation_id {
            return None;
        }
        if !self.pending.iter().any(|e| return e.request_id == ticket.request_id) {
            return None;
        }

        self.message_status = Status::Idle;

        if let Err(err) = res {
            tracing::error!(error = ?err, "Failed to send prompt");
            self.pending.retain(|e| return e.request_id != ticket.request_id);
            self.error = Some(err.to_string());
            return None;
        }

        self.prompt = TextArea::default();
        let action = self.fetch();
        if let Action::FetchConversation(fetch) = &action {
            for entry in self.pending.iter_mut() {
                if entry.request_id == ticket.request_id {
                    entry.confirmed_by = Some(fetch.request_id);
                }
            }
        }

        return Some(action);
    }

    pub fn create_conversation(&mut self) -> Option<Action> {
        if self.conversation_list_status.is_loading() {
            return None;
        }

        let request_id = self.request_id();
        self.conversation_list_status = Status::Loading;
        self.pending_create = Some(request_id);

        return Some(Action::CreateConversation(CreateTicket {
            document_id: self.document_id.to_string(),
            request_id,
        }));
    }

    /// Navigates to a newly created conversation and loads it.
    pub fn apply_created(&mut self, ticket: CreateTicket, res: Result<String, ApiError>) -> Option<Action> {
        if ticket.document_id != self.document_id
            || !self.conversation_list_status.is_loading()
            || self.pending_create != Some(ticket.request_id)
        {
            tracing::debug!(
                document_id = %ticket.document_id,
                request_id = ticket.request_id,
                "Dropping create result this view did not ask for"
            );
            return None;
        }

        self.conversation_list_status = Status::Idle;
        self.pending_create = None;
        let conversation_id = match res {
            Ok(conversation_id) => conversation_id,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to create conversation");
                self.error = Some(err.to_string());
                return None;
            }
        };

        if !self
            .sidebar
            .iter()
            .any(|e| return e.conversationid == conversation_id)
        {
            self.sidebar.push(ConversationRef {
                conversationid: conversation_id.to_string(),
                created: Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            });
        }

        return self.switch_conversation(&conversation_id);
    }

    /// Conversations of the current document, as listed in the sidebar.
    pub fn conversations(&self) -> &[ConversationRef] {
        return &self.sidebar;
    }

    /// Conversation `offset` positions away from the current one in the
    /// sidebar, wrapping around.
    pub fn adjacent_conversation(&self, offset: isize) -> Option<String> {
        if self.sidebar.is_empty() {
            return None;
        }

        let len = self.sidebar.len() as isize;
        let current = self
            .sidebar
            .iter()
            .position(|e| return e.conversationid == self.conversation_id)
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;

        return Some(self.sidebar[next].conversationid.to_string());
    }

    /// Confirmed messages followed by pending previews.
    pub fn messages(&self) -> Vec<DisplayMessage> {
        let mut messages = self
            .loaded_conversation()
            .map(|e| {
                return e
                    .messages
                    .iter()
                    .map(|message| {
                        return DisplayMessage {
                            message: message.clone(),
                            pending: false,
                        };
                    })
                    .collect::<Vec<DisplayMessage>>();
            })
            .unwrap_or_default();

        messages.extend(self.pending.iter().map(|e| {
            return DisplayMessage {
                message: e.message.clone(),
                pending: true,
            };
        }));

        return messages;
    }

    pub fn render(&mut self, frame: &mut Frame, rect: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(20)])
            .split(rect);

        self.render_sidebar(frame, columns[0]);

        let prompt_height = (self.prompt.lines().len() as u16 + 2).clamp(3, 8);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(prompt_height)])
            .split(columns[1]);

        if self.loaded_conversation().is_none() && self.loading.is_loading() {
            Loading::new("Loading conversation...").render(frame, rows[0]);
        } else {
            let mut title = self
                .loaded_conversation()
                .map(|e| return e.document.filename.to_string())
                .unwrap_or_default();
            if self.message_status.is_loading() {
                title = format!("{title} (thinking...)");
            }

            let mut block = Block::default().borders(Borders::ALL).title(title);
            if let Some(err) = &self.error {
                block = block.title(
                    Title::from(Line::from(Span::styled(
                        err.to_string(),
                        Style::default().fg(Color::Red),
                    )))
                    .position(Position::Bottom),
                );
            }
            let inner = block.inner(rows[0]);
            frame.render_widget(block, rows[0]);

            let messages = self.messages();
            let follow = self.scroll.is_at_bottom();
            self.bubble_list.set_messages(&messages, inner.width as usize);
            self.scroll
                .set_state(self.bubble_list.len() as u16, inner.height);
            if follow {
                self.scroll.last();
            }

            self.bubble_list.render(frame, inner, self.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                inner,
                &mut self.scroll.scrollbar_state,
            );
        }

        frame.render_widget(self.prompt.widget(), rows[1]);
    }

    fn render_sidebar(&self, frame: &mut Frame, rect: Rect) {
        let mut title = "Conversations".to_string();
        if self.conversation_list_status.is_loading() {
            title = format!("{title} (creating...)");
        }

        let items = self
            .sidebar
            .iter()
            .map(|e| {
                return ListItem::new(vec![
                    Line::from(Span::styled(
                        e.conversationid.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("  {}", format_datetime(&e.created))),
                ]);
            })
            .collect::<Vec<ListItem>>();

        let mut state = ListState::default();
        state.select(
            self.sidebar
                .iter()
                .position(|e| return e.conversationid == self.conversation_id),
        );

        frame.render_stateful_widget(
            List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            rect,
            &mut state,
        );
    }
}
