#[cfg(test)]
#[path = "document_list_test.rs"]
mod tests;

use std::collections::HashSet;

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
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::format_datetime;
use super::format_filesize;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::DeleteStatus;
use crate::domain::models::Document;
use crate::domain::models::DocumentStatus;
use crate::domain::models::Loading;
use crate::domain::models::Route;
use crate::domain::models::Status;

/// What the list area shows, derived from status and contents.
#[derive(Debug, PartialEq, Eq)]
pub enum ListPlaceholder {
    NothingHereYet,
    Loading,
    Documents,
}

#[derive(Default)]
pub struct DocumentList {
    pub status: Status,
    pub documents: Vec<Document>,
    pub error: Option<String>,
    pub selected: usize,
    deleting: HashSet<String>,
    generation: u64,
}

impl DocumentList {
    /// Starts a (re)load. Responses from earlier generations are dropped.
    pub fn refresh(&mut self) -> Action {
        self.generation += 1;
        self.status = Status::Loading;

        return Action::ListDocuments(self.generation);
    }

    /// Replaces the list with the backend's answer. Returns false when the
    /// response was stale and ignored.
    pub fn apply_list(&mut self, generation: u64, res: Result<Vec<Document>, ApiError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "Dropping stale document list"
            );
            return false;
        }

        self.status = Status::Idle;
        match res {
            Ok(documents) => {
                self.documents = documents;
                self.error = None;
                if self.selected >= self.documents.len() {
                    self.selected = self.documents.len().saturating_sub(1);
                }
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to list documents");
                self.error = Some(err.to_string());
            }
        }

        return true;
    }

    pub fn delete_status(&self, document_id: &str) -> DeleteStatus {
        if self.deleting.contains(document_id) {
            return DeleteStatus::Deleting;
        }

        return DeleteStatus::Idle;
    }

    /// Requests removal of a document. Only ready documents can be deleted.
    pub fn delete(&mut self, document_id: &str) -> Option<Action> {
        let document = self
            .documents
            .iter()
            .find(|e| return e.documentid == document_id)?;

        if !document.can_delete() || self.deleting.contains(document_id) {
            return None;
        }

        self.deleting.insert(document_id.to_string());
        return Some(Action::DeleteDocument(document_id.to_string()));
    }

    /// Handles a finished delete. The list is never spliced locally, a
    /// successful delete asks for a reload instead.
    pub fn apply_delete(&mut self, document_id: &str, res: Result<(), ApiError>) -> Option<Action> {
        self.deleting.remove(document_id);

        if let Err(err) = res {
            tracing::error!(error = ?err, document_id, "Failed to delete document");
            self.error = Some(err.to_string());
            return None;
        }

        return Some(self.refresh());
    }

    pub fn placeholder(&self) -> ListPlaceholder {
        if !self.documents.is_empty() {
            return ListPlaceholder::Documents;
        }
        if self.status == Status::Loading {
            return ListPlaceholder::Loading;
        }

        return ListPlaceholder::NothingHereYet;
    }

    pub fn selected_document(&self) -> Option<&Document> {
        return self.documents.get(self.selected);
    }

    /// Route of the selected document's first conversation.
    pub fn open_selected(&self) -> Option<Route> {
        let document = self.selected_document()?;
        let conversation = document.default_conversation()?;

        return Some(Route::chat(
            &document.documentid,
            &conversation.conversationid,
        ));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.documents.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn document_lines(&self, document: &Document) -> Vec<String> {
        let mut status = document.docstatus.label().to_string();
        if document.can_delete() {
            status = format!("{status} (d to delete)");
        }
        if self.delete_status(&document.documentid) == DeleteStatus::Deleting {
            status = "Deleting...".to_string();
        }

        return vec![
            document.filename.to_string(),
            format!(
                "  {} pages | {} | {}",
                document.pages,
                format_filesize(document.size_in_bytes()),
                format_datetime(&document.created)
            ),
            format!("  {status}"),
        ];
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        let mut title = "My documents".to_string();
        if self.status == Status::Loading {
            title = format!("{title} (refreshing...)");
        }
        let block = Block::default().borders(Borders::ALL).title(title);

        match self.placeholder() {
            ListPlaceholder::Loading => {
                Loading::default().render(frame, rect);
                return;
            }
            ListPlaceholder::NothingHereYet => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "There's nothing here yet...",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from("Upload your first document to get started!"),
                ];
                if let Some(err) = &self.error {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        err.to_string(),
                        Style::default().fg(Color::Red),
                    )));
                }
                frame.render_widget(Paragraph::new(lines).block(block), rect);
                return;
            }
            ListPlaceholder::Documents => {}
        }

        let items = self
            .documents
            .iter()
            .map(|document| {
                let colour = match document.docstatus {
                    DocumentStatus::Ready => Color::Green,
                    DocumentStatus::Processing => Color::Blue,
                    _ => Color::Gray,
                };
                let lines = self
                    .document_lines(document)
                    .into_iter()
                    .enumerate()
                    .map(|(idx, line)| {
                        if idx == 0 {
                            return Line::from(Span::styled(
                                line,
                                Style::default().add_modifier(Modifier::BOLD),
                            ));
                        }
                        if idx == 2 {
                            return Line::from(Span::styled(line, Style::default().fg(colour)));
                        }
                        return Line::from(line);
                    })
                    .collect::<Vec<Line>>();

                return ListItem::new(lines);
            })
            .collect::<Vec<ListItem>>();

        let mut block = block;
        if let Some(err) = &self.error {
            block = block.title(
                Title::from(Line::from(Span::styled(
                    err.to_string(),
                    Style::default().fg(Color::Red),
                )))
                .position(Position::Bottom),
            );
        }

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(
            List::new(items)
                .block(block)
                .highlight_symbol("> ")
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            rect,
            &mut state,
        );
    }
}
