#[cfg(test)]
#[path = "uploader_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::fs;

use super::format_filesize;
use crate::domain::models::Action;
use crate::domain::models::ApiError;
use crate::domain::models::ButtonStatus;
use crate::domain::models::InputStatus;
use crate::domain::models::SelectedFile;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Reads what the uploader needs to know about a local file.
pub async fn inspect_file(path: &str) -> Result<SelectedFile> {
    let path = PathBuf::from(path.trim());
    let metadata = fs::metadata(&path).await?;

    return Ok(SelectedFile::from_path(path, metadata.len()));
}

#[derive(Default)]
pub struct Uploader {
    pub input_status: InputStatus,
    pub button_status: ButtonStatus,
    pub selected_file: Option<SelectedFile>,
    pub error: Option<String>,
}

impl Uploader {
    /// Accepts a file only when it is declared as a PDF. Anything else is
    /// dropped and the uploader stays at `idle`.
    pub fn select(&mut self, file: SelectedFile) -> bool {
        if self.button_status == ButtonStatus::Uploading {
            return false;
        }

        if file.content_type != PDF_CONTENT_TYPE {
            tracing::debug!(
                file = %file.name,
                content_type = %file.content_type,
                "Rejected non PDF file"
            );
            self.selected_file = None;
            self.input_status = InputStatus::Idle;
            return false;
        }

        self.selected_file = Some(file);
        self.input_status = InputStatus::Valid;
        self.button_status = ButtonStatus::Ready;
        self.error = None;

        return true;
    }

    pub fn upload(&mut self) -> Option<Action> {
        if self.input_status != InputStatus::Valid || self.button_status != ButtonStatus::Ready {
            return None;
        }

        let file = self.selected_file.clone()?;
        self.button_status = ButtonStatus::Uploading;
        self.error = None;

        return Some(Action::UploadDocument(file));
    }

    /// Returns true exactly once per upload, when the parent should be told
    /// a new document exists.
    pub fn apply_upload(&mut self, res: Result<(), ApiError>) -> bool {
        if self.button_status != ButtonStatus::Uploading {
            return false;
        }

        match res {
            Ok(_) => {
                self.button_status = ButtonStatus::Success;
                return true;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to upload document");
                self.button_status = ButtonStatus::Ready;
                self.error = Some(err.to_string());
                return false;
            }
        }
    }

    /// Cancel, or "upload another document" after a success. Not available
    /// while an upload is in flight.
    pub fn reset(&mut self) -> bool {
        if self.button_status == ButtonStatus::Uploading {
            return false;
        }

        self.selected_file = None;
        self.input_status = InputStatus::Idle;
        self.button_status = ButtonStatus::Ready;
        self.error = None;

        return true;
    }

    pub fn lines(&self) -> Vec<String> {
        let file = match (&self.input_status, &self.selected_file) {
            (InputStatus::Valid, Some(file)) => file,
            _ => {
                return vec![
                    "Press u to upload your document".to_string(),
                    "Only .pdf accepted".to_string(),
                ];
            }
        };

        let actions = match self.button_status {
            ButtonStatus::Ready => "Enter: Upload document | Esc: Cancel",
            ButtonStatus::Uploading => "Uploading...",
            ButtonStatus::Success => "Upload successful! | Esc: Upload another document",
        };

        return vec![
            format!("{} ({})", file.name, format_filesize(file.size)),
            actions.to_string(),
        ];
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        let mut lines = self
            .lines()
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                if idx == 0 {
                    return Line::from(Span::styled(
                        line,
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                }
                return Line::from(line);
            })
            .collect::<Vec<Line>>();

        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Add document")),
            rect,
        );
    }
}
