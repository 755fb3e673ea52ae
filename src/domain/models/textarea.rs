use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    /// The chat prompt.
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = TextArea::with_title("Ask a question about the document");
        textarea.set_placeholder_text("Enter to send");
        return textarea;
    }

    pub fn with_title(title: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(title.to_string())
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
