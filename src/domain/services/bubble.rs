#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    pending: bool,
}

pub struct BubbleConfig {
    /// `│ ` and ` │` around each line.
    pub bubble_padding: usize,
    /// Scrollbar column.
    pub scrollbar_width: usize,
    pub outer_padding_percentage: f32,
}

fn label(message: &Message, pending: bool) -> String {
    match (message.author(), pending) {
        (Author::User, true) => return "You (sending...)".to_string(),
        (Author::User, false) => return "You".to_string(),
        (Author::Assistant, _) => return "DocChat".to_string(),
    }
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, window_max_width: usize, pending: bool) -> Bubble<'a> {
        let mut alignment = BubbleAlignment::Left;
        if message.author() == Author::User {
            alignment = BubbleAlignment::Right;
        }

        return Bubble {
            alignment,
            message,
            window_max_width,
            pending,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            bubble_padding: 4,
            scrollbar_width: 1,
            outer_padding_percentage: 0.04,
        };
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        let min_outer_padding = (self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil() as usize;
        let available = self.window_max_width.saturating_sub(
            style_config.bubble_padding + style_config.scrollbar_width + min_outer_padding,
        );

        let mut max_line_length = self
            .message
            .content()
            .replace('\t', "  ")
            .lines()
            .map(|line| return line.chars().count())
            .max()
            .unwrap_or(0)
            .min(available);

        let label_len = label(self.message, self.pending).chars().count();
        if max_line_length < label_len {
            max_line_length = label_len;
        }

        return max_line_length.max(1);
    }

    fn style(&self) -> Style {
        if self.pending {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC);
        }
        if self.message.author() == Author::Assistant {
            return Style::default().fg(Color::Magenta);
        }

        return Style::default();
    }

    fn pad(&self, bubble_line: String, bubble_width: usize) -> Line<'static> {
        let outer = " ".repeat(self.window_max_width.saturating_sub(bubble_width));
        let styled = Span::styled(bubble_line, self.style());

        if self.alignment == BubbleAlignment::Left {
            return Line::from(vec![styled, Span::from(outer)]);
        }

        return Line::from(vec![Span::from(outer), styled]);
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let bubble_width = max_line_length + Bubble::style_config().bubble_padding;
        let name = label(self.message, self.pending);

        let inner_bar = "─".repeat(max_line_length + 2 - name.chars().count());
        let mut lines = vec![self.pad(format!("╭{name}{inner_bar}╮"), bubble_width)];

        for line in self.message.as_string_lines(max_line_length) {
            let fill = " ".repeat(max_line_length.saturating_sub(line.chars().count()));
            lines.push(self.pad(format!("│ {line}{fill} │"), bubble_width));
        }

        let bottom_bar = "─".repeat(max_line_length + 2);
        lines.push(self.pad(format!("╰{bottom_bar}╯"), bubble_width));

        return lines;
    }
}
