use std::collections::HashMap;

use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::DisplayMessage;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry {
    mtype: String,
    content: String,
    pending: bool,
    lines: Vec<Line<'static>>,
}

impl BubbleCacheEntry {
    fn matches(&self, entry: &DisplayMessage) -> bool {
        return self.pending == entry.pending
            && self.mtype == entry.message.mtype
            && self.content == entry.message.content();
    }
}

/// Rendered bubbles for a conversation, cached per message position.
#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<usize, BubbleCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

impl BubbleList {
    pub fn set_messages(&mut self, messages: &[DisplayMessage], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.retain(|idx, _| return *idx < messages.len());

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.matches(entry) {
                        return cache_entry.lines.len();
                    }
                }

                let lines = Bubble::new(&entry.message, line_width, entry.pending).as_lines();
                let lines_len = lines.len();
                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        mtype: entry.message.mtype.to_string(),
                        content: entry.message.content().to_string(),
                        pending: entry.pending,
                        lines,
                    },
                );

                return lines_len;
            })
            .sum();
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.lines_len = 0;
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        return indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
