#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state = self.scrollbar_state.position(self.position.into());
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.viewport_length.max(1));
        self.scrollbar_state = self.scrollbar_state.position(self.position.into());
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position.into());
    }

    pub fn down_page(&mut self) {
        self.position = self
            .position
            .saturating_add(self.viewport_length.max(1))
            .min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position.into());
    }

    /// Jump to the newest messages.
    pub fn last(&mut self) {
        self.position = self.max_position();
        self.scrollbar_state = self.scrollbar_state.position(self.position.into());
    }

    pub fn is_at_bottom(&self) -> bool {
        return self.position >= self.max_position();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length.into())
            .viewport_content_length(viewport_length.into())
            .position(self.position.into());
    }
}
