#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::Document;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    pub content: String,
    #[serde(default)]
    pub example: bool,
    #[serde(default)]
    pub additional_kwargs: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub mtype: String,
    pub data: MessageData,
}

impl Message {
    /// Local-only preview of a prompt the user just submitted.
    pub fn preview(prompt: &str) -> Message {
        return Message {
            mtype: "text".to_string(),
            data: MessageData {
                content: prompt.to_string(),
                example: false,
                additional_kwargs: Map::new(),
            },
        };
    }

    pub fn author(&self) -> Author {
        if self.mtype == "human" || self.mtype == "text" {
            return Author::User;
        }

        return Author::Assistant;
    }

    pub fn content(&self) -> &str {
        return &self.data.content;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let text = self.data.content.replace('\t', "  ");

        for full_line in text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if !current_lines.is_empty() && word.len() + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word.len() + 1;
                } else {
                    current_lines.push(word);
                    char_count += word.len() + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversationid: String,
    pub document: Document,
    #[serde(default)]
    pub messages: Vec<Message>,
}
