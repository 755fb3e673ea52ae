#[cfg(test)]
#[path = "route_test.rs"]
mod tests;

use std::fmt;

use anyhow::bail;
use anyhow::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`, the document list and uploader.
    Documents,
    /// `/doc/{document_id}/{conversation_id}`.
    Chat {
        document_id: String,
        conversation_id: String,
    },
}

impl Route {
    pub fn chat(document_id: &str, conversation_id: &str) -> Route {
        return Route::Chat {
            document_id: document_id.to_string(),
            conversation_id: conversation_id.to_string(),
        };
    }

    pub fn parse(path: &str) -> Result<Route> {
        let segments = path
            .trim()
            .split('/')
            .filter(|e| return !e.is_empty())
            .collect::<Vec<&str>>();

        if segments.is_empty() {
            return Ok(Route::Documents);
        }

        if segments.len() == 3 && segments[0] == "doc" {
            return Ok(Route::chat(segments[1], segments[2]));
        }

        bail!(format!(
            "Unknown route '{path}'. Expected '/' or '/doc/DOCUMENT_ID/CONVERSATION_ID'"
        ));
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Documents => return write!(f, "/"),
            Route::Chat {
                document_id,
                conversation_id,
            } => return write!(f, "/doc/{document_id}/{conversation_id}"),
        }
    }
}
