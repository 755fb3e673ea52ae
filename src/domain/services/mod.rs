pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod conversation_view;
mod document_list;
pub mod events;
mod format;
mod scroll;
mod uploader;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation_view::*;
pub use document_list::*;
pub use format::*;
pub use scroll::*;
pub use uploader::*;
