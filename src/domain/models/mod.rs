mod action;
mod api;
mod conversation;
mod credentials;
mod document;
mod error;
mod event;
mod loading;
mod route;
mod status;
mod textarea;
mod ticket;

pub use action::*;
pub use api::*;
pub use conversation::*;
pub use credentials::*;
pub use document::*;
pub use error::*;
pub use event::*;
pub use loading::*;
pub use route::*;
pub use status::*;
pub use textarea::*;
pub use ticket::*;
