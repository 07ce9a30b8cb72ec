// Error taxonomy shared by the registry, the lists and the desktop shell.

use thiserror::Error;

use crate::modules::surface::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// An operation referenced a session id that is not in the registry.
    #[error("session not found: {0}")]
    NotFound(SessionId),

    /// The embedded document's title could not be introspected.
    #[error("title unreadable: {0}")]
    TitleUnreadable(String),

    /// Reading or writing a persisted list failed.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// The embedding surface could not be created or re-pointed.
    #[error("surface failure: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
