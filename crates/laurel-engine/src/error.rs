//! Error types for the engagement engine

use laurel_core::{ActionKey, BadgeId, QuestKind, UserId};
use laurel_store::{QUEST_SET_COLLECTION, USER_COLLECTION};
use thiserror::Error;

/// Engine error type
///
/// `AlreadyAwarded` is an expected idempotence signal callers match on,
/// not a failure. `Store` wraps transport and transaction errors from the
/// underlying store; those propagate hard, since the engine cannot tell
/// whether the write applied.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("User already exists: {0}")]
    UserAlreadyExists(UserId),

    #[error("Quest set not found: {0}")]
    QuestSetNotFound(String),

    #[error("Badge not found: {0}")]
    BadgeNotFound(BadgeId),

    #[error("Badge already awarded: {0}")]
    AlreadyAwarded(BadgeId),

    #[error("Unknown action key: {0}")]
    UnknownAction(ActionKey),

    #[error("Unknown quest kind: {0}")]
    UnknownQuestKind(QuestKind),

    #[error("Store error: {0}")]
    Store(laurel_store::Error),
}

impl Error {
    /// Whether this is the expected duplicate-award signal
    pub fn is_already_awarded(&self) -> bool {
        matches!(self, Error::AlreadyAwarded(_))
    }

    /// Whether this is any missing-record error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UserNotFound(_) | Error::QuestSetNotFound(_) | Error::BadgeNotFound(_)
        )
    }
}

impl From<laurel_store::Error> for Error {
    fn from(err: laurel_store::Error) -> Self {
        match err {
            laurel_store::Error::NotFound { collection, key } if collection == USER_COLLECTION => {
                Error::UserNotFound(UserId::new(key))
            }
            laurel_store::Error::NotFound { collection, key }
                if collection == QUEST_SET_COLLECTION =>
            {
                Error::QuestSetNotFound(key)
            }
            laurel_store::Error::AlreadyExists { collection, key }
                if collection == USER_COLLECTION =>
            {
                Error::UserAlreadyExists(UserId::new(key))
            }
            other => Error::Store(other),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
