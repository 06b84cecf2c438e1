//! Error types for save and economy operations.

use arcadia_common::{ItemId, QuestId};
use thiserror::Error;

/// Errors that can occur in the save system.
#[derive(Debug, Error)]
pub enum SaveError {
    /// IO error from the storage backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization of the aggregate failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An imported or loaded blob is malformed. Prior state is retained.
    #[error("corrupt save data: {0}")]
    CorruptSave(String),

    /// Equip attempted on an item that is not unlocked.
    #[error("item not unlocked: {0}")]
    NotUnlocked(ItemId),

    /// Quest does not exist in the current daily list.
    #[error("quest not found: {0}")]
    QuestNotFound(QuestId),

    /// Quest reward was already paid out.
    #[error("quest already claimed: {0}")]
    QuestAlreadyClaimed(QuestId),

    /// Quest progress has not reached its target.
    #[error("quest incomplete: {0}")]
    QuestIncomplete(QuestId),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;
