use crate::AudioSlot;

/// Error type for administration operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Rows per page must be one of 10, 25 or 50, got {0}")]
    RowsPerPage(usize),

    #[error("No test with id '{0}'")]
    UnknownTest(String),

    #[error("No item at index {0}")]
    UnknownItem(usize),

    /// Audio and tag edits only apply to example and training items.
    #[error("Item {0} is not an example")]
    NotAnExample(usize),

    #[error("Item {0} is not a question")]
    NotAQuestion(usize),

    #[error("Item {0} has no tags")]
    NoTags(usize),

    #[error("Item {item} has no audio in slot {slot}")]
    NoSuchAudio { item: usize, slot: AudioSlot },

    #[error("Item {item} has no field {field}")]
    NoSuchField { item: usize, field: usize },

    /// The storage service failed.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
