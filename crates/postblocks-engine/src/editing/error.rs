use thiserror::Error;

/// Validation failures raised while editing. Structural no-ops (deleting the
/// last column, dropping a block on its own column, ...) are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Language code and name are required")]
    InvalidLanguage,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("A document needs at least one language")]
    NoLanguages,

    #[error("Language code already in use: {0}")]
    LanguageCodeTaken(String),

    #[error("A section needs between 1 and 3 columns, got {0}")]
    ColumnCount(usize),

    #[error("Please select an image file (got {0})")]
    NotAnImage(String),

    #[error("Enter a URL or iframe code to embed")]
    EmptyEmbed,

    #[error("A link needs a URL")]
    EmptyLinkUrl,

    #[error("Selection {start}..{end} is not valid for text of length {len}")]
    InvalidSelection { start: usize, end: usize, len: usize },

    #[error("Block is not being edited")]
    NotEditing,
}
