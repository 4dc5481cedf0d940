pub mod block;
pub mod ids;
pub mod language;
pub mod layout;

pub use block::{
    Block, BlockContent, BlockKind, EmbedContent, EmbedSource, ImageContent, TextContent,
};
pub use ids::{BlockId, ColumnId, SectionId};
pub use language::{
    COMMON_LANGUAGES, CommonLanguage, LanguageVersion, available_languages, find_common_language,
};
pub use layout::{Column, MAX_COLUMNS, MIN_COLUMNS, Section};
