pub mod editing;
pub mod embed;
pub mod io;
pub mod models;
pub mod preview;
pub mod publish;
pub mod stats;

// Re-export key types for easier usage
pub use editing::{Cmd, DocumentStore, EditError, Patch};
pub use io::*;
pub use models::*;
pub use stats::{ContentStats, calculate_word_count};
