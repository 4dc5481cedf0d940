/*!
 * # Editing Core Module
 *
 * All changes to a post flow through the [`DocumentStore`].
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the Document Store
 * - The store owns every language version of the post as a plain tree of
 *   sections → columns → blocks
 * - It also tracks which language is being edited and which is previewed
 * - Readers get shared references; nothing outside this module mutates it
 *
 * ### 2. Command-Based Editing
 * - Every edit is a **Command** (`Cmd` enum) applied with `DocumentStore::apply`
 * - Each command returns a `Patch` reporting whether anything changed and the
 *   new document version
 * - Structural no-ops (removing the last column, dropping a block on its own
 *   column) succeed with `changed: false`; only invalid input is an error
 *
 * ### 3. Editing Surfaces Produce Commands
 * - `BlockEditor` holds a typed draft while a block is edited and emits
 *   `Cmd::UpdateBlock` on save
 * - `DragSession` turns a drag from one column to another into
 *   `Cmd::MoveBlock`
 * - `rich_text` edits the HTML of text drafts in place
 *
 * ## Usage Pattern
 *
 * ```rust
 * use postblocks_engine::editing::*;
 * use postblocks_engine::models::BlockKind;
 *
 * let mut store = DocumentStore::default();
 * store.apply(Cmd::AddSection).unwrap();
 *
 * let section = store.current_sections()[0].clone();
 * let patch = store
 *     .apply(Cmd::AddBlock {
 *         section_id: section.id.clone(),
 *         column_id: section.columns[0].id.clone(),
 *         kind: BlockKind::Text,
 *     })
 *     .unwrap();
 * assert!(patch.changed);
 * assert_eq!(patch.version, 2);
 * ```
 */

pub mod block_editor;
pub mod commands;
pub mod document;
pub mod drag;
pub mod error;
pub mod patch;
pub mod rich_text;

pub use block_editor::{
    BlockEditor, Draft, EditorMode, EmbedDraft, EmbedMode, ImageDraft, SelectedFile, TextDraft,
};
pub use commands::Cmd;
pub use document::DocumentStore;
pub use drag::DragSession;
pub use error::EditError;
pub use patch::Patch;
