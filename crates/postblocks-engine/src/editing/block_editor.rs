use std::ops::Range;
use uuid::Uuid;

use crate::editing::rich_text::{self, Alignment, BlockFormat, InlineMark};
use crate::editing::{Cmd, EditError};
use crate::embed::{self, EmbedInput};
use crate::models::{
    Block, BlockContent, BlockId, ColumnId, EmbedContent, ImageContent, SectionId, TextContent,
};

/// Whether a block shows its committed content or an editable draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Display,
    Editing,
}

/// Rich text being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDraft {
    html: String,
}

impl TextDraft {
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Replace the whole document, as a typing surface would on every change
    pub fn set_html(&mut self, html: impl Into<String>) {
        self.html = html.into();
    }

    pub fn toggle_mark(
        &mut self,
        selection: Range<usize>,
        mark: InlineMark,
    ) -> Result<(), EditError> {
        self.html = rich_text::toggle_mark(&self.html, selection, mark)?;
        Ok(())
    }

    pub fn set_block_format(&mut self, at: usize, format: BlockFormat) -> Result<(), EditError> {
        self.html = rich_text::set_block_format(&self.html, at, format)?;
        Ok(())
    }

    pub fn set_alignment(&mut self, at: usize, alignment: Alignment) -> Result<(), EditError> {
        self.html = rich_text::set_alignment(&self.html, at, alignment)?;
        Ok(())
    }

    pub fn insert_link(
        &mut self,
        selection: Range<usize>,
        url: &str,
        text: &str,
    ) -> Result<(), EditError> {
        self.html = rich_text::insert_link(&self.html, selection, url, text)?;
        Ok(())
    }

    pub fn remove_link(&mut self, at: usize) -> Result<(), EditError> {
        self.html = rich_text::remove_link(&self.html, at)?;
        Ok(())
    }
}

/// A local file chosen for an image block. Only a transient reference is
/// kept; nothing is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDraft {
    pub src: String,
    pub alt: String,
    pub caption: String,
    file: Option<SelectedFile>,
}

impl ImageDraft {
    /// Use a local file as the image source
    pub fn select_file(&mut self, name: &str, media_type: &str) -> Result<(), EditError> {
        if !media_type.starts_with("image/") {
            return Err(EditError::NotAnImage(media_type.to_string()));
        }
        self.src = format!("blob:{}", Uuid::new_v4());
        self.file = Some(SelectedFile {
            name: name.to_string(),
            media_type: media_type.to_string(),
        });
        Ok(())
    }

    pub fn set_url(&mut self, src: impl Into<String>) {
        self.src = src.into();
        self.file = None;
    }

    pub fn clear(&mut self) {
        self.set_url(String::new());
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }
}

/// Which input an embed draft is using
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedMode {
    Url,
    Iframe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedDraft {
    pub title: String,
    pub url: String,
    pub iframe: String,
    mode: EmbedMode,
}

impl EmbedDraft {
    pub fn mode(&self) -> EmbedMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EmbedMode) {
        self.mode = mode;
    }

    /// Take pasted text, switching mode to match it. Returns false when the
    /// text is neither an iframe snippet nor a URL.
    pub fn paste(&mut self, input: &str) -> bool {
        match embed::classify_input(input) {
            Some(EmbedInput::Iframe(snippet)) => {
                self.mode = EmbedMode::Iframe;
                self.iframe = snippet;
                self.url.clear();
                true
            }
            Some(EmbedInput::Url(url)) => {
                self.mode = EmbedMode::Url;
                self.url = url;
                self.iframe.clear();
                true
            }
            None => false,
        }
    }

    /// Live preview markup for the active input
    pub fn preview(&self) -> Option<String> {
        match self.mode {
            EmbedMode::Iframe if !self.iframe.trim().is_empty() => {
                Some(embed::preview_iframe(&self.iframe))
            }
            EmbedMode::Url if !self.url.trim().is_empty() => Some(format!(
                "<iframe src=\"{}\" title=\"{}\" style=\"{}\"></iframe>",
                html_escape::encode_double_quoted_attribute(&embed::embed_url(self.url.trim())),
                html_escape::encode_double_quoted_attribute(&self.title),
                embed::FILL_STYLE
            )),
            _ => None,
        }
    }

    fn commit(&self) -> Result<EmbedContent, EditError> {
        match self.mode {
            EmbedMode::Iframe => {
                let iframe = self.iframe.trim();
                if iframe.is_empty() {
                    return Err(EditError::EmptyEmbed);
                }
                Ok(EmbedContent {
                    title: self.title.clone(),
                    url: embed::extract_iframe_src(iframe).unwrap_or_default(),
                    iframe: iframe.to_string(),
                })
            }
            EmbedMode::Url => {
                let url = self.url.trim();
                if url.is_empty() {
                    return Err(EditError::EmptyEmbed);
                }
                Ok(EmbedContent {
                    title: self.title.clone(),
                    url: url.to_string(),
                    iframe: String::new(),
                })
            }
        }
    }
}

/// Uncommitted edits for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Text(TextDraft),
    Image(ImageDraft),
    Embed(EmbedDraft),
}

impl Draft {
    fn seed(content: &BlockContent) -> Self {
        match content {
            BlockContent::Text(text) => Draft::Text(TextDraft {
                html: text.html.clone(),
            }),
            BlockContent::Image(image) => Draft::Image(ImageDraft {
                src: image.src.clone(),
                alt: image.alt.clone(),
                caption: image.caption.clone(),
                file: None,
            }),
            BlockContent::Embed(content) => Draft::Embed(EmbedDraft {
                title: content.title.clone(),
                url: content.url.clone(),
                iframe: content.iframe.clone(),
                mode: if content.iframe.is_empty() {
                    EmbedMode::Url
                } else {
                    EmbedMode::Iframe
                },
            }),
        }
    }

    fn commit(&self) -> Result<BlockContent, EditError> {
        Ok(match self {
            Draft::Text(text) => BlockContent::Text(TextContent {
                html: text.html.clone(),
            }),
            Draft::Image(image) => BlockContent::Image(ImageContent {
                src: image.src.clone(),
                alt: image.alt.clone(),
                caption: image.caption.clone(),
            }),
            Draft::Embed(content) => BlockContent::Embed(content.commit()?),
        })
    }
}

/// Display/editing state of a single block in a column.
///
/// Saving yields the full replacement content as a [`Cmd::UpdateBlock`] for
/// the store; cancelling drops the draft and keeps the committed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEditor {
    section_id: SectionId,
    column_id: ColumnId,
    block: Block,
    draft: Option<Draft>,
}

impl BlockEditor {
    pub fn new(section_id: SectionId, column_id: ColumnId, block: Block) -> Self {
        Self {
            section_id,
            column_id,
            block,
            draft: None,
        }
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn block_id(&self) -> &BlockId {
        &self.block.id
    }

    pub fn mode(&self) -> EditorMode {
        match self.draft {
            Some(_) => EditorMode::Editing,
            None => EditorMode::Display,
        }
    }

    /// Enter editing mode, seeding a draft from the committed content. An
    /// existing draft is kept.
    pub fn begin_edit(&mut self) -> &mut Draft {
        self.draft
            .get_or_insert_with(|| Draft::seed(&self.block.content))
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Result<&mut Draft, EditError> {
        self.draft.as_mut().ok_or(EditError::NotEditing)
    }

    pub fn text_draft(&mut self) -> Result<&mut TextDraft, EditError> {
        match self.draft_mut()? {
            Draft::Text(draft) => Ok(draft),
            _ => Err(EditError::NotEditing),
        }
    }

    pub fn image_draft(&mut self) -> Result<&mut ImageDraft, EditError> {
        match self.draft_mut()? {
            Draft::Image(draft) => Ok(draft),
            _ => Err(EditError::NotEditing),
        }
    }

    pub fn embed_draft(&mut self) -> Result<&mut EmbedDraft, EditError> {
        match self.draft_mut()? {
            Draft::Embed(draft) => Ok(draft),
            _ => Err(EditError::NotEditing),
        }
    }

    /// Commit the draft and return to display mode. On a validation error
    /// the editor stays in editing mode with the draft intact.
    pub fn save(&mut self) -> Result<Cmd, EditError> {
        let content = self.draft.as_ref().ok_or(EditError::NotEditing)?.commit()?;
        self.draft = None;
        self.block.content = content.clone();
        Ok(Cmd::UpdateBlock {
            section_id: self.section_id.clone(),
            column_id: self.column_id.clone(),
            block_id: self.block.id.clone(),
            content,
        })
    }

    /// Discard the draft, reverting to the committed content
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::DocumentStore;
    use crate::models::BlockKind;
    use pretty_assertions::assert_eq;

    fn editor_for(kind: BlockKind) -> BlockEditor {
        BlockEditor::new(
            SectionId::from("section-1"),
            ColumnId::from("col-1"),
            Block {
                id: BlockId::from("block-1"),
                ..Block::new(kind)
            },
        )
    }

    #[test]
    fn test_text_edit_save_emits_update() {
        let mut editor = editor_for(BlockKind::Text);
        assert_eq!(editor.mode(), EditorMode::Display);

        editor.begin_edit();
        assert_eq!(editor.mode(), EditorMode::Editing);
        let draft = editor.text_draft().unwrap();
        draft.set_html("<p>Hello</p>");
        draft.toggle_mark(3..8, InlineMark::Bold).unwrap();

        let cmd = editor.save().unwrap();

        assert_eq!(editor.mode(), EditorMode::Display);
        let expected = BlockContent::Text(TextContent {
            html: "<p><strong>Hello</strong></p>".to_string(),
        });
        assert_eq!(editor.block().content, expected);
        assert_eq!(
            cmd,
            Cmd::UpdateBlock {
                section_id: SectionId::from("section-1"),
                column_id: ColumnId::from("col-1"),
                block_id: BlockId::from("block-1"),
                content: expected,
            }
        );
    }

    #[test]
    fn test_cancel_reverts_to_committed_content() {
        let mut editor = editor_for(BlockKind::Text);
        let committed = editor.block().content.clone();

        editor.begin_edit();
        editor.text_draft().unwrap().set_html("<p>Scratch</p>");
        editor.cancel();

        assert_eq!(editor.mode(), EditorMode::Display);
        assert_eq!(editor.block().content, committed);
        editor.begin_edit();
        assert_eq!(
            editor.text_draft().unwrap().html(),
            crate::models::block::DEFAULT_TEXT_HTML
        );
    }

    #[test]
    fn test_save_without_edit_fails() {
        let mut editor = editor_for(BlockKind::Image);
        assert_eq!(editor.save(), Err(EditError::NotEditing));
    }

    #[test]
    fn test_image_rejects_non_image_files() {
        let mut editor = editor_for(BlockKind::Image);
        editor.begin_edit();
        let draft = editor.image_draft().unwrap();

        let result = draft.select_file("notes.pdf", "application/pdf");

        assert_eq!(
            result,
            Err(EditError::NotAnImage("application/pdf".to_string()))
        );
        assert!(draft.selected_file().is_none());
    }

    #[test]
    fn test_image_file_becomes_transient_reference() {
        let mut editor = editor_for(BlockKind::Image);
        editor.begin_edit();
        let draft = editor.image_draft().unwrap();
        draft.select_file("cat.png", "image/png").unwrap();
        draft.alt = "A cat".to_string();

        assert_eq!(draft.selected_file().unwrap().name, "cat.png");
        editor.save().unwrap();

        let BlockContent::Image(image) = &editor.block().content else {
            panic!("expected image content");
        };
        assert!(image.src.starts_with("blob:"));
        assert_eq!(image.alt, "A cat");
    }

    #[test]
    fn test_image_url_replaces_file() {
        let mut editor = editor_for(BlockKind::Image);
        editor.begin_edit();
        let draft = editor.image_draft().unwrap();
        draft.select_file("cat.png", "image/png").unwrap();
        draft.set_url("https://example.com/cat.png");

        assert!(draft.selected_file().is_none());
        assert_eq!(draft.src, "https://example.com/cat.png");
    }

    #[test]
    fn test_embed_iframe_save_extracts_url() {
        let mut editor = editor_for(BlockKind::Embed);
        editor.begin_edit();
        let draft = editor.embed_draft().unwrap();
        assert!(draft.paste("<iframe src=\"https://maps.google.com/x\"></iframe>"));
        assert_eq!(draft.mode(), EmbedMode::Iframe);

        editor.save().unwrap();

        assert_eq!(
            editor.block().content,
            BlockContent::Embed(EmbedContent {
                title: "Embed Content".to_string(),
                url: "https://maps.google.com/x".to_string(),
                iframe: "<iframe src=\"https://maps.google.com/x\"></iframe>".to_string(),
            })
        );
    }

    #[test]
    fn test_embed_url_save_clears_iframe() {
        let mut editor = editor_for(BlockKind::Embed);
        editor.begin_edit();
        let draft = editor.embed_draft().unwrap();
        draft.paste("<iframe src=\"https://a.example\"></iframe>");
        draft.set_mode(EmbedMode::Url);
        draft.url = " https://youtu.be/abc ".to_string();

        editor.save().unwrap();

        let BlockContent::Embed(content) = &editor.block().content else {
            panic!("expected embed content");
        };
        assert_eq!(content.url, "https://youtu.be/abc");
        assert_eq!(content.iframe, "");
    }

    #[test]
    fn test_empty_embed_stays_in_edit_mode() {
        let mut editor = editor_for(BlockKind::Embed);
        editor.begin_edit();

        assert_eq!(editor.save(), Err(EditError::EmptyEmbed));
        assert_eq!(editor.mode(), EditorMode::Editing);
    }

    #[test]
    fn test_unrecognised_paste_is_ignored() {
        let mut editor = editor_for(BlockKind::Embed);
        editor.begin_edit();
        let draft = editor.embed_draft().unwrap();

        assert!(!draft.paste("just some words"));
        assert_eq!(draft.mode(), EmbedMode::Url);
        assert_eq!(draft.url, "");
    }

    #[test]
    fn test_saved_content_applies_to_store() {
        let mut store = DocumentStore::default();
        store.apply(Cmd::AddSection).unwrap();
        let section = store.current_sections()[0].clone();
        let column_id = section.columns[0].id.clone();
        store
            .apply(Cmd::AddBlock {
                section_id: section.id.clone(),
                column_id: column_id.clone(),
                kind: BlockKind::Text,
            })
            .unwrap();
        let block = store.current_sections()[0].columns[0].blocks[0].clone();

        let mut editor = BlockEditor::new(section.id, column_id, block);
        editor.begin_edit();
        editor.text_draft().unwrap().set_html("<p>Saved</p>");
        let patch = store.apply(editor.save().unwrap()).unwrap();

        assert!(patch.changed);
        assert_eq!(
            store.current_sections()[0].columns[0].blocks[0],
            *editor.block()
        );
    }
}
