use serde::{Deserialize, Serialize};

use crate::models::BlockId;

/// Placeholder shown by freshly added text blocks
pub const DEFAULT_TEXT_HTML: &str = "<p>Start writing...</p>";
/// Placeholder image used until the author picks a real one
pub const PLACEHOLDER_IMAGE_SRC: &str = "/placeholder.svg?height=200&width=300&text=Add+Image";
/// Title given to new embed blocks
pub const DEFAULT_EMBED_TITLE: &str = "Embed Content";

/// The three kinds of content a block can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
    Embed,
}

/// Rich text serialized as trusted HTML
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

/// Embedded third-party content, either by URL or by a pasted iframe snippet.
///
/// When `iframe` is non-empty it is authoritative and `url` only mirrors the
/// snippet's `src` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedContent {
    pub title: String,
    pub url: String,
    pub iframe: String,
}

/// The authoritative source of an embed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedSource<'a> {
    Iframe(&'a str),
    Url(&'a str),
}

impl EmbedContent {
    pub fn source(&self) -> Option<EmbedSource<'_>> {
        if !self.iframe.is_empty() {
            Some(EmbedSource::Iframe(&self.iframe))
        } else if !self.url.is_empty() {
            Some(EmbedSource::Url(&self.url))
        } else {
            None
        }
    }
}

/// Type-specific payload of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockContent {
    Text(TextContent),
    Image(ImageContent),
    Embed(EmbedContent),
}

impl BlockContent {
    /// Content a newly added block of `kind` starts with
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => BlockContent::Text(TextContent {
                html: DEFAULT_TEXT_HTML.to_string(),
            }),
            BlockKind::Image => BlockContent::Image(ImageContent {
                src: PLACEHOLDER_IMAGE_SRC.to_string(),
                ..Default::default()
            }),
            BlockKind::Embed => BlockContent::Embed(EmbedContent {
                title: DEFAULT_EMBED_TITLE.to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Embed(_) => BlockKind::Embed,
        }
    }
}

/// Smallest unit of content inside a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
}

impl Block {
    /// Create a block with a fresh id and the default content for `kind`
    pub fn new(kind: BlockKind) -> Self {
        Self::with_content(BlockContent::default_for(kind))
    }

    pub fn with_content(content: BlockContent) -> Self {
        Self {
            id: BlockId::generate(),
            content,
        }
    }

    pub fn text(html: impl Into<String>) -> Self {
        Self::with_content(BlockContent::Text(TextContent { html: html.into() }))
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

/// Wire shape of a block: `{"id", "type", "content"}`
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockKind,
    #[serde(default)]
    content: serde_json::Value,
}

impl TryFrom<RawBlock> for Block {
    type Error = serde_json::Error;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        // Blocks saved before a payload existed carry `null` content
        let value = match raw.content {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        let content = match raw.kind {
            BlockKind::Text => BlockContent::Text(serde_json::from_value(value)?),
            BlockKind::Image => BlockContent::Image(serde_json::from_value(value)?),
            BlockKind::Embed => BlockContent::Embed(serde_json::from_value(value)?),
        };
        Ok(Block {
            id: raw.id,
            content,
        })
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        let kind = block.kind();
        let content = match block.content {
            BlockContent::Text(text) => serde_json::to_value(text),
            BlockContent::Image(image) => serde_json::to_value(image),
            BlockContent::Embed(embed) => serde_json::to_value(embed),
        }
        .unwrap_or(serde_json::Value::Null);
        RawBlock {
            id: block.id,
            kind,
            content,
        }
    }
}
