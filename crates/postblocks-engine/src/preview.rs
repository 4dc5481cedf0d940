//! Reader-facing HTML for one language version.
//!
//! Rendering is a pure projection of the section tree. Text blocks are
//! trusted HTML and are injected as-is; everything else is escaped.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::embed;
use crate::models::{Block, BlockContent, LanguageVersion, Section};
use crate::stats::{DEFAULT_WORDS_PER_MINUTE, calculate_word_count, reading_time_minutes};

/// Alt text used when an image has none
pub const DEFAULT_IMAGE_ALT: &str = "Blog image";
/// Iframe title used when an embed has none
pub const DEFAULT_EMBED_FRAME_TITLE: &str = "Embedded content";
/// Heading shown until the post has a real title
pub const PLACEHOLDER_TITLE: &str = "Your Blog Post Title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub title: Option<String>,
    pub published_on: NaiveDate,
    pub words_per_minute: u32,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            title: None,
            published_on: chrono::Local::now().date_naive(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Grid classes for a section row with `column_count` columns
pub fn grid_class(column_count: usize) -> &'static str {
    match column_count {
        0 | 1 => "grid-cols-1",
        2 => "grid-cols-1 lg:grid-cols-2",
        _ => "grid-cols-1 md:grid-cols-2 lg:grid-cols-3",
    }
}

/// Markup for a single block, or `None` when the block has nothing to show
/// (an image without `src`, an embed without `url`)
pub fn render_block(block: &Block) -> Option<String> {
    match &block.content {
        BlockContent::Text(content) => Some(format!("<div class=\"prose\">{}</div>", content.html)),
        BlockContent::Image(image) => {
            if image.src.is_empty() {
                return None;
            }
            let alt = if image.alt.is_empty() {
                DEFAULT_IMAGE_ALT
            } else {
                &image.alt
            };
            let mut html = format!(
                "<figure><img src=\"{}\" alt=\"{}\">",
                attr(&image.src),
                attr(alt)
            );
            if !image.caption.is_empty() {
                html.push_str(&format!("<figcaption>{}</figcaption>", text(&image.caption)));
            }
            html.push_str("</figure>");
            Some(html)
        }
        BlockContent::Embed(content) => {
            if content.url.is_empty() {
                return None;
            }
            let mut html = String::from("<div class=\"embed\">");
            if !content.title.is_empty() {
                html.push_str(&format!("<h4>{}</h4>", text(&content.title)));
            }
            let title = if content.title.is_empty() {
                DEFAULT_EMBED_FRAME_TITLE
            } else {
                &content.title
            };
            html.push_str(&format!(
                "<iframe src=\"{}\" title=\"{}\" style=\"aspect-ratio: {}\" allowfullscreen></iframe></div>",
                attr(&embed::embed_url(&content.url)),
                attr(title),
                embed::aspect_ratio(content)
            ));
            Some(html)
        }
    }
}

/// The `<article>` body: one grid row per section
pub fn render_sections(sections: &[Section]) -> String {
    let mut html = String::from("<article>");
    for section in sections {
        html.push_str(&format!(
            "<section><div class=\"grid {}\">",
            grid_class(section.columns.len())
        ));
        for column in &section.columns {
            html.push_str("<div class=\"column\">");
            for rendered in column.blocks.iter().filter_map(render_block) {
                html.push_str(&rendered);
            }
            html.push_str("</div>");
        }
        html.push_str("</div></section>");
    }
    html.push_str("</article>");
    html
}

/// A complete preview document with header and footer
pub fn render_preview(language: &LanguageVersion, options: &PreviewOptions) -> String {
    let words = calculate_word_count(&language.sections);
    let minutes = reading_time_minutes(words, options.words_per_minute);
    let title = options
        .title
        .as_deref()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(PLACEHOLDER_TITLE);

    let mut html = format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n",
        attr(&language.code),
        text(title)
    );
    html.push_str(&format!(
        "<header><h1>{}</h1><p>Published on {} • {} min read</p></header>\n",
        text(title),
        options.published_on.format("%Y-%m-%d"),
        minutes
    ));
    html.push_str(&render_sections(&language.sections));
    html.push_str(&format!(
        "\n<footer><p>{} sections • {} words • {} min read</p></footer>\n</body>\n</html>\n",
        language.sections.len(),
        words,
        minutes
    ));
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockId, Column, EmbedContent, ImageContent};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(content: BlockContent) -> Block {
        Block {
            id: BlockId::from("block-1"),
            content,
        }
    }

    #[rstest]
    #[case(1, "grid-cols-1")]
    #[case(2, "grid-cols-1 lg:grid-cols-2")]
    #[case(3, "grid-cols-1 md:grid-cols-2 lg:grid-cols-3")]
    fn test_grid_class(#[case] columns: usize, #[case] expected: &str) {
        assert_eq!(grid_class(columns), expected);
    }

    #[test]
    fn test_text_block_is_injected_raw() {
        let rendered = render_block(&Block::text("<p>Hi <em>there</em></p>"));
        insta::assert_snapshot!(rendered.unwrap(), @r#"<div class="prose"><p>Hi <em>there</em></p></div>"#);
    }

    #[test]
    fn test_image_without_src_is_skipped() {
        let image = block(BlockContent::Image(ImageContent::default()));
        assert_eq!(render_block(&image), None);
    }

    #[test]
    fn test_image_defaults_alt_and_escapes_caption() {
        let image = block(BlockContent::Image(ImageContent {
            src: "/cat.png".to_string(),
            alt: String::new(),
            caption: "Cats & dogs".to_string(),
        }));

        assert_eq!(
            render_block(&image).unwrap(),
            "<figure><img src=\"/cat.png\" alt=\"Blog image\"><figcaption>Cats &amp; dogs</figcaption></figure>"
        );
    }

    #[test]
    fn test_embed_uses_player_url() {
        let embed = block(BlockContent::Embed(EmbedContent {
            title: "Talk".to_string(),
            url: "https://www.youtube.com/watch?v=XYZ123&t=4".to_string(),
            iframe: String::new(),
        }));

        let html = render_block(&embed).unwrap();

        assert!(html.starts_with("<div class=\"embed\"><h4>Talk</h4>"));
        assert!(html.contains("src=\"https://www.youtube.com/embed/XYZ123\""));
        assert!(html.contains("aspect-ratio: 16 / 9"));
    }

    #[test]
    fn test_embed_without_url_is_skipped() {
        let embed = block(BlockContent::Embed(EmbedContent {
            title: "Nothing yet".to_string(),
            ..Default::default()
        }));
        assert_eq!(render_block(&embed), None);
    }

    #[test]
    fn test_render_sections_keeps_column_order() {
        let mut section = Section::new();
        section.columns[0].blocks.push(Block::text("<p>left</p>"));
        let mut right = Column::new();
        right.blocks.push(Block::text("<p>right</p>"));
        section.columns.push(right);

        let html = render_sections(&[section]);

        assert!(html.contains("grid-cols-1 lg:grid-cols-2"));
        let left = html.find("left").unwrap();
        let right = html.find("right").unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_preview_header_and_footer() {
        let mut language = LanguageVersion::english();
        let mut section = Section::new();
        section.columns[0].blocks.push(Block::text("<p>Hello world</p>"));
        language.sections.push(section);
        let options = PreviewOptions {
            title: Some("Launch <day>".to_string()),
            published_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            words_per_minute: 200,
        };

        let html = render_preview(&language, &options);

        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<h1>Launch &lt;day&gt;</h1>"));
        assert!(html.contains("Published on 2024-05-01 • 1 min read"));
        assert!(html.contains("1 sections • 2 words • 1 min read"));
    }

    #[test]
    fn test_preview_without_title_uses_placeholder() {
        let html = render_preview(&LanguageVersion::english(), &PreviewOptions::default());
        assert!(html.contains(PLACEHOLDER_TITLE));
        assert!(html.contains("0 sections • 0 words • 1 min read"));
    }
}
