//! Formatting commands over a text block's HTML.
//!
//! Text blocks store their content as an HTML string. Every command here
//! takes the current HTML plus a byte selection and returns the new HTML,
//! leaving the caller to commit it to the block.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::OnceLock;

use crate::editing::EditError;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr", "source"];

/// Character-level formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InlineMark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
}

impl InlineMark {
    pub fn tag(self) -> &'static str {
        match self {
            InlineMark::Bold => "strong",
            InlineMark::Italic => "em",
            InlineMark::Underline => "u",
            InlineMark::Strike => "s",
            InlineMark::Code => "code",
        }
    }
}

/// Paragraph-level formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockFormat {
    Paragraph,
    /// Heading level, clamped to 1..=3
    Heading(u8),
    BulletList,
    OrderedList,
    Blockquote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    fn css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

fn check_selection(html: &str, selection: &Range<usize>) -> Result<(), EditError> {
    let valid = selection.start <= selection.end
        && selection.end <= html.len()
        && html.is_char_boundary(selection.start)
        && html.is_char_boundary(selection.end);
    if valid {
        Ok(())
    } else {
        Err(EditError::InvalidSelection {
            start: selection.start,
            end: selection.end,
            len: html.len(),
        })
    }
}

/// Wrap the selection in `mark`, or unwrap it when it is already wrapped
/// exactly. An empty selection changes nothing.
pub fn toggle_mark(
    html: &str,
    selection: Range<usize>,
    mark: InlineMark,
) -> Result<String, EditError> {
    check_selection(html, &selection)?;
    if selection.is_empty() {
        return Ok(html.to_string());
    }

    let open = format!("<{}>", mark.tag());
    let close = format!("</{}>", mark.tag());
    let before = &html[..selection.start];
    let selected = &html[selection.clone()];
    let after = &html[selection.end..];

    if let (Some(before), Some(after)) = (before.strip_suffix(&open), after.strip_prefix(&close)) {
        return Ok(format!("{before}{selected}{after}"));
    }
    Ok(format!("{before}{open}{selected}{close}{after}"))
}

/// A top-level node of an HTML fragment
#[derive(Debug, Clone, PartialEq)]
struct Node {
    outer: Range<usize>,
    inner: Range<usize>,
    /// `None` for bare text between elements
    tag: Option<String>,
    attrs: String,
}

impl Node {
    fn format(&self) -> Option<BlockFormat> {
        match self.tag.as_deref()? {
            "p" => Some(BlockFormat::Paragraph),
            "h1" => Some(BlockFormat::Heading(1)),
            "h2" => Some(BlockFormat::Heading(2)),
            "h3" => Some(BlockFormat::Heading(3)),
            "ul" => Some(BlockFormat::BulletList),
            "ol" => Some(BlockFormat::OrderedList),
            "blockquote" => Some(BlockFormat::Blockquote),
            _ => None,
        }
    }

    fn is_textual(&self) -> bool {
        matches!(
            self.format(),
            Some(BlockFormat::Paragraph | BlockFormat::Heading(_))
        )
    }
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").expect("Invalid tag regex")
    })
}

fn push_text(html: &str, range: Range<usize>, nodes: &mut Vec<Node>) {
    if !html[range.clone()].trim().is_empty() {
        nodes.push(Node {
            outer: range.clone(),
            inner: range,
            tag: None,
            attrs: String::new(),
        });
    }
}

/// Split a fragment into its top-level elements and text runs
fn top_level_nodes(html: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut depth = 0usize;
    let mut cursor = 0;
    let mut open: Option<(usize, usize, String, String)> = None;

    for caps in tag_regex().captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        let attrs = caps[3].to_string();
        let self_closing = attrs.trim_end().ends_with('/') || VOID_TAGS.contains(&name.as_str());

        if depth == 0 {
            push_text(html, cursor..whole.start(), &mut nodes);
            cursor = whole.end();
            if closing {
                continue;
            }
            if self_closing {
                nodes.push(Node {
                    outer: whole.range(),
                    inner: whole.end()..whole.end(),
                    tag: Some(name),
                    attrs,
                });
                continue;
            }
            open = Some((whole.start(), whole.end(), name, attrs));
            depth = 1;
        } else if self_closing {
            continue;
        } else if closing {
            depth -= 1;
            if depth == 0 {
                if let Some((start, inner_start, tag, attrs)) = open.take() {
                    nodes.push(Node {
                        outer: start..whole.end(),
                        inner: inner_start..whole.start(),
                        tag: Some(tag),
                        attrs,
                    });
                }
                cursor = whole.end();
            }
        } else {
            depth += 1;
        }
    }

    if let Some((start, inner_start, tag, attrs)) = open.take() {
        nodes.push(Node {
            outer: start..html.len(),
            inner: inner_start..html.len(),
            tag: Some(tag),
            attrs,
        });
    } else {
        push_text(html, cursor..html.len(), &mut nodes);
    }
    nodes
}

fn node_at(nodes: &[Node], at: usize) -> Option<&Node> {
    nodes
        .iter()
        .find(|node| node.outer.start <= at && at <= node.outer.end)
}

/// Unwrap `<p>…</p>` when it is the only thing in `html`
fn strip_paragraph(html: &str) -> String {
    let nodes = top_level_nodes(html);
    match nodes.as_slice() {
        [only] if only.tag.as_deref() == Some("p") => html[only.inner.clone()].to_string(),
        _ => html.to_string(),
    }
}

/// The line contents held by a node, one entry per paragraph or list item
fn block_items(html: &str, node: &Node) -> Vec<String> {
    let inner = &html[node.inner.clone()];
    match node.format() {
        Some(BlockFormat::BulletList | BlockFormat::OrderedList) => top_level_nodes(inner)
            .iter()
            .filter(|child| child.tag.as_deref() == Some("li"))
            .map(|child| strip_paragraph(&inner[child.inner.clone()]))
            .collect(),
        Some(BlockFormat::Blockquote) => {
            let items: Vec<String> = top_level_nodes(inner)
                .iter()
                .map(|child| {
                    if child.is_textual() {
                        inner[child.inner.clone()].to_string()
                    } else {
                        inner[child.outer.clone()].to_string()
                    }
                })
                .collect();
            if items.is_empty() {
                vec![inner.to_string()]
            } else {
                items
            }
        }
        Some(BlockFormat::Paragraph | BlockFormat::Heading(_)) => vec![inner.to_string()],
        None => vec![html[node.outer.clone()].to_string()],
    }
}

fn render_block(format: BlockFormat, items: &[String], attrs: &str) -> String {
    let wrap_each = |open: &str, close: &str| -> String {
        items
            .iter()
            .map(|item| format!("{open}{item}{close}"))
            .collect()
    };

    match format {
        BlockFormat::Paragraph => wrap_each(&format!("<p{attrs}>"), "</p>"),
        BlockFormat::Heading(level) => {
            let level = level.clamp(1, 3);
            wrap_each(&format!("<h{level}{attrs}>"), &format!("</h{level}>"))
        }
        BlockFormat::BulletList => format!("<ul>{}</ul>", wrap_each("<li><p>", "</p></li>")),
        BlockFormat::OrderedList => format!("<ol>{}</ol>", wrap_each("<li><p>", "</p></li>")),
        BlockFormat::Blockquote => {
            format!("<blockquote>{}</blockquote>", wrap_each("<p>", "</p>"))
        }
    }
}

/// Change the format of the top-level block under `at`.
///
/// Applying a heading, list or blockquote format to a block that already
/// has it turns the block back into paragraphs. On an empty fragment a new
/// empty block of the requested format is created.
pub fn set_block_format(html: &str, at: usize, format: BlockFormat) -> Result<String, EditError> {
    check_selection(html, &(at..at))?;

    let nodes = top_level_nodes(html);
    let Some(node) = node_at(&nodes, at) else {
        return Ok(format!("{html}{}", render_block(format, &[String::new()], "")));
    };

    let format = match format {
        BlockFormat::Heading(level) => BlockFormat::Heading(level.clamp(1, 3)),
        other => other,
    };
    let target = if node.format() == Some(format) && format != BlockFormat::Paragraph {
        BlockFormat::Paragraph
    } else {
        format
    };

    let items = block_items(html, node);
    let keep_attrs = node.is_textual()
        && matches!(target, BlockFormat::Paragraph | BlockFormat::Heading(_));
    let attrs = if keep_attrs { node.attrs.as_str() } else { "" };

    Ok(format!(
        "{}{}{}",
        &html[..node.outer.start],
        render_block(target, &items, attrs),
        &html[node.outer.end..]
    ))
}

fn style_attr_regex() -> &'static Regex {
    static STYLE_REGEX: OnceLock<Regex> = OnceLock::new();
    STYLE_REGEX
        .get_or_init(|| Regex::new(r#"\s*style=["'][^"']*["']"#).expect("Invalid style regex"))
}

/// Align the paragraph or heading under `at`. Left alignment is the default
/// and removes the style attribute. Other blocks are left untouched.
pub fn set_alignment(html: &str, at: usize, alignment: Alignment) -> Result<String, EditError> {
    check_selection(html, &(at..at))?;

    let nodes = top_level_nodes(html);
    let Some(node) = node_at(&nodes, at).filter(|node| node.is_textual()) else {
        return Ok(html.to_string());
    };
    let Some(tag) = node.tag.as_deref() else {
        return Ok(html.to_string());
    };

    let attrs = style_attr_regex().replace_all(&node.attrs, "");
    let style = match alignment {
        Alignment::Left => String::new(),
        other => format!(" style=\"text-align: {}\"", other.css()),
    };

    Ok(format!(
        "{}<{tag}{attrs}{style}>{}",
        &html[..node.outer.start],
        &html[node.inner.start..]
    ))
}

/// Turn the selection into a hyperlink, or insert a new linked `text` at
/// the caret when nothing is selected. The URL is required; with neither a
/// selection nor text nothing changes.
pub fn insert_link(
    html: &str,
    selection: Range<usize>,
    url: &str,
    text: &str,
) -> Result<String, EditError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(EditError::EmptyLinkUrl);
    }
    check_selection(html, &selection)?;

    let href = html_escape::encode_double_quoted_attribute(url);
    let before = &html[..selection.start];
    let after = &html[selection.end..];

    if !selection.is_empty() {
        let selected = &html[selection];
        return Ok(format!("{before}<a href=\"{href}\">{selected}</a>{after}"));
    }

    let text = text.trim();
    if text.is_empty() {
        return Ok(html.to_string());
    }
    let label = html_escape::encode_text(text);
    Ok(format!("{before}<a href=\"{href}\">{label}</a>{after}"))
}

fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"(?is)<a\b[^>]*>(.*?)</a>").expect("Invalid link regex"))
}

/// Remove the hyperlink around `at`, keeping its text
pub fn remove_link(html: &str, at: usize) -> Result<String, EditError> {
    check_selection(html, &(at..at))?;

    for caps in link_regex().captures_iter(html) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() <= at && at <= whole.end() {
            return Ok(format!(
                "{}{}{}",
                &html[..whole.start()],
                inner.as_str(),
                &html[whole.end()..]
            ));
        }
    }
    Ok(html.to_string())
}
