//! Recognition and rewriting of embeddable content.
//!
//! Authors paste either a page URL or a ready-made `<iframe>` snippet. URLs
//! from a few well-known hosts are rewritten into their player form; iframe
//! snippets are rewritten to fill the block responsively.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::EmbedContent;

/// Inline style that makes an iframe fill its container
pub const FILL_STYLE: &str = "width: 100%; height: 100%; border: 0;";

/// What a pasted string looks like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedInput {
    Iframe(String),
    Url(String),
}

/// Classify pasted text. An `<iframe` substring wins over an `http`
/// substring; anything else is unrecognised.
pub fn classify_input(input: &str) -> Option<EmbedInput> {
    if input.contains("<iframe") {
        Some(EmbedInput::Iframe(input.to_string()))
    } else if input.contains("http") {
        Some(EmbedInput::Url(input.to_string()))
    } else {
        None
    }
}

/// Rewrite a page URL into an embeddable player URL.
///
/// Handles YouTube watch and short links, Vimeo and CodePen pens. Other URLs
/// are assumed to be embeddable already and pass through unchanged.
pub fn embed_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    if url.contains("youtube.com/watch") {
        return match after(url, "v=").and_then(|rest| first_segment(rest, '&')) {
            Some(id) => format!("https://www.youtube.com/embed/{id}"),
            None => url.to_string(),
        };
    }

    if url.contains("youtu.be/") {
        return match after(url, "youtu.be/").and_then(|rest| first_segment(rest, '?')) {
            Some(id) => format!("https://www.youtube.com/embed/{id}"),
            None => url.to_string(),
        };
    }

    if url.contains("vimeo.com/") {
        return match after(url, "vimeo.com/").and_then(|rest| first_segment(rest, '?')) {
            Some(id) => format!("https://player.vimeo.com/video/{id}"),
            None => url.to_string(),
        };
    }

    if url.contains("codepen.io/") && url.contains("/pen/") {
        return url.replacen("/pen/", "/embed/", 1);
    }

    url.to_string()
}

fn after<'a>(haystack: &'a str, needle: &str) -> Option<&'a str> {
    haystack.find(needle).map(|pos| &haystack[pos + needle.len()..])
}

fn first_segment(rest: &str, separator: char) -> Option<&str> {
    let id = rest.split(separator).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

fn src_regex() -> &'static Regex {
    static SRC_REGEX: OnceLock<Regex> = OnceLock::new();
    SRC_REGEX.get_or_init(|| Regex::new(r#"(?i)src=["']([^"']+)["']"#).expect("Invalid src regex"))
}

/// The first `src` attribute of an iframe snippet
pub fn extract_iframe_src(snippet: &str) -> Option<String> {
    src_regex()
        .captures(snippet)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

struct IframeRewrites {
    width: Regex,
    height: Regex,
    style: Regex,
    open_tag: Regex,
}

fn iframe_rewrites() -> &'static IframeRewrites {
    static REWRITES: OnceLock<IframeRewrites> = OnceLock::new();
    REWRITES.get_or_init(|| IframeRewrites {
        width: Regex::new(r#"(?i)width=["'][^"']*["']"#).expect("Invalid width regex"),
        height: Regex::new(r#"(?i)height=["'][^"']*["']"#).expect("Invalid height regex"),
        style: Regex::new(r#"(?i)style=["'][^"']*["']"#).expect("Invalid style regex"),
        open_tag: Regex::new(r"(?i)<iframe").expect("Invalid iframe regex"),
    })
}

/// Rewrite an iframe snippet so it fills its container: `width`/`height`
/// become `100%`, any `style` becomes the fill style, and the fill style is
/// also injected right after every `<iframe`.
pub fn responsive_iframe(snippet: &str) -> String {
    let rewrites = iframe_rewrites();
    let fill = format!("style=\"{FILL_STYLE}\"");

    let html = rewrites.width.replace_all(snippet, "width=\"100%\"");
    let html = rewrites.height.replace_all(&html, "height=\"100%\"");
    let html = rewrites.style.replace_all(&html, fill.as_str());
    rewrites
        .open_tag
        .replace_all(&html, format!("<iframe {fill}").as_str())
        .into_owned()
}

/// Width-only rewrite used for the live preview inside the editor
pub fn preview_iframe(snippet: &str) -> String {
    let rewrites = iframe_rewrites();
    let html = rewrites.width.replace_all(snippet, "width=\"100%\"");
    rewrites
        .height
        .replace_all(&html, "height=\"100%\"")
        .into_owned()
}

/// CSS aspect ratio suited to the embedded content
pub fn aspect_ratio(content: &EmbedContent) -> &'static str {
    let is_map = |s: &str| s.contains("maps.google") || s.contains("openstreetmap");
    if is_map(&content.iframe) || is_map(&content.url) {
        return "16 / 10";
    }

    let social = ["twitter.com", "instagram.com", "facebook.com"];
    if social.iter().any(|host| content.iframe.contains(host)) {
        return "auto";
    }

    "16 / 9"
}
