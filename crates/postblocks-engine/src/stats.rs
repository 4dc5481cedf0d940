//! Word counts, reading time and block tallies shown around the editor.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::models::{BlockContent, BlockKind, Section};

/// Reading speed used when no other is configured
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

fn block_boundary_regex() -> &'static Regex {
    static BLOCK_BOUNDARY_REGEX: OnceLock<Regex> = OnceLock::new();
    BLOCK_BOUNDARY_REGEX.get_or_init(|| {
        Regex::new(r"(?i)</?(p|h[1-6]|li|ul|ol|blockquote|pre|div|br|hr|figure|figcaption)\b[^>]*>")
            .expect("Invalid block boundary regex")
    })
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

/// Count the words of one HTML fragment: tags removed, split on whitespace,
/// empty tokens dropped. Block-level tags separate words; inline tags do not.
pub fn count_html_words(html: &str) -> usize {
    let spaced = block_boundary_regex().replace_all(html, " ");
    let text = tag_regex().replace_all(&spaced, "");
    whitespace_regex()
        .split(&text)
        .filter(|word| !word.is_empty())
        .count()
}

/// Total words across every text block of `sections`. Image and embed
/// blocks never contribute.
pub fn calculate_word_count(sections: &[Section]) -> usize {
    sections
        .iter()
        .flat_map(|section| section.blocks())
        .map(|block| match &block.content {
            BlockContent::Text(text) => count_html_words(&text.html),
            BlockContent::Image(_) | BlockContent::Embed(_) => 0,
        })
        .sum()
}

/// Minutes needed to read `words`, rounded up and never below one
pub fn reading_time_minutes(words: usize, words_per_minute: u32) -> usize {
    let wpm = words_per_minute.max(1) as usize;
    words.div_ceil(wpm).max(1)
}

/// Summary figures for one section list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub sections: usize,
    pub words: usize,
    pub images: usize,
    pub embeds: usize,
}

impl ContentStats {
    pub fn of(sections: &[Section]) -> Self {
        let count_kind = |kind: BlockKind| {
            sections
                .iter()
                .flat_map(|section| section.blocks())
                .filter(|block| block.kind() == kind)
                .count()
        };

        Self {
            sections: sections.len(),
            words: calculate_word_count(sections),
            images: count_kind(BlockKind::Image),
            embeds: count_kind(BlockKind::Embed),
        }
    }

    pub fn reading_time(&self, words_per_minute: u32) -> usize {
        reading_time_minutes(self.words, words_per_minute)
    }
}
