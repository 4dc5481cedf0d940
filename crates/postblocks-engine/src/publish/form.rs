use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::publish::PublishMetadata;

/// Whether the post goes live immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishFormError {
    #[error("Please enter a title")]
    MissingTitle,
}

struct SlugRegexes {
    disallowed: Regex,
    whitespace: Regex,
    dashes: Regex,
}

fn slug_regexes() -> &'static SlugRegexes {
    static SLUG_REGEXES: OnceLock<SlugRegexes> = OnceLock::new();
    SLUG_REGEXES.get_or_init(|| SlugRegexes {
        disallowed: Regex::new(r"[^a-z0-9\s-]").expect("Invalid slug character regex"),
        whitespace: Regex::new(r"\s+").expect("Invalid slug whitespace regex"),
        dashes: Regex::new(r"-+").expect("Invalid slug dash regex"),
    })
}

/// URL-friendly form of a title: lowercase ASCII letters, digits and dashes
pub fn generate_slug(title: &str) -> String {
    let regexes = slug_regexes();
    let lower = title.to_lowercase();
    let kept = regexes.disallowed.replace_all(&lower, "");
    let dashed = regexes.whitespace.replace_all(&kept, "-");
    regexes.dashes.replace_all(&dashed, "-").trim().to_string()
}

/// Metadata entered before publishing.
///
/// The slug follows the title until the author edits it to something else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishForm {
    title: String,
    slug: String,
    pub excerpt: String,
    tags: Vec<String>,
    pub category: String,
    pub featured_image: String,
    pub status: PostStatus,
}

impl PublishForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.slug.is_empty() || self.slug == generate_slug(&self.title) {
            self.slug = generate_slug(&title);
        }
        self.title = title;
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
    }

    /// Add a trimmed tag. Blank and duplicate tags are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// Slug shown to the author before publishing
    pub fn display_slug(&self) -> &str {
        if self.slug.is_empty() {
            "untitled-blog-post"
        } else {
            &self.slug
        }
    }

    /// Validated, trimmed metadata ready for the payload
    pub fn metadata(&self) -> Result<PublishMetadata, PublishFormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PublishFormError::MissingTitle);
        }
        let slug = match self.slug.trim() {
            "" => generate_slug(&self.title),
            slug => slug.to_string(),
        };
        Ok(PublishMetadata {
            title: title.to_string(),
            slug,
            excerpt: self.excerpt.trim().to_string(),
            tags: self.tags.clone(),
            category: self.category.trim().to_string(),
            featured_image: self.featured_image.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Hello World", "hello-world")]
    #[case("  Rust & Friends!  ", "-rust-friends-")]
    #[case("Multiple   spaces -- and dashes", "multiple-spaces-and-dashes")]
    #[case("Café 2024", "caf-2024")]
    #[case("", "")]
    fn test_generate_slug(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(generate_slug(title), expected);
    }

    #[test]
    fn test_slug_follows_title_until_edited() {
        let mut form = PublishForm::new();
        form.set_title("First Draft");
        assert_eq!(form.slug(), "first-draft");

        form.set_title("First Draft Again");
        assert_eq!(form.slug(), "first-draft-again");

        form.set_slug("custom");
        form.set_title("Something Else");
        assert_eq!(form.slug(), "custom");
    }

    #[test]
    fn test_tags_are_trimmed_and_unique() {
        let mut form = PublishForm::new();
        assert!(form.add_tag(" rust "));
        assert!(!form.add_tag("rust"));
        assert!(!form.add_tag("   "));
        assert!(form.add_tag("web"));
        form.remove_tag("rust");

        assert_eq!(form.tags(), &["web".to_string()]);
    }

    #[test]
    fn test_metadata_requires_title() {
        let mut form = PublishForm::new();
        form.set_title("   ");
        assert_eq!(form.metadata(), Err(PublishFormError::MissingTitle));
    }

    #[test]
    fn test_metadata_trims_and_falls_back_to_generated_slug() {
        let mut form = PublishForm::new();
        form.set_title(" My Post ");
        form.set_slug("  ");
        form.excerpt = " Short ".to_string();
        form.status = PostStatus::Draft;

        let metadata = form.metadata().unwrap();

        assert_eq!(metadata.title, "My Post");
        assert_eq!(metadata.slug, "-my-post-");
        assert_eq!(metadata.excerpt, "Short");
        assert_eq!(metadata.status, PostStatus::Draft);
    }

    #[test]
    fn test_display_slug_placeholder() {
        assert_eq!(PublishForm::new().display_slug(), "untitled-blog-post");
    }
}
