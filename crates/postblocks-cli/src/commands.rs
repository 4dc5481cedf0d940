use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::path::Path;

use postblocks_engine::editing::{Cmd, DocumentStore};
use postblocks_engine::io;
use postblocks_engine::models::available_languages;
use postblocks_engine::preview::{PreviewOptions, render_preview};
use postblocks_engine::publish::{
    PostStatus, PublishForm, PublishPayload, PublishReceipt, PublishSummary,
};
use postblocks_engine::stats::ContentStats;
use postblocks_publish::Publisher;

fn load(path: &Path) -> Result<DocumentStore> {
    io::load_store(path).with_context(|| format!("Failed to load document {}", path.display()))
}

fn save(path: &Path, store: &DocumentStore) -> Result<()> {
    io::save_store(path, store)
        .with_context(|| format!("Failed to save document {}", path.display()))
}

pub fn new_document(path: &Path, force: bool) -> Result<String> {
    io::create_store(path, force)
        .with_context(|| format!("Failed to create document {}", path.display()))?;
    Ok(format!("Created {}", path.display()))
}

pub fn stats(path: &Path, words_per_minute: u32) -> Result<String> {
    let store = load(path)?;
    let mut lines = Vec::new();
    for language in store.languages() {
        let stats = ContentStats::of(&language.sections);
        let mut markers = String::new();
        if language.code == store.current_language() {
            markers.push_str(" [editing]");
        }
        if language.is_default {
            markers.push_str(" [default]");
        }
        lines.push(format!(
            "{} {} ({}){}: {} sections, {} words, {} images, {} embeds, {} min read",
            language.flag,
            language.name,
            language.code,
            markers,
            stats.sections,
            stats.words,
            stats.images,
            stats.embeds,
            stats.reading_time(words_per_minute)
        ));
    }
    Ok(lines.join("\n"))
}

pub fn preview(
    path: &Path,
    language: Option<&str>,
    title: Option<String>,
    words_per_minute: u32,
) -> Result<String> {
    let store = load(path)?;
    let version = match language {
        Some(code) => store
            .language(code)
            .with_context(|| format!("No {code} version in {}", path.display()))?,
        None => store.preview(),
    };
    let options = PreviewOptions {
        title,
        words_per_minute,
        ..Default::default()
    };
    Ok(render_preview(version, &options))
}

pub fn apply(path: &Path, command: &str) -> Result<String> {
    let cmd: Cmd = serde_json::from_str(command).context("Invalid command JSON")?;
    let mut store = load(path)?;
    let patch = store.apply(cmd)?;
    if !patch.changed {
        return Ok("No change".to_string());
    }
    save(path, &store)?;
    Ok(format!("Applied (version {})", patch.version))
}

pub fn add_language(path: &Path, code: &str) -> Result<String> {
    let mut store = load(path)?;
    let patch = store.apply(Cmd::AddCommonLanguage {
        code: code.to_string(),
    })?;
    if !patch.changed {
        return Ok(format!("{code} is already present"));
    }
    save(path, &store)?;
    Ok(format!("Added {code}"))
}

pub fn list_languages(path: &Path) -> Result<String> {
    let store = load(path)?;
    let mut lines = vec!["Present:".to_string()];
    for language in store.languages() {
        lines.push(format!(
            "  {} {} {} ({})",
            language.code, language.flag, language.name, language.native_name
        ));
    }
    lines.push("Available:".to_string());
    for language in available_languages(store.languages()) {
        lines.push(format!(
            "  {} {} {} ({})",
            language.code, language.flag, language.name, language.native_name
        ));
    }
    Ok(lines.join("\n"))
}

/// Metadata for `publish`, as given on the command line
#[derive(Debug, Default)]
pub struct PublishOptions {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
    pub draft: bool,
}

impl PublishOptions {
    fn form(self) -> PublishForm {
        let mut form = PublishForm::new();
        form.set_title(self.title);
        if let Some(slug) = self.slug {
            form.set_slug(slug);
        }
        for tag in &self.tags {
            form.add_tag(tag);
        }
        form.excerpt = self.excerpt.unwrap_or_default();
        form.category = self.category.unwrap_or_default();
        form.featured_image = self.featured_image.unwrap_or_default();
        form.status = if self.draft {
            PostStatus::Draft
        } else {
            PostStatus::Published
        };
        form
    }
}

/// Summary lines shown before the payload is sent
pub fn publish_summary(store: &DocumentStore) -> String {
    let summary = PublishSummary::of(store);
    let mut lines = vec![format!(
        "{} words, {} images, {} embeds",
        summary.current.words, summary.current.images, summary.current.embeds
    )];
    for language in &summary.languages {
        lines.push(format!(
            "  {} {}: {} sections, {} words",
            language.flag, language.name, language.sections, language.words
        ));
    }
    lines.join("\n")
}

pub async fn publish<P: Publisher>(
    path: &Path,
    options: PublishOptions,
    publisher: &P,
) -> Result<PublishReceipt> {
    let store = load(path)?;
    let metadata = options.form().metadata()?;
    log::info!("{}", publish_summary(&store));

    let payload = PublishPayload::build(metadata, &store, Utc::now());
    match publisher.publish(&payload).await {
        Ok(receipt) => Ok(receipt),
        Err(err) => {
            log::error!("Publish error: {err}");
            bail!("{}", err.notice())
        }
    }
}
