use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::editing::DocumentStore;
use crate::models::LanguageVersion;
use crate::publish::PostStatus;
use crate::stats::{ContentStats, calculate_word_count};

/// Author-entered metadata, already validated by the publish form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMetadata {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub status: PostStatus,
}

/// A language version as submitted, annotated with its word count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePayload {
    #[serde(flatten)]
    pub language: LanguageVersion,
    pub word_count: usize,
}

/// The single JSON body sent to the publish endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishPayload {
    #[serde(flatten)]
    pub metadata: PublishMetadata,
    pub languages: Vec<LanguagePayload>,
    pub current_language: String,
    pub published_at: DateTime<Utc>,
}

impl PublishPayload {
    /// Snapshot the whole store. Timestamps are kept to millisecond
    /// precision.
    pub fn build(
        metadata: PublishMetadata,
        store: &DocumentStore,
        published_at: DateTime<Utc>,
    ) -> Self {
        let languages = store
            .languages()
            .iter()
            .map(|language| LanguagePayload {
                word_count: calculate_word_count(&language.sections),
                language: language.clone(),
            })
            .collect();
        Self {
            metadata,
            languages,
            current_language: store.current_language().to_string(),
            published_at: published_at.trunc_subsecs(3),
        }
    }

    /// Word count of the language that was being edited
    pub fn word_count(&self) -> usize {
        self.languages
            .iter()
            .find(|entry| entry.language.code == self.current_language)
            .map(|entry| entry.word_count)
            .unwrap_or_default()
    }

    pub fn section_count(&self) -> usize {
        self.languages
            .iter()
            .find(|entry| entry.language.code == self.current_language)
            .map(|entry| entry.language.sections.len())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub sections: usize,
    pub words: usize,
}

/// Content overview shown before publishing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSummary {
    pub current: ContentStats,
    pub languages: Vec<LanguageSummary>,
}

impl PublishSummary {
    pub fn of(store: &DocumentStore) -> Self {
        Self {
            current: ContentStats::of(store.current_sections()),
            languages: store
                .languages()
                .iter()
                .map(|language| LanguageSummary {
                    code: language.code.clone(),
                    name: language.name.clone(),
                    flag: language.flag.clone(),
                    sections: language.sections.len(),
                    words: calculate_word_count(&language.sections),
                })
                .collect(),
        }
    }
}

/// Successful answer from the publish endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Error body returned with a non-success status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// What the author learns after a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub id: String,
    pub url: String,
}

impl From<PublishResponse> for PublishReceipt {
    fn from(response: PublishResponse) -> Self {
        Self {
            id: response.id,
            url: response.url,
        }
    }
}
