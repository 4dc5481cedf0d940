//! Stub publish endpoint.
//!
//! Accepts a publish payload, logs a summary and echoes back the record a
//! real backend would store. Nothing is persisted.

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use postblocks_engine::publish::{
    ErrorResponse, LanguagePayload, PostStatus, PublishPayload, PublishResponse,
};

pub const PUBLISH_ROUTE: &str = "/api/publish";

#[derive(Debug, Clone, Default)]
pub struct ServerState {
    /// Delay before each answer, standing in for backend processing
    pub latency: Duration,
}

impl ServerState {
    pub fn with_latency_ms(millis: u64) -> Self {
        Self {
            latency: Duration::from_millis(millis),
        }
    }
}

/// The record a real backend would store for a published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub languages: Vec<LanguagePayload>,
    pub current_language: String,
    pub tags: Vec<String>,
    pub category: String,
    pub featured_image: String,
    pub status: PostStatus,
    pub word_count: usize,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublishedPost {
    fn new(id: String, payload: PublishPayload, now: DateTime<Utc>) -> Self {
        let word_count = payload.word_count();
        let metadata = payload.metadata;
        Self {
            id,
            title: metadata.title,
            slug: metadata.slug,
            excerpt: metadata.excerpt,
            languages: payload.languages,
            current_language: payload.current_language,
            tags: metadata.tags,
            category: metadata.category,
            featured_image: metadata.featured_image,
            status: metadata.status,
            word_count,
            published_at: payload.published_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Build the HTTP router for the stub endpoint
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route(PUBLISH_ROUTE, post(publish_handler))
        .with_state(state)
}

/// Serve the stub endpoint until the listener fails
pub async fn serve(listener: tokio::net::TcpListener, state: ServerState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Stub publish endpoint listening on http://{addr}{PUBLISH_ROUTE}");
    }
    axum::serve(listener, build_router(state)).await
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn publish_handler(
    State(state): State<ServerState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        log::warn!("Rejected publish request with unreadable body");
        return error_response(StatusCode::BAD_REQUEST, "Request body must be JSON");
    };

    let has_title = body
        .get("title")
        .and_then(|title| title.as_str())
        .is_some_and(|title| !title.trim().is_empty());
    let has_languages = body
        .get("languages")
        .and_then(|languages| languages.as_array())
        .is_some_and(|languages| !languages.is_empty());
    if !has_title || !has_languages {
        log::warn!("Rejected publish request without title or languages");
        return error_response(StatusCode::BAD_REQUEST, "Title and languages are required");
    }

    let payload: PublishPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(err) => {
            log::error!("Publish error: {err}");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to publish blog post",
            );
        }
    };

    let id = generate_post_id(Utc::now());
    log::info!(
        "Blog post received: id={} title={:?} slug={} status={} words={} sections={} published_at={}",
        id,
        payload.metadata.title,
        payload.metadata.slug,
        payload.metadata.status,
        payload.word_count(),
        payload.section_count(),
        payload.published_at
    );

    tokio::time::sleep(state.latency).await;

    let url = format!("/blog/{}", payload.metadata.slug);
    let post = PublishedPost::new(id.clone(), payload, Utc::now());
    let data = match serde_json::to_value(&post) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Publish error: {err}");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to publish blog post",
            );
        }
    };

    Json(PublishResponse {
        success: true,
        message: "Blog post published successfully".to_string(),
        id,
        url,
        data,
    })
    .into_response()
}

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `blog_<unix millis>_<9 random base36 chars>`
pub fn generate_post_id(now: DateTime<Utc>) -> String {
    let mut random = Uuid::new_v4().as_u128();
    let suffix: String = (0..9)
        .map(|_| {
            let digit = BASE36_DIGITS[(random % 36) as usize] as char;
            random /= 36;
            digit
        })
        .collect();
    format!("blog_{}_{}", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_post_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let id = generate_post_id(now);

        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "blog");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_post_ids_differ() {
        let now = Utc::now();
        assert_ne!(generate_post_id(now), generate_post_id(now));
    }
}
