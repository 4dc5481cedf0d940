use std::future::Future;

use postblocks_engine::publish::{ErrorResponse, PublishPayload, PublishReceipt, PublishResponse};

/// Notice shown to the author for any failed publish
pub const PUBLISH_FAILED_NOTICE: &str = "Failed to publish blog. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to reach publish endpoint: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Publish rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from publish endpoint: {0}")]
    InvalidResponse(String),
}

impl PublishError {
    /// Generic message for the author; details go to the log
    pub fn notice(&self) -> &'static str {
        PUBLISH_FAILED_NOTICE
    }
}

/// Something that accepts a finished post
pub trait Publisher {
    fn publish(
        &self,
        payload: &PublishPayload,
    ) -> impl Future<Output = Result<PublishReceipt, PublishError>> + Send;
}

/// Posts the payload as JSON to an HTTP endpoint. One attempt, no retry.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPublisher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Publisher for HttpPublisher {
    async fn publish(&self, payload: &PublishPayload) -> Result<PublishReceipt, PublishError> {
        log::info!(
            "Publishing \"{}\" ({} languages) to {}",
            payload.metadata.title,
            payload.languages.len(),
            self.endpoint
        );
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|error| error.error)
                .unwrap_or(body);
            log::warn!("Publish rejected with {status}: {message}");
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let response: PublishResponse = serde_json::from_str(&body)
            .map_err(|err| PublishError::InvalidResponse(err.to_string()))?;
        log::info!("Published as {} at {}", response.id, response.url);
        Ok(response.into())
    }
}
