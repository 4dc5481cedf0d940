pub mod client;
pub mod server;

pub use client::{HttpPublisher, PUBLISH_FAILED_NOTICE, PublishError, Publisher};
pub use server::{PUBLISH_ROUTE, PublishedPost, ServerState, build_router, generate_post_id, serve};
