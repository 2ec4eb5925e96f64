//! Single-lookup fetch and outcome classification.
//!
//! A [`Fetcher`] never fails: every lookup resolves to a [`FetchResult`].
//!
//! | Outcome | Result |
//! |---|---|
//! | blank query | `Idle` (no request issued) |
//! | host unreachable | `Failure(MSG_NO_CONNECTION)` |
//! | non-2xx, empty body, bad JSON, timeout | `Failure(MSG_GENERIC)` |
//! | success with zero items | `Failure("No results found for your search: '<query>'")` |
//! | success with items | `Success(photos)` in feed order |

use crate::domain::{FetchResult, Photo};
use crate::feed::client::FeedSource;
use crate::feed::mapper::map_items;
use async_trait::async_trait;
use std::sync::Arc;

/// Performs one remote lookup and classifies the outcome.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    /// Looks up `query`. Never panics on remote failures.
    async fn fetch(&self, query: &str) -> FetchResult;
}

/// [`Fetcher`] over any [`FeedSource`].
#[derive(Debug, Clone)]
pub struct FeedFetcher<S> {
    source: Arc<S>,
}

impl<S: FeedSource> FeedFetcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    pub const fn from_arc(source: Arc<S>) -> Self {
        Self { source }
    }
}

/// Classifies a raw lookup outcome for `query`.
pub fn classify(
    query: &str,
    outcome: Result<Vec<Photo>, crate::domain::FetchError>,
) -> FetchResult {
    match outcome {
        Ok(photos) => {
            if photos.is_empty() {
                tracing::warn!(query = %query, "no photos found");
            } else {
                tracing::debug!(query = %query, photo_count = photos.len(), "photos fetched");
            }
            FetchResult::from_photos(query, photos)
        }
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "fetch failed");
            FetchResult::Failure(e.user_message().to_string())
        }
    }
}

#[async_trait]
impl<S: FeedSource + 'static> Fetcher for FeedFetcher<S> {
    async fn fetch(&self, query: &str) -> FetchResult {
        if query.trim().is_empty() {
            tracing::debug!("blank query, skipping fetch");
            return FetchResult::Idle;
        }

        let outcome = self
            .source
            .fetch_feed(query)
            .await
            .map(|feed| map_items(feed.items));

        classify(query, outcome)
    }
}
