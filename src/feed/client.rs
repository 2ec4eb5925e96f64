//! Feed transport.
//!
//! [`FeedSource`] is the seam between classification and the network. The
//! production implementation, [`HttpFeedSource`], issues one GET per lookup:
//!
//! ```text
//! GET <endpoint>?format=json&nojsoncallback=1&tags=<query>
//! ```
//!
//! No authentication, pagination or retry is performed. Dropping the returned
//! future aborts the underlying request.

use crate::domain::FetchError;
use crate::feed::models::FeedResponse;
use crate::Config;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::Instrument;

/// Source of raw feed documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the feed for a tag query.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why no document could be produced.
    async fn fetch_feed(&self, tags: &str) -> Result<FeedResponse, FetchError>;
}

/// HTTP implementation of [`FeedSource`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    endpoint: Url,
}

impl HttpFeedSource {
    /// Builds a source for the configured endpoint and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &Config) -> crate::Result<Self> {
        Self::with_endpoint(&config.endpoint, config.request_timeout())
    }

    /// Builds a source for an endpoint with an explicit timeout.
    ///
    /// # Errors
    ///
    /// See [`HttpFeedSource::new`].
    pub fn with_endpoint(endpoint: &str, timeout: Option<Duration>) -> crate::Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            crate::PhotoSearchError::Config(format!("invalid endpoint '{endpoint}': {e}"))
        })?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// URL for a tag query.
    #[must_use]
    pub fn request_url(&self, tags: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("nojsoncallback", "1")
            .append_pair("tags", tags);
        url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_feed(&self, tags: &str) -> Result<FeedResponse, FetchError> {
        let url = self.request_url(tags);
        let span = tracing::debug_span!("fetch_feed", tags = %tags);

        async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if !status.is_success() {
                tracing::debug!(status = status.as_u16(), "feed returned error status");
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.bytes().await?;
            let trimmed = body.trim_ascii();
            if trimmed.is_empty() || trimmed == b"null" {
                return Err(FetchError::EmptyBody);
            }

            let feed = FeedResponse::from_slice(trimmed)?;
            tracing::debug!(item_count = feed.items.len(), "feed decoded");
            Ok(feed)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_url_carries_fixed_params() {
        let source =
            HttpFeedSource::with_endpoint("https://example.com/services/feeds/photos_public.gne", None)
                .unwrap();
        let url = source.request_url("sunset beach");
        assert_eq!(url.path(), "/services/feeds/photos_public.gne");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("format".to_string(), "json".to_string()),
                ("nojsoncallback".to_string(), "1".to_string()),
                ("tags".to_string(), "sunset beach".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_invalid_endpoint() {
        let err = HttpFeedSource::with_endpoint("not a url", None).unwrap_err();
        assert!(matches!(err, crate::PhotoSearchError::Config(_)));
    }
}
