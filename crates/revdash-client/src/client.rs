//! HTTP client for the reviews backend REST API.
//!
//! Wraps `reqwest` with typed request/response bodies and maps transport,
//! status and decoding failures onto [`ClientError`]. No request is retried;
//! callers decide how to surface a failure.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use revdash_core::AppConfig;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{
    DashboardStats, ReviewListResponse, ReviewQuery, ReviewUpdate, SyncResponse, SyncSummary,
};

const DEFAULT_USER_AGENT: &str = "revdash/0.1 (review-dashboard)";

/// Client for the reviews backend.
///
/// Use [`ReviewsClient::from_config`] in the binaries or
/// [`ReviewsClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ReviewsClient {
    client: Client,
    base_url: Url,
}

impl ReviewsClient {
    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the
    /// configured API URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::build(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid http(s) URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so path segments are appended after any
        // prefix the backend is mounted under.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "expected an http(s) origin".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches reviews straight from the booking-channel source, unfiltered.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not a review list.
    pub async fn get_hostaway_reviews(&self) -> Result<ReviewListResponse, ClientError> {
        let url = self.endpoint(&["api", "reviews", "hostaway"]);
        self.send_json(self.client.get(url), "GET /api/reviews/hostaway")
            .await
    }

    /// Fetches persisted reviews, applying only the filters set in `query`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not a review list.
    pub async fn get_reviews(
        &self,
        query: &ReviewQuery,
    ) -> Result<ReviewListResponse, ClientError> {
        let url = self.endpoint(&["api", "reviews"]);
        let request = self.client.get(url).query(&query.query_pairs());
        self.send_json(request, "GET /api/reviews").await
    }

    /// Partially updates a review's approval and featured flags.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ReviewNotFound`] when the backend answers 404.
    /// - [`ClientError::Http`] on network failure or any other non-2xx status.
    pub async fn update_review(
        &self,
        review_id: &str,
        update: ReviewUpdate,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "reviews", review_id]);
        tracing::debug!(review_id, ?update, "patching review");
        let response = self.client.patch(url).json(&update).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::ReviewNotFound {
                review_id: review_id.to_owned(),
            });
        }
        response.error_for_status()?;
        Ok(())
    }

    /// Fetches the dashboard statistics including per-property aggregates.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body does not match
    ///   [`DashboardStats`].
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ClientError> {
        let url = self.endpoint(&["api", "reviews", "stats", "dashboard"]);
        self.send_json(self.client.get(url), "GET /api/reviews/stats/dashboard")
            .await
    }

    /// Asks the backend to pull new reviews from the channel source.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ClientError::Deserialize`] if the body is not a JSON object.
    pub async fn sync_reviews(&self) -> Result<SyncSummary, ClientError> {
        let url = self.endpoint(&["api", "reviews", "sync"]);
        let resp: SyncResponse = self
            .send_json(self.client.post(url), "POST /api/reviews/sync")
            .await?;
        let summary = SyncSummary::from(resp);
        tracing::info!(total_synced = summary.total_synced, "review sync finished");
        Ok(summary)
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Constructor rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends `request`, asserts a 2xx status and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on network failure or a non-2xx status.
    /// Returns [`ClientError::Deserialize`] if the body does not decode.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
