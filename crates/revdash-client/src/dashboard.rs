//! Manager dashboard controller.
//!
//! [`Dashboard`] owns the in-memory review set, a [`QueryCache`] of fetched
//! results and the set of outstanding flag toggles. Toggles are optimistic:
//! [`Dashboard::begin_toggle`] applies the new value and records the old one,
//! [`Dashboard::complete_toggle`] either keeps it (and invalidates cached
//! reads) or restores it. At most one toggle per (review, flag) pair may be
//! outstanding; a second one is rejected with [`ToggleError::InFlight`].
//! Requested values of outstanding toggles are re-applied whenever the local
//! set is replaced, so a reload never hides a change the backend has not
//! answered yet.

use std::collections::HashMap;

use revdash_core::{derive_page, FilterState, Page, Review, ReviewFlag, SortState};

use crate::cache::{QueryCache, TAG_DASHBOARD, TAG_REVIEWS};
use crate::client::ReviewsClient;
use crate::error::{ClientError, ToggleError};
use crate::types::{DashboardStats, ReviewListResponse, ReviewQuery, ReviewUpdate, SyncSummary};

/// Cache key of the raw channel-source review list.
pub const HOSTAWAY_KEY: &str = "reviews/hostaway";
/// Cache key of the dashboard statistics.
pub const DASHBOARD_KEY: &str = "dashboard/stats";

/// A cached backend read.
#[derive(Debug, Clone)]
pub enum CachedQuery {
    Reviews(ReviewListResponse),
    Dashboard(DashboardStats),
}

/// Record of a speculative flag change awaiting the backend's answer.
#[derive(Debug)]
#[must_use = "a pending toggle must be passed to `complete_toggle`"]
pub struct PendingToggle {
    review_id: String,
    flag: ReviewFlag,
    previous: bool,
    requested: bool,
}

impl PendingToggle {
    #[must_use]
    pub fn review_id(&self) -> &str {
        &self.review_id
    }

    #[must_use]
    pub fn flag(&self) -> ReviewFlag {
        self.flag
    }

    /// The value the flag had before the toggle.
    #[must_use]
    pub fn previous(&self) -> bool {
        self.previous
    }

    #[must_use]
    pub fn requested(&self) -> bool {
        self.requested
    }

    #[must_use]
    pub fn update(&self) -> ReviewUpdate {
        ReviewUpdate::flag(self.flag, self.requested)
    }
}

pub struct Dashboard {
    client: ReviewsClient,
    reviews: Vec<Review>,
    cache: QueryCache<CachedQuery>,
    /// Requested value per outstanding (review, flag) toggle.
    in_flight: HashMap<(String, ReviewFlag), bool>,
}

impl Dashboard {
    #[must_use]
    pub fn new(client: ReviewsClient) -> Self {
        Self {
            client,
            reviews: Vec::new(),
            cache: QueryCache::new(),
            in_flight: HashMap::new(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ReviewsClient {
        &self.client
    }

    /// The current local review set, including optimistic changes.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn review(&self, review_id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == review_id)
    }

    #[must_use]
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    /// Load persisted reviews matching `query` into the local set, serving
    /// from cache when the same query was fetched and not invalidated since.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from the fetch; the local set is left as it was.
    pub async fn load_reviews(&mut self, query: &ReviewQuery) -> Result<&[Review], ClientError> {
        let key = query.cache_key();
        if let Some(CachedQuery::Reviews(resp)) = self.cache.get(&key) {
            tracing::debug!(key = %key, "serving reviews from cache");
            let data = resp.data.clone();
            self.set_reviews(data);
            return Ok(&self.reviews);
        }

        let resp = self.client.get_reviews(query).await?;
        tracing::debug!(key = %key, total = resp.total, "fetched reviews");
        self.set_reviews(resp.data.clone());
        self.cache.insert(key, CachedQuery::Reviews(resp), &[TAG_REVIEWS]);
        Ok(&self.reviews)
    }

    /// Load the raw channel-source reviews into the local set.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from the fetch; the local set is left as it was.
    pub async fn load_hostaway_reviews(&mut self) -> Result<&[Review], ClientError> {
        if let Some(CachedQuery::Reviews(resp)) = self.cache.get(HOSTAWAY_KEY) {
            let data = resp.data.clone();
            self.set_reviews(data);
            return Ok(&self.reviews);
        }

        let resp = self.client.get_hostaway_reviews().await?;
        self.set_reviews(resp.data.clone());
        self.cache.insert(HOSTAWAY_KEY, CachedQuery::Reviews(resp), &[TAG_REVIEWS]);
        Ok(&self.reviews)
    }

    /// Dashboard statistics, cached under the `dashboard` tag.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`] from the fetch.
    pub async fn dashboard_stats(&mut self) -> Result<DashboardStats, ClientError> {
        if let Some(CachedQuery::Dashboard(stats)) = self.cache.get(DASHBOARD_KEY) {
            return Ok(stats.clone());
        }

        let stats = self.client.get_dashboard_stats().await?;
        self.cache.insert(
            DASHBOARD_KEY,
            CachedQuery::Dashboard(stats.clone()),
            &[TAG_DASHBOARD],
        );
        Ok(stats)
    }

    /// Apply `value` to the flag locally and record the prior value.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::UnknownReview`] if `review_id` is not loaded.
    /// - [`ToggleError::InFlight`] if the same pair is already being toggled.
    pub fn begin_toggle(
        &mut self,
        review_id: &str,
        flag: ReviewFlag,
        value: bool,
    ) -> Result<PendingToggle, ToggleError> {
        let key = (review_id.to_owned(), flag);
        if self.in_flight.contains_key(&key) {
            return Err(ToggleError::InFlight {
                review_id: review_id.to_owned(),
                flag,
            });
        }

        let review = self
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .ok_or_else(|| ToggleError::UnknownReview {
                review_id: review_id.to_owned(),
            })?;
        let previous = review.flag(flag);
        review.set_flag(flag, value);
        self.in_flight.insert(key, value);

        Ok(PendingToggle {
            review_id: review_id.to_owned(),
            flag,
            previous,
            requested: value,
        })
    }

    /// Settle a toggle with the backend's answer.
    ///
    /// On success the optimistic value stays and the `reviews` and
    /// `dashboard` tags are invalidated. On failure the flag is restored to
    /// its value from before [`Dashboard::begin_toggle`].
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::Backend`] wrapping the backend failure.
    pub fn complete_toggle(
        &mut self,
        pending: PendingToggle,
        outcome: Result<(), ClientError>,
    ) -> Result<(), ToggleError> {
        self.in_flight.remove(&(pending.review_id.clone(), pending.flag));
        let review = self.reviews.iter_mut().find(|r| r.id == pending.review_id);

        match outcome {
            Ok(()) => {
                tracing::info!(
                    review_id = %pending.review_id,
                    flag = %pending.flag,
                    value = pending.requested,
                    "review updated"
                );
                if let Some(review) = review {
                    review.set_flag(pending.flag, pending.requested);
                }
                self.cache.invalidate_tags(&[TAG_REVIEWS, TAG_DASHBOARD]);
                Ok(())
            }
            Err(source) => {
                tracing::warn!(
                    review_id = %pending.review_id,
                    flag = %pending.flag,
                    error = %source,
                    "review update failed; reverting"
                );
                if let Some(review) = review {
                    review.set_flag(pending.flag, pending.previous);
                }
                Err(ToggleError::Backend {
                    review_id: pending.review_id,
                    source,
                })
            }
        }
    }

    /// Optimistically set one flag and persist it.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::begin_toggle`] and [`Dashboard::complete_toggle`].
    pub async fn toggle(
        &mut self,
        review_id: &str,
        flag: ReviewFlag,
        value: bool,
    ) -> Result<(), ToggleError> {
        let pending = self.begin_toggle(review_id, flag, value)?;
        let outcome = self.client.update_review(review_id, pending.update()).await;
        self.complete_toggle(pending, outcome)
    }

    /// Persist both flags at once, as the review detail view does.
    ///
    /// Not optimistic: the local review only changes after the backend
    /// accepts the update.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::UnknownReview`] if `review_id` is not loaded.
    /// - [`ToggleError::InFlight`] if either flag is mid-toggle.
    /// - [`ToggleError::Backend`] if the backend rejects the update.
    pub async fn save_review(
        &mut self,
        review_id: &str,
        is_approved: bool,
        is_featured: bool,
    ) -> Result<(), ToggleError> {
        if self.review(review_id).is_none() {
            return Err(ToggleError::UnknownReview {
                review_id: review_id.to_owned(),
            });
        }
        for flag in [ReviewFlag::Approved, ReviewFlag::Featured] {
            if self.in_flight.contains_key(&(review_id.to_owned(), flag)) {
                return Err(ToggleError::InFlight {
                    review_id: review_id.to_owned(),
                    flag,
                });
            }
        }

        let update = ReviewUpdate {
            is_approved: Some(is_approved),
            is_featured: Some(is_featured),
        };
        self.client
            .update_review(review_id, update)
            .await
            .map_err(|source| ToggleError::Backend {
                review_id: review_id.to_owned(),
                source,
            })?;

        if let Some(review) = self.reviews.iter_mut().find(|r| r.id == review_id) {
            review.is_approved = is_approved;
            review.is_featured = is_featured;
        }
        self.cache.invalidate_tags(&[TAG_REVIEWS, TAG_DASHBOARD]);
        Ok(())
    }

    /// Trigger a backend sync and invalidate every cached read on success.
    ///
    /// # Errors
    ///
    /// Propagates [`ClientError`]; the cache and local set are untouched.
    pub async fn sync(&mut self) -> Result<SyncSummary, ClientError> {
        let summary = self.client.sync_reviews().await?;
        self.cache.invalidate_tags(&[TAG_REVIEWS, TAG_DASHBOARD]);
        Ok(summary)
    }

    /// Drop a review from the local set only. Nothing is sent to the backend.
    pub fn remove_local(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        self.reviews.len() != before
    }

    /// Reviews in the local set still awaiting approval.
    #[must_use]
    pub fn pending_approvals(&self) -> usize {
        self.reviews.iter().filter(|r| !r.is_approved).count()
    }

    /// Run the derivation pipeline over the local set.
    #[must_use]
    pub fn view(
        &self,
        filter: &FilterState,
        sort: SortState,
        page: usize,
        page_size: usize,
    ) -> Page<&Review> {
        derive_page(&self.reviews, filter, sort, page, page_size)
    }

    /// Replace the local set, e.g. with reviews loaded elsewhere.
    pub fn replace_reviews(&mut self, reviews: Vec<Review>) {
        self.set_reviews(reviews);
    }

    /// Install a freshly loaded set, keeping outstanding optimistic values.
    fn set_reviews(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
        for ((review_id, flag), value) in &self.in_flight {
            if let Some(review) = self.reviews.iter_mut().find(|r| r.id == *review_id) {
                review.set_flag(*flag, *value);
            }
        }
    }
}
