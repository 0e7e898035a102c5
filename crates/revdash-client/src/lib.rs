//! Client side of the review dashboard: the REST client for the reviews
//! backend, the tag-invalidated query cache and the optimistic dashboard
//! controller built on both.

pub mod cache;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod types;

pub use cache::{QueryCache, TAG_DASHBOARD, TAG_REVIEWS};
pub use client::ReviewsClient;
pub use dashboard::{CachedQuery, Dashboard, PendingToggle, DASHBOARD_KEY, HOSTAWAY_KEY};
pub use error::{ClientError, ToggleError};
pub use types::{
    DashboardStats, ReviewListResponse, ReviewQuery, ReviewUpdate, SyncResponse, SyncSummary,
};
