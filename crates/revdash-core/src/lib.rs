//! Domain types and pure derivations for the review dashboard.
//!
//! Nothing in this crate performs I/O apart from reading configuration from
//! the environment. The derivation pipeline and the chart aggregates are
//! total over well-formed input and never fail.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod empty_state;
pub mod pipeline;
pub mod public;
pub mod review;

use thiserror::Error;

pub use aggregate::{
    category_averages, channel_distribution, monthly_trend, monthly_volume, CategoryAverage,
    ChannelCount, MonthlyTrend, MonthlyTrendPoint, MonthlyVolume, TREND_SLOTS,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use empty_state::EmptyState;
pub use pipeline::{
    derive_page, filter_options, filter_reviews, paginate, sort_reviews, FilterOptions,
    FilterState, Page, SortDirection, SortField, SortState, ALL, DEFAULT_PAGE_SIZE,
};
pub use public::{
    approval_share, attention_notes, star_count, trend_description, PerformanceTier,
    PublicRatingFilter, PublicReview, PublicReviewFeed, PublicSort, ATTENTION_THRESHOLD,
    PUBLIC_PAGE_STEP,
};
pub use review::{
    parse_timestamp, PropertyAggregate, RatingsBreakdown, Review, ReviewCategory, ReviewFlag,
    Trend, DEFAULT_CHANNEL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
