//! Review listing and moderation command handlers for the CLI.
//!
//! `list` and `options` are read-only; the flag commands go through the
//! optimistic toggle path of [`revdash_client::Dashboard`] and report a
//! reverted change as an error.

mod list;
mod moderate;

use clap::{Args, Subcommand, ValueEnum};
use revdash_client::{Dashboard, ReviewQuery};
use revdash_core::{parse_timestamp, Review, SortDirection, SortField};

pub(crate) use list::{run_reviews_list, run_reviews_options};
pub(crate) use moderate::{run_reviews_flag, run_reviews_save};

/// Where the review set is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Reviews persisted by the backend
    #[default]
    Persisted,
    /// Raw reviews straight from the Hostaway channel
    Hostaway,
}

/// Sub-commands available under `reviews`.
#[derive(Debug, Subcommand)]
pub enum ReviewsCommands {
    /// List reviews with filters, sorting and pagination
    List(ListArgs),
    /// Show the property and channel values available as filters
    Options {
        #[arg(long, value_enum, default_value_t)]
        source: Source,
    },
    /// Approve a review for the public page
    Approve { id: String },
    /// Withdraw a review's approval
    Unapprove { id: String },
    /// Mark a review as featured
    Feature { id: String },
    /// Remove a review's featured mark
    Unfeature { id: String },
    /// Set both flags of a review in one update
    Save {
        id: String,
        #[arg(long)]
        approved: bool,
        #[arg(long)]
        featured: bool,
    },
}

/// Arguments of `reviews list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t)]
    pub source: Source,
    /// Case-insensitive match on guest name or review text
    #[arg(long)]
    pub search: Option<String>,
    /// Exact property (listing) name
    #[arg(long)]
    pub property: Option<String>,
    /// Exact channel name
    #[arg(long)]
    pub channel: Option<String>,
    /// Minimum overall rating (0-10)
    #[arg(long, default_value_t = 0.0)]
    pub min_rating: f64,
    /// Only show approved reviews
    #[arg(long)]
    pub approved_only: bool,
    /// property, guest, rating, date or channel
    #[arg(long, default_value = "submitted_at")]
    pub sort: SortField,
    /// asc or desc
    #[arg(long, default_value = "desc")]
    pub direction: SortDirection,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Rows per page (defaults to `REVDASH_PAGE_SIZE`)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Populate the dashboard's local review set from `source`.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub(crate) async fn load_source(dashboard: &mut Dashboard, source: Source) -> anyhow::Result<()> {
    match source {
        Source::Persisted => dashboard.load_reviews(&ReviewQuery::default()).await?,
        Source::Hostaway => dashboard.load_hostaway_reviews().await?,
    };
    Ok(())
}

/// Format an optional rating for display, returning `"—"` when `None`.
pub(crate) fn fmt_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "\u{2014}".to_string(), |r| format!("{r:.1}"))
}

/// Format a backend timestamp as a date, falling back to the raw value.
pub(crate) fn fmt_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// Shorten `text` to at most `max` characters, appending `...` when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn fmt_status(review: &Review) -> &'static str {
    match (review.is_approved, review.is_featured) {
        (true, true) => "approved*",
        (true, false) => "approved",
        (false, true) => "pending*",
        (false, false) => "pending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_rating_uses_dash_for_missing() {
        assert_eq!(fmt_rating(None), "\u{2014}");
        assert_eq!(fmt_rating(Some(9.26)), "9.3");
    }

    #[test]
    fn fmt_date_keeps_unparsable_input() {
        assert_eq!(fmt_date("2024-03-14T10:00:00Z"), "2024-03-14");
        assert_eq!(fmt_date("yesterday"), "yesterday");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ÀÉÎÕÜ extra", 5), "ÀÉÎÕÜ...");
    }
}
