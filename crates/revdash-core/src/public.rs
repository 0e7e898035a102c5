//! Guest-facing property page: approved reviews only, with a small set of
//! rating filters, two orderings and incremental "load more" paging.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::review::{parse_timestamp, RatingsBreakdown, Review, ReviewCategory, Trend};

/// Reviews shown initially and added per "load more".
pub const PUBLIC_PAGE_STEP: usize = 6;

/// A review as rendered on the public page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicReview {
    pub id: String,
    pub guest_name: String,
    pub submitted_at: String,
    pub rating: f64,
    pub public_review: String,
    pub review_categories: Vec<ReviewCategory>,
    pub channel: String,
    pub is_featured: bool,
}

impl PublicReview {
    #[must_use]
    pub fn submitted_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.submitted_at)
    }
}

impl From<&Review> for PublicReview {
    /// A zero raw rating is treated as unset and falls back to the average.
    fn from(review: &Review) -> Self {
        let rating = review
            .rating
            .filter(|r| *r != 0.0)
            .or(review.average_rating)
            .unwrap_or(0.0);
        Self {
            id: review.id.clone(),
            guest_name: review.guest_name.clone(),
            submitted_at: review.submitted_at.clone(),
            rating,
            public_review: review.public_review.clone(),
            review_categories: review.review_categories.clone(),
            channel: review.channel.clone(),
            is_featured: review.is_featured,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublicRatingFilter {
    #[default]
    All,
    /// Rating of 9 or more.
    NinePlus,
    /// Rating of 8 or more.
    EightPlus,
}

impl PublicRatingFilter {
    #[must_use]
    pub fn accepts(self, rating: f64) -> bool {
        match self {
            PublicRatingFilter::All => true,
            PublicRatingFilter::NinePlus => rating >= 9.0,
            PublicRatingFilter::EightPlus => rating >= 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublicSort {
    #[default]
    MostRecent,
    HighestRated,
}

/// State of the public review list for one property.
#[derive(Debug, Clone)]
pub struct PublicReviewFeed {
    reviews: Vec<PublicReview>,
    pub filter: PublicRatingFilter,
    pub sort: PublicSort,
    display_count: usize,
}

impl PublicReviewFeed {
    #[must_use]
    pub fn new(reviews: Vec<PublicReview>) -> Self {
        Self {
            reviews,
            filter: PublicRatingFilter::default(),
            sort: PublicSort::default(),
            display_count: PUBLIC_PAGE_STEP,
        }
    }

    /// All reviews passing the filter, in the selected order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&PublicReview> {
        let mut rows: Vec<&PublicReview> = self
            .reviews
            .iter()
            .filter(|r| self.filter.accepts(r.rating))
            .collect();
        match self.sort {
            PublicSort::MostRecent => {
                rows.sort_by(|a, b| b.submitted_instant().cmp(&a.submitted_instant()));
            }
            PublicSort::HighestRated => rows.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        rows
    }

    /// The slice currently on screen.
    #[must_use]
    pub fn displayed(&self) -> Vec<&PublicReview> {
        let mut rows = self.filtered();
        rows.truncate(self.display_count);
        rows
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.display_count < self.filtered().len()
    }

    pub fn load_more(&mut self) {
        self.display_count += PUBLIC_PAGE_STEP;
    }

    #[must_use]
    pub fn display_count(&self) -> usize {
        self.display_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

/// Headline assessment of a property's average rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTier {
    Excellent,
    VeryGood,
    Good,
    NeedsAttention,
}

impl PerformanceTier {
    #[must_use]
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 9.0 {
            PerformanceTier::Excellent
        } else if rating >= 8.0 {
            PerformanceTier::VeryGood
        } else if rating >= 7.0 {
            PerformanceTier::Good
        } else {
            PerformanceTier::NeedsAttention
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent",
            PerformanceTier::VeryGood => "Very Good",
            PerformanceTier::Good => "Good",
            PerformanceTier::NeedsAttention => "Needs Attention",
        }
    }

    #[must_use]
    pub fn guidance(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "This property is performing exceptionally well",
            PerformanceTier::VeryGood => "This property is performing well",
            PerformanceTier::Good => "This property has room for improvement",
            PerformanceTier::NeedsAttention => "Consider reviewing guest feedback",
        }
    }
}

#[must_use]
pub fn trend_description(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "Ratings are improving over time. Keep up the good work!",
        Trend::Declining => "Ratings are declining. Review recent feedback to identify issues.",
        Trend::Stable => "Ratings are consistent. Monitor for any changes.",
    }
}

/// Category score under which the performance summary adds a note.
pub const ATTENTION_THRESHOLD: f64 = 8.0;

/// Notes for weak cleanliness and communication scores.
///
/// A zero score means the category was never rated and is skipped.
#[must_use]
pub fn attention_notes(breakdown: &RatingsBreakdown) -> Vec<&'static str> {
    let below = |score: f64| score > 0.0 && score < ATTENTION_THRESHOLD;
    let mut notes = Vec::new();
    if below(breakdown.cleanliness) {
        notes.push(
            "Cleanliness rating is below 8. Consider enhancing cleaning procedures.",
        );
    }
    if below(breakdown.communication) {
        notes.push(
            "Communication rating is below 8. Consider improving response times and clarity.",
        );
    }
    notes
}

/// Approved share of all reviews as a whole percentage; `None` with no reviews.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn approval_share(approved: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let pct = (f64::from(approved) / f64::from(total) * 100.0).round();
    Some(pct as u32)
}

/// Filled stars out of ten for a 0-10 rating.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_count(rating: f64) -> usize {
    rating.round().clamp(0.0, 10.0) as usize
}
