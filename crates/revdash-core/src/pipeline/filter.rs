use std::collections::BTreeSet;

use crate::review::Review;

/// Sentinel for "no property/channel selected".
pub const ALL: &str = "all";

/// User-chosen filters for the manager review table.
///
/// Every field has a neutral value (`""`, `"all"`, `0`, `false`) at which it
/// applies no filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub search: String,
    pub property: String,
    pub channel: String,
    pub min_rating: f64,
    pub approved_only: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            property: ALL.to_string(),
            channel: ALL.to_string(),
            min_rating: 0.0,
            approved_only: false,
        }
    }
}

impl FilterState {
    /// Restore every filter to its neutral value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `true` when no predicate is active.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.search.is_empty()
            && self.property == ALL
            && self.channel == ALL
            && self.min_rating <= 0.0
            && !self.approved_only
    }

    /// Whether `review` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = review.guest_name.to_lowercase().contains(&needle)
                || review.public_review.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if self.property != ALL && review.listing_name != self.property {
            return false;
        }

        if self.channel != ALL && review.channel_label() != self.channel {
            return false;
        }

        if self.min_rating > 0.0 {
            match review.effective_rating() {
                Some(rating) if rating >= self.min_rating => {}
                _ => return false,
            }
        }

        !(self.approved_only && !review.is_approved)
    }
}

/// Returns the reviews that pass `filter`, in input order.
#[must_use]
pub fn filter_reviews<'a>(reviews: &'a [Review], filter: &FilterState) -> Vec<&'a Review> {
    reviews.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct listing names and channels, each sorted, for the filter dropdowns.
///
/// Channels are listed by their display label, so reviews without one appear
/// as `"Direct"`, the same value the channel filter accepts for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub properties: Vec<String>,
    pub channels: Vec<String>,
}

#[must_use]
pub fn filter_options(reviews: &[Review]) -> FilterOptions {
    let properties: BTreeSet<&str> = reviews.iter().map(|r| r.listing_name.as_str()).collect();
    let channels: BTreeSet<&str> = reviews.iter().map(Review::channel_label).collect();
    FilterOptions {
        properties: properties.into_iter().map(str::to_owned).collect(),
        channels: channels.into_iter().map(str::to_owned).collect(),
    }
}
