//! Review-list derivation: filter, then stable sort, then paginate.
//!
//! The pipeline borrows the review set and never mutates it. Every stage is
//! total: bad ratings or timestamps change ordering, never the outcome.

mod filter;
mod paginate;
mod sort;

pub use filter::{filter_options, filter_reviews, FilterOptions, FilterState, ALL};
pub use paginate::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use sort::{sort_reviews, SortDirection, SortField, SortState};

use crate::review::Review;

/// Run the whole pipeline and return the requested page.
#[must_use]
pub fn derive_page<'a>(
    reviews: &'a [Review],
    filter: &FilterState,
    sort: SortState,
    page: usize,
    page_size: usize,
) -> Page<&'a Review> {
    let mut visible = filter_reviews(reviews, filter);
    sort_reviews(&mut visible, sort);
    paginate(&visible, page, page_size)
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
