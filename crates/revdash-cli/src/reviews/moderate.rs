//! Flag changes on a single review.

use revdash_client::{Dashboard, ReviewQuery};
use revdash_core::ReviewFlag;

/// Set one flag on a review.
///
/// The change is applied to the local copy first and reverted if the backend
/// rejects it.
///
/// # Errors
///
/// Returns an error if the review is unknown, the load fails, or the backend
/// rejects the update.
pub(crate) async fn run_reviews_flag(
    dashboard: &mut Dashboard,
    review_id: &str,
    flag: ReviewFlag,
    value: bool,
) -> anyhow::Result<()> {
    dashboard.load_reviews(&ReviewQuery::default()).await?;

    let before = dashboard.review(review_id).map(|r| r.flag(flag));
    if before == Some(value) {
        println!("review {review_id} already has {flag}={value}; nothing to do");
        return Ok(());
    }

    dashboard.toggle(review_id, flag, value).await?;
    println!("review {review_id}: {flag} set to {value}");
    println!("{} pending approval", dashboard.pending_approvals());
    Ok(())
}

/// Set both flags of a review in a single, non-optimistic update.
///
/// # Errors
///
/// Returns an error if the review is unknown, the load fails, or the backend
/// rejects the update.
pub(crate) async fn run_reviews_save(
    dashboard: &mut Dashboard,
    review_id: &str,
    approved: bool,
    featured: bool,
) -> anyhow::Result<()> {
    dashboard.load_reviews(&ReviewQuery::default()).await?;
    dashboard.save_review(review_id, approved, featured).await?;
    println!("review {review_id} saved: approved={approved} featured={featured}");
    Ok(())
}
