//! Dashboard statistics and per-property performance.

use revdash_client::{Dashboard, ReviewQuery};
use revdash_core::{approval_share, attention_notes, PerformanceTier, PropertyAggregate};

use crate::reviews::truncate;

/// Approval share as `"NN%"`, or `"—"` for a property with no reviews.
fn fmt_share(property: &PropertyAggregate) -> String {
    approval_share(property.approved_count, property.total_reviews)
        .map_or_else(|| "\u{2014}".to_string(), |pct| format!("{pct}%"))
}

/// Weak category notes prefixed with the property they belong to.
fn property_notes(properties: &[PropertyAggregate]) -> Vec<String> {
    properties
        .iter()
        .flat_map(|property| {
            attention_notes(&property.ratings_breakdown)
                .into_iter()
                .map(move |note| format!("{}: {note}", property.listing_name))
        })
        .collect()
}

/// Print headline statistics and the per-property table.
///
/// Statistics and the review set are fetched concurrently; the pending
/// approval count is recomputed from the reviews.
///
/// # Errors
///
/// Returns an error if either request fails.
pub(crate) async fn run_stats(dashboard: &mut Dashboard) -> anyhow::Result<()> {
    let client = dashboard.client().clone();
    let query = ReviewQuery::default();
    let (stats, reviews) =
        futures::try_join!(client.get_dashboard_stats(), client.get_reviews(&query))?;
    dashboard.replace_reviews(reviews.data);

    println!("Total reviews:     {}", stats.total_reviews);
    println!("Average rating:    {:.1}", stats.average_rating);
    println!("Properties:        {}", stats.total_properties);
    println!("Pending approvals: {}", dashboard.pending_approvals());

    if stats.properties.is_empty() {
        println!();
        println!("no property statistics yet; run `revdash sync` first");
        return Ok(());
    }

    println!();
    println!(
        "{:<32}{:<9}{:<6}{:<17}{:<10}{:<10}TREND",
        "PROPERTY", "REVIEWS", "AVG", "TIER", "APPROVED", "FEATURED"
    );
    for property in &stats.properties {
        let tier = PerformanceTier::from_rating(property.average_rating);
        println!(
            "{:<32}{:<9}{:<6.1}{:<17}{:<10}{:<10}{}",
            truncate(&property.listing_name, 28),
            property.total_reviews,
            property.average_rating,
            tier.label(),
            fmt_share(property),
            property.featured_count,
            property.recent_trend,
        );
    }

    let notes = property_notes(&stats.properties);
    if !notes.is_empty() {
        println!();
        for line in &notes {
            println!("{line}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdash_core::{RatingsBreakdown, Trend};

    fn property(approved: u32, total: u32) -> PropertyAggregate {
        PropertyAggregate {
            property_id: "P1".to_string(),
            listing_name: "Shoreditch Heights".to_string(),
            average_rating: 9.2,
            total_reviews: total,
            recent_trend: Trend::Stable,
            ratings_breakdown: RatingsBreakdown::default(),
            approved_count: approved,
            featured_count: 0,
        }
    }

    #[test]
    fn share_is_rounded_percentage() {
        assert_eq!(fmt_share(&property(2, 3)), "67%");
        assert_eq!(fmt_share(&property(0, 0)), "\u{2014}");
    }

    #[test]
    fn notes_name_the_property() {
        let mut weak = property(1, 2);
        weak.ratings_breakdown.communication = 7.0;
        let notes = property_notes(&[property(1, 2), weak]);
        assert_eq!(notes.len(), 1);
        let expected = "Shoreditch Heights: Communication rating is below 8";
        assert!(notes[0].starts_with(expected));
    }
}
