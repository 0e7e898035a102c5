//! Guest-facing property page rendered as text.

use anyhow::Context;
use clap::ValueEnum;
use revdash_client::{Dashboard, ReviewQuery};
use revdash_core::{
    approval_share, attention_notes, star_count, trend_description, EmptyState, PerformanceTier,
    PublicRatingFilter, PublicReview, PublicReviewFeed, PublicSort, RatingsBreakdown,
};

use crate::charts::bar;
use crate::reviews::fmt_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RatingFilterArg {
    #[default]
    All,
    /// 9 and above
    #[value(name = "9+")]
    NinePlus,
    /// 8 and above
    #[value(name = "8+")]
    EightPlus,
}

impl From<RatingFilterArg> for PublicRatingFilter {
    fn from(arg: RatingFilterArg) -> Self {
        match arg {
            RatingFilterArg::All => PublicRatingFilter::All,
            RatingFilterArg::NinePlus => PublicRatingFilter::NinePlus,
            RatingFilterArg::EightPlus => PublicRatingFilter::EightPlus,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PublicSortArg {
    #[default]
    Recent,
    Highest,
}

impl From<PublicSortArg> for PublicSort {
    fn from(arg: PublicSortArg) -> Self {
        match arg {
            PublicSortArg::Recent => PublicSort::MostRecent,
            PublicSortArg::Highest => PublicSort::HighestRated,
        }
    }
}

fn stars(rating: f64) -> String {
    let filled = star_count(rating);
    format!("{}{}", "*".repeat(filled), ".".repeat(10 - filled))
}

/// One line per rating category: label, score and a bar out of 10.
fn breakdown_lines(breakdown: &RatingsBreakdown) -> Vec<String> {
    breakdown
        .entries()
        .iter()
        .map(|(label, score)| format!("  {label:<16}{score:>5.1}  {}", bar(*score, 10.0)))
        .collect()
}

/// Print the public page of one property.
///
/// Only approved reviews are fetched. Without `property_id` the first
/// property of the dashboard statistics is shown. `load_more` is the number
/// of extra batches to reveal past the first.
///
/// # Errors
///
/// Returns an error if the reviews or statistics cannot be fetched, or if no
/// property is given and the backend reports none.
pub(crate) async fn run_public(
    dashboard: &mut Dashboard,
    property_id: Option<&str>,
    filter: RatingFilterArg,
    sort: PublicSortArg,
    load_more: usize,
) -> anyhow::Result<()> {
    let client = dashboard.client().clone();
    let (stats, reviews, property_id) = if let Some(id) = property_id {
        let query = ReviewQuery::approved_for_property(id);
        let (stats, reviews) =
            futures::try_join!(client.get_dashboard_stats(), client.get_reviews(&query))?;
        (stats, reviews, id.to_string())
    } else {
        let stats = client.get_dashboard_stats().await?;
        let id = stats
            .properties
            .first()
            .map(|p| p.property_id.clone())
            .context("no properties reported by the backend; pass --property")?;
        let reviews = client
            .get_reviews(&ReviewQuery::approved_for_property(&id))
            .await?;
        (stats, reviews, id)
    };
    dashboard.replace_reviews(reviews.data);
    let property_id = property_id.as_str();

    let aggregate = stats
        .properties
        .iter()
        .find(|p| p.property_id == property_id);
    match aggregate {
        Some(property) => {
            let tier = PerformanceTier::from_rating(property.average_rating);
            println!("{}", property.listing_name);
            println!(
                "{:.1}/10  {}  {} ({} reviews)",
                property.average_rating,
                stars(property.average_rating),
                tier.label(),
                property.total_reviews
            );
            println!("{}", tier.guidance());
            for note in attention_notes(&property.ratings_breakdown) {
                println!("Note: {note}");
            }
            println!("{}", trend_description(property.recent_trend));
            if let Some(pct) = approval_share(property.approved_count, property.total_reviews) {
                println!("{pct}% of reviews approved for display");
            }
            println!();
            for line in breakdown_lines(&property.ratings_breakdown) {
                println!("{line}");
            }
        }
        None => {
            tracing::debug!(property_id, "no aggregate for property");
            println!("Property {property_id}");
        }
    }
    println!();

    let approved: Vec<PublicReview> = dashboard
        .reviews()
        .iter()
        .filter(|r| r.is_approved)
        .map(PublicReview::from)
        .collect();
    if let Some(empty) = EmptyState::for_public_page(false, approved.len()) {
        println!("{}: {}", empty.title(), empty.description());
        return Ok(());
    }

    let mut feed = PublicReviewFeed::new(approved);
    feed.filter = filter.into();
    feed.sort = sort.into();
    for _ in 0..load_more {
        feed.load_more();
    }

    let displayed = feed.displayed();
    if displayed.is_empty() {
        println!("no reviews match this rating filter");
        return Ok(());
    }
    for review in &displayed {
        println!(
            "{}  {:.1}  {}{}",
            stars(review.rating),
            review.rating,
            review.guest_name,
            if review.is_featured { "  [featured]" } else { "" }
        );
        println!("  {}", fmt_date(&review.submitted_at));
        if !review.public_review.is_empty() {
            println!("  {}", review.public_review);
        }
        println!();
    }

    let total = feed.filtered().len();
    println!("showing {} of {total}", displayed.len());
    if feed.has_more() {
        println!("pass --load-more {} to see more", load_more + 1);
    }
    Ok(())
}
