//! Chart series derived from the loaded reviews, printed as text tables.

use revdash_client::{Dashboard, ReviewQuery};
use revdash_core::{
    category_averages, channel_distribution, monthly_trend, monthly_volume, PropertyAggregate,
    Review,
};

use crate::reviews::{fmt_rating, truncate, Source};

/// Width of a full bar (a rating of 10).
const BAR_WIDTH: usize = 20;

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub(crate) fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * BAR_WIDTH as f64)
        .round()
        .clamp(0.0, BAR_WIDTH as f64);
    "#".repeat(filled as usize)
}

/// Print category averages, the per-property monthly trend, the channel
/// distribution and the monthly approval volume.
///
/// # Errors
///
/// Returns an error if the reviews or the dashboard statistics cannot be
/// fetched.
pub(crate) async fn run_charts(dashboard: &mut Dashboard, source: Source) -> anyhow::Result<()> {
    let client = dashboard.client().clone();
    let query = ReviewQuery::default();
    let (stats, reviews) = match source {
        Source::Persisted => {
            futures::try_join!(client.get_dashboard_stats(), client.get_reviews(&query))?
        }
        Source::Hostaway => {
            futures::try_join!(client.get_dashboard_stats(), client.get_hostaway_reviews())?
        }
    };
    dashboard.replace_reviews(reviews.data);
    let reviews = dashboard.reviews();

    if reviews.is_empty() {
        println!("no reviews to chart; run `revdash sync` first");
        return Ok(());
    }

    print_category_averages(reviews);
    print_monthly_trend(reviews, &stats.properties);
    print_channels(reviews);
    print_volume(reviews);
    Ok(())
}

fn print_category_averages(reviews: &[Review]) {
    println!("CATEGORY AVERAGES");
    let averages = category_averages(reviews);
    if averages.is_empty() {
        println!("  no category ratings");
    }
    for avg in &averages {
        println!(
            "  {:<16}{:>5.1}  {}",
            avg.label,
            avg.rating,
            bar(avg.rating, 10.0)
        );
    }
    println!();
}

fn print_monthly_trend(reviews: &[Review], properties: &[PropertyAggregate]) {
    let trend = monthly_trend(reviews, properties);
    println!("MONTHLY RATING TREND");
    if trend.properties.is_empty() || trend.points.is_empty() {
        println!("  no rated reviews for the tracked properties");
        println!();
        return;
    }

    let mut header = format!("  {:<6}", "MONTH");
    for name in &trend.properties {
        header.push_str(&format!("{:<24}", truncate(name, 20)));
    }
    println!("{header}");
    for point in &trend.points {
        let mut row = format!("  {:<6}", point.month);
        for slot in point.slots.iter().take(trend.properties.len()) {
            row.push_str(&format!("{:<24}", fmt_rating(*slot)));
        }
        println!("{row}");
    }
    println!();
}

#[allow(clippy::cast_precision_loss)]
fn print_channels(reviews: &[Review]) {
    println!("CHANNELS");
    let counts = channel_distribution(reviews);
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0) as f64;
    for entry in &counts {
        println!(
            "  {:<16}{:>5}  {}",
            entry.channel,
            entry.count,
            bar(entry.count as f64, max)
        );
    }
    println!();
}

fn print_volume(reviews: &[Review]) {
    println!("MONTHLY VOLUME");
    println!("  {:<6}{:<10}PENDING", "MONTH", "APPROVED");
    for month in &monthly_volume(reviews) {
        println!(
            "  {:<6}{:<10}{}",
            month.month, month.approved, month.pending
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10.0, 10.0).len(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(3.0, 0.0), "");
    }
}
