//! Chart aggregates derived from a review set.
//!
//! All functions are pure read-side transforms. Month buckets are keyed by
//! calendar month only, so the same month of different years is merged; the
//! trend and volume charts are seasonal views. Months are taken in UTC.

use chrono::Datelike;

use crate::review::{PropertyAggregate, Review};

/// Number of property series plotted in the monthly trend chart.
pub const TREND_SLOTS: usize = 3;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverage {
    /// Category key exactly as reported, e.g. `"cleanliness"`.
    pub category: String,
    /// Display label, first letter upper-cased.
    pub label: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrendPoint {
    pub month: &'static str,
    /// Mean rating per slot; `None` when that property had no review that month.
    pub slots: [Option<f64>; TREND_SLOTS],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTrend {
    /// Listing names assigned to slots 1..=3.
    pub properties: Vec<String>,
    pub points: Vec<MonthlyTrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCount {
    pub channel: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyVolume {
    pub month: &'static str,
    pub approved: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| round1(self.sum / self.count as f64))
    }
}

/// Round to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn month_index(review: &Review) -> Option<usize> {
    review.submitted_instant().map(|dt| dt.month0() as usize)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Mean rating per review category, in first-encounter order.
#[must_use]
pub fn category_averages(reviews: &[Review]) -> Vec<CategoryAverage> {
    let mut totals: Vec<(String, Mean)> = Vec::new();
    for category in reviews.iter().flat_map(|r| &r.review_categories) {
        match totals
            .iter_mut()
            .find(|(name, _)| *name == category.category)
        {
            Some((_, mean)) => mean.push(category.rating),
            None => {
                let mut mean = Mean::default();
                mean.push(category.rating);
                totals.push((category.category.clone(), mean));
            }
        }
    }

    totals
        .into_iter()
        .filter_map(|(category, mean)| {
            mean.value().map(|rating| CategoryAverage {
                label: capitalize(&category),
                category,
                rating,
            })
        })
        .collect()
}

/// Monthly mean rating for the first three distinct properties in
/// `properties`, ordered Jan..Dec. Months without a matching review are left
/// out; reviews with no timestamp or rating are skipped.
#[must_use]
pub fn monthly_trend(reviews: &[Review], properties: &[PropertyAggregate]) -> MonthlyTrend {
    let mut names: Vec<String> = Vec::with_capacity(TREND_SLOTS);
    for property in properties {
        if names.len() == TREND_SLOTS {
            break;
        }
        if !names.contains(&property.listing_name) {
            names.push(property.listing_name.clone());
        }
    }

    let mut grid = [[Mean::default(); TREND_SLOTS]; 12];
    for review in reviews {
        let Some(slot) = names.iter().position(|n| *n == review.listing_name) else {
            continue;
        };
        let (Some(month), Some(rating)) = (month_index(review), review.effective_rating()) else {
            continue;
        };
        grid[month][slot].push(rating);
    }

    let points = grid
        .into_iter()
        .enumerate()
        .filter_map(|(month, row)| {
            let slots = row.map(Mean::value);
            if slots.iter().all(Option::is_none) {
                return None;
            }
            Some(MonthlyTrendPoint {
                month: MONTHS[month],
                slots,
            })
        })
        .collect();

    MonthlyTrend {
        properties: names,
        points,
    }
}

/// Review count per channel in first-encounter order; an empty channel
/// counts as `"Direct"`.
#[must_use]
pub fn channel_distribution(reviews: &[Review]) -> Vec<ChannelCount> {
    let mut counts: Vec<ChannelCount> = Vec::new();
    for review in reviews {
        let channel = review.channel_label();
        match counts.iter_mut().find(|c| c.channel == channel) {
            Some(entry) => entry.count += 1,
            None => counts.push(ChannelCount {
                channel: channel.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Approved vs pending review counts per month, Jan..Dec, empty months omitted.
#[must_use]
pub fn monthly_volume(reviews: &[Review]) -> Vec<MonthlyVolume> {
    let mut buckets = [(0usize, 0usize); 12];
    for review in reviews {
        let Some(month) = month_index(review) else {
            continue;
        };
        if review.is_approved {
            buckets[month].0 += 1;
        } else {
            buckets[month].1 += 1;
        }
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, (approved, pending))| approved + pending > 0)
        .map(|(month, &(approved, pending))| MonthlyVolume {
            month: MONTHS[month],
            approved,
            pending,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{RatingsBreakdown, ReviewCategory, Trend};

    fn review(id: &str, listing: &str, submitted_at: &str, rating: f64) -> Review {
        Review {
            id: id.to_string(),
            listing_id: None,
            listing_name: listing.to_string(),
            property_id: None,
            review_type: None,
            status: None,
            guest_name: "Guest".to_string(),
            average_rating: Some(rating),
            rating: None,
            submitted_at: submitted_at.to_string(),
            channel: "Airbnb".to_string(),
            is_approved: false,
            is_featured: false,
            public_review: String::new(),
            review_categories: Vec::new(),
        }
    }

    fn property(name: &str) -> PropertyAggregate {
        PropertyAggregate {
            property_id: name.to_lowercase(),
            listing_name: name.to_string(),
            average_rating: 9.0,
            total_reviews: 1,
            recent_trend: Trend::Stable,
            ratings_breakdown: RatingsBreakdown::default(),
            approved_count: 0,
            featured_count: 0,
        }
    }

    fn category(name: &str, rating: f64) -> ReviewCategory {
        ReviewCategory {
            category: name.to_string(),
            rating,
        }
    }

    #[test]
    fn category_average_of_two_reviews() {
        let mut a = review("a", "P", "2024-01-01", 9.0);
        a.review_categories = vec![category("cleanliness", 8.0)];
        let mut b = review("b", "P", "2024-01-01", 9.0);
        b.review_categories = vec![category("cleanliness", 10.0)];

        let out = category_averages(&[a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, "cleanliness");
        assert_eq!(out[0].label, "Cleanliness");
        assert!((out[0].rating - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn category_averages_round_and_keep_encounter_order() {
        let mut a = review("a", "P", "2024-01-01", 9.0);
        a.review_categories = vec![category("value", 7.0), category("location", 10.0)];
        let mut b = review("b", "P", "2024-01-01", 9.0);
        b.review_categories = vec![category("value", 8.0), category("value", 8.0)];

        let out = category_averages(&[a, b]);
        let labels: Vec<&str> = out.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Value", "Location"]);
        // (7 + 8 + 8) / 3 = 7.666..
        assert!((out[0].rating - 7.7).abs() < 1e-9);
    }

    #[test]
    fn missing_channel_counts_as_direct() {
        let a = review("a", "P", "2024-01-01", 9.0);
        let mut b = review("b", "P", "2024-01-01", 9.0);
        b.channel = String::new();
        let mut c = review("c", "P", "2024-01-01", 9.0);
        c.channel = "Direct".to_string();

        let out = channel_distribution(&[a, b, c]);
        assert_eq!(
            out,
            vec![
                ChannelCount {
                    channel: "Airbnb".to_string(),
                    count: 1
                },
                ChannelCount {
                    channel: "Direct".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn monthly_volume_splits_approved_and_pending() {
        let mut a = review("a", "P", "2024-03-02T10:00:00Z", 9.0);
        a.is_approved = true;
        let b = review("b", "P", "2023-03-20T10:00:00Z", 9.0);
        let c = review("c", "P", "2024-01-05T10:00:00Z", 9.0);
        let d = review("d", "P", "garbage", 9.0);

        let out = monthly_volume(&[a, b, c, d]);
        assert_eq!(
            out,
            vec![
                MonthlyVolume {
                    month: "Jan",
                    approved: 0,
                    pending: 1
                },
                MonthlyVolume {
                    month: "Mar",
                    approved: 1,
                    pending: 1
                },
            ]
        );
    }

    #[test]
    fn monthly_trend_uses_first_three_properties() {
        let properties = vec![
            property("Alpha"),
            property("Beta"),
            property("Alpha"),
            property("Gamma"),
            property("Delta"),
        ];
        let reviews = vec![
            review("1", "Alpha", "2024-02-01T00:00:00Z", 9.0),
            review("2", "Alpha", "2023-02-11T00:00:00Z", 8.0),
            review("3", "Gamma", "2024-02-11T00:00:00Z", 10.0),
            review("4", "Delta", "2024-05-11T00:00:00Z", 7.0),
            review("5", "Beta", "2024-01-11T00:00:00Z", 9.4),
        ];

        let trend = monthly_trend(&reviews, &properties);
        assert_eq!(trend.properties, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(trend.points.len(), 2, "May only has Delta and is omitted");
        assert_eq!(trend.points[0].month, "Jan");
        assert_eq!(trend.points[0].slots, [None, Some(9.4), None]);
        assert_eq!(trend.points[1].month, "Feb");
        assert_eq!(trend.points[1].slots, [Some(8.5), None, Some(10.0)]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(category_averages(&[]).is_empty());
        assert!(channel_distribution(&[]).is_empty());
        assert!(monthly_volume(&[]).is_empty());
        let trend = monthly_trend(&[], &[property("Alpha")]);
        assert!(trend.points.is_empty());
    }

    #[test]
    fn aggregates_are_idempotent() {
        let mut a = review("a", "Alpha", "2024-06-01T00:00:00Z", 9.0);
        a.review_categories = vec![category("communication", 9.0)];
        a.is_approved = true;
        let b = review("b", "Alpha", "2024-07-01T00:00:00Z", 7.0);
        let reviews = vec![a, b];

        assert_eq!(category_averages(&reviews), category_averages(&reviews));
        assert_eq!(
            channel_distribution(&reviews),
            channel_distribution(&reviews)
        );
        assert_eq!(monthly_volume(&reviews), monthly_volume(&reviews));
    }
}
