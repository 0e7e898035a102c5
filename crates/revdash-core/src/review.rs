//! Review and property aggregate types as served by the reviews backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Channel label used for reviews that arrive without one.
pub const DEFAULT_CHANNEL: &str = "Direct";

/// A single category score attached to a review, e.g. `cleanliness: 9`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCategory {
    pub category: String,
    pub rating: f64,
}

/// One guest review of one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(default)]
    pub listing_id: Option<String>,
    pub listing_name: String,
    #[serde(default)]
    pub property_id: Option<String>,
    /// `"guest-to-host"` or `"host-to-guest"` on reviews pulled from Hostaway.
    #[serde(default)]
    pub review_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub guest_name: String,
    /// Overall rating on a 0-10 scale. The backend fills this from the raw
    /// rating or, when that is absent, from the category mean.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Raw overall rating as reported by the channel.
    #[serde(default)]
    pub rating: Option<f64>,
    /// ISO-8601 timestamp, kept as the backend sent it.
    pub submitted_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub channel: String,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub public_review: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_categories: Vec<ReviewCategory>,
}

impl Review {
    /// The overall rating used for filtering, sorting and charts.
    ///
    /// Falls back from `average_rating` to `rating` to the mean of the
    /// category ratings; `None` when the review carries no score at all.
    #[must_use]
    pub fn effective_rating(&self) -> Option<f64> {
        self.average_rating
            .or(self.rating)
            .or_else(|| category_mean(&self.review_categories))
    }

    /// Parsed submission instant, `None` when `submitted_at` is malformed.
    #[must_use]
    pub fn submitted_instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.submitted_at)
    }

    /// Channel name with the empty value mapped to [`DEFAULT_CHANNEL`].
    #[must_use]
    pub fn channel_label(&self) -> &str {
        if self.channel.trim().is_empty() {
            DEFAULT_CHANNEL
        } else {
            &self.channel
        }
    }

    #[must_use]
    pub fn flag(&self, flag: ReviewFlag) -> bool {
        match flag {
            ReviewFlag::Approved => self.is_approved,
            ReviewFlag::Featured => self.is_featured,
        }
    }

    pub fn set_flag(&mut self, flag: ReviewFlag, value: bool) {
        match flag {
            ReviewFlag::Approved => self.is_approved = value,
            ReviewFlag::Featured => self.is_featured = value,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn category_mean(categories: &[ReviewCategory]) -> Option<f64> {
    if categories.is_empty() {
        return None;
    }
    let sum: f64 = categories.iter().map(|c| c.rating).sum();
    Some(sum / categories.len() as f64)
}

/// The two manager-controlled flags on a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewFlag {
    Approved,
    Featured,
}

impl std::fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewFlag::Approved => write!(f, "approved"),
            ReviewFlag::Featured => write!(f, "featured"),
        }
    }
}

/// Coarse direction of a property's recent ratings, computed by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl From<String> for Trend {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "improving" => Trend::Improving,
            "declining" => Trend::Declining,
            _ => Trend::Stable,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Declining => write!(f, "declining"),
        }
    }
}

/// Per-category average ratings for one property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingsBreakdown {
    #[serde(default)]
    pub cleanliness: f64,
    #[serde(default)]
    pub communication: f64,
    #[serde(default)]
    pub location: f64,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub amenities: f64,
}

impl RatingsBreakdown {
    /// Label/value pairs in display order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("cleanliness", self.cleanliness),
            ("communication", self.communication),
            ("location", self.location),
            ("value", self.value),
            ("amenities", self.amenities),
        ]
    }
}

/// Backend-computed statistics for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAggregate {
    pub property_id: String,
    pub listing_name: String,
    pub average_rating: f64,
    pub total_reviews: u32,
    #[serde(default)]
    pub recent_trend: Trend,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ratings_breakdown: RatingsBreakdown,
    #[serde(default)]
    pub approved_count: u32,
    #[serde(default)]
    pub featured_count: u32,
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2024-03-01T10:00:00Z`), naive ISO date-times as
/// emitted by the backend (`2024-03-01T10:00:00`, `2024-03-01 10:00:00`),
/// and bare dates. Naive values are taken as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_json() -> serde_json::Value {
        serde_json::json!({
            "id": "7453",
            "listing_id": "L1",
            "listing_name": "2B N1 A - 29 Shoreditch Heights",
            "property_id": "P1",
            "review_type": "guest-to-host",
            "status": "published",
            "rating": null,
            "average_rating": 9.5,
            "public_review": "Lovely stay",
            "review_categories": [
                { "category": "cleanliness", "rating": 10 },
                { "category": "communication", "rating": 9 }
            ],
            "guest_name": "Shane Finkelstein",
            "channel": "Airbnb",
            "submitted_at": "2024-08-21T22:45:14",
            "is_approved": true,
            "is_featured": false
        })
    }

    #[test]
    fn deserializes_backend_review() {
        let review: Review = serde_json::from_value(review_json()).unwrap();
        assert_eq!(review.id, "7453");
        assert_eq!(review.average_rating, Some(9.5));
        assert_eq!(review.review_categories.len(), 2);
        assert!(review.is_approved);
        assert!(!review.is_featured);
    }

    #[test]
    fn null_channel_and_categories_default() {
        let mut json = review_json();
        json["channel"] = serde_json::Value::Null;
        json["review_categories"] = serde_json::Value::Null;
        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.channel, "");
        assert_eq!(review.channel_label(), "Direct");
        assert!(review.review_categories.is_empty());
    }

    #[test]
    fn effective_rating_falls_back_to_category_mean() {
        let mut json = review_json();
        json["average_rating"] = serde_json::Value::Null;
        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.effective_rating(), Some(9.5));

        let mut json = review_json();
        json["average_rating"] = serde_json::Value::Null;
        json["rating"] = serde_json::json!(7.0);
        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.effective_rating(), Some(7.0));
    }

    #[test]
    fn effective_rating_none_without_any_score() {
        let mut json = review_json();
        json["average_rating"] = serde_json::Value::Null;
        json["review_categories"] = serde_json::json!([]);
        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.effective_rating(), None);
    }

    #[test]
    fn parse_timestamp_accepts_backend_formats() {
        assert!(parse_timestamp("2024-03-01T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-03-01T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-03-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-03-01 10:00:00").is_some());
        assert!(parse_timestamp("2024-03-01").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn trend_unknown_value_is_stable() {
        let trend: Trend = serde_json::from_value(serde_json::json!("volatile")).unwrap();
        assert_eq!(trend, Trend::Stable);
        let trend: Trend = serde_json::from_value(serde_json::json!("improving")).unwrap();
        assert_eq!(trend, Trend::Improving);
        assert_eq!(serde_json::to_value(Trend::Declining).unwrap(), "declining");
    }

    #[test]
    fn property_aggregate_tolerates_partial_breakdown() {
        let property: PropertyAggregate = serde_json::from_value(serde_json::json!({
            "property_id": "P1",
            "listing_name": "Shoreditch Heights",
            "average_rating": 9.2,
            "total_reviews": 12,
            "recent_trend": "declining",
            "ratings_breakdown": { "cleanliness": 9.5 },
            "approved_count": 4,
            "featured_count": 1
        }))
        .unwrap();
        assert_eq!(property.recent_trend, Trend::Declining);
        assert!((property.ratings_breakdown.cleanliness - 9.5).abs() < f64::EPSILON);
        assert!(property.ratings_breakdown.amenities.abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_entries_keep_display_order() {
        let breakdown = RatingsBreakdown {
            cleanliness: 9.0,
            communication: 8.5,
            location: 10.0,
            value: 7.0,
            amenities: 6.5,
        };
        let labels: Vec<&str> = breakdown
            .entries()
            .iter()
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            labels,
            vec!["cleanliness", "communication", "location", "value", "amenities"]
        );
        let (label, score) = breakdown.entries()[3];
        assert_eq!(label, "value");
        assert!((score - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_flag_updates_matching_field() {
        let mut review: Review = serde_json::from_value(review_json()).unwrap();
        review.set_flag(ReviewFlag::Featured, true);
        review.set_flag(ReviewFlag::Approved, false);
        assert!(review.flag(ReviewFlag::Featured));
        assert!(!review.flag(ReviewFlag::Approved));
    }
}
