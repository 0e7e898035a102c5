//! Request and response bodies of the reviews backend.
//!
//! Review and property records themselves live in `revdash-core`; this
//! module only models the envelopes around them.

use revdash_core::{PropertyAggregate, Review};
use serde::{Deserialize, Serialize};

/// `GET /api/reviews` and `GET /api/reviews/hostaway`: `{ data, total }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListResponse {
    #[serde(default)]
    pub data: Vec<Review>,
    #[serde(default)]
    pub total: usize,
}

/// `GET /api/reviews/stats/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_reviews: usize,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_properties: usize,
    /// Not every backend version reports this; the dashboard recomputes it
    /// from the loaded reviews.
    #[serde(default)]
    pub pending_approvals: usize,
    #[serde(default)]
    pub properties: Vec<PropertyAggregate>,
}

/// `POST /api/reviews/sync` response; both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub total_synced: Option<usize>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a sync with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub total_synced: usize,
    pub message: String,
}

impl From<SyncResponse> for SyncSummary {
    fn from(resp: SyncResponse) -> Self {
        let total_synced = resp.total_synced.unwrap_or(0);
        let message = resp
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Synced {total_synced} new reviews"));
        Self {
            total_synced,
            message,
        }
    }
}

/// `PATCH /api/reviews/{id}` body. Absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl ReviewUpdate {
    #[must_use]
    pub fn flag(flag: revdash_core::ReviewFlag, value: bool) -> Self {
        match flag {
            revdash_core::ReviewFlag::Approved => Self {
                is_approved: Some(value),
                is_featured: None,
            },
            revdash_core::ReviewFlag::Featured => Self {
                is_approved: None,
                is_featured: Some(value),
            },
        }
    }
}

/// Server-side filters for `GET /api/reviews`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    pub property_id: Option<String>,
    pub channel: Option<String>,
    pub min_rating: Option<f64>,
    pub is_approved: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ReviewQuery {
    /// Approved reviews of one property, as shown on its public page.
    #[must_use]
    pub fn approved_for_property(property_id: &str) -> Self {
        Self {
            property_id: Some(property_id.to_owned()),
            is_approved: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(ref v) = self.property_id {
            pairs.push(("property_id", v.clone()));
        }
        if let Some(ref v) = self.channel {
            pairs.push(("channel", v.clone()));
        }
        if let Some(v) = self.min_rating {
            pairs.push(("min_rating", v.to_string()));
        }
        if let Some(v) = self.is_approved {
            pairs.push(("is_approved", v.to_string()));
        }
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        if let Some(v) = self.offset {
            pairs.push(("offset", v.to_string()));
        }
        pairs
    }

    /// Stable cache key for this query.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let params: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("reviews?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_summary_defaults_when_fields_missing() {
        let summary = SyncSummary::from(SyncResponse::default());
        assert_eq!(summary.total_synced, 0);
        assert_eq!(summary.message, "Synced 0 new reviews");

        let summary = SyncSummary::from(SyncResponse {
            total_synced: Some(4),
            message: None,
        });
        assert_eq!(summary.message, "Synced 4 new reviews");
    }

    #[test]
    fn sync_summary_keeps_backend_message() {
        let resp: SyncResponse = serde_json::from_value(serde_json::json!({
            "status": "success",
            "message": "Synced 2 new reviews from Hostaway",
            "total_synced": 2
        }))
        .unwrap();
        let summary = SyncSummary::from(resp);
        assert_eq!(summary.total_synced, 2);
        assert_eq!(summary.message, "Synced 2 new reviews from Hostaway");
    }

    #[test]
    fn review_update_serializes_only_set_fields() {
        let body = serde_json::to_value(ReviewUpdate::flag(
            revdash_core::ReviewFlag::Featured,
            true,
        ))
        .unwrap();
        assert_eq!(body, serde_json::json!({ "is_featured": true }));
    }

    #[test]
    fn query_pairs_skip_unset_filters() {
        let query = ReviewQuery {
            channel: Some("Airbnb".to_string()),
            min_rating: Some(8.5),
            ..ReviewQuery::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("channel", "Airbnb".to_string()),
                ("min_rating", "8.5".to_string())
            ]
        );
        assert_eq!(ReviewQuery::default().cache_key(), "reviews?");
        assert_eq!(
            ReviewQuery::approved_for_property("P1").cache_key(),
            "reviews?property_id=P1&is_approved=true"
        );
    }

    #[test]
    fn dashboard_stats_without_pending_approvals() {
        let stats: DashboardStats = serde_json::from_value(serde_json::json!({
            "total_reviews": 3,
            "total_properties": 1,
            "average_rating": 9.1,
            "properties": []
        }))
        .unwrap();
        assert_eq!(stats.pending_approvals, 0);
        assert_eq!(stats.total_reviews, 3);
    }
}
