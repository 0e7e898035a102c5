use std::cmp::Ordering;

use crate::review::Review;

/// Column the review table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    ListingName,
    GuestName,
    AverageRating,
    SubmittedAt,
    Channel,
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::ListingName => write!(f, "listing_name"),
            SortField::GuestName => write!(f, "guest_name"),
            SortField::AverageRating => write!(f, "average_rating"),
            SortField::SubmittedAt => write!(f, "submitted_at"),
            SortField::Channel => write!(f, "channel"),
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "listing_name" | "property" => Ok(SortField::ListingName),
            "guest_name" | "guest" => Ok(SortField::GuestName),
            "average_rating" | "rating" => Ok(SortField::AverageRating),
            "submitted_at" | "date" => Ok(SortField::SubmittedAt),
            "channel" => Ok(SortField::Channel),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

/// Current ordering of the review table. Newest first by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::SubmittedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Stable sort of `reviews` by `sort`.
///
/// Ties keep their input order in both directions. Missing ratings and
/// unparsable timestamps order before every present value when ascending.
pub fn sort_reviews(reviews: &mut [&Review], sort: SortState) {
    reviews.sort_by(|a, b| {
        let ord = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Review, b: &Review, field: SortField) -> Ordering {
    match field {
        SortField::ListingName => a.listing_name.cmp(&b.listing_name),
        SortField::GuestName => a.guest_name.cmp(&b.guest_name),
        SortField::Channel => a.channel.cmp(&b.channel),
        SortField::SubmittedAt => a.submitted_instant().cmp(&b.submitted_instant()),
        SortField::AverageRating => match (a.effective_rating(), b.effective_rating()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        },
    }
}
