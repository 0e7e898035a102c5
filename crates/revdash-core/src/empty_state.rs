/// Why a review listing has nothing to show.
///
/// These are not errors; each cause gets its own message and follow-up action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    /// The backend holds no reviews at all.
    NoReviews,
    /// Reviews exist but the active filters exclude all of them.
    NoMatches,
    /// The public page has no approved reviews to show.
    NoApproved,
}

impl EmptyState {
    /// Classify a manager listing. Returns `None` when there is something to render.
    #[must_use]
    pub fn for_listing(loading: bool, total: usize, visible: usize) -> Option<Self> {
        if loading {
            Some(EmptyState::Loading)
        } else if total == 0 {
            Some(EmptyState::NoReviews)
        } else if visible == 0 {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// Classify the public page, which only ever lists approved reviews.
    #[must_use]
    pub fn for_public_page(loading: bool, approved: usize) -> Option<Self> {
        if loading {
            Some(EmptyState::Loading)
        } else if approved == 0 {
            Some(EmptyState::NoApproved)
        } else {
            None
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading reviews...",
            EmptyState::NoReviews => "No reviews yet",
            EmptyState::NoMatches => "No reviews match your filters",
            EmptyState::NoApproved => "No approved reviews",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            EmptyState::Loading => "Please wait while we fetch your reviews",
            EmptyState::NoReviews => "Reviews will appear here once guests leave feedback",
            EmptyState::NoMatches => "Try adjusting your filters or search terms",
            EmptyState::NoApproved => {
                "Approve reviews from the manager dashboard to display them here"
            }
        }
    }

    /// Label of the follow-up action, if the state offers one.
    #[must_use]
    pub fn action(self) -> Option<&'static str> {
        match self {
            EmptyState::Loading => None,
            EmptyState::NoReviews => Some("Sync Reviews"),
            EmptyState::NoMatches => Some("Clear filters"),
            EmptyState::NoApproved => Some("Go to dashboard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_wins_over_counts() {
        assert_eq!(
            EmptyState::for_listing(true, 0, 0),
            Some(EmptyState::Loading)
        );
        assert_eq!(
            EmptyState::for_public_page(true, 3),
            Some(EmptyState::Loading)
        );
    }

    #[test]
    fn distinguishes_no_data_from_no_matches() {
        assert_eq!(
            EmptyState::for_listing(false, 0, 0),
            Some(EmptyState::NoReviews)
        );
        assert_eq!(
            EmptyState::for_listing(false, 12, 0),
            Some(EmptyState::NoMatches)
        );
        assert_eq!(EmptyState::for_listing(false, 12, 4), None);
    }

    #[test]
    fn public_page_without_approved_reviews() {
        assert_eq!(
            EmptyState::for_public_page(false, 0),
            Some(EmptyState::NoApproved)
        );
        assert_eq!(EmptyState::NoApproved.action(), Some("Go to dashboard"));
        assert_eq!(EmptyState::Loading.action(), None);
    }
}
