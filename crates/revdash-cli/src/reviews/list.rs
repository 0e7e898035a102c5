//! Read-only review listing handlers.

use revdash_client::Dashboard;
use revdash_core::{filter_options, EmptyState, FilterState, SortState, ALL};

use super::{fmt_date, fmt_rating, fmt_status, load_source, truncate, ListArgs, Source};

/// Print one page of reviews through the filter, sort and paginate pipeline.
///
/// # Errors
///
/// Returns an error if the reviews cannot be fetched or the page size is zero.
pub(crate) async fn run_reviews_list(
    dashboard: &mut Dashboard,
    args: ListArgs,
    default_page_size: usize,
) -> anyhow::Result<()> {
    let page_size = args.page_size.unwrap_or(default_page_size);
    if page_size == 0 {
        anyhow::bail!("--page-size must be greater than zero");
    }

    load_source(dashboard, args.source).await?;

    let filter = FilterState {
        search: args.search.unwrap_or_default(),
        property: args.property.unwrap_or_else(|| ALL.to_string()),
        channel: args.channel.unwrap_or_else(|| ALL.to_string()),
        min_rating: args.min_rating,
        approved_only: args.approved_only,
    };
    let sort = SortState {
        field: args.sort,
        direction: args.direction,
    };
    let page = dashboard.view(&filter, sort, args.page, page_size);

    let loaded = dashboard.reviews().len();
    if let Some(empty) = EmptyState::for_listing(false, loaded, page.total_items) {
        println!("{}: {}", empty.title(), empty.description());
        match empty {
            EmptyState::NoReviews => println!("run `revdash sync` to pull reviews"),
            EmptyState::NoMatches => println!("run without filters to see every review"),
            EmptyState::Loading | EmptyState::NoApproved => {}
        }
        return Ok(());
    }

    if page.items.is_empty() {
        println!(
            "page {} is past the last page ({} pages of {} reviews)",
            args.page, page.total_pages, page.total_items
        );
        return Ok(());
    }

    println!(
        "{:<10}{:<32}{:<20}{:<8}{:<14}{:<12}STATUS",
        "ID", "PROPERTY", "GUEST", "RATING", "CHANNEL", "DATE"
    );
    for review in &page.items {
        println!(
            "{:<10}{:<32}{:<20}{:<8}{:<14}{:<12}{}",
            truncate(&review.id, 8),
            truncate(&review.listing_name, 28),
            truncate(&review.guest_name, 17),
            fmt_rating(review.effective_rating()),
            review.channel_label(),
            fmt_date(&review.submitted_at),
            fmt_status(review),
        );
    }
    println!();
    println!(
        "page {} of {} ({} reviews, sorted by {} {}){}{}",
        page.page,
        page.total_pages,
        page.total_items,
        sort.field,
        sort.direction,
        if page.has_previous() { ", --page for earlier" } else { "" },
        if page.has_next() { ", more on next page" } else { "" },
    );
    println!("{} pending approval", dashboard.pending_approvals());

    Ok(())
}

/// Print the distinct property and channel filter values.
///
/// # Errors
///
/// Returns an error if the reviews cannot be fetched.
pub(crate) async fn run_reviews_options(
    dashboard: &mut Dashboard,
    source: Source,
) -> anyhow::Result<()> {
    load_source(dashboard, source).await?;
    let options = filter_options(dashboard.reviews());

    println!("PROPERTIES");
    for property in &options.properties {
        println!("  {property}");
    }
    println!("CHANNELS");
    for channel in &options.channels {
        println!("  {channel}");
    }
    Ok(())
}
