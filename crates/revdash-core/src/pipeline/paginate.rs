/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of an ordered sequence plus the bookkeeping the pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page that was requested (not clamped).
    pub page: usize,
    pub page_size: usize,
    /// Length of the full sequence before slicing.
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items[(page-1)*page_size .. page*page_size]`.
///
/// Pages past the end, page `0` and `page_size == 0` all yield an empty
/// slice rather than an error; clamping is the caller's job.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let slice: &[T] = if page == 0 || page_size == 0 {
        &[]
    } else {
        let start = (page - 1).saturating_mul(page_size).min(total_items);
        let end = start.saturating_add(page_size).min(total_items);
        &items[start..end]
    };

    Page {
        items: slice.to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}
