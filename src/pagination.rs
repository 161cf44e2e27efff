//! In-memory pagination over already-ordered collections.
//!
//! Slicing happens after the rows are fetched; the input order is the page
//! order. Pages are zero-indexed and every page except possibly the last
//! holds exactly `per_page` items.

use std::error::Error;
use std::fmt;

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page, in input order.
    pub items: Vec<T>,
    /// Zero-indexed page number.
    pub page: usize,
    /// Requested page size.
    pub per_page: usize,
    /// The highest valid page number for this collection.
    pub last_page: usize,
    /// Total item count across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// True when a following page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.last_page
    }
}

/// Invalid pagination requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// `per_page` was zero.
    ZeroPerPage,
    /// The requested page lies beyond the last one.
    OutOfRange { page: usize, last_page: usize },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::ZeroPerPage => write!(f, "per_page must be positive"),
            PageError::OutOfRange { page, last_page } => {
                write!(f, "page {page} is out of range (last page is {last_page})")
            }
        }
    }
}

impl Error for PageError {}

/// The highest valid page number for a collection of `total` items.
///
/// An empty collection still has page 0, so this is never past-the-end.
pub fn last_page(total: usize, per_page: usize) -> Result<usize, PageError> {
    if per_page == 0 {
        return Err(PageError::ZeroPerPage);
    }
    if total == 0 {
        return Ok(0);
    }
    Ok((total - 1) / per_page)
}

/// Slice out one page of `items` without reordering them.
///
/// Page 0 of an empty collection is valid and empty; any later page of any
/// collection that does not reach it is `OutOfRange`.
pub fn paginate<T>(items: Vec<T>, per_page: usize, page: usize) -> Result<Page<T>, PageError> {
    let last_page = last_page(items.len(), per_page)?;
    if page > last_page {
        return Err(PageError::OutOfRange { page, last_page });
    }

    let total = items.len();
    let items = items
        .into_iter()
        .skip(page * per_page)
        .take(per_page)
        .collect();

    Ok(Page {
        items,
        page,
        per_page,
        last_page,
        total,
    })
}
