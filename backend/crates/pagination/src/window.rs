//! Page request validation and window resolution.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Errors raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The page size must hold at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// A client request for one page of a listing.
///
/// Page numbers are 1-based. A page number of zero is normalised to the
/// first page, mirroring how listings treat missing or nonsensical input.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(0, 9).expect("non-zero page size");
/// assert_eq!(request.page(), 1);
/// assert_eq!(request.page_size(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Build a request for `page` with `page_size` items per page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `page_size` is zero.
    pub const fn new(page: usize, page_size: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(page_size) {
            Some(size) => Ok(Self::with_size(page, size)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Build a request for `page` with a page size known to be non-zero.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use pagination::PageRequest;
    ///
    /// let size = NonZeroUsize::new(9).expect("non-zero");
    /// assert_eq!(PageRequest::with_size(3, size).page(), 3);
    /// ```
    #[must_use]
    pub const fn with_size(page: usize, page_size: NonZeroUsize) -> Self {
        let normalised = if page == 0 { 1 } else { page };
        Self {
            page: normalised,
            page_size: page_size.get(),
        }
    }

    /// Requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }
}

/// A page request resolved against the number of available items.
///
/// ## Invariants
/// - `total_pages >= 1`, even when `total == 0`.
/// - `1 <= page <= total_pages`.
///
/// # Examples
/// ```
/// use pagination::{PageRequest, PageWindow};
///
/// let request = PageRequest::new(5, 9).expect("non-zero page size");
/// let window = PageWindow::resolve(request, 20);
/// assert_eq!(window.total_pages(), 3);
/// assert_eq!(window.page(), 3);
/// assert_eq!(window.offset(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: usize,
    page_size: usize,
    total: usize,
    total_pages: usize,
}

impl PageWindow {
    /// Clamp `request` into the pages available for `total` items.
    #[must_use]
    pub const fn resolve(request: PageRequest, total: usize) -> Self {
        let page_size = request.page_size();
        let counted = total.div_ceil(page_size);
        let total_pages = if counted == 0 { 1 } else { counted };
        let page = if request.page() > total_pages {
            total_pages
        } else {
            request.page()
        };
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }

    /// Effective 1-based page number after clamping.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total number of items across every page.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of pages available; never less than one.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Index of the first item on the effective page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Keep only the items that fall on the effective page.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageWindow};
    ///
    /// let items: Vec<u32> = (1..=20).collect();
    /// let request = PageRequest::new(3, 9).expect("non-zero page size");
    /// let window = PageWindow::resolve(request, items.len());
    /// assert_eq!(window.take(items), vec![19, 20]);
    /// ```
    #[must_use]
    pub fn take<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect()
    }
}
