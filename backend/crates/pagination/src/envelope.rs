//! Serialisable page envelope.

use serde::{Deserialize, Serialize};

use crate::window::PageWindow;

/// One page of results plus the metadata clients need for navigation.
///
/// Serialises with camelCase keys:
///
/// ```json
/// {"items": [], "total": 0, "page": 1, "totalPages": 1, "pageSize": 9}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on the effective page.
    pub items: Vec<T>,
    /// Number of items across every page.
    pub total: usize,
    /// Effective 1-based page number after clamping.
    pub page: usize,
    /// Number of pages available; never less than one.
    pub total_pages: usize,
    /// Maximum number of items per page.
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Slice `items` with `window` and wrap the result.
    ///
    /// `items` must hold the full, already filtered and ordered collection
    /// whose length `window` was resolved against.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest, PageWindow};
    ///
    /// let items = vec!["a", "b", "c"];
    /// let request = PageRequest::new(2, 2).expect("non-zero page size");
    /// let window = PageWindow::resolve(request, items.len());
    /// let page = Page::from_window(window, items);
    /// assert_eq!(page.items, vec!["c"]);
    /// assert_eq!(page.total_pages, 2);
    /// ```
    #[must_use]
    pub fn from_window(window: PageWindow, items: Vec<T>) -> Self {
        Self {
            items: window.take(items),
            total: window.total(),
            page: window.page(),
            total_pages: window.total_pages(),
            page_size: window.page_size(),
        }
    }

    /// Convert every item while keeping the navigation metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
            page_size: self.page_size,
        }
    }
}
