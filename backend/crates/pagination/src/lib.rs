//! Page-number pagination for catalog listings.
//!
//! Listings are addressed by a 1-based page number and a fixed page size.
//! Requests never fail because the page is out of range: the requested page
//! is clamped into `[1, total_pages]`, and an empty collection still reports
//! a single (empty) page.
//!
//! - [`PageRequest`] captures what the client asked for.
//! - [`PageWindow`] resolves a request against a known total.
//! - [`Page`] is the serialisable envelope returned to clients.

mod envelope;
mod window;

pub use envelope::Page;
pub use window::{PageRequest, PageWindow, PaginationError};
