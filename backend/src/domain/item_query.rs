//! Listing pipeline: filter, sort and paginate an item snapshot.
//!
//! Everything here is pure. The catalog service loads the full snapshot and
//! hands it to [`run_item_query`]; the same snapshot also feeds the featured
//! strip and the category summary.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use icu_collator::{Collator, CollatorOptions};
use pagination::{Page, PageRequest, PageWindow};
use tracing::warn;

use super::{DEFAULT_CATEGORY, Item};

/// Items per listing page.
pub const PAGE_SIZE: usize = 9;
const LISTING_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(PAGE_SIZE) {
    Some(size) => size,
    None => panic!("listing page size must be non-zero"),
};

/// Items shown in the featured strip.
pub const FEATURED_COUNT: usize = 3;
/// Categories shown in the category summary.
pub const CATEGORY_SUMMARY_LIMIT: usize = 6;

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Most recently created first.
    #[default]
    Newest,
    /// Name, alphabetical.
    NameAsc,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
}

impl SortMode {
    /// Parse a client-supplied sort key. Unknown keys mean [`SortMode::Newest`].
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::SortMode;
    ///
    /// assert_eq!(SortMode::parse("price-desc"), SortMode::PriceDesc);
    /// assert_eq!(SortMode::parse("cheapest"), SortMode::Newest);
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "name-asc" => Self::NameAsc,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::NameAsc => "name-asc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// Filter, sort and page requested by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Free text matched against name and description; empty matches all.
    pub text: String,
    /// Exact category; empty matches all.
    pub category: String,
    /// Ordering.
    pub sort: SortMode,
    /// Requested 1-based page.
    pub page: usize,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: String::new(),
            sort: SortMode::Newest,
            page: 1,
        }
    }
}

impl ItemQuery {
    /// Build a query from raw parameters, trimming text inputs.
    pub fn new(text: &str, category: &str, sort: SortMode, page: usize) -> Self {
        Self {
            text: text.trim().to_owned(),
            category: category.trim().to_owned(),
            sort,
            page: page.max(1),
        }
    }
}

/// One page of a listing plus the categories available for filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemListing {
    /// The page slice and navigation metadata.
    pub page: Page<Item>,
    /// Distinct categories across the unfiltered snapshot, sorted.
    pub categories: Vec<String>,
}

/// Number of items in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category name; blank categories count as [`DEFAULT_CATEGORY`].
    pub name: String,
    /// Number of items.
    pub count: usize,
}

/// Apply `query` to the full `items` snapshot.
///
/// # Examples
/// ```
/// use catalog::domain::{run_item_query, ItemQuery};
///
/// let listing = run_item_query(Vec::new(), &ItemQuery::default());
/// assert_eq!(listing.page.total, 0);
/// assert_eq!(listing.page.total_pages, 1);
/// ```
pub fn run_item_query(items: Vec<Item>, query: &ItemQuery) -> ItemListing {
    let categories = distinct_categories(&items);

    let needle = query.text.to_lowercase();
    let mut matched: Vec<Item> = items
        .into_iter()
        .filter(|item| matches_text(item, &needle) && matches_category(item, &query.category))
        .collect();
    sort_items(&mut matched, query.sort);

    let request = PageRequest::with_size(query.page, LISTING_PAGE_SIZE);
    let window = PageWindow::resolve(request, matched.len());
    ItemListing {
        page: Page::from_window(window, matched),
        categories,
    }
}

/// The newest items, for the featured strip.
pub fn featured_items(mut items: Vec<Item>) -> Vec<Item> {
    sort_items(&mut items, SortMode::Newest);
    items.truncate(FEATURED_COUNT);
    items
}

/// Largest categories by item count.
pub fn summarise_categories(items: &[Item]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let name = match item.category.trim() {
            "" => DEFAULT_CATEGORY,
            name => name,
        };
        *counts.entry(name).or_default() += 1;
    }

    let mut summary: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_owned(),
            count,
        })
        .collect();
    summary.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| collate(&a.name, &b.name)));
    summary.truncate(CATEGORY_SUMMARY_LIMIT);
    summary
}

fn matches_text(item: &Item, needle: &str) -> bool {
    needle.is_empty()
        || item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
}

fn matches_category(item: &Item, category: &str) -> bool {
    category.is_empty() || item.category == category
}

fn distinct_categories(items: &[Item]) -> Vec<String> {
    let mut categories: Vec<String> = items
        .iter()
        .filter(|item| !item.category.trim().is_empty())
        .map(|item| item.category.clone())
        .collect();
    categories.sort_by(|a, b| collate(a, b));
    categories.dedup();
    categories
}

/// `sort_by` is stable, so items that compare equal keep snapshot order.
fn sort_items(items: &mut [Item], mode: SortMode) {
    match mode {
        SortMode::Newest => items.sort_by_key(|item| std::cmp::Reverse(created_millis(item))),
        SortMode::NameAsc => items.sort_by(|a, b| collate(&a.name, &b.name)),
        SortMode::PriceAsc => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => items.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
}

fn created_millis(item: &Item) -> i64 {
    item.created_at.map_or(0, |at| at.timestamp_millis())
}

/// Root-locale Unicode collation, built once per worker thread.
struct NameOrder(Option<Collator>);

impl NameOrder {
    fn new() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self(Some(collator)),
            Err(err) => {
                warn!(error = %err, "root collation unavailable; ordering by case-folded text");
                Self(None)
            }
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| b.cmp(a)),
        }
    }
}

thread_local! {
    static NAME_ORDER: NameOrder = NameOrder::new();
}

/// Locale-aware comparison: accents and case are secondary to the base
/// letters, and lowercase sorts ahead of uppercase when nothing else differs.
fn collate(a: &str, b: &str) -> Ordering {
    NAME_ORDER.with(|order| order.compare(a, b))
}
