// ── Derived views ──
//
// Pure functions over a collection snapshot. Views compose as
// filter -> sort -> paginate, and the page count is taken from the
// filtered set. Nothing here mutates the collection.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::Product;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

// ── Sorting ──────────────────────────────────────────────────────────

/// Sortable columns. Description is deliberately absent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `▲` / `▼`, for column headers.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Active sort column and direction. Defaults to id ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header-click rule: the active key while ascending flips to
    /// descending; anything else selects `requested` ascending.
    pub fn toggle(self, requested: SortKey) -> Self {
        if requested == self.key && self.direction == SortDirection::Ascending {
            Self::new(requested, SortDirection::Descending)
        } else {
            Self::new(requested, SortDirection::Ascending)
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        let ord = match self.key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Price => a.price.cmp(&b.price),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Stable sort: equal keys keep their collection order in both directions.
pub fn sort_products(items: &mut [Arc<Product>], sort: SortState) {
    items.sort_by(|a, b| sort.compare(a, b));
}

// ── Filtering ────────────────────────────────────────────────────────

/// Keep products whose name or description contains `search`,
/// ignoring case. An empty search keeps everything.
pub fn filter_products(items: &[Arc<Product>], search: &str) -> Vec<Arc<Product>> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|p| p.matches_search(&needle))
        .cloned()
        .collect()
}

// ── Pagination ───────────────────────────────────────────────────────

/// `ceil(total / page_size)`; zero items (or a zero page size) means zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The 1-based `page` of `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Snap `page` into `[1, page_count]`; with no pages, page 1.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

// ── Composition ──────────────────────────────────────────────────────

/// Everything needed to derive one page from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    pub sort: SortState,
    pub search: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            sort: SortState::default(),
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One rendered page plus the numbers the footer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub items: Vec<Arc<Product>>,
    pub page: usize,
    pub page_count: usize,
    /// Number of products that passed the filter.
    pub matched: usize,
}

impl ViewQuery {
    /// filter -> sort -> paginate.
    pub fn apply(&self, items: &[Arc<Product>]) -> PageView {
        let mut matched = filter_products(items, &self.search);
        sort_products(&mut matched, self.sort);
        let pages = page_count(matched.len(), self.page_size);
        PageView {
            items: paginate(&matched, self.page, self.page_size).to_vec(),
            page: self.page,
            page_count: pages,
            matched: matched.len(),
        }
    }

    /// filter -> sort, without paging (CLI `--all`).
    pub fn apply_unpaged(&self, items: &[Arc<Product>]) -> Vec<Arc<Product>> {
        let mut matched = filter_products(items, &self.search);
        sort_products(&mut matched, self.sort);
        matched
    }
}

// ── Summary ──────────────────────────────────────────────────────────

/// Price statistics over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceSummary {
    pub count: usize,
    pub total: i64,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub average: Option<f64>,
}

impl PriceSummary {
    pub fn from_products(items: &[Arc<Product>]) -> Self {
        let count = items.len();
        let total = items.iter().fold(0i64, |acc, p| acc.saturating_add(p.price));
        let min = items.iter().map(|p| p.price).min();
        let max = items.iter().map(|p| p.price).max();
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        let average = (count > 0).then(|| total as f64 / count as f64);
        Self {
            count,
            total,
            min,
            max,
            average,
        }
    }
}
