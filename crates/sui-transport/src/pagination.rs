//! Cursor pagination for JSON-RPC list methods.
//!
//! ```ignore
//! let paginator = Paginator::new(usize::MAX, |cursor, page_size| {
//!     client
//!         .get_dynamic_fields(parent, cursor, page_size)
//!         .map(Page::into_parts)
//! });
//! let all = paginator.collect_all()?;
//! ```

use crate::types::Page;
use anyhow::Result;
use tracing::debug;

/// Maximum items per JSON-RPC page (fullnode query limit).
pub const MAX_PAGE_SIZE: usize = 50;

/// Cursor state reported with each page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Split a page into its items and cursor state.
    pub fn into_parts(self) -> (Vec<T>, PageInfo) {
        (
            self.data,
            PageInfo {
                has_next_page: self.has_next_page,
                next_cursor: self.next_cursor,
            },
        )
    }
}

/// Follows `nextCursor` until the server reports no further pages or
/// `total_limit` items have been collected.
pub struct Paginator<T, F>
where
    F: FnMut(Option<&str>, usize) -> Result<(Vec<T>, PageInfo)>,
{
    total_limit: usize,
    fetch_fn: F,
    cursor: Option<String>,
    collected: usize,
    pages: usize,
    exhausted: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<T, F> Paginator<T, F>
where
    F: FnMut(Option<&str>, usize) -> Result<(Vec<T>, PageInfo)>,
{
    /// - `total_limit`: maximum items across all pages (`usize::MAX` for all)
    /// - `fetch_fn`: fetches one page given `(cursor, page_size)`
    pub fn new(total_limit: usize, fetch_fn: F) -> Self {
        Self {
            total_limit,
            fetch_fn,
            cursor: None,
            collected: 0,
            pages: 0,
            exhausted: false,
            _marker: std::marker::PhantomData,
        }
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Fetch the next page of results.
    pub fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        if self.exhausted || self.collected >= self.total_limit {
            return Ok(None);
        }

        let remaining = self.total_limit - self.collected;
        let page_size = remaining.min(MAX_PAGE_SIZE);

        let (items, page_info) = (self.fetch_fn)(self.cursor.as_deref(), page_size)?;
        self.pages += 1;
        debug!(
            page = self.pages,
            items = items.len(),
            has_next = page_info.has_next_page,
            "fetched page"
        );

        if items.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.collected += items.len();

        // a next page without a cursor would refetch the first page forever
        match (page_info.has_next_page, page_info.next_cursor) {
            (true, Some(cursor)) if self.cursor.as_deref() != Some(cursor.as_str()) => {
                self.cursor = Some(cursor);
            }
            _ => self.exhausted = true,
        }

        Ok(Some(items))
    }

    /// Collect all pages into a single vector.
    pub fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all_items = Vec::new();

        while let Some(page) = self.next_page()? {
            all_items.extend(page);
        }

        all_items.truncate(self.total_limit);
        Ok(all_items)
    }
}
