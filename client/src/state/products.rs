//! Product listing state with "load more" pagination.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use crate::net::types::{Category, Id, Page, ProductListItem};

/// Listing items, category filter, and pagination cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductListState {
    pub items: Vec<ProductListItem>,
    pub categories: Vec<Category>,
    pub category_id: Option<Id>,
    /// Last page applied.
    pub page: u32,
    pub has_next: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProductListState {
    /// Switch the category filter and reset pagination.
    pub fn select_category(&mut self, category_id: Option<Id>) {
        if self.category_id == category_id && !self.items.is_empty() {
            return;
        }
        self.category_id = category_id;
        self.items.clear();
        self.page = 0;
        self.has_next = false;
        self.loading = true;
    }

    /// Page to request next, or `None` when there is nothing more (or a
    /// request is already running).
    pub fn next_page(&self) -> Option<u32> {
        if self.loading || !self.has_next {
            return None;
        }
        Some(self.page + 1)
    }

    /// Apply a page for `category_id`. Responses for a stale filter are
    /// dropped; page 0 replaces, later pages append.
    pub fn apply_page(&mut self, category_id: Option<Id>, requested: u32, page: Page<ProductListItem>) {
        if category_id != self.category_id {
            return;
        }
        if requested == 0 {
            self.items = page.content;
        } else {
            let known: Vec<Id> = self.items.iter().map(|p| p.product_id).collect();
            self.items
                .extend(page.content.into_iter().filter(|p| !known.contains(&p.product_id)));
        }
        self.page = requested;
        self.has_next = page.has_next;
        self.loading = false;
        self.error = None;
    }

    pub fn fetch_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}
