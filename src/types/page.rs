//! Page envelope returned by paginated queries

use super::transaction::Transaction;
use serde::Serialize;

/// One page of query results plus pagination metadata
///
/// `page_number` is zero-based. `total_pages` is `ceil(total_elements / page_size)`,
/// or 0 when `page_size` is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    /// Transactions on this page, most recent first
    pub content: Vec<Transaction>,
    pub page_number: usize,
    pub page_size: usize,
    /// Number of transactions matching the filter across all pages
    pub total_elements: usize,
    pub total_pages: usize,
}

impl TransactionPage {
    pub fn new(
        content: Vec<Transaction>,
        page_number: usize,
        page_size: usize,
        total_elements: usize,
    ) -> Self {
        let total_pages = if page_size > 0 {
            total_elements.div_ceil(page_size)
        } else {
            0
        };

        TransactionPage {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages,
        }
    }

    pub fn is_first(&self) -> bool {
        self.page_number == 0
    }

    /// True only on the final existing page; false for an empty result or a
    /// page past the end
    pub fn is_last(&self) -> bool {
        self.total_pages.checked_sub(1) == Some(self.page_number)
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages.saturating_sub(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 0
    }
}
