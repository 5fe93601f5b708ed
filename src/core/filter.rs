//! Query predicate, ordering and page slicing for bulk reads

use crate::types::{Transaction, TransactionStatus, TransactionType};
use std::cmp::Ordering;

/// Criteria for filtered queries
///
/// Every criterion is optional; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Keep only this transaction type
    pub tx_type: Option<TransactionType>,
    /// Keep only this status
    pub status: Option<TransactionStatus>,
    /// Keep transactions whose decimal id contains this text (case-insensitive)
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, tx_type: TransactionType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Build the predicate once so the search text is lowercased a single time
    pub fn predicate(&self) -> impl Fn(&Transaction) -> bool + '_ {
        let needle = self
            .search
            .as_deref()
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        move |tx: &Transaction| {
            self.tx_type.map_or(true, |tx_type| tx.tx_type == tx_type)
                && self.status.map_or(true, |status| tx.status == status)
                && needle
                    .as_deref()
                    .map_or(true, |needle| tx.id.to_string().contains(needle))
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        (self.predicate())(tx)
    }
}

/// Ordering for paginated results: newest timestamp first, then highest id
///
/// Ids from one generator grow with time, so the tie-break keeps later
/// creations ahead of earlier ones that share a timestamp.
pub fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort `matching` newest first and cut out page `page` of `size` entries
///
/// Pages past the end (including any page of an empty set, a zero `size`,
/// or a `page * size` that overflows) are empty.
pub fn paginate(mut matching: Vec<Transaction>, page: usize, size: usize) -> Vec<Transaction> {
    let total = matching.len();
    let from = match page.checked_mul(size) {
        Some(from) if from < total => from,
        _ => return Vec::new(),
    };
    let to = from.saturating_add(size).min(total);

    matching.sort_unstable_by(newest_first);
    matching.truncate(to);
    matching.drain(..from);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewTransaction;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn tx(id: i64, tx_type: TransactionType, status: TransactionStatus, second: i64) -> Transaction {
        let new = NewTransaction::new(tx_type, "test", Decimal::ONE)
            .with_status(status)
            .with_timestamp(Utc.timestamp_opt(1_750_000_000 + second, 0).unwrap());
        Transaction::from_new(id, new)
    }

    #[rstest]
    #[case::empty_filter(TransactionFilter::new(), true)]
    #[case::type_matches(TransactionFilter::new().with_type(TransactionType::Deposit), true)]
    #[case::type_differs(TransactionFilter::new().with_type(TransactionType::Transfer), false)]
    #[case::status_matches(TransactionFilter::new().with_status(TransactionStatus::Pending), true)]
    #[case::status_differs(TransactionFilter::new().with_status(TransactionStatus::Failed), false)]
    #[case::search_substring(TransactionFilter::new().with_search("345"), true)]
    #[case::search_exact(TransactionFilter::new().with_search("123456"), true)]
    #[case::search_miss(TransactionFilter::new().with_search("999"), false)]
    #[case::search_empty(TransactionFilter::new().with_search(""), true)]
    #[case::search_non_digit(TransactionFilter::new().with_search("abc"), false)]
    #[case::all_criteria(
        TransactionFilter::new()
            .with_type(TransactionType::Deposit)
            .with_status(TransactionStatus::Pending)
            .with_search("12"),
        true
    )]
    fn test_filter_matches(#[case] filter: TransactionFilter, #[case] expected: bool) {
        let record = tx(123456, TransactionType::Deposit, TransactionStatus::Pending, 0);
        assert_eq!(filter.matches(&record), expected);
    }

    #[test]
    fn test_newest_first_breaks_ties_by_id() {
        let mut records = vec![
            tx(1, TransactionType::Deposit, TransactionStatus::Initiated, 10),
            tx(3, TransactionType::Deposit, TransactionStatus::Initiated, 5),
            tx(2, TransactionType::Deposit, TransactionStatus::Initiated, 10),
        ];

        records.sort_by(newest_first);

        let ids: Vec<i64> = records.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[rstest]
    #[case::first_page(0, 10, (0..10).collect())]
    #[case::middle_page(1, 10, (10..20).collect())]
    #[case::partial_last_page(2, 10, (20..25).collect())]
    #[case::exactly_at_end(5, 5, vec![])]
    #[case::past_end(9, 10, vec![])]
    #[case::zero_size(0, 0, vec![])]
    #[case::overflowing_offset(usize::MAX, 2, vec![])]
    fn test_paginate(#[case] page: usize, #[case] size: usize, #[case] ranks: Vec<usize>) {
        // Rank 0 is the newest record
        let records: Vec<Transaction> = (0..25)
            .map(|i| tx(i, TransactionType::Deposit, TransactionStatus::Initiated, i))
            .collect();

        let result = paginate(records, page, size);

        let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        let expected: Vec<i64> = ranks.iter().map(|rank| 24 - *rank as i64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_paginate_empty_set() {
        assert!(paginate(Vec::new(), 0, 10).is_empty());
    }
}
