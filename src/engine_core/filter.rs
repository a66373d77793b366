//! Free-text transaction search

use super::transaction::Transaction;

/// Does `txn` match an already-lowercased query?
fn matches(txn: &Transaction, query: &str, lowered: &str) -> bool {
    txn.merchant.to_lowercase().contains(lowered)
        || txn.kind.as_str().to_lowercase().contains(lowered)
        || txn.location.to_lowercase().contains(lowered)
        || txn.amount.to_string().contains(query)
}

/// Filter transactions by a free-text query, preserving order.
///
/// Case-insensitive on merchant, type and location; the amount matches when its
/// decimal string contains the query. An empty query matches everything.
pub fn filter_transactions<'a, I>(transactions: I, query: &str) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if query.is_empty() {
        return transactions.into_iter().collect();
    }

    let lowered = query.to_lowercase();
    transactions
        .into_iter()
        .filter(|txn| matches(txn, query, &lowered))
        .collect()
}

/// Same as [`filter_transactions`], treating a missing query as empty
pub fn filter_optional<'a, I>(transactions: I, query: Option<&str>) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    filter_transactions(transactions, query.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_core::scorer::RiskScorer;
    use crate::engine_core::transaction::{TransactionDraft, TransactionId, TransactionType};
    use crate::engine_core::window::TransactionWindow;

    fn create_test_txn(nonce: u64, kind: TransactionType, amount: u64, location: &str, merchant: &str) -> Transaction {
        let draft = TransactionDraft {
            kind,
            amount,
            merchant: merchant.to_string(),
            location: location.to_string(),
            user_id: "USR2000".to_string(),
        };
        let assessment = RiskScorer::new().score_draft(&draft, 12);
        Transaction::from_parts(TransactionId { millis: 0, nonce }, draft, assessment, &chrono::Local::now())
    }

    fn sample_window() -> TransactionWindow {
        let mut window = TransactionWindow::default();
        window.push(create_test_txn(1, TransactionType::Purchase, 4_200, "Mumbai", "Amazon"));
        window.push(create_test_txn(2, TransactionType::Transfer, 25_000, "New York", "Unknown Vendor"));
        window.push(create_test_txn(3, TransactionType::Deposit, 1_337, "Pune", "Netflix"));
        window
    }

    fn nonces(txns: &[&Transaction]) -> Vec<u64> {
        txns.iter().map(|t| t.id.nonce).collect()
    }

    #[test]
    fn test_empty_query_returns_window_in_order() {
        let window = sample_window();
        let filtered = filter_transactions(window.current(), "");
        assert_eq!(nonces(&filtered), vec![3, 2, 1]);
    }

    #[test]
    fn test_missing_query_is_empty() {
        let window = sample_window();
        assert_eq!(filter_optional(window.current(), None).len(), 3);
    }

    #[test]
    fn test_merchant_prefix_case_insensitive() {
        let window = sample_window();
        assert_eq!(nonces(&filter_transactions(window.current(), "unk")), vec![2]);
        assert_eq!(nonces(&filter_transactions(window.current(), "UNK")), vec![2]);
    }

    #[test]
    fn test_type_and_location() {
        let window = sample_window();
        assert_eq!(nonces(&filter_transactions(window.current(), "deposit")), vec![3]);
        assert_eq!(nonces(&filter_transactions(window.current(), "york")), vec![2]);
    }

    #[test]
    fn test_amount_substring() {
        let window = sample_window();
        assert_eq!(nonces(&filter_transactions(window.current(), "33")), vec![3]);
        // "2" appears in 25000 and 4200
        assert_eq!(nonces(&filter_transactions(window.current(), "2")), vec![2, 1]);
    }

    #[test]
    fn test_no_match() {
        let window = sample_window();
        assert!(filter_transactions(window.current(), "zzz").is_empty());
    }
}
