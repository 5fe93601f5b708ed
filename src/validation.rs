//! Pre-store checks for transaction input
//!
//! The ledger core trusts its input. Outer layers run
//! [`validate_new_transaction`] first, which rejects malformed fields and
//! normalizes the account pair to match the transaction type:
//!
//! - DEPOSIT: destination required, source cleared
//! - WITHDRAWAL: source required, destination cleared
//! - TRANSFER: both required

use crate::types::{LedgerError, NewTransaction, TransactionType};
use rust_decimal::Decimal;

pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const ACCOUNT_MIN_LEN: usize = 8;
pub const ACCOUNT_MAX_LEN: usize = 20;

pub type ValidationResult = Result<(), LedgerError>;

pub fn validate_description(description: &str) -> ValidationResult {
    if description.trim().is_empty() {
        return Err(LedgerError::validation("description", "is required"));
    }
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(LedgerError::validation(
            "description",
            &format!("cannot exceed {} characters", DESCRIPTION_MAX_LEN),
        ));
    }
    Ok(())
}

pub fn validate_amount(amount: Decimal) -> ValidationResult {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation("amount", "must be positive"));
    }
    Ok(())
}

/// Account numbers are 8-20 upper-case letters or digits
pub fn validate_account_number(field: &str, account: &str) -> ValidationResult {
    let len_ok = (ACCOUNT_MIN_LEN..=ACCOUNT_MAX_LEN).contains(&account.len());
    let chars_ok = account
        .chars()
        .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit());

    if !(len_ok && chars_ok) {
        return Err(LedgerError::validation(field, "invalid account format"));
    }
    Ok(())
}

fn present(account: &Option<String>) -> Option<&str> {
    account.as_deref().filter(|value| !value.is_empty())
}

fn require_account(field: &str, account: &Option<String>, kind: &str) -> ValidationResult {
    match present(account) {
        Some(value) => validate_account_number(field, value),
        None => Err(LedgerError::validation(
            field,
            &format!("is required for {}", kind),
        )),
    }
}

/// Check every field and normalize the account pair in place
///
/// # Errors
///
/// The first failing check, as `LedgerError::Validation`.
pub fn validate_new_transaction(transaction: &mut NewTransaction) -> ValidationResult {
    validate_description(&transaction.description)?;
    validate_amount(transaction.amount)?;

    match transaction.tx_type {
        TransactionType::Deposit => {
            require_account("destination_account", &transaction.destination_account, "deposits")?;
            transaction.source_account = None;
        }
        TransactionType::Withdrawal => {
            require_account("source_account", &transaction.source_account, "withdrawals")?;
            transaction.destination_account = None;
        }
        TransactionType::Transfer => {
            require_account("source_account", &transaction.source_account, "transfers")?;
            require_account("destination_account", &transaction.destination_account, "transfers")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SOURCE: &str = "ACCT12345678";
    const DESTINATION: &str = "ACCT87654321";

    fn base(tx_type: TransactionType) -> NewTransaction {
        NewTransaction::new(tx_type, "Payment", Decimal::new(1000, 2))
    }

    #[test]
    fn test_deposit_clears_source() {
        let mut tx = base(TransactionType::Deposit)
            .with_source(SOURCE)
            .with_destination(DESTINATION);

        validate_new_transaction(&mut tx).unwrap();

        assert!(tx.source_account.is_none());
        assert_eq!(tx.destination_account.as_deref(), Some(DESTINATION));
    }

    #[test]
    fn test_withdrawal_clears_destination() {
        let mut tx = base(TransactionType::Withdrawal)
            .with_source(SOURCE)
            .with_destination(DESTINATION);

        validate_new_transaction(&mut tx).unwrap();

        assert_eq!(tx.source_account.as_deref(), Some(SOURCE));
        assert!(tx.destination_account.is_none());
    }

    #[test]
    fn test_transfer_keeps_both() {
        let mut tx = base(TransactionType::Transfer)
            .with_source(SOURCE)
            .with_destination(DESTINATION);

        validate_new_transaction(&mut tx).unwrap();

        assert_eq!(tx.source_account.as_deref(), Some(SOURCE));
        assert_eq!(tx.destination_account.as_deref(), Some(DESTINATION));
    }

    #[rstest]
    #[case::deposit_without_destination(base(TransactionType::Deposit).with_source(SOURCE), "destination_account")]
    #[case::withdrawal_without_source(base(TransactionType::Withdrawal).with_destination(DESTINATION), "source_account")]
    #[case::transfer_without_source(base(TransactionType::Transfer).with_destination(DESTINATION), "source_account")]
    #[case::transfer_without_destination(base(TransactionType::Transfer).with_source(SOURCE), "destination_account")]
    #[case::empty_destination(base(TransactionType::Deposit).with_destination(""), "destination_account")]
    #[case::lowercase_account(base(TransactionType::Deposit).with_destination("acct87654321"), "destination_account")]
    #[case::short_account(base(TransactionType::Withdrawal).with_source("ACCT1"), "source_account")]
    #[case::long_account(base(TransactionType::Withdrawal).with_source("A".repeat(21)), "source_account")]
    #[case::blank_description(
        NewTransaction::new(TransactionType::Deposit, "  ", Decimal::ONE).with_destination(DESTINATION),
        "description"
    )]
    #[case::long_description(
        NewTransaction::new(TransactionType::Deposit, "x".repeat(256), Decimal::ONE).with_destination(DESTINATION),
        "description"
    )]
    #[case::zero_amount(
        NewTransaction::new(TransactionType::Deposit, "Payment", Decimal::ZERO).with_destination(DESTINATION),
        "amount"
    )]
    #[case::negative_amount(
        NewTransaction::new(TransactionType::Deposit, "Payment", Decimal::new(-5, 0)).with_destination(DESTINATION),
        "amount"
    )]
    fn test_rejections(#[case] tx: NewTransaction, #[case] expected_field: &str) {
        let mut tx = tx;
        match validate_new_transaction(&mut tx) {
            Err(LedgerError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected validation error on {}, got {:?}", expected_field, other),
        }
    }

    #[rstest]
    #[case::min_len("ABCD1234")]
    #[case::max_len("ABCDEFGHIJ0123456789")]
    #[case::digits_only("12345678")]
    fn test_accepted_account_numbers(#[case] account: &str) {
        assert!(validate_account_number("source_account", account).is_ok());
    }
}
