//! Input validation for the expenditure ledger.

use soroban_sdk::String;

use crate::types::{LedgerError, MAX_CATEGORY_LEN};

/// Validates that an amount is strictly positive.
pub fn validate_amount(amount: i128) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// Returns `true` if the category name is between 1 and 64 bytes long.
pub fn is_valid_category(category: &String) -> bool {
    let len = category.len();
    len > 0 && len <= MAX_CATEGORY_LEN
}

/// Validates a category name.
pub fn validate_category(category: &String) -> Result<(), LedgerError> {
    if !is_valid_category(category) {
        return Err(LedgerError::InvalidCategory);
    }
    Ok(())
}

/// Validates that `amount` fits in what is left of `allocated` after `spent`.
pub fn validate_within_allocation(
    allocated: i128,
    spent: i128,
    amount: i128,
) -> Result<(), LedgerError> {
    match spent.checked_add(amount) {
        Some(required) if required <= allocated => Ok(()),
        _ => Err(LedgerError::AllocationExceeded),
    }
}
