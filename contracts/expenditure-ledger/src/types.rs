//! Data types, storage keys and events for the expenditure ledger.

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, BytesN, Env, String};

/// Maximum number of distinct categories that can receive an allocation.
pub const MAX_CATEGORIES: u32 = 50;

/// Maximum category name length in bytes.
pub const MAX_CATEGORY_LEN: u32 = 64;

/// Error codes returned by the expenditure ledger.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    /// Contract not initialized
    NotInitialized = 1,
    /// Contract already initialized
    AlreadyInitialized = 2,
    /// Caller is not the government or verifier required by the operation
    NotAuthorized = 100,
    /// Allocation or expenditure does not exist
    NotFound = 102,
    /// Amount exceeds the unspent allocation of the category
    AllocationExceeded = 103,
    /// Expenditure is no longer pending
    InvalidState = 105,
    /// Category name is empty or too long
    InvalidCategory = 106,
    /// No verifier has been configured
    VerifierNotSet = 107,
    /// Amount must be positive
    InvalidAmount = 108,
    /// Category limit reached
    CapacityExceeded = 109,
}

/// Approval state of a recorded expenditure.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExpenditureStatus {
    Pending,
    Approved,
    Rejected,
}

/// Funds assigned to a spending category.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    /// Cumulative amount allocated to the category
    pub amount: i128,
    /// Government principal that made the latest allocation
    pub allocated_by: Address,
    /// Ledger timestamp of the latest allocation
    pub timestamp: u64,
}

/// A spend request against a category allocation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expenditure {
    pub amount: i128,
    pub category: String,
    /// Hash of the off-chain proof (receipt, invoice) backing the spend
    pub proof_hash: BytesN<32>,
    pub spender: Address,
    pub status: ExpenditureStatus,
    pub timestamp: u64,
}

/// Storage keys for contract state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Government principal (allocates funds, manages roles)
    Government,
    /// Verifier principal (approves and rejects expenditures)
    Verifier,
    TotalAllocated,
    TotalSpent,
    NextTxId,
    /// Categories in allocation order
    Categories,
    Allocation(String),
    Expenditure(u64),
    CategorySpent(String),
}

/// Events emitted by the expenditure ledger.
pub struct LedgerEvents;

impl LedgerEvents {
    pub fn initialized(env: &Env, government: &Address) {
        let topics = (symbol_short!("ledger"), symbol_short!("init"));
        env.events().publish(topics, government.clone());
    }

    pub fn verifier_set(env: &Env, verifier: &Address) {
        let topics = (symbol_short!("role"), symbol_short!("verifier"));
        env.events().publish(topics, verifier.clone());
    }

    pub fn government_set(env: &Env, previous: &Address, government: &Address) {
        let topics = (symbol_short!("role"), symbol_short!("gov"));
        env.events()
            .publish(topics, (previous.clone(), government.clone()));
    }

    /// Emitted on every allocation; `total` is the category's new cumulative amount.
    pub fn funds_allocated(env: &Env, category: &String, amount: i128, total: i128) {
        let topics = (symbol_short!("alloc"), symbol_short!("funds"));
        env.events()
            .publish(topics, (category.clone(), amount, total));
    }

    pub fn expenditure_recorded(env: &Env, tx_id: u64, expenditure: &Expenditure) {
        let topics = (symbol_short!("expend"), symbol_short!("recorded"), tx_id);
        env.events().publish(
            topics,
            (
                expenditure.category.clone(),
                expenditure.spender.clone(),
                expenditure.amount,
            ),
        );
    }

    pub fn expenditure_approved(env: &Env, tx_id: u64, category: &String, amount: i128) {
        let topics = (symbol_short!("expend"), symbol_short!("approved"), tx_id);
        env.events().publish(topics, (category.clone(), amount));
    }

    pub fn expenditure_rejected(env: &Env, tx_id: u64, category: &String, amount: i128) {
        let topics = (symbol_short!("expend"), symbol_short!("rejected"), tx_id);
        env.events().publish(topics, (category.clone(), amount));
    }

    pub fn funds_minted(env: &Env, recipient: &Address, amount: i128) {
        let topics = (symbol_short!("funds"), symbol_short!("minted"));
        env.events().publish(topics, (recipient.clone(), amount));
    }
}
