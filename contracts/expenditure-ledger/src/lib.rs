//! # Expenditure Ledger Contract
//!
//! A Soroban smart contract that tracks government fund allocations per
//! spending category and routes every expenditure through a verifier.
//!
//! ## Features
//!
//! - **Category Allocations**: The government allocates funds to up to 50 categories
//! - **Expenditure Workflow**: Spenders record expenditures with a proof hash, the
//!   verifier approves or rejects them
//! - **Spend Tracking**: Approved amounts are tracked per category and in total
//! - **Event Emission**: Every state change is published as an event
//!
//! Only approved expenditures count against a category allocation. Pending
//! expenditures are checked against the approved spend when they are recorded
//! and do not reserve capacity.

#![no_std]

mod types;
mod validation;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};

pub use crate::types::{
    Allocation, DataKey, Expenditure, ExpenditureStatus, LedgerError, LedgerEvents,
    MAX_CATEGORIES, MAX_CATEGORY_LEN,
};
use crate::validation::{validate_amount, validate_category, validate_within_allocation};

#[contract]
pub struct ExpenditureLedgerContract;

#[contractimpl]
impl ExpenditureLedgerContract {
    /// Initializes the ledger with the government principal.
    pub fn initialize(env: Env, government: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&DataKey::Government) {
            return Err(LedgerError::AlreadyInitialized);
        }

        env.storage()
            .instance()
            .set(&DataKey::Government, &government);
        env.storage().instance().set(&DataKey::TotalAllocated, &0i128);
        env.storage().instance().set(&DataKey::TotalSpent, &0i128);
        env.storage().instance().set(&DataKey::NextTxId, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::Categories, &Vec::<String>::new(&env));

        LedgerEvents::initialized(&env, &government);
        Ok(())
    }

    /// Sets the verifier allowed to approve and reject expenditures.
    /// Government only; replaces any previous verifier.
    pub fn set_verifier_contract(
        env: Env,
        caller: Address,
        verifier: Address,
    ) -> Result<bool, LedgerError> {
        caller.require_auth();
        Self::require_government(&env, &caller)?;

        env.storage().instance().set(&DataKey::Verifier, &verifier);

        LedgerEvents::verifier_set(&env, &verifier);
        Ok(true)
    }

    /// Hands the government role to `new_government`.
    pub fn set_government_principal(
        env: Env,
        caller: Address,
        new_government: Address,
    ) -> Result<bool, LedgerError> {
        caller.require_auth();
        Self::require_government(&env, &caller)?;

        env.storage()
            .instance()
            .set(&DataKey::Government, &new_government);

        LedgerEvents::government_set(&env, &caller, &new_government);
        Ok(true)
    }

    /// Adds `amount` to the allocation of `category`, creating it if needed.
    ///
    /// # Errors
    /// * `NotAuthorized` - If caller is not the government
    /// * `InvalidAmount` - If amount is not positive or the allocation would overflow
    /// * `InvalidCategory` - If the category name is empty or longer than 64 bytes
    /// * `CapacityExceeded` - If 50 categories have already been allocated
    pub fn allocate_funds(
        env: Env,
        caller: Address,
        category: String,
        amount: i128,
    ) -> Result<bool, LedgerError> {
        caller.require_auth();
        Self::require_government(&env, &caller)?;
        validate_amount(amount)?;
        validate_category(&category)?;

        let mut categories = Self::get_categories(env.clone());
        if categories.len() >= MAX_CATEGORIES {
            return Err(LedgerError::CapacityExceeded);
        }

        let key = DataKey::Allocation(category.clone());
        let existing: Option<Allocation> = env.storage().persistent().get(&key);
        let new_amount = match &existing {
            Some(allocation) => allocation.amount.checked_add(amount),
            None => Some(amount),
        }
        .ok_or(LedgerError::InvalidAmount)?;
        let total = Self::get_total_allocated(env.clone())
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        if existing.is_none() {
            categories.push_back(category.clone());
            env.storage()
                .instance()
                .set(&DataKey::Categories, &categories);
        }

        let allocation = Allocation {
            amount: new_amount,
            allocated_by: caller,
            timestamp: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&key, &allocation);
        env.storage().instance().set(&DataKey::TotalAllocated, &total);

        LedgerEvents::funds_allocated(&env, &category, amount, new_amount);
        Ok(true)
    }

    /// Records a pending expenditure against a category and returns its id.
    ///
    /// Any caller may record; the caller is stored as the spender.
    ///
    /// # Errors
    /// * `InvalidAmount` - If amount is not positive
    /// * `InvalidCategory` - If the category name is malformed
    /// * `NotFound` - If the category has no allocation
    /// * `AllocationExceeded` - If approved spend plus `amount` exceeds the allocation
    /// * `VerifierNotSet` - If no verifier has been configured
    pub fn record_expenditure(
        env: Env,
        caller: Address,
        category: String,
        amount: i128,
        proof_hash: BytesN<32>,
    ) -> Result<u64, LedgerError> {
        caller.require_auth();
        validate_amount(amount)?;
        validate_category(&category)?;

        let allocation: Allocation = env
            .storage()
            .persistent()
            .get(&DataKey::Allocation(category.clone()))
            .ok_or(LedgerError::NotFound)?;
        let spent = Self::get_category_spent(env.clone(), category.clone());
        validate_within_allocation(allocation.amount, spent, amount)?;

        if !env.storage().instance().has(&DataKey::Verifier) {
            return Err(LedgerError::VerifierNotSet);
        }

        let tx_id = Self::get_next_tx_id(env.clone());
        let expenditure = Expenditure {
            amount,
            category,
            proof_hash,
            spender: caller,
            status: ExpenditureStatus::Pending,
            timestamp: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Expenditure(tx_id), &expenditure);
        env.storage()
            .instance()
            .set(&DataKey::NextTxId, &(tx_id + 1));

        LedgerEvents::expenditure_recorded(&env, tx_id, &expenditure);
        Ok(tx_id)
    }

    /// Approves a pending expenditure and books its amount as spent.
    ///
    /// Fails with `InvalidAmount` if the category or total spend would overflow.
    pub fn approve_expenditure(env: Env, caller: Address, tx_id: u64) -> Result<bool, LedgerError> {
        caller.require_auth();
        let mut expenditure = Self::take_pending(&env, &caller, tx_id)?;

        let spent_key = DataKey::CategorySpent(expenditure.category.clone());
        let spent: i128 = env.storage().persistent().get(&spent_key).unwrap_or(0);
        let spent = spent
            .checked_add(expenditure.amount)
            .ok_or(LedgerError::InvalidAmount)?;
        let total_spent = Self::get_total_spent(env.clone())
            .checked_add(expenditure.amount)
            .ok_or(LedgerError::InvalidAmount)?;

        expenditure.status = ExpenditureStatus::Approved;
        env.storage()
            .persistent()
            .set(&DataKey::Expenditure(tx_id), &expenditure);
        env.storage().persistent().set(&spent_key, &spent);
        env.storage()
            .instance()
            .set(&DataKey::TotalSpent, &total_spent);

        LedgerEvents::expenditure_approved(&env, tx_id, &expenditure.category, expenditure.amount);
        Ok(true)
    }

    /// Rejects a pending expenditure. Totals are left untouched.
    pub fn reject_expenditure(env: Env, caller: Address, tx_id: u64) -> Result<bool, LedgerError> {
        caller.require_auth();
        let mut expenditure = Self::take_pending(&env, &caller, tx_id)?;

        expenditure.status = ExpenditureStatus::Rejected;
        env.storage()
            .persistent()
            .set(&DataKey::Expenditure(tx_id), &expenditure);

        LedgerEvents::expenditure_rejected(&env, tx_id, &expenditure.category, expenditure.amount);
        Ok(true)
    }

    /// Government-only mint request. Only emits an event; token issuance is
    /// handled outside the ledger.
    pub fn mint_funds(
        env: Env,
        caller: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<bool, LedgerError> {
        caller.require_auth();
        Self::require_government(&env, &caller)?;
        validate_amount(amount)?;

        LedgerEvents::funds_minted(&env, &recipient, amount);
        Ok(true)
    }

    pub fn get_allocation(env: Env, category: String) -> Option<Allocation> {
        env.storage()
            .persistent()
            .get(&DataKey::Allocation(category))
    }

    pub fn get_expenditure(env: Env, tx_id: u64) -> Option<Expenditure> {
        env.storage()
            .persistent()
            .get(&DataKey::Expenditure(tx_id))
    }

    pub fn get_total_allocated(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalAllocated)
            .unwrap_or(0)
    }

    pub fn get_total_spent(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSpent)
            .unwrap_or(0)
    }

    /// Returns the approved spend of a category, 0 if nothing was approved.
    pub fn get_category_spent(env: Env, category: String) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::CategorySpent(category))
            .unwrap_or(0)
    }

    /// Returns the allocation of a category minus its approved spend.
    ///
    /// Approval does not re-check capacity, so this is negative once the
    /// approved spend of a category exceeds its allocation.
    pub fn get_remaining_allocation(env: Env, category: String) -> i128 {
        match Self::get_allocation(env.clone(), category.clone()) {
            Some(allocation) => allocation.amount - Self::get_category_spent(env, category),
            None => 0,
        }
    }

    pub fn get_next_tx_id(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::NextTxId)
            .unwrap_or(0)
    }

    /// Returns allocated categories in the order they were first funded.
    pub fn get_categories(env: Env) -> Vec<String> {
        env.storage()
            .instance()
            .get(&DataKey::Categories)
            .unwrap_or_else(|| Vec::new(&env))
    }

    pub fn get_government(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Government)
    }

    pub fn get_verifier(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Verifier)
    }

    pub fn is_valid_category(_env: Env, category: String) -> bool {
        validation::is_valid_category(&category)
    }

    fn require_government(env: &Env, caller: &Address) -> Result<(), LedgerError> {
        let government: Address = env
            .storage()
            .instance()
            .get(&DataKey::Government)
            .ok_or(LedgerError::NotInitialized)?;
        if *caller != government {
            return Err(LedgerError::NotAuthorized);
        }
        Ok(())
    }

    // Loads an expenditure the verifier may still act on.
    fn take_pending(env: &Env, caller: &Address, tx_id: u64) -> Result<Expenditure, LedgerError> {
        let verifier: Option<Address> = env.storage().instance().get(&DataKey::Verifier);
        if verifier.as_ref() != Some(caller) {
            return Err(LedgerError::NotAuthorized);
        }

        let expenditure: Expenditure = env
            .storage()
            .persistent()
            .get(&DataKey::Expenditure(tx_id))
            .ok_or(LedgerError::NotFound)?;
        if expenditure.status != ExpenditureStatus::Pending {
            return Err(LedgerError::InvalidState);
        }
        Ok(expenditure)
    }
}
