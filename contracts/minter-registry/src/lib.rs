//! # Minter Registry Contract
//!
//! A Soroban smart contract that registers fund-token minters operated by
//! governments, NGOs and communities.
//!
//! ## Features
//!
//! - **Unique Names**: Every minter name maps to exactly one minter id
//! - **Authority Gating**: Only verified authorities may register minters
//! - **Creation Fee**: Each registration pays the mint fee to the authority contract
//! - **Update Audit**: The latest update of every minter is kept as an audit record
//! - **Capacity Bound**: The registry never holds more than `max_minters` minters

#![no_std]

mod types;
mod validation;

use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Vec};

pub use crate::types::{
    Currency, DataKey, Minter, MinterParams, MinterType, MinterUpdate, RegistryError,
    RegistryEvents, BURN_ADDRESS, DEFAULT_MAX_MINTERS, DEFAULT_MINT_FEE, MAX_MINT_CEILING,
    MAX_NAME_LEN,
};
use crate::validation::{validate_core_fields, validate_minter_params};

#[contract]
pub struct MinterRegistryContract;

#[contractimpl]
impl MinterRegistryContract {
    /// Initializes the registry.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to maintain the verified authority set
    /// * `fee_token` - Token the mint fee is paid in
    /// * `max_minters` - Capacity of the registry, `0` selects the default of 100
    /// * `authorities` - Initial verified authorities
    pub fn initialize(
        env: Env,
        admin: Address,
        fee_token: Address,
        max_minters: u64,
        authorities: Vec<Address>,
    ) -> Result<(), RegistryError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(RegistryError::AlreadyInitialized);
        }

        let max_minters = if max_minters == 0 {
            DEFAULT_MAX_MINTERS
        } else {
            max_minters
        };

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::FeeToken, &fee_token);
        env.storage()
            .instance()
            .set(&DataKey::MaxMinters, &max_minters);
        env.storage()
            .instance()
            .set(&DataKey::MintFee, &DEFAULT_MINT_FEE);
        env.storage().instance().set(&DataKey::NextMinterId, &0u64);
        env.storage()
            .instance()
            .set(&DataKey::TotalFeesCollected, &0i128);

        for authority in authorities.iter() {
            env.storage()
                .persistent()
                .set(&DataKey::Authority(authority), &true);
        }

        RegistryEvents::initialized(&env, &admin, &fee_token, max_minters);
        Ok(())
    }

    /// Adds an address to the verified authority set. Admin only.
    pub fn add_authority(
        env: Env,
        caller: Address,
        authority: Address,
    ) -> Result<bool, RegistryError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage()
            .persistent()
            .set(&DataKey::Authority(authority.clone()), &true);

        RegistryEvents::authority_added(&env, &authority);
        Ok(true)
    }

    /// Removes an address from the verified authority set. Admin only.
    pub fn remove_authority(
        env: Env,
        caller: Address,
        authority: Address,
    ) -> Result<bool, RegistryError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage()
            .persistent()
            .remove(&DataKey::Authority(authority.clone()));

        RegistryEvents::authority_removed(&env, &authority);
        Ok(true)
    }

    pub fn is_verified_authority(env: Env, principal: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Authority(principal))
            .unwrap_or(false)
    }

    /// Sets the contract that receives mint fees. Can only be set once and
    /// never to the burn address.
    pub fn set_authority_contract(env: Env, contract: Address) -> Result<bool, RegistryError> {
        let burn = Address::from_string(&String::from_str(&env, BURN_ADDRESS));
        if contract == burn {
            return Err(RegistryError::InvalidAuthorityContract);
        }
        if env.storage().instance().has(&DataKey::AuthorityContract) {
            return Err(RegistryError::AuthorityAlreadySet);
        }

        env.storage()
            .instance()
            .set(&DataKey::AuthorityContract, &contract);

        RegistryEvents::authority_contract_set(&env, &contract);
        Ok(true)
    }

    /// Replaces the mint fee. Requires the authority contract to be set.
    pub fn set_mint_fee(env: Env, fee: i128) -> Result<bool, RegistryError> {
        if !env.storage().instance().has(&DataKey::AuthorityContract) {
            return Err(RegistryError::AuthorityNotVerified);
        }
        if fee < 0 {
            return Err(RegistryError::InvalidMintFee);
        }

        env.storage().instance().set(&DataKey::MintFee, &fee);

        RegistryEvents::mint_fee_set(&env, fee);
        Ok(true)
    }

    /// Registers a new minter and returns its id.
    ///
    /// Checks run in a fixed order: capacity, field validation, caller
    /// authority, name uniqueness, authority contract. On success the mint fee
    /// is transferred from `caller` to the authority contract.
    ///
    /// # Errors
    /// * `MaxMintersExceeded` - If the registry is full
    /// * `InvalidUpdateParam` .. `InvalidMaxLoan` - If a field is out of range
    /// * `NotAuthorized` - If caller is not a verified authority
    /// * `MinterAlreadyExists` - If the name is taken
    /// * `AuthorityNotVerified` - If no authority contract is set
    pub fn create_minter(
        env: Env,
        caller: Address,
        params: MinterParams,
    ) -> Result<u64, RegistryError> {
        caller.require_auth();

        let id = Self::get_minter_count(env.clone());
        if id >= Self::get_max_minters(env.clone()) {
            return Err(RegistryError::MaxMintersExceeded);
        }

        let validated = validate_minter_params(&env, &params)?;

        if !Self::is_verified_authority(env.clone(), caller.clone()) {
            return Err(RegistryError::NotAuthorized);
        }
        if Self::check_minter_existence(env.clone(), params.name.clone()) {
            return Err(RegistryError::MinterAlreadyExists);
        }
        let authority: Address = env
            .storage()
            .instance()
            .get(&DataKey::AuthorityContract)
            .ok_or(RegistryError::AuthorityNotVerified)?;

        Self::collect_fee(&env, &caller, &authority)?;

        let minter = Minter {
            name: params.name,
            max_mint: params.max_mint,
            mint_amount: params.mint_amount,
            start_time: params.start_time,
            penalty_rate: params.penalty_rate,
            threshold: params.threshold,
            timestamp: env.ledger().timestamp(),
            creator: caller.clone(),
            minter_type: validated.minter_type,
            interest_rate: params.interest_rate,
            grace_period: params.grace_period,
            location: params.location,
            currency: validated.currency,
            status: true,
            min_mint: params.min_mint,
            max_loan: params.max_loan,
        };

        env.storage().persistent().set(&DataKey::Minter(id), &minter);
        env.storage()
            .persistent()
            .set(&DataKey::MinterByName(minter.name.clone()), &id);
        env.storage()
            .instance()
            .set(&DataKey::NextMinterId, &(id + 1));

        RegistryEvents::minter_created(&env, id, &minter.name, &caller);
        Ok(id)
    }

    /// Renames a minter and replaces its mint limits. Creator only.
    ///
    /// Keeping the current name is allowed; taking another minter's name is not.
    pub fn update_minter(
        env: Env,
        caller: Address,
        id: u64,
        name: String,
        max_mint: i128,
        mint_amount: i128,
    ) -> Result<bool, RegistryError> {
        caller.require_auth();

        let mut minter =
            Self::get_minter(env.clone(), id).ok_or(RegistryError::MinterNotFound)?;
        if minter.creator != caller {
            return Err(RegistryError::NotAuthorized);
        }
        validate_core_fields(&name, max_mint, mint_amount)?;
        if let Some(existing) = Self::get_minter_id_by_name(env.clone(), name.clone()) {
            if existing != id {
                return Err(RegistryError::MinterAlreadyExists);
            }
        }

        let now = env.ledger().timestamp();
        let old_name = minter.name.clone();
        minter.name = name.clone();
        minter.max_mint = max_mint;
        minter.mint_amount = mint_amount;
        minter.timestamp = now;

        env.storage().persistent().set(&DataKey::Minter(id), &minter);
        env.storage()
            .persistent()
            .remove(&DataKey::MinterByName(old_name));
        env.storage()
            .persistent()
            .set(&DataKey::MinterByName(name.clone()), &id);

        let update = MinterUpdate {
            update_name: name,
            update_max_mint: max_mint,
            update_mint_amount: mint_amount,
            update_timestamp: now,
            updater: caller,
        };
        env.storage()
            .persistent()
            .set(&DataKey::MinterUpdate(id), &update);

        RegistryEvents::minter_updated(&env, id, &update);
        Ok(true)
    }

    pub fn get_minter(env: Env, id: u64) -> Option<Minter> {
        env.storage().persistent().get(&DataKey::Minter(id))
    }

    /// Returns the latest update applied to a minter, if any.
    pub fn get_minter_update(env: Env, id: u64) -> Option<MinterUpdate> {
        env.storage().persistent().get(&DataKey::MinterUpdate(id))
    }

    pub fn get_minter_id_by_name(env: Env, name: String) -> Option<u64> {
        env.storage().persistent().get(&DataKey::MinterByName(name))
    }

    /// Number of minters ever registered, which is also the next id.
    pub fn get_minter_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::NextMinterId)
            .unwrap_or(0)
    }

    pub fn check_minter_existence(env: Env, name: String) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::MinterByName(name))
    }

    pub fn get_mint_fee(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::MintFee)
            .unwrap_or(DEFAULT_MINT_FEE)
    }

    pub fn get_max_minters(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::MaxMinters)
            .unwrap_or(DEFAULT_MAX_MINTERS)
    }

    pub fn get_authority_contract(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::AuthorityContract)
    }

    pub fn get_total_fees_collected(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalFeesCollected)
            .unwrap_or(0)
    }

    pub fn get_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::Admin)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(RegistryError::NotInitialized)?;
        if *caller != admin {
            return Err(RegistryError::NotAuthorized);
        }
        Ok(())
    }

    // Moves the current mint fee from `payer` to the authority contract.
    fn collect_fee(env: &Env, payer: &Address, authority: &Address) -> Result<(), RegistryError> {
        let fee = Self::get_mint_fee(env.clone());
        if fee == 0 {
            return Ok(());
        }

        let fee_token: Address = env
            .storage()
            .instance()
            .get(&DataKey::FeeToken)
            .ok_or(RegistryError::NotInitialized)?;
        let total = Self::get_total_fees_collected(env.clone())
            .checked_add(fee)
            .ok_or(RegistryError::InvalidMintFee)?;
        token::Client::new(env, &fee_token).transfer(payer, authority, &fee);

        env.storage()
            .instance()
            .set(&DataKey::TotalFeesCollected, &total);

        RegistryEvents::fee_paid(env, payer, authority, fee);
        Ok(())
    }
}
