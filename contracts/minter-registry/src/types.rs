//! Data types, storage keys and events for the minter registry.

use soroban_sdk::{contracterror, contracttype, symbol_short, Address, Env, String};

/// Minters the registry accepts unless configured otherwise.
pub const DEFAULT_MAX_MINTERS: u64 = 100;

/// Fee charged per minter creation, in units of the fee token.
pub const DEFAULT_MINT_FEE: i128 = 1000;

/// Maximum length of names and locations in bytes.
pub const MAX_NAME_LEN: u32 = 100;

/// Upper bound for a minter's `max_mint`.
pub const MAX_MINT_CEILING: i128 = 1_000_000_000;

pub const MAX_PENALTY_RATE: u32 = 100;
pub const MAX_VOTING_THRESHOLD: u32 = 100;
pub const MAX_INTEREST_RATE: u32 = 20;
pub const MAX_GRACE_PERIOD: u32 = 30;

/// All-zero Stellar account, never accepted as the authority contract.
pub const BURN_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Error codes returned by the minter registry.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller is not a verified authority, the minter's creator or the admin
    NotAuthorized = 100,
    InvalidMintFee = 101,
    InvalidMintAmount = 102,
    InvalidPenaltyRate = 104,
    InvalidVotingThreshold = 105,
    MinterAlreadyExists = 106,
    MinterNotFound = 107,
    InvalidStartTime = 108,
    /// Authority contract has not been set
    AuthorityNotVerified = 109,
    InvalidMinMint = 110,
    InvalidMaxMint = 111,
    InvalidMaxLoan = 112,
    /// Name is empty or too long
    InvalidUpdateParam = 113,
    MaxMintersExceeded = 114,
    InvalidMinterType = 115,
    InvalidInterestRate = 116,
    InvalidGracePeriod = 117,
    InvalidLocation = 118,
    InvalidCurrency = 119,
    AuthorityAlreadySet = 120,
    InvalidAuthorityContract = 121,
}

/// Kind of organisation operating a minter.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MinterType {
    Government,
    Ngo,
    Community,
}

impl MinterType {
    /// Parses the lowercase names `government`, `ngo` and `community`.
    pub fn parse(env: &Env, value: &String) -> Option<Self> {
        if *value == String::from_str(env, "government") {
            Some(Self::Government)
        } else if *value == String::from_str(env, "ngo") {
            Some(Self::Ngo)
        } else if *value == String::from_str(env, "community") {
            Some(Self::Community)
        } else {
            None
        }
    }
}

/// Currency a minter's amounts are denominated in.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Currency {
    Stx,
    Usd,
    Btc,
}

impl Currency {
    /// Parses the ticker symbols `STX`, `USD` and `BTC`.
    pub fn parse(env: &Env, value: &String) -> Option<Self> {
        if *value == String::from_str(env, "STX") {
            Some(Self::Stx)
        } else if *value == String::from_str(env, "USD") {
            Some(Self::Usd)
        } else if *value == String::from_str(env, "BTC") {
            Some(Self::Btc)
        } else {
            None
        }
    }
}

/// Parameters for registering a minter.
///
/// `minter_type` and `currency` are taken as text and parsed during
/// validation so that unknown values map to their own error codes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterParams {
    pub name: String,
    pub max_mint: i128,
    pub mint_amount: i128,
    pub start_time: u64,
    /// Percentage, 0..=100
    pub penalty_rate: u32,
    /// Voting threshold percentage, 1..=100
    pub threshold: u32,
    pub minter_type: String,
    /// Percentage, 0..=20
    pub interest_rate: u32,
    /// Days, 0..=30
    pub grace_period: u32,
    pub location: String,
    pub currency: String,
    pub min_mint: i128,
    pub max_loan: i128,
}

/// A registered minter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Minter {
    pub name: String,
    pub max_mint: i128,
    pub mint_amount: i128,
    pub start_time: u64,
    pub penalty_rate: u32,
    pub threshold: u32,
    /// Ledger timestamp of creation or latest update
    pub timestamp: u64,
    pub creator: Address,
    pub minter_type: MinterType,
    pub interest_rate: u32,
    pub grace_period: u32,
    pub location: String,
    pub currency: Currency,
    pub status: bool,
    pub min_mint: i128,
    pub max_loan: i128,
}

/// Audit record of the latest update applied to a minter.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinterUpdate {
    pub update_name: String,
    pub update_max_mint: i128,
    pub update_mint_amount: i128,
    pub update_timestamp: u64,
    pub updater: Address,
}

/// Storage keys for contract state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Admin address (maintains the authority set)
    Admin,
    /// Token the mint fee is paid in
    FeeToken,
    MintFee,
    MaxMinters,
    NextMinterId,
    /// Contract receiving mint fees, set once
    AuthorityContract,
    TotalFeesCollected,
    /// Verified authority flag per address
    Authority(Address),
    Minter(u64),
    MinterUpdate(u64),
    /// Name index: minter name -> id
    MinterByName(String),
}

/// Events emitted by the minter registry.
pub struct RegistryEvents;

impl RegistryEvents {
    pub fn initialized(env: &Env, admin: &Address, fee_token: &Address, max_minters: u64) {
        let topics = (symbol_short!("registry"), symbol_short!("init"));
        env.events()
            .publish(topics, (admin.clone(), fee_token.clone(), max_minters));
    }

    pub fn authority_added(env: &Env, authority: &Address) {
        let topics = (symbol_short!("auth"), symbol_short!("added"));
        env.events().publish(topics, authority.clone());
    }

    pub fn authority_removed(env: &Env, authority: &Address) {
        let topics = (symbol_short!("auth"), symbol_short!("removed"));
        env.events().publish(topics, authority.clone());
    }

    pub fn authority_contract_set(env: &Env, contract: &Address) {
        let topics = (symbol_short!("auth"), symbol_short!("contract"));
        env.events().publish(topics, contract.clone());
    }

    pub fn mint_fee_set(env: &Env, fee: i128) {
        let topics = (symbol_short!("fee"), symbol_short!("set"));
        env.events().publish(topics, fee);
    }

    pub fn fee_paid(env: &Env, payer: &Address, recipient: &Address, amount: i128) {
        let topics = (symbol_short!("fee"), symbol_short!("paid"));
        env.events()
            .publish(topics, (payer.clone(), recipient.clone(), amount));
    }

    pub fn minter_created(env: &Env, id: u64, name: &String, creator: &Address) {
        let topics = (symbol_short!("minter"), symbol_short!("created"), id);
        env.events().publish(topics, (name.clone(), creator.clone()));
    }

    pub fn minter_updated(env: &Env, id: u64, update: &MinterUpdate) {
        let topics = (symbol_short!("minter"), symbol_short!("updated"), id);
        env.events().publish(
            topics,
            (
                update.update_name.clone(),
                update.update_max_mint,
                update.update_mint_amount,
                update.updater.clone(),
            ),
        );
    }
}
