//! Validation rules for minter registration and updates.
//!
//! Checks run in a fixed order and the first failing rule determines the
//! error code.

use soroban_sdk::{Env, String};

use crate::types::{
    Currency, MinterParams, MinterType, RegistryError, MAX_GRACE_PERIOD, MAX_INTEREST_RATE,
    MAX_MINT_CEILING, MAX_NAME_LEN, MAX_PENALTY_RATE, MAX_VOTING_THRESHOLD,
};

/// Parameters that passed validation, with enumerated fields parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatedParams {
    pub minter_type: MinterType,
    pub currency: Currency,
}

fn is_valid_text(value: &String) -> bool {
    let len = value.len();
    len > 0 && len <= MAX_NAME_LEN
}

pub fn validate_name(name: &String) -> Result<(), RegistryError> {
    if !is_valid_text(name) {
        return Err(RegistryError::InvalidUpdateParam);
    }
    Ok(())
}

pub fn validate_max_mint(max_mint: i128) -> Result<(), RegistryError> {
    if max_mint <= 0 || max_mint > MAX_MINT_CEILING {
        return Err(RegistryError::InvalidMaxMint);
    }
    Ok(())
}

pub fn validate_mint_amount(mint_amount: i128) -> Result<(), RegistryError> {
    if mint_amount <= 0 {
        return Err(RegistryError::InvalidMintAmount);
    }
    Ok(())
}

/// Validates the fields shared by creation and update.
pub fn validate_core_fields(
    name: &String,
    max_mint: i128,
    mint_amount: i128,
) -> Result<(), RegistryError> {
    validate_name(name)?;
    validate_max_mint(max_mint)?;
    validate_mint_amount(mint_amount)
}

/// Validates every field of a registration request.
pub fn validate_minter_params(
    env: &Env,
    params: &MinterParams,
) -> Result<ValidatedParams, RegistryError> {
    validate_core_fields(&params.name, params.max_mint, params.mint_amount)?;

    if params.start_time == 0 {
        return Err(RegistryError::InvalidStartTime);
    }
    if params.penalty_rate > MAX_PENALTY_RATE {
        return Err(RegistryError::InvalidPenaltyRate);
    }
    if params.threshold == 0 || params.threshold > MAX_VOTING_THRESHOLD {
        return Err(RegistryError::InvalidVotingThreshold);
    }
    let minter_type =
        MinterType::parse(env, &params.minter_type).ok_or(RegistryError::InvalidMinterType)?;
    if params.interest_rate > MAX_INTEREST_RATE {
        return Err(RegistryError::InvalidInterestRate);
    }
    if params.grace_period > MAX_GRACE_PERIOD {
        return Err(RegistryError::InvalidGracePeriod);
    }
    if !is_valid_text(&params.location) {
        return Err(RegistryError::InvalidLocation);
    }
    let currency = Currency::parse(env, &params.currency).ok_or(RegistryError::InvalidCurrency)?;
    if params.min_mint <= 0 {
        return Err(RegistryError::InvalidMinMint);
    }
    if params.max_loan <= 0 {
        return Err(RegistryError::InvalidMaxLoan);
    }

    Ok(ValidatedParams {
        minter_type,
        currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params(env: &Env) -> MinterParams {
        MinterParams {
            name: String::from_str(env, "Alpha"),
            max_mint: 1_000_000,
            mint_amount: 100,
            start_time: 30,
            penalty_rate: 5,
            threshold: 50,
            minter_type: String::from_str(env, "government"),
            interest_rate: 10,
            grace_period: 7,
            location: String::from_str(env, "VillageX"),
            currency: String::from_str(env, "STX"),
            min_mint: 50,
            max_loan: 1000,
        }
    }

    #[test]
    fn test_valid_params() {
        let env = Env::default();
        let validated = validate_minter_params(&env, &valid_params(&env)).unwrap();
        assert_eq!(validated.minter_type, MinterType::Government);
        assert_eq!(validated.currency, Currency::Stx);
    }

    #[test]
    fn test_parses_all_minter_types_and_currencies() {
        let env = Env::default();
        assert_eq!(
            MinterType::parse(&env, &String::from_str(&env, "ngo")),
            Some(MinterType::Ngo)
        );
        assert_eq!(
            MinterType::parse(&env, &String::from_str(&env, "community")),
            Some(MinterType::Community)
        );
        assert_eq!(
            MinterType::parse(&env, &String::from_str(&env, "Government")),
            None
        );
        assert_eq!(
            Currency::parse(&env, &String::from_str(&env, "USD")),
            Some(Currency::Usd)
        );
        assert_eq!(
            Currency::parse(&env, &String::from_str(&env, "BTC")),
            Some(Currency::Btc)
        );
        assert_eq!(Currency::parse(&env, &String::from_str(&env, "stx")), None);
    }

    fn assert_rejected(env: &Env, mutate: impl FnOnce(&mut MinterParams), expected: RegistryError) {
        let mut params = valid_params(env);
        mutate(&mut params);
        assert_eq!(validate_minter_params(env, &params), Err(expected));
    }

    #[test]
    fn test_each_rule_has_its_own_code() {
        let env = Env::default();
        assert_rejected(
            &env,
            |p| p.name = String::from_str(&env, ""),
            RegistryError::InvalidUpdateParam,
        );
        assert_rejected(&env, |p| p.max_mint = 0, RegistryError::InvalidMaxMint);
        assert_rejected(
            &env,
            |p| p.max_mint = MAX_MINT_CEILING + 1,
            RegistryError::InvalidMaxMint,
        );
        assert_rejected(&env, |p| p.mint_amount = 0, RegistryError::InvalidMintAmount);
        assert_rejected(&env, |p| p.start_time = 0, RegistryError::InvalidStartTime);
        assert_rejected(&env, |p| p.penalty_rate = 101, RegistryError::InvalidPenaltyRate);
        assert_rejected(&env, |p| p.threshold = 0, RegistryError::InvalidVotingThreshold);
        assert_rejected(&env, |p| p.threshold = 101, RegistryError::InvalidVotingThreshold);
        assert_rejected(
            &env,
            |p| p.minter_type = String::from_str(&env, "invalid"),
            RegistryError::InvalidMinterType,
        );
        assert_rejected(&env, |p| p.interest_rate = 21, RegistryError::InvalidInterestRate);
        assert_rejected(&env, |p| p.grace_period = 31, RegistryError::InvalidGracePeriod);
        assert_rejected(
            &env,
            |p| p.location = String::from_str(&env, ""),
            RegistryError::InvalidLocation,
        );
        assert_rejected(
            &env,
            |p| p.currency = String::from_str(&env, "EUR"),
            RegistryError::InvalidCurrency,
        );
        assert_rejected(&env, |p| p.min_mint = 0, RegistryError::InvalidMinMint);
        assert_rejected(&env, |p| p.max_loan = 0, RegistryError::InvalidMaxLoan);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let env = Env::default();
        let mut params = valid_params(&env);
        params.max_loan = 0;
        params.penalty_rate = 500;
        params.mint_amount = -1;
        assert_eq!(
            validate_minter_params(&env, &params),
            Err(RegistryError::InvalidMintAmount)
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let env = Env::default();
        let mut params = valid_params(&env);
        params.max_mint = MAX_MINT_CEILING;
        params.penalty_rate = MAX_PENALTY_RATE;
        params.threshold = MAX_VOTING_THRESHOLD;
        params.interest_rate = MAX_INTEREST_RATE;
        params.grace_period = MAX_GRACE_PERIOD;
        assert!(validate_minter_params(&env, &params).is_ok());

        let long = [b'n'; 101];
        assert_eq!(
            validate_name(&String::from_str(&env, core::str::from_utf8(&long).unwrap())),
            Err(RegistryError::InvalidUpdateParam)
        );
        assert!(validate_name(&String::from_str(
            &env,
            core::str::from_utf8(&long[..100]).unwrap()
        ))
        .is_ok());
    }
}
