use minter_registry::{
    MinterParams, MinterRegistryContract, MinterRegistryContractClient, RegistryError,
};
use soroban_sdk::{testutils::Address as _, token, vec, Address, Env, String};

fn setup_registry() -> (Env, Address, Address, MinterRegistryContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let creator = Address::generate(&env);

    let fee_token = env.register_stellar_asset_contract_v2(admin.clone());
    token::StellarAssetClient::new(&env, &fee_token.address()).mint(&creator, &1_000_000);

    let contract_id = env.register(MinterRegistryContract, ());
    let client = MinterRegistryContractClient::new(&env, &contract_id);
    client.initialize(
        &admin,
        &fee_token.address(),
        &0,
        &vec![&env, creator.clone()],
    );

    (env, admin, creator, client)
}

fn params(env: &Env, name: &str) -> MinterParams {
    MinterParams {
        name: String::from_str(env, name),
        max_mint: 1_000_000,
        mint_amount: 100,
        start_time: 30,
        penalty_rate: 5,
        threshold: 50,
        minter_type: String::from_str(env, "community"),
        interest_rate: 10,
        grace_period: 7,
        location: String::from_str(env, "VillageX"),
        currency: String::from_str(env, "BTC"),
        min_mint: 50,
        max_loan: 1000,
    }
}

// Every stored minter is reachable through its name and no index entry
// points at a minter with a different name.
fn assert_index_consistent(env: &Env, client: &MinterRegistryContractClient, names: &[&str]) {
    for id in 0..client.get_minter_count() {
        let minter = client.get_minter(&id).unwrap();
        assert_eq!(client.get_minter_id_by_name(&minter.name), Some(id));
    }
    for name in names {
        let name = String::from_str(env, name);
        if let Some(id) = client.get_minter_id_by_name(&name) {
            assert_eq!(client.get_minter(&id).unwrap().name, name);
        }
    }
}

#[test]
fn test_alpha_without_authority_contract_leaves_no_trace() {
    let (env, _admin, creator, client) = setup_registry();

    let result = client.try_create_minter(&creator, &params(&env, "Alpha"));
    assert_eq!(result, Err(Ok(RegistryError::AuthorityNotVerified)));
    assert_eq!(client.get_minter_count(), 0);
    assert_eq!(client.get_minter(&0), None);
    assert!(!client.check_minter_existence(&String::from_str(&env, "Alpha")));
}

#[test]
fn test_name_index_survives_create_and_rename_sequence() {
    let (env, _admin, creator, client) = setup_registry();
    let authority = Address::generate(&env);
    client.set_authority_contract(&authority);

    let names = ["Alpha", "Beta", "Gamma", "Delta", "Omega"];
    for name in names[..3].iter() {
        client.create_minter(&creator, &params(&env, name));
    }
    assert_index_consistent(&env, &client, &names);

    // Rename Alpha -> Delta, then try to steal Beta's name, then free Alpha's old name.
    client.update_minter(&creator, &0, &String::from_str(&env, "Delta"), &10, &1);
    let beta = String::from_str(&env, "Beta");
    let result = client.try_update_minter(&creator, &2, &beta, &10, &1);
    assert_eq!(result, Err(Ok(RegistryError::MinterAlreadyExists)));
    assert_index_consistent(&env, &client, &names);

    client.create_minter(&creator, &params(&env, "Alpha"));
    assert_eq!(
        client.get_minter_id_by_name(&String::from_str(&env, "Alpha")),
        Some(3)
    );

    client.update_minter(&creator, &1, &String::from_str(&env, "Omega"), &10, &1);
    assert!(!client.check_minter_existence(&String::from_str(&env, "Beta")));
    assert_index_consistent(&env, &client, &names);

    let result = client.try_create_minter(&creator, &params(&env, "Omega"));
    assert_eq!(result, Err(Ok(RegistryError::MinterAlreadyExists)));
    assert_eq!(client.get_minter_count(), 4);
    assert_eq!(client.get_total_fees_collected(), 4 * client.get_mint_fee());
}

#[test]
fn test_registry_instances_are_isolated() {
    let (env, _admin, creator, client) = setup_registry();
    let authority = Address::generate(&env);
    client.set_authority_contract(&authority);
    client.create_minter(&creator, &params(&env, "Alpha"));

    let other_id = env.register(MinterRegistryContract, ());
    let other = MinterRegistryContractClient::new(&env, &other_id);
    assert_eq!(other.get_minter_count(), 0);
    assert_eq!(other.get_authority_contract(), None);
    assert!(!other.check_minter_existence(&String::from_str(&env, "Alpha")));
}
